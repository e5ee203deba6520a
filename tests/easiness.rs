use threesat::PuzzleError;
use threesat::cnf::cnf::{Clause, Formula, Lit};
use threesat::cnf::generate::generate_formula;
use threesat::count::easiness::{Easiness, count_models, measure_easiness};
use threesat::rng::seeded_rng;

// independent check: decode each mask directly instead of stepping a counter
fn brute_force(formula: &Formula) -> u64 {
    let n = formula.num_vars;
    (0u32..(1 << n))
        .filter(|mask| {
            formula.clauses.iter().all(|c| {
                c.lits()
                    .iter()
                    .any(|l| ((mask >> l.var) & 1 == 1) != l.negated)
            })
        })
        .count() as u64
}

#[test]
fn single_positive_clause_is_seven_eighths() {
    let f = Formula::new(3, vec![Clause::new(Lit::pos(0), Lit::pos(1), Lit::pos(2))])
        .expect("formula");
    let e = measure_easiness(&f).expect("measure");
    assert_eq!(e.satisfying, 7);
    assert_eq!(e.total, 8);
    assert_eq!(e, Easiness::new(7, 8));
    assert!((e.as_f64() - 0.875).abs() < 1e-12);
}

#[test]
fn contradiction_has_zero_easiness() {
    let f = Formula::new(
        1,
        vec![
            Clause::new(Lit::pos(0), Lit::pos(0), Lit::pos(0)),
            Clause::new(Lit::neg(0), Lit::neg(0), Lit::neg(0)),
        ],
    )
    .expect("formula");
    assert!(measure_easiness(&f).expect("measure").is_zero());
}

#[test]
fn tautological_clause_counts_everything() {
    let f = Formula::new(2, vec![Clause::new(Lit::pos(0), Lit::neg(0), Lit::pos(1))])
        .expect("formula");
    assert_eq!(count_models(&f).expect("count"), 4);
}

#[test]
fn counter_matches_independent_enumeration() {
    let mut rng = seeded_rng(2024);
    for n in 1..=8 {
        for _ in 0..10 {
            let f = generate_formula(n, &mut rng).expect("generate");
            let e = measure_easiness(&f).expect("measure");
            assert_eq!(e.total, 1 << n);
            assert_eq!(e.satisfying, brute_force(&f), "n={n} formula={f}");
        }
    }
}

#[test]
fn too_many_vars_rejected() {
    let f = generate_formula(9, &mut seeded_rng(3)).expect("generate");
    let err = measure_easiness(&f).expect_err("n=9");
    assert_eq!(err, PuzzleError::InvalidVarCount { n: 9, max: 8 });
}

#[test]
fn fractions_compare_by_value() {
    assert_eq!(Easiness::new(1, 2), Easiness::new(4, 8));
    assert!(Easiness::new(1, 16) < Easiness::new(1, 8));
    assert!(Easiness::new(3, 16).exceeds_reciprocal(8));
    assert!(!Easiness::new(2, 16).exceeds_reciprocal(8));
    assert!(!Easiness::new(1, 256).exceeds_reciprocal(256));
}
