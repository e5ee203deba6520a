use std::time::Duration;

use threesat::cnf::cnf::Assignment;
use threesat::config::GameConfig;
use threesat::count::easiness::measure_easiness;
use threesat::puzzle::instance::generate_instance;
use threesat::rng::seeded_rng;

#[test]
fn never_free_win_never_unsat() {
    let config = GameConfig::classic();
    let mut rng = seeded_rng(99);
    // 100 trials spread across levels, including saturated n
    for trial in 0..100u32 {
        let level = trial % 20 + (trial / 50) * 10;
        let inst = generate_instance(level, &config, &mut rng).expect("instance");
        let zeros = Assignment::zeros(inst.n as usize);
        assert_eq!(inst.assignment, zeros);
        assert_eq!(inst.assignment.len(), inst.formula.num_vars as usize);
        assert!(!inst.formula.is_satisfied_by(zeros.bits()).expect("eval"));
        let e = measure_easiness(&inst.formula).expect("measure");
        assert_eq!(e, inst.easiness);
        assert!(!e.is_zero(), "level {level} produced an unsatisfiable formula");
        let ceiling = config.ceiling_denominator(level, inst.n);
        assert!(!e.exceeds_reciprocal(ceiling), "level {level} too easy: {e}");
    }
}

#[test]
fn level_parameters() {
    let c = GameConfig::classic();
    assert_eq!(c.vars_for_level(0), 4);
    assert_eq!(c.vars_for_level(2), 4);
    assert_eq!(c.vars_for_level(3), 5);
    assert_eq!(c.vars_for_level(12), 8);
    assert_eq!(c.vars_for_level(1000), 8);

    assert_eq!(c.timeout_for_level(0), Duration::from_secs(30));
    assert_eq!(c.timeout_for_level(1), Duration::from_secs(22));
    assert_eq!(c.timeout_for_level(2), Duration::from_secs(20));
    assert_eq!(c.timeout_for_level(3), Duration::from_secs(30));
    assert_eq!(c.timeout_for_level(12), Duration::from_secs(30));
    assert_eq!(c.timeout_for_level(13), Duration::from_secs(30));

    assert_eq!(c.level_for_score(0), 0);
    assert_eq!(c.level_for_score(299), 0);
    assert_eq!(c.level_for_score(300), 1);
    assert_eq!(GameConfig::compact().level_for_score(300), 0);
}

#[test]
fn vars_and_ceiling_are_monotone() {
    let c = GameConfig::classic();
    let mut prev_n = 0;
    let mut prev_den = 0;
    for level in 0..200 {
        let n = c.vars_for_level(level);
        assert!(n >= prev_n);
        let den = c.ceiling_denominator(level, n);
        if n == c.max_vars {
            // ceiling 1/den shrinks as den grows
            assert!(den >= prev_den);
        }
        assert!(den <= 1 << n);
        prev_n = n;
        prev_den = den;
    }
    assert_eq!(c.ceiling_denominator(500, 8), 256);
}

#[test]
fn compact_variant_caps_at_seven() {
    let c = GameConfig::compact();
    assert_eq!(c.vars_for_level(100), 7);
    let inst = generate_instance(12, &c, &mut seeded_rng(4)).expect("instance");
    assert_eq!(inst.n, 7);
    assert_eq!(inst.formula.len(), 16);
    assert_eq!(inst.timeout, Duration::from_secs(30));
}

#[test]
fn relaxed_loop_keeps_hard_invariants() {
    let config = GameConfig {
        max_attempts: 1,
        ..GameConfig::classic()
    };
    let mut rng = seeded_rng(8);
    for _ in 0..20 {
        let inst = generate_instance(300, &config, &mut rng).expect("instance");
        assert!(!inst.easiness.is_zero());
        assert!(
            !inst
                .formula
                .is_satisfied_by(inst.assignment.bits())
                .expect("eval")
        );
    }
}

#[test]
fn same_seed_same_instance() {
    let c = GameConfig::classic();
    let a = generate_instance(5, &c, &mut seeded_rng(17)).expect("instance");
    let b = generate_instance(5, &c, &mut seeded_rng(17)).expect("instance");
    assert_eq!(a, b);
    assert!(a.attempts >= 1);
}

#[test]
fn invalid_config_is_rejected() {
    let c = GameConfig {
        max_vars: 9,
        ..GameConfig::classic()
    };
    assert!(generate_instance(0, &c, &mut seeded_rng(0)).is_err());
}
