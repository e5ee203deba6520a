use rand::Rng;
use rand::seq::SliceRandom;

use super::cnf::{Clause, Formula, Lit};
use crate::error::{PuzzleError, PuzzleResult};

/// How many literal slots each variable occupies before shuffling.
pub const OCCURRENCES_PER_VAR: u32 = 7;

/// Largest `n` whose slot count `7n` still fits in a `u32`.
pub const MAX_GENERATED_VARS: u32 = u32::MAX / OCCURRENCES_PER_VAR;

/// Random 3-CNF over `n` variables with `floor(7n/3)` clauses.
///
/// Every variable fills exactly seven slots; the slots are shuffled and cut
/// into consecutive triples, dropping the one or two left over. Polarities
/// are fair coin flips. Two slots of one triple may name the same variable.
pub fn generate_formula<R: Rng + ?Sized>(n: u32, rng: &mut R) -> PuzzleResult<Formula> {
    if n == 0 || n > MAX_GENERATED_VARS {
        return Err(PuzzleError::InvalidVarCount {
            n,
            max: MAX_GENERATED_VARS,
        });
    }

    let mut slots = (0..n * OCCURRENCES_PER_VAR)
        .map(|i| i / OCCURRENCES_PER_VAR)
        .collect::<Vec<_>>();
    slots.shuffle(rng);

    let clauses = slots
        .chunks_exact(3)
        .map(|t| {
            Clause::new(
                Lit::new(t[0], rng.random::<bool>()),
                Lit::new(t[1], rng.random::<bool>()),
                Lit::new(t[2], rng.random::<bool>()),
            )
        })
        .collect::<Vec<_>>();

    Formula::new(n, clauses)
}

pub fn clause_count_for(n: u32) -> usize {
    (n as usize * OCCURRENCES_PER_VAR as usize) / 3
}
