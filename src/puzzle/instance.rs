use std::time::Duration;

use rand::Rng;

use crate::cnf::cnf::{Assignment, Formula};
use crate::cnf::generate::generate_formula;
use crate::config::GameConfig;
use crate::count::easiness::{Easiness, measure_easiness};
use crate::error::{PuzzleError, PuzzleResult};

/// A calibrated puzzle ready to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub level: u32,
    pub n: u32,
    pub assignment: Assignment,
    pub formula: Formula,
    pub timeout: Duration,
    pub easiness: Easiness,
    /// Candidates drawn, including the accepted one.
    pub attempts: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The all-zero start already satisfies the formula.
    FreeWin,
    Unsatisfiable,
    TooEasy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RejectionStats {
    pub free_win: u32,
    pub unsatisfiable: u32,
    pub too_easy: u32,
}

impl RejectionStats {
    fn record(&mut self, r: Rejection) {
        match r {
            Rejection::FreeWin => self.free_win += 1,
            Rejection::Unsatisfiable => self.unsatisfiable += 1,
            Rejection::TooEasy => self.too_easy += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.free_win + self.unsatisfiable + self.too_easy
    }
}

/// Draws formulas for `level` until one is neither a free win, unsatisfiable,
/// nor easier than `1/min(2^n, level+1)`.
///
/// After `max_attempts` rejections the too-easy test is dropped; the other
/// two always hold for the returned instance.
pub fn generate_instance<R: Rng + ?Sized>(
    level: u32,
    config: &GameConfig,
    rng: &mut R,
) -> PuzzleResult<Instance> {
    config.validate()?;
    let n = config.vars_for_level(level);
    if n == 0 || n > config.max_vars {
        return Err(PuzzleError::InvalidVarCount {
            n,
            max: config.max_vars,
        });
    }
    let timeout = config.timeout_for_level(level);
    let ceiling = config.ceiling_denominator(level, n);
    let start = Assignment::zeros(n as usize);

    let mut stats = RejectionStats::default();
    let mut relaxed = false;
    loop {
        let formula = generate_formula(n, rng)?;
        let easiness = measure_easiness(&formula)?;
        let verdict = judge(&formula, &start, easiness, ceiling, relaxed)?;

        let Some(reason) = verdict else {
            let attempts = stats.total() + 1;
            tracing::debug!(
                level,
                n,
                attempts,
                easiness = %easiness,
                free_win = stats.free_win,
                unsatisfiable = stats.unsatisfiable,
                too_easy = stats.too_easy,
                "accepted instance"
            );
            return Ok(Instance {
                level,
                n,
                assignment: start,
                formula,
                timeout,
                easiness,
                attempts,
            });
        };

        stats.record(reason);
        if !relaxed && stats.total() >= config.max_attempts {
            tracing::warn!(
                level,
                n,
                attempts = stats.total(),
                "no candidate under easiness ceiling, relaxing"
            );
            relaxed = true;
        }
    }
}

pub fn judge(
    formula: &Formula,
    start: &Assignment,
    easiness: Easiness,
    ceiling_denominator: u64,
    relaxed: bool,
) -> PuzzleResult<Option<Rejection>> {
    if formula.is_satisfied_by(start.bits())? {
        return Ok(Some(Rejection::FreeWin));
    }
    if easiness.is_zero() {
        return Ok(Some(Rejection::Unsatisfiable));
    }
    if !relaxed && easiness.exceeds_reciprocal(ceiling_denominator) {
        return Ok(Some(Rejection::TooEasy));
    }
    Ok(None)
}
