use std::cmp::Ordering;
use std::fmt;

use crate::cnf::cnf::Formula;
use crate::error::{PuzzleError, PuzzleResult};

/// Enumeration is `2^n` formula evaluations; nothing above this is calibrated.
pub const MAX_CALIBRATED_VARS: u32 = 8;

/// Exact fraction of assignments that satisfy a formula.
#[derive(Debug, Clone, Copy)]
pub struct Easiness {
    pub satisfying: u64,
    pub total: u64,
}

impl Easiness {
    pub fn new(satisfying: u64, total: u64) -> Self {
        Self { satisfying, total }
    }

    pub fn is_zero(&self) -> bool {
        self.satisfying == 0
    }

    pub fn as_f64(&self) -> f64 {
        self.satisfying as f64 / self.total as f64
    }

    /// True when `self > 1/denominator`.
    pub fn exceeds_reciprocal(&self, denominator: u64) -> bool {
        u128::from(self.satisfying) * u128::from(denominator) > u128::from(self.total)
    }
}

// compared as fractions: 1/2 == 4/8
impl Ord for Easiness {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = u128::from(self.satisfying) * u128::from(other.total);
        let rhs = u128::from(other.satisfying) * u128::from(self.total);
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Easiness {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Easiness {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Easiness {}

impl fmt::Display for Easiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.satisfying, self.total)
    }
}

pub fn measure_easiness(formula: &Formula) -> PuzzleResult<Easiness> {
    let count = count_models(formula)?;
    Ok(Easiness::new(count, 1u64 << formula.num_vars))
}

/// Walks all `2^n` assignments with a binary counter and counts the models.
pub fn count_models(formula: &Formula) -> PuzzleResult<u64> {
    let n = formula.num_vars;
    if n == 0 || n > MAX_CALIBRATED_VARS {
        return Err(PuzzleError::InvalidVarCount {
            n,
            max: MAX_CALIBRATED_VARS,
        });
    }

    let mut bits = vec![false; n as usize];
    let mut count = 0u64;
    for _ in 0..(1u64 << n) {
        if formula.is_satisfied_by(&bits)? {
            count += 1;
        }
        increment(&mut bits);
    }
    Ok(count)
}

// clear the trailing ones, set the lowest zero; wraps to all-zero after the last
fn increment(bits: &mut [bool]) {
    for bit in bits.iter_mut() {
        if *bit {
            *bit = false;
        } else {
            *bit = true;
            return;
        }
    }
}
