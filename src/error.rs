use thiserror::Error;

pub type PuzzleResult<T> = Result<T, PuzzleError>;

/// Failures raised at the generator and state machine boundaries.
///
/// None of these are recoverable by the player: they signal a bad
/// configuration or a broken internal invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("variable count {n} outside supported range [1, {max}]")]
    InvalidVarCount { n: u32, max: u32 },

    #[error("literal references variable {var} but formula has {n} variables")]
    VarOutOfRange { var: u32, n: u32 },

    #[error("assignment has {actual} bits, formula expects {expected}")]
    AssignmentLength { expected: usize, actual: usize },

    #[error("toggle index {index} out of range for {n} switches")]
    ToggleOutOfRange { index: usize, n: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
