//! Timed 3-SAT switch puzzle: a difficulty-calibrated formula generator and
//! the round lifecycle that drives it.

pub mod cnf;
pub mod config;
pub mod count;
pub mod error;
pub mod game;
pub mod puzzle;
pub mod rng;

pub use error::{PuzzleError, PuzzleResult};
