use std::time::Duration;

use crate::cnf::cnf::{Assignment, Formula};
use crate::count::easiness::{Easiness, measure_easiness};
use crate::error::{PuzzleError, PuzzleResult};
use crate::puzzle::instance::Instance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Playing,
    /// Between rounds, waiting for the scheduled reset. Also entered after a
    /// timeout that leaves lives.
    Won,
    GameOver,
}

/// One live puzzle. Only `assignment` changes while it is played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub level: u32,
    pub formula: Formula,
    pub assignment: Assignment,
    pub timeout: Duration,
    pub started_at: Duration,
    pub easiness: Easiness,
}

impl Round {
    /// Round over a hand-picked formula starting from all zeros.
    pub fn new(formula: Formula, timeout: Duration, started_at: Duration) -> PuzzleResult<Self> {
        let easiness = measure_easiness(&formula)?;
        let assignment = Assignment::zeros(formula.num_vars as usize);
        Ok(Self {
            level: 0,
            formula,
            assignment,
            timeout,
            started_at,
            easiness,
        })
    }

    pub fn from_instance(instance: Instance, started_at: Duration) -> PuzzleResult<Self> {
        if instance.assignment.len() != instance.n as usize {
            return Err(PuzzleError::AssignmentLength {
                expected: instance.n as usize,
                actual: instance.assignment.len(),
            });
        }
        Ok(Self {
            level: instance.level,
            formula: instance.formula,
            assignment: instance.assignment,
            timeout: instance.timeout,
            started_at,
            easiness: instance.easiness,
        })
    }

    pub fn num_vars(&self) -> usize {
        self.assignment.len()
    }

    pub fn is_solved(&self) -> PuzzleResult<bool> {
        self.formula.is_satisfied_by(self.assignment.bits())
    }

    pub fn time_remaining(&self, now: Duration) -> Duration {
        let elapsed = now.saturating_sub(self.started_at);
        self.timeout.saturating_sub(elapsed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub lives: u32,
    pub score: u32,
    pub phase: Phase,
    pub round: Round,
}

/// Read-only view handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub lives: u32,
    pub score: u32,
    pub phase: Phase,
    pub level: u32,
    pub formula: Formula,
    pub assignment: Assignment,
    pub clause_status: Vec<bool>,
    /// Only counts down while playing.
    pub time_remaining: Option<Duration>,
}

impl GameState {
    pub fn snapshot(&self, now: Duration) -> PuzzleResult<Snapshot> {
        let round = &self.round;
        let time_remaining = match self.phase {
            Phase::Playing => Some(round.time_remaining(now)),
            Phase::Won | Phase::GameOver => None,
        };
        Ok(Snapshot {
            lives: self.lives,
            score: self.score,
            phase: self.phase,
            level: round.level,
            formula: round.formula.clone(),
            assignment: round.assignment.clone(),
            clause_status: round.formula.clause_status(round.assignment.bits())?,
            time_remaining,
        })
    }
}
