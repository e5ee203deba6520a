//! Tuning constants for puzzle generation and round timing.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::count::easiness::MAX_CALIBRATED_VARS;
use crate::error::{PuzzleError, PuzzleResult};

/// Lives never exceed this, at the start or after a restart.
pub const MAX_LIVES: u32 = 3;

/// Longest round a config may ask for.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Longest pause between rounds or between redraws.
pub const MAX_DELAY_MS: u64 = 60_000;

/// The two shipped tunings of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Level every 300 points, up to 8 switches.
    Classic,
    /// Level every 500 points, up to 7 switches.
    Compact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Points per level (`level = score / level_divisor`).
    pub level_divisor: u32,
    pub min_vars: u32,
    pub max_vars: u32,
    pub base_timeout_secs: u64,
    pub timeout_spread_secs: u64,
    /// Round length once `max_vars` is reached.
    pub floor_timeout_secs: u64,
    pub win_bonus: u32,
    pub starting_lives: u32,
    /// Pause after a solve before the next round.
    pub win_delay_ms: u64,
    /// Pause after a timeout (with lives left) before the next round.
    pub lose_delay_ms: u64,
    pub tick_interval_ms: u64,
    /// Rejected candidates before the too-easy test is dropped.
    pub max_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl GameConfig {
    pub fn classic() -> Self {
        Self {
            level_divisor: 300,
            min_vars: 4,
            max_vars: 8,
            base_timeout_secs: 15,
            timeout_spread_secs: 15,
            floor_timeout_secs: 30,
            win_bonus: 100,
            starting_lives: 3,
            win_delay_ms: 2000,
            lose_delay_ms: 1500,
            tick_interval_ms: 1000 / 30,
            max_attempts: 100_000,
        }
    }

    pub fn compact() -> Self {
        Self {
            level_divisor: 500,
            max_vars: 7,
            ..Self::classic()
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self::classic(),
            Variant::Compact => Self::compact(),
        }
    }

    /// Load a config from a YAML file. Missing keys take classic defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: GameConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("rejected config file: {}", path.display()))?;
        Ok(config)
    }

    /// Picks the config file when given, otherwise the preset (classic when
    /// neither is named). Naming both is rejected since the file replaces
    /// every preset value.
    pub fn resolve(variant: Option<Variant>, path: Option<&Path>) -> Result<Self> {
        match (variant, path) {
            (Some(v), Some(p)) => anyhow::bail!(
                "variant {:?} and config file {} are mutually exclusive",
                v,
                p.display()
            ),
            (_, Some(p)) => Self::from_file(p),
            (v, None) => {
                let config = Self::for_variant(v.unwrap_or(Variant::Classic));
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn validate(&self) -> PuzzleResult<()> {
        if self.level_divisor == 0 {
            return Err(invalid("level_divisor must be positive"));
        }
        if self.min_vars == 0 {
            return Err(invalid("min_vars must be positive"));
        }
        if self.min_vars > self.max_vars {
            return Err(invalid(format!(
                "min_vars ({}) exceeds max_vars ({})",
                self.min_vars, self.max_vars
            )));
        }
        if self.max_vars > MAX_CALIBRATED_VARS {
            return Err(invalid(format!(
                "max_vars ({}) exceeds enumeration limit {}",
                self.max_vars, MAX_CALIBRATED_VARS
            )));
        }
        if !(1..=MAX_LIVES).contains(&self.starting_lives) {
            return Err(invalid(format!(
                "starting_lives ({}) outside [1, {}]",
                self.starting_lives, MAX_LIVES
            )));
        }
        let longest_round = self
            .base_timeout_secs
            .saturating_add(self.timeout_spread_secs)
            .max(self.floor_timeout_secs);
        if longest_round > MAX_TIMEOUT_SECS {
            return Err(invalid(format!(
                "round timeout ({longest_round}s) exceeds {MAX_TIMEOUT_SECS}s"
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(invalid("tick_interval_ms must be positive"));
        }
        for (name, ms) in [
            ("win_delay_ms", self.win_delay_ms),
            ("lose_delay_ms", self.lose_delay_ms),
            ("tick_interval_ms", self.tick_interval_ms),
        ] {
            if ms > MAX_DELAY_MS {
                return Err(invalid(format!("{name} ({ms}) exceeds {MAX_DELAY_MS}")));
            }
        }
        if self.max_attempts == 0 {
            return Err(invalid("max_attempts must be positive"));
        }
        Ok(())
    }

    pub fn merge_with_cli(&mut self, overrides: &CliOverrides) {
        if let Some(divisor) = overrides.level_divisor {
            self.level_divisor = divisor;
        }
        if let Some(max_vars) = overrides.max_vars {
            self.max_vars = max_vars;
        }
        if let Some(lives) = overrides.starting_lives {
            self.starting_lives = lives;
        }
        if let Some(attempts) = overrides.max_attempts {
            self.max_attempts = attempts;
        }
    }

    pub fn level_for_score(&self, score: u32) -> u32 {
        score / self.level_divisor.max(1)
    }

    /// Grows by one every three levels, capped at `max_vars`.
    pub fn vars_for_level(&self, level: u32) -> u32 {
        self.min_vars
            .saturating_add(level / 3)
            .min(self.max_vars)
    }

    /// Sawtooth inside each group of three levels; flat once `n` saturates.
    pub fn timeout_for_level(&self, level: u32) -> Duration {
        if self.vars_for_level(level) >= self.max_vars {
            return Duration::from_secs(self.floor_timeout_secs);
        }
        let step = u64::from(level % 3) + 1;
        Duration::from_secs(
            self.base_timeout_secs
                .saturating_add(self.timeout_spread_secs / step),
        )
    }

    /// `d` such that the acceptable easiness ceiling is `1/d`, i.e.
    /// `max(1/2^n, 1/(level+1)) == 1/min(2^n, level+1)`.
    pub fn ceiling_denominator(&self, level: u32, n: u32) -> u64 {
        (1u64 << n).min(u64::from(level) + 1)
    }

    pub fn win_delay(&self) -> Duration {
        Duration::from_millis(self.win_delay_ms)
    }

    pub fn lose_delay(&self) -> Duration {
        Duration::from_millis(self.lose_delay_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Command line overrides for config values
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub level_divisor: Option<u32>,
    pub max_vars: Option<u32>,
    pub starting_lives: Option<u32>,
    pub max_attempts: Option<u32>,
}

fn invalid(msg: impl Into<String>) -> PuzzleError {
    PuzzleError::InvalidConfig(msg.into())
}
