use std::time::Duration;

use rand::Rng;

use super::event::{Event, Notice, NoticeKind};
use super::scheduler::{Scheduler, TimerPurpose};
use super::state::{GameState, Phase, Round, Snapshot};
use crate::config::GameConfig;
use crate::error::PuzzleResult;
use crate::puzzle::instance::generate_instance;

/// Lives, score and the live round, plus the rng that draws new rounds.
#[derive(Debug)]
pub struct Game<R> {
    config: GameConfig,
    rng: R,
    state: GameState,
    terminated: bool,
}

impl<R: Rng> Game<R> {
    /// Starts in `Playing` with a level-0 round and its countdown armed.
    pub fn start(
        config: GameConfig,
        mut rng: R,
        now: Duration,
        timers: &mut Scheduler,
    ) -> PuzzleResult<(Self, Notice)> {
        config.validate()?;
        let instance = generate_instance(0, &config, &mut rng)?;
        let round = Round::from_instance(instance, now)?;
        Self::with_round(config, rng, round, now, timers)
    }

    /// Starts on a caller-supplied round instead of a generated one.
    pub fn with_round(
        config: GameConfig,
        rng: R,
        round: Round,
        now: Duration,
        timers: &mut Scheduler,
    ) -> PuzzleResult<(Self, Notice)> {
        config.validate()?;
        let game = Self {
            state: GameState {
                lives: config.starting_lives,
                score: 0,
                phase: Phase::Playing,
                round,
            },
            config,
            rng,
            terminated: false,
        };
        timers.cancel(TimerPurpose::Reset);
        timers.schedule(
            TimerPurpose::Countdown,
            game.state.round.timeout,
            now,
            Event::Timeout,
        );
        tracing::info!(
            level = game.state.round.level,
            n = game.state.round.num_vars(),
            "round started"
        );
        let notice = game.notice(NoticeKind::RoundStarted, now)?;
        Ok((game, notice))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn snapshot(&self, now: Duration) -> PuzzleResult<Snapshot> {
        self.state.snapshot(now)
    }

    /// Runs one transition to completion. Events that have no transition
    /// from the current phase are ignored.
    pub fn handle(
        &mut self,
        event: Event,
        now: Duration,
        timers: &mut Scheduler,
    ) -> PuzzleResult<Vec<Notice>> {
        if self.terminated {
            return Ok(Vec::new());
        }

        match (self.state.phase, event) {
            (_, Event::Cancel) => {
                self.terminated = true;
                timers.clear();
                tracing::info!(score = self.state.score, "session cancelled");
                Ok(vec![self.notice(NoticeKind::Cancelled, now)?])
            }
            (_, Event::Tick) => Ok(vec![self.notice(NoticeKind::Tick, now)?]),
            (Phase::Playing, Event::Toggle(index)) => self.toggle(index, now, timers),
            (Phase::Playing, Event::Timeout) => self.timeout(now, timers),
            (Phase::Won, Event::ScheduledReset) => Ok(vec![self.new_round(now, timers)?]),
            (Phase::GameOver, Event::Restart) => {
                self.state.lives = self.config.starting_lives;
                self.state.score = 0;
                tracing::info!("restarting after game over");
                Ok(vec![self.new_round(now, timers)?])
            }
            _ => {
                tracing::trace!(?event, phase = ?self.state.phase, "ignored event");
                Ok(Vec::new())
            }
        }
    }

    fn toggle(
        &mut self,
        index: usize,
        now: Duration,
        timers: &mut Scheduler,
    ) -> PuzzleResult<Vec<Notice>> {
        self.state.round.assignment.toggle(index)?;
        let mut out = vec![self.notice(NoticeKind::Toggled, now)?];
        if !self.state.round.is_solved()? {
            return Ok(out);
        }

        self.state.score = self.state.score.saturating_add(self.config.win_bonus);
        self.state.phase = Phase::Won;
        timers.cancel(TimerPurpose::Countdown);
        timers.schedule(
            TimerPurpose::Reset,
            self.config.win_delay(),
            now,
            Event::ScheduledReset,
        );
        tracing::info!(score = self.state.score, "round solved");
        out.push(self.notice(NoticeKind::Won, now)?);
        Ok(out)
    }

    fn timeout(&mut self, now: Duration, timers: &mut Scheduler) -> PuzzleResult<Vec<Notice>> {
        self.state.lives = self.state.lives.saturating_sub(1);
        timers.cancel(TimerPurpose::Countdown);

        if self.state.lives > 0 {
            self.state.phase = Phase::Won;
            timers.schedule(
                TimerPurpose::Reset,
                self.config.lose_delay(),
                now,
                Event::ScheduledReset,
            );
            tracing::info!(lives = self.state.lives, "round timed out");
            Ok(vec![self.notice(NoticeKind::Timeout, now)?])
        } else {
            self.state.phase = Phase::GameOver;
            timers.cancel(TimerPurpose::Reset);
            tracing::info!(score = self.state.score, "game over");
            Ok(vec![self.notice(NoticeKind::GameOver, now)?])
        }
    }

    fn new_round(&mut self, now: Duration, timers: &mut Scheduler) -> PuzzleResult<Notice> {
        let level = self.config.level_for_score(self.state.score);
        let instance = generate_instance(level, &self.config, &mut self.rng)?;
        self.state.round = Round::from_instance(instance, now)?;
        self.state.phase = Phase::Playing;

        timers.cancel(TimerPurpose::Reset);
        timers.schedule(
            TimerPurpose::Countdown,
            self.state.round.timeout,
            now,
            Event::Timeout,
        );
        tracing::info!(
            level,
            n = self.state.round.num_vars(),
            timeout_secs = self.state.round.timeout.as_secs(),
            "round started"
        );
        self.notice(NoticeKind::RoundStarted, now)
    }

    fn notice(&self, kind: NoticeKind, now: Duration) -> PuzzleResult<Notice> {
        Ok(Notice {
            kind,
            snapshot: self.state.snapshot(now)?,
        })
    }
}
