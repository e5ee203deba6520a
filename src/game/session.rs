use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};

use rand::Rng;

use super::clock::Clock;
use super::event::{Command, Event, Notice};
use super::machine::Game;
use super::scheduler::{Scheduler, TimerPurpose};
use crate::config::GameConfig;
use crate::error::PuzzleResult;

/// Single-threaded control loop: one event at a time, each transition run to
/// completion before the next is taken.
pub struct Session<C, R> {
    game: Game<R>,
    timers: Scheduler,
    clock: C,
    commands: Receiver<Command>,
    subscribers: Vec<Sender<Notice>>,
    backlog: Vec<Notice>,
}

impl<C: Clock, R: Rng> Session<C, R> {
    pub fn new(
        config: GameConfig,
        rng: R,
        clock: C,
        commands: Receiver<Command>,
    ) -> PuzzleResult<Self> {
        let mut timers = Scheduler::new();
        let now = clock.now();
        let tick = config.tick_interval();
        let (game, started) = Game::start(config, rng, now, &mut timers)?;
        timers.schedule_every(TimerPurpose::Redraw, tick, now, Event::Tick);
        Ok(Self::from_parts(game, timers, clock, commands, vec![started]))
    }

    /// Wraps an already started game. `backlog` is delivered to subscribers
    /// on the first dispatch.
    pub fn from_parts(
        game: Game<R>,
        timers: Scheduler,
        clock: C,
        commands: Receiver<Command>,
        backlog: Vec<Notice>,
    ) -> Self {
        Self {
            game,
            timers,
            clock,
            commands,
            subscribers: Vec::new(),
            backlog,
        }
    }

    pub fn subscribe(&mut self) -> Receiver<Notice> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    pub fn timers(&self) -> &Scheduler {
        &self.timers
    }

    pub fn is_finished(&self) -> bool {
        self.game.is_terminated()
    }

    /// Blocks until the session is cancelled or the command channel closes.
    pub fn run(&mut self) -> PuzzleResult<()> {
        self.flush();
        while !self.game.is_terminated() {
            if self.fire_due()? > 0 {
                continue;
            }

            let received = match self.timers.next_deadline() {
                Some(due) => {
                    let wait = due.saturating_sub(self.clock.now());
                    self.commands.recv_timeout(wait)
                }
                None => self
                    .commands
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };

            match received {
                Ok(cmd) => self.submit(cmd)?,
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::debug!("command channel closed");
                    self.dispatch(Event::Cancel)?;
                }
            }
        }
        Ok(())
    }

    /// Feeds one player command. Toggles that name a switch the current
    /// round does not have are dropped here rather than reaching the game.
    pub fn submit(&mut self, cmd: Command) -> PuzzleResult<()> {
        self.flush();
        if let Command::Toggle(index) = cmd {
            let n = self.game.state().round.num_vars();
            if index >= n {
                tracing::warn!(index, n, "ignoring toggle for missing switch");
                return Ok(());
            }
        }
        self.dispatch(cmd.into())
    }

    pub fn dispatch(&mut self, event: Event) -> PuzzleResult<()> {
        self.flush();
        let now = self.clock.now();
        let notices = self.game.handle(event, now, &mut self.timers)?;
        for notice in notices {
            self.publish(notice);
        }
        Ok(())
    }

    /// Dispatches every timer due at the current time, earliest first.
    pub fn fire_due(&mut self) -> PuzzleResult<usize> {
        let mut fired = 0;
        while !self.game.is_terminated() {
            let now = self.clock.now();
            let Some((purpose, event)) = self.timers.pop_due(now) else {
                break;
            };
            tracing::trace!(?purpose, "timer fired");
            self.dispatch(event)?;
            fired += 1;
        }
        Ok(fired)
    }

    fn flush(&mut self) {
        for notice in std::mem::take(&mut self.backlog) {
            self.publish(notice);
        }
    }

    fn publish(&mut self, notice: Notice) {
        // drop subscribers whose receiver is gone
        self.subscribers.retain(|tx| tx.send(notice.clone()).is_ok());
    }
}
