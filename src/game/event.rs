use super::state::Snapshot;

/// Everything the state machine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Periodic redraw.
    Tick,
    Toggle(usize),
    /// The round's countdown expired.
    Timeout,
    /// The post-round pause is over.
    ScheduledReset,
    Restart,
    Cancel,
}

/// Player input after translation by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Toggle(usize),
    Restart,
    Cancel,
}

impl From<Command> for Event {
    fn from(cmd: Command) -> Self {
        match cmd {
            Command::Toggle(i) => Event::Toggle(i),
            Command::Restart => Event::Restart,
            Command::Cancel => Event::Cancel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    RoundStarted,
    Toggled,
    Tick,
    Won,
    Timeout,
    GameOver,
    Cancelled,
}

/// Outcome published to subscribers, with the state right after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub snapshot: Snapshot,
}
