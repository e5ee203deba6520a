pub mod clock;
pub mod event;
pub mod machine;
pub mod scheduler;
pub mod session;
pub mod state;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use event::{Command, Event, Notice, NoticeKind};
pub use machine::Game;
pub use scheduler::{Scheduler, TimerPurpose};
pub use session::Session;
pub use state::{GameState, Phase, Round, Snapshot};
