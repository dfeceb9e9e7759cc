mod clock;
mod fsm;
mod hooks;
mod scheme;

pub use clock::{system_clock, Clock, ManualClock, SharedClock, SystemClock};
pub use fsm::{Phase, Review, TimerFsm, TimerState};
pub use hooks::{HookCall, NullHooks, RecordingHooks, TimerHooks};
pub use scheme::Scheme;
