//! # Hardmode Core Library
//!
//! Business logic for the Hardmode Pomodoro timer: a single user's day of
//! focus blocks separated by short and long breaks, with a review after every
//! block and tracking of mid-block task changes.
//!
//! ## Architecture
//!
//! - **Timer**: a phase state machine advanced by the host, once per second,
//!   through `tick()` / `break_tick()`. Observers plug in through
//!   [`TimerHooks`]; time comes from an injected [`Clock`].
//! - **Estimator**: [`estimate_completion`], a pure projection of when the
//!   remaining blocks will be done.
//! - **Session**: [`DaySession`] wires the timer to a [`DayLedger`] that keeps
//!   the day's history.
//! - **Storage**: SQLite ledger and TOML configuration.
//!
//! ## Key Components
//!
//! - [`TimerFsm`]: Core timer state machine
//! - [`Scheme`]: Work/break durations and long-break cadence
//! - [`Database`]: Day and focus-block persistence
//! - [`Config`]: Application configuration management

pub mod error;
pub mod eta;
pub mod events;
pub mod session;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, DatabaseError, TimerError};
pub use eta::{estimate_completion, try_estimate_completion, DayProgress};
pub use events::Event;
pub use session::{DaySession, SessionSnapshot};
pub use storage::{
    sync_day, Config, Database, DayLedger, DayReflection, DaySummary, DayUpload, NewTask,
    PlannedTask, PomoCompletion, SyncClient,
};
pub use timer::{
    Clock, ManualClock, NullHooks, Phase, Review, Scheme, SharedClock, SystemClock, TimerFsm,
    TimerHooks, TimerState,
};
