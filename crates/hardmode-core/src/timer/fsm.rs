//! Timer state machine.
//!
//! The machine owns no thread and no timer. The host calls [`TimerFsm::tick`]
//! while focusing and [`TimerFsm::break_tick`] while on a break, once per
//! elapsed second; both are no-ops in any other phase so a host may call them
//! unconditionally on every pulse.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Planning -> Focus -> Review -> (ShortBreak | LongBreak) -> Focus ...
//!                       |                                 \
//!                       +-- abort --> Planning             +-- start_pomo --> Focus
//! (any but Focus) -- close_day --> DayClosed
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut fsm = TimerFsm::new(Scheme::default());
//! fsm.start_day(8)?;
//! fsm.start_pomo("Write report")?;
//! // Once per second:
//! fsm.tick();
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, trace, warn};

use super::clock::{system_clock, SharedClock};
use super::hooks::{NullHooks, TimerHooks};
use super::scheme::Scheme;
use crate::error::TimerError;

/// Phases of a work day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Planning,
    Focus,
    Review,
    ShortBreak,
    LongBreak,
    DayClosed,
}

impl Phase {
    pub fn is_break(self) -> bool {
        matches!(self, Phase::ShortBreak | Phase::LongBreak)
    }

    /// Phases from which a focus block may be started.
    pub fn can_start_focus(self) -> bool {
        matches!(self, Phase::Planning | Phase::ShortBreak | Phase::LongBreak)
    }

    /// Title-cased name for status displays.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::Planning => "Planning",
            Phase::Focus => "Focus",
            Phase::Review => "Review",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
            Phase::DayClosed => "Day Closed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}

/// Focus-quality review collected after a block ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// 1 (scattered) ..= 5 (deep focus).
    pub focus_score: u8,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub note: String,
}

/// Serializable snapshot of everything the machine tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: Phase,
    pub scheme: Scheme,
    #[serde(default)]
    pub current_task: String,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub seconds_remaining: u32,
    #[serde(default)]
    pub completed_today: u32,
    #[serde(default)]
    pub daily_target: u32,
    /// Set when the task changed during the current focus block.
    #[serde(default)]
    pub context_switch: bool,
}

impl TimerState {
    pub fn new(scheme: Scheme) -> Self {
        Self {
            phase: Phase::Idle,
            scheme,
            current_task: String::new(),
            started_at: None,
            seconds_remaining: 0,
            completed_today: 0,
            daily_target: 0,
            context_switch: false,
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(Scheme::default())
    }
}

/// Pomodoro phase state machine.
///
/// Mutated only through its methods. A failed operation leaves every field
/// unchanged and fires no hook.
pub struct TimerFsm<H: TimerHooks = NullHooks> {
    state: TimerState,
    hooks: H,
    clock: SharedClock,
}

impl TimerFsm<NullHooks> {
    /// Create an idle machine on the system clock with no observer.
    pub fn new(scheme: Scheme) -> Self {
        Self::with_hooks(scheme, NullHooks, system_clock())
    }
}

impl<H: TimerHooks> TimerFsm<H> {
    pub fn with_hooks(scheme: Scheme, hooks: H, clock: SharedClock) -> Self {
        Self::restore(TimerState::new(scheme), hooks, clock)
    }

    /// Resume from a previously taken [`TimerState`] snapshot.
    pub fn restore(state: TimerState, hooks: H, clock: SharedClock) -> Self {
        Self {
            state,
            hooks,
            clock,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn scheme(&self) -> &Scheme {
        &self.state.scheme
    }

    pub fn current_task(&self) -> &str {
        &self.state.current_task
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.state.started_at
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.state.seconds_remaining
    }

    pub fn completed_today(&self) -> u32 {
        self.state.completed_today
    }

    pub fn daily_target(&self) -> u32 {
        self.state.daily_target
    }

    pub fn context_switch(&self) -> bool {
        self.state.context_switch
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn clock(&self) -> &SharedClock {
        &self.clock
    }

    /// Focus blocks still needed to reach the daily target. Negative once the
    /// target has been exceeded.
    pub fn remaining_blocks(&self) -> i64 {
        i64::from(self.state.daily_target) - i64::from(self.state.completed_today)
    }

    pub fn target_reached(&self) -> bool {
        self.state.daily_target > 0 && self.state.completed_today >= self.state.daily_target
    }

    /// Seconds worked in the current block. Zero outside Focus and Review.
    pub fn elapsed_focus_secs(&self) -> u32 {
        match self.state.phase {
            Phase::Focus | Phase::Review => self
                .state
                .scheme
                .work_secs()
                .saturating_sub(self.state.seconds_remaining),
            _ => 0,
        }
    }

    /// One-line summary: `MM:SS | Phase | done/target[ | task]`.
    pub fn status_line(&self) -> String {
        let minutes = self.state.seconds_remaining / 60;
        let seconds = self.state.seconds_remaining % 60;
        let mut line = format!(
            "{minutes:02}:{seconds:02} | {} | {}/{}",
            self.state.phase.label(),
            self.state.completed_today,
            self.state.daily_target
        );
        if !self.state.current_task.is_empty() {
            line.push_str(" | ");
            line.push_str(&self.state.current_task);
        }
        line
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Enter planning for the day with the given focus-block target.
    pub fn start_day(&mut self, target: u32) -> Result<(), TimerError> {
        self.expect_phase(&[Phase::Idle], "start the day")?;
        self.state.daily_target = target;
        info!(target, "day started");
        self.enter(Phase::Planning);
        Ok(())
    }

    /// Begin a focus block on `task`.
    pub fn start_pomo(&mut self, task: &str) -> Result<(), TimerError> {
        if !self.state.phase.can_start_focus() {
            return Err(self.invalid_state("start a focus block"));
        }
        let cleaned = clean_task(task)?;
        self.begin_focus(cleaned.to_string());
        Ok(())
    }

    /// Advance the focus countdown by one second.
    ///
    /// Returns the new phase when the block ends.
    pub fn tick(&mut self) -> Option<Phase> {
        if self.state.phase != Phase::Focus {
            return None;
        }
        self.countdown();
        if self.state.seconds_remaining == 0 {
            self.enter(Phase::Review);
            return Some(Phase::Review);
        }
        None
    }

    /// Record the review and move to the earned break.
    ///
    /// A long break is granted whenever the completed count is a multiple of
    /// the cadence. A zero cadence never grants one.
    pub fn save_review(&mut self, review: &Review) -> Result<Phase, TimerError> {
        self.expect_phase(&[Phase::Review], "save a review")?;
        self.state.completed_today = self.state.completed_today.saturating_add(1);
        let scheme = self.state.scheme;
        let (next, secs) = if self.state.completed_today.checked_rem(scheme.cadence) == Some(0) {
            (Phase::LongBreak, scheme.long_break_secs())
        } else {
            (Phase::ShortBreak, scheme.short_break_secs())
        };
        self.state.seconds_remaining = secs;
        info!(
            completed = self.state.completed_today,
            focus_score = review.focus_score,
            "review saved"
        );
        self.enter(next);
        Ok(next)
    }

    /// Advance the break countdown by one second. When it runs out the same
    /// task starts a new focus block.
    ///
    /// Returns the new phase when the break ends.
    pub fn break_tick(&mut self) -> Option<Phase> {
        if !self.state.phase.is_break() {
            return None;
        }
        self.countdown();
        if self.state.seconds_remaining > 0 {
            return None;
        }
        if self.state.current_task.trim().is_empty() {
            warn!("break ended with no task to resume; back to planning");
            self.enter(Phase::Planning);
            return Some(Phase::Planning);
        }
        let task = self.state.current_task.clone();
        self.begin_focus(task);
        Some(Phase::Focus)
    }

    /// Switch the active task mid-block and flag the context switch.
    ///
    /// Returns `false` when `task` is already the active task; nothing changes
    /// and no hook fires in that case.
    pub fn change_task(&mut self, task: &str) -> Result<bool, TimerError> {
        self.expect_phase(&[Phase::Focus], "change task")?;
        let cleaned = clean_task(task)?;
        if cleaned == self.state.current_task {
            return Ok(false);
        }
        info!(from = %self.state.current_task, to = cleaned, "context switch");
        self.state.current_task = cleaned.to_string();
        self.state.context_switch = true;
        self.hooks.on_task(&self.state.current_task);
        Ok(true)
    }

    /// Abandon the running focus block and return to planning.
    pub fn abort(&mut self) -> Result<(), TimerError> {
        self.expect_phase(&[Phase::Focus], "abort")?;
        info!(
            task = %self.state.current_task,
            remaining = self.state.seconds_remaining,
            "focus block aborted"
        );
        self.state.current_task.clear();
        self.state.seconds_remaining = 0;
        self.state.started_at = None;
        self.state.context_switch = false;
        self.enter(Phase::Planning);
        Ok(())
    }

    /// Close the day. Refused while a focus block is running.
    pub fn close_day(&mut self) -> Result<(), TimerError> {
        if matches!(self.state.phase, Phase::Focus | Phase::DayClosed) {
            return Err(self.invalid_state("close the day"));
        }
        self.state.seconds_remaining = 0;
        self.enter(Phase::DayClosed);
        Ok(())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn begin_focus(&mut self, task: String) {
        self.state.current_task = task;
        self.state.started_at = Some(self.clock.now());
        self.state.seconds_remaining = self.state.scheme.work_secs();
        self.state.context_switch = false;
        self.enter(Phase::Focus);
        self.hooks.on_task(&self.state.current_task);
    }

    fn countdown(&mut self) {
        self.state.seconds_remaining = self.state.seconds_remaining.saturating_sub(1);
        trace!(remaining = self.state.seconds_remaining, "tick");
        self.hooks.on_tick(self.state.seconds_remaining);
    }

    fn enter(&mut self, phase: Phase) {
        info!(from = %self.state.phase, to = %phase, "phase changed");
        self.state.phase = phase;
        self.hooks.on_phase(phase);
    }

    fn expect_phase(&self, allowed: &[Phase], operation: &'static str) -> Result<(), TimerError> {
        if allowed.contains(&self.state.phase) {
            Ok(())
        } else {
            Err(self.invalid_state(operation))
        }
    }

    fn invalid_state(&self, operation: &'static str) -> TimerError {
        TimerError::InvalidState {
            operation,
            phase: self.state.phase,
        }
    }
}

impl<H: TimerHooks> fmt::Debug for TimerFsm<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerFsm").field("state", &self.state).finish_non_exhaustive()
    }
}

fn clean_task(task: &str) -> Result<&str, TimerError> {
    let cleaned = task.trim();
    if cleaned.is_empty() {
        return Err(TimerError::InvalidInput("task is required".into()));
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;

    use super::*;
    use crate::timer::clock::ManualClock;
    use crate::timer::hooks::{HookCall, RecordingHooks};

    fn nine_am() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    fn recorder(scheme: Scheme) -> TimerFsm<RecordingHooks> {
        TimerFsm::with_hooks(scheme, RecordingHooks::default(), Arc::new(ManualClock::new(nine_am())))
    }

    fn restored(state: TimerState) -> TimerFsm<RecordingHooks> {
        TimerFsm::restore(state, RecordingHooks::default(), Arc::new(ManualClock::new(nine_am())))
    }

    fn review() -> Review {
        Review {
            focus_score: 4,
            reason: String::new(),
            note: String::new(),
        }
    }

    #[test]
    fn start_pomo_transitions_to_focus() {
        let mut fsm = recorder(Scheme::default());
        fsm.start_day(5).unwrap();
        fsm.hooks_mut().clear();

        fsm.start_pomo("Write notes").unwrap();

        assert_eq!(fsm.phase(), Phase::Focus);
        assert_eq!(fsm.seconds_remaining(), 25 * 60);
        assert_eq!(fsm.current_task(), "Write notes");
        assert_eq!(fsm.started_at(), Some(nine_am()));
        assert!(!fsm.context_switch());
        assert_eq!(
            fsm.hooks().calls,
            vec![HookCall::Phase(Phase::Focus), HookCall::Task("Write notes".into())]
        );
    }

    #[test]
    fn start_pomo_trims_task_name() {
        let mut fsm = recorder(Scheme::default());
        fsm.start_day(1).unwrap();
        fsm.start_pomo("  Inbox zero \n").unwrap();
        assert_eq!(fsm.current_task(), "Inbox zero");
    }

    #[test]
    fn start_pomo_rejects_blank_task() {
        let mut fsm = recorder(Scheme::default());
        fsm.start_day(1).unwrap();
        let before = fsm.state().clone();
        fsm.hooks_mut().clear();

        let err = fsm.start_pomo("   ").unwrap_err();

        assert!(matches!(err, TimerError::InvalidInput(_)));
        assert_eq!(fsm.state(), &before);
        assert!(fsm.hooks().calls.is_empty());
    }

    #[test]
    fn start_pomo_rejected_outside_planning_and_breaks() {
        for phase in [Phase::Idle, Phase::Focus, Phase::Review, Phase::DayClosed] {
            let mut fsm = restored(TimerState {
                phase,
                current_task: "Existing".into(),
                seconds_remaining: 42,
                ..TimerState::default()
            });
            let before = fsm.state().clone();

            let err = fsm.start_pomo("New").unwrap_err();

            assert_eq!(
                err,
                TimerError::InvalidState {
                    operation: "start a focus block",
                    phase
                }
            );
            assert_eq!(fsm.state(), &before);
            assert!(fsm.hooks().calls.is_empty());
        }
    }

    #[test]
    fn start_day_only_from_idle() {
        let mut fsm = recorder(Scheme::default());
        fsm.start_day(6).unwrap();
        assert_eq!(fsm.phase(), Phase::Planning);
        assert_eq!(fsm.daily_target(), 6);
        assert!(fsm.start_day(3).is_err());
        assert_eq!(fsm.daily_target(), 6);
    }

    #[test]
    fn tick_counts_down_and_notifies() {
        let mut fsm = recorder(Scheme::default());
        fsm.start_day(1).unwrap();
        fsm.start_pomo("Task").unwrap();
        fsm.hooks_mut().clear();

        assert_eq!(fsm.tick(), None);
        assert_eq!(fsm.tick(), None);

        assert_eq!(fsm.seconds_remaining(), 25 * 60 - 2);
        assert_eq!(fsm.hooks().ticks(), vec![1499, 1498]);
        assert!(fsm.hooks().phases().is_empty());
    }

    #[test]
    fn tick_moves_to_review() {
        let mut fsm = recorder(Scheme {
            work_minutes: 1,
            ..Scheme::default()
        });
        fsm.start_day(2).unwrap();
        fsm.start_pomo("Task").unwrap();
        let mut state = fsm.state().clone();
        state.seconds_remaining = 1;
        let mut fsm = restored(state);

        assert_eq!(fsm.tick(), Some(Phase::Review));

        assert_eq!(fsm.phase(), Phase::Review);
        assert_eq!(fsm.seconds_remaining(), 0);
        assert_eq!(
            fsm.hooks().calls,
            vec![HookCall::Tick(0), HookCall::Phase(Phase::Review)]
        );
    }

    #[test]
    fn full_block_runs_to_review() {
        let mut fsm = recorder(Scheme {
            work_minutes: 2,
            ..Scheme::default()
        });
        fsm.start_day(1).unwrap();
        fsm.start_pomo("Task").unwrap();
        for _ in 0..119 {
            assert_eq!(fsm.tick(), None);
        }
        assert_eq!(fsm.elapsed_focus_secs(), 119);
        assert_eq!(fsm.tick(), Some(Phase::Review));
        assert_eq!(fsm.elapsed_focus_secs(), 120);
        // Further pulses are ignored.
        assert_eq!(fsm.tick(), None);
        assert_eq!(fsm.seconds_remaining(), 0);
    }

    #[test]
    fn ticks_outside_their_phase_are_noops() {
        let mut fsm = recorder(Scheme::default());
        assert_eq!(fsm.tick(), None);
        assert_eq!(fsm.break_tick(), None);
        fsm.start_day(1).unwrap();
        fsm.start_pomo("Task").unwrap();
        fsm.hooks_mut().clear();
        let before = fsm.state().clone();

        assert_eq!(fsm.break_tick(), None);

        assert_eq!(fsm.state(), &before);
        assert!(fsm.hooks().calls.is_empty());
    }

    #[test]
    fn review_selects_long_break_on_cadence() {
        let mut fsm = restored(TimerState {
            phase: Phase::Review,
            scheme: Scheme {
                cadence: 1,
                long_break_minutes: 10,
                ..Scheme::default()
            },
            ..TimerState::default()
        });

        assert_eq!(fsm.save_review(&review()), Ok(Phase::LongBreak));

        assert_eq!(fsm.phase(), Phase::LongBreak);
        assert_eq!(fsm.seconds_remaining(), 600);
        assert_eq!(fsm.completed_today(), 1);
        assert_eq!(fsm.hooks().phases(), vec![Phase::LongBreak]);
    }

    #[test]
    fn review_grants_short_breaks_between_cadences() {
        let scheme = Scheme::default();
        let mut fsm = restored(TimerState {
            phase: Phase::Review,
            scheme,
            ..TimerState::default()
        });
        let mut breaks = Vec::new();
        for _ in 0..8 {
            let next = fsm.save_review(&review()).unwrap();
            breaks.push(next);
            let mut state = fsm.state().clone();
            state.phase = Phase::Review;
            fsm = restored(state);
        }
        assert_eq!(
            breaks,
            vec![
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::LongBreak,
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::LongBreak,
            ]
        );
    }

    #[test]
    fn zero_cadence_never_grants_long_break() {
        let mut fsm = restored(TimerState {
            phase: Phase::Review,
            scheme: Scheme {
                cadence: 0,
                ..Scheme::default()
            },
            ..TimerState::default()
        });
        assert_eq!(fsm.save_review(&review()), Ok(Phase::ShortBreak));
    }

    #[test]
    fn save_review_outside_review_is_rejected() {
        let mut fsm = recorder(Scheme::default());
        fsm.start_day(1).unwrap();
        fsm.start_pomo("Task").unwrap();
        let before = fsm.state().clone();

        let err = fsm.save_review(&review()).unwrap_err();

        assert!(matches!(err, TimerError::InvalidState { phase: Phase::Focus, .. }));
        assert_eq!(fsm.state(), &before);
    }

    #[test]
    fn break_tick_restarts_task() {
        let mut fsm = restored(TimerState {
            phase: Phase::ShortBreak,
            scheme: Scheme {
                short_break_minutes: 1,
                ..Scheme::default()
            },
            current_task: "Focus".into(),
            seconds_remaining: 1,
            context_switch: true,
            ..TimerState::default()
        });

        assert_eq!(fsm.break_tick(), Some(Phase::Focus));

        assert_eq!(fsm.phase(), Phase::Focus);
        assert_eq!(fsm.current_task(), "Focus");
        assert_eq!(fsm.seconds_remaining(), 25 * 60);
        assert!(!fsm.context_switch());
        assert_eq!(fsm.hooks().tasks(), vec!["Focus"]);
        assert_eq!(
            fsm.hooks().calls,
            vec![
                HookCall::Tick(0),
                HookCall::Phase(Phase::Focus),
                HookCall::Task("Focus".into())
            ]
        );
    }

    #[test]
    fn break_without_task_returns_to_planning() {
        let mut fsm = restored(TimerState {
            phase: Phase::LongBreak,
            seconds_remaining: 1,
            ..TimerState::default()
        });

        assert_eq!(fsm.break_tick(), Some(Phase::Planning));

        assert_eq!(fsm.phase(), Phase::Planning);
        assert!(fsm.hooks().tasks().is_empty());
    }

    #[test]
    fn change_task_sets_context_switch_flag() {
        let mut fsm = recorder(Scheme::default());
        fsm.start_day(3).unwrap();
        fsm.start_pomo("Deep work").unwrap();
        fsm.hooks_mut().clear();

        assert_eq!(fsm.change_task("Code review"), Ok(true));

        assert_eq!(fsm.current_task(), "Code review");
        assert!(fsm.context_switch());
        assert_eq!(fsm.phase(), Phase::Focus);
        assert_eq!(fsm.hooks().calls, vec![HookCall::Task("Code review".into())]);
    }

    #[test]
    fn change_task_to_same_name_is_noop() {
        let mut fsm = recorder(Scheme::default());
        fsm.start_day(3).unwrap();
        fsm.start_pomo("Deep work").unwrap();
        fsm.hooks_mut().clear();
        let before = fsm.state().clone();

        assert_eq!(fsm.change_task("  Deep work "), Ok(false));

        assert_eq!(fsm.state(), &before);
        assert!(fsm.hooks().calls.is_empty());
    }

    #[test]
    fn change_task_errors() {
        let mut fsm = recorder(Scheme::default());
        fsm.start_day(3).unwrap();
        assert!(matches!(
            fsm.change_task("Other"),
            Err(TimerError::InvalidState { phase: Phase::Planning, .. })
        ));
        fsm.start_pomo("Deep work").unwrap();
        assert!(matches!(fsm.change_task(" "), Err(TimerError::InvalidInput(_))));
        assert_eq!(fsm.current_task(), "Deep work");
        assert!(!fsm.context_switch());
    }

    #[test]
    fn context_switch_resets_on_next_block() {
        let mut fsm = recorder(Scheme {
            work_minutes: 1,
            short_break_minutes: 1,
            ..Scheme::default()
        });
        fsm.start_day(3).unwrap();
        fsm.start_pomo("A").unwrap();
        fsm.change_task("B").unwrap();
        for _ in 0..60 {
            fsm.tick();
        }
        assert_eq!(fsm.phase(), Phase::Review);
        assert!(fsm.context_switch());
        fsm.save_review(&review()).unwrap();
        for _ in 0..60 {
            fsm.break_tick();
        }
        assert_eq!(fsm.phase(), Phase::Focus);
        assert_eq!(fsm.current_task(), "B");
        assert!(!fsm.context_switch());
    }

    #[test]
    fn new_task_can_start_from_break() {
        let mut fsm = restored(TimerState {
            phase: Phase::ShortBreak,
            current_task: "Old".into(),
            seconds_remaining: 120,
            ..TimerState::default()
        });
        fsm.start_pomo("New").unwrap();
        assert_eq!(fsm.current_task(), "New");
        assert_eq!(fsm.seconds_remaining(), 25 * 60);
    }

    #[test]
    fn abort_returns_to_planning() {
        let mut fsm = recorder(Scheme::default());
        fsm.start_day(3).unwrap();
        fsm.start_pomo("A").unwrap();
        fsm.change_task("B").unwrap();
        fsm.hooks_mut().clear();

        fsm.abort().unwrap();

        assert_eq!(fsm.phase(), Phase::Planning);
        assert_eq!(fsm.current_task(), "");
        assert_eq!(fsm.seconds_remaining(), 0);
        assert_eq!(fsm.started_at(), None);
        assert!(!fsm.context_switch());
        assert_eq!(fsm.hooks().phases(), vec![Phase::Planning]);
        assert!(fsm.abort().is_err());
    }

    #[test]
    fn close_day_refused_during_focus() {
        let mut fsm = recorder(Scheme::default());
        fsm.start_day(3).unwrap();
        fsm.start_pomo("A").unwrap();
        assert!(fsm.close_day().is_err());
        fsm.abort().unwrap();
        fsm.close_day().unwrap();
        assert_eq!(fsm.phase(), Phase::DayClosed);
        assert!(fsm.close_day().is_err());
    }

    #[test]
    fn progress_queries() {
        let mut fsm = restored(TimerState {
            phase: Phase::ShortBreak,
            completed_today: 3,
            daily_target: 4,
            seconds_remaining: 299,
            current_task: "Docs".into(),
            ..TimerState::default()
        });
        assert_eq!(fsm.remaining_blocks(), 1);
        assert!(!fsm.target_reached());
        assert_eq!(fsm.status_line(), "04:59 | Short Break | 3/4 | Docs");

        fsm = restored(TimerState {
            completed_today: 5,
            daily_target: 4,
            ..TimerState::default()
        });
        assert_eq!(fsm.remaining_blocks(), -1);
        assert!(fsm.target_reached());
        assert_eq!(fsm.status_line(), "00:00 | Idle | 5/4");
    }
}
