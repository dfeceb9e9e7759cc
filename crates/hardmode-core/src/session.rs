//! Day session: the timer plus the ledger that records its history.
//!
//! The timer is always updated first. Ledger calls happen afterwards and a
//! failing ledger is logged and skipped, so history may lag behind but the
//! running session never does.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{CoreError, DatabaseError, TimerError};
use crate::eta::{estimate_completion, DayProgress};
use crate::events::Event;
use crate::storage::{DayLedger, DayReflection, NewTask, PlannedTask, PomoCompletion};
use crate::timer::{NullHooks, Phase, Review, SharedClock, TimerFsm, TimerHooks, TimerState};

/// Missed pulses replayed by [`DaySession::catch_up`] are capped at one day.
pub const MAX_CATCH_UP_SECS: u64 = 24 * 60 * 60;

/// Estimate given to a morning task added without one.
pub const DEFAULT_PLANNED_POMODOROS: u32 = 2;

/// Upper bound for a single task's estimate.
pub const MAX_PLANNED_POMODOROS: u32 = 16;

/// Serializable host state, enough to resume a session in a new process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub date: NaiveDate,
    pub timer: TimerState,
    #[serde(default)]
    pub day_id: Option<i64>,
    #[serde(default)]
    pub pomo_id: Option<i64>,
    pub last_pulse_at: DateTime<Utc>,
    /// Set once the first focus block of the day starts; later tasks are
    /// mid-day additions.
    #[serde(default)]
    pub work_started: bool,
}

pub struct DaySession<L: DayLedger, H: TimerHooks = NullHooks> {
    fsm: TimerFsm<H>,
    ledger: L,
    date: NaiveDate,
    day_id: Option<i64>,
    pomo_id: Option<i64>,
    last_pulse_at: DateTime<Utc>,
    work_started: bool,
}

impl<L: DayLedger, H: TimerHooks> DaySession<L, H> {
    /// Start a fresh session for `date` around an idle timer.
    pub fn new(fsm: TimerFsm<H>, ledger: L, date: NaiveDate) -> Self {
        let last_pulse_at = fsm.clock().now();
        Self {
            fsm,
            ledger,
            date,
            day_id: None,
            pomo_id: None,
            last_pulse_at,
            work_started: false,
        }
    }

    pub fn restore(snapshot: SessionSnapshot, ledger: L, hooks: H, clock: SharedClock) -> Self {
        Self {
            fsm: TimerFsm::restore(snapshot.timer, hooks, clock),
            ledger,
            date: snapshot.date,
            day_id: snapshot.day_id,
            pomo_id: snapshot.pomo_id,
            last_pulse_at: snapshot.last_pulse_at,
            work_started: snapshot.work_started,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            date: self.date,
            timer: self.fsm.state().clone(),
            day_id: self.day_id,
            pomo_id: self.pomo_id,
            last_pulse_at: self.last_pulse_at,
            work_started: self.work_started,
        }
    }

    pub fn timer(&self) -> &TimerFsm<H> {
        &self.fsm
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn day_id(&self) -> Option<i64> {
        self.day_id
    }

    pub fn pomo_id(&self) -> Option<i64> {
        self.pomo_id
    }

    pub fn phase(&self) -> Phase {
        self.fsm.phase()
    }

    pub fn start_day(&mut self, target: u32) -> Result<(), TimerError> {
        self.fsm.start_day(target)?;
        self.ensure_day();
        let at = self.now();
        self.record(|l| l.log_event(&Event::DayStarted { target, at }));
        Ok(())
    }

    pub fn start_focus(&mut self, task: &str) -> Result<(), TimerError> {
        self.fsm.start_pomo(task)?;
        self.last_pulse_at = self.now();
        self.work_started = true;
        self.record_focus_start();
        Ok(())
    }

    /// One host timer pulse. Ticks whichever countdown is running.
    pub fn pulse(&mut self) -> Phase {
        let before = self.fsm.phase();
        let changed = match before {
            Phase::Focus => self.fsm.tick(),
            Phase::ShortBreak | Phase::LongBreak => self.fsm.break_tick(),
            _ => None,
        };
        self.last_pulse_at += Duration::seconds(1);
        if changed == Some(Phase::Focus) {
            // A break ran out and the same task restarted.
            self.record_focus_start();
        }
        self.fsm.phase()
    }

    /// Replay the whole seconds elapsed since the last pulse.
    ///
    /// Returns the number of pulses applied.
    pub fn catch_up(&mut self, now: DateTime<Utc>) -> u64 {
        let elapsed = (now - self.last_pulse_at).num_seconds();
        if elapsed <= 0 {
            return 0;
        }
        let pulses = (elapsed as u64).min(MAX_CATCH_UP_SECS);
        for _ in 0..pulses {
            self.pulse();
        }
        self.last_pulse_at = now;
        if pulses > 0 {
            let phase = self.fsm.phase();
            info!(pulses, %phase, "caught up");
            self.record(|l| l.log_event(&Event::CaughtUp { pulses, phase, at: now }));
        }
        pulses
    }

    /// Change the active task mid-block. Returns whether anything changed.
    pub fn change_task(&mut self, task: &str) -> Result<bool, TimerError> {
        if !self.fsm.change_task(task)? {
            return Ok(false);
        }
        if let Some(pomo_id) = self.pomo_id {
            let event = Event::ContextSwitch {
                pomo_id,
                task: self.fsm.current_task().to_string(),
                at: self.now(),
            };
            self.record(|l| l.flag_context_switch(pomo_id));
            self.record(|l| l.log_event(&event));
        }
        Ok(true)
    }

    /// Record the review for the block that just ended and start the break.
    pub fn review(&mut self, review: &Review) -> Result<Phase, TimerError> {
        let actual_secs = self.fsm.elapsed_focus_secs();
        let context_switch = self.fsm.context_switch();
        let task = self.fsm.current_task().to_string();
        let next = self.fsm.save_review(review)?;
        self.last_pulse_at = self.now();

        let ended_at = self.now();
        if let Some(pomo_id) = self.pomo_id.take() {
            let completion = PomoCompletion {
                review: review.clone(),
                actual_secs,
                context_switch,
                ended_at,
            };
            self.record(|l| l.complete_pomo(pomo_id, &completion));
            self.record(|l| {
                l.log_event(&Event::PomoCompleted {
                    pomo_id,
                    task,
                    context_switch,
                    focus_score: review.focus_score,
                    at: ended_at,
                })
            });
        }
        if let Some(day_id) = self.day_id {
            self.record(|l| l.increment_finished(day_id).map(|_| ()));
        }
        Ok(next)
    }

    /// Abandon the running block.
    pub fn abort(&mut self, reason: &str) -> Result<(), TimerError> {
        let remaining_secs = self.fsm.seconds_remaining();
        self.fsm.abort()?;
        let at = self.now();
        if let Some(pomo_id) = self.pomo_id.take() {
            self.record(|l| l.abort_pomo(pomo_id, reason, at));
            self.record(|l| {
                l.log_event(&Event::PomoAborted {
                    pomo_id,
                    reason: reason.to_string(),
                    remaining_secs,
                    at,
                })
            });
        }
        Ok(())
    }

    /// Close the day with a reflection.
    pub fn end_day(&mut self, reflection: &DayReflection) -> Result<(), TimerError> {
        self.fsm.close_day()?;
        let at = self.now();
        if let Some(day_id) = self.day_id {
            self.record(|l| l.end_day(day_id, reflection, at));
        }
        let event = Event::DayEnded {
            completed: self.fsm.completed_today(),
            target: self.fsm.daily_target(),
            rating: reflection.rating,
            at,
        };
        self.record(|l| l.log_event(&event));
        Ok(())
    }

    /// Put a task on today's plan.
    ///
    /// Before the first focus block a task is part of the morning plan and
    /// gets `planned` (default [`DEFAULT_PLANNED_POMODOROS`]) and the next
    /// priority. Afterwards it is a mid-day addition and needs a `reason`.
    /// Unlike the timer operations, ledger errors are returned here since the
    /// plan only lives in the ledger.
    pub fn add_task(
        &mut self,
        name: &str,
        planned: Option<u32>,
        reason: Option<&str>,
    ) -> Result<i64, CoreError> {
        let phase = self.fsm.phase();
        if matches!(phase, Phase::Idle | Phase::DayClosed) {
            return Err(TimerError::InvalidState {
                operation: "add a task",
                phase,
            }
            .into());
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(TimerError::InvalidInput("task is required".into()).into());
        }
        if let Some(n) = planned {
            if n == 0 || n > MAX_PLANNED_POMODOROS {
                return Err(TimerError::InvalidInput(format!(
                    "planned pomodoros must be between 1 and {MAX_PLANNED_POMODOROS}"
                ))
                .into());
            }
        }

        let added_mid_day = self.work_started;
        let reason = reason.map(str::trim).filter(|r| !r.is_empty());
        if added_mid_day && reason.is_none() {
            return Err(TimerError::InvalidInput(
                "a reason is required for tasks added mid-day".into(),
            )
            .into());
        }
        let planned_pomodoros = match planned {
            Some(n) => n,
            None if added_mid_day => 0,
            None => DEFAULT_PLANNED_POMODOROS,
        };

        let day_id = self.require_day()?;
        let task = NewTask {
            name: name.to_string(),
            description: String::new(),
            planned_pomodoros,
            added_mid_day,
            reason_added: reason.map(str::to_string),
            added_at: self.now(),
        };
        let id = self.ledger.add_task(day_id, &task)?;
        self.record(|l| {
            l.log_event(&Event::TaskAdded {
                task: task.name.clone(),
                planned_pomodoros,
                added_mid_day,
                reason: task.reason_added.clone(),
                at: task.added_at,
            })
        });
        Ok(id)
    }

    /// Tick a task off today's plan.
    pub fn complete_task(&mut self, name: &str) -> Result<(), CoreError> {
        let name = name.trim();
        let Some(day_id) = self.day_id else {
            return Err(DatabaseError::UnknownTask(name.to_string()).into());
        };
        let at = self.now();
        self.ledger.complete_task(day_id, name, at)?;
        self.record(|l| {
            l.log_event(&Event::TaskCompleted {
                task: name.to_string(),
                at,
            })
        });
        Ok(())
    }

    /// Today's plan; empty before the day is recorded.
    pub fn tasks(&self) -> Result<Vec<PlannedTask>, DatabaseError> {
        match self.day_id {
            Some(day_id) => self.ledger.tasks_for_day(day_id),
            None => Ok(Vec::new()),
        }
    }

    /// When the remaining blocks would be done if work resumed at `now`.
    pub fn eta(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        estimate_completion(now, self.fsm.remaining_blocks(), self.fsm.scheme())
    }

    pub fn progress(&self, now: DateTime<Utc>) -> DayProgress {
        DayProgress::compute(
            self.fsm.completed_today(),
            self.fsm.daily_target(),
            self.fsm.scheme(),
            now,
        )
    }

    fn now(&self) -> DateTime<Utc> {
        self.fsm.clock().now()
    }

    fn ensure_day(&mut self) {
        let (date, target) = (self.date, self.fsm.daily_target());
        match self.ledger.ensure_day(date, target) {
            Ok(id) => self.day_id = Some(id),
            Err(e) => warn!(error = %e, %date, "could not record day"),
        }
    }

    fn require_day(&mut self) -> Result<i64, DatabaseError> {
        if let Some(id) = self.day_id {
            return Ok(id);
        }
        let id = self.ledger.ensure_day(self.date, self.fsm.daily_target())?;
        self.day_id = Some(id);
        Ok(id)
    }

    fn record_focus_start(&mut self) {
        if self.day_id.is_none() {
            self.ensure_day();
        }
        let Some(day_id) = self.day_id else {
            return;
        };
        let task = self.fsm.current_task().to_string();
        let planned = self.fsm.scheme().work_secs();
        let started_at = self.fsm.started_at().unwrap_or_else(|| self.now());
        match self
            .ledger
            .start_pomo(day_id, &task, planned, self.fsm.context_switch(), started_at)
        {
            Ok(pomo_id) => {
                self.pomo_id = Some(pomo_id);
                self.record(|l| {
                    l.log_event(&Event::PomoStarted {
                        pomo_id,
                        task: task.clone(),
                        duration_secs: planned,
                        at: started_at,
                    })
                });
            }
            Err(e) => {
                self.pomo_id = None;
                warn!(error = %e, task = %task, "could not record focus block start");
            }
        }
        self.record(|l| l.bump_task_pomos(day_id, &task).map(|_| ()));
    }

    fn record<F>(&self, write: F)
    where
        F: FnOnce(&L) -> Result<(), DatabaseError>,
    {
        if let Err(e) = write(&self.ledger) {
            warn!(error = %e, "ledger write failed");
        }
    }
}
