use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DatabaseError;
use crate::events::Event;
use crate::timer::Review;

/// End-of-day reflection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayReflection {
    /// 1 ..= 5 stars.
    pub rating: u8,
    #[serde(default)]
    pub distraction: String,
    #[serde(default)]
    pub notes: String,
}

/// Outcome of a finished focus block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomoCompletion {
    pub review: Review,
    pub actual_secs: u32,
    pub context_switch: bool,
    pub ended_at: DateTime<Utc>,
}

/// A task going onto the day's plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// 0 when no estimate was given.
    pub planned_pomodoros: u32,
    /// Added after work on the day began.
    pub added_mid_day: bool,
    pub reason_added: Option<String>,
    pub added_at: DateTime<Utc>,
}

/// A task on the day's plan with its planned and spent effort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedTask {
    pub id: i64,
    pub day_id: i64,
    pub name: String,
    pub description: String,
    pub planned_pomodoros: u32,
    /// Position in the morning plan; `None` for mid-day additions.
    pub plan_priority: Option<u32>,
    pub planned_at: Option<DateTime<Utc>>,
    pub pomodoros_spent: u32,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub added_mid_day: bool,
    pub reason_added: Option<String>,
}

/// History store the day session reports to.
///
/// The timer is the source of truth for the running session; the ledger is the
/// source of truth for history. Each call may fail on its own without any
/// effect on the timer.
pub trait DayLedger {
    /// Returns the id of the day row for `date`, creating it with `target` if
    /// missing. An existing row keeps its id and takes the new target.
    fn ensure_day(&self, date: NaiveDate, target: u32) -> Result<i64, DatabaseError>;

    fn start_pomo(
        &self,
        day_id: i64,
        task: &str,
        planned_secs: u32,
        context_switch: bool,
        started_at: DateTime<Utc>,
    ) -> Result<i64, DatabaseError>;

    fn complete_pomo(&self, pomo_id: i64, completion: &PomoCompletion) -> Result<(), DatabaseError>;

    fn abort_pomo(&self, pomo_id: i64, reason: &str, at: DateTime<Utc>) -> Result<(), DatabaseError>;

    fn flag_context_switch(&self, pomo_id: i64) -> Result<(), DatabaseError>;

    /// Bumps the finished counter and returns the new value.
    fn increment_finished(&self, day_id: i64) -> Result<u32, DatabaseError>;

    fn end_day(
        &self,
        day_id: i64,
        reflection: &DayReflection,
        at: DateTime<Utc>,
    ) -> Result<(), DatabaseError>;

    fn log_event(&self, event: &Event) -> Result<(), DatabaseError>;

    /// Puts a task on the day's plan. Names are unique per day, ignoring case.
    fn add_task(&self, day_id: i64, task: &NewTask) -> Result<i64, DatabaseError>;

    /// Plan order: morning tasks by priority, then mid-day additions.
    fn tasks_for_day(&self, day_id: i64) -> Result<Vec<PlannedTask>, DatabaseError>;

    /// Counts a focus block started on `name`. Returns `false` when `name` is
    /// not on the plan.
    fn bump_task_pomos(&self, day_id: i64, name: &str) -> Result<bool, DatabaseError>;

    fn complete_task(&self, day_id: i64, name: &str, at: DateTime<Utc>) -> Result<(), DatabaseError>;
}
