use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Journal entry written to the day ledger alongside the structured records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    DayStarted {
        target: u32,
        at: DateTime<Utc>,
    },
    PomoStarted {
        pomo_id: i64,
        task: String,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    ContextSwitch {
        pomo_id: i64,
        task: String,
        at: DateTime<Utc>,
    },
    PomoCompleted {
        pomo_id: i64,
        task: String,
        context_switch: bool,
        focus_score: u8,
        at: DateTime<Utc>,
    },
    PomoAborted {
        pomo_id: i64,
        reason: String,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    DayEnded {
        completed: u32,
        target: u32,
        rating: u8,
        at: DateTime<Utc>,
    },
    TaskAdded {
        task: String,
        planned_pomodoros: u32,
        added_mid_day: bool,
        #[serde(default)]
        reason: Option<String>,
        at: DateTime<Utc>,
    },
    TaskCompleted {
        task: String,
        at: DateTime<Utc>,
    },
    /// Phase reached by catching up on missed pulses.
    CaughtUp {
        pulses: u64,
        phase: Phase,
        at: DateTime<Utc>,
    },
}

/// Severity stored with each journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventLevel {
    Info,
    Warn,
}

impl Event {
    pub fn kind(&self) -> &'static str {
        match self {
            Event::DayStarted { .. } => "day_started",
            Event::PomoStarted { .. } => "pomo_started",
            Event::ContextSwitch { .. } => "context_switch",
            Event::PomoCompleted { .. } => "pomo_completed",
            Event::PomoAborted { .. } => "pomo_aborted",
            Event::DayEnded { .. } => "day_ended",
            Event::TaskAdded { .. } => "task_added",
            Event::TaskCompleted { .. } => "task_completed",
            Event::CaughtUp { .. } => "caught_up",
        }
    }

    pub fn level(&self) -> EventLevel {
        match self {
            Event::PomoAborted { .. } => EventLevel::Warn,
            _ => EventLevel::Info,
        }
    }

    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::DayStarted { at, .. }
            | Event::PomoStarted { at, .. }
            | Event::ContextSwitch { at, .. }
            | Event::PomoCompleted { at, .. }
            | Event::PomoAborted { at, .. }
            | Event::DayEnded { at, .. }
            | Event::TaskAdded { at, .. }
            | Event::TaskCompleted { at, .. }
            | Event::CaughtUp { at, .. } => *at,
        }
    }
}
