//! SQLite-backed day ledger.
//!
//! Provides persistent storage for:
//! - Day records (target, finished count, end-of-day reflection)
//! - Focus blocks (started, completed with review, or aborted)
//! - An event journal
//! - Key-value store for host state

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::ledger::{DayLedger, DayReflection, NewTask, PlannedTask, PomoCompletion};
use super::{data_dir, migrations};
use crate::error::{DatabaseError, Result};
use crate::events::Event;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PomoStatus {
    Running,
    Completed,
    Aborted,
}

impl PomoStatus {
    fn as_str(self) -> &'static str {
        match self {
            PomoStatus::Running => "running",
            PomoStatus::Completed => "completed",
            PomoStatus::Aborted => "aborted",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "running" => Some(PomoStatus::Running),
            "completed" => Some(PomoStatus::Completed),
            "aborted" => Some(PomoStatus::Aborted),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PomoRecord {
    pub id: i64,
    pub day_id: i64,
    pub task: String,
    pub status: PomoStatus,
    pub planned_secs: u32,
    pub actual_secs: Option<u32>,
    pub context_switch: bool,
    pub focus_score: Option<u8>,
    pub reason: Option<String>,
    pub note: Option<String>,
    pub abort_reason: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub day_id: i64,
    pub date: NaiveDate,
    pub target: u32,
    pub finished: u32,
    pub aborted: u32,
    pub context_switches: u32,
    pub focus_secs: u64,
    pub avg_focus_score: Option<f64>,
    pub rating: Option<u8>,
    pub ended: bool,
}

/// SQLite database implementing [`DayLedger`].
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/hardmode.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("hardmode.db");
        Self::open_at(&path)
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "database opened");
        Self::with_connection(conn)
    }

    /// Open an in-memory database (tests and throwaway sessions).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    pub fn day_id(&self, date: NaiveDate) -> Result<Option<i64>, DatabaseError> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM days WHERE date = ?1",
                params![date.format(DATE_FORMAT).to_string()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// Aggregate one day's record and its focus blocks.
    pub fn day_summary(&self, date: NaiveDate) -> Result<Option<DaySummary>, DatabaseError> {
        let summary = self
            .conn
            .query_row(
                &format!("{SUMMARY_SELECT} WHERE d.date = ?1 GROUP BY d.id"),
                params![date.format(DATE_FORMAT).to_string()],
                summary_from_row,
            )
            .optional()?;
        Ok(summary)
    }

    /// Most recent `limit` days, newest first.
    pub fn history(&self, limit: u32) -> Result<Vec<DaySummary>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "{SUMMARY_SELECT} GROUP BY d.id ORDER BY d.date DESC LIMIT ?1"
        ))?;
        let rows = stmt.query_map(params![limit], summary_from_row)?;
        let mut days = Vec::new();
        for row in rows {
            days.push(row?);
        }
        Ok(days)
    }

    pub fn pomos_for_day(&self, day_id: i64) -> Result<Vec<PomoRecord>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, day_id, task, status, planned_secs, actual_secs, context_switch,
                    focus_score, reason, note, abort_reason, started_at, ended_at
             FROM pomos WHERE day_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![day_id], |row| {
            let status: String = row.get(3)?;
            let started_at: String = row.get(11)?;
            let ended_at: Option<String> = row.get(12)?;
            Ok(PomoRecord {
                id: row.get(0)?,
                day_id: row.get(1)?,
                task: row.get(2)?,
                status: PomoStatus::parse(&status).ok_or_else(|| conversion_error(3, &status))?,
                planned_secs: row.get(4)?,
                actual_secs: row.get(5)?,
                context_switch: row.get(6)?,
                focus_score: row.get(7)?,
                reason: row.get(8)?,
                note: row.get(9)?,
                abort_reason: row.get(10)?,
                started_at: parse_instant(11, &started_at)?,
                ended_at: ended_at.map(|s| parse_instant(12, &s)).transpose()?,
            })
        })?;
        let mut pomos = Vec::new();
        for row in rows {
            pomos.push(row?);
        }
        Ok(pomos)
    }

    /// Journal entries, oldest first.
    pub fn events(&self) -> Result<Vec<Event>, DatabaseError> {
        let mut stmt = self.conn.prepare("SELECT payload FROM events ORDER BY id")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut events = Vec::new();
        for row in rows {
            let payload = row?;
            let event = serde_json::from_str(&payload)
                .map_err(|e| DatabaseError::QueryFailed(format!("corrupt event payload: {e}")))?;
            events.push(event);
        }
        Ok(events)
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), DatabaseError> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn expect_updated(changed: usize, kind: &'static str, id: i64) -> Result<(), DatabaseError> {
        if changed == 0 {
            return Err(DatabaseError::NotFound { kind, id });
        }
        Ok(())
    }
}

impl DayLedger for Database {
    fn ensure_day(&self, date: NaiveDate, target: u32) -> Result<i64, DatabaseError> {
        let date_str = date.format(DATE_FORMAT).to_string();
        self.conn.execute(
            "INSERT INTO days (date, target) VALUES (?1, ?2)
             ON CONFLICT(date) DO UPDATE SET target = excluded.target",
            params![date_str, target],
        )?;
        let id: i64 = self
            .conn
            .query_row("SELECT id FROM days WHERE date = ?1", params![date_str], |row| {
                row.get(0)
            })?;
        debug!(day_id = id, %date, target, "day record ensured");
        Ok(id)
    }

    fn start_pomo(
        &self,
        day_id: i64,
        task: &str,
        planned_secs: u32,
        context_switch: bool,
        started_at: DateTime<Utc>,
    ) -> Result<i64, DatabaseError> {
        self.conn.execute(
            "INSERT INTO pomos (day_id, task, status, planned_secs, context_switch, started_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                day_id,
                task,
                PomoStatus::Running.as_str(),
                planned_secs,
                context_switch,
                started_at.to_rfc3339(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(pomo_id = id, day_id, task, "focus block recorded");
        Ok(id)
    }

    fn complete_pomo(&self, pomo_id: i64, completion: &PomoCompletion) -> Result<(), DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE pomos
             SET status = ?2, actual_secs = ?3, context_switch = ?4, focus_score = ?5,
                 reason = ?6, note = ?7, ended_at = ?8
             WHERE id = ?1",
            params![
                pomo_id,
                PomoStatus::Completed.as_str(),
                completion.actual_secs,
                completion.context_switch,
                completion.review.focus_score,
                completion.review.reason,
                completion.review.note,
                completion.ended_at.to_rfc3339(),
            ],
        )?;
        Self::expect_updated(changed, "focus block", pomo_id)
    }

    fn abort_pomo(&self, pomo_id: i64, reason: &str, at: DateTime<Utc>) -> Result<(), DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE pomos SET status = ?2, abort_reason = ?3, ended_at = ?4 WHERE id = ?1",
            params![pomo_id, PomoStatus::Aborted.as_str(), reason, at.to_rfc3339()],
        )?;
        Self::expect_updated(changed, "focus block", pomo_id)
    }

    fn flag_context_switch(&self, pomo_id: i64) -> Result<(), DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE pomos SET context_switch = 1 WHERE id = ?1",
            params![pomo_id],
        )?;
        Self::expect_updated(changed, "focus block", pomo_id)
    }

    fn increment_finished(&self, day_id: i64) -> Result<u32, DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE days SET finished = finished + 1 WHERE id = ?1",
            params![day_id],
        )?;
        Self::expect_updated(changed, "day", day_id)?;
        let finished: u32 = self
            .conn
            .query_row("SELECT finished FROM days WHERE id = ?1", params![day_id], |row| {
                row.get(0)
            })?;
        Ok(finished)
    }

    fn end_day(
        &self,
        day_id: i64,
        reflection: &DayReflection,
        at: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE days SET rating = ?2, distraction = ?3, notes = ?4, ended_at = ?5 WHERE id = ?1",
            params![
                day_id,
                reflection.rating,
                reflection.distraction,
                reflection.notes,
                at.to_rfc3339(),
            ],
        )?;
        Self::expect_updated(changed, "day", day_id)
    }

    fn log_event(&self, event: &Event) -> Result<(), DatabaseError> {
        let payload = serde_json::to_string(event)
            .map_err(|e| DatabaseError::QueryFailed(format!("cannot encode event: {e}")))?;
        let level = match event.level() {
            crate::events::EventLevel::Info => "info",
            crate::events::EventLevel::Warn => "warn",
        };
        self.conn.execute(
            "INSERT INTO events (at, level, kind, payload) VALUES (?1, ?2, ?3, ?4)",
            params![event.at().to_rfc3339(), level, event.kind(), payload],
        )?;
        Ok(())
    }

    fn add_task(&self, day_id: i64, task: &NewTask) -> Result<i64, DatabaseError> {
        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM tasks WHERE day_id = ?1 AND name = ?2 COLLATE NOCASE",
                params![day_id, task.name],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if exists {
            return Err(DatabaseError::DuplicateTask(task.name.clone()));
        }

        let priority: Option<u32> = if task.added_mid_day {
            None
        } else {
            let planned: u32 = self.conn.query_row(
                "SELECT COUNT(*) FROM tasks WHERE day_id = ?1 AND added_mid_day = 0",
                params![day_id],
                |row| row.get(0),
            )?;
            Some(planned + 1)
        };
        let planned_at = (task.planned_pomodoros > 0).then(|| task.added_at.to_rfc3339());

        self.conn.execute(
            "INSERT INTO tasks (day_id, name, description, planned_pomodoros, plan_priority,
                                planned_at, added_mid_day, reason_added, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                day_id,
                task.name,
                task.description,
                task.planned_pomodoros,
                priority,
                planned_at,
                task.added_mid_day,
                task.reason_added,
                task.added_at.to_rfc3339(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(task_id = id, day_id, task = %task.name, mid_day = task.added_mid_day, "task planned");
        Ok(id)
    }

    fn tasks_for_day(&self, day_id: i64) -> Result<Vec<PlannedTask>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, day_id, name, description, planned_pomodoros, plan_priority, planned_at,
                    pomodoros_spent, completed, completed_at, added_mid_day, reason_added
             FROM tasks WHERE day_id = ?1
             ORDER BY added_mid_day, plan_priority, id",
        )?;
        let rows = stmt.query_map(params![day_id], |row| {
            let planned_at: Option<String> = row.get(6)?;
            let completed_at: Option<String> = row.get(9)?;
            Ok(PlannedTask {
                id: row.get(0)?,
                day_id: row.get(1)?,
                name: row.get(2)?,
                description: row.get(3)?,
                planned_pomodoros: row.get(4)?,
                plan_priority: row.get(5)?,
                planned_at: planned_at.map(|s| parse_instant(6, &s)).transpose()?,
                pomodoros_spent: row.get(7)?,
                completed: row.get(8)?,
                completed_at: completed_at.map(|s| parse_instant(9, &s)).transpose()?,
                added_mid_day: row.get(10)?,
                reason_added: row.get(11)?,
            })
        })?;
        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?);
        }
        Ok(tasks)
    }

    fn bump_task_pomos(&self, day_id: i64, name: &str) -> Result<bool, DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE tasks SET pomodoros_spent = pomodoros_spent + 1
             WHERE day_id = ?1 AND name = ?2 COLLATE NOCASE",
            params![day_id, name],
        )?;
        Ok(changed > 0)
    }

    fn complete_task(
        &self,
        day_id: i64,
        name: &str,
        at: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE tasks SET completed = 1, completed_at = ?3
             WHERE day_id = ?1 AND name = ?2 COLLATE NOCASE",
            params![day_id, name, at.to_rfc3339()],
        )?;
        if changed == 0 {
            return Err(DatabaseError::UnknownTask(name.to_string()));
        }
        Ok(())
    }
}

const SUMMARY_SELECT: &str = "SELECT d.id, d.date, d.target, d.finished,
        COALESCE(SUM(CASE WHEN p.status = 'aborted' THEN 1 ELSE 0 END), 0),
        COALESCE(SUM(CASE WHEN p.context_switch = 1 THEN 1 ELSE 0 END), 0),
        COALESCE(SUM(CASE WHEN p.status = 'completed' THEN p.actual_secs ELSE 0 END), 0),
        AVG(p.focus_score),
        d.rating,
        d.ended_at IS NOT NULL
     FROM days d LEFT JOIN pomos p ON p.day_id = d.id";

fn summary_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DaySummary> {
    let date: String = row.get(1)?;
    Ok(DaySummary {
        day_id: row.get(0)?,
        date: NaiveDate::parse_from_str(&date, DATE_FORMAT).map_err(|_| conversion_error(1, &date))?,
        target: row.get(2)?,
        finished: row.get(3)?,
        aborted: row.get(4)?,
        context_switches: row.get(5)?,
        focus_secs: row.get(6)?,
        avg_focus_score: row.get(7)?,
        rating: row.get(8)?,
        ended: row.get(9)?,
    })
}

fn parse_instant(col: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| conversion_error(col, s))
}

fn conversion_error(col: usize, value: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        col,
        rusqlite::types::Type::Text,
        format!("unexpected value '{value}'").into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::Review;
    use chrono::{Duration, TimeZone};

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, 0).unwrap()
    }

    fn completion(score: u8, secs: u32, switched: bool) -> PomoCompletion {
        PomoCompletion {
            review: Review {
                focus_score: score,
                reason: "flow".into(),
                note: String::new(),
            },
            actual_secs: secs,
            context_switch: switched,
            ended_at: at(9, 25),
        }
    }

    #[test]
    fn ensure_day_is_idempotent() {
        let db = Database::open_memory().unwrap();
        let first = db.ensure_day(jan(1), 8).unwrap();
        let again = db.ensure_day(jan(1), 10).unwrap();
        assert_eq!(first, again);
        assert_eq!(db.day_summary(jan(1)).unwrap().unwrap().target, 10);
        assert_eq!(db.day_id(jan(1)).unwrap(), Some(first));
        assert_eq!(db.day_id(jan(2)).unwrap(), None);
    }

    #[test]
    fn record_and_summarize_day() {
        let db = Database::open_memory().unwrap();
        let day = db.ensure_day(jan(1), 4).unwrap();

        let first = db.start_pomo(day, "Write", 1500, false, at(9, 0)).unwrap();
        db.flag_context_switch(first).unwrap();
        db.complete_pomo(first, &completion(4, 1500, true)).unwrap();
        assert_eq!(db.increment_finished(day).unwrap(), 1);

        let second = db.start_pomo(day, "Read", 1500, false, at(9, 30)).unwrap();
        db.abort_pomo(second, "user_abort", at(9, 40)).unwrap();

        let summary = db.day_summary(jan(1)).unwrap().unwrap();
        assert_eq!(summary.finished, 1);
        assert_eq!(summary.aborted, 1);
        assert_eq!(summary.context_switches, 1);
        assert_eq!(summary.focus_secs, 1500);
        assert_eq!(summary.avg_focus_score, Some(4.0));
        assert!(!summary.ended);

        let pomos = db.pomos_for_day(day).unwrap();
        assert_eq!(pomos.len(), 2);
        assert_eq!(pomos[0].status, PomoStatus::Completed);
        assert_eq!(pomos[0].reason.as_deref(), Some("flow"));
        assert_eq!(pomos[1].status, PomoStatus::Aborted);
        assert_eq!(pomos[1].abort_reason.as_deref(), Some("user_abort"));
        assert_eq!(pomos[1].started_at, at(9, 30));
        assert_eq!(pomos[1].ended_at, Some(at(9, 30) + Duration::minutes(10)));
    }

    #[test]
    fn end_day_stores_reflection() {
        let db = Database::open_memory().unwrap();
        let day = db.ensure_day(jan(1), 4).unwrap();
        let reflection = DayReflection {
            rating: 5,
            distraction: "Slack".into(),
            notes: "good day".into(),
        };
        db.end_day(day, &reflection, at(17, 0)).unwrap();
        let summary = db.day_summary(jan(1)).unwrap().unwrap();
        assert_eq!(summary.rating, Some(5));
        assert!(summary.ended);
    }

    #[test]
    fn updates_to_missing_rows_fail() {
        let db = Database::open_memory().unwrap();
        assert!(matches!(
            db.flag_context_switch(99),
            Err(DatabaseError::NotFound { id: 99, .. })
        ));
        assert!(matches!(
            db.increment_finished(5),
            Err(DatabaseError::NotFound { kind: "day", .. })
        ));
    }

    #[test]
    fn history_lists_newest_first() {
        let db = Database::open_memory().unwrap();
        for day in 1..=3 {
            db.ensure_day(jan(day), day).unwrap();
        }
        let history = db.history(2).unwrap();
        let dates: Vec<NaiveDate> = history.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![jan(3), jan(2)]);
        assert_eq!(history[0].focus_secs, 0);
        assert_eq!(history[0].avg_focus_score, None);
    }

    #[test]
    fn journal_round_trips_events() {
        let db = Database::open_memory().unwrap();
        let event = Event::DayStarted {
            target: 6,
            at: at(8, 55),
        };
        db.log_event(&event).unwrap();
        assert_eq!(db.events().unwrap(), vec![event]);
    }

    fn new_task(name: &str, planned: u32, mid_day: bool) -> NewTask {
        NewTask {
            name: name.into(),
            description: String::new(),
            planned_pomodoros: planned,
            added_mid_day: mid_day,
            reason_added: mid_day.then(|| "urgent bug".to_string()),
            added_at: at(8, 50),
        }
    }

    #[test]
    fn task_plan_keeps_priority_order() {
        let db = Database::open_memory().unwrap();
        let day = db.ensure_day(jan(1), 6).unwrap();
        db.add_task(day, &new_task("Write", 3, false)).unwrap();
        db.add_task(day, &new_task("Hotfix", 0, true)).unwrap();
        db.add_task(day, &new_task("Read", 2, false)).unwrap();

        let tasks = db.tasks_for_day(day).unwrap();
        let names: Vec<&str> = tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Write", "Read", "Hotfix"]);
        assert_eq!(tasks[0].plan_priority, Some(1));
        assert_eq!(tasks[1].plan_priority, Some(2));
        assert_eq!(tasks[1].planned_at, Some(at(8, 50)));
        assert_eq!(tasks[2].plan_priority, None);
        assert_eq!(tasks[2].planned_at, None);
        assert!(tasks[2].added_mid_day);
        assert_eq!(tasks[2].reason_added.as_deref(), Some("urgent bug"));
    }

    #[test]
    fn duplicate_task_names_ignore_case() {
        let db = Database::open_memory().unwrap();
        let day = db.ensure_day(jan(1), 6).unwrap();
        db.add_task(day, &new_task("Write Docs", 2, false)).unwrap();
        assert!(matches!(
            db.add_task(day, &new_task("write docs", 1, false)),
            Err(DatabaseError::DuplicateTask(_))
        ));

        // Same name on another day is fine.
        let other = db.ensure_day(jan(2), 6).unwrap();
        db.add_task(other, &new_task("Write Docs", 2, false)).unwrap();
        assert_eq!(db.tasks_for_day(day).unwrap().len(), 1);
    }

    #[test]
    fn bump_and_complete_tasks() {
        let db = Database::open_memory().unwrap();
        let day = db.ensure_day(jan(1), 6).unwrap();
        db.add_task(day, &new_task("Write", 2, false)).unwrap();

        assert!(db.bump_task_pomos(day, "Write").unwrap());
        assert!(db.bump_task_pomos(day, "WRITE").unwrap());
        assert!(!db.bump_task_pomos(day, "Unplanned").unwrap());
        db.complete_task(day, "write", at(11, 0)).unwrap();

        let task = &db.tasks_for_day(day).unwrap()[0];
        assert_eq!(task.pomodoros_spent, 2);
        assert!(task.completed);
        assert_eq!(task.completed_at, Some(at(11, 0)));
        assert!(matches!(
            db.complete_task(day, "Missing", at(11, 0)),
            Err(DatabaseError::UnknownTask(_))
        ));
    }

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_delete("test").unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
    }
}
