//! Database schema migrations for hardmode.
//!
//! Migrations are versioned and applied automatically when opening the database.
//! The `schema_version` table tracks the current migration version.

use rusqlite::{Connection, Result as SqliteResult};
use tracing::{debug, warn};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 3;

/// Apply all pending migrations to bring the database to the current schema version.
///
/// # Errors
/// Returns an error if migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn);
    debug!(current_version, target_version = SCHEMA_VERSION, "checking schema");

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }
    if current_version < 3 {
        migrate_v3(conn)?;
    }

    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Returns 0 if no version is set (fresh database).
pub(crate) fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    })
    .unwrap_or_else(|e| {
        if !matches!(e, rusqlite::Error::QueryReturnedNoRows) {
            warn!(error = %e, "failed to read schema_version");
        }
        0
    })
}

fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Migration v1: days, focus blocks and the key-value store.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS days (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            date        TEXT NOT NULL UNIQUE,
            target      INTEGER NOT NULL,
            finished    INTEGER NOT NULL DEFAULT 0,
            rating      INTEGER,
            distraction TEXT,
            notes       TEXT,
            ended_at    TEXT
        );

        CREATE TABLE IF NOT EXISTS pomos (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            day_id          INTEGER NOT NULL REFERENCES days(id),
            task            TEXT NOT NULL,
            status          TEXT NOT NULL DEFAULT 'running',
            planned_secs    INTEGER NOT NULL,
            actual_secs     INTEGER,
            context_switch  INTEGER NOT NULL DEFAULT 0,
            focus_score     INTEGER,
            reason          TEXT,
            note            TEXT,
            abort_reason    TEXT,
            started_at      TEXT NOT NULL,
            ended_at        TEXT
        );

        CREATE TABLE IF NOT EXISTS kv (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )?;
    tx.execute("DELETE FROM schema_version", [])?;
    tx.execute("INSERT INTO schema_version (version) VALUES (?1)", [1])?;
    tx.commit()
}

/// Migration v2: event journal and lookup indexes.
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS events (
            id      INTEGER PRIMARY KEY AUTOINCREMENT,
            at      TEXT NOT NULL,
            level   TEXT NOT NULL,
            kind    TEXT NOT NULL,
            payload TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_pomos_day_id ON pomos(day_id);
        CREATE INDEX IF NOT EXISTS idx_pomos_status ON pomos(status);
        CREATE INDEX IF NOT EXISTS idx_events_kind ON events(kind);",
    )?;
    set_schema_version(&tx, 2)?;
    tx.commit()
}

/// Migration v3: the day's task plan.
fn migrate_v3(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS tasks (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            day_id            INTEGER NOT NULL REFERENCES days(id),
            name              TEXT NOT NULL,
            description       TEXT NOT NULL DEFAULT '',
            planned_pomodoros INTEGER NOT NULL DEFAULT 0,
            plan_priority     INTEGER,
            planned_at        TEXT,
            pomodoros_spent   INTEGER NOT NULL DEFAULT 0,
            completed         INTEGER NOT NULL DEFAULT 0,
            completed_at      TEXT,
            added_mid_day     INTEGER NOT NULL DEFAULT 0,
            reason_added      TEXT,
            created_at        TEXT NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_tasks_day_name
            ON tasks(day_id, name COLLATE NOCASE);",
    )?;
    set_schema_version(&tx, 3)?;
    tx.commit()
}
