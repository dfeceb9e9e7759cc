//! Session persistence between invocations.
//!
//! The running session lives as a JSON snapshot in the ledger's kv table.
//! Loading replays the seconds that passed since the last invocation, so a
//! block started in one command keeps counting down in the next.

use chrono::{Local, NaiveDate};
use hardmode_core::timer::system_clock;
use hardmode_core::{Config, Database, DaySession, NullHooks, SessionSnapshot, TimerFsm};
use serde_json::json;
use tracing::{debug, warn};

pub const SESSION_KEY: &str = "session";

pub type Session = DaySession<Database>;

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Open today's session, resuming the stored one when it belongs to today.
///
/// A snapshot from another day is dropped and a fresh, idle timer is built
/// from the configured scheme.
pub fn load(config: &Config) -> CliResult<Session> {
    let db = Database::open()?;
    let clock = system_clock();
    let today = today();

    let snapshot = match db.kv_get(SESSION_KEY)? {
        Some(json) => match serde_json::from_str::<SessionSnapshot>(&json) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(error = %e, "discarding unreadable session snapshot");
                None
            }
        },
        None => None,
    };

    let session = match snapshot {
        Some(snapshot) if snapshot.date == today => {
            let mut session = DaySession::restore(snapshot, db, NullHooks, clock.clone());
            session.catch_up(clock.now());
            session
        }
        stale => {
            if let Some(old) = stale {
                debug!(date = %old.date, "stored session belongs to another day");
            }
            let fsm = TimerFsm::with_hooks(config.scheme, NullHooks, clock);
            DaySession::new(fsm, db, today)
        }
    };
    Ok(session)
}

pub fn save(session: &Session) -> CliResult {
    let json = serde_json::to_string(&session.snapshot())?;
    session.ledger().kv_set(SESSION_KEY, &json)?;
    Ok(())
}

/// Machine-readable view of the timer.
pub fn status(session: &Session) -> serde_json::Value {
    let timer = session.timer();
    json!({
        "date": session.date(),
        "phase": timer.phase(),
        "task": timer.current_task(),
        "seconds_remaining": timer.seconds_remaining(),
        "completed_today": timer.completed_today(),
        "daily_target": timer.daily_target(),
        "context_switch": timer.context_switch(),
        "status_line": timer.status_line(),
    })
}

pub fn print_json(value: &impl serde::Serialize) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
