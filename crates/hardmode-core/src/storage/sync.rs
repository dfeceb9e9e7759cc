//! Seam for pushing day history to a remote service.
//!
//! Nothing ships a remote client yet; the local [`Database`] stays the source
//! of truth and a client only receives copies of its rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::database::{Database, DaySummary};
use super::ledger::{DayLedger, PlannedTask};
use crate::error::DatabaseError;

/// One day as it is handed to a remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayUpload {
    pub summary: DaySummary,
    pub tasks: Vec<PlannedTask>,
}

/// A remote service that mirrors the day ledger.
pub trait SyncClient {
    /// Unique identifier (e.g. "hardmode-api").
    fn name(&self) -> &str;

    /// Whether the service can be reached right now.
    fn is_online(&self) -> bool;

    fn push_day(&self, day: &DayUpload) -> Result<(), Box<dyn std::error::Error>>;
}

impl Database {
    /// Collects what a [`SyncClient`] receives for `date`.
    pub fn day_upload(&self, date: NaiveDate) -> Result<Option<DayUpload>, DatabaseError> {
        let Some(summary) = self.day_summary(date)? else {
            return Ok(None);
        };
        let tasks = self.tasks_for_day(summary.day_id)?;
        Ok(Some(DayUpload { summary, tasks }))
    }
}

/// Pushes `date` to `client`. Returns `false` when there was nothing to send
/// or the client is offline.
pub fn sync_day(
    db: &Database,
    client: &dyn SyncClient,
    date: NaiveDate,
) -> Result<bool, Box<dyn std::error::Error>> {
    if !client.is_online() {
        debug!(client = client.name(), %date, "sync skipped, offline");
        return Ok(false);
    }
    let Some(day) = db.day_upload(date)? else {
        return Ok(false);
    };
    client.push_day(&day)?;
    info!(client = client.name(), %date, tasks = day.tasks.len(), "day synced");
    Ok(true)
}
