use chrono::{DateTime, Local, NaiveTime};
use clap::Args;
use hardmode_core::eta::total_minutes;
use hardmode_core::{try_estimate_completion, Config};
use serde_json::json;

use crate::store::{print_json, CliResult};

#[derive(Args)]
pub struct EtaArgs {
    /// Focus blocks still to do
    #[arg(long)]
    blocks: i64,
    /// Start time today as HH:MM (defaults to now)
    #[arg(long)]
    start: Option<String>,
}

pub fn run(args: EtaArgs) -> CliResult {
    let config = Config::load()?;
    let start = match args.start.as_deref() {
        Some(s) => start_today(s)?,
        None => Local::now(),
    };
    let eta = try_estimate_completion(start, args.blocks, &config.scheme)
        .ok_or_else(|| format!("{} blocks finish beyond the supported date range", args.blocks))?;
    print_json(&json!({
        "blocks": args.blocks,
        "start": start.format("%H:%M").to_string(),
        "eta": eta.format("%H:%M").to_string(),
        "total_minutes": total_minutes(args.blocks, &config.scheme),
    }))
}

fn start_today(hhmm: &str) -> CliResult<DateTime<Local>> {
    let time = NaiveTime::parse_from_str(hhmm, "%H:%M")
        .map_err(|e| format!("invalid start time '{hhmm}': {e}"))?;
    Local::now()
        .date_naive()
        .and_time(time)
        .and_local_timezone(Local)
        .earliest()
        .ok_or_else(|| format!("start time '{hhmm}' does not exist today").into())
}
