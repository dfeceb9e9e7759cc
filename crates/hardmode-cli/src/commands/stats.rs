use clap::Subcommand;
use hardmode_core::Database;

use crate::store::{print_json, today, CliResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's summary (null before the day is started)
    Today,
    /// Recent days, newest first
    History {
        #[arg(long, default_value = "7")]
        days: u32,
    },
}

pub fn run(action: StatsAction) -> CliResult {
    let db = Database::open()?;

    match action {
        StatsAction::Today => {
            let summary = db.day_summary(today())?;
            print_json(&summary)?;
        }
        StatsAction::History { days } => {
            let history = db.history(days)?;
            print_json(&history)?;
        }
    }
    Ok(())
}
