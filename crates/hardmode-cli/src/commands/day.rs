use chrono::{Local, Utc};
use clap::Subcommand;
use hardmode_core::{Config, DayReflection};
use serde_json::json;

use crate::store::{self, print_json, CliResult};

#[derive(Subcommand)]
pub enum DayAction {
    /// Start the day and enter planning
    Start {
        /// Focus blocks to aim for (defaults to day.default_target)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=32))]
        target: Option<u32>,
    },
    /// Close the day with a short reflection
    End {
        /// How the day went, 1 to 5
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
        /// Main source of distraction
        #[arg(long, default_value = "")]
        distraction: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Progress toward the daily target
    Status,
    /// When the remaining blocks would be done if work resumed now
    Eta,
}

pub fn run(action: DayAction) -> CliResult {
    let config = Config::load()?;
    let mut session = store::load(&config)?;

    match action {
        DayAction::Start { target } => {
            session.start_day(target.unwrap_or(config.day.default_target))?;
            print_json(&store::status(&session))?;
        }
        DayAction::End {
            rating,
            distraction,
            notes,
        } => {
            session.end_day(&DayReflection {
                rating,
                distraction,
                notes,
            })?;
            print_json(&store::status(&session))?;
        }
        DayAction::Status => {
            let progress = session.progress(Utc::now());
            print_json(&json!({
                "date": session.date(),
                "phase": session.phase(),
                "target_reached": session.timer().target_reached(),
                "progress": progress,
            }))?;
        }
        DayAction::Eta => {
            let now = Utc::now();
            let eta = session.eta(now).with_timezone(&Local);
            print_json(&json!({
                "remaining_blocks": session.timer().remaining_blocks().max(0),
                "eta": eta.format("%H:%M").to_string(),
            }))?;
        }
    }

    store::save(&session)
}
