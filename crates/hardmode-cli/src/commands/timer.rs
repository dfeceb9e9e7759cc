use std::time::Duration;

use clap::Subcommand;
use hardmode_core::{Config, Phase, Review};
use serde_json::json;
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

use crate::store::{self, print_json, CliResult, Session};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a focus block on a task
    Start {
        task: String,
    },
    /// Change the task of the running block (flags a context switch)
    Switch {
        task: String,
    },
    /// Review the block that just ended and start the break
    Review {
        /// Focus score, 1 to 5
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        score: u8,
        #[arg(long, default_value = "")]
        reason: String,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Abandon the running block and return to planning
    Abort {
        #[arg(long, default_value = "user_abort")]
        reason: String,
    },
    /// Print current timer state as JSON
    Status,
    /// Count down in the foreground until the phase needs input
    Watch,
}

pub fn run(action: TimerAction) -> CliResult {
    let config = Config::load()?;
    let mut session = store::load(&config)?;

    match action {
        TimerAction::Start { task } => {
            session.start_focus(&task)?;
            print_json(&store::status(&session))?;
        }
        TimerAction::Switch { task } => {
            let changed = session.change_task(&task)?;
            print_json(&json!({
                "changed": changed,
                "task": session.timer().current_task(),
                "context_switch": session.timer().context_switch(),
            }))?;
        }
        TimerAction::Review {
            score,
            reason,
            note,
        } => {
            let next = session.review(&Review {
                focus_score: score,
                reason,
                note,
            })?;
            print_json(&json!({
                "next": next,
                "seconds_remaining": session.timer().seconds_remaining(),
                "completed_today": session.timer().completed_today(),
            }))?;
        }
        TimerAction::Abort { reason } => {
            session.abort(&reason)?;
            print_json(&store::status(&session))?;
        }
        TimerAction::Status => {
            print_json(&store::status(&session))?;
        }
        TimerAction::Watch => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(watch(&mut session));
        }
    }

    store::save(&session)
}

fn is_counting(phase: Phase) -> bool {
    phase == Phase::Focus || phase.is_break()
}

/// Pulse once per second, printing the status line, until the timer stops
/// counting or ctrl-c arrives.
async fn watch(session: &mut Session) {
    println!("{}", session.timer().status_line());
    if !is_counting(session.phase()) {
        return;
    }

    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
    // The first tick completes immediately.
    ticker.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let phase = session.pulse();
                println!("{}", session.timer().status_line());
                if !is_counting(phase) {
                    break;
                }
            }
            _ = &mut ctrl_c => {
                info!("watch interrupted");
                break;
            }
        }
    }
}
