use clap::Subcommand;
use hardmode_core::Config;
use serde_json::json;

use crate::store::{self, print_json, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Put a task on today's plan
    Add {
        name: String,
        /// Pomodoros you expect to spend on it (defaults to 2 while planning)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=16))]
        planned: Option<u32>,
        /// Why the task is added after work began (required then)
        #[arg(long)]
        reason: Option<String>,
    },
    /// Today's plan with planned and spent pomodoros
    List,
    /// Mark a task as done
    Done {
        name: String,
    },
}

pub fn run(action: TaskAction) -> CliResult {
    let config = Config::load()?;
    let mut session = store::load(&config)?;

    match action {
        TaskAction::Add {
            name,
            planned,
            reason,
        } => {
            let id = session.add_task(&name, planned, reason.as_deref())?;
            let tasks = session.tasks()?;
            let added = tasks.iter().find(|t| t.id == id);
            print_json(&added)?;
        }
        TaskAction::List => {
            print_json(&session.tasks()?)?;
        }
        TaskAction::Done { name } => {
            session.complete_task(&name)?;
            print_json(&json!({ "completed": name.trim() }))?;
        }
    }

    store::save(&session)
}
