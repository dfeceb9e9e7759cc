use std::io;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use hardmode_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod store;

#[derive(Parser)]
#[command(name = "hardmode", version, about = "Hardmode Pomodoro timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start, inspect and close the working day
    Day {
        #[command(subcommand)]
        action: commands::day::DayAction,
    },
    /// Today's task plan
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Focus block control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Estimate when a number of blocks would be done
    Eta(commands::eta::EtaArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Day statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Print a shell completion script
    Completions {
        shell: Shell,
    },
}

/// Log to stderr so stdout stays machine-readable.
///
/// `HARDMODE_LOG` takes an `EnvFilter` directive and overrides `log.level`
/// from the config file.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("HARDMODE_LOG").unwrap_or_else(|_| {
        let level = Config::load()
            .map(|c| c.log.level)
            .unwrap_or_else(|_| "warn".into());
        EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("warn"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Day { action } => commands::day::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Eta(args) => commands::eta::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "hardmode", &mut io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
