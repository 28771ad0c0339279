//! CLI commands module.

mod agenda;
mod init;
mod schedule;
mod start;
mod tick;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use agenda::cmd_agenda;
pub use init::cmd_init;
pub use schedule::{cmd_schedule, ScheduleAction};
pub use start::cmd_start;
pub use tick::cmd_tick;

#[derive(Parser)]
#[command(name = "aquarist", about = "aquarist — Aquarium care schedules and reminders")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration and the data directory.
    Init,

    /// Run the reminder service until Ctrl+C.
    Start,

    /// Show the agenda for a day.
    Agenda {
        /// Date as YYYY-MM-DD (default: today).
        #[arg(long)]
        date: Option<String>,
    },

    /// Run a single reminder check and print any notifications.
    Tick {
        /// Local time as "YYYY-MM-DD HH:MM" (default: now).
        #[arg(long)]
        at: Option<String>,
    },

    /// Manage schedules.
    Schedule {
        #[command(subcommand)]
        action: ScheduleAction,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => cmd_init().await,
        Commands::Start => cmd_start().await,
        Commands::Agenda { date } => cmd_agenda(date).await,
        Commands::Tick { at } => cmd_tick(at).await,
        Commands::Schedule { action } => cmd_schedule(action).await,
    }
}
