//! Agenda command - Print the schedules due on a day.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::config;
use crate::logging;
use crate::reminder::{upcoming_agenda, ScheduleSource};
use crate::store::ScheduleStore;

pub async fn cmd_agenda(date: Option<String>) -> Result<()> {
    logging::init_simple_logging();
    let cfg = config::load_config(None)?;

    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .with_context(|| format!("Invalid --date {raw:?}, expected YYYY-MM-DD"))?,
        None => chrono::Local::now().date_naive(),
    };

    let store = ScheduleStore::open(config::schedules_path(&cfg))?;
    let schedules = store.snapshot()?;
    let agenda = upcoming_agenda(&schedules, date);

    if agenda.is_empty() {
        println!("Nothing scheduled for {date}.");
        return Ok(());
    }
    println!("Agenda for {date}:");
    for s in agenda {
        println!("  {:>5}  {}  ({}, {})", s.time, s.display_title(), s.kind, s.frequency);
    }
    Ok(())
}
