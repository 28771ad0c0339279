//! Schedule command - Manage schedule records.

use anyhow::Result;
use clap::Subcommand;

use crate::config;
use crate::logging;
use crate::reminder::time::{parse_date_only, parse_time_of_day, weekday_key};
use crate::reminder::{Frequency, Schedule};
use crate::store::{new_schedule_id, ScheduleStore};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// List all schedules.
    List,
    /// Add a schedule, or replace one when --id names an existing record.
    Add {
        #[arg(long)]
        id: Option<String>,
        #[arg(long, default_value = "")]
        title: String,
        /// Category, e.g. "feeding" or "water change".
        #[arg(long = "type", default_value = "feeding")]
        kind: String,
        /// Time of day, HH:MM (24-hour).
        #[arg(long, default_value = "08:00")]
        time: String,
        /// daily, weekly, specific, monthly or interval.
        #[arg(long, default_value = "daily")]
        frequency: Frequency,
        /// Weekday names for weekly/specific (repeatable or comma-separated).
        #[arg(long, value_delimiter = ',')]
        days: Vec<String>,
        #[arg(long)]
        day_of_month: Option<i64>,
        #[arg(long)]
        interval_days: Option<i64>,
        /// First day of an interval schedule, YYYY-MM-DD (default: today).
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Remove a schedule by ID.
    Remove { id: String },
}

pub async fn cmd_schedule(action: ScheduleAction) -> Result<()> {
    logging::init_simple_logging();
    let cfg = config::load_config(None)?;
    let mut store = ScheduleStore::open(config::schedules_path(&cfg))?;

    match action {
        ScheduleAction::List => {
            let schedules = store.list();
            if schedules.is_empty() {
                println!("No schedules.");
            } else {
                for s in schedules {
                    println!(
                        "[{}] {} at {} ({}{})",
                        s.id,
                        s.display_title(),
                        s.time,
                        s.frequency,
                        recurrence_detail(s)
                    );
                }
            }
        }
        ScheduleAction::Add {
            id,
            title,
            kind,
            time,
            frequency,
            days,
            day_of_month,
            interval_days,
            start_date,
            notes,
        } => {
            let schedule = Schedule {
                id: id.unwrap_or_else(new_schedule_id),
                title,
                kind,
                time,
                frequency,
                days,
                day_of_month,
                interval_days,
                start_date,
                notes,
                created_at: String::new(),
            };
            validate(&schedule)?;
            let saved = store.upsert(schedule, chrono::Local::now().naive_local())?;
            println!("✓ Saved schedule {}", saved.id);
        }
        ScheduleAction::Remove { id } => {
            if store.remove(&id)? {
                println!("✓ Removed schedule {id}");
            } else {
                println!("Schedule {id} not found.");
            }
        }
    }
    Ok(())
}

fn recurrence_detail(s: &Schedule) -> String {
    match s.frequency {
        Frequency::Weekly | Frequency::Specific => format!(": {}", s.days.join(", ")),
        Frequency::Monthly => s
            .day_of_month
            .map(|d| format!(": day {d}"))
            .unwrap_or_default(),
        Frequency::Interval => format!(
            ": every {} day(s) from {}",
            s.interval_days.unwrap_or(1),
            s.start_date.as_deref().unwrap_or("-")
        ),
        _ => String::new(),
    }
}

/// Input checks for records written from the command line.
fn validate(s: &Schedule) -> Result<()> {
    if parse_time_of_day(&s.time).is_none() {
        anyhow::bail!("Invalid --time {:?}, expected HH:MM (24-hour)", s.time);
    }
    match s.frequency {
        Frequency::Weekly | Frequency::Specific => {
            if s.days.iter().all(|d| d.trim().is_empty()) {
                anyhow::bail!("--days is required for {} schedules", s.frequency);
            }
            let known: Vec<&str> = ALL_WEEKDAYS.iter().map(|w| weekday_key(*w)).collect();
            for day in s.days.iter().map(|d| d.trim().to_lowercase()) {
                if !day.is_empty() && !known.contains(&day.as_str()) {
                    anyhow::bail!("Unknown weekday {day:?}");
                }
            }
        }
        Frequency::Monthly => match s.day_of_month {
            Some(d) if (1..=31).contains(&d) => {}
            _ => anyhow::bail!("--day-of-month must be between 1 and 31 for monthly schedules"),
        },
        Frequency::Interval => {
            if s.interval_days.map_or(true, |n| n < 1) {
                anyhow::bail!("--interval-days must be at least 1 for interval schedules");
            }
            if let Some(start) = s.start_date.as_deref() {
                if parse_date_only(start).is_none() {
                    anyhow::bail!("Invalid --start-date {start:?}, expected YYYY-MM-DD");
                }
            }
        }
        Frequency::Daily => {}
        Frequency::Unknown => anyhow::bail!("Unknown frequency"),
    }
    Ok(())
}

const ALL_WEEKDAYS: [chrono::Weekday; 7] = [
    chrono::Weekday::Mon,
    chrono::Weekday::Tue,
    chrono::Weekday::Wed,
    chrono::Weekday::Thu,
    chrono::Weekday::Fri,
    chrono::Weekday::Sat,
    chrono::Weekday::Sun,
];
