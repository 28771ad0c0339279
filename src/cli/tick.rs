//! Tick command - Run one reminder check against the persistent log.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::sync::Arc;
use std::time::Duration;

use crate::config;
use crate::logging;
use crate::reminder::{
    Clock, FixedClock, JsonReminderLogStore, LocalClock, ReminderScheduler, ReminderService,
};
use crate::store::ScheduleStore;

use super::start::print_toast;

pub async fn cmd_tick(at: Option<String>) -> Result<()> {
    logging::init_simple_logging();
    let cfg = config::load_config(None)?;

    let clock: Arc<dyn Clock> = match at {
        Some(raw) => {
            let normalized = raw.trim().replacen('T', " ", 1);
            let now = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M")
                .with_context(|| format!("Invalid --at {raw:?}, expected \"YYYY-MM-DD HH:MM\""))?;
            Arc::new(FixedClock(now))
        }
        None => Arc::new(LocalClock),
    };

    let schedules = ScheduleStore::open(config::schedules_path(&cfg))?;
    let log_store = JsonReminderLogStore::new(config::reminder_log_path(&cfg));
    let mut service = ReminderService::new(
        ReminderScheduler::new(Box::new(log_store)),
        Arc::new(schedules),
        clock,
        Duration::from_secs(cfg.reminders.poll_interval_secs.max(1)),
    );

    let events = service.run_once();
    if events.is_empty() {
        println!("No reminders due.");
    }
    for event in &events {
        print_toast(event);
    }
    Ok(())
}
