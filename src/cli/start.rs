//! Start command - Run the reminder service (snapshot schedules, tick, notify).

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config;
use crate::logging;
use crate::reminder::{
    JsonReminderLogStore, LocalClock, NotificationEvent, ReminderScheduler, ReminderService,
};
use crate::store::ScheduleStore;

pub async fn cmd_start() -> Result<()> {
    let cfg = config::load_config(None)?;
    let _log_guard = logging::init_logging(&cfg)?;

    if !cfg.reminders.enabled {
        warn!("Reminders are disabled in config; nothing to do");
        return Ok(());
    }

    let schedules = ScheduleStore::open(config::schedules_path(&cfg))?;
    info!(
        path = %schedules.path().display(),
        count = schedules.list().len(),
        "Loaded schedules"
    );

    let log_store = JsonReminderLogStore::new(config::reminder_log_path(&cfg));
    let service = ReminderService::new(
        ReminderScheduler::new(Box::new(log_store)),
        Arc::new(schedules),
        Arc::new(LocalClock),
        Duration::from_secs(cfg.reminders.poll_interval_secs.max(1)),
    );

    let (notify_tx, mut notify_rx) = tokio::sync::mpsc::channel::<NotificationEvent>(32);
    let printer = tokio::spawn(async move {
        while let Some(event) = notify_rx.recv().await {
            print_toast(&event);
        }
    });

    let service_task = tokio::spawn(async move {
        if let Err(e) = service.run(notify_tx).await {
            tracing::error!("Reminder service error: {e:#}");
        }
    });

    info!("🐠 aquarist reminders running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;
    info!("Shutting down...");
    service_task.abort();
    printer.abort();
    Ok(())
}

pub(crate) fn print_toast(event: &NotificationEvent) {
    println!("⏰ {}", event.title);
    println!("   {}", event.description);
}
