//! Reminder scheduler: fires each due schedule at most once per day, on the
//! exact minute of its target time.

use anyhow::Result;
use chrono::NaiveDateTime;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::fired_log::{reminder_key, FiredReminderLog, ReminderLogStore};
use super::recurrence::is_due_on;
use super::time::{minute_of_day, parse_time_of_day};
use super::types::{NotificationEvent, Schedule};

/// Supplies an immutable copy of the schedule records for one tick.
pub trait ScheduleSource: Send + Sync {
    fn snapshot(&self) -> Result<Vec<Schedule>>;
}

impl ScheduleSource for Vec<Schedule> {
    fn snapshot(&self) -> Result<Vec<Schedule>> {
        Ok(self.clone())
    }
}

/// Local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Always reports the same instant.
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

pub struct ReminderScheduler {
    store: Box<dyn ReminderLogStore>,
}

impl ReminderScheduler {
    pub fn new(store: Box<dyn ReminderLogStore>) -> Self {
        Self { store }
    }

    /// Evaluate one tick at local time `now`.
    ///
    /// A schedule fires when it is due today and its `HH:MM` equals the
    /// current minute exactly; a tick that lands after the target minute does
    /// not catch up. The fired-reminder log is read once before evaluation and
    /// written once after any new fire. A failed read counts as an empty log
    /// and a failed write is only logged.
    pub fn tick(&mut self, schedules: &[Schedule], now: NaiveDateTime) -> Vec<NotificationEvent> {
        let today = now.date();
        let current_minutes = minute_of_day(&now.time());

        let mut fired = match self.store.load() {
            Ok(log) => log,
            Err(e) => {
                warn!(error = %e, code = e.code(), "Could not read reminder log, assuming nothing fired");
                FiredReminderLog::default()
            }
        };

        let mut events = Vec::new();
        for schedule in schedules {
            if schedule.time.trim().is_empty() || !is_due_on(schedule, today) {
                continue;
            }
            let Some(target) = parse_time_of_day(&schedule.time) else {
                debug!(schedule_id = %schedule.id, time = %schedule.time, "Unparsable schedule time, skipping");
                continue;
            };
            if minute_of_day(&target) != current_minutes {
                continue;
            }

            let key = reminder_key(schedule, today);
            if !fired.mark(key) {
                debug!(schedule_id = %schedule.id, "Reminder already fired today");
                continue;
            }

            info!(
                schedule_id = %schedule.id,
                time = %schedule.time,
                frequency = %schedule.frequency,
                "Reminder fired"
            );
            events.push(NotificationEvent::for_schedule(schedule));
        }

        if !events.is_empty() {
            if let Err(e) = self.store.save(&fired) {
                warn!(error = %e, code = e.code(), "Could not persist reminder log");
            }
        }
        events
    }
}

/// Polling loop around [`ReminderScheduler`].
pub struct ReminderService {
    scheduler: ReminderScheduler,
    source: Arc<dyn ScheduleSource>,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl ReminderService {
    pub fn new(
        scheduler: ReminderScheduler,
        source: Arc<dyn ScheduleSource>,
        clock: Arc<dyn Clock>,
        interval: Duration,
    ) -> Self {
        Self {
            scheduler,
            source,
            clock,
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    /// One tick: snapshot the schedules, read the clock, evaluate.
    /// A snapshot failure skips the tick.
    pub fn run_once(&mut self) -> Vec<NotificationEvent> {
        let schedules = match self.source.snapshot() {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Could not read schedules, skipping tick");
                return Vec::new();
            }
        };
        let now = self.clock.now();
        debug!(schedules = schedules.len(), now = %now, "Reminder tick");
        self.scheduler.tick(&schedules, now)
    }

    /// Tick immediately, then once per interval, sending every notification
    /// to `notify_tx`. Returns when the receiving side is dropped.
    pub async fn run(mut self, notify_tx: mpsc::Sender<NotificationEvent>) -> Result<()> {
        info!(interval_ms = self.interval.as_millis() as u64, "Reminder service started");
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            for event in self.run_once() {
                if notify_tx.send(event).await.is_err() {
                    info!("Notification sink closed, stopping reminder service");
                    return Ok(());
                }
            }
        }
    }
}
