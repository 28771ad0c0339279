//! End-to-end: the polling service over a file-backed schedule store.

mod common;

use aquarist::reminder::{
    Clock, FixedClock, Frequency, JsonReminderLogStore, NotificationEvent, ReminderScheduler,
    ReminderService, ScheduleSource,
};
use aquarist::store::ScheduleStore;
use chrono::NaiveDateTime;
use common::{at, schedule};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// Clock whose time can be moved by the test.
struct ManualClock(Mutex<NaiveDateTime>);

impl ManualClock {
    fn set(&self, now: NaiveDateTime) {
        *self.0.lock().unwrap() = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.0.lock().unwrap()
    }
}

struct FailingSource;

impl ScheduleSource for FailingSource {
    fn snapshot(&self) -> anyhow::Result<Vec<aquarist::reminder::Schedule>> {
        anyhow::bail!("record store offline")
    }
}

async fn recv_within(
    rx: &mut mpsc::Receiver<NotificationEvent>,
    ms: u64,
) -> Option<NotificationEvent> {
    tokio::time::timeout(Duration::from_millis(ms), rx.recv())
        .await
        .ok()
        .flatten()
}

#[tokio::test]
async fn startup_tick_fires_once_then_stays_quiet() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ScheduleStore::open(dir.path().join("schedules.json")).unwrap();
    let mut feed = schedule("feed", "08:00", Frequency::Daily);
    feed.notes = "Two pinches of flakes".into();
    store.upsert(feed, at(2024, 5, 1, 7, 0)).unwrap();

    let service = ReminderService::new(
        ReminderScheduler::new(Box::new(JsonReminderLogStore::new(
            dir.path().join("reminder_log.json"),
        ))),
        Arc::new(store),
        Arc::new(FixedClock(at(2024, 5, 1, 8, 0))),
        Duration::from_millis(10),
    );

    let (tx, mut rx) = mpsc::channel(8);
    let handle = tokio::spawn(service.run(tx));

    let first = recv_within(&mut rx, 1000).await.expect("startup reminder");
    assert_eq!(first.title, "feeding");
    assert_eq!(first.description, "Two pinches of flakes");

    // Many more ticks at the same minute: no duplicates.
    assert!(recv_within(&mut rx, 100).await.is_none());

    handle.abort();
}

#[tokio::test]
async fn schedule_added_while_running_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schedules.json");
    let store = ScheduleStore::open(&path).unwrap();
    let clock = Arc::new(ManualClock(Mutex::new(at(2024, 5, 1, 9, 59))));

    let service = ReminderService::new(
        ReminderScheduler::new(Box::new(JsonReminderLogStore::new(
            dir.path().join("reminder_log.json"),
        ))),
        Arc::new(store),
        Arc::clone(&clock) as Arc<dyn Clock>,
        Duration::from_millis(10),
    );
    let (tx, mut rx) = mpsc::channel(8);
    let handle = tokio::spawn(service.run(tx));

    assert!(recv_within(&mut rx, 50).await.is_none());

    let mut writer = ScheduleStore::open(&path).unwrap();
    writer
        .upsert(schedule("water", "10:00", Frequency::Daily), at(2024, 5, 1, 9, 59))
        .unwrap();
    clock.set(at(2024, 5, 1, 10, 0));

    let event = recv_within(&mut rx, 1000).await.expect("reminder after edit");
    assert_eq!(event.description, "Time to do feeding.");
    handle.abort();
}

#[tokio::test]
async fn closed_sink_stops_the_service() {
    let service = ReminderService::new(
        ReminderScheduler::new(Box::new(aquarist::reminder::MemoryReminderLogStore::new())),
        Arc::new(vec![schedule("feed", "08:00", Frequency::Daily)]),
        Arc::new(FixedClock(at(2024, 5, 1, 8, 0))),
        Duration::from_millis(10),
    );
    let (tx, rx) = mpsc::channel(1);
    drop(rx);

    let result = tokio::time::timeout(Duration::from_secs(1), service.run(tx)).await;
    assert!(matches!(result, Ok(Ok(()))));
}

#[tokio::test]
async fn failing_source_skips_ticks_without_stopping() {
    let mut service = ReminderService::new(
        ReminderScheduler::new(Box::new(aquarist::reminder::MemoryReminderLogStore::new())),
        Arc::new(FailingSource),
        Arc::new(FixedClock(at(2024, 5, 1, 8, 0))),
        Duration::from_millis(10),
    );
    assert!(service.run_once().is_empty());
    assert!(service.run_once().is_empty());
}
