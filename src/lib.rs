//! # Aquarist - Aquarium Care Reminders
//!
//! Aquarist keeps recurring aquarium tasks (feeding, water changes, filter
//! cleaning, ...) and reminds you when one is due.
//!
//! ## Features
//!
//! - **Five recurrence kinds**: daily, weekly, specific weekdays, monthly by day, every N days
//! - **Daily agenda**: the first five tasks due on a date, ordered by time
//! - **At-most-once reminders**: a persistent log keeps each reminder to one fire per day
//! - **JSON storage**: schedules, fired-reminder log and configuration are plain JSON files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aquarist::reminder::{
//!     upcoming_agenda, Frequency, MemoryReminderLogStore, ReminderScheduler, Schedule,
//! };
//!
//! let mut feed = Schedule::new("sch_feed", "08:00", Frequency::Daily);
//! feed.title = "Morning feed".into();
//! let schedules = vec![feed];
//!
//! let now = chrono::Local::now().naive_local();
//! for s in upcoming_agenda(&schedules, now.date()) {
//!     println!("{} {}", s.time, s.display_title());
//! }
//!
//! let mut scheduler = ReminderScheduler::new(Box::new(MemoryReminderLogStore::new()));
//! for event in scheduler.tick(&schedules, now) {
//!     println!("{}: {}", event.title, event.description);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`reminder`] - Recurrence evaluation, agenda and reminder scheduling
//! - [`store`] - JSON schedule record store
//! - [`config`] - Configuration management
//! - [`logging`] - Tracing subscriber setup
//! - [`cli`] - Command line interface
//!
//! ## Configuration
//!
//! Configuration lives in `~/.aquarist/config.json`:
//!
//! ```json
//! {
//!   "log": { "level": "info", "format": "text" },
//!   "reminders": { "enabled": true, "pollIntervalSecs": 60 },
//!   "data": { "dir": "~/.aquarist/data" }
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod reminder;
pub mod store;
