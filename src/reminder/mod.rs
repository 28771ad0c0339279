//! Recurrence evaluation and reminder scheduling.

pub mod fired_log;
pub mod recurrence;
pub mod scheduler;
pub mod time;
pub mod types;

pub use fired_log::{FiredReminderLog, JsonReminderLogStore, MemoryReminderLogStore, ReminderLogStore};
pub use recurrence::{is_due_on, upcoming_agenda, AGENDA_LIMIT};
pub use scheduler::{Clock, FixedClock, LocalClock, ReminderScheduler, ReminderService, ScheduleSource};
pub use types::{Frequency, NotificationEvent, Schedule};
