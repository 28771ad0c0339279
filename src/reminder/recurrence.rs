//! Recurrence evaluation: is a schedule due on a given calendar day, and
//! which schedules make up that day's agenda.
//!
//! Evaluation is total. Malformed records (unknown frequency, missing
//! recurrence fields, unparsable dates) are simply never due.

use chrono::{Datelike, NaiveDate};

use super::time::{days_between, parse_date_only, weekday_key};
use super::types::{Frequency, Schedule};

/// Maximum number of entries in an agenda.
pub const AGENDA_LIMIT: usize = 5;

/// Whether `schedule` recurs on `date`.
pub fn is_due_on(schedule: &Schedule, date: NaiveDate) -> bool {
    match schedule.frequency {
        Frequency::Daily => true,
        Frequency::Weekly | Frequency::Specific => {
            let today = weekday_key(date.weekday());
            schedule.days.iter().any(|d| d.eq_ignore_ascii_case(today))
        }
        // Days past the end of a short month never match; no clamping.
        Frequency::Monthly => schedule.day_of_month == Some(i64::from(date.day())),
        Frequency::Interval => {
            let Some(base) = schedule.interval_base().and_then(parse_date_only) else {
                return false;
            };
            let interval = schedule.interval_days.unwrap_or(1).max(1);
            let diff = days_between(base, date);
            diff >= 0 && diff % interval == 0
        }
        Frequency::Unknown => false,
    }
}

/// Schedules due on `date`, ordered by their `HH:MM` time string, capped at
/// [`AGENDA_LIMIT`]. Equal times keep their input order.
pub fn upcoming_agenda(schedules: &[Schedule], date: NaiveDate) -> Vec<&Schedule> {
    let mut due: Vec<&Schedule> = schedules.iter().filter(|s| is_due_on(s, date)).collect();
    due.sort_by(|a, b| a.time.cmp(&b.time));
    due.truncate(AGENDA_LIMIT);
    due
}
