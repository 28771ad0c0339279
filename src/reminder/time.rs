//! Calendar helpers shared by the evaluator and the scheduler.
//!
//! All values are naive local wall-clock values. The engine assumes one fixed
//! local zone, so calendar-day arithmetic on `NaiveDate` cannot be shifted by
//! daylight-saving transitions or sub-day clock noise.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

/// Parse a 24-hour `HH:MM` time of day. Returns `None` for anything else.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let (hour, minute) = raw.trim().split_once(':')?;
    if hour.is_empty() || minute.is_empty() || hour.len() > 2 || minute.len() != 2 {
        return None;
    }
    if !hour.bytes().all(|b| b.is_ascii_digit()) || !minute.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)
}

/// Minutes since midnight, ignoring seconds.
pub fn minute_of_day<T: Timelike>(t: &T) -> u32 {
    t.hour() * 60 + t.minute()
}

/// Parse a date or timestamp and truncate it to its calendar day.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS]`, `YYYY-MM-DDTHH:MM[:SS]` and
/// RFC 3339. Offsets are dropped, keeping the written calendar day.
pub fn parse_date_only(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local().date());
    }
    let normalized = raw.replacen(' ', "T", 1);
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
        .map(|dt| dt.date())
}

/// Locale-independent weekday key: `monday` … `sunday`.
pub fn weekday_key(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Whole calendar days from `base` to `date` (negative when `date` is earlier).
pub fn days_between(base: NaiveDate, date: NaiveDate) -> i64 {
    date.signed_duration_since(base).num_days()
}

/// ISO `YYYY-MM-DD` key for a calendar day.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `YYYY-MM-DD HH:MM`, the timestamp format stored on records.
pub fn format_timestamp(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}
