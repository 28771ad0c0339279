//! Schedule data types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use super::time::{date_key, format_timestamp, parse_date_only, parse_time_of_day};

pub const DEFAULT_TYPE: &str = "feeding";
pub const DEFAULT_TIME: &str = "08:00";
const FALLBACK_TITLE: &str = "Schedule reminder";
const FALLBACK_ACTIVITY: &str = "your aquarium task";

/// Recurrence kind of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    /// Same evaluation as `Weekly`; kept distinct for display copy.
    Specific,
    Monthly,
    Interval,
    /// Any value not recognised above. Never due.
    Unknown,
}

impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Null => Frequency::Daily,
            serde_json::Value::String(raw) if raw.trim().is_empty() => Frequency::Daily,
            serde_json::Value::String(raw) => raw.parse().unwrap_or(Frequency::Unknown),
            _ => Frequency::Unknown,
        })
    }
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Frequency {
    /// `weekly` and `specific` are both evaluated against the `days` set.
    pub fn uses_weekdays(self) -> bool {
        matches!(self, Frequency::Weekly | Frequency::Specific)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Specific => "specific",
            Frequency::Monthly => "monthly",
            Frequency::Interval => "interval",
            Frequency::Unknown => "unknown",
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "specific" => Ok(Frequency::Specific),
            "monthly" => Ok(Frequency::Monthly),
            "interval" => Ok(Frequency::Interval),
            other => anyhow::bail!("Unknown frequency: {other}"),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recurring aquarium task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Free-form category label, e.g. "feeding" or "water change".
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    /// Target time of day, `HH:MM`, local.
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default, deserialize_with = "null_as_default")]
    pub days: Vec<String>,
    #[serde(default)]
    pub day_of_month: Option<i64>,
    #[serde(default)]
    pub interval_days: Option<i64>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

impl Schedule {
    pub fn new(id: impl Into<String>, time: impl Into<String>, frequency: Frequency) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            kind: DEFAULT_TYPE.to_string(),
            time: time.into(),
            frequency,
            days: Vec::new(),
            day_of_month: None,
            interval_days: None,
            start_date: None,
            notes: String::new(),
            created_at: String::new(),
        }
    }

    /// Title shown in the agenda and in reminders.
    pub fn display_title(&self) -> &str {
        if !self.title.is_empty() {
            &self.title
        } else if !self.kind.is_empty() {
            &self.kind
        } else {
            FALLBACK_TITLE
        }
    }

    /// Reminder body: notes, else a generated line mentioning the type.
    pub fn reminder_description(&self) -> String {
        if !self.notes.is_empty() {
            return self.notes.clone();
        }
        let activity = if self.kind.is_empty() {
            FALLBACK_ACTIVITY
        } else {
            &self.kind
        };
        format!("Time to do {activity}.")
    }

    /// Epoch of an `interval` schedule: `start_date`, else `created_at`.
    pub fn interval_base(&self) -> Option<&str> {
        self.start_date
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| Some(self.created_at.as_str()).filter(|s| !s.trim().is_empty()))
    }

    /// Return a copy with every write-time invariant applied.
    ///
    /// `previous` is the stored record with the same id, if any; its
    /// `created_at` and `start_date` are carried over. `now` is the local
    /// write time.
    pub fn normalized(&self, previous: Option<&Schedule>, now: NaiveDateTime) -> Schedule {
        let mut out = self.clone();
        out.title = out.title.trim().to_string();
        out.notes = out.notes.trim().to_string();
        out.kind = out.kind.trim().to_string();
        if out.kind.is_empty() {
            out.kind = DEFAULT_TYPE.to_string();
        }
        out.time = match parse_time_of_day(&out.time) {
            Some(t) => t.format("%H:%M").to_string(),
            None if out.time.trim().is_empty() => DEFAULT_TIME.to_string(),
            None => out.time.trim().to_string(),
        };

        let mut days: Vec<String> = Vec::with_capacity(out.days.len());
        for day in out.days.iter().map(|d| d.trim().to_lowercase()) {
            if !day.is_empty() && !days.contains(&day) {
                days.push(day);
            }
        }
        out.days = if out.frequency.uses_weekdays() { days } else { Vec::new() };

        out.day_of_month = match out.frequency {
            Frequency::Monthly => out.day_of_month.map(|d| d.clamp(1, 31)),
            _ => None,
        };

        if out.frequency == Frequency::Interval {
            out.interval_days = out.interval_days.map(|n| n.max(1));
            let start = out
                .start_date
                .clone()
                .filter(|s| !s.trim().is_empty())
                .or_else(|| previous.and_then(|p| p.start_date.clone()))
                .filter(|s| parse_date_only(s).is_some());
            out.start_date = Some(start.unwrap_or_else(|| date_key(now.date())));
        } else {
            out.interval_days = None;
            out.start_date = None;
        }

        out.created_at = previous
            .map(|p| p.created_at.clone())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| format_timestamp(now));
        out
    }
}

/// One-shot, user-visible alert for a schedule whose time has arrived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub title: String,
    pub description: String,
}

impl NotificationEvent {
    pub fn for_schedule(schedule: &Schedule) -> Self {
        Self {
            title: schedule.display_title().to_string(),
            description: schedule.reminder_description(),
        }
    }
}
