//! Fired-reminder log: the durable record of reminders already shown.
//!
//! Keys are `<schedule id>-<YYYY-MM-DD>-<HH:MM>`. Entries never expire; a key
//! for a past day is simply never looked up again.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{PersistenceError, PersistenceResult};

use super::time::date_key;
use super::types::Schedule;

/// Build the de-duplication key for one schedule on one day.
pub fn reminder_key(schedule: &Schedule, date: NaiveDate) -> String {
    format!("{}-{}-{}", schedule.id, date_key(date), schedule.time)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FiredReminderLog {
    entries: BTreeMap<String, Value>,
}

/// Anything other than `null`, `false`, `0` or `""` counts as fired.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl FiredReminderLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(is_truthy)
    }

    /// Record a key. Returns `false` if it was already present.
    pub fn mark(&mut self, key: impl Into<String>) -> bool {
        let previous = self.entries.insert(key.into(), Value::Bool(true));
        !previous.as_ref().is_some_and(is_truthy)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whole-log persistence: read everything before a tick, replace everything
/// after a fire.
pub trait ReminderLogStore: Send + Sync {
    fn load(&self) -> PersistenceResult<FiredReminderLog>;
    fn save(&self, log: &FiredReminderLog) -> PersistenceResult<()>;
}

/// JSON object on disk, `{ "<key>": true, ... }`.
pub struct JsonReminderLogStore {
    path: PathBuf,
}

impl JsonReminderLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReminderLogStore for JsonReminderLogStore {
    fn load(&self) -> PersistenceResult<FiredReminderLog> {
        if !self.path.exists() {
            return Ok(FiredReminderLog::default());
        }
        let text = std::fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(FiredReminderLog::default());
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn save(&self, log: &FiredReminderLog) -> PersistenceResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(log)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Process-local store for tests and one-shot runs.
#[derive(Default)]
pub struct MemoryReminderLogStore {
    inner: Mutex<FiredReminderLog>,
}

impl MemoryReminderLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> FiredReminderLog {
        match self.inner.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ReminderLogStore for MemoryReminderLogStore {
    fn load(&self) -> PersistenceResult<FiredReminderLog> {
        self.inner
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| PersistenceError::Unavailable("reminder log lock poisoned".into()))
    }

    fn save(&self, log: &FiredReminderLog) -> PersistenceResult<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| PersistenceError::Unavailable("reminder log lock poisoned".into()))?;
        *guard = log.clone();
        Ok(())
    }
}
