//! Schedule record store backed by a single JSON file.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::reminder::{Schedule, ScheduleSource};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleFile {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
}

fn default_version() -> u32 {
    1
}

impl Default for ScheduleFile {
    fn default() -> Self {
        Self {
            version: default_version(),
            schedules: Vec::new(),
        }
    }
}

pub struct ScheduleStore {
    path: PathBuf,
    file: ScheduleFile,
}

impl ScheduleStore {
    /// Open the store, treating a missing file as empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = read_file(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.file)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("writing schedules to {}", self.path.display()))?;
        Ok(())
    }

    pub fn list(&self) -> &[Schedule] {
        &self.file.schedules
    }

    pub fn get(&self, id: &str) -> Option<&Schedule> {
        self.file.schedules.iter().find(|s| s.id == id)
    }

    /// Insert or replace by id. The stored record is normalized first and
    /// returned.
    pub fn upsert(&mut self, schedule: Schedule, now: NaiveDateTime) -> Result<Schedule> {
        let index = self.file.schedules.iter().position(|s| s.id == schedule.id);
        let record = schedule.normalized(index.map(|i| &self.file.schedules[i]), now);
        match index {
            Some(i) => self.file.schedules[i] = record.clone(),
            None => self.file.schedules.push(record.clone()),
        }
        self.save()?;
        debug!(schedule_id = %record.id, updated = index.is_some(), "Schedule saved");
        Ok(record)
    }

    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let before = self.file.schedules.len();
        self.file.schedules.retain(|s| s.id != id);
        let removed = self.file.schedules.len() < before;
        if removed {
            self.save()?;
        }
        Ok(removed)
    }
}

/// Re-reads the file on every call so edits made by another process are
/// picked up on the next tick.
impl ScheduleSource for ScheduleStore {
    fn snapshot(&self) -> Result<Vec<Schedule>> {
        Ok(read_file(&self.path)?.schedules)
    }
}

fn read_file(path: &Path) -> Result<ScheduleFile> {
    if !path.exists() {
        return Ok(ScheduleFile::default());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading schedules from {}", path.display()))?;
    let raw: RawScheduleFile = serde_json::from_str(&text)
        .with_context(|| format!("parsing schedules from {}", path.display()))?;

    let schedules = raw
        .schedules
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<Schedule>(value) {
            Ok(schedule) => Some(schedule),
            Err(e) => {
                warn!(index, error = %e, path = %path.display(), "Skipping malformed schedule record");
                None
            }
        })
        .collect();
    Ok(ScheduleFile {
        version: raw.version,
        schedules,
    })
}

/// On-disk shape with records left unparsed, so one bad record is skipped
/// instead of failing the whole file.
#[derive(Deserialize)]
struct RawScheduleFile {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    schedules: Vec<serde_json::Value>,
}

/// New record id: `sch_` plus eight hex characters.
pub fn new_schedule_id() -> String {
    format!("sch_{}", &uuid::Uuid::new_v4().simple().to_string()[..8])
}
