use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Log config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// One of "text", "compact", "pretty", "json".
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// One of "local", "utc", "rfc3339".
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    #[serde(default)]
    pub module_levels: HashMap<String, String>,
    #[serde(default = "default_true")]
    pub show_target: bool,
    #[serde(default)]
    pub show_thread_ids: bool,
    #[serde(default)]
    pub show_file: bool,
}

fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}
fn default_log_dir() -> String {
    "~/.aquarist/logs".into()
}
fn default_timestamp_format() -> String {
    "local".into()
}
fn default_true() -> bool {
    true
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            dir: default_log_dir(),
            timestamp_format: default_timestamp_format(),
            module_levels: HashMap::new(),
            show_target: true,
            show_thread_ids: false,
            show_file: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Reminder config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_poll_interval() -> u64 {
    60
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval_secs: default_poll_interval(),
        }
    }
}

// ---------------------------------------------------------------------------
// Data config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: String,
}

fn default_data_dir() -> String {
    "~/.aquarist/data".into()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

// ---------------------------------------------------------------------------
// Root config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub reminders: ReminderConfig,
    #[serde(default)]
    pub data: DataConfig,
}

// ---------------------------------------------------------------------------
// Paths & loading
// ---------------------------------------------------------------------------

pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".aquarist")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

fn expand_home(raw: &str) -> PathBuf {
    if raw.starts_with('~') {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(raw.trim_start_matches('~').trim_start_matches('/'))
    } else {
        PathBuf::from(raw)
    }
}

pub fn data_dir_path(cfg: &Config) -> PathBuf {
    expand_home(&cfg.data.dir)
}

pub fn log_dir_path(cfg: &Config) -> PathBuf {
    expand_home(&cfg.log.dir)
}

/// Schedule records written by `aquarist schedule add`.
pub fn schedules_path(cfg: &Config) -> PathBuf {
    data_dir_path(cfg).join("schedules.json")
}

/// Fired-reminder de-duplication log.
pub fn reminder_log_path(cfg: &Config) -> PathBuf {
    data_dir_path(cfg).join("reminder_log.json")
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = path.map(PathBuf::from).unwrap_or_else(config_path);

    if p.exists() {
        let text = std::fs::read_to_string(&p)
            .with_context(|| format!("reading config from {}", p.display()))?;
        let cfg: Config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config from {}", p.display()))?;
        Ok(cfg)
    } else {
        Ok(Config::default())
    }
}

pub fn save_config(cfg: &Config, path: Option<&Path>) -> Result<()> {
    let p = path.map(PathBuf::from).unwrap_or_else(config_path);

    if let Some(parent) = p.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(cfg)?;
    std::fs::write(&p, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.reminders.poll_interval_secs, 60);
        assert!(cfg.reminders.enabled);
        assert_eq!(cfg.log.level, "info");
        assert_eq!(cfg.log.format, "text");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let cfg: Config =
            serde_json::from_str(r#"{"reminders":{"pollIntervalSecs":30}}"#).unwrap();
        assert_eq!(cfg.reminders.poll_interval_secs, 30);
        assert!(cfg.reminders.enabled);
        assert_eq!(cfg.data.dir, "~/.aquarist/data");
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(Some(&dir.path().join("nope.json"))).unwrap();
        assert_eq!(cfg.reminders.poll_interval_secs, 60);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut cfg = Config::default();
        cfg.data.dir = dir.path().join("data").display().to_string();
        cfg.log.module_levels.insert("aquarist::store".into(), "debug".into());
        save_config(&cfg, Some(&path)).unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded.data.dir, cfg.data.dir);
        assert_eq!(
            loaded.log.module_levels.get("aquarist::store").map(String::as_str),
            Some("debug")
        );
        assert_eq!(schedules_path(&loaded), dir.path().join("data").join("schedules.json"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ broken").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("parsing config"));
    }

    #[test]
    fn test_absolute_dir_not_expanded() {
        let mut cfg = Config::default();
        cfg.data.dir = "/var/lib/aquarist".into();
        assert_eq!(data_dir_path(&cfg), PathBuf::from("/var/lib/aquarist"));
        assert_eq!(
            reminder_log_path(&cfg),
            PathBuf::from("/var/lib/aquarist/reminder_log.json")
        );
    }
}
