//! Logging initialization and configuration.

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{ChronoLocal, ChronoUtc, FormatTime};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use crate::config::{log_dir_path, Config};

const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Timestamp source selected by `log.timestampFormat`.
#[derive(Debug, Clone)]
enum LogTimer {
    Local(ChronoLocal),
    Utc(ChronoUtc),
}

impl LogTimer {
    fn from_config(timestamp_format: &str) -> Self {
        match timestamp_format.to_lowercase().as_str() {
            "rfc3339" => LogTimer::Utc(ChronoUtc::rfc_3339()),
            "utc" => LogTimer::Utc(ChronoUtc::new(DEFAULT_TIME_FORMAT.to_string())),
            _ => LogTimer::Local(ChronoLocal::new(DEFAULT_TIME_FORMAT.to_string())),
        }
    }
}

impl FormatTime for LogTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        match self {
            LogTimer::Local(t) => t.format_time(w),
            LogTimer::Utc(t) => t.format_time(w),
        }
    }
}

/// Initialize the logging system based on configuration.
///
/// Events go to stdout and to a daily rolling file under `log.dir`. The
/// returned guard flushes the file writer on drop and must be held for the
/// lifetime of the process.
pub fn init_logging(cfg: &Config) -> Result<WorkerGuard> {
    let log_dir = log_dir_path(cfg);
    std::fs::create_dir_all(&log_dir)?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| filter_directives(cfg).map(EnvFilter::new))?;

    // File name: aquarist.yyyy-MM-dd.log or aquarist.yyyy-MM-dd.json
    let log_file_suffix = match cfg.log.format.to_lowercase().as_str() {
        "json" => "json",
        _ => "log",
    };
    let file_appender = tracing_appender::rolling::RollingFileAppender::builder()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .filename_prefix("aquarist")
        .filename_suffix(log_file_suffix)
        .build(&log_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create rolling file appender: {}", e))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let timer = LogTimer::from_config(&cfg.log.timestamp_format);
    let layers: Vec<BoxedLayer> = vec![
        build_layer(cfg, non_blocking, false, timer.clone()),
        build_layer(cfg, std::io::stdout, true, timer),
    ];

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    tracing::info!(
        level = %cfg.log.level,
        format = %cfg.log.format,
        timestamp_format = %cfg.log.timestamp_format,
        dir = %log_dir.display(),
        "Logging initialized"
    );

    Ok(guard)
}

fn build_layer<W>(cfg: &Config, writer: W, ansi: bool, timer: LogTimer) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_timer(timer)
        .with_target(cfg.log.show_target)
        .with_thread_ids(cfg.log.show_thread_ids)
        .with_file(cfg.log.show_file)
        .with_line_number(cfg.log.show_file);

    match cfg.log.format.to_lowercase().as_str() {
        "json" => layer.json().boxed(),
        "compact" => layer.compact().boxed(),
        "pretty" => layer.pretty().boxed(),
        _ => layer.boxed(),
    }
}

/// Build the `EnvFilter` directive string from `log.level` and `log.moduleLevels`.
/// Module entries with an unknown level are skipped.
fn filter_directives(cfg: &Config) -> Result<String> {
    let level = parse_log_level(&cfg.log.level)?;
    let mut filter_str = format!("aquarist={}", level);

    let mut modules: Vec<_> = cfg.log.module_levels.iter().collect();
    modules.sort();
    for (module, module_level) in modules {
        if let Ok(parsed_level) = parse_log_level(module_level) {
            filter_str.push_str(&format!(",{}={}", module, parsed_level));
        }
    }
    Ok(filter_str)
}

/// Parse log level string to a filter directive level.
fn parse_log_level(level_str: &str) -> Result<&'static str> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" => Ok("warn"),
        "error" => Ok("error"),
        _ => anyhow::bail!("Invalid log level: {}", level_str),
    }
}

/// Initialize simple logging for commands that don't load config.
pub fn init_simple_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "aquarist=warn".into()),
        )
        .try_init();
}
