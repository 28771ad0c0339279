// Error types for reminder persistence

use thiserror::Error;

/// Failure reading or writing a persisted reminder artifact.
///
/// The reminder engine treats every variant as recoverable: a failed read
/// degrades to an empty log, a failed write is logged and dropped.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Persistence unavailable: {0}")]
    Unavailable(String),
}

impl PersistenceError {
    /// Short machine-readable code for structured log fields.
    pub fn code(&self) -> &'static str {
        match self {
            PersistenceError::Io(_) => "PERSISTENCE_IO",
            PersistenceError::Json(_) => "PERSISTENCE_JSON",
            PersistenceError::Unavailable(_) => "PERSISTENCE_UNAVAILABLE",
        }
    }
}

pub type PersistenceResult<T> = std::result::Result<T, PersistenceError>;
