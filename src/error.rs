//! Errors raised while loading reference data

use thiserror::Error;

/// Reference data is missing or malformed. Fatal at start-up.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io { path: String, source: std::io::Error },

    #[error("invalid JSON in {path}: {source}")]
    Json { path: String, source: serde_json::Error },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{path} line {line}: {message}")]
    InvalidValue { path: String, line: u64, message: String },

    #[error("{path}: duplicate player name '{name}'")]
    DuplicatePlayer { path: String, name: String },
}
