//! Error types shared across the SongPair pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Common trait for pipeline errors.
///
/// Every library crate in the workspace tags its error enum with a stable code
/// and a category so the CLI can report failures uniformly:
/// - codes look like `CONFIG_001`, `DATASET_002`, `DECODE_001`
/// - categories group the codes by stage (`config`, `dataset`, `midi`, ...)
///
/// # Example
///
/// ```
/// use songpair_spec::error::{ConfigError, PipelineError};
///
/// let err = ConfigError::Invalid {
///     field: "music.Ci",
///     reason: "must be at least 1".to_string(),
/// };
/// assert_eq!(err.code(), "CONFIG_003");
/// assert_eq!(err.category(), "config");
/// ```
pub trait PipelineError: std::error::Error {
    /// Stable error code for reporting.
    fn code(&self) -> &'static str;

    /// Human-readable message, same as `Display` by default.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Stage the error came from.
    fn category(&self) -> &'static str;
}

/// Errors raised while loading or validating a [`crate::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML/JSON for the config schema.
    #[error("failed to parse config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A field holds a value the pipeline cannot work with.
    #[error("invalid config field '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl PipelineError for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "CONFIG_001",
            ConfigError::Parse { .. } => "CONFIG_002",
            ConfigError::Invalid { .. } => "CONFIG_003",
        }
    }

    fn category(&self) -> &'static str {
        "config"
    }
}

/// Errors raised while reading or writing line-delimited record files.
#[derive(Debug, Error)]
pub enum RecordError {
    /// IO error on the record file or writer.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line is not a valid record.
    #[error("malformed record at line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A record could not be serialized.
    #[error("failed to serialize record '{id}': {source}")]
    Serialize {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

impl PipelineError for RecordError {
    fn code(&self) -> &'static str {
        match self {
            RecordError::Io(_) => "RECORD_001",
            RecordError::Malformed { .. } => "RECORD_002",
            RecordError::Serialize { .. } => "RECORD_003",
        }
    }

    fn category(&self) -> &'static str {
        "record"
    }
}
