//! Corpus builder errors.

use std::path::PathBuf;

use songpair_spec::{PipelineError, RecordError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid lexicon {path}: {source}")]
    Lexicon {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}:{line}: {reason}")]
    NoteTable {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("split must be at least 1")]
    InvalidSplit,

    #[error(transparent)]
    Record(#[from] RecordError),
}

impl CorpusError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CorpusError::Io {
            path: path.into(),
            source,
        }
    }
}

impl PipelineError for CorpusError {
    fn code(&self) -> &'static str {
        match self {
            CorpusError::Pattern { .. } => "CORPUS_001",
            CorpusError::Io { .. } => "CORPUS_002",
            CorpusError::Lexicon { .. } => "CORPUS_003",
            CorpusError::NoteTable { .. } => "CORPUS_004",
            CorpusError::InvalidSplit => "CORPUS_005",
            CorpusError::Record(err) => err.code(),
        }
    }

    fn category(&self) -> &'static str {
        "corpus"
    }
}
