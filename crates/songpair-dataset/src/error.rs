//! Error types for dataset construction and batching.

use songpair_spec::{PipelineError, RecordError};
use thiserror::Error;

/// Errors that can occur while building or reading a paired dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("batch index {index} out of range ({batches} batches)")]
    IndexOutOfRange { index: usize, batches: usize },

    #[error("batch size must be at least 1")]
    InvalidBatchSize,

    #[error("input side holds {inp} records but target side holds {tar}")]
    SizeMismatch { inp: usize, tar: usize },

    #[error("column '{column}' holds {got} records, expected {expected}")]
    ColumnLengthMismatch {
        column: &'static str,
        expected: usize,
        got: usize,
    },

    #[error(
        "note embedding at record {record}, channel {channel}, event {event} has width {got}, expected {expected}"
    )]
    EmbeddingWidth {
        record: usize,
        channel: usize,
        event: usize,
        expected: usize,
        got: usize,
    },

    #[error("tensor shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error(transparent)]
    Record(#[from] RecordError),
}

impl PipelineError for DatasetError {
    fn code(&self) -> &'static str {
        match self {
            DatasetError::IndexOutOfRange { .. } => "DATASET_001",
            DatasetError::InvalidBatchSize => "DATASET_002",
            DatasetError::SizeMismatch { .. } => "DATASET_003",
            DatasetError::ColumnLengthMismatch { .. } => "DATASET_004",
            DatasetError::EmbeddingWidth { .. } => "DATASET_005",
            DatasetError::Shape(_) => "DATASET_006",
            DatasetError::Record(err) => err.code(),
        }
    }

    fn category(&self) -> &'static str {
        "dataset"
    }
}
