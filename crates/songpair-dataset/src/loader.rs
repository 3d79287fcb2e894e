//! Builds the task datasets from a record file.
//!
//! Two datasets are derived from the same records:
//! - translator: lyrics in, note + tempo out (`translator.batch_size`)
//! - autoencoder: note + tempo in and out (`autoencoder.batch_size`)

use std::path::Path;

use songpair_spec::{read_records, Config, Record};

use crate::bundle::Bundle;
use crate::dataset::PairedDataset;
use crate::error::DatasetError;

/// The two datasets a record file feeds.
#[derive(Debug, Clone)]
pub struct TaskDatasets {
    pub autoencoder: PairedDataset,
    pub translator: PairedDataset,
}

/// Reads a record file and builds both task datasets.
pub fn load(path: &Path, config: &Config) -> Result<TaskDatasets, DatasetError> {
    let records = read_records(path)?;
    tracing::info!(records = records.len(), "loaded records from {}", path.display());
    from_records(&records, config)
}

/// Builds both task datasets from in-memory records.
pub fn from_records(records: &[Record], config: &Config) -> Result<TaskDatasets, DatasetError> {
    let dims = config.dims();
    let lyrics = Bundle::lyrics_from_records(records);
    let note_tempo = Bundle::note_tempo_from_records(records);

    let translator = PairedDataset::new(
        lyrics,
        note_tempo.clone(),
        config.translator.batch_size,
        dims,
    )?;
    let autoencoder = PairedDataset::new(
        note_tempo.clone(),
        note_tempo,
        config.autoencoder.batch_size,
        dims,
    )?;

    Ok(TaskDatasets {
        autoencoder,
        translator,
    })
}
