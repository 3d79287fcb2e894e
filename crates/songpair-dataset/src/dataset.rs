//! Paired input/target dataset with batch slicing and synchronized shuffle.
//!
//! A `PairedDataset` owns an input bundle and a target bundle describing the
//! same logical records in the same order. Construction normalizes every
//! column to fixed shapes; afterwards the dataset can be sliced into batches
//! and reshuffled any number of times. A shuffle draws one permutation and
//! applies it to every column of both sides, so position `k` always refers to
//! one record across the whole dataset.
//!
//! The dataset has a single owner: `shuffle` takes `&mut self`, so it cannot
//! run concurrently with batch reads.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use songpair_spec::{create_rng, Dims, Token};

use crate::bundle::{Bundle, SideBatch};
use crate::error::DatasetError;

/// One batch: the input side and the target side of the same rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub input: SideBatch,
    pub target: SideBatch,
}

/// Input/target dataset producing fixed-shape batches.
#[derive(Debug, Clone)]
pub struct PairedDataset {
    inp: Bundle,
    tar: Bundle,
    batch_size: usize,
    size: usize,
    pad_value: Token,
    dims: Dims,
}

impl PairedDataset {
    /// Builds a dataset with lyric pad value `0`.
    pub fn new(inp: Bundle, tar: Bundle, batch_size: usize, dims: Dims) -> Result<Self, DatasetError> {
        Self::with_pad_value(inp, tar, batch_size, dims, 0)
    }

    /// Builds a dataset, normalizing both bundles in place.
    ///
    /// Lyric columns are padded with `pad_value`; note columns are always
    /// padded with zero embeddings.
    pub fn with_pad_value(
        mut inp: Bundle,
        mut tar: Bundle,
        batch_size: usize,
        dims: Dims,
        pad_value: Token,
    ) -> Result<Self, DatasetError> {
        if batch_size == 0 {
            return Err(DatasetError::InvalidBatchSize);
        }

        let inp_size = inp.checked_len()?;
        let tar_size = tar.checked_len()?;
        if inp_size != tar_size {
            return Err(DatasetError::SizeMismatch {
                inp: inp_size,
                tar: tar_size,
            });
        }

        inp.normalize(pad_value, &dims);
        tar.normalize(pad_value, &dims);
        tracing::debug!(
            size = inp_size,
            batch_size,
            inp = ?inp.field_names(),
            tar = ?tar.field_names(),
            "normalized paired dataset"
        );

        Ok(Self {
            inp,
            tar,
            batch_size,
            size: inp_size,
            pad_value,
            dims,
        })
    }

    /// Number of batches, `ceil(size / batch_size)`.
    pub fn len(&self) -> usize {
        self.size.div_ceil(self.batch_size)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of records.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn pad_value(&self) -> Token {
        self.pad_value
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn inp(&self) -> &Bundle {
        &self.inp
    }

    pub fn tar(&self) -> &Bundle {
        &self.tar
    }

    /// Returns batch `index`: rows `[index * batch_size, index * batch_size + batch_size)`,
    /// clamped to `size` for the final partial batch.
    pub fn get(&self, index: usize) -> Result<Batch, DatasetError> {
        let batches = self.len();
        if index >= batches {
            return Err(DatasetError::IndexOutOfRange { index, batches });
        }

        let begin = index * self.batch_size;
        let end = (begin + self.batch_size).min(self.size);
        Ok(Batch {
            input: self.inp.batch(begin..end, &self.dims)?,
            target: self.tar.batch(begin..end, &self.dims)?,
        })
    }

    /// Iterates all batches in index order.
    pub fn batches(&self) -> impl Iterator<Item = Result<Batch, DatasetError>> + '_ {
        (0..self.len()).map(move |index| self.get(index))
    }

    /// Reorders the records with one permutation drawn from `rng`, applied to
    /// every column of both sides.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut order: Vec<usize> = (0..self.size).collect();
        order.shuffle(rng);
        self.inp.permute(&order);
        self.tar.permute(&order);
        tracing::debug!(size = self.size, "shuffled paired dataset");
    }

    /// Shuffles with a PCG32 generator seeded from `seed`.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = create_rng(seed);
        self.shuffle(&mut rng);
    }

    /// Field names per side plus size and batch size.
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            data: SideNames {
                inp: self.inp.field_names().join(", "),
                tar: self.tar.field_names().join(", "),
            },
            size: self.size,
            batch_size: self.batch_size,
        }
    }
}

/// Informational description of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub data: SideNames,
    pub size: usize,
    pub batch_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SideNames {
    pub inp: String,
    pub tar: String,
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    #[serde(rename = "Dataset")]
    dataset: &'a DatasetSummary,
}

impl DatasetSummary {
    /// Renders the summary as a YAML document.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&SummaryDocument { dataset: self })
    }
}

impl fmt::Display for PairedDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let yaml = self.summary().to_yaml().map_err(|_| fmt::Error)?;
        f.write_str(&yaml)
    }
}
