//! SongPair Dataset - Fixed-Shape Batching for Paired Lyrics/Music Examples
//!
//! This crate turns variable-length training records into fixed-size tensors
//! and keeps an input side and a target side aligned while they are sliced
//! into batches and reshuffled.
//!
//! # Example
//!
//! ```
//! use songpair_dataset::{Bundle, PairedDataset};
//! use songpair_spec::Config;
//!
//! let config = Config::default();
//! let inp = Bundle::Lyrics { lyrics: vec![vec![1, 2, 3]; 7] };
//! let tar = Bundle::NoteTempo {
//!     note: vec![Vec::new(); 7],
//!     tempo: vec![1.0; 7],
//! };
//!
//! let mut dataset = PairedDataset::new(inp, tar, 3, config.dims()).unwrap();
//! assert_eq!(dataset.len(), 3);
//!
//! dataset.shuffle_seeded(42);
//! let last = dataset.get(2).unwrap();
//! assert_eq!(last.input.rows(), 1);
//! assert!(dataset.get(3).is_err());
//! ```
//!
//! # Module Structure
//!
//! - [`normalize`]: lyric and note padding/truncation
//! - [`bundle`]: one side of a dataset and its batch shapes
//! - [`dataset`]: the paired dataset
//! - [`loader`]: translator/autoencoder datasets from a record file

pub mod bundle;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod normalize;

pub use bundle::{Bundle, SideBatch};
pub use dataset::{Batch, DatasetSummary, PairedDataset, SideNames};
pub use error::DatasetError;
pub use loader::{from_records, load, TaskDatasets};
pub use normalize::{normalize_lyrics, normalize_note, zero_event};
