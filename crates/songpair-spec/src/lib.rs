//! SongPair Shared Types
//!
//! This crate holds the types every stage of the SongPair pipeline agrees on:
//! the static [`Config`], the [`Record`] produced by the corpus builder and
//! consumed by the dataset, and the coded error trait the CLI reports through.
//!
//! # Example
//!
//! ```
//! use songpair_spec::{Config, NoteField};
//!
//! let config = Config::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.music.feat2id.raw_id(NoteField::Time), Some(0));
//! assert_eq!(config.dims().channels, 4);
//! ```
//!
//! # Modules
//!
//! - [`config`]: configuration sections, `feat2id`, fixed dimensions
//! - [`record`]: training records and JSONL I/O
//! - [`error`]: error enums and the [`PipelineError`] trait
//! - [`rng`]: seeded PCG32 construction

pub mod config;
pub mod error;
pub mod record;
pub mod rng;

pub use config::{
    Config, Dims, FeatureMap, LyricsConfig, MusicConfig, NoteField, TaskConfig, TempoConfig,
};
pub use error::{ConfigError, PipelineError, RecordError};
pub use record::{
    parse_records, read_records, write_record, Channel, NoteEmbedding, NoteMatrix, Record, Token,
};
pub use rng::create_rng;
