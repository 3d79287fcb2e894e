//! CLI argument definitions for the SongPair command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};

use songpair_corpus::{DEFAULT_LYRICS_PATTERN, DEFAULT_NOTES_PATTERN, DEFAULT_SEED, DEFAULT_SPLIT};

/// SongPair - Paired lyrics/music dataset tooling
#[derive(Parser)]
#[command(name = "songpair")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Config file (YAML, or JSON with a .json extension); built-in defaults if omitted
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Build train/validation record files from paired lyric and note sources
    Build {
        /// Train record file
        #[arg(short, long, default_value = "data/train.jsonl")]
        train: String,

        /// Validation record file
        #[arg(short, long, default_value = "data/valid.jsonl")]
        valid: String,

        /// Validation fraction divisor (1/split of the pairs are held out)
        #[arg(short, long, default_value_t = DEFAULT_SPLIT)]
        split: usize,

        /// Seed for the train/validation shuffle
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Glob for lyric files
        #[arg(long, default_value = DEFAULT_LYRICS_PATTERN)]
        lyrics: String,

        /// Glob for note table files
        #[arg(long, default_value = DEFAULT_NOTES_PATTERN)]
        notes: String,

        /// Use at most this many pairs
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Load a record file and print the translator and autoencoder datasets
    Inspect {
        /// Record file (line-delimited JSON)
        input: String,

        /// Shuffle with this seed before printing the first batch shapes
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Decode one record's notes into a MIDI file
    Decode {
        /// Record file (line-delimited JSON)
        input: String,

        /// Record id to decode (default: first record)
        #[arg(long)]
        id: Option<String>,

        /// Output MIDI file
        #[arg(short, long)]
        output: String,
    },
}
