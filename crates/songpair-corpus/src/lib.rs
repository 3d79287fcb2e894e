//! SongPair Corpus Builder
//!
//! Finds lyric/note source files that share a stem, encodes them into
//! records, and writes train and validation record files.
//!
//! The lexicon and encoders are built by the caller and handed to
//! [`CorpusBuilder::new`]:
//!
//! ```no_run
//! use std::path::Path;
//! use songpair_corpus::{find_pairs, CorpusBuilder, CsvNoteEncoder, Lexicon, LexiconLyricsEncoder};
//! use songpair_spec::Config;
//!
//! let config = Config::default();
//! let lexicon = Lexicon::load(&config.lyrics.lex).unwrap();
//! let builder = CorpusBuilder::new(LexiconLyricsEncoder::new(lexicon), CsvNoteEncoder::new(&config));
//!
//! let pairs = find_pairs("data/seg/*.txt", "data/csv/*.csv", None).unwrap();
//! builder
//!     .build(pairs, Path::new("data/train.jsonl"), Path::new("data/valid.jsonl"))
//!     .unwrap();
//! ```

pub mod builder;
pub mod discover;
pub mod error;
pub mod lexicon;
pub mod lyrics;
pub mod notes;

pub use builder::{CorpusBuilder, CorpusStats, DEFAULT_SEED, DEFAULT_SPLIT};
pub use discover::{find_pairs, SourcePair, DEFAULT_LYRICS_PATTERN, DEFAULT_NOTES_PATTERN};
pub use error::CorpusError;
pub use lexicon::Lexicon;
pub use lyrics::{LexiconLyricsEncoder, LyricsEncoder};
pub use notes::{CsvNoteEncoder, NoteEncoder, Snippet};
