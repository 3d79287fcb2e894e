//! SongPair MIDI Backend
//!
//! Decodes per-channel note embeddings into a multi-track [`Score`] and
//! writes scores as Standard MIDI Files.
//!
//! # Example
//!
//! ```
//! use songpair_backend_midi::{render_midi, vec2midi};
//! use songpair_spec::Config;
//!
//! let mut config = Config::default();
//! config.music.channels = 2;
//!
//! // One channel, one note: time delta 0, 1 beat, middle C, velocity 100.
//! let notes = vec![vec![vec![0.0, 1.0, 60.0, 100.0]]];
//! let score = vec2midi(&notes, 1.0, &config).unwrap();
//! assert_eq!(score.track_count(), 2);
//! assert!(score.tracks[1].is_empty());
//!
//! let bytes = render_midi(&score).unwrap();
//! assert_eq!(&bytes[..4], b"MThd");
//! ```

pub mod decode;
pub mod error;
pub mod score;
pub mod smf;

pub use decode::{vec2midi, IndexedNoteDecoder, NoteDecoder, RawNote, ScoreDecoder};
pub use error::{DecodeError, MidiWriteError};
pub use score::{NoteEvent, Score, Track};
pub use smf::{render_midi, write_midi, TICKS_PER_QUARTER};
