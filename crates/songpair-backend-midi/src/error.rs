//! Error types for score decoding and MIDI output.

use songpair_spec::{NoteField, PipelineError};
use thiserror::Error;

/// Errors that can occur while decoding note vectors into a score.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("input has {got} channels but the score holds at most {max}")]
    TooManyChannels { got: usize, max: usize },

    #[error(
        "decoded note at channel {channel}, event {event} has no raw field {raw_id} (needed for '{field}')"
    )]
    MissingRawField {
        channel: usize,
        event: usize,
        field: &'static str,
        raw_id: usize,
    },

    #[error("feature map has no 'time' field")]
    UnmappedTime,

    #[error("note decoder failed: {0}")]
    Decoder(String),
}

impl DecodeError {
    pub(crate) fn missing(channel: usize, event: usize, field: NoteField, raw_id: usize) -> Self {
        DecodeError::MissingRawField {
            channel,
            event,
            field: field.name(),
            raw_id,
        }
    }
}

impl PipelineError for DecodeError {
    fn code(&self) -> &'static str {
        match self {
            DecodeError::TooManyChannels { .. } => "DECODE_001",
            DecodeError::MissingRawField { .. } => "DECODE_002",
            DecodeError::UnmappedTime => "DECODE_003",
            DecodeError::Decoder(_) => "DECODE_004",
        }
    }

    fn category(&self) -> &'static str {
        "midi"
    }
}

/// Errors that can occur while serializing a score to a MIDI file.
#[derive(Debug, Error)]
pub enum MidiWriteError {
    #[error("tempo must be a positive BPM, got {0}")]
    InvalidTempo(f64),

    #[error("score has {0} tracks, MIDI supports at most 16 channels")]
    TooManyTracks(usize),

    #[error("MIDI encoding failed: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError for MidiWriteError {
    fn code(&self) -> &'static str {
        match self {
            MidiWriteError::InvalidTempo(_) => "MIDI_001",
            MidiWriteError::TooManyTracks(_) => "MIDI_002",
            MidiWriteError::Encode(_) => "MIDI_003",
            MidiWriteError::Io(_) => "MIDI_004",
        }
    }

    fn category(&self) -> &'static str {
        "midi"
    }
}
