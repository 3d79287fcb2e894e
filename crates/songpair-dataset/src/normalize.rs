//! Fixed-shape padding and truncation.
//!
//! "Normalization" here means shape normalization only: lyric sequences become
//! exactly `L_lyr` tokens and note matrices become exactly `Ci x L_note`
//! events. Lyric padding uses the dataset's pad value; note padding is always
//! an all-zero embedding so that a padded slot decodes to a silent default.

use songpair_spec::{Channel, Dims, NoteEmbedding, NoteMatrix, Token};

/// Pads or truncates a lyric sequence to `dims.lyrics_len` tokens.
///
/// Longer sequences keep their first `lyrics_len` tokens; shorter ones are
/// right-padded with `pad`.
pub fn normalize_lyrics(mut seq: Vec<Token>, pad: Token, dims: &Dims) -> Vec<Token> {
    seq.truncate(dims.lyrics_len);
    seq.resize(dims.lyrics_len, pad);
    seq
}

/// Pads or truncates a note matrix to exactly `dims.channels` channels of
/// `dims.note_len` events.
///
/// Extra channels are dropped from the end (the first `channels` are kept),
/// missing channels are appended as all-zero channels.
pub fn normalize_note(mut matrix: NoteMatrix, dims: &Dims) -> NoteMatrix {
    matrix.truncate(dims.channels);
    for channel in &mut matrix {
        normalize_channel(channel, dims);
    }
    matrix.resize_with(dims.channels, || zero_channel(dims));
    matrix
}

fn normalize_channel(channel: &mut Channel, dims: &Dims) {
    channel.truncate(dims.note_len);
    channel.resize_with(dims.note_len, || zero_event(dims));
}

/// All-zero note embedding of width `E`.
pub fn zero_event(dims: &Dims) -> NoteEmbedding {
    vec![0.0; dims.embedding_width]
}

fn zero_channel(dims: &Dims) -> Channel {
    vec![zero_event(dims); dims.note_len]
}
