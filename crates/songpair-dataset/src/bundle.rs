//! One side (input or target) of a paired dataset.
//!
//! A bundle is a set of equal-length parallel columns. Which columns it holds
//! decides the shape of the batches it produces:
//!
//! | Variant     | Columns               | Batch shape                         |
//! |-------------|-----------------------|-------------------------------------|
//! | `Lyrics`    | lyrics                | `[rows, L_lyr]`                     |
//! | `NoteTempo` | note, tempo           | `([rows, Ci, L_note, E], [rows])`   |
//! | `Both`      | lyrics, note, tempo   | same as `NoteTempo`                 |

use std::ops::Range;

use ndarray::{Array1, Array2, Array4};
use songpair_spec::{Dims, NoteMatrix, Record, Token};

use crate::error::DatasetError;
use crate::normalize::{normalize_lyrics, normalize_note};

/// Columns carried by one side of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Bundle {
    Lyrics {
        lyrics: Vec<Vec<Token>>,
    },
    NoteTempo {
        note: Vec<NoteMatrix>,
        tempo: Vec<f32>,
    },
    Both {
        lyrics: Vec<Vec<Token>>,
        note: Vec<NoteMatrix>,
        tempo: Vec<f32>,
    },
}

/// Batch slice of one bundle.
#[derive(Debug, Clone, PartialEq)]
pub enum SideBatch {
    /// Lyric tokens, `[rows, L_lyr]`.
    ///
    /// Ids are stored as `f32`, which is exact for magnitudes up to 2^24.
    Lyrics(Array2<f32>),
    /// Note embeddings `[rows, Ci, L_note, E]` and tempo multipliers `[rows]`.
    NoteTempo {
        note: Array4<f32>,
        tempo: Array1<f32>,
    },
}

impl SideBatch {
    /// Number of records in the batch.
    pub fn rows(&self) -> usize {
        match self {
            SideBatch::Lyrics(lyrics) => lyrics.nrows(),
            SideBatch::NoteTempo { tempo, .. } => tempo.len(),
        }
    }

    pub fn as_lyrics(&self) -> Option<&Array2<f32>> {
        match self {
            SideBatch::Lyrics(lyrics) => Some(lyrics),
            SideBatch::NoteTempo { .. } => None,
        }
    }

    pub fn as_note_tempo(&self) -> Option<(&Array4<f32>, &Array1<f32>)> {
        match self {
            SideBatch::Lyrics(_) => None,
            SideBatch::NoteTempo { note, tempo } => Some((note, tempo)),
        }
    }
}

impl Bundle {
    /// Lyrics column of a set of records.
    pub fn lyrics_from_records(records: &[Record]) -> Self {
        Bundle::Lyrics {
            lyrics: records.iter().map(|r| r.lyrics.clone()).collect(),
        }
    }

    /// Note and tempo columns of a set of records.
    pub fn note_tempo_from_records(records: &[Record]) -> Self {
        Bundle::NoteTempo {
            note: records.iter().map(|r| r.note.clone()).collect(),
            tempo: records.iter().map(|r| r.tempo).collect(),
        }
    }

    /// Column names in declaration order.
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            Bundle::Lyrics { .. } => &["lyrics"],
            Bundle::NoteTempo { .. } => &["note", "tempo"],
            Bundle::Both { .. } => &["lyrics", "note", "tempo"],
        }
    }

    /// Number of records, read from the first column.
    pub fn len(&self) -> usize {
        match self {
            Bundle::Lyrics { lyrics } | Bundle::Both { lyrics, .. } => lyrics.len(),
            Bundle::NoteTempo { note, .. } => note.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn lyrics(&self) -> Option<&[Vec<Token>]> {
        match self {
            Bundle::Lyrics { lyrics } | Bundle::Both { lyrics, .. } => Some(lyrics),
            Bundle::NoteTempo { .. } => None,
        }
    }

    pub fn note(&self) -> Option<&[NoteMatrix]> {
        match self {
            Bundle::NoteTempo { note, .. } | Bundle::Both { note, .. } => Some(note),
            Bundle::Lyrics { .. } => None,
        }
    }

    pub fn tempo(&self) -> Option<&[f32]> {
        match self {
            Bundle::NoteTempo { tempo, .. } | Bundle::Both { tempo, .. } => Some(tempo),
            Bundle::Lyrics { .. } => None,
        }
    }

    /// Returns the shared column length, or the first column that disagrees.
    pub(crate) fn checked_len(&self) -> Result<usize, DatasetError> {
        let expected = self.len();
        let columns = [
            ("lyrics", self.lyrics().map(<[_]>::len)),
            ("note", self.note().map(<[_]>::len)),
            ("tempo", self.tempo().map(<[_]>::len)),
        ];
        for (column, got) in columns {
            if let Some(got) = got.filter(|&got| got != expected) {
                return Err(DatasetError::ColumnLengthMismatch {
                    column,
                    expected,
                    got,
                });
            }
        }
        Ok(expected)
    }

    /// Pads/truncates every lyrics and note entry in place.
    pub(crate) fn normalize(&mut self, pad: Token, dims: &Dims) {
        if let Bundle::Lyrics { lyrics } | Bundle::Both { lyrics, .. } = self {
            for seq in lyrics.iter_mut() {
                *seq = normalize_lyrics(std::mem::take(seq), pad, dims);
            }
        }
        if let Bundle::NoteTempo { note, .. } | Bundle::Both { note, .. } = self {
            for matrix in note.iter_mut() {
                *matrix = normalize_note(std::mem::take(matrix), dims);
            }
        }
    }

    /// Reorders every column so that new position `k` holds old `order[k]`.
    ///
    /// `order` must be a permutation of `0..len`.
    pub(crate) fn permute(&mut self, order: &[usize]) {
        match self {
            Bundle::Lyrics { lyrics } => permute(lyrics, order),
            Bundle::NoteTempo { note, tempo } => {
                permute(note, order);
                permute(tempo, order);
            }
            Bundle::Both {
                lyrics,
                note,
                tempo,
            } => {
                permute(lyrics, order);
                permute(note, order);
                permute(tempo, order);
            }
        }
    }

    /// Slices `rows` out of the normalized columns as tensors.
    pub(crate) fn batch(&self, rows: Range<usize>, dims: &Dims) -> Result<SideBatch, DatasetError> {
        match self {
            Bundle::Lyrics { lyrics } => Ok(SideBatch::Lyrics(lyrics_tensor(&lyrics[rows], dims)?)),
            Bundle::NoteTempo { note, tempo } | Bundle::Both { note, tempo, .. } => {
                Ok(SideBatch::NoteTempo {
                    note: note_tensor(&note[rows.clone()], rows.start, dims)?,
                    tempo: Array1::from(tempo[rows].to_vec()),
                })
            }
        }
    }
}

fn permute<T>(column: &mut Vec<T>, order: &[usize]) {
    let mut slots: Vec<Option<T>> = std::mem::take(column).into_iter().map(Some).collect();
    *column = order.iter().filter_map(|&i| slots[i].take()).collect();
}

fn lyrics_tensor(lyrics: &[Vec<Token>], dims: &Dims) -> Result<Array2<f32>, DatasetError> {
    let flat: Vec<f32> = lyrics.iter().flatten().map(|&token| token as f32).collect();
    Ok(Array2::from_shape_vec((lyrics.len(), dims.lyrics_len), flat)?)
}

fn note_tensor(note: &[NoteMatrix], first_record: usize, dims: &Dims) -> Result<Array4<f32>, DatasetError> {
    let shape = (note.len(), dims.channels, dims.note_len, dims.embedding_width);
    let mut flat = Vec::with_capacity(shape.0 * shape.1 * shape.2 * shape.3);
    for (offset, matrix) in note.iter().enumerate() {
        for (channel, events) in matrix.iter().enumerate() {
            for (event, embedding) in events.iter().enumerate() {
                if embedding.len() != dims.embedding_width {
                    return Err(DatasetError::EmbeddingWidth {
                        record: first_record + offset,
                        channel,
                        event,
                        expected: dims.embedding_width,
                        got: embedding.len(),
                    });
                }
                flat.extend_from_slice(embedding);
            }
        }
    }
    Ok(Array4::from_shape_vec(shape, flat)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dims() -> Dims {
        Dims {
            lyrics_len: 3,
            channels: 2,
            note_len: 2,
            embedding_width: 2,
        }
    }

    #[test]
    fn test_checked_len_reports_short_column() {
        let bundle = Bundle::NoteTempo {
            note: vec![vec![], vec![]],
            tempo: vec![1.0],
        };
        let err = bundle.checked_len().unwrap_err();
        assert!(matches!(
            err,
            DatasetError::ColumnLengthMismatch {
                column: "tempo",
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn test_permute_moves_every_column() {
        let mut bundle = Bundle::Both {
            lyrics: vec![vec![0], vec![1], vec![2]],
            note: vec![vec![vec![vec![0.0]]], vec![vec![vec![1.0]]], vec![vec![vec![2.0]]]],
            tempo: vec![0.0, 1.0, 2.0],
        };
        bundle.permute(&[2, 0, 1]);
        assert_eq!(bundle.lyrics().unwrap(), &[vec![2], vec![0], vec![1]]);
        assert_eq!(bundle.tempo().unwrap(), &[2.0, 0.0, 1.0]);
        assert_eq!(bundle.note().unwrap()[0][0][0], vec![2.0]);
    }

    #[test]
    fn test_note_batch_shape() {
        let mut bundle = Bundle::NoteTempo {
            note: vec![vec![vec![vec![1.0, 2.0]]], vec![]],
            tempo: vec![0.5, 1.5],
        };
        bundle.normalize(0, &dims());
        let batch = bundle.batch(0..2, &dims()).unwrap();
        let (note, tempo) = batch.as_note_tempo().unwrap();
        assert_eq!(note.shape(), &[2, 2, 2, 2]);
        assert_eq!(note[[0, 0, 0, 1]], 2.0);
        assert_eq!(note[[1, 1, 1, 1]], 0.0);
        assert_eq!(tempo.to_vec(), vec![0.5, 1.5]);
        assert_eq!(batch.rows(), 2);
    }

    #[test]
    fn test_lyrics_batch_uses_pad_value() {
        let mut bundle = Bundle::Lyrics {
            lyrics: vec![vec![7], vec![1, 2, 3, 4]],
        };
        bundle.normalize(-1, &dims());
        let batch = bundle.batch(0..2, &dims()).unwrap();
        let lyrics = batch.as_lyrics().unwrap();
        assert_eq!(lyrics.row(0).to_vec(), vec![7.0, -1.0, -1.0]);
        assert_eq!(lyrics.row(1).to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_lyrics_batch_keeps_large_ids_exact() {
        let limit: Token = 1 << 24;
        let mut bundle = Bundle::Lyrics {
            lyrics: vec![vec![limit, limit - 1, -limit]],
        };
        bundle.normalize(0, &dims());
        let batch = bundle.batch(0..1, &dims()).unwrap();
        let row: Vec<Token> = batch
            .as_lyrics()
            .unwrap()
            .row(0)
            .iter()
            .map(|&value| value as Token)
            .collect();
        assert_eq!(row, vec![limit, limit - 1, -limit]);
    }

    #[test]
    fn test_wrong_embedding_width_is_reported() {
        let mut bundle = Bundle::NoteTempo {
            note: vec![vec![], vec![vec![vec![1.0, 2.0, 3.0]]]],
            tempo: vec![1.0, 1.0],
        };
        bundle.normalize(0, &dims());
        let err = bundle.batch(1..2, &dims()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::EmbeddingWidth {
                record: 1,
                channel: 0,
                event: 0,
                expected: 2,
                got: 3
            }
        ));
    }
}
