//! Note tables to fixed-length snippets.
//!
//! A note table is a CSV file with a header naming the columns
//! `track, delta, duration, pitch, volume, tempo` in any order:
//!
//! ```text
//! track,delta,duration,pitch,volume,tempo
//! 0,0,1,60,100,120
//! 0,1,1,62,100,120
//! 1,0,2,48,80,120
//! ```
//!
//! Rows are grouped by track (ascending track number, file order within a
//! track). Snippet `j` takes events `[j*L, (j+1)*L)` of every track, one
//! channel per track; the table yields as many snippets as its longest track
//! needs.

use std::collections::BTreeMap;
use std::path::Path;

use songpair_spec::{Config, FeatureMap, NoteEmbedding, NoteField, NoteMatrix};

use crate::error::CorpusError;

/// One note snippet and its tempo multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct Snippet {
    pub note: NoteMatrix,
    pub tempo: f32,
}

/// Converts a note source file into snippets.
pub trait NoteEncoder {
    fn encode_file(&self, path: &Path) -> Result<Vec<Snippet>, CorpusError>;
}

/// Reads CSV note tables and lays note fields out at their `feat2id` positions.
#[derive(Debug, Clone)]
pub struct CsvNoteEncoder {
    feat2id: FeatureMap,
    embedding_width: usize,
    snippet_len: usize,
    default_tempo: f32,
}

const COLUMNS: [&str; 6] = ["track", "delta", "duration", "pitch", "volume", "tempo"];

#[derive(Debug, Clone, Copy)]
struct Row {
    track: u32,
    fields: [f32; 4],
    tempo: f32,
}

impl CsvNoteEncoder {
    pub fn new(config: &Config) -> Self {
        Self {
            feat2id: config.music.feat2id.clone(),
            embedding_width: config.music.embedding_width,
            snippet_len: config.music.length.max(1),
            default_tempo: config.tempo.default,
        }
    }

    /// Parses note table text. `path` is only used in error messages.
    pub fn encode_str(&self, text: &str, path: &Path) -> Result<Vec<Snippet>, CorpusError> {
        let rows = parse_table(text, path)?;
        let Some(first) = rows.first() else {
            return Ok(Vec::new());
        };
        let tempo = first.tempo / self.default_tempo;

        let mut tracks: BTreeMap<u32, Vec<NoteEmbedding>> = BTreeMap::new();
        for row in &rows {
            tracks
                .entry(row.track)
                .or_default()
                .push(self.embed(&row.fields));
        }

        let longest = tracks.values().map(Vec::len).max().unwrap_or(0);
        let count = longest.div_ceil(self.snippet_len);
        let snippets = (0..count)
            .map(|j| {
                let begin = j * self.snippet_len;
                let note = tracks
                    .values()
                    .map(|events| {
                        let end = (begin + self.snippet_len).min(events.len());
                        events.get(begin..end).map(<[_]>::to_vec).unwrap_or_default()
                    })
                    .collect();
                Snippet { note, tempo }
            })
            .collect();
        Ok(snippets)
    }

    fn embed(&self, fields: &[f32; 4]) -> NoteEmbedding {
        let mut embedding = vec![0.0; self.embedding_width];
        for (field, id) in self.feat2id.iter() {
            if let Some(slot) = embedding.get_mut(id) {
                *slot = fields[field_index(field)];
            }
        }
        embedding
    }
}

impl NoteEncoder for CsvNoteEncoder {
    fn encode_file(&self, path: &Path) -> Result<Vec<Snippet>, CorpusError> {
        let text = std::fs::read_to_string(path).map_err(|e| CorpusError::io(path, e))?;
        self.encode_str(&text, path)
    }
}

fn field_index(field: NoteField) -> usize {
    match field {
        NoteField::Time => 0,
        NoteField::Duration => 1,
        NoteField::Pitch => 2,
        NoteField::Volume => 3,
    }
}

fn parse_table(text: &str, path: &Path) -> Result<Vec<Row>, CorpusError> {
    let error = |line: usize, reason: String| CorpusError::NoteTable {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let Some((header_line, header)) = lines.next() else {
        return Ok(Vec::new());
    };
    let names: Vec<&str> = header.split(',').map(str::trim).collect();
    let mut position = [0usize; 6];
    for (slot, column) in position.iter_mut().zip(COLUMNS) {
        *slot = names
            .iter()
            .position(|name| name.eq_ignore_ascii_case(column))
            .ok_or_else(|| error(header_line, format!("missing column '{}'", column)))?;
    }

    let mut rows = Vec::new();
    for (line, content) in lines {
        let cells: Vec<&str> = content.split(',').map(str::trim).collect();
        if cells.len() != names.len() {
            return Err(error(
                line,
                format!("expected {} cells, found {}", names.len(), cells.len()),
            ));
        }
        let number = |column: usize| -> Result<f32, CorpusError> {
            let cell = cells[position[column]];
            cell.parse::<f32>()
                .map_err(|_| error(line, format!("'{}' is not a number ({})", cell, COLUMNS[column])))
        };

        let track = cells[position[0]];
        let track = track
            .parse::<u32>()
            .map_err(|_| error(line, format!("'{}' is not a track number", track)))?;
        rows.push(Row {
            track,
            fields: [number(1)?, number(2)?, number(3)?, number(4)?],
            tempo: number(5)?,
        });
    }
    Ok(rows)
}
