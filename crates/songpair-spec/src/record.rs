//! Training records and their line-delimited JSON form.
//!
//! A record pairs one lyric token sequence with one note snippet:
//!
//! ```text
//! {"id":"3-0","lyrics":[12,4,9],"name":"song","note":[[[0.5,1.0,60.0,80.0]]],"tempo":1.0}
//! ```
//!
//! Record files hold one record per line. Keys are written sorted and
//! non-ASCII text is written as-is.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Lyric token id.
pub type Token = i64;

/// One note event as a numeric vector.
pub type NoteEmbedding = Vec<f32>;

/// Ordered note events of one channel.
pub type Channel = Vec<NoteEmbedding>;

/// Ordered channels of one snippet.
pub type NoteMatrix = Vec<Channel>;

/// One training example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique id, `<file index>-<snippet index>`.
    pub id: String,
    /// Stem of the source files the record came from.
    pub name: String,
    pub lyrics: Vec<Token>,
    pub note: NoteMatrix,
    /// Tempo multiplier relative to `tempo.default`.
    pub tempo: f32,
}

impl Record {
    /// Parses one record from a JSON line.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the record as a single JSON line with sorted keys.
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        // Going through `Value` sorts object keys (serde_json's default map is ordered).
        let value = serde_json::to_value(self)?;
        serde_json::to_string(&value)
    }
}

/// Reads every record from a line-delimited JSON file.
pub fn read_records(path: &Path) -> Result<Vec<Record>, RecordError> {
    tracing::info!("Load data from {}", path.display());
    let file = File::open(path)?;
    parse_records(BufReader::new(file))
}

/// Parses records from any line reader. Blank lines are skipped.
pub fn parse_records<R: BufRead>(reader: R) -> Result<Vec<Record>, RecordError> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = Record::from_json(&line).map_err(|source| RecordError::Malformed {
            line: index + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Writes one record as a JSON line.
pub fn write_record<W: Write>(writer: &mut W, record: &Record) -> Result<(), RecordError> {
    let line = record
        .to_json_line()
        .map_err(|source| RecordError::Serialize {
            id: record.id.clone(),
            source,
        })?;
    writeln!(writer, "{}", line)?;
    Ok(())
}
