//! Decode command implementation
//!
//! Decodes the note matrix and tempo of one record into a MIDI file.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use songpair_backend_midi::{vec2midi, write_midi};
use songpair_spec::{read_records, Config};

use crate::commands::coded;

/// Run the decode command
pub fn run(config: &Config, input: &str, id: Option<&str>, output: &str) -> Result<ExitCode> {
    println!("{} {}", "Decoding:".cyan().bold(), input);

    let records = read_records(Path::new(input)).map_err(coded)?;
    let record = match id {
        Some(id) => records
            .iter()
            .find(|record| record.id == id)
            .with_context(|| format!("No record with id '{}' in {}", id, input))?,
        None => match records.first() {
            Some(record) => record,
            None => bail!("No records in {}", input),
        },
    };

    let score = vec2midi(&record.note, record.tempo, config).map_err(coded)?;
    write_midi(&score, Path::new(output)).map_err(coded)?;

    println!(
        "{} {} ({} notes, {} tracks, {:.1} beats, {:.1} BPM) -> {}",
        "SUCCESS".green().bold(),
        record.id,
        score.note_count(),
        score.track_count(),
        score.end_beat(),
        score.tempo,
        output
    );
    Ok(ExitCode::SUCCESS)
}
