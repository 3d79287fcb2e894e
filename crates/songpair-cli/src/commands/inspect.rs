//! Inspect command implementation
//!
//! Loads a record file into the translator and autoencoder datasets and
//! prints their summaries and first batch shapes.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use songpair_dataset::{load, PairedDataset, SideBatch};
use songpair_spec::Config;

use crate::commands::coded;

/// Run the inspect command
pub fn run(config: &Config, input: &str, seed: Option<u64>) -> Result<ExitCode> {
    println!("{} {}", "Inspecting:".cyan().bold(), input);

    let mut datasets = load(Path::new(input), config).map_err(coded)?;
    if let Some(seed) = seed {
        datasets.translator.shuffle_seeded(seed);
        datasets.autoencoder.shuffle_seeded(seed);
    }

    for (label, dataset) in [
        ("translator", &datasets.translator),
        ("autoencoder", &datasets.autoencoder),
    ] {
        println!("\n{}", label.bold());
        print!("{}", dataset);
        println!("  {} {}", "batches:".dimmed(), dataset.len());
        if let Some(shapes) = first_batch_shapes(dataset)? {
            println!("  {} {}", "first batch:".dimmed(), shapes);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn first_batch_shapes(dataset: &PairedDataset) -> Result<Option<String>> {
    if dataset.is_empty() {
        return Ok(None);
    }
    let batch = dataset.get(0).map_err(coded)?;
    Ok(Some(format!(
        "{} -> {}",
        describe(&batch.input),
        describe(&batch.target)
    )))
}

fn describe(side: &SideBatch) -> String {
    match side {
        SideBatch::Lyrics(lyrics) => format!("lyrics {:?}", lyrics.shape()),
        SideBatch::NoteTempo { note, tempo } => {
            format!("note {:?}, tempo {:?}", note.shape(), tempo.shape())
        }
    }
}
