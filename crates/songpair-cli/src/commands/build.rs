//! Build command implementation
//!
//! Pairs lyric and note sources, then writes the train and validation record files.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use songpair_corpus::{
    find_pairs, CorpusBuilder, CsvNoteEncoder, Lexicon, LexiconLyricsEncoder, DEFAULT_SEED,
};
use songpair_spec::Config;

use crate::commands::coded;

/// Source globs and output files for one build.
#[derive(Debug, Clone)]
pub struct BuildArgs<'a> {
    pub train: &'a str,
    pub valid: &'a str,
    pub split: usize,
    pub seed: u64,
    pub lyrics: &'a str,
    pub notes: &'a str,
    pub limit: Option<usize>,
}

/// Run the build command
pub fn run(config: &Config, args: &BuildArgs<'_>) -> Result<ExitCode> {
    println!(
        "{} {} + {}",
        "Building corpus:".cyan().bold(),
        args.lyrics,
        args.notes
    );

    let lexicon = Lexicon::load(&config.lyrics.lex).map_err(coded)?;
    let builder = CorpusBuilder::new(LexiconLyricsEncoder::new(lexicon), CsvNoteEncoder::new(config))
        .with_split(args.split)
        .map_err(coded)?
        .with_seed(args.seed);

    let pairs = find_pairs(args.lyrics, args.notes, args.limit).map_err(coded)?;
    if pairs.is_empty() {
        println!("{} No paired sources found", "!".yellow());
        return Ok(ExitCode::from(1));
    }

    let stats = builder
        .build(pairs, Path::new(args.train), Path::new(args.valid))
        .map_err(coded)?;

    println!(
        "{} {} records from {} files -> {}",
        "SUCCESS".green().bold(),
        stats.train_records,
        stats.train_files,
        args.train
    );
    println!(
        "{} {} records from {} files -> {}",
        "SUCCESS".green().bold(),
        stats.valid_records,
        stats.valid_files,
        args.valid
    );
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use songpair_spec::read_records;

    #[test]
    fn test_build_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("seg")).unwrap();
        std::fs::create_dir_all(root.join("csv")).unwrap();
        std::fs::write(root.join("lex.json"), r#"{"la": 1}"#).unwrap();
        for name in ["one", "two"] {
            std::fs::write(root.join(format!("seg/{}.txt", name)), "la la").unwrap();
            std::fs::write(
                root.join(format!("csv/{}.csv", name)),
                "track,delta,duration,pitch,volume,tempo\n0,0,1,60,100,120\n",
            )
            .unwrap();
        }

        let mut config = Config::default();
        config.lyrics.lex = root.join("lex.json");
        let train = root.join("train.jsonl");
        let valid = root.join("valid.jsonl");
        let lyrics = format!("{}/seg/*.txt", root.display());
        let notes = format!("{}/csv/*.csv", root.display());
        let train_path = train.display().to_string();
        let valid_path = valid.display().to_string();
        let args = BuildArgs {
            train: &train_path,
            valid: &valid_path,
            split: 2,
            seed: DEFAULT_SEED,
            lyrics: &lyrics,
            notes: &notes,
            limit: None,
        };

        let code = run(&config, &args).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(read_records(&train).unwrap().len(), 1);
        assert_eq!(read_records(&valid).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_lexicon() {
        let mut config = Config::default();
        config.lyrics.lex = "/nonexistent/lex.json".into();
        let args = BuildArgs {
            train: "train.jsonl",
            valid: "valid.jsonl",
            split: 4,
            seed: DEFAULT_SEED,
            lyrics: "*.txt",
            notes: "*.csv",
            limit: None,
        };
        let err = run(&config, &args).unwrap_err();
        assert!(err.to_string().starts_with("[CORPUS_002]"));
    }
}
