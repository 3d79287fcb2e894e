//! Train/validation corpus writer.
//!
//! Pairs are shuffled with a fixed seed, the first `n / split` go to the
//! validation file and the rest to the train file. Every note snippet of a
//! pair becomes one record carrying the pair's full lyric sequence.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::seq::SliceRandom;
use songpair_spec::{create_rng, write_record, Record};

use crate::discover::SourcePair;
use crate::error::CorpusError;
use crate::lyrics::LyricsEncoder;
use crate::notes::NoteEncoder;

pub const DEFAULT_SPLIT: usize = 4;
pub const DEFAULT_SEED: u64 = 301;

/// Counts written by [`CorpusBuilder::build`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorpusStats {
    pub train_files: usize,
    pub train_records: usize,
    pub valid_files: usize,
    pub valid_records: usize,
}

pub struct CorpusBuilder<L, N> {
    lyrics: L,
    notes: N,
    split: usize,
    seed: u64,
}

impl<L: LyricsEncoder, N: NoteEncoder> CorpusBuilder<L, N> {
    pub fn new(lyrics: L, notes: N) -> Self {
        Self {
            lyrics,
            notes,
            split: DEFAULT_SPLIT,
            seed: DEFAULT_SEED,
        }
    }

    /// Sets the validation divisor: `1 / split` of the pairs are held out.
    pub fn with_split(mut self, split: usize) -> Result<Self, CorpusError> {
        if split == 0 {
            return Err(CorpusError::InvalidSplit);
        }
        self.split = split;
        Ok(self)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Shuffles `pairs` and returns `(train, valid)`.
    pub fn partition(&self, mut pairs: Vec<SourcePair>) -> (Vec<SourcePair>, Vec<SourcePair>) {
        let mut rng = create_rng(self.seed);
        pairs.shuffle(&mut rng);
        let train = pairs.split_off(pairs.len() / self.split);
        (train, pairs)
    }

    /// Encodes one pair into records `<id>-0`, `<id>-1`, ...
    pub fn records(&self, pair: &SourcePair) -> Result<Vec<Record>, CorpusError> {
        let lyrics = self.lyrics.encode_file(&pair.lyrics)?;
        let snippets = self.notes.encode_file(&pair.notes)?;
        Ok(snippets
            .into_iter()
            .enumerate()
            .map(|(j, snippet)| Record {
                id: format!("{}-{}", pair.id, j),
                name: pair.name.clone(),
                lyrics: lyrics.clone(),
                note: snippet.note,
                tempo: snippet.tempo,
            })
            .collect())
    }

    /// Splits `pairs` and writes both record files.
    pub fn build(
        &self,
        pairs: Vec<SourcePair>,
        train_path: &Path,
        valid_path: &Path,
    ) -> Result<CorpusStats, CorpusError> {
        let total = pairs.len();
        let (train, valid) = self.partition(pairs);
        tracing::info!(
            train = train.len(),
            valid = valid.len(),
            split = self.split,
            "partitioned source pairs"
        );

        let mut done = 0;
        let train_records = self.write_file(&train, train_path, &mut done, total)?;
        let valid_records = self.write_file(&valid, valid_path, &mut done, total)?;

        Ok(CorpusStats {
            train_files: train.len(),
            train_records,
            valid_files: valid.len(),
            valid_records,
        })
    }

    fn write_file(
        &self,
        pairs: &[SourcePair],
        path: &Path,
        done: &mut usize,
        total: usize,
    ) -> Result<usize, CorpusError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CorpusError::io(parent, e))?;
        }
        let file = File::create(path).map_err(|e| CorpusError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        let count = self.write_pairs(pairs, &mut writer, done, total)?;
        writer.flush().map_err(|e| CorpusError::io(path, e))?;
        tracing::info!(records = count, "wrote {}", path.display());
        Ok(count)
    }

    fn write_pairs<W: Write>(
        &self,
        pairs: &[SourcePair],
        writer: &mut W,
        done: &mut usize,
        total: usize,
    ) -> Result<usize, CorpusError> {
        let mut count = 0;
        for pair in pairs {
            for record in self.records(pair)? {
                write_record(writer, &record)?;
                count += 1;
            }
            *done += 1;
            tracing::debug!(name = %pair.name, "{:>5}/{:>5}", done, total);
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::Snippet;
    use pretty_assertions::assert_eq;
    use songpair_spec::{parse_records, Token};
    use std::path::PathBuf;

    /// Lyrics are the file name's length; notes are one snippet per char.
    struct FakeLyrics;
    struct FakeNotes;

    impl LyricsEncoder for FakeLyrics {
        fn encode(&self, text: &str) -> Vec<Token> {
            vec![text.len() as Token]
        }

        fn encode_file(&self, path: &Path) -> Result<Vec<Token>, CorpusError> {
            Ok(self.encode(&path.display().to_string()))
        }
    }

    impl NoteEncoder for FakeNotes {
        fn encode_file(&self, path: &Path) -> Result<Vec<Snippet>, CorpusError> {
            let stem = path.file_stem().unwrap().to_str().unwrap();
            Ok(stem
                .chars()
                .map(|c| Snippet {
                    note: vec![vec![vec![c as u32 as f32]]],
                    tempo: 1.0,
                })
                .collect())
        }
    }

    fn pairs(names: &[&str]) -> Vec<SourcePair> {
        names
            .iter()
            .enumerate()
            .map(|(id, name)| SourcePair {
                id,
                name: name.to_string(),
                lyrics: PathBuf::from(format!("{}.txt", name)),
                notes: PathBuf::from(format!("{}.csv", name)),
            })
            .collect()
    }

    #[test]
    fn test_partition_sizes() {
        let builder = CorpusBuilder::new(FakeLyrics, FakeNotes);
        let names: Vec<String> = (0..10).map(|i| format!("s{}", i)).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();

        let (train, valid) = builder.partition(pairs(&names));
        assert_eq!(valid.len(), 2);
        assert_eq!(train.len(), 8);

        let mut ids: Vec<usize> = train.iter().chain(&valid).map(|p| p.id).collect();
        ids.sort();
        assert_eq!(ids, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_partition_is_seeded() {
        let names = ["a", "b", "c", "d", "e", "f"];
        let first = CorpusBuilder::new(FakeLyrics, FakeNotes).partition(pairs(&names));
        let second = CorpusBuilder::new(FakeLyrics, FakeNotes).partition(pairs(&names));
        assert_eq!(first, second);

        let reseeded = CorpusBuilder::new(FakeLyrics, FakeNotes)
            .with_seed(7)
            .partition(pairs(&names));
        assert_ne!(first, reseeded);
    }

    #[test]
    fn test_records_ids() {
        let builder = CorpusBuilder::new(FakeLyrics, FakeNotes);
        let pair = &pairs(&["x", "abc"])[1];
        let records = builder.records(pair).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1-0", "1-1", "1-2"]);
        assert!(records.iter().all(|r| r.name == "abc" && r.lyrics == vec![7]));
        assert_eq!(records[2].note, vec![vec![vec![99.0]]]);
    }

    #[test]
    fn test_rejects_zero_split() {
        let err = CorpusBuilder::new(FakeLyrics, FakeNotes)
            .with_split(0)
            .err()
            .unwrap();
        assert!(matches!(err, CorpusError::InvalidSplit));
    }

    #[test]
    fn test_build_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let train = dir.path().join("out/train.jsonl");
        let valid = dir.path().join("out/valid.jsonl");
        let builder = CorpusBuilder::new(FakeLyrics, FakeNotes)
            .with_split(2)
            .unwrap();

        let stats = builder
            .build(pairs(&["aa", "bbb", "c", "dddd"]), &train, &valid)
            .unwrap();
        assert_eq!(stats.train_files, 2);
        assert_eq!(stats.valid_files, 2);
        assert_eq!(stats.train_records + stats.valid_records, 10);

        let train_records = parse_records(std::fs::read_to_string(&train).unwrap().as_bytes()).unwrap();
        let valid_records = parse_records(std::fs::read_to_string(&valid).unwrap().as_bytes()).unwrap();
        assert_eq!(train_records.len(), stats.train_records);
        assert_eq!(valid_records.len(), stats.valid_records);
    }
}
