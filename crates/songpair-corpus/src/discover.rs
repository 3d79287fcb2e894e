//! Pairs lyric files with note files by file stem.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use glob::glob;

use crate::error::CorpusError;

pub const DEFAULT_LYRICS_PATTERN: &str = "data/seg/*.txt";
pub const DEFAULT_NOTES_PATTERN: &str = "data/csv/*.csv";

/// A lyric file and a note file sharing one stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePair {
    /// Position in the sorted pair list.
    pub id: usize,
    pub name: String,
    pub lyrics: PathBuf,
    pub notes: PathBuf,
}

/// Finds every stem matched by both patterns, sorted by stem, keeping at most
/// `limit` pairs. Each pair's id is its index in the result.
pub fn find_pairs(
    lyrics_pattern: &str,
    notes_pattern: &str,
    limit: Option<usize>,
) -> Result<Vec<SourcePair>, CorpusError> {
    let lyrics = stems(lyrics_pattern)?;
    let mut notes = stems(notes_pattern)?;

    let mut pairs = Vec::new();
    let mut unpaired = 0;
    for (name, lyrics_path) in lyrics {
        match notes.remove(&name) {
            Some(notes_path) => pairs.push((name, lyrics_path, notes_path)),
            None => unpaired += 1,
        }
    }
    unpaired += notes.len();
    if unpaired > 0 {
        tracing::warn!(unpaired, "skipped source files without a partner");
    }

    let limit = limit.unwrap_or(pairs.len());
    let pairs: Vec<SourcePair> = pairs
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(id, (name, lyrics, notes))| SourcePair {
            id,
            name,
            lyrics,
            notes,
        })
        .collect();
    tracing::info!(pairs = pairs.len(), "found paired sources");
    Ok(pairs)
}

fn stems(pattern: &str) -> Result<BTreeMap<String, PathBuf>, CorpusError> {
    let entries = glob(pattern).map_err(|source| CorpusError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut stems = BTreeMap::new();
    for path in entries.filter_map(Result::ok) {
        if let Some(stem) = stem(&path) {
            stems.insert(stem, path);
        }
    }
    Ok(stems)
}

fn stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "").unwrap();
    }

    fn patterns(root: &Path) -> (String, String) {
        (
            format!("{}/seg/*.txt", root.display()),
            format!("{}/csv/*.csv", root.display()),
        )
    }

    fn layout() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let seg = dir.path().join("seg");
        let csv = dir.path().join("csv");
        std::fs::create_dir_all(&seg).unwrap();
        std::fs::create_dir_all(&csv).unwrap();
        for name in ["b", "a", "c", "lonely"] {
            touch(&seg, &format!("{}.txt", name));
        }
        for name in ["c", "a", "b", "orphan"] {
            touch(&csv, &format!("{}.csv", name));
        }
        dir
    }

    #[test]
    fn test_pairs_sorted_by_stem() {
        let dir = layout();
        let (lyrics, notes) = patterns(dir.path());
        let pairs = find_pairs(&lyrics, &notes, None).unwrap();

        let names: Vec<(usize, &str)> = pairs.iter().map(|p| (p.id, p.name.as_str())).collect();
        assert_eq!(names, vec![(0, "a"), (1, "b"), (2, "c")]);
        assert_eq!(pairs[1].lyrics, dir.path().join("seg/b.txt"));
        assert_eq!(pairs[1].notes, dir.path().join("csv/b.csv"));
    }

    #[test]
    fn test_limit() {
        let dir = layout();
        let (lyrics, notes) = patterns(dir.path());
        let pairs = find_pairs(&lyrics, &notes, Some(2)).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].name, "b");
    }

    #[test]
    fn test_no_matches() {
        let dir = tempfile::tempdir().unwrap();
        let (lyrics, notes) = patterns(dir.path());
        assert!(find_pairs(&lyrics, &notes, None).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let err = find_pairs("data/[", "data/*.csv", None).unwrap_err();
        assert!(matches!(err, CorpusError::Pattern { .. }));
    }
}
