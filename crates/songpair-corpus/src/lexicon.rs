//! Word to token id table.
//!
//! A lexicon file is a JSON object mapping words to ids:
//!
//! ```text
//! {"night": 1, "sky": 2, "star": 3}
//! ```
//!
//! Words missing from the table map to the unknown id, which defaults to one
//! past the largest id in the table (0 for an empty table).

use std::collections::HashMap;
use std::path::Path;

use songpair_spec::Token;

use crate::error::CorpusError;

#[derive(Debug, Clone, PartialEq)]
pub struct Lexicon {
    words: HashMap<String, Token>,
    unknown: Token,
}

impl Lexicon {
    pub fn new(words: HashMap<String, Token>) -> Self {
        let unknown = words.values().max().map_or(0, |max| max + 1);
        Self { words, unknown }
    }

    /// Loads a lexicon from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        let content = std::fs::read_to_string(path).map_err(|e| CorpusError::io(path, e))?;
        let words: HashMap<String, Token> =
            serde_json::from_str(&content).map_err(|source| CorpusError::Lexicon {
                path: path.to_path_buf(),
                source,
            })?;
        let lexicon = Self::new(words);
        tracing::info!(
            vocab_size = lexicon.vocab_size(),
            "loaded lexicon from {}",
            path.display()
        );
        Ok(lexicon)
    }

    pub fn with_unknown(mut self, unknown: Token) -> Self {
        self.unknown = unknown;
        self
    }

    pub fn vocab_size(&self) -> usize {
        self.words.len()
    }

    pub fn unknown(&self) -> Token {
        self.unknown
    }

    pub fn get(&self, word: &str) -> Option<Token> {
        self.words.get(word).copied()
    }

    /// Id of `word`, or the unknown id.
    pub fn id(&self, word: &str) -> Token {
        self.get(word).unwrap_or(self.unknown)
    }
}
