//! Lyric text to token sequence.

use std::path::Path;

use songpair_spec::Token;

use crate::error::CorpusError;
use crate::lexicon::Lexicon;

/// Converts lyric text into token ids.
pub trait LyricsEncoder {
    fn encode(&self, text: &str) -> Vec<Token>;

    fn encode_file(&self, path: &Path) -> Result<Vec<Token>, CorpusError> {
        let text = std::fs::read_to_string(path).map_err(|e| CorpusError::io(path, e))?;
        Ok(self.encode(&text))
    }
}

/// Splits on whitespace, lowercases each word and looks it up in a lexicon.
#[derive(Debug, Clone)]
pub struct LexiconLyricsEncoder {
    lexicon: Lexicon,
}

impl LexiconLyricsEncoder {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }
}

impl LyricsEncoder for LexiconLyricsEncoder {
    fn encode(&self, text: &str) -> Vec<Token> {
        text.split_whitespace()
            .map(|word| self.lexicon.id(&word.to_lowercase()))
            .collect()
    }
}
