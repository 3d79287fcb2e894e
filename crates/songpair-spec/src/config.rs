//! Static pipeline configuration.
//!
//! The config is a small tree of sections mirroring the keys the rest of the
//! pipeline reads: `music.Ci`, `music.L`, `music.E`, `music.feat2id`,
//! `lyrics.L`, `lyrics.lex`, `tempo.default`, `translator.batch_size` and
//! `autoencoder.batch_size`. It is loaded once (YAML or JSON, picked by file
//! extension) and passed explicitly to every stage.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Named note fields a decoded note event can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteField {
    /// Delta from the previous event's onset, in beats.
    Time,
    /// Length of the note, in beats.
    Duration,
    /// MIDI pitch number.
    Pitch,
    /// MIDI velocity.
    Volume,
}

impl NoteField {
    pub fn name(self) -> &'static str {
        match self {
            NoteField::Time => "time",
            NoteField::Duration => "duration",
            NoteField::Pitch => "pitch",
            NoteField::Volume => "volume",
        }
    }
}

/// Typed `feat2id` table: named note field to raw feature id.
///
/// Raw ids index the vector a note embedding decodes to, so a field mapped to
/// id `2` reads component `2` of the raw note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureMap(BTreeMap<NoteField, usize>);

impl FeatureMap {
    pub fn new(entries: impl IntoIterator<Item = (NoteField, usize)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Raw id a field reads from, if the field is mapped.
    pub fn raw_id(&self, field: NoteField) -> Option<usize> {
        self.0.get(&field).copied()
    }

    /// Iterates `(field, raw id)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (NoteField, usize)> + '_ {
        self.0.iter().map(|(field, id)| (*field, *id))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for FeatureMap {
    fn default() -> Self {
        Self::new([
            (NoteField::Time, 0),
            (NoteField::Duration, 1),
            (NoteField::Pitch, 2),
            (NoteField::Volume, 3),
        ])
    }
}

/// `music` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicConfig {
    /// Maximum channel count (`Ci`).
    #[serde(rename = "Ci")]
    pub channels: usize,
    /// Events per channel (`L`).
    #[serde(rename = "L")]
    pub length: usize,
    /// Width of one note embedding (`E`).
    #[serde(rename = "E")]
    pub embedding_width: usize,
    #[serde(default)]
    pub feat2id: FeatureMap,
}

/// `lyrics` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricsConfig {
    /// Tokens per lyric sequence (`L`).
    #[serde(rename = "L")]
    pub length: usize,
    /// Path of the word-to-id lexicon.
    #[serde(default = "default_lexicon_path")]
    pub lex: PathBuf,
}

fn default_lexicon_path() -> PathBuf {
    PathBuf::from("data/lex.json")
}

/// `tempo` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempoConfig {
    /// BPM the tempo multiplier of a record is scaled by.
    pub default: f32,
}

/// Per-task section (`translator`, `autoencoder`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskConfig {
    pub batch_size: usize,
}

/// Complete pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub music: MusicConfig,
    pub lyrics: LyricsConfig,
    pub tempo: TempoConfig,
    pub translator: TaskConfig,
    pub autoencoder: TaskConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            music: MusicConfig {
                channels: 4,
                length: 64,
                embedding_width: 4,
                feat2id: FeatureMap::default(),
            },
            lyrics: LyricsConfig {
                length: 128,
                lex: default_lexicon_path(),
            },
            tempo: TempoConfig { default: 120.0 },
            translator: TaskConfig { batch_size: 32 },
            autoencoder: TaskConfig { batch_size: 64 },
        }
    }
}

impl Config {
    /// Parses a config from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parses a config from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads and validates a config file.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as YAML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            Self::from_json_str(&content).map_err(|e| e.to_string())
        } else {
            Self::from_yaml_str(&content).map_err(|e| e.to_string())
        };
        let config = parsed.map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Checks that every dimension is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("music.Ci", self.music.channels),
            ("music.L", self.music.length),
            ("music.E", self.music.embedding_width),
            ("lyrics.L", self.lyrics.length),
            ("translator.batch_size", self.translator.batch_size),
            ("autoencoder.batch_size", self.autoencoder.batch_size),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be at least 1".to_string(),
                });
            }
        }

        if !(self.tempo.default.is_finite() && self.tempo.default > 0.0) {
            return Err(ConfigError::Invalid {
                field: "tempo.default",
                reason: format!("must be a positive number, got {}", self.tempo.default),
            });
        }

        if self.music.feat2id.raw_id(NoteField::Time).is_none() {
            return Err(ConfigError::Invalid {
                field: "music.feat2id",
                reason: "missing the 'time' field".to_string(),
            });
        }
        for (field, id) in self.music.feat2id.iter() {
            if id >= self.music.embedding_width {
                return Err(ConfigError::Invalid {
                    field: "music.feat2id",
                    reason: format!(
                        "'{}' maps to raw id {} but music.E is {}",
                        field.name(),
                        id,
                        self.music.embedding_width
                    ),
                });
            }
        }

        Ok(())
    }

    /// Fixed shapes the normalizer pads to.
    pub fn dims(&self) -> Dims {
        Dims {
            lyrics_len: self.lyrics.length,
            channels: self.music.channels,
            note_len: self.music.length,
            embedding_width: self.music.embedding_width,
        }
    }
}

/// Fixed tensor dimensions derived from [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims {
    /// `L_lyr`: tokens per lyric sequence.
    pub lyrics_len: usize,
    /// `Ci`: channels per note matrix.
    pub channels: usize,
    /// `L_note`: events per channel.
    pub note_len: usize,
    /// `E`: width of a note embedding.
    pub embedding_width: usize,
}
