//! Note-vector to score decoding.
//!
//! Input is a list of channels, each a list of note embeddings. Every
//! embedding is turned into a raw note by a [`NoteDecoder`], and the raw note
//! is read through the feature map: field `f` takes `raw[feat2id[f]]`. The
//! decoded `time` value is a delta from the previous note on the same
//! channel, so onsets are its running sum. Channel `c` is written to track
//! `c`; the score always has `music.Ci` tracks.

use std::collections::BTreeMap;

use songpair_spec::{Channel, Config, FeatureMap, NoteField};

use crate::error::DecodeError;
use crate::score::{NoteEvent, Score};

/// Raw note: raw feature id to value.
pub type RawNote = BTreeMap<usize, f64>;

/// Turns one note embedding into a raw note.
pub trait NoteDecoder {
    fn decode(&self, embedding: &[f32]) -> Result<RawNote, DecodeError>;
}

impl<F> NoteDecoder for F
where
    F: Fn(&[f32]) -> Result<RawNote, DecodeError>,
{
    fn decode(&self, embedding: &[f32]) -> Result<RawNote, DecodeError> {
        self(embedding)
    }
}

/// Reads raw id `i` straight from component `i` of the embedding.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexedNoteDecoder;

impl NoteDecoder for IndexedNoteDecoder {
    fn decode(&self, embedding: &[f32]) -> Result<RawNote, DecodeError> {
        Ok(embedding
            .iter()
            .enumerate()
            .map(|(id, &value)| (id, f64::from(value)))
            .collect())
    }
}

/// Decodes note embeddings into a [`Score`] using a fixed config.
#[derive(Debug, Clone)]
pub struct ScoreDecoder<D> {
    feat2id: FeatureMap,
    channels: usize,
    default_tempo: f64,
    decoder: D,
}

impl<D: NoteDecoder> ScoreDecoder<D> {
    pub fn new(config: &Config, decoder: D) -> Self {
        Self {
            feat2id: config.music.feat2id.clone(),
            channels: config.music.channels,
            default_tempo: f64::from(config.tempo.default),
            decoder,
        }
    }

    /// Decodes `notes` into a score whose tempo is `tempo * tempo.default`.
    pub fn decode(&self, notes: &[Channel], tempo: f32) -> Result<Score, DecodeError> {
        if notes.len() > self.channels {
            return Err(DecodeError::TooManyChannels {
                got: notes.len(),
                max: self.channels,
            });
        }
        let time_id = self
            .feat2id
            .raw_id(NoteField::Time)
            .ok_or(DecodeError::UnmappedTime)?;

        let mut score = Score::new(self.channels, f64::from(tempo) * self.default_tempo);
        for (channel, events) in notes.iter().enumerate() {
            let mut time = 0.0;
            let track = &mut score.tracks[channel];
            for (index, embedding) in events.iter().enumerate() {
                let raw = self.decoder.decode(embedding)?;
                let lookup = |field: NoteField, id: usize| {
                    raw.get(&id)
                        .copied()
                        .ok_or_else(|| DecodeError::missing(channel, index, field, id))
                };

                time += lookup(NoteField::Time, time_id)?;
                let mut event = NoteEvent::at(time);
                for (field, id) in self.feat2id.iter() {
                    let value = lookup(field, id)?;
                    match field {
                        NoteField::Time => {}
                        NoteField::Duration => event.duration = Some(value),
                        NoteField::Pitch => event.pitch = Some(value),
                        NoteField::Volume => event.volume = Some(value),
                    }
                }
                track.events.push(event);
            }
        }

        tracing::debug!(
            tracks = score.track_count(),
            notes = score.note_count(),
            tempo = score.tempo,
            end_beat = score.end_beat(),
            "decoded score"
        );
        Ok(score)
    }
}

/// Decodes with [`IndexedNoteDecoder`].
pub fn vec2midi(notes: &[Channel], tempo: f32, config: &Config) -> Result<Score, DecodeError> {
    ScoreDecoder::new(config, IndexedNoteDecoder).decode(notes, tempo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(channels: usize) -> Config {
        let mut config = Config::default();
        config.music.channels = channels;
        config
    }

    /// Embedding in default feat2id order: time, duration, pitch, volume.
    fn note(time: f32, duration: f32, pitch: f32, volume: f32) -> Vec<f32> {
        vec![time, duration, pitch, volume]
    }

    #[test]
    fn test_onsets_are_running_sum() {
        let notes = vec![vec![
            note(5.0, 1.0, 60.0, 100.0),
            note(0.0, 1.0, 64.0, 100.0),
            note(3.0, 2.0, 67.0, 90.0),
        ]];
        let score = vec2midi(&notes, 1.0, &config(1)).unwrap();
        let onsets: Vec<f64> = score.tracks[0].events.iter().map(|e| e.onset).collect();
        assert_eq!(onsets, vec![5.0, 5.0, 8.0]);

        let last = &score.tracks[0].events[2];
        assert_eq!(last.duration, Some(2.0));
        assert_eq!(last.pitch, Some(67.0));
        assert_eq!(last.volume, Some(90.0));
        assert_eq!(score.end_beat(), 10.0);
    }

    #[test]
    fn test_single_channel_into_two_tracks() {
        let notes = vec![vec![note(0.0, 1.0, 60.0, 100.0)]];
        let score = vec2midi(&notes, 1.0, &config(2)).unwrap();
        assert_eq!(score.track_count(), 2);
        assert_eq!(score.tracks[0].events.len(), 1);
        assert_eq!(score.tracks[0].events[0].onset, 0.0);
        assert!(score.tracks[1].is_empty());
        assert_eq!(score.tempo, 120.0);
    }

    #[test]
    fn test_two_track_time_and_pitch() {
        let mut config = config(2);
        config.music.embedding_width = 2;
        config.music.feat2id = FeatureMap::new([(NoteField::Time, 0), (NoteField::Pitch, 1)]);

        let score = vec2midi(&[vec![vec![10.0, 60.0]]], 1.0, &config).unwrap();
        assert_eq!(score.tracks[0].events, vec![NoteEvent {
            pitch: Some(60.0),
            ..NoteEvent::at(10.0)
        }]);
        assert!(score.tracks[1].is_empty());
    }

    #[test]
    fn test_time_resets_per_channel() {
        let notes = vec![
            vec![note(2.0, 1.0, 60.0, 100.0), note(2.0, 1.0, 60.0, 100.0)],
            vec![note(1.0, 1.0, 48.0, 80.0)],
        ];
        let score = vec2midi(&notes, 1.0, &config(2)).unwrap();
        assert_eq!(score.tracks[0].events[1].onset, 4.0);
        assert_eq!(score.tracks[1].events[0].onset, 1.0);
    }

    #[test]
    fn test_tempo_is_scaled() {
        let score = vec2midi(&[], 0.5, &config(1)).unwrap();
        assert_eq!(score.tempo, 60.0);
        assert_eq!(score.note_count(), 0);
    }

    #[test]
    fn test_too_many_channels() {
        let notes = vec![Vec::new(); 3];
        let err = vec2midi(&notes, 1.0, &config(2)).unwrap_err();
        assert!(matches!(err, DecodeError::TooManyChannels { got: 3, max: 2 }));
    }

    #[test]
    fn test_missing_raw_field() {
        let notes = vec![vec![vec![1.0, 2.0]]];
        let err = vec2midi(&notes, 1.0, &config(1)).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MissingRawField {
                channel: 0,
                event: 0,
                field: "pitch",
                raw_id: 2
            }
        ));
    }

    #[test]
    fn test_custom_feature_map_and_decoder() {
        let mut config = config(1);
        config.music.feat2id = FeatureMap::new([(NoteField::Time, 1), (NoteField::Pitch, 0)]);
        let doubling = |embedding: &[f32]| -> Result<RawNote, DecodeError> {
            Ok(embedding
                .iter()
                .enumerate()
                .map(|(id, &v)| (id, f64::from(v) * 2.0))
                .collect())
        };

        let notes = vec![vec![vec![30.0, 0.5], vec![32.0, 1.0]]];
        let score = ScoreDecoder::new(&config, doubling).decode(&notes, 1.0).unwrap();
        let events = &score.tracks[0].events;
        assert_eq!(events[0].onset, 1.0);
        assert_eq!(events[0].pitch, Some(60.0));
        assert_eq!(events[0].duration, None);
        assert_eq!(events[1].onset, 3.0);
        assert_eq!(events[1].pitch, Some(64.0));
    }

    #[test]
    fn test_unmapped_time() {
        let mut config = config(1);
        config.music.feat2id = FeatureMap::new([(NoteField::Pitch, 0)]);
        let err = vec2midi(&[vec![vec![60.0]]], 1.0, &config).unwrap_err();
        assert!(matches!(err, DecodeError::UnmappedTime));
    }
}
