//! In-memory multi-track score.
//!
//! Times are in beats. Each track maps to one MIDI channel of the same index.

/// A single decoded note.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteEvent {
    /// Absolute onset in beats (running sum of the decoded time deltas).
    pub onset: f64,
    pub duration: Option<f64>,
    pub pitch: Option<f64>,
    pub volume: Option<f64>,
}

impl NoteEvent {
    pub fn at(onset: f64) -> Self {
        Self {
            onset,
            duration: None,
            pitch: None,
            volume: None,
        }
    }
}

/// Notes played on one channel, in decode order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    pub events: Vec<NoteEvent>,
}

impl Track {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// A score with a fixed number of tracks and a single tempo.
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    /// Tempo in BPM.
    pub tempo: f64,
    pub tracks: Vec<Track>,
}

impl Score {
    /// Creates a score with `track_count` empty tracks.
    pub fn new(track_count: usize, tempo: f64) -> Self {
        Self {
            tempo,
            tracks: vec![Track::default(); track_count],
        }
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Total number of notes across all tracks.
    pub fn note_count(&self) -> usize {
        self.tracks.iter().map(|track| track.events.len()).sum()
    }

    /// Beat at which the last note ends.
    pub fn end_beat(&self) -> f64 {
        self.tracks
            .iter()
            .flat_map(|track| &track.events)
            .map(|event| event.onset + event.duration.unwrap_or(0.0))
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_score_has_empty_tracks() {
        let score = Score::new(3, 120.0);
        assert_eq!(score.track_count(), 3);
        assert_eq!(score.note_count(), 0);
        assert!(score.tracks.iter().all(Track::is_empty));
        assert_eq!(score.end_beat(), 0.0);
    }

    #[test]
    fn test_end_beat() {
        let mut score = Score::new(2, 90.0);
        score.tracks[0].events.push(NoteEvent {
            duration: Some(2.0),
            ..NoteEvent::at(1.0)
        });
        score.tracks[1].events.push(NoteEvent::at(4.0));
        assert_eq!(score.note_count(), 2);
        assert_eq!(score.end_beat(), 4.0);
    }
}
