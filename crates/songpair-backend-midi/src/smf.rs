//! Standard MIDI File output.
//!
//! Output is SMF format 1 at 480 ticks per quarter note: track 0 carries the
//! tempo, then one track per score track on the MIDI channel of the same
//! index. Note fields are rounded and clamped into MIDI range; notes without
//! a pitch, duration or volume use the defaults below.

use std::path::Path;

use midly::num::{u15, u24, u28, u4, u7};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind};

use crate::error::MidiWriteError;
use crate::score::{NoteEvent, Score};

/// Ticks per quarter note in MIDI output.
pub const TICKS_PER_QUARTER: u16 = 480;

pub const DEFAULT_PITCH: u8 = 60;
pub const DEFAULT_VOLUME: u8 = 100;
pub const DEFAULT_DURATION: f64 = 1.0;

const MAX_CHANNELS: usize = 16;
const MAX_TICK: u32 = 0x0FFF_FFFF;
const MAX_TEMPO_MICROS: u32 = 0x00FF_FFFF;

/// Serializes `score` and writes it to `path`.
pub fn write_midi(score: &Score, path: &Path) -> Result<(), MidiWriteError> {
    let bytes = render_midi(score)?;
    std::fs::write(path, &bytes)?;
    tracing::info!(
        path = %path.display(),
        tracks = score.track_count(),
        notes = score.note_count(),
        "wrote MIDI file"
    );
    Ok(())
}

/// Serializes `score` to SMF bytes.
pub fn render_midi(score: &Score) -> Result<Vec<u8>, MidiWriteError> {
    if !(score.tempo.is_finite() && score.tempo > 0.0) {
        return Err(MidiWriteError::InvalidTempo(score.tempo));
    }
    if score.track_count() > MAX_CHANNELS {
        return Err(MidiWriteError::TooManyTracks(score.track_count()));
    }

    let names: Vec<String> = (0..score.track_count())
        .map(|index| format!("Channel {}", index))
        .collect();

    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));
    smf.tracks.push(tempo_track(score.tempo));
    for (index, track) in score.tracks.iter().enumerate() {
        smf.tracks
            .push(note_track(&names[index], index as u8, &track.events));
    }

    let mut buf = Vec::new();
    smf.write(&mut buf)
        .map_err(|err| MidiWriteError::Encode(err.to_string()))?;
    Ok(buf)
}

fn tempo_track(bpm: f64) -> Track<'static> {
    let micros = (60_000_000.0 / bpm).round().clamp(1.0, f64::from(MAX_TEMPO_MICROS)) as u32;
    vec![
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(micros))),
        },
        end_of_track(),
    ]
}

fn note_track<'a>(name: &'a str, channel: u8, events: &[NoteEvent]) -> Track<'a> {
    let channel = u4::new(channel);

    // (tick, is_on, message); offs sort before ons on the same tick.
    let mut timeline: Vec<(u32, bool, MidiMessage)> = Vec::with_capacity(events.len() * 2);
    for event in events {
        let key = u7::new(event.pitch.map_or(DEFAULT_PITCH, to_data_byte));
        let vel = u7::new(event.volume.map_or(DEFAULT_VOLUME, to_data_byte));
        let onset = if event.onset.is_finite() {
            event.onset.max(0.0)
        } else {
            0.0
        };
        let duration = event
            .duration
            .filter(|duration| duration.is_finite())
            .unwrap_or(DEFAULT_DURATION)
            .max(0.0);
        let start = beats_to_ticks(onset);
        // Every note releases at least one tick after it starts.
        let end = beats_to_ticks(onset + duration)
            .max(start + 1)
            .min(MAX_TICK);

        timeline.push((start, true, MidiMessage::NoteOn { key, vel }));
        timeline.push((
            end,
            false,
            MidiMessage::NoteOff {
                key,
                vel: u7::new(0),
            },
        ));
    }
    timeline.sort_by_key(|&(tick, is_on, _)| (tick, is_on));

    let mut track = Vec::with_capacity(timeline.len() + 2);
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(name.as_bytes())),
    });

    let mut last_tick = 0;
    for (tick, _, message) in timeline {
        track.push(TrackEvent {
            delta: u28::new(tick - last_tick),
            kind: TrackEventKind::Midi { channel, message },
        });
        last_tick = tick;
    }
    track.push(end_of_track());
    track
}

fn end_of_track() -> TrackEvent<'static> {
    TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    }
}

fn beats_to_ticks(beats: f64) -> u32 {
    if !beats.is_finite() || beats <= 0.0 {
        return 0;
    }
    (beats * f64::from(TICKS_PER_QUARTER))
        .round()
        .min(f64::from(MAX_TICK)) as u32
}

fn to_data_byte(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 127.0) as u8
}
