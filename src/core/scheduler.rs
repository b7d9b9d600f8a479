// Look-ahead note scheduling.
//
// The scheduler is driven by a coarse, jittery timer but emits notes with
// exact start/stop times on the audio clock. Each tick schedules every note
// whose start falls inside `now + lookahead`, so timer jitter smaller than the
// look-ahead window never produces audible gaps or drift.

use super::melody::{Melody, Note};

/// Cursor advance per beat-second (`d × 60/T × ADVANCE_SCALE`).
pub const ADVANCE_SCALE: f64 = 2.0;
/// End of the exponential decay, per beat-second.
pub const DECAY_SCALE: f64 = 1.5;
/// Oscillator stop time, per beat-second.
pub const STOP_SCALE: f64 = 2.0;

/// Linear attack window from silence to the envelope peak.
pub const ATTACK_SEC: f64 = 0.05;
pub const PEAK_GAIN: f32 = 0.1;
/// Exponential ramps cannot reach zero; decay targets this floor instead.
pub const FLOOR_GAIN: f32 = 0.001;

/// Tunables for the melody player.
///
/// - `tempo_bpm` beats per minute used to convert note lengths to seconds
/// - `lookahead_sec` how far past the audio clock each tick schedules
/// - `tick_interval_ms` wall-clock period of the scheduling timer
/// - `master_volume` gain of the single mix stage
#[derive(Clone, Debug)]
pub struct PlayerParams {
    pub tempo_bpm: f64,
    pub lookahead_sec: f64,
    pub tick_interval_ms: i32,
    pub master_volume: f32,
}

impl Default for PlayerParams {
    fn default() -> Self {
        Self {
            tempo_bpm: 100.0,
            lookahead_sec: 0.1,
            tick_interval_ms: 25,
            master_volume: 0.1,
        }
    }
}

/// A note placed on the audio clock, with its envelope breakpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledNote {
    pub index: usize,
    pub frequency_hz: f32,
    pub start_sec: f64,
    pub attack_end_sec: f64,
    pub decay_end_sec: f64,
    pub stop_sec: f64,
}

impl ScheduledNote {
    /// Time the oscillator is running.
    #[inline]
    pub fn sounding_sec(&self) -> f64 {
        self.stop_sec - self.start_sec
    }
}

/// Position of the player inside the melody.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackCursor {
    pub index: usize,
    pub next_time_sec: f64,
}

#[inline]
pub fn seconds_per_beat(tempo_bpm: f64) -> f64 {
    60.0 / tempo_bpm
}

/// Seconds the cursor advances after scheduling `note`.
#[inline]
pub fn advance_sec(note: &Note, tempo_bpm: f64) -> f64 {
    note.beats as f64 * seconds_per_beat(tempo_bpm) * ADVANCE_SCALE
}

/// Envelope and stop times for `note` starting at `start_sec`.
pub fn note_timing(index: usize, note: &Note, start_sec: f64, tempo_bpm: f64) -> ScheduledNote {
    let beat_sec = note.beats as f64 * seconds_per_beat(tempo_bpm);
    ScheduledNote {
        index,
        frequency_hz: note.frequency_hz,
        start_sec,
        attack_end_sec: start_sec + ATTACK_SEC,
        decay_end_sec: start_sec + beat_sec * DECAY_SCALE,
        stop_sec: start_sec + beat_sec * STOP_SCALE,
    }
}

/// Cyclic melody walker that emits notes slightly ahead of real time.
///
/// Typical usage:
/// - `start(now)` when playback begins (resets the cursor to entry 0)
/// - `tick(now, &mut out)` from a periodic timer
/// - `stop()` when playback ends
pub struct LookaheadScheduler {
    melody: Melody,
    params: PlayerParams,
    cursor: PlaybackCursor,
    active: bool,
    emitted: u64,
}

impl LookaheadScheduler {
    pub fn new(melody: Melody, params: PlayerParams) -> Self {
        Self {
            melody,
            params,
            cursor: PlaybackCursor {
                index: 0,
                next_time_sec: 0.0,
            },
            active: false,
            emitted: 0,
        }
    }

    /// Begin playback at `now_sec`. Returns false (and changes nothing) when
    /// already active.
    pub fn start(&mut self, now_sec: f64) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.cursor = PlaybackCursor {
            index: 0,
            next_time_sec: now_sec,
        };
        true
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn cursor(&self) -> PlaybackCursor {
        self.cursor
    }

    #[inline]
    pub fn melody(&self) -> &Melody {
        &self.melody
    }

    #[inline]
    pub fn params(&self) -> &PlayerParams {
        &self.params
    }

    /// Notes emitted since construction.
    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Change tempo; affects notes scheduled from the next tick on.
    pub fn set_tempo(&mut self, bpm: f64) {
        self.params.tempo_bpm = bpm.max(1.0);
    }

    /// Schedule every note starting before `now_sec + lookahead`. Returns the
    /// number of notes pushed into `out`; zero while stopped.
    pub fn tick<E: Extend<ScheduledNote>>(&mut self, now_sec: f64, out: &mut E) -> usize {
        if !self.active {
            return 0;
        }
        let horizon = now_sec + self.params.lookahead_sec;
        let tempo = self.params.tempo_bpm;
        let mut count = 0;
        while self.cursor.next_time_sec < horizon {
            let note = self.melody.get(self.cursor.index);
            out.extend(Some(note_timing(
                self.cursor.index,
                &note,
                self.cursor.next_time_sec,
                tempo,
            )));
            self.cursor.next_time_sec += advance_sec(&note, tempo);
            self.cursor.index = self.melody.next_index(self.cursor.index);
            self.emitted += 1;
            count += 1;
        }
        count
    }
}

/// Voices handed to the audio backend that may still sound.
///
/// Each voice is kept until its stop time passes so a stop can silence
/// whatever is still queued on the audio clock.
pub struct VoiceSet<V> {
    voices: Vec<(f64, V)>,
}

impl<V> Default for VoiceSet<V> {
    fn default() -> Self {
        Self { voices: Vec::new() }
    }
}

impl<V> VoiceSet<V> {
    pub fn push(&mut self, note: &ScheduledNote, voice: V) {
        self.voices.push((note.stop_sec, voice));
    }

    /// Forget voices whose oscillator already stopped by `now_sec`.
    pub fn prune(&mut self, now_sec: f64) {
        self.voices.retain(|(stop_sec, _)| *stop_sec > now_sec);
    }

    /// Take every voice still pending or sounding.
    pub fn drain(&mut self) -> impl Iterator<Item = V> + '_ {
        self.voices.drain(..).map(|(_, v)| v)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.voices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}
