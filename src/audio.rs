use crate::core::scheduler::{FLOOR_GAIN, PEAK_GAIN};
use crate::core::{LookaheadScheduler, Melody, PlayerParams, ScheduledNote, VoiceSet};
use crate::timer::RepeatingTimer;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use web_sys as web;

/// Notes produced by one scheduler tick; a 100 ms window rarely holds more
/// than a couple.
type NoteBatch = SmallVec<[ScheduledNote; 8]>;

/// Audio context plus the single master gain every note mixes into.
pub struct AudioOut {
    pub ctx: web::AudioContext,
    pub master_gain: web::GainNode,
}

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> Result<web::GainNode, ()> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

pub fn build_audio_out(master_volume: f32) -> Result<AudioOut, ()> {
    let ctx = web::AudioContext::new().map_err(|e| {
        log::error!("AudioContext error: {:?}", e);
    })?;
    let master_gain = create_gain(&ctx, master_volume, "Master")?;
    _ = master_gain.connect_with_audio_node(&ctx.destination());
    Ok(AudioOut { ctx, master_gain })
}

/// Oscillator and envelope of one queued note.
pub struct Voice {
    src: web::OscillatorNode,
    envelope: web::GainNode,
}

impl Voice {
    /// Cut the note now, whether it already started or is still queued.
    fn silence(&self) {
        _ = self.src.stop_with_when(0.0);
        _ = self.src.disconnect();
        _ = self.envelope.disconnect();
    }
}

/// Synthesize one scheduled note: a triangle tone with a short linear attack
/// and an exponential decay, stopped at the note's end.
pub fn play_note(
    audio_ctx: &web::AudioContext,
    master_gain: &web::GainNode,
    note: &ScheduledNote,
) -> Option<Voice> {
    let src = match web::OscillatorNode::new(audio_ctx) {
        Ok(s) => s,
        Err(e) => {
            log::error!("OscillatorNode error: {:?}", e);
            return None;
        }
    };
    src.set_type(web::OscillatorType::Triangle);
    _ = src
        .frequency()
        .set_value_at_time(note.frequency_hz, note.start_sec);
    let envelope = match web::GainNode::new(audio_ctx) {
        Ok(g) => g,
        Err(e) => {
            log::error!("envelope GainNode error: {:?}", e);
            return None;
        }
    };
    let g = envelope.gain();
    _ = g.set_value_at_time(0.0, note.start_sec);
    _ = g.linear_ramp_to_value_at_time(PEAK_GAIN, note.attack_end_sec);
    _ = g.exponential_ramp_to_value_at_time(FLOOR_GAIN, note.decay_end_sec);
    _ = src.connect_with_audio_node(&envelope);
    _ = envelope.connect_with_audio_node(master_gain);
    _ = src.start_with_when(note.start_sec);
    _ = src.stop_with_when(note.stop_sec);
    Some(Voice { src, envelope })
}

struct PlayerCore {
    out: Option<AudioOut>,
    scheduler: LookaheadScheduler,
    batch: NoteBatch,
    voices: VoiceSet<Voice>,
}

impl PlayerCore {
    /// Schedule everything inside the look-ahead window.
    fn pump(&mut self) {
        let Some(out) = &self.out else {
            return;
        };
        let now = out.ctx.current_time();
        self.voices.prune(now);
        self.batch.clear();
        self.scheduler.tick(now, &mut self.batch);
        for note in &self.batch {
            if let Some(voice) = play_note(&out.ctx, &out.master_gain, note) {
                self.voices.push(note, voice);
            }
        }
    }

    /// Cut every voice this session queued.
    fn silence(&mut self) {
        for voice in self.voices.drain() {
            voice.silence();
        }
    }
}

/// Looping melody player driven by a repeating look-ahead timer.
///
/// The audio context is created on first `start()` so that it is born inside
/// a user gesture. Without an audio subsystem every call is a silent no-op.
pub struct MelodyPlayer {
    core: Rc<RefCell<PlayerCore>>,
    timer: Option<RepeatingTimer>,
}

impl MelodyPlayer {
    pub fn new(melody: Melody, params: PlayerParams) -> Self {
        Self {
            core: Rc::new(RefCell::new(PlayerCore {
                out: None,
                scheduler: LookaheadScheduler::new(melody, params),
                batch: NoteBatch::new(),
                voices: VoiceSet::default(),
            })),
            timer: None,
        }
    }

    /// Begin looping from the first note. No-op when already playing.
    pub fn start(&mut self) {
        let interval_ms = {
            let mut core = self.core.borrow_mut();
            if core.out.is_none() {
                let volume = core.scheduler.params().master_volume;
                core.out = build_audio_out(volume).ok();
            }
            let Some(out) = &core.out else {
                log::warn!("[audio] output unavailable; staying silent");
                return;
            };
            if out.ctx.state() == web::AudioContextState::Suspended {
                _ = out.ctx.resume();
            }
            let now = out.ctx.current_time();
            if !core.scheduler.start(now) {
                return;
            }
            core.pump();
            core.scheduler.params().tick_interval_ms
        };

        let weak: Weak<RefCell<PlayerCore>> = Rc::downgrade(&self.core);
        self.timer = RepeatingTimer::start(interval_ms, move || {
            if let Some(core) = weak.upgrade() {
                let mut core = core.borrow_mut();
                if core.scheduler.is_active() {
                    core.pump();
                }
            }
        });
        if self.timer.is_none() {
            log::error!("[audio] could not start the scheduling timer");
            let mut core = self.core.borrow_mut();
            core.scheduler.stop();
            core.silence();
            return;
        }
        log::info!("[audio] playing");
    }

    /// Halt scheduling, cancel the pending tick, cut queued notes and
    /// suspend output.
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        let mut core = self.core.borrow_mut();
        core.scheduler.stop();
        core.silence();
        if let Some(out) = &core.out {
            _ = out.ctx.suspend();
        }
        log::info!("[audio] stopped");
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.core.borrow().scheduler.is_active()
    }

    /// Flip playback and return the new state.
    pub fn toggle(&mut self) -> bool {
        if self.is_active() {
            self.stop();
        } else {
            self.start();
        }
        self.is_active()
    }
}

impl Drop for MelodyPlayer {
    fn drop(&mut self) {
        self.timer.take();
    }
}
