// Host-side tests for melody data and the look-ahead scheduler.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod melody {
        include!("../src/core/melody.rs");
    }
    pub mod scheduler {
        include!("../src/core/scheduler.rs");
    }
}

use self::core::melody::*;
use self::core::scheduler::*;

const EPS: f64 = 1e-9;

fn make_scheduler() -> LookaheadScheduler {
    LookaheadScheduler::new(Melody::jingle_bells(), PlayerParams::default())
}

/// Drive the scheduler with a 25 ms tick from `t0` until `t1`.
fn run(s: &mut LookaheadScheduler, t0: f64, t1: f64) -> Vec<ScheduledNote> {
    let mut out = Vec::new();
    let mut now = t0;
    while now <= t1 {
        s.tick(now, &mut out);
        now += 0.025;
    }
    out
}

#[test]
fn melody_table_is_the_full_chorus() {
    let m = Melody::jingle_bells();
    assert_eq!(m.len(), 26);
    assert!(!m.is_empty());
    assert!((m.total_beats() - 8.0).abs() < 1e-6);
    assert_eq!(m.get(0).frequency_hz, E5);
    assert_eq!(m.get(m.len() - 1).frequency_hz, G5);
    // Wraps past the end
    assert_eq!(m.get(m.len()), m.get(0));
    assert_eq!(m.next_index(m.len() - 1), 0);
}

#[test]
fn empty_melody_is_rejected() {
    assert!(Melody::new(&[]).is_none());
    assert!(Melody::new(JINGLE_BELLS).is_some());
}

#[test]
fn default_params_match_player_constants() {
    let p = PlayerParams::default();
    assert_eq!(p.tempo_bpm, 100.0);
    assert_eq!(p.lookahead_sec, 0.1);
    assert_eq!(p.tick_interval_ms, 25);
    assert_eq!(p.master_volume, 0.1);
}

#[test]
fn note_timing_follows_envelope_factors() {
    let n = Note {
        frequency_hz: A5,
        beats: 0.5,
    };
    let sn = note_timing(3, &n, 10.0, 100.0);
    // 0.5 beats at 100 bpm = 0.3 s of beat time
    assert_eq!(sn.index, 3);
    assert!((sn.attack_end_sec - 10.05).abs() < EPS);
    assert!((sn.decay_end_sec - (10.0 + 0.3 * 1.5)).abs() < EPS);
    assert!((sn.stop_sec - (10.0 + 0.3 * 2.0)).abs() < EPS);
    assert!((sn.sounding_sec() - 0.6).abs() < EPS);
    assert!((advance_sec(&n, 100.0) - 0.6).abs() < EPS);
}

#[test]
fn inactive_scheduler_emits_nothing() {
    let mut s = make_scheduler();
    let mut out: Vec<ScheduledNote> = Vec::new();
    assert_eq!(s.tick(5.0, &mut out), 0);
    assert!(out.is_empty());
    assert_eq!(s.emitted(), 0);
}

#[test]
fn first_tick_schedules_the_first_note_at_start_time() {
    let mut s = make_scheduler();
    assert!(s.start(2.0));
    let mut out = Vec::new();
    let n = s.tick(2.0, &mut out);
    // First note is 0.25 beats → advances 0.3 s, past the 0.1 s window
    assert_eq!(n, 1);
    assert_eq!(out[0].index, 0);
    assert!((out[0].start_sec - 2.0).abs() < EPS);
    assert_eq!(s.cursor().index, 1);
    assert!((s.cursor().next_time_sec - 2.3).abs() < EPS);
}

#[test]
fn notes_never_overlap() {
    let mut s = make_scheduler();
    s.start(0.0);
    let notes = run(&mut s, 0.0, 30.0);
    assert!(notes.len() > 26);
    for w in notes.windows(2) {
        assert!(
            w[1].start_sec + EPS >= w[0].stop_sec,
            "note {} starts before previous stops",
            w[1].index
        );
        assert!(w[1].start_sec > w[0].start_sec);
    }
}

#[test]
fn scheduling_stays_within_the_lookahead_window() {
    let mut s = make_scheduler();
    s.start(0.0);
    let mut out = Vec::new();
    let mut now = 0.0;
    while now < 20.0 {
        out.clear();
        s.tick(now, &mut out);
        for n in &out {
            assert!(n.start_sec < now + 0.1 + EPS);
        }
        now += 0.025;
    }
}

#[test]
fn cursor_index_is_count_mod_len() {
    let mut s = make_scheduler();
    s.start(0.0);
    let notes = run(&mut s, 0.0, 50.0);
    let len = s.melody().len();
    for (i, n) in notes.iter().enumerate() {
        assert_eq!(n.index, i % len);
    }
    assert_eq!(s.cursor().index, notes.len() % len);
    assert_eq!(s.emitted(), notes.len() as u64);
}

#[test]
fn one_cycle_totals_the_advance_of_every_note() {
    let mut s = make_scheduler();
    let len = s.melody().len();
    s.start(0.0);
    let mut out = Vec::new();
    // A single tick far ahead emits notes in order; stop after exactly one pass.
    while out.len() < len {
        let probe = s.cursor().next_time_sec;
        s.tick(probe, &mut out);
    }
    assert_eq!(out.len(), len);
    assert_eq!(s.cursor().index, 0);
    let expected: f64 = JINGLE_BELLS.iter().map(|n| n.beats as f64 * 1.2).sum();
    assert!((s.cursor().next_time_sec - expected).abs() < 1e-6);
    assert!((expected - 9.6).abs() < 1e-6);
}

#[test]
fn start_is_ignored_while_active() {
    let mut s = make_scheduler();
    assert!(s.start(1.0));
    let _ = run(&mut s, 1.0, 3.0);
    let before = s.cursor();
    assert!(!s.start(100.0));
    assert_eq!(s.cursor(), before);
}

#[test]
fn stop_then_start_resets_cursor() {
    let mut s = make_scheduler();
    s.start(0.0);
    let _ = run(&mut s, 0.0, 4.0);
    assert_ne!(s.cursor().index, 0);
    s.stop();
    assert!(!s.is_active());
    let mut out = Vec::new();
    assert_eq!(s.tick(5.0, &mut out), 0);

    assert!(s.start(7.5));
    assert_eq!(s.cursor().index, 0);
    assert!((s.cursor().next_time_sec - 7.5).abs() < EPS);
    s.tick(7.5, &mut out);
    assert_eq!(out[0].index, 0);
    assert!((out[0].start_sec - 7.5).abs() < EPS);
}

#[test]
fn late_tick_catches_up_without_dropping_notes() {
    let mut s = make_scheduler();
    s.start(0.0);
    let mut out = Vec::new();
    s.tick(0.0, &mut out);
    // Timer stalled for two seconds
    s.tick(2.0, &mut out);
    for (i, n) in out.iter().enumerate() {
        assert_eq!(n.index, i);
    }
    assert!(out.last().map(|n| n.start_sec < 2.1).unwrap_or(false));
}

#[test]
fn tempo_change_applies_to_later_notes() {
    let mut s = make_scheduler();
    s.set_tempo(0.0);
    assert_eq!(s.params().tempo_bpm, 1.0);
    s.set_tempo(200.0);
    s.start(0.0);
    let mut out = Vec::new();
    s.tick(0.0, &mut out);
    // 0.25 beats at 200 bpm → 0.15 s advance
    assert!((s.cursor().next_time_sec - 0.15).abs() < EPS);
}

#[test]
fn works_with_smallvec_batches() {
    let mut s = make_scheduler();
    s.start(0.0);
    let mut batch: smallvec::SmallVec<[ScheduledNote; 8]> = smallvec::SmallVec::new();
    let n = s.tick(0.0, &mut batch);
    assert_eq!(n, batch.len());
    assert!(!batch.spilled());
}

/// Schedule one tick's worth of notes and track them the way the player does.
fn track_tick(s: &mut LookaheadScheduler, voices: &mut VoiceSet<usize>, now: f64) {
    voices.prune(now);
    let mut out = Vec::new();
    s.tick(now, &mut out);
    for note in &out {
        voices.push(note, note.index);
    }
}

#[test]
fn voices_queued_before_stop_are_all_drained() {
    let mut s = make_scheduler();
    let mut voices = VoiceSet::default();
    s.start(0.0);
    let mut now = 0.0;
    while now < 2.9 {
        track_tick(&mut s, &mut voices, now);
        now += 0.025;
    }
    // Notes scheduled past the frozen clock are still pending.
    let last = s.cursor().index;
    assert!(!voices.is_empty());

    s.stop();
    let cut: Vec<usize> = voices.drain().collect();
    assert!(voices.is_empty());
    assert!(cut.contains(&((last + s.melody().len() - 1) % s.melody().len())));

    // A restart at the same clock reading begins cleanly at entry 0.
    assert!(s.start(now));
    track_tick(&mut s, &mut voices, now);
    let restarted: Vec<usize> = voices.drain().collect();
    assert_eq!(restarted, vec![0]);
}

#[test]
fn voices_are_pruned_once_their_stop_time_passes() {
    let mut s = make_scheduler();
    let mut voices = VoiceSet::default();
    s.start(0.0);
    track_tick(&mut s, &mut voices, 0.0);
    assert_eq!(voices.len(), 1);
    // Entry 0: 0.25 beats at 100 bpm stops after 0.3 s.
    voices.prune(0.29);
    assert_eq!(voices.len(), 1);
    voices.prune(0.31);
    assert!(voices.is_empty());
}

#[test]
fn stop_without_restart_schedules_nothing_more() {
    let mut s = make_scheduler();
    let mut voices = VoiceSet::default();
    s.start(0.0);
    track_tick(&mut s, &mut voices, 0.0);
    s.stop();
    voices.drain().for_each(drop);
    for k in 0..40 {
        track_tick(&mut s, &mut voices, k as f64 * 0.025);
    }
    assert!(voices.is_empty());
    assert!(!s.is_active());
}
