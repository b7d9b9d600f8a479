// Host-side tests for the reveal timeline and playhead.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod timeline {
    include!("../src/core/timeline.rs");
}

use timeline::*;

const ALL_EASES: [Ease; 6] = [
    Ease::Linear,
    Ease::Power1Out,
    Ease::Power2Out,
    Ease::Power2InOut,
    Ease::ExpoInOut,
    Ease::BackOut(1.2),
];

#[test]
fn eases_hit_their_endpoints() {
    for e in ALL_EASES {
        assert!(e.apply(0.0).abs() < 1e-6, "{:?} at 0", e);
        assert!((e.apply(1.0) - 1.0).abs() < 1e-6, "{:?} at 1", e);
        // Out-of-range progress is clamped
        assert_eq!(e.apply(-1.0), e.apply(0.0));
        assert_eq!(e.apply(2.0), e.apply(1.0));
    }
}

#[test]
fn back_out_overshoots() {
    let peak = (1..100)
        .map(|i| Ease::BackOut(1.2).apply(i as f32 / 100.0))
        .fold(0.0f32, f32::max);
    assert!(peak > 1.0);
}

#[test]
fn in_out_eases_are_symmetric_at_midpoint() {
    assert!((Ease::Power2InOut.apply(0.5) - 0.5).abs() < 1e-6);
    assert!((Ease::ExpoInOut.apply(0.5) - 0.5).abs() < 1e-6);
}

#[test]
fn reveal_runs_three_point_seven_seconds() {
    let tl = envelope_reveal();
    assert!((tl.duration() - 3.7).abs() < 1e-6);
    let starts: Vec<f32> = tl.tracks().iter().map(|t| t.start).collect();
    assert!(starts.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn initial_state_is_hidden_and_collapsed() {
    let tl = envelope_reveal();
    let overlay = tl.sample(Target::Overlay, 0.0);
    assert_eq!(overlay.auto_alpha, Some(0.0));
    let env = tl.sample(Target::Envelope, 0.0);
    assert_eq!(env.scale, Some(0.5));
    assert_eq!(env.opacity, Some(0.0));
    let flap = tl.sample(Target::Flap, 0.0);
    assert_eq!(flap.rotate_x, Some(0.0));
    assert_eq!(flap.z_index, Some(40));
    assert_eq!(tl.sample(Target::Pocket, 0.0).z_index, Some(30));
    let letter = tl.sample(Target::Letter, 0.0);
    assert_eq!(letter.z_index, Some(20));
    assert_eq!(letter.translate_y, Some(0.0));
    assert_eq!(letter.expand, Some(0.0));
    assert_eq!(tl.sample(Target::LetterText, 0.0).opacity, Some(0.0));
    assert_eq!(tl.sample(Target::CloseButton, 0.0).auto_alpha, Some(0.0));
}

#[test]
fn final_state_is_fully_revealed() {
    let tl = envelope_reveal();
    let t = tl.duration();
    assert_eq!(tl.sample(Target::Overlay, t).auto_alpha, Some(1.0));
    assert_eq!(tl.sample(Target::Flap, t).rotate_x, Some(180.0));
    assert_eq!(tl.sample(Target::Flap, t).z_index, Some(10));
    let letter = tl.sample(Target::Letter, t);
    assert_eq!(letter.z_index, Some(100));
    assert_eq!(letter.expand, Some(1.0));
    assert!(letter.translate_y.map(|y| y.abs() < 1e-4).unwrap_or(false));
    assert_eq!(tl.sample(Target::LetterText, t).opacity, Some(1.0));
    assert_eq!(tl.sample(Target::CloseButton, t).auto_alpha, Some(1.0));
}

#[test]
fn instantaneous_sets_switch_at_their_time() {
    let tl = envelope_reveal();
    assert_eq!(tl.value(Target::Flap, Prop::ZIndex, 1.49), Some(40.0));
    assert_eq!(tl.value(Target::Flap, Prop::ZIndex, 1.5), Some(10.0));
    assert_eq!(tl.value(Target::Letter, Prop::ZIndex, 1.89), Some(20.0));
    assert_eq!(tl.value(Target::Letter, Prop::ZIndex, 1.9), Some(100.0));
}

#[test]
fn letter_slides_up_before_expanding() {
    let tl = envelope_reveal();
    let y = tl.value(Target::Letter, Prop::TranslateY, 1.9).unwrap_or(0.0);
    assert!((y + 150.0).abs() < 1e-3);
    let mid = tl.value(Target::Letter, Prop::TranslateY, 1.7).unwrap_or(0.0);
    assert!(mid < 0.0 && mid > -150.0);
}

#[test]
fn untouched_property_has_no_value() {
    let tl = envelope_reveal();
    assert_eq!(tl.value(Target::Pocket, Prop::Opacity, 1.0), None);
    assert_eq!(tl.sample(Target::Pocket, 2.0).scale, None);
}

#[test]
fn css_reflects_auto_alpha_visibility() {
    let tl = envelope_reveal();
    let hidden = tl.sample(Target::CloseButton, 0.0).css();
    assert!(hidden.contains(&("visibility", "hidden".to_string())));
    let shown = tl.sample(Target::CloseButton, 3.7).css();
    assert!(shown.contains(&("visibility", "inherit".to_string())));
    assert!(shown.contains(&("opacity", "1.0000".to_string())));
}

#[test]
fn css_combines_transforms_and_custom_property() {
    let style = ElementStyle {
        translate_y: Some(-150.0),
        scale: Some(1.0),
        expand: Some(0.5),
        z_index: Some(100),
        ..ElementStyle::default()
    };
    let css = style.css();
    assert!(css.contains(&("transform", "translateY(-150.00px) scale(1.0000)".to_string())));
    assert!(css.contains(&("--expand", "0.5000".to_string())));
    assert!(css.contains(&("z-index", "100".to_string())));
}

#[test]
fn selectors_cover_every_target() {
    for t in Target::ALL {
        assert!(t.selector().starts_with('.'));
    }
    assert_eq!(Target::Overlay.selector(), ".overlay");
    assert_eq!(Target::LetterText.selector(), ".letter-inner");
}

#[test]
fn playhead_forward_completes_once() {
    let mut p = Playhead::new(3.7);
    assert_eq!(p.advance(0.1), PlayheadEvent::Idle);
    p.play(1.0);
    let mut completed = 0;
    for _ in 0..300 {
        if p.advance(1.0 / 60.0) == PlayheadEvent::Completed {
            completed += 1;
        }
    }
    assert_eq!(completed, 1);
    assert!(!p.playing);
    assert_eq!(p.time, 3.7);
}

#[test]
fn reverse_is_faster_and_reports_completion() {
    let mut p = Playhead::new(3.7);
    p.play(1.0);
    p.advance(10.0);
    p.reverse(1.5);
    // 2 s of wall time at 1.5× covers 3 s of timeline
    assert_eq!(p.advance(2.0), PlayheadEvent::Running);
    assert!((p.time - 0.7).abs() < 1e-5);
    assert_eq!(p.advance(1.0), PlayheadEvent::ReverseCompleted);
    assert_eq!(p.time, 0.0);
    assert_eq!(p.direction, Direction::Reverse);
}

#[test]
fn reopening_mid_reverse_resumes_forward_from_current_time() {
    let mut p = Playhead::new(3.7);
    p.play(1.0);
    p.advance(3.7);
    p.reverse(1.5);
    p.advance(1.0);
    let t = p.time;
    p.play(1.0);
    assert_eq!(p.advance(0.5), PlayheadEvent::Running);
    assert!((p.time - (t + 0.5)).abs() < 1e-5);
}
