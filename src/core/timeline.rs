// Reversible keyframe timeline for the envelope reveal.
//
// A `Timeline` is a flat list of property tracks on absolute time. Sampling
// at any time yields the full style of every element, so playing forward,
// reversing midway, or jumping is just a matter of moving the `Playhead`.

/// Easing curves, named after their CSS/animation-library counterparts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    Power1Out,
    Power2Out,
    Power2InOut,
    ExpoInOut,
    /// Overshooting ease-out with the given overshoot amount.
    BackOut(f32),
}

impl Ease {
    /// Map linear progress in `[0, 1]` to eased progress.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t).powi(2),
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) * 0.5
                }
            }
            Ease::ExpoInOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    2.0_f32.powf(20.0 * t - 10.0) * 0.5
                } else {
                    (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) * 0.5
                }
            }
            Ease::BackOut(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u * u * u + s * u * u
            }
        }
    }
}

/// Elements animated by the reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    Overlay,
    Envelope,
    Flap,
    Pocket,
    Letter,
    LetterText,
    CloseButton,
}

impl Target {
    pub const ALL: [Target; 7] = [
        Target::Overlay,
        Target::Envelope,
        Target::Flap,
        Target::Pocket,
        Target::Letter,
        Target::LetterText,
        Target::CloseButton,
    ];

    pub fn selector(self) -> &'static str {
        match self {
            Target::Overlay => ".overlay",
            Target::Envelope => ".envelope-wrapper",
            Target::Flap => ".envelope-flap",
            Target::Pocket => ".envelope-pocket",
            Target::Letter => ".letter",
            Target::LetterText => ".letter-inner",
            Target::CloseButton => ".close-btn",
        }
    }
}

/// Animatable properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prop {
    /// Opacity that also hides the element (`visibility`) at zero.
    AutoAlpha,
    Opacity,
    Scale,
    /// Degrees.
    RotateX,
    /// Pixels.
    TranslateY,
    ZIndex,
    /// 0..1 progress exposed to CSS as `--expand`.
    Expand,
}

/// A single property change. A zero `duration` is an instantaneous set.
#[derive(Clone, Copy, Debug)]
pub struct Track {
    pub target: Target,
    pub prop: Prop,
    pub from: f32,
    pub to: f32,
    pub start: f32,
    pub duration: f32,
    pub ease: Ease,
}

impl Track {
    #[inline]
    pub fn end(&self) -> f32 {
        self.start + self.duration
    }

    /// Value at absolute time `t`; assumes `t >= start`.
    pub fn value_at(&self, t: f32) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let p = self.ease.apply((t - self.start) / self.duration);
        self.from + (self.to - self.from) * p
    }
}

fn tween(target: Target, prop: Prop, from: f32, to: f32, start: f32, duration: f32, ease: Ease) -> Track {
    Track {
        target,
        prop,
        from,
        to,
        start,
        duration,
        ease,
    }
}

fn set(target: Target, prop: Prop, from: f32, to: f32, at: f32) -> Track {
    tween(target, prop, from, to, at, 0.0, Ease::Linear)
}

/// Resolved style of one element at a sampled time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementStyle {
    pub auto_alpha: Option<f32>,
    pub opacity: Option<f32>,
    pub scale: Option<f32>,
    pub rotate_x: Option<f32>,
    pub translate_y: Option<f32>,
    pub z_index: Option<i32>,
    pub expand: Option<f32>,
}

impl ElementStyle {
    fn set(&mut self, prop: Prop, v: f32) {
        match prop {
            Prop::AutoAlpha => self.auto_alpha = Some(v),
            Prop::Opacity => self.opacity = Some(v),
            Prop::Scale => self.scale = Some(v),
            Prop::RotateX => self.rotate_x = Some(v),
            Prop::TranslateY => self.translate_y = Some(v),
            Prop::ZIndex => self.z_index = Some(v.round() as i32),
            Prop::Expand => self.expand = Some(v),
        }
    }

    /// CSS declarations as `(property, value)` pairs.
    pub fn css(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(a) = self.auto_alpha {
            out.push(("opacity", format!("{:.4}", a)));
            let vis = if a <= 0.0 { "hidden" } else { "inherit" };
            out.push(("visibility", vis.to_string()));
        } else if let Some(o) = self.opacity {
            out.push(("opacity", format!("{:.4}", o)));
        }
        let mut transform = Vec::new();
        if let Some(y) = self.translate_y {
            transform.push(format!("translateY({:.2}px)", y));
        }
        if let Some(s) = self.scale {
            transform.push(format!("scale({:.4})", s));
        }
        if let Some(r) = self.rotate_x {
            transform.push(format!("rotateX({:.2}deg)", r));
        }
        if !transform.is_empty() {
            out.push(("transform", transform.join(" ")));
        }
        if let Some(z) = self.z_index {
            out.push(("z-index", z.to_string()));
        }
        if let Some(e) = self.expand {
            out.push(("--expand", format!("{:.4}", e)));
        }
        out
    }
}

pub struct Timeline {
    tracks: Vec<Track>,
    duration: f32,
}

impl Timeline {
    pub fn new(mut tracks: Vec<Track>) -> Self {
        tracks.sort_by(|a, b| a.start.total_cmp(&b.start));
        let duration = tracks.iter().map(Track::end).fold(0.0, f32::max);
        Self { tracks, duration }
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Value of `prop` on `target` at time `t`, or `None` when no track
    /// animates it. Before the first track starts, that track's `from` holds;
    /// afterwards the most recently started track wins.
    pub fn value(&self, target: Target, prop: Prop, t: f32) -> Option<f32> {
        let mut value = None;
        for tr in self
            .tracks
            .iter()
            .filter(|tr| tr.target == target && tr.prop == prop)
        {
            if value.is_none() {
                value = Some(tr.from);
            }
            if t >= tr.start {
                value = Some(tr.value_at(t));
            }
        }
        value
    }

    /// Full style of `target` at time `t`.
    pub fn sample(&self, target: Target, t: f32) -> ElementStyle {
        let mut style = ElementStyle::default();
        let mut seen: Vec<Prop> = Vec::new();
        for tr in self.tracks.iter().filter(|tr| tr.target == target) {
            if seen.contains(&tr.prop) {
                continue;
            }
            seen.push(tr.prop);
            if let Some(v) = self.value(target, tr.prop, t) {
                style.set(tr.prop, v);
            }
        }
        style
    }
}

/// Envelope opening: fade in, pop the envelope, open the flap, slide the
/// letter out, enlarge it to a card and reveal its text.
pub fn envelope_reveal() -> Timeline {
    use Prop::*;
    use Target::*;
    Timeline::new(vec![
        tween(Overlay, AutoAlpha, 0.0, 1.0, 0.0, 0.5, Ease::Power1Out),
        tween(Envelope, Scale, 0.5, 1.0, 0.3, 0.7, Ease::BackOut(1.2)),
        tween(Envelope, Opacity, 0.0, 1.0, 0.3, 0.7, Ease::BackOut(1.2)),
        set(Pocket, ZIndex, 30.0, 30.0, 0.0),
        tween(Flap, RotateX, 0.0, 180.0, 1.0, 0.5, Ease::Power2InOut),
        set(Flap, ZIndex, 40.0, 10.0, 1.5),
        tween(Letter, TranslateY, 0.0, -150.0, 1.5, 0.4, Ease::Power2Out),
        set(Letter, ZIndex, 20.0, 100.0, 1.9),
        tween(Letter, Expand, 0.0, 1.0, 2.0, 1.0, Ease::ExpoInOut),
        tween(Letter, TranslateY, -150.0, 0.0, 2.0, 1.0, Ease::ExpoInOut),
        tween(LetterText, Opacity, 0.0, 1.0, 2.7, 1.0, Ease::Power1Out),
        tween(CloseButton, AutoAlpha, 0.0, 1.0, 2.7, 0.3, Ease::Power1Out),
    ])
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Outcome of advancing the playhead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayheadEvent {
    Idle,
    Running,
    Completed,
    ReverseCompleted,
}

/// Play position on a timeline of fixed `duration`.
#[derive(Clone, Debug)]
pub struct Playhead {
    pub time: f32,
    pub duration: f32,
    pub direction: Direction,
    pub time_scale: f32,
    pub playing: bool,
}

impl Playhead {
    pub fn new(duration: f32) -> Self {
        Self {
            time: 0.0,
            duration: duration.max(0.0),
            direction: Direction::Forward,
            time_scale: 1.0,
            playing: false,
        }
    }

    pub fn play(&mut self, time_scale: f32) {
        self.direction = Direction::Forward;
        self.time_scale = time_scale.max(0.0);
        self.playing = true;
    }

    pub fn reverse(&mut self, time_scale: f32) {
        self.direction = Direction::Reverse;
        self.time_scale = time_scale.max(0.0);
        self.playing = true;
    }

    /// Move by `dt_sec` of wall time. Completion is reported once, on the
    /// step that reaches an end.
    pub fn advance(&mut self, dt_sec: f32) -> PlayheadEvent {
        if !self.playing {
            return PlayheadEvent::Idle;
        }
        let step = dt_sec.max(0.0) * self.time_scale;
        match self.direction {
            Direction::Forward => {
                self.time = (self.time + step).min(self.duration);
                if self.time >= self.duration {
                    self.playing = false;
                    return PlayheadEvent::Completed;
                }
            }
            Direction::Reverse => {
                self.time = (self.time - step).max(0.0);
                if self.time <= 0.0 {
                    self.playing = false;
                    return PlayheadEvent::ReverseCompleted;
                }
            }
        }
        PlayheadEvent::Running
    }
}
