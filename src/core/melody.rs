/// One entry of a melody: pitch in Hertz and length in beats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Note {
    pub frequency_hz: f32,
    pub beats: f32,
}

const fn note(frequency_hz: f32, beats: f32) -> Note {
    Note {
        frequency_hz,
        beats,
    }
}

// Fifth-octave pitches used by the tune
pub const C5: f32 = 523.25;
pub const D5: f32 = 587.33;
pub const E5: f32 = 659.25;
pub const F5: f32 = 698.46;
pub const G5: f32 = 783.99;
pub const A5: f32 = 880.00;
pub const B5: f32 = 987.77;

/// "Jingle Bells" chorus, looped by the player.
pub const JINGLE_BELLS: &[Note] = &[
    // E E E
    note(E5, 0.25),
    note(E5, 0.25),
    note(E5, 0.5),
    // E E E
    note(E5, 0.25),
    note(E5, 0.25),
    note(E5, 0.5),
    // E G C D E
    note(E5, 0.25),
    note(G5, 0.25),
    note(C5, 0.25),
    note(D5, 0.25),
    note(E5, 1.0),
    // F F F F
    note(F5, 0.25),
    note(F5, 0.25),
    note(F5, 0.25),
    note(F5, 0.25),
    // F E E E E
    note(F5, 0.25),
    note(E5, 0.25),
    note(E5, 0.25),
    note(E5, 0.125),
    note(E5, 0.125),
    // E D D E D G
    note(E5, 0.25),
    note(D5, 0.25),
    note(D5, 0.25),
    note(E5, 0.25),
    note(D5, 0.5),
    note(G5, 0.5),
];

/// Immutable, cyclic note sequence.
#[derive(Clone, Debug)]
pub struct Melody {
    notes: &'static [Note],
}

impl Melody {
    /// Wrap a static note table. Returns `None` for an empty table, which
    /// could never advance the playback cursor.
    pub fn new(notes: &'static [Note]) -> Option<Self> {
        if notes.is_empty() {
            None
        } else {
            Some(Self { notes })
        }
    }

    pub fn jingle_bells() -> Self {
        Self {
            notes: JINGLE_BELLS,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Note at `index`, wrapping past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Note {
        self.notes[index % self.notes.len()]
    }

    #[inline]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.notes.len()
    }

    pub fn notes(&self) -> &'static [Note] {
        self.notes
    }

    /// Total length of one pass in beats.
    pub fn total_beats(&self) -> f32 {
        self.notes.iter().map(|n| n.beats).sum()
    }
}

impl Default for Melody {
    fn default() -> Self {
        Self::jingle_bells()
    }
}
