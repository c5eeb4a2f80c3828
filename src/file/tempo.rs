use crate::{
    UMicros,
    events::{MetaType, TrackEvent},
};

/// Microseconds per quarter note, as carried by a Set Tempo meta event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo(u32);

impl Default for Tempo {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Tempo {
    /// 120 beats per minute, assumed until a Set Tempo event says otherwise
    pub const DEFAULT: Self = Self(500_000);

    /// Create a tempo from microseconds per quarter note
    pub const fn new(micros_per_quarter_note: u32) -> Self {
        Self(micros_per_quarter_note)
    }

    /// Interpret the first three bytes as a 24 bit big-endian value.
    ///
    /// Returns `None` if fewer than three bytes are given.
    pub const fn from_be_bytes(bytes: &[u8]) -> Option<Self> {
        let [a, b, c, ..] = bytes else {
            return None;
        };
        Some(Self(u32::from_be_bytes([0, *a, *b, *c])))
    }

    /// Microseconds per quarter note
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.0
    }

    /// Quarter notes per minute
    pub fn bpm(&self) -> f64 {
        if self.0 == 0 {
            return f64::INFINITY;
        }
        60_000_000. / self.0 as f64
    }
}

#[doc = r#"
Converts delta times to microseconds under the current tempo.

The tempo is reset when a file header is read and otherwise only changes
when a Set Tempo event is observed. It carries over from one track to the
next.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempoTracker {
    tempo: Tempo,
    division: u16,
}

impl TempoTracker {
    /// Start at the default tempo with `division` ticks per quarter note
    pub const fn new(division: u16) -> Self {
        Self {
            tempo: Tempo::DEFAULT,
            division,
        }
    }

    /// The tempo in effect
    pub const fn tempo(&self) -> Tempo {
        self.tempo
    }

    /// Ticks per quarter note
    pub const fn division(&self) -> u16 {
        self.division
    }

    /// Replace the tempo
    pub fn set_tempo(&mut self, tempo: Tempo) {
        self.tempo = tempo;
    }

    /// Back to the default tempo
    pub fn reset(&mut self) {
        self.tempo = Tempo::DEFAULT;
    }

    /// Apply `event` if it is a Set Tempo with at least three stored bytes.
    ///
    /// Returns the new tempo when one was applied.
    pub fn observe(&mut self, event: &TrackEvent) -> Option<Tempo> {
        if event.meta_type() != Some(MetaType::Tempo) {
            return None;
        }
        let tempo = Tempo::from_be_bytes(event.data())?;
        self.tempo = tempo;
        Some(tempo)
    }

    /// `ticks * tempo / division`, in microseconds.
    pub const fn ticks_to_micros(&self, ticks: u32) -> UMicros {
        let product = ticks as u64 * self.tempo.0 as u64;
        match product.checked_div(self.division as u64) {
            Some(us) => UMicros::new(us),
            None => UMicros::ZERO,
        }
    }
}
