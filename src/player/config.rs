use crate::events::{DEFAULT_PAYLOAD_CAP, MIN_PAYLOAD_CAP};

#[doc = r#"
Knobs for a [`Player`](super::Player).

The defaults reproduce the classic behaviour: 128 stored payload bytes,
running status kept across tracks, and an all-sound-off sweep when
playback ends.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerConfig {
    payload_cap: usize,
    strict_vlq: bool,
    reset_running_status_per_track: bool,
    all_sound_off: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            payload_cap: DEFAULT_PAYLOAD_CAP,
            strict_vlq: true,
            reset_running_status_per_track: false,
            all_sound_off: true,
        }
    }
}

impl PlayerConfig {
    /// Bytes stored per meta or system exclusive event. Never below 3.
    pub const fn with_payload_cap(mut self, cap: usize) -> Self {
        self.payload_cap = if cap < MIN_PAYLOAD_CAP {
            MIN_PAYLOAD_CAP
        } else {
            cap
        };
        self
    }
    /// Fail on variable length quantities longer than five bytes
    pub const fn with_strict_vlq(mut self, strict: bool) -> Self {
        self.strict_vlq = strict;
        self
    }
    /// Clear the running status at every track header
    pub const fn with_reset_running_status_per_track(mut self, reset: bool) -> Self {
        self.reset_running_status_per_track = reset;
        self
    }
    /// Send all sound off and all notes off on every channel at the end
    pub const fn with_all_sound_off(mut self, enabled: bool) -> Self {
        self.all_sound_off = enabled;
        self
    }

    /// Stored payload cap
    pub const fn payload_cap(&self) -> usize {
        self.payload_cap
    }
    /// See [`PlayerConfig::with_strict_vlq`]
    pub const fn strict_vlq(&self) -> bool {
        self.strict_vlq
    }
    /// See [`PlayerConfig::with_reset_running_status_per_track`]
    pub const fn reset_running_status_per_track(&self) -> bool {
        self.reset_running_status_per_track
    }
    /// See [`PlayerConfig::with_all_sound_off`]
    pub const fn all_sound_off(&self) -> bool {
        self.all_sound_off
    }
}
