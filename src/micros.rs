use core::ops::{Add, AddAssign, Sub};

/// Unsigned microseconds, the unit of every playback timestamp.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UMicros(u64);

impl UMicros {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Creates a new instance of microseconds
    #[inline]
    pub const fn new(microseconds: u64) -> Self {
        Self(microseconds)
    }

    /// Returns the microseconds as a u64
    #[inline]
    pub const fn us(&self) -> u64 {
        self.0
    }

    /// ms -> us
    #[inline]
    pub const fn from_ms(ms: u64) -> Self {
        Self(ms * 1_000)
    }

    /// Truncating conversion to whole milliseconds
    #[inline]
    pub const fn as_ms(&self) -> u64 {
        self.0 / 1_000
    }

    /// Returns seconds
    #[inline]
    pub const fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000.
    }

    /// Returns no time if I am less than other.
    pub const fn saturating_sub(&self, other: Self) -> UMicros {
        if self.0 < other.0 {
            UMicros(0)
        } else {
            UMicros(self.0 - other.0)
        }
    }

    /// Adds without wrapping past `u64::MAX`.
    pub const fn saturating_add(&self, other: Self) -> UMicros {
        UMicros(self.0.saturating_add(other.0))
    }
}

impl Add for UMicros {
    type Output = UMicros;
    fn add(self, rhs: Self) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl AddAssign for UMicros {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.saturating_add(rhs);
    }
}

impl Sub for UMicros {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        self.saturating_sub(rhs)
    }
}

impl From<u64> for UMicros {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(feature = "std")]
impl From<UMicros> for std::time::Duration {
    fn from(value: UMicros) -> Self {
        std::time::Duration::from_micros(value.0)
    }
}
