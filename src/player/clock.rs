use crate::UMicros;

/// Playback time bookkeeping.
///
/// `next` is when the event being handled is due; `last_emitted` is the
/// time of the last batch sent to the sink. Neither ever moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Clock {
    next: UMicros,
    last_emitted: UMicros,
}

impl Clock {
    /// Both times at zero
    pub const fn new() -> Self {
        Self {
            next: UMicros::ZERO,
            last_emitted: UMicros::ZERO,
        }
    }

    /// Push the schedule forward by `elapsed`.
    pub fn advance(&mut self, elapsed: UMicros) {
        self.next += elapsed;
    }

    /// When the current event is due
    pub const fn next(&self) -> UMicros {
        self.next
    }

    /// When the last batch went out
    pub const fn last_emitted(&self) -> UMicros {
        self.last_emitted
    }

    /// True if the sink has to wait before the current event.
    pub fn needs_pacing(&self) -> bool {
        self.next != self.last_emitted
    }

    /// Record that output caught up with the schedule.
    pub fn mark_emitted(&mut self) {
        self.last_emitted = self.next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paces_only_when_time_moved() {
        let mut clock = Clock::new();
        assert!(!clock.needs_pacing());

        clock.advance(UMicros::ZERO);
        assert!(!clock.needs_pacing());

        clock.advance(UMicros::new(250));
        assert!(clock.needs_pacing());
        clock.mark_emitted();
        assert!(!clock.needs_pacing());
        assert_eq!(clock.last_emitted(), UMicros::new(250));

        clock.advance(UMicros::new(250));
        assert_eq!(clock.next(), UMicros::new(500));
    }
}
