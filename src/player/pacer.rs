use crate::UMicros;
use alloc::boxed::Box;

#[doc = r#"
Decides how long the player waits before sending the next batch of bytes.

Times are offsets from the start of playback. A pacer only delays; it must
not reorder or drop anything.
"#]
pub trait Pacer {
    /// Called once before the first event.
    fn start(&mut self) {}

    /// Return once playback time `at` has been reached.
    fn wait_until(&mut self, at: UMicros);
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn start(&mut self) {
        (**self).start()
    }
    fn wait_until(&mut self, at: UMicros) {
        (**self).wait_until(at)
    }
}

impl<P: Pacer + ?Sized> Pacer for Box<P> {
    fn start(&mut self) {
        (**self).start()
    }
    fn wait_until(&mut self, at: UMicros) {
        (**self).wait_until(at)
    }
}

/// Never waits. Useful to dump a file as fast as the sink takes it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacer;

impl Pacer for NoPacer {
    fn wait_until(&mut self, _at: UMicros) {}
}

#[cfg(feature = "std")]
pub use thread::ThreadPacer;

#[cfg(feature = "std")]
mod thread {
    use super::*;
    use std::time::{Duration, Instant};

    /// Sleeps the current thread against the wall clock.
    ///
    /// Deadlines are absolute, measured from [`Pacer::start`], so time
    /// spent decoding and sending does not accumulate as drift.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ThreadPacer {
        started: Option<Instant>,
    }

    impl ThreadPacer {
        /// A pacer that starts counting on the first event
        pub const fn new() -> Self {
            Self { started: None }
        }
    }

    impl Pacer for ThreadPacer {
        fn start(&mut self) {
            self.started = Some(Instant::now());
        }

        fn wait_until(&mut self, at: UMicros) {
            let started = *self.started.get_or_insert_with(Instant::now);
            let deadline = started + Duration::from(at);
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
        }
    }

}
