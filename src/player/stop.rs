use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, Ordering};

/// Polled between events; returning `true` ends playback.
pub trait StopSignal {
    /// True once playback should stop
    fn should_stop(&self) -> bool;
}

/// Never asks to stop
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverStop;

impl StopSignal for NeverStop {
    fn should_stop(&self) -> bool {
        false
    }
}

impl StopSignal for AtomicBool {
    fn should_stop(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: StopSignal + ?Sized> StopSignal for &T {
    fn should_stop(&self) -> bool {
        (**self).should_stop()
    }
}

impl<T: StopSignal + ?Sized> StopSignal for Arc<T> {
    fn should_stop(&self) -> bool {
        (**self).should_stop()
    }
}

/// Adapts any closure
#[derive(Debug, Clone, Copy)]
pub struct StopFn<F>(pub F);

impl<F: Fn() -> bool> StopSignal for StopFn<F> {
    fn should_stop(&self) -> bool {
        (self.0)()
    }
}
