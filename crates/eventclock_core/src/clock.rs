use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of monotonic timestamps for an [`EventClock`](crate::EventClock).
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The host's monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same position, so a test can keep a handle while the
/// registry owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Move the clock forward by `by`.
    ///
    /// Stops short at the latest `Instant` the platform can represent.
    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock();
        let mut remaining = by;
        let mut step = by;

        while !remaining.is_zero() && !step.is_zero() {
            step = step.min(remaining);
            let next = offset.saturating_add(step);
            if self.origin.checked_add(next).is_some() {
                *offset = next;
                remaining -= step;
            } else {
                step /= 2;
            }
        }
    }

    /// Total amount the clock has been advanced
    pub fn elapsed(&self) -> Duration {
        *self.offset.lock()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        // advance keeps origin + offset representable
        let offset = *self.offset.lock();
        self.origin.checked_add(offset).unwrap_or(self.origin)
    }
}
