use std::time::{Duration, Instant};

use eventclock_config::TimeUnit;

/// Timing state of a single event.
///
/// An event is recording while it holds a start timestamp. The accumulated
/// total only ever grows, and only when a recording interval is finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventStatus {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl EventStatus {
    pub fn is_recording(&self) -> bool {
        self.started_at.is_some()
    }

    /// Start of the open interval, if any
    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    pub(crate) fn begin(&mut self, now: Instant) {
        self.started_at = Some(now);
    }

    /// Close the open interval and add it, truncated to `unit`, to the
    /// total. Returns the amount added, or `None` if nothing was recording.
    pub(crate) fn finish(&mut self, now: Instant, unit: TimeUnit) -> Option<Duration> {
        let started_at = self.started_at.take()?;
        let lap = unit.truncate(now.saturating_duration_since(started_at));
        self.accumulated = self.accumulated.saturating_add(lap);
        Some(lap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_idle() {
        let status = EventStatus::default();
        assert!(!status.is_recording());
        assert_eq!(status.started_at(), None);
        assert_eq!(status.accumulated(), Duration::ZERO);
    }

    #[test]
    fn test_finish_truncates_and_accumulates() {
        let origin = Instant::now();
        let mut status = EventStatus::default();

        status.begin(origin);
        let lap = status.finish(origin + Duration::from_millis(1_900), TimeUnit::Seconds);
        assert_eq!(lap, Some(Duration::from_secs(1)));

        status.begin(origin);
        status.finish(origin + Duration::from_millis(2_300), TimeUnit::Seconds);
        assert_eq!(status.accumulated(), Duration::from_secs(3));
        assert!(!status.is_recording());
    }

    #[test]
    fn test_finish_without_begin_is_noop() {
        let mut status = EventStatus::default();
        assert_eq!(status.finish(Instant::now(), TimeUnit::Nanoseconds), None);
        assert_eq!(status, EventStatus::default());
    }
}
