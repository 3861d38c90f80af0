use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::borrow::Borrow;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use eventclock_config::TimeUnit;

use crate::clock::{Clock, MonotonicClock};
use crate::error::ClockError;
use crate::registry::EventClock;

/// An [`EventClock`] behind a lock.
///
/// Each call holds the lock for the duration of that one operation only.
/// Clones share the same registry.
pub struct SharedEventClock<K, C = MonotonicClock> {
    inner: Arc<Mutex<EventClock<K, C>>>,
}

impl<K, C> Clone for SharedEventClock<K, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: Ord> SharedEventClock<K> {
    pub fn new(unit: TimeUnit) -> Self {
        Self::from_clock(EventClock::new(unit))
    }
}

impl<K: Ord, C: Clock> SharedEventClock<K, C> {
    pub fn from_clock(clock: EventClock<K, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(clock)),
        }
    }

    pub fn unit(&self) -> TimeUnit {
        self.inner.lock().unit()
    }

    pub fn start<Q>(&self, event: &Q) -> Result<(), ClockError>
    where
        K: Borrow<Q>,
        Q: Ord + ToOwned<Owned = K> + fmt::Debug + ?Sized,
    {
        self.inner.lock().start(event)
    }

    pub fn stop<Q>(&self, event: &Q) -> Result<Duration, ClockError>
    where
        K: Borrow<Q>,
        Q: Ord + ToOwned<Owned = K> + fmt::Debug + ?Sized,
    {
        self.inner.lock().stop(event)
    }

    pub fn get_duration<Q>(&self, event: &Q) -> Result<Duration, ClockError>
    where
        K: Borrow<Q>,
        Q: Ord + ToOwned<Owned = K> + fmt::Debug + ?Sized,
    {
        self.inner.lock().get_duration(event)
    }

    pub fn get_count<Q>(&self, event: &Q) -> Result<u128, ClockError>
    where
        K: Borrow<Q>,
        Q: Ord + ToOwned<Owned = K> + fmt::Debug + ?Sized,
    {
        self.inner.lock().get_count(event)
    }

    pub fn format_report<Q>(&self, event: &Q) -> String
    where
        K: Borrow<Q>,
        Q: Ord + ToOwned<Owned = K> + fmt::Display + ?Sized,
    {
        self.inner.lock().format_report(event)
    }

    /// The line is formatted under the lock; the write happens after
    /// releasing it.
    pub fn print_report<Q, W>(&self, event: &Q, out: &mut W) -> io::Result<()>
    where
        K: Borrow<Q>,
        Q: Ord + ToOwned<Owned = K> + fmt::Display + ?Sized,
        W: Write + ?Sized,
    {
        let line = self.format_report(event);
        writeln!(out, "{line}")
    }

    /// Run `f` with exclusive access to the registry
    pub fn with<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut EventClock<K, C>) -> T,
    {
        f(&mut self.inner.lock())
    }
}

static GLOBAL_EVENT_CLOCK: Lazy<SharedEventClock<String>> =
    Lazy::new(|| SharedEventClock::new(TimeUnit::Microseconds));

/// Process-wide registry, accumulating in microseconds
pub fn global() -> &'static SharedEventClock<String> {
    &GLOBAL_EVENT_CLOCK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::thread;

    #[test]
    fn test_clones_share_state() {
        let clock = ManualClock::new();
        let shared = SharedEventClock::from_clock(EventClock::<String, _>::with_clock(
            TimeUnit::Seconds,
            clock.clone(),
        ));
        let other = shared.clone();

        shared.start("job").unwrap();
        clock.advance(Duration::from_secs(2));
        other.stop("job").unwrap();

        assert_eq!(shared.get_count("job"), Ok(2));
        assert_eq!(
            other.format_report("job"),
            "The accumulate time of event \"job\" is 2 second(s)"
        );
    }

    #[test]
    fn test_threads_use_separate_labels() {
        let shared: SharedEventClock<String> = SharedEventClock::new(TimeUnit::Nanoseconds);

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let label = format!("worker-{worker}");
                    for _ in 0..10 {
                        shared.start(label.as_str()).unwrap();
                        shared.stop(label.as_str()).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        shared.with(|events| {
            assert_eq!(events.len(), 4);
            assert!(events.labels().all(|label| !events.is_recording(label.as_str())));
        });
    }

    #[test]
    fn test_global_registry() {
        let events = global();
        assert_eq!(events.unit(), TimeUnit::Microseconds);

        events.start("global-test").unwrap();
        assert!(events.start("global-test").is_err());
        events.stop("global-test").unwrap();

        let mut out = Vec::new();
        events.print_report("global-test", &mut out).unwrap();
        let line = String::from_utf8(out).unwrap();
        assert!(line.starts_with("The accumulate time of event \"global-test\" is "));
        assert!(line.ends_with(" microsecond(s)\n"));
    }
}
