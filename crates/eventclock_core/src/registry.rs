use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

use eventclock_config::TimeUnit;
use tracing::{debug, warn};

use crate::clock::{Clock, MonotonicClock};
use crate::error::ClockError;
use crate::status::EventStatus;

/// Registry of lap timers keyed by event label.
///
/// Every label moves between two states, idle and recording. `start` opens
/// an interval, `stop` closes it and adds the elapsed time, truncated to the
/// registry's unit, to the label's running total. Labels are created on
/// first use by any operation and live as long as the registry.
///
/// Invalid transitions (`start` while recording, `stop` while idle, or a
/// duration query while recording) return a [`ClockError`], log a warning
/// and leave the registry untouched.
///
/// The registry assumes a single owner; wrap it in a
/// [`SharedEventClock`](crate::SharedEventClock) to use it across threads.
#[derive(Debug)]
pub struct EventClock<K, C = MonotonicClock> {
    unit: TimeUnit,
    clock: C,
    events: BTreeMap<K, EventStatus>,
}

impl<K: Ord> EventClock<K> {
    pub fn new(unit: TimeUnit) -> Self {
        Self::with_clock(unit, MonotonicClock)
    }
}

impl<K: Ord, C: Clock> EventClock<K, C> {
    pub fn with_clock(unit: TimeUnit, clock: C) -> Self {
        Self {
            unit,
            clock,
            events: BTreeMap::new(),
        }
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Open a recording interval for `event`
    pub fn start<Q>(&mut self, event: &Q) -> Result<(), ClockError>
    where
        K: Borrow<Q>,
        Q: Ord + ToOwned<Owned = K> + fmt::Debug + ?Sized,
    {
        let clock = &self.clock;
        let started = with_status(&mut self.events, event, |status| {
            if status.is_recording() {
                return false;
            }
            status.begin(clock.now());
            true
        });

        if !started {
            warn!(event = ?event, "event is already recording");
            return Err(ClockError::already_recording(event));
        }

        debug!(event = ?event, "event started");
        Ok(())
    }

    /// Close the open interval for `event`.
    ///
    /// Returns the amount added to the event's total, already truncated to
    /// the registry's unit.
    pub fn stop<Q>(&mut self, event: &Q) -> Result<Duration, ClockError>
    where
        K: Borrow<Q>,
        Q: Ord + ToOwned<Owned = K> + fmt::Debug + ?Sized,
    {
        let now = self.clock.now();
        let unit = self.unit;

        match with_status(&mut self.events, event, |status| status.finish(now, unit)) {
            Some(lap) => {
                debug!(event = ?event, lap = ?lap, "event stopped");
                Ok(lap)
            }
            None => {
                warn!(event = ?event, "event is not recording");
                Err(ClockError::not_recording(event))
            }
        }
    }

    /// Accumulated time of `event` over all completed intervals
    pub fn get_duration<Q>(&mut self, event: &Q) -> Result<Duration, ClockError>
    where
        K: Borrow<Q>,
        Q: Ord + ToOwned<Owned = K> + fmt::Debug + ?Sized,
    {
        let accumulated = with_status(&mut self.events, event, |status| {
            (!status.is_recording()).then_some(status.accumulated())
        });

        accumulated.ok_or_else(|| {
            warn!(event = ?event, "event is recording, duration is not available");
            ClockError::already_recording(event)
        })
    }

    /// Accumulated time of `event` as a count of the registry's unit
    pub fn get_count<Q>(&mut self, event: &Q) -> Result<u128, ClockError>
    where
        K: Borrow<Q>,
        Q: Ord + ToOwned<Owned = K> + fmt::Debug + ?Sized,
    {
        let unit = self.unit;
        self.get_duration(event).map(|total| unit.count(total))
    }

    /// Human readable summary of `event`.
    ///
    /// Reports the total as of the last `stop`, even while recording.
    pub fn format_report<Q>(&mut self, event: &Q) -> String
    where
        K: Borrow<Q>,
        Q: Ord + ToOwned<Owned = K> + fmt::Display + ?Sized,
    {
        let accumulated = with_status(&mut self.events, event, |status| status.accumulated());
        report_line(event, accumulated, self.unit)
    }

    /// Write the report line for `event` to `out`
    pub fn print_report<Q, W>(&mut self, event: &Q, out: &mut W) -> io::Result<()>
    where
        K: Borrow<Q>,
        Q: Ord + ToOwned<Owned = K> + fmt::Display + ?Sized,
        W: Write + ?Sized,
    {
        let line = self.format_report(event);
        writeln!(out, "{line}")
    }

    pub fn print_report_stdout<Q>(&mut self, event: &Q) -> io::Result<()>
    where
        K: Borrow<Q>,
        Q: Ord + ToOwned<Owned = K> + fmt::Display + ?Sized,
    {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.print_report(event, &mut out)
    }

    /// Time `f` under `event`.
    ///
    /// `f` does not run if the event is already recording.
    pub fn measure<Q, F, T>(&mut self, event: &Q, f: F) -> Result<T, ClockError>
    where
        K: Borrow<Q>,
        Q: Ord + ToOwned<Owned = K> + fmt::Debug + ?Sized,
        F: FnOnce() -> T,
    {
        self.start(event)?;
        let output = f();
        self.stop(event)?;
        Ok(output)
    }

    /// Report lines for every known event, in label order
    pub fn reports(&self) -> Vec<String>
    where
        K: fmt::Display,
    {
        self.events
            .iter()
            .map(|(event, status)| report_line(event, status.accumulated(), self.unit))
            .collect()
    }

    pub fn is_recording<Q>(&self, event: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.events
            .get(event)
            .is_some_and(EventStatus::is_recording)
    }

    pub fn contains<Q>(&self, event: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.events.contains_key(event)
    }

    pub fn status<Q>(&self, event: &Q) -> Option<&EventStatus>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.events.get(event)
    }

    pub fn labels(&self) -> impl Iterator<Item = &K> {
        self.events.keys()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Run `f` on the status of `event`, creating it first if the label is new.
///
/// The label is only copied into the map on a miss.
fn with_status<K, Q, T, F>(events: &mut BTreeMap<K, EventStatus>, event: &Q, f: F) -> T
where
    K: Ord + Borrow<Q>,
    Q: Ord + ToOwned<Owned = K> + ?Sized,
    F: FnOnce(&mut EventStatus) -> T,
{
    if let Some(status) = events.get_mut(event) {
        return f(status);
    }
    f(events.entry(event.to_owned()).or_default())
}

fn report_line<E>(event: &E, accumulated: Duration, unit: TimeUnit) -> String
where
    E: fmt::Display + ?Sized,
{
    format!(
        "The accumulate time of event \"{event}\" is {} {}(s)",
        unit.count(accumulated),
        unit.label()
    )
}
