use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Granularity an event registry accumulates time in.
///
/// A registry is bound to exactly one unit for its whole lifetime; every
/// elapsed interval is truncated to this unit before it is added to the
/// running total.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TimeUnit {
    Hours,
    Minutes,
    #[default]
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 6] = [
        TimeUnit::Hours,
        TimeUnit::Minutes,
        TimeUnit::Seconds,
        TimeUnit::Milliseconds,
        TimeUnit::Microseconds,
        TimeUnit::Nanoseconds,
    ];

    /// Name printed after the count in report lines
    pub fn label(self) -> &'static str {
        match self {
            TimeUnit::Hours => "hour",
            TimeUnit::Minutes => "min",
            TimeUnit::Seconds => "second",
            TimeUnit::Milliseconds => "millisecond",
            TimeUnit::Microseconds => "microsecond",
            TimeUnit::Nanoseconds => "nanosecond",
        }
    }

    pub fn nanos_per_unit(self) -> u128 {
        match self {
            TimeUnit::Hours => 3_600 * NANOS_PER_SEC,
            TimeUnit::Minutes => 60 * NANOS_PER_SEC,
            TimeUnit::Seconds => NANOS_PER_SEC,
            TimeUnit::Milliseconds => 1_000_000,
            TimeUnit::Microseconds => 1_000,
            TimeUnit::Nanoseconds => 1,
        }
    }

    /// Whole units contained in `duration`; the remainder is discarded.
    pub fn count(self, duration: Duration) -> u128 {
        duration.as_nanos() / self.nanos_per_unit()
    }

    /// Floor `duration` to a whole number of units.
    pub fn truncate(self, duration: Duration) -> Duration {
        // never larger than the input, so the seconds part fits in a u64
        let nanos = self.count(duration) * self.nanos_per_unit();
        Duration::new(
            (nanos / NANOS_PER_SEC) as u64,
            (nanos % NANOS_PER_SEC) as u32,
        )
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeUnit {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s.trim().to_ascii_lowercase().as_str() {
            "h" | "hr" | "hour" | "hours" => TimeUnit::Hours,
            "m" | "min" | "mins" | "minute" | "minutes" => TimeUnit::Minutes,
            "s" | "sec" | "secs" | "second" | "seconds" => TimeUnit::Seconds,
            "ms" | "milli" | "millis" | "millisecond" | "milliseconds" => TimeUnit::Milliseconds,
            "us" | "µs" | "micro" | "micros" | "microsecond" | "microseconds" => {
                TimeUnit::Microseconds
            }
            "ns" | "nano" | "nanos" | "nanosecond" | "nanoseconds" => TimeUnit::Nanoseconds,
            _ => return Err(ConfigError::InvalidUnit(s.to_string())),
        };
        Ok(unit)
    }
}

impl TryFrom<String> for TimeUnit {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
