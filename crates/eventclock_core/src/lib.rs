//! Named-event stopwatch registry.
//!
//! An [`EventClock`] maps event labels to lap timers. Each label can be
//! started and stopped any number of times; completed intervals are
//! truncated to the registry's [`TimeUnit`] and summed.

pub mod clock;
pub mod error;
pub mod registry;
pub mod shared;
pub mod status;

pub use crate::clock::{Clock, ManualClock, MonotonicClock};
pub use crate::error::ClockError;
pub use crate::registry::EventClock;
pub use crate::shared::{SharedEventClock, global};
pub use crate::status::EventStatus;
pub use eventclock_config::TimeUnit;
