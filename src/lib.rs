//! Named-event lap timers.
//!
//! ```
//! use eventclock::{EventClock, TimeUnit};
//!
//! let mut events: EventClock<String> = EventClock::new(TimeUnit::Microseconds);
//! for _ in 0..3 {
//!     events.start("loop").unwrap();
//!     // timed work
//!     events.stop("loop").unwrap();
//! }
//! assert!(events.get_duration("loop").is_ok());
//! ```

pub mod demo;

pub use eventclock_config::{ConfigError, DemoConfig, TimeUnit};
pub use eventclock_core::{
    Clock, ClockError, EventClock, EventStatus, ManualClock, MonotonicClock, SharedEventClock,
    global,
};
pub use eventclock_utils::{init_logging, spin};
