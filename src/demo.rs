use std::hint::black_box;
use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use eventclock_config::DemoConfig;
use eventclock_core::EventClock;
use eventclock_utils::spin;

/// Time `config.laps` runs of the busy loop under one event, writing the
/// report line after every lap. Returns the final accumulated time.
pub fn run<W: Write + ?Sized>(config: &DemoConfig, out: &mut W) -> Result<Duration> {
    let mut events: EventClock<String> = EventClock::new(config.unit);
    let event = config.event.as_str();

    info!(
        event,
        unit = %config.unit,
        laps = config.laps,
        iterations = config.iterations,
        "timing busy loop"
    );

    for _ in 0..config.laps {
        events.start(event)?;
        black_box(spin(config.iterations));
        events.stop(event)?;
        events.print_report(event, out)?;
    }

    Ok(events.get_duration(event)?)
}
