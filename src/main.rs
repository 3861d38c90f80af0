use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use eventclock::{DemoConfig, TimeUnit, demo, init_logging};

#[derive(Parser, Debug)]
#[command(
    name = "eventclock",
    about = "Time a busy loop over repeated laps and report the accumulated time",
    version
)]
struct Args {
    #[arg(long, value_name = "UNIT", help = "hour, min, second, ms, us or ns")]
    unit: Option<TimeUnit>,

    #[arg(long, value_name = "N", help = "Busy loop length per lap")]
    iterations: Option<u64>,

    #[arg(long, value_name = "N", help = "Number of start/stop cycles")]
    laps: Option<u32>,

    #[arg(long, value_name = "LABEL")]
    event: Option<String>,

    #[arg(long, value_name = "PATH", help = "TOML settings file")]
    config: Option<PathBuf>,
}

impl Args {
    /// Command line flags take precedence over everything else
    fn apply(self, mut config: DemoConfig) -> DemoConfig {
        if let Some(unit) = self.unit {
            config.unit = unit;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(laps) = self.laps {
            config.laps = laps;
        }
        if let Some(event) = self.event {
            config.event = event;
        }
        config
    }
}

fn load_config(args: Args) -> Result<DemoConfig> {
    let base = match &args.config {
        Some(path) => DemoConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => DemoConfig::default(),
    };
    let config = base
        .merge_with_env()
        .context("reading EVENTCLOCK_* environment")?;
    Ok(args.apply(config))
}

fn main() -> Result<()> {
    init_logging();

    let config = load_config(Args::parse())?;
    let stdout = std::io::stdout();
    demo::run(&config, &mut stdout.lock())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "eventclock",
            "--unit",
            "ns",
            "--laps",
            "3",
            "--event",
            "spin",
        ])
        .unwrap();

        let config = args.apply(DemoConfig::default());
        assert_eq!(config.unit, TimeUnit::Nanoseconds);
        assert_eq!(config.laps, 3);
        assert_eq!(config.event, "spin");
        assert_eq!(config.iterations, DemoConfig::default().iterations);
    }

    #[test]
    fn test_rejects_unknown_unit() {
        assert!(Args::try_parse_from(["eventclock", "--unit", "weeks"]).is_err());
    }
}
