use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVES: &str = "eventclock=info,eventclock_core=info";

static INSTALLED: OnceCell<bool> = OnceCell::new();

/// Install the stderr subscriber for the demo binary.
///
/// Returns `false` when another global subscriber was already in place, in
/// which case that one keeps receiving the registry's diagnostics. Later
/// calls return the first call's answer.
pub fn init_logging() -> bool {
    *INSTALLED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        assert!(EnvFilter::try_new(DEFAULT_DIRECTIVES).is_ok());
    }

    #[test]
    fn test_repeat_calls_keep_first_answer() {
        let first = init_logging();
        assert_eq!(init_logging(), first);
        assert!(tracing_subscriber::fmt::try_init().is_err());
    }
}
