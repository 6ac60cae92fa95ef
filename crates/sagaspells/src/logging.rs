//! Subscriber setup for host applications.
//!
//! The library only emits `tracing` events. Hosts that have no subscriber of their own can
//! call [`init_logging`] once at startup. `RUST_LOG` wins over the given default level.

use tracing_subscriber::EnvFilter;

/// Installs a stderr fmt subscriber. Returns `false` if a global subscriber was
/// already set, in which case nothing changes.
pub fn init_logging(default_level: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        init_logging("debug");
        assert!(!init_logging("info"));
    }
}
