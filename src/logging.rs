//! Tracing/logging initialization.
//!
//! Logs go to stderr so report output on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `milk_ledger=debug`
pub const LOG_ENV: &str = "MILK_LEDGER_LOG";

fn build_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Initialize tracing for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
    }

    #[test]
    fn test_verbose_filter() {
        assert_eq!(build_filter(true).to_string(), "debug");
    }
}
