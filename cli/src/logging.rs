//! # Logging
//!
//! Installs the `tracing` subscriber for the binary.

use tracing_subscriber::EnvFilter;

/// Builds the log filter: `RUST_LOG` when set, else `debug` with `--verbose`, else `warn`.
pub fn filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "warn" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Installs a stderr subscriber. Repeated calls are ignored.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
