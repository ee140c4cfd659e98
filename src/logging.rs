//! Logging setup for the binary.
//!
//! Library code only emits `tracing` events; the binary installs the
//! subscriber. `RUST_LOG` overrides the level chosen by `--verbose`.

use tracing_subscriber::{EnvFilter, fmt};

/// Install a compact stderr subscriber.
///
/// Logs go to stderr so generated DDL on stdout stays clean.
pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(false)
        .without_time()
        .compact()
        .init();
}
