//! Diagnostic logging.
//!
//! Hook advisories go to stderr as plain lines, so diagnostics are off
//! unless `ECC_HOOKS_LOG` sets a filter (e.g. `ECC_HOOKS_LOG=debug`).

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "ECC_HOOKS_LOG";

/// Install the global subscriber. Calling it twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
