//! Log output for hosts embedding the library.
//!
//! The library only emits `tracing` events; nothing is printed unless the
//! host installs a subscriber, either its own or the one set up here.

use tracing_subscriber::{fmt, EnvFilter};

/// Install a formatted stderr subscriber filtered by `directives`.
///
/// Unparseable directives fall back to `info`. Returns false if a global
/// subscriber was already installed, in which case nothing changes.
pub fn init_logging(directives: &str) -> bool {
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
