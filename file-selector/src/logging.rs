//! Logging setup for applications embedding the selector.
//!
//! The crate itself only emits `tracing` events; these helpers install a
//! `tracing-subscriber` formatter for binaries that have none of their own.

use tracing_subscriber::{EnvFilter, fmt};

/// Default directive: selector events at info, everything else at warn.
pub const DEFAULT_FILTER: &str = "file_selector=info,warn";

/// Initialize a tracing subscriber honouring `RUST_LOG`, else [`DEFAULT_FILTER`].
///
/// Does nothing if a global subscriber is already installed.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(filter);
}

/// Initialize a tracing subscriber with a custom filter directive.
pub fn init_tracing_with_filter(filter: &str) {
    install(EnvFilter::new(filter));
}

fn install(filter: EnvFilter) {
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
