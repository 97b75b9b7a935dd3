//! Log output for binaries and tests.

use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// Installs a compact `tracing` subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_filter` applies. Returns
/// `false` when a global subscriber was already installed.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init()
        .is_ok()
}
