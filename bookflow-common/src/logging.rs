//! Tracing subscriber setup
//!
//! Host applications call [`init_tracing`] once at startup. Library code
//! only emits via the `tracing` macros and never installs a subscriber
//! itself.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber
///
/// Honors `RUST_LOG` when set; falls back to the supplied default directive
/// (e.g. `"info"` or `"bookflow_engine=debug"`). Returns an error string if
/// a global subscriber is already installed.
pub fn init_tracing(default_directive: &str) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("Failed to set tracing subscriber: {}", e))
}
