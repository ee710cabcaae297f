//! Tracing subscriber setup for embedding applications.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// `default_directive` applies when `RUST_LOG` is unset (typically the
/// configured `rust_log` value). Call once at startup from the embedding
/// binary; the library itself only emits events.
pub fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive.to_string()));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

/// Verbose variant for diagnostics: engine at debug, everything else info.
pub fn init_tracing_verbose() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::new("sports_arb=debug,info"))
        .init();
}
