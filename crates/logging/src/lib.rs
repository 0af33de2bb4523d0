//! plasmaledger Logging
//!
//! `tracing` subscriber setup for plasmaledger binaries. Library crates only
//! emit events; installing a subscriber is left to the application.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when neither `RUST_LOG` nor settings provide one
pub const DEFAULT_FILTER: &str = "warn,plasmaledger=info";

/// Pick the filter directive: `verbose` wins, then `configured`, then the
/// default.
pub fn filter_directive(configured: Option<&str>, verbose: bool) -> String {
    if verbose {
        return "info,plasmaledger=debug".to_string();
    }
    configured
        .filter(|f| !f.trim().is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Install a stderr subscriber. `RUST_LOG` overrides `directive`.
///
/// Output goes to stderr so stdout stays machine-readable. Calling this
/// twice is harmless; the second call is ignored.
pub fn init_logging(directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

/// Subscriber for tests: captured output, `RUST_LOG` or `warn`.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
