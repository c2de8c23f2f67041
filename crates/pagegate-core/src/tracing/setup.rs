//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the pagegate tracing/logging system.
///
/// Reads the `PAGEGATE_LOG` environment variable for per-module log levels,
/// e.g. `PAGEGATE_LOG=pagegate_analysis::autofix=debug,pagegate=info`.
/// Falls back to `pagegate=info` if unset or invalid.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("PAGEGATE_LOG")
            .unwrap_or_else(|_| EnvFilter::new("pagegate=info"));

        // An embedding process may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
