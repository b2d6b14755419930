//! Structured logging.
//!
//! # Responsibilities
//! - Install a stdout subscriber when diagnostics are enabled
//! - Stay completely silent otherwise
//!
//! # Design Decisions
//! - Uses the tracing crate; `RUST_LOG` overrides the default filter
//! - Output goes to stdout so container health logs capture it

use std::io::IsTerminal;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "healthcheck=debug";

/// Initialize logging. Does nothing unless `debug` is set.
pub fn init(debug: bool) {
    if !debug {
        return;
    }

    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(std::io::stdout().is_terminal())
                .with_target(false),
        )
        .try_init();

    if let Err(e) = result {
        eprintln!("healthcheck: logging already initialized: {e}");
    }
}
