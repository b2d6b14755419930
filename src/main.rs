//! healthcheck
//!
//! A liveness probe meant for container `HEALTHCHECK` instructions and
//! orchestrator exec probes.
//!
//! # Architecture Overview
//!
//! ```text
//!   argv / PORT / API_PATH / DEBUG
//!              │
//!              ▼
//!   ┌───────────────────┐    ┌────────────┐    ┌───────────────┐
//!   │ config (loader,   │───▶│ health     │───▶│ net           │──── 127.0.0.1:port
//!   │ validation)       │    │ probe      │    │ connect/send  │
//!   └───────────────────┘    │ state      │    └───────────────┘
//!                            │            │    ┌───────────────┐
//!                            │            │───▶│ http          │
//!                            └─────┬──────┘    │ request/      │
//!                                  │           │ response/     │
//!                                  ▼           │ status        │
//!                       ┌────────────────────┐ └───────────────┘
//!                       │ observability      │
//!                       │ diagnostics, logs  │
//!                       └─────────┬──────────┘
//!                                 ▼
//!                       exit 0 (2xx) / exit 1
//! ```

use std::process::ExitCode;

use healthcheck::config::load_config;
use healthcheck::health::outcome::EXIT_UNHEALTHY;
use healthcheck::observability::{diagnostics, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures.
            return if e.use_stderr() {
                ExitCode::from(EXIT_UNHEALTHY)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logging::init(config.debug);

    tracing::debug!(
        host = %config.host,
        port = %config.port,
        path = %config.path,
        connect_timeout_ms = config.connect_timeout.as_millis() as u64,
        io_timeout_ms = config.io_timeout.as_millis() as u64,
        response_capacity = config.response_capacity,
        "Configuration loaded"
    );

    let report = healthcheck::probe(&config).await;
    diagnostics::report(&report);

    if config.json {
        match diagnostics::json_line(&report, &config) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::error!(error = %e, "Failed to render JSON report"),
        }
    }

    ExitCode::from(report.outcome.exit_code())
}
