//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! argv + environment (PORT, API_PATH, DEBUG)
//!     → loader.rs (clap parse, fallbacks, defaults)
//!     → ProbeConfig (raw strings, immutable)
//!     → validation.rs (port/path checks)
//!     → ProbeTarget (validated, safe to put on the wire)
//! ```
//!
//! # Design Decisions
//! - Config is built once per invocation and passed by reference
//! - No config files and no global defaults; `ProbeConfig::default()` is the only source
//! - Validation failures are reported as a probe outcome, not as a CLI error

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, Cli};
pub use schema::ProbeConfig;
pub use validation::{
    validate_path, validate_port, validate_target, PortNumber, ProbePath, ProbeTarget,
    ValidationError,
};
