//! Health probing subsystem.
//!
//! # Data Flow
//! ```text
//! ProbeConfig
//!     → probe.rs (drives the stages, owns the connection)
//!     → state.rs (Start → … → Done, forward only)
//!     → outcome.rs (one ProbeOutcome per invocation)
//!     → caller maps it to an exit code
//! ```
//!
//! # Design Decisions
//! - One attempt per invocation; the orchestrator calling us handles repetition
//! - Only a parsed 2xx counts as healthy

pub mod outcome;
pub mod probe;
pub mod state;

pub use outcome::{ProbeOutcome, ProbeReport};
pub use probe::{probe, Probe};
pub use state::ProbeStage;
