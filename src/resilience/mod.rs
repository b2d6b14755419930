//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! connect / write / read
//!     → timeouts.rs (every blocking call gets a deadline)
//!     → Elapsed mapped to TransportError::TimedOut by the caller
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No retries: one attempt per invocation, the orchestrator decides again next time

pub mod timeouts;

pub use timeouts::{with_deadline, Elapsed};
