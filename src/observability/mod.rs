//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Probe stages
//!     → tracing events (debug/trace, structured fields)
//! Terminal ProbeReport
//!     → diagnostics.rs (one event per outcome, optional JSON line)
//! Both
//!     → logging.rs subscriber (stdout, only when DEBUG is set)
//! ```
//!
//! # Design Decisions
//! - Silent by default: a healthy or unhealthy probe prints nothing unless asked
//! - No metrics or tracing export; a probe lives for milliseconds

pub mod diagnostics;
pub mod logging;
