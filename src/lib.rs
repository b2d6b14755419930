//! Loopback HTTP liveness probe library.

pub mod config;
pub mod health;
pub mod http;
pub mod net;
pub mod observability;
pub mod resilience;

pub use config::ProbeConfig;
pub use health::{probe, ProbeOutcome, ProbeReport};
