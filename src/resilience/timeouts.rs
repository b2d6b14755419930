//! Timeout enforcement.
//!
//! # Responsibilities
//! - Bound connection establishment, each write, and each read
//! - Report an elapsed deadline as a value, not a panic or a hang
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities; dropping the timed-out future cancels the I/O
//! - There is no overall deadline: the worst case is the sum of the per-call bounds

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// A deadline passed before the wrapped operation completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("deadline of {0:?} elapsed")]
pub struct Elapsed(pub Duration);

/// Run `future` to completion or until `limit` passes, whichever is first.
pub async fn with_deadline<F>(limit: Duration, future: F) -> Result<F::Output, Elapsed>
where
    F: Future,
{
    tokio::time::timeout(limit, future)
        .await
        .map_err(|_| Elapsed(limit))
}
