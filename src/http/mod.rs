//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! ProbeTarget
//!     → request.rs (GET line + Host + Connection: close)
//!     → [connection writes it]
//!     → response.rs (bounded read up to the end of headers)
//!     → status.rs (status code from the first line)
//! ```
//!
//! Only the status line carries meaning; headers and body are ignored.

pub mod request;
pub mod response;
pub mod status;

pub use request::build_request;
pub use response::{ReadStop, ResponseBuffer, ResponseReader, HEADER_TERMINATOR};
pub use status::{parse_status, ParseError, StatusCode};
