//! Structured-logging bridge for the sidecar process.
//!
//! Everything the process writes to stdout goes through one serialized sink
//! as `ELECTRON_LOG_JSON:`-prefixed JSON lines, which the hosting desktop
//! process parses into its diagnostics panel. Application code logs through
//! [`LogContext`]; the embedded HTTP stack's internal events are forwarded
//! into the same sink by [`bridge::install`]. Lines without the prefix are
//! free text to the consumer, so nothing else in the process may write to
//! stdout.

pub mod bridge;
pub mod classify;
pub mod context;
mod error;
pub mod event;
pub mod format;
mod macros;
pub mod sink;

#[cfg(test)]
pub(crate) mod test_util;

pub use bridge::{install, ForwardLayer};
pub use context::LogContext;
pub use error::LogError;
pub use event::{Fields, Level, LogEvent, Source};
pub use format::{RESERVED_FIELDS, WIRE_PREFIX};
pub use sink::LineSink;
