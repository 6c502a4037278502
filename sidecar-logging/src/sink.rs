//! Serialized line sink: the single destination every logger writes through.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::error::LogError;

/// Writes Wire Lines to one output stream, one uninterrupted write per line,
/// so concurrent callers never interleave partial JSON fragments.
pub struct LineSink {
    out: Mutex<Box<dyn Write + Send>>,
}

impl LineSink {
    /// Sink over process stdout.
    ///
    /// Probes the stream up front: a stdout that cannot be flushed means the
    /// supervisor cannot receive structured lines, which is fatal at
    /// startup.
    pub fn stdout() -> Result<Self, LogError> {
        let mut out = io::stdout();
        out.flush()?;
        Ok(Self::from_writer(out))
    }

    /// Sink over an arbitrary writer. Tests inject shared buffers through
    /// this.
    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
        }
    }

    /// Writes one line followed by a newline, flushing so the supervisor
    /// sees the event immediately. Empty lines are skipped; the formatter
    /// returns them for suppressed events. Write failures are swallowed:
    /// once stdout is gone the supervisor is gone too, and no structured
    /// destination is left to report to.
    pub fn write_line(&self, line: &str) {
        if line.is_empty() {
            return;
        }
        let mut out = match self.out.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = out.write_all(format!("{line}\n").as_bytes());
        let _ = out.flush();
    }
}
