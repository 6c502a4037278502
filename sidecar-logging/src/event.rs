//! Log event model: severity, origin, and the structured payload that
//! becomes one wire line.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::LogError;

/// Open map of structured attachments carried alongside a log message.
///
/// Attachments live only here; the fixed wire fields are struct fields on
/// [`LogEvent`], so a caller cannot overwrite them by construction.
pub type Fields = Map<String, Value>;

/// Severity of a log event.
///
/// Closed vocabulary, rendered lowercase on the wire. Ordered by verbosity
/// (`Debug < Info < Warning < Error`) so threshold checks read naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
}

impl Level {
    /// Wire spelling of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }

    /// Spelling understood by `tracing_subscriber` filter directives, which
    /// use `warn` where the wire format uses `warning`.
    pub(crate) fn directive_str(&self) -> &'static str {
        match self {
            Level::Warning => "warn",
            other => other.as_str(),
        }
    }

    /// Maps a `tracing` verbosity onto the wire vocabulary. `TRACE` collapses
    /// into `debug`; the wire format has no finer grade.
    pub fn from_tracing(level: &tracing::Level) -> Self {
        if *level == tracing::Level::ERROR {
            Level::Error
        } else if *level == tracing::Level::WARN {
            Level::Warning
        } else if *level == tracing::Level::INFO {
            Level::Info
        } else {
            Level::Debug
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogError;

    /// Case-insensitive parse. Anything outside the closed vocabulary is a
    /// configuration mistake and is rejected rather than coerced.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warning" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            _ => Err(LogError::InvalidLevel(raw.to_string())),
        }
    }
}

/// Origin of a log event: the application itself, or the embedded HTTP
/// stack's internal machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    App,
    ServerInternal,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::App => "app",
            Source::ServerInternal => "server-internal",
        }
    }
}

/// One structured log event.
///
/// The timestamp is intentionally absent: it is stamped at format time, not
/// at construction time.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub level: Level,
    pub source: Source,
    /// Dot-structured originating logger name, e.g. `main` or
    /// `tower_http.trace`.
    pub name: String,
    pub message: String,
    /// Full rendered failure (type, message, cause chain), when captured.
    pub exception: Option<String>,
    pub extra: Fields,
}

impl LogEvent {
    pub fn new(
        level: Level,
        source: Source,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            source,
            name: name.into(),
            message: message.into(),
            exception: None,
            extra: Fields::new(),
        }
    }

    pub fn with_extra(mut self, extra: Fields) -> Self {
        self.extra = extra;
        self
    }

    pub fn with_exception(mut self, rendered: impl Into<String>) -> Self {
        self.exception = Some(rendered.into());
        self
    }
}
