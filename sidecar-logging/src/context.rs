//! Public logging facade.
//!
//! A [`LogContext`] is an explicitly constructed handle, cloned and passed
//! (or captured) wherever logging is needed. There is no ambient global
//! logger registry; the HTTP layer receives its context through application
//! state at startup.

use serde_json::Value;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::event::{Fields, Level, LogEvent, Source};
use crate::format;
use crate::sink::LineSink;

/// Root logger name; derived contexts replace it via [`LogContext::named`].
const ROOT_NAME: &str = "api";

/// Severity-tagged entry points over one shared, serialized sink.
///
/// Emission is synchronous: every call returns only after its line has been
/// written. Cloning is cheap; clones share the sink, the threshold, and the
/// duplicate-startup guard.
#[derive(Clone)]
pub struct LogContext {
    sink: Arc<LineSink>,
    name: String,
    threshold: Level,
    startup_seen: Arc<AtomicBool>,
}

impl LogContext {
    /// Root context writing through `sink`, dropping events below
    /// `threshold`.
    pub fn new(sink: LineSink, threshold: Level) -> Self {
        Self {
            sink: Arc::new(sink),
            name: ROOT_NAME.to_string(),
            threshold,
            startup_seen: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Derived context that writes under a different logger name. Sink,
    /// threshold, and startup guard stay shared.
    pub fn named(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..self.clone()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn threshold(&self) -> Level {
        self.threshold
    }

    pub(crate) fn sink(&self) -> &Arc<LineSink> {
        &self.sink
    }

    pub(crate) fn startup_seen(&self) -> &Arc<AtomicBool> {
        &self.startup_seen
    }

    pub fn debug(&self, message: &str) {
        self.emit(Level::Debug, message, Fields::new(), None);
    }

    pub fn info(&self, message: &str) {
        self.emit(Level::Info, message, Fields::new(), None);
    }

    pub fn warning(&self, message: &str) {
        self.emit(Level::Warning, message, Fields::new(), None);
    }

    pub fn error(&self, message: &str) {
        self.emit(Level::Error, message, Fields::new(), None);
    }

    pub fn debug_with(&self, message: &str, fields: Fields) {
        self.emit(Level::Debug, message, fields, None);
    }

    pub fn info_with(&self, message: &str, fields: Fields) {
        self.emit(Level::Info, message, fields, None);
    }

    pub fn warning_with(&self, message: &str, fields: Fields) {
        self.emit(Level::Warning, message, fields, None);
    }

    pub fn error_with(&self, message: &str, fields: Fields) {
        self.emit(Level::Error, message, fields, None);
    }

    /// Logs an error and attaches the rendered failure (type, message,
    /// cause chain) under the `exception` wire field. The failure is
    /// terminal at the log line; nothing is re-raised on the caller's
    /// behalf.
    pub fn error_with_cause<E: std::error::Error>(&self, message: &str, cause: &E) {
        self.emit(
            Level::Error,
            message,
            Fields::new(),
            Some(render_cause(cause)),
        );
    }

    fn emit(&self, level: Level, message: &str, extra: Fields, exception: Option<String>) {
        if level < self.threshold {
            return;
        }
        let mut event = LogEvent::new(level, Source::App, self.name.clone(), message);
        event.extra = extra;
        event.exception = exception;
        self.sink
            .write_line(&format::wire_line(&event, &self.startup_seen));
    }
}

/// Full textual rendering of a failure: concrete type, display text, then
/// the `source()` chain. Never truncated.
pub fn render_cause<E: std::error::Error>(cause: &E) -> String {
    let mut rendered = format!("{}: {}", std::any::type_name::<E>(), cause);
    let mut next = cause.source();
    while let Some(inner) = next {
        rendered.push_str("\nCaused by: ");
        rendered.push_str(&inner.to_string());
        next = inner.source();
    }
    rendered
}

/// Converts any serializable value into an attachment value, degrading to
/// the error's text when serialization fails so the event itself still goes
/// out.
pub fn field_value<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value)
        .unwrap_or_else(|err| Value::String(format!("<unserializable: {err}>")))
}
