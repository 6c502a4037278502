//! Sink router: forwards every `tracing` event, the application's and the
//! embedded HTTP stack's alike, into the shared line sink.
//!
//! The forwarding layer is the only layer ever registered; no `fmt` layer
//! exists anywhere in the process, so no unformatted console text can reach
//! stdout alongside the Wire Lines.

use serde_json::Value;
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::{prelude::*, registry, EnvFilter};

use crate::classify;
use crate::context::LogContext;
use crate::event::{Fields, Level, LogEvent, Source};
use crate::format;

/// Targets clamped to warning-and-above: the HTTP stack's chattiest
/// internals plus the dev-reload watcher, so development churn does not
/// flood the structured stream.
const CLAMPED_TARGETS: &[&str] = &["hyper", "tower_http", "notify", "sidecar_api::reload"];

/// Translates `tracing` events into Wire Lines through a shared
/// [`LogContext`]'s sink.
pub struct ForwardLayer {
    ctx: LogContext,
}

impl ForwardLayer {
    pub fn new(ctx: LogContext) -> Self {
        Self { ctx }
    }
}

impl<S: Subscriber> Layer<S> for ForwardLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let name = classify::logger_name(metadata.target());
        let source = classify::classify(&name);
        let raw = visitor.message.unwrap_or_default();
        let message = match source {
            Source::ServerInternal => classify::normalize_server_message(&name, &raw),
            Source::App => raw,
        };

        let mut out = LogEvent::new(Level::from_tracing(metadata.level()), source, name, message);
        out.extra = visitor.extra;
        self.ctx
            .sink()
            .write_line(&format::wire_line(&out, self.ctx.startup_seen()));
    }
}

/// Installs the forwarding layer as the process-global subscriber and
/// returns whether this call performed the installation.
///
/// Idempotent: once a subscriber is installed, later calls return `false`
/// and leave the existing installation untouched, so re-running setup never
/// produces duplicate lines.
pub fn install(ctx: &LogContext) -> bool {
    registry()
        .with(env_filter(ctx.threshold()))
        .with(ForwardLayer::new(ctx.clone()))
        .try_init()
        .is_ok()
}

/// Filter for the forwarded stream: the configured default level (a
/// `RUST_LOG` directive set may override it wholesale), with the known
/// chatty targets clamped to warning-and-above.
fn env_filter(threshold: Level) -> EnvFilter {
    let mut filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(threshold.directive_str()));
    for target in CLAMPED_TARGETS {
        filter = filter.add_directive(format!("{target}=warn").parse().unwrap());
    }
    filter
}

/// Collects the `message` field and the structured fields off one event.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    extra: Fields,
}

impl FieldVisitor {
    fn record_value(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            self.message = Some(match value {
                Value::String(text) => text,
                other => other.to_string(),
            });
        } else {
            self.extra.insert(field.name().to_string(), value);
        }
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_value(field, Value::String(value.to_string()));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record_value(field, Value::Bool(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_value(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record_value(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record_value(field, Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.extra
                .insert(field.name().to_string(), Value::String(format!("{value:?}")));
        }
    }
}
