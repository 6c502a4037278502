//! Line Formatter: one [`LogEvent`] in, exactly one prefix-tagged JSON line
//! out.

use chrono::{Local, SecondsFormat};
use serde_json::{Map, Value};
use std::sync::atomic::AtomicBool;

use crate::classify;
use crate::event::LogEvent;

/// Literal prefix the supervising desktop process scans stdout for. Lines
/// without it are treated as ignorable free text by the consumer.
pub const WIRE_PREFIX: &str = "ELECTRON_LOG_JSON:";

/// Fixed wire fields. An attachment carrying one of these keys is dropped
/// rather than allowed to overwrite the fixed value. Must grow with any
/// future fixed field.
pub const RESERVED_FIELDS: &[&str] = &[
    "timestamp",
    "level",
    "source",
    "name",
    "message",
    "exception",
];

/// Renders one event as a Wire Line.
///
/// The timestamp is stamped here, from the local clock, in RFC 3339 form.
/// Returns the empty string when the duplicate-startup guard suppresses the
/// event; [`LineSink`](crate::sink::LineSink) skips empty lines, so nothing
/// reaches stdout for a suppressed event.
pub fn wire_line(event: &LogEvent, startup_seen: &AtomicBool) -> String {
    if classify::is_duplicate_startup(startup_seen, &event.message) {
        return String::new();
    }

    let mut object = Map::new();
    object.insert(
        "timestamp".to_string(),
        Value::String(Local::now().to_rfc3339_opts(SecondsFormat::Micros, false)),
    );
    object.insert(
        "level".to_string(),
        Value::String(event.level.as_str().to_string()),
    );
    object.insert(
        "source".to_string(),
        Value::String(event.source.as_str().to_string()),
    );
    object.insert("name".to_string(), Value::String(event.name.clone()));
    object.insert("message".to_string(), Value::String(event.message.clone()));
    if let Some(exception) = &event.exception {
        object.insert("exception".to_string(), Value::String(exception.clone()));
    }
    for (key, value) in &event.extra {
        if RESERVED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        object.insert(key.clone(), value.clone());
    }

    // Display on `Value` is compact JSON; string escaping keeps the line free
    // of embedded newlines.
    format!("{WIRE_PREFIX}{}", Value::Object(object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Fields, Level, LogEvent, Source};
    use serde_json::json;

    fn fresh_guard() -> AtomicBool {
        AtomicBool::new(false)
    }

    fn parse(line: &str) -> Value {
        let payload = line
            .strip_prefix(WIRE_PREFIX)
            .expect("line must start with the wire prefix");
        serde_json::from_str(payload).expect("payload must be valid JSON")
    }

    #[test]
    fn output_is_prefixed_json_with_base_fields() {
        let event = LogEvent::new(Level::Info, Source::App, "main", "hello");
        let line = wire_line(&event, &fresh_guard());
        let json = parse(&line);

        assert_eq!(json["level"], "info");
        assert_eq!(json["source"], "app");
        assert_eq!(json["name"], "main");
        assert_eq!(json["message"], "hello");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn timestamp_is_iso_8601() {
        let event = LogEvent::new(Level::Debug, Source::App, "main", "tick");
        let json = parse(&wire_line(&event, &fresh_guard()));
        let stamp = json["timestamp"].as_str().unwrap();
        chrono::DateTime::parse_from_rfc3339(stamp).expect("timestamp must parse as RFC 3339");
    }

    #[test]
    fn reserved_keys_in_extra_never_overwrite_fixed_fields() {
        let mut extra = Fields::new();
        extra.insert("name".to_string(), json!("spoofed"));
        extra.insert("level".to_string(), json!("error"));
        extra.insert("message".to_string(), json!("spoofed"));
        extra.insert("timestamp".to_string(), json!("1970-01-01T00:00:00"));
        extra.insert("kept".to_string(), json!(42));

        let event =
            LogEvent::new(Level::Info, Source::App, "main", "original").with_extra(extra);
        let json = parse(&wire_line(&event, &fresh_guard()));

        assert_eq!(json["name"], "main");
        assert_eq!(json["level"], "info");
        assert_eq!(json["message"], "original");
        assert_ne!(json["timestamp"], "1970-01-01T00:00:00");
        assert_eq!(json["kept"], 42);
    }

    #[test]
    fn extra_values_pass_through_verbatim() {
        let mut extra = Fields::new();
        extra.insert("data".to_string(), json!({"nested": [1, 2, 3]}));
        extra.insert("flag".to_string(), json!(true));

        let event = LogEvent::new(Level::Info, Source::App, "main", "payload").with_extra(extra);
        let json = parse(&wire_line(&event, &fresh_guard()));

        assert_eq!(json["data"], json!({"nested": [1, 2, 3]}));
        assert_eq!(json["flag"], true);
    }

    #[test]
    fn exception_is_attached_untruncated() {
        let rendered = "DivisionByZero: division by zero\n".repeat(500);
        let event = LogEvent::new(Level::Error, Source::App, "main", "boom")
            .with_exception(rendered.clone());
        let json = parse(&wire_line(&event, &fresh_guard()));

        assert_eq!(json["exception"].as_str().unwrap(), rendered);
    }

    #[test]
    fn exception_field_is_absent_when_not_captured() {
        let event = LogEvent::new(Level::Info, Source::App, "main", "fine");
        let json = parse(&wire_line(&event, &fresh_guard()));
        assert!(json.get("exception").is_none());
    }

    #[test]
    fn line_contains_no_raw_newlines() {
        let event = LogEvent::new(Level::Info, Source::App, "main", "line one\nline two")
            .with_exception("trace line\nanother");
        let line = wire_line(&event, &fresh_guard());
        assert!(!line.contains('\n'));

        let json = parse(&line);
        assert_eq!(json["message"], "line one\nline two");
    }

    #[test]
    fn duplicate_startup_message_formats_to_an_empty_line() {
        let guard = fresh_guard();
        let event = LogEvent::new(
            Level::Info,
            Source::App,
            "runner",
            crate::classify::STARTUP_COMPLETE_MESSAGE,
        );

        let first = wire_line(&event, &guard);
        assert!(first.starts_with(WIRE_PREFIX));

        let second = wire_line(&event, &guard);
        assert!(second.is_empty());
    }
}
