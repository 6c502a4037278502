//! Source Classifier & Normalizer.
//!
//! Distinguishes the embedded HTTP stack's internal log events from
//! application events, and scrubs the message artifacts internal emitters
//! are known to prepend. The cleanup rules are a best-effort compatibility
//! shim over observed message shapes, not a parser; the rule set stays
//! minimal and order-sensitive.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::event::Source;

/// Logger namespaces owned by the embedded HTTP stack.
const INTERNAL_NAMESPACES: &[&str] = &["hyper", "tower_http", "axum", "h2"];

/// Severity tokens some internal emitters prepend to their message text.
const SEVERITY_TOKENS: &[&str] = &["DEBUG:", "INFO:", "WARNING:", "ERROR:"];

/// The one startup message known to arrive twice through different paths.
/// Its second appearance is suppressed. A narrow special case, deliberately
/// not generalized into message deduplication.
pub const STARTUP_COMPLETE_MESSAGE: &str = "Application startup complete";

/// Rewrites a tracing target into the dot-structured logger name used on the
/// wire, e.g. `tower_http::trace` becomes `tower_http.trace`.
pub fn logger_name(target: &str) -> String {
    target.replace("::", ".")
}

/// Tags events from the server's own machinery as such; everything else is
/// application output.
pub fn classify(name: &str) -> Source {
    let root = name.split('.').next().unwrap_or(name);
    if INTERNAL_NAMESPACES.contains(&root) {
        Source::ServerInternal
    } else {
        Source::App
    }
}

/// Access-style instrumentation inside the server namespace. `tower_http`'s
/// trace module plays the role of a dedicated access logger.
fn is_access_name(name: &str) -> bool {
    name.starts_with("tower_http.trace") || name.contains(".access")
}

/// Scrubs internal-log message artifacts. Each rule fires at most once:
///
/// 1. drop a leading generic severity token (`INFO:` and friends);
/// 2. strip a literal `"<logger name> - "` prefix;
/// 3. for access-style logs, keep only the text after the first remaining
///    `" - "` separator.
///
/// The name-prefix strip runs before the access split so the request line
/// survives with no residual separator tokens, whichever artifacts are
/// present.
pub fn normalize_server_message(name: &str, message: &str) -> String {
    let mut text = message.trim();

    for token in SEVERITY_TOKENS {
        if let Some(rest) = text.strip_prefix(token) {
            text = rest.trim_start();
            break;
        }
    }

    let own_prefix = format!("{name} - ");
    if let Some(rest) = text.strip_prefix(own_prefix.as_str()) {
        text = rest;
    }

    if is_access_name(name) {
        if let Some((_, rest)) = text.split_once(" - ") {
            text = rest;
        }
    }

    text.to_string()
}

/// True when `message` is the known duplicate startup line and it has
/// already been emitted once through any path.
pub fn is_duplicate_startup(seen: &AtomicBool, message: &str) -> bool {
    message == STARTUP_COMPLETE_MESSAGE && seen.swap(true, Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_namespaces_classify_as_internal() {
        assert_eq!(classify("hyper.proto.h1"), Source::ServerInternal);
        assert_eq!(classify("tower_http.trace"), Source::ServerInternal);
        assert_eq!(classify("axum.serve"), Source::ServerInternal);
        assert_eq!(classify("h2.client"), Source::ServerInternal);
    }

    #[test]
    fn everything_else_classifies_as_app() {
        assert_eq!(classify("main"), Source::App);
        assert_eq!(classify("runner"), Source::App);
        assert_eq!(classify("sidecar_api.reload"), Source::App);
        // Prefix matching is on the root segment, not substrings.
        assert_eq!(classify("hyperdrive.engine"), Source::App);
    }

    #[test]
    fn targets_are_dot_normalized() {
        assert_eq!(logger_name("tower_http::trace"), "tower_http.trace");
        assert_eq!(logger_name("main"), "main");
    }

    #[test]
    fn severity_token_is_dropped() {
        assert_eq!(
            normalize_server_message("hyper.proto", "INFO:     Started server process"),
            "Started server process"
        );
        assert_eq!(
            normalize_server_message("hyper.proto", "WARNING: something odd"),
            "something odd"
        );
    }

    #[test]
    fn own_name_prefix_is_stripped() {
        assert_eq!(
            normalize_server_message("hyper.error", "hyper.error - Waiting for connections"),
            "Waiting for connections"
        );
    }

    #[test]
    fn access_log_keeps_request_line_only() {
        assert_eq!(
            normalize_server_message(
                "tower_http.trace.access",
                "127.0.0.1:50000 - GET /health HTTP/1.1 200"
            ),
            "GET /health HTTP/1.1 200"
        );
    }

    #[test]
    fn access_log_with_name_artifact_has_no_residual_separators() {
        let normalized = normalize_server_message(
            "tower_http.trace.access",
            "tower_http.trace.access - 127.0.0.1:50000 - GET /health HTTP/1.1 200",
        );
        assert_eq!(normalized, "GET /health HTTP/1.1 200");
        assert!(!normalized.contains(" - "));
    }

    #[test]
    fn non_access_messages_keep_their_separators() {
        assert_eq!(
            normalize_server_message("hyper.proto", "connection closed - peer reset"),
            "connection closed - peer reset"
        );
    }

    #[test]
    fn startup_guard_allows_first_and_suppresses_second() {
        let seen = AtomicBool::new(false);
        assert!(!is_duplicate_startup(&seen, STARTUP_COMPLETE_MESSAGE));
        assert!(is_duplicate_startup(&seen, STARTUP_COMPLETE_MESSAGE));
        assert!(is_duplicate_startup(&seen, STARTUP_COMPLETE_MESSAGE));
    }

    #[test]
    fn startup_guard_ignores_other_messages() {
        let seen = AtomicBool::new(false);
        assert!(!is_duplicate_startup(&seen, "Application startup complete!"));
        assert!(!is_duplicate_startup(&seen, "anything else"));
        // Unrelated messages never trip the guard.
        assert!(!is_duplicate_startup(&seen, STARTUP_COMPLETE_MESSAGE));
    }
}
