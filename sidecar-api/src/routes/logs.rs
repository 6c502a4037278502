use axum::extract::State;
use axum::{routing::get, Json, Router};
use chrono::{Local, SecondsFormat};
use serde_json::{json, Value};
use thiserror::Error;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/logs", get(generate_logs))
}

#[derive(Debug, Error)]
#[error("division by zero")]
struct DivisionByZero;

fn checked_div(numerator: u32, denominator: u32) -> Result<u32, DivisionByZero> {
    numerator.checked_div(denominator).ok_or(DivisionByZero)
}

/// Exercises every severity, including a captured failure, so the desktop
/// console can be smoke-tested end to end.
async fn generate_logs(State(state): State<AppState>) -> Json<Value> {
    state.log.info("This is an info log");
    state.log.warning("This is a warning log");
    state.log.error("This is an error log");

    if let Err(err) = checked_div(1, 0) {
        state
            .log
            .error_with_cause(&format!("Caught an exception: {err}"), &err);
    }

    Json(json!({
        "message": "Logs generated",
        "levels": ["info", "warning", "error"],
        "timestamp": Local::now().to_rfc3339_opts(SecondsFormat::Micros, false),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_by_zero_is_surfaced_as_an_error() {
        assert!(checked_div(1, 0).is_err());
        assert_eq!(checked_div(10, 2).unwrap(), 5);
        assert_eq!(checked_div(1, 0).unwrap_err().to_string(), "division by zero");
    }
}
