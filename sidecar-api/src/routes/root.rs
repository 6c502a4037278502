use axum::extract::{ConnectInfo, Request, State};
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use sidecar_logging::fields;
use std::net::SocketAddr;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(read_root))
}

/// Root greeting: reports the hosting application path and exercises the
/// request-scoped logging path.
async fn read_root(State(state): State<AppState>, request: Request) -> Json<Value> {
    // Connect info is only present when served over a real socket; test
    // routers fall back to "unknown", like the original did for a missing
    // client.
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    state.log.info(&format!("Received request from {client}"));

    let body = json!({
        "message": "Hello World from the sidecar API",
        "app_path": state.app_path,
    });
    state.log.info_with("Sending response", fields! { "data" => body });

    Json(body)
}
