pub mod health;
pub mod logs;
pub mod root;

use crate::state::AppState;
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Assembles the service router: permissive CORS for the local renderer
/// (frontend served from a different origin) and request tracing that feeds
/// the structured bridge.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(root::routes())
        .merge(health::routes())
        .merge(logs::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
