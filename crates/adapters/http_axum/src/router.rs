//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use hoo_adapter_virtual::VirtualBridge;

use crate::state::AppState;

/// Build the top-level axum [`Router`] serving `bridge`.
///
/// Bridge routes live under `/api`, a liveness probe at `/health`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build(bridge: VirtualBridge) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(bridge))
}

async fn health_check() -> &'static str {
    "OK"
}
