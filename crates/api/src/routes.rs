//! Route definitions.

use crate::handlers::{health_check, run_simulation};
use crate::openapi::openapi_spec;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the application router.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new().route("/simulate", post(run_simulation));

    Router::new()
        .route("/health", get(health_check))
        .route("/api-docs/openapi.json", get(openapi_spec))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
