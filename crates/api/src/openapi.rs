//! OpenAPI documentation configuration.
//!
//! Generates the OpenAPI spec using utoipa.

use crate::handlers;
use crate::models::{ErrorResponse, HealthResponse, SimulationRequest, SimulationResponse};
use axum::Json;
use utoipa::OpenApi;

/// OpenAPI documentation structure.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Monte Carlo Price Risk API",
        version = "0.1.0",
        description = "Simulates Geometric Brownian Motion price paths and reports \
                       percentile bands, terminal statistics and 95% Value-at-Risk.",
        license(
            name = "MIT OR Apache-2.0",
            url = "https://github.com/joaquinbejar/mc-var"
        ),
        contact(
            name = "Joaquín Béjar García",
            email = "jb@taunais.com"
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Simulation", description = "Monte Carlo price simulation")
    ),
    paths(handlers::health_check, handlers::run_simulation),
    components(schemas(
        HealthResponse,
        SimulationRequest,
        SimulationResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDoc;

/// Serves the OpenAPI document.
pub async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Returns the OpenAPI JSON specification.
#[must_use]
pub fn openapi_json() -> String {
    ApiDoc::openapi().to_pretty_json().unwrap_or_default()
}
