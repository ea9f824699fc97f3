//! Request handlers.

use crate::error::ApiError;
use crate::models::{ErrorResponse, HealthResponse, SimulationRequest, SimulationResponse};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::{debug, error, warn};

/// Health check.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Runs a GBM Monte Carlo simulation.
#[utoipa::path(
    post,
    path = "/api/v1/simulate",
    tag = "Simulation",
    request_body = SimulationRequest,
    responses(
        (status = 200, description = "Simulation completed", body = SimulationResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 500, description = "Simulation failed", body = ErrorResponse)
    )
)]
pub async fn run_simulation(
    State(state): State<AppState>,
    payload: Result<Json<SimulationRequest>, JsonRejection>,
) -> Result<Json<SimulationResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Rejected simulation request body");
        ApiError::BadRequest(rejection.body_text())
    })?;
    debug!(?request, "Simulation request received");

    let params = request.to_parameters();
    let engine = state.engine.clone();
    let outcome = tokio::task::spawn_blocking(move || engine.simulate(&params))
        .await
        .map_err(|err| {
            error!(error = %err, "Simulation task aborted");
            ApiError::Computation(err.to_string())
        })?;

    match outcome {
        Ok(result) => Ok(Json(result.into())),
        Err(err) => {
            let err = ApiError::from(err);
            if let ApiError::Computation(detail) = &err {
                error!(detail = %detail, "Simulation failed");
            }
            Err(err)
        }
    }
}
