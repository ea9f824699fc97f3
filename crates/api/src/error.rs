use crate::models::ErrorResponse;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mc_var_domain::ValidationError;
use mc_var_simulation::SimulationError;

/// Errors returned by API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Parameters rejected by validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// Body could not be parsed.
    #[error("invalid request body: {0}")]
    BadRequest(String),
    /// Internal failure; the detail is logged, not returned.
    #[error("error processing the simulation")]
    Computation(String),
}

impl From<SimulationError> for ApiError {
    fn from(err: SimulationError) -> Self {
        match err {
            SimulationError::Validation(e) => Self::Validation(e),
            SimulationError::Computation(e) => Self::Computation(e.to_string()),
        }
    }
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Computation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
