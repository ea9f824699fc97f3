//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use mc_var_api::prelude::*;
//! ```

pub use crate::error::ApiError;
pub use crate::models::{ErrorResponse, HealthResponse, SimulationRequest, SimulationResponse};
pub use crate::routes::create_router;
pub use crate::server::{ApiServer, ServerConfig, ServerError};
pub use crate::state::AppState;
