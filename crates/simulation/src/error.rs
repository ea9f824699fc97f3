use mc_var_domain::ValidationError;

/// Internal faults raised while simulating or aggregating.
///
/// With correct validation these are unreachable; seeing one indicates a defect.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComputationError {
    /// Ensemble would have no paths or no steps.
    #[error("empty ensemble: {iteration_count} paths over {horizon_days} days")]
    EmptyEnsemble {
        /// Requested number of paths.
        iteration_count: usize,
        /// Requested number of steps.
        horizon_days: usize,
    },
    /// Paths of different lengths.
    #[error("ragged ensemble: path {path} has {found} prices, expected {expected}")]
    RaggedEnsemble {
        /// Index of the first mismatching path.
        path: usize,
        /// Length of the first path.
        expected: usize,
        /// Length of the mismatching path.
        found: usize,
    },
    /// A simulated price is not finite or not positive.
    #[error("invalid simulated price {value} on path {path} at step {step}")]
    InvalidPrice {
        /// Path index.
        path: usize,
        /// Time index.
        step: usize,
        /// Offending value.
        value: f64,
    },
    /// Aggregation was given no values.
    #[error("cannot aggregate an empty cross-section")]
    EmptyCrossSection,
}

/// Outcome of a failed engine call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    /// Parameters were rejected before simulation started.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Simulation hit an invalid internal state.
    #[error("simulation failed: {0}")]
    Computation(#[from] ComputationError),
}

impl SimulationError {
    /// Returns `true` when the caller can fix the failure by changing inputs.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
