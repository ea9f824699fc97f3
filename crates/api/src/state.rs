use mc_var_simulation::{EngineConfig, MonteCarloEngine};
use std::sync::Arc;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Simulation engine. Stateless, so one instance serves all requests.
    pub engine: Arc<MonteCarloEngine>,
}

impl AppState {
    /// Creates state around an engine built from `config`.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            engine: Arc::new(MonteCarloEngine::new(config)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
