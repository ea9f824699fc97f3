//! Server configuration and startup.

use crate::routes::create_router;
use crate::state::AppState;
use mc_var_simulation::EngineConfig;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// Environment variable for the bind host.
pub const HOST_VAR: &str = "MC_VAR_HOST";
/// Environment variable for the bind port.
pub const PORT_VAR: &str = "MC_VAR_PORT";
/// Environment variable for a fixed simulation seed.
pub const SEED_VAR: &str = "MC_VAR_SEED";

/// Server startup errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// An environment variable could not be parsed.
    #[error("invalid value {value:?} for {key}")]
    InvalidConfig {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
    },
    /// Bind or serve failure.
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Fixed simulation seed, for reproducible deployments.
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            seed: None,
        }
    }
}

impl ServerConfig {
    /// Reads configuration from the environment, falling back to defaults.
    ///
    /// # Errors
    /// Returns [`ServerError::InvalidConfig`] if a variable is set but unparsable.
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an injectable lookup.
    ///
    /// # Errors
    /// Returns [`ServerError::InvalidConfig`] if a value is unparsable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let defaults = Self::default();
        let host = lookup(HOST_VAR).unwrap_or(defaults.host);
        let port = match lookup(PORT_VAR) {
            Some(value) => value
                .parse()
                .map_err(|_| ServerError::InvalidConfig { key: PORT_VAR, value })?,
            None => defaults.port,
        };
        let seed = match lookup(SEED_VAR) {
            Some(value) => Some(
                value
                    .parse()
                    .map_err(|_| ServerError::InvalidConfig { key: SEED_VAR, value })?,
            ),
            None => defaults.seed,
        };
        Ok(Self { host, port, seed })
    }

    /// Engine configuration derived from this server configuration.
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            seed: self.seed,
            ..EngineConfig::default()
        }
    }

    /// `host:port` string.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP server wrapping the simulation router.
pub struct ApiServer {
    config: ServerConfig,
}

impl ApiServer {
    /// Creates a new server.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Binds and serves until Ctrl-C.
    ///
    /// # Errors
    /// Returns [`ServerError::Io`] if binding or serving fails.
    pub async fn run(self) -> Result<(), ServerError> {
        let state = AppState::new(self.config.engine_config());
        let router = create_router(state);

        let listener = TcpListener::bind(self.config.bind_address()).await?;
        let local: SocketAddr = listener.local_addr()?;
        info!(address = %local, seeded = self.config.seed.is_some(), "API server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("API server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
