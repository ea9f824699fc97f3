/// Trading days per year; `dt = 1 / TRADING_DAYS_PER_YEAR`.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Risk-free rate used as drift. Fixed at zero; not a configurable input.
pub const RISK_FREE_RATE: f64 = 0.0;

/// Lower band quantile (nearest rank); also the 95% VaR return quantile.
pub const LOWER_QUANTILE: f64 = 0.05;

/// Upper band quantile (nearest rank).
pub const UPPER_QUANTILE: f64 = 0.95;

/// Maximum annual volatility, in percent.
pub const MAX_ANNUAL_VOLATILITY: f64 = 200.0;

/// Minimum horizon in trading days.
pub const MIN_HORIZON_DAYS: u32 = 1;

/// Maximum horizon in trading days.
pub const MAX_HORIZON_DAYS: u32 = 365;

/// Minimum number of simulated paths.
pub const MIN_ITERATIONS: u32 = 100;

/// Maximum number of simulated paths.
pub const MAX_ITERATIONS: u32 = 10_000;

/// Bytes per simulated price.
pub const BYTES_PER_PRICE: u64 = 8;

/// Upper bound on the path matrix size (50 MiB).
pub const MEMORY_BUDGET_BYTES: u64 = 50 * 1024 * 1024;
