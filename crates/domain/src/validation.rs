//! Range and memory-footprint checks on simulation inputs.
//!
//! Checks run in a fixed order and stop at the first failure, so callers always
//! see the same reason for the same input.

use crate::constants::{
    BYTES_PER_PRICE, MAX_ANNUAL_VOLATILITY, MAX_HORIZON_DAYS, MAX_ITERATIONS, MEMORY_BUDGET_BYTES,
    MIN_HORIZON_DAYS, MIN_ITERATIONS,
};
use crate::value_objects::simulation_parameters::SimulationParameters;

/// Reasons a parameter set is rejected before any computation starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Initial price is zero, negative or not a number.
    #[error("price must be positive")]
    NonPositivePrice,
    /// Volatility outside `[0, 200]` percent.
    #[error("volatility out of range: must be between 0 and 200%")]
    VolatilityOutOfRange,
    /// Horizon outside `[1, 365]` days.
    #[error("horizon out of range: days must be between 1 and 365")]
    HorizonOutOfRange,
    /// Iteration count outside `[100, 10000]`.
    #[error("iteration count out of range: must be between 100 and 10000")]
    IterationCountOutOfRange,
    /// Path matrix would exceed the memory budget.
    #[error("parameter combination exceeds memory budget ({required_bytes} bytes > 50 MiB)")]
    MemoryBudgetExceeded {
        /// Estimated size of the path matrix.
        required_bytes: u64,
    },
}

/// Runs all checks against `params`.
///
/// # Errors
/// Returns the first failing check.
pub fn validate(params: &SimulationParameters) -> Result<(), ValidationError> {
    // NaN fails every range check below.
    if !(params.initial_price.is_finite() && params.initial_price > 0.0) {
        return Err(ValidationError::NonPositivePrice);
    }
    if !(0.0..=MAX_ANNUAL_VOLATILITY).contains(&params.annual_volatility) {
        return Err(ValidationError::VolatilityOutOfRange);
    }
    if !(MIN_HORIZON_DAYS..=MAX_HORIZON_DAYS).contains(&params.horizon_days) {
        return Err(ValidationError::HorizonOutOfRange);
    }
    if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&params.iteration_count) {
        return Err(ValidationError::IterationCountOutOfRange);
    }
    check_memory_budget(
        u64::from(params.iteration_count),
        u64::from(params.horizon_days),
    )
}

/// Estimated size in bytes of a path matrix with the given dimensions.
#[must_use]
pub fn memory_footprint_bytes(iteration_count: u64, horizon_days: u64) -> u64 {
    iteration_count
        .saturating_mul(horizon_days.saturating_add(1))
        .saturating_mul(BYTES_PER_PRICE)
}

/// Rejects dimensions whose path matrix would not fit in the memory budget.
///
/// # Errors
/// Returns [`ValidationError::MemoryBudgetExceeded`] when the footprint is
/// above [`MEMORY_BUDGET_BYTES`].
pub fn check_memory_budget(iteration_count: u64, horizon_days: u64) -> Result<(), ValidationError> {
    let required_bytes = memory_footprint_bytes(iteration_count, horizon_days);
    if required_bytes > MEMORY_BUDGET_BYTES {
        return Err(ValidationError::MemoryBudgetExceeded { required_bytes });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> SimulationParameters {
        SimulationParameters::new(100.0, 20.0, 30, 1000)
    }

    #[test]
    fn test_valid_parameters_pass() {
        assert_eq!(valid().validate(), Ok(()));
        assert_eq!(
            SimulationParameters::new(0.01, 0.0, 1, 100).validate(),
            Ok(())
        );
        assert_eq!(
            SimulationParameters::new(1e6, 200.0, 365, 10_000).validate(),
            Ok(())
        );
    }

    #[test]
    fn test_price_rejected() {
        for price in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let params = SimulationParameters {
                initial_price: price,
                ..valid()
            };
            let err = params.validate().unwrap_err();
            assert_eq!(err, ValidationError::NonPositivePrice);
            assert!(err.to_string().contains("price"));
        }
    }

    #[test]
    fn test_volatility_rejected() {
        for vol in [250.0, -0.1, f64::NAN] {
            let params = SimulationParameters {
                annual_volatility: vol,
                ..valid()
            };
            let err = params.validate().unwrap_err();
            assert_eq!(err, ValidationError::VolatilityOutOfRange);
            assert!(err.to_string().contains("volatility"));
        }
    }

    #[test]
    fn test_horizon_rejected() {
        for days in [0, 366, 400] {
            let params = SimulationParameters {
                horizon_days: days,
                ..valid()
            };
            let err = params.validate().unwrap_err();
            assert_eq!(err, ValidationError::HorizonOutOfRange);
            assert!(err.to_string().contains("horizon"));
        }
    }

    #[test]
    fn test_iteration_count_rejected() {
        for n in [0, 50, 99, 10_001] {
            let params = SimulationParameters {
                iteration_count: n,
                ..valid()
            };
            let err = params.validate().unwrap_err();
            assert_eq!(err, ValidationError::IterationCountOutOfRange);
            assert!(err.to_string().contains("iteration count"));
        }
    }

    #[test]
    fn test_checks_short_circuit_in_order() {
        let params = SimulationParameters::new(0.0, 250.0, 400, 50);
        assert_eq!(params.validate(), Err(ValidationError::NonPositivePrice));

        let params = SimulationParameters::new(100.0, 250.0, 400, 50);
        assert_eq!(params.validate(), Err(ValidationError::VolatilityOutOfRange));

        let params = SimulationParameters::new(100.0, 20.0, 400, 50);
        assert_eq!(params.validate(), Err(ValidationError::HorizonOutOfRange));
    }

    #[test]
    fn test_largest_valid_combination_fits_budget() {
        // 10000 * 366 * 8 = 29,280,000 bytes
        assert_eq!(memory_footprint_bytes(10_000, 365), 29_280_000);
        assert!(check_memory_budget(10_000, 365).is_ok());
    }

    #[test]
    fn test_memory_budget_exceeded() {
        // 100,000 * 101 * 8 = 80,800,000 bytes
        let err = check_memory_budget(100_000, 100).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MemoryBudgetExceeded {
                required_bytes: 80_800_000
            }
        );
        assert!(err.to_string().contains("memory budget"));
    }

    #[test]
    fn test_memory_budget_boundary() {
        // 52,428,800 / 8 = 6,553,600 prices
        assert!(check_memory_budget(65_536, 99).is_ok());
        assert!(check_memory_budget(65_537, 99).is_err());
    }

    #[test]
    fn test_footprint_saturates() {
        assert_eq!(memory_footprint_bytes(u64::MAX, u64::MAX), u64::MAX);
        assert!(check_memory_budget(u64::MAX, 1).is_err());
    }

    #[test]
    fn test_parameters_deserialize() {
        let json = r#"{"initial_price":100.0,"annual_volatility":20.0,"horizon_days":30,"iteration_count":1000}"#;
        let params: SimulationParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params, valid());
        assert_eq!(params.path_len(), 31);
    }
}
