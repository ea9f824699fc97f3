//! Aggregation of a completed path ensemble into bands and risk figures.
//!
//! Percentiles use a nearest-rank rule: sort ascending and take the element at
//! `floor(n * q)` (0-indexed, clamped to `n - 1`), with no interpolation. The
//! rule is reproducible and testable; it is not a continuous quantile estimator.

use crate::error::ComputationError;
use crate::price_path::PathEnsemble;
use mc_var_domain::SimulationResult;
use mc_var_domain::constants::{LOWER_QUANTILE, UPPER_QUANTILE};
use rayon::prelude::*;

/// Mean and percentile band of one time index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossSectionStats {
    pub mean: f64,
    pub p5: f64,
    pub p95: f64,
}

/// Summary of the final cross-section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Historical-simulation VaR over the terminal returns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueAtRisk {
    /// Loss in currency units, `initial_price * |quantile|`.
    pub amount: f64,
    /// Return quantile in percent, sign preserved.
    pub percent: f64,
}

/// Element at rank `floor(n * quantile)` of an ascending slice.
#[must_use]
pub fn nearest_rank(sorted: &[f64], quantile: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let idx = (sorted.len() as f64 * quantile).floor() as usize;
    Some(sorted[idx.min(sorted.len() - 1)])
}

/// Arithmetic mean, summed as deviations from the first value with Neumaier
/// compensation. Exact when every value is identical.
fn mean(values: &[f64]) -> f64 {
    let Some(&origin) = values.first() else {
        return f64::NAN;
    };
    let mut sum = 0.0;
    let mut compensation = 0.0;
    for x in values {
        let d = x - origin;
        let t = sum + d;
        if f64::abs(sum) >= f64::abs(d) {
            compensation += (sum - t) + d;
        } else {
            compensation += (d - t) + sum;
        }
        sum = t;
    }
    origin + (sum + compensation) / values.len() as f64
}

fn sort_ascending(values: &mut [f64]) {
    values.sort_by(|a, b| a.total_cmp(b));
}

impl CrossSectionStats {
    /// Computes the mean, then sorts `values` in place for the band.
    ///
    /// # Errors
    /// Returns [`ComputationError::EmptyCrossSection`] for an empty slice.
    pub fn compute(values: &mut [f64]) -> Result<Self, ComputationError> {
        if values.is_empty() {
            return Err(ComputationError::EmptyCrossSection);
        }
        let mean = mean(values);
        sort_ascending(values);
        let p5 = nearest_rank(values, LOWER_QUANTILE).ok_or(ComputationError::EmptyCrossSection)?;
        let p95 = nearest_rank(values, UPPER_QUANTILE).ok_or(ComputationError::EmptyCrossSection)?;
        Ok(Self { mean, p5, p95 })
    }
}

impl TerminalStats {
    /// # Errors
    /// Returns [`ComputationError::EmptyCrossSection`] for an empty slice.
    pub fn compute(terminal: &[f64]) -> Result<Self, ComputationError> {
        if terminal.is_empty() {
            return Err(ComputationError::EmptyCrossSection);
        }
        Ok(Self {
            mean: mean(terminal),
            min: terminal.iter().copied().fold(f64::INFINITY, f64::min),
            max: terminal.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}

impl ValueAtRisk {
    /// 95% VaR from terminal prices and the starting price.
    ///
    /// # Errors
    /// Returns [`ComputationError::EmptyCrossSection`] for an empty slice.
    pub fn compute(terminal: &[f64], initial_price: f64) -> Result<Self, ComputationError> {
        let mut returns: Vec<f64> = terminal
            .iter()
            .map(|price| (price - initial_price) / initial_price)
            .collect();
        sort_ascending(&mut returns);

        let quantile = nearest_rank(&returns, LOWER_QUANTILE)
            .ok_or(ComputationError::EmptyCrossSection)?;
        Ok(Self {
            amount: initial_price * quantile.abs(),
            percent: quantile * 100.0,
        })
    }
}

/// Reduces a [`PathEnsemble`] to a [`SimulationResult`].
#[derive(Debug, Clone, Copy)]
pub struct StatisticsAggregator {
    parallel: bool,
}

impl Default for StatisticsAggregator {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl StatisticsAggregator {
    /// Creates an aggregator; `parallel` spreads time indices over rayon.
    #[must_use]
    pub fn new(parallel: bool) -> Self {
        Self { parallel }
    }

    /// Consumes the ensemble; raw paths are moved into the result unchanged.
    ///
    /// # Errors
    /// Returns [`ComputationError::EmptyCrossSection`] for an empty ensemble.
    pub fn aggregate(
        &self,
        ensemble: PathEnsemble,
        initial_price: f64,
    ) -> Result<SimulationResult, ComputationError> {
        if ensemble.iteration_count() == 0 || ensemble.path_len() == 0 {
            return Err(ComputationError::EmptyCrossSection);
        }

        let bands = self.bands(&ensemble)?;
        let terminal_prices = ensemble.terminal_prices();
        let terminal = TerminalStats::compute(&terminal_prices)?;
        let var = ValueAtRisk::compute(&terminal_prices, initial_price)?;

        let mut mean_path = Vec::with_capacity(bands.len());
        let mut p5_path = Vec::with_capacity(bands.len());
        let mut p95_path = Vec::with_capacity(bands.len());
        for band in bands {
            mean_path.push(band.mean);
            p5_path.push(band.p5);
            p95_path.push(band.p95);
        }

        Ok(SimulationResult {
            paths: ensemble.into_paths(),
            mean_path,
            p5_path,
            p95_path,
            terminal_mean: terminal.mean,
            terminal_min: terminal.min,
            terminal_max: terminal.max,
            var_95_amount: var.amount,
            var_95_percent: var.percent,
        })
    }

    fn bands(&self, ensemble: &PathEnsemble) -> Result<Vec<CrossSectionStats>, ComputationError> {
        let at = |t: usize| {
            let mut values = ensemble
                .cross_section(t)
                .ok_or(ComputationError::EmptyCrossSection)?;
            CrossSectionStats::compute(&mut values)
        };
        if self.parallel {
            (0..ensemble.path_len()).into_par_iter().map(at).collect()
        } else {
            (0..ensemble.path_len()).map(at).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 100 paths of two days whose terminal prices are 1..=100 in reverse order.
    fn ladder() -> PathEnsemble {
        let paths = (1..=100)
            .rev()
            .map(|i| vec![50.0, 50.0 + f64::from(i) / 10.0, f64::from(i)])
            .collect();
        PathEnsemble::from_paths(paths).unwrap()
    }

    #[test]
    fn test_nearest_rank() {
        let sorted: Vec<f64> = (0..100).map(f64::from).collect();
        assert_eq!(nearest_rank(&sorted, 0.05), Some(5.0));
        assert_eq!(nearest_rank(&sorted, 0.95), Some(95.0));
        assert_eq!(nearest_rank(&sorted, 1.0), Some(99.0)); // clamped
        assert_eq!(nearest_rank(&[], 0.5), None);
    }

    #[test]
    fn test_cross_section_stats() {
        let mut values: Vec<f64> = (1..=100).rev().map(f64::from).collect();
        let stats = CrossSectionStats::compute(&mut values).unwrap();
        assert!((stats.mean - 50.5).abs() < 1e-9);
        assert_eq!(stats.p5, 6.0);
        assert_eq!(stats.p95, 96.0);
        assert!(CrossSectionStats::compute(&mut []).is_err());
    }

    #[test]
    fn test_mean_of_constant_values_is_exact() {
        let values = vec![12_345.67; 2500];
        assert_eq!(mean(&values), 12_345.67);
        let values = vec![0.1; 3];
        assert_eq!(mean(&values), 0.1);
    }

    #[test]
    fn test_mean_matches_sum_over_count() {
        let values: Vec<f64> = (0..1000).map(|i| 100.0 + 0.37 * f64::from(i)).collect();
        let naive = values.iter().sum::<f64>() / values.len() as f64;
        assert!((mean(&values) - 284.815).abs() < 1e-12);
        assert!((mean(&values) - naive).abs() < 1e-12);
    }

    #[test]
    fn test_terminal_stats() {
        let stats = TerminalStats::compute(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
    }

    #[test]
    fn test_value_at_risk_loss() {
        // Returns -0.99..=0.0 step 0.01: the 5th-rank return is -0.94
        let terminal: Vec<f64> = (1..=100).map(f64::from).collect();
        let var = ValueAtRisk::compute(&terminal, 100.0).unwrap();
        assert!((var.percent - (-94.0)).abs() < 1e-9);
        assert!((var.amount - 94.0).abs() < 1e-9);
    }

    #[test]
    fn test_value_at_risk_keeps_sign_on_gain() {
        // Every path gains, so the quantile return is positive.
        let terminal: Vec<f64> = (0..100).map(|i| 110.0 + f64::from(i)).collect();
        let var = ValueAtRisk::compute(&terminal, 100.0).unwrap();
        assert!((var.percent - 15.0).abs() < 1e-9);
        assert!((var.amount - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_ladder() {
        let result = StatisticsAggregator::default()
            .aggregate(ladder(), 50.0)
            .unwrap();

        assert_eq!(result.paths.len(), 100);
        assert_eq!(result.mean_path.len(), 3);
        assert_eq!(result.mean_path[0], 50.0);
        assert_eq!(result.p5_path[0], 50.0);
        assert_eq!(result.p95_path[0], 50.0);
        assert_eq!(result.p5_path[2], 6.0);
        assert_eq!(result.p95_path[2], 96.0);
        assert_eq!(result.terminal_min, 1.0);
        assert_eq!(result.terminal_max, 100.0);
        assert!((result.terminal_mean - 50.5).abs() < 1e-9);
        // Returns (i - 50) / 50; 6th smallest terminal price is 6
        assert!((result.var_95_percent - (-88.0)).abs() < 1e-9);
        assert!((result.var_95_amount - 44.0).abs() < 1e-9);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let parallel = StatisticsAggregator::new(true).aggregate(ladder(), 50.0).unwrap();
        let sequential = StatisticsAggregator::new(false).aggregate(ladder(), 50.0).unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_aggregate_keeps_path_order() {
        let ensemble = ladder();
        let expected = ensemble.paths().to_vec();
        let result = StatisticsAggregator::default().aggregate(ensemble, 50.0).unwrap();
        assert_eq!(result.paths, expected);
    }

    #[test]
    fn test_ragged_ensemble_is_an_error_not_a_panic() {
        let ragged = vec![vec![1.0, 2.0, 3.0], vec![1.0, 2.0]];
        let outcome = PathEnsemble::from_paths(ragged)
            .and_then(|ensemble| StatisticsAggregator::default().aggregate(ensemble, 1.0));
        assert!(matches!(
            outcome,
            Err(ComputationError::RaggedEnsemble { path: 1, .. })
        ));
    }

    #[test]
    fn test_empty_ensemble_is_an_error() {
        let outcome = PathEnsemble::from_paths(Vec::new())
            .and_then(|ensemble| StatisticsAggregator::default().aggregate(ensemble, 100.0));
        assert!(matches!(outcome, Err(ComputationError::EmptyEnsemble { .. })));
    }
}
