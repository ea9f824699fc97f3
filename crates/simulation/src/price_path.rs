//! Geometric Brownian Motion price paths.

use crate::error::ComputationError;
use crate::random::NormalGenerator;
use mc_var_domain::SimulationParameters;
use mc_var_domain::constants::{RISK_FREE_RATE, TRADING_DAYS_PER_YEAR};
use rand::Rng;
use rayon::prelude::*;

/// Completed set of simulated paths. Row `i` is path `i`, column `t` is day `t`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEnsemble {
    paths: Vec<Vec<f64>>,
}

impl PathEnsemble {
    /// Wraps pre-computed paths.
    ///
    /// # Errors
    /// Returns [`ComputationError::EmptyEnsemble`] when there are no paths or a
    /// path has no prices, and [`ComputationError::RaggedEnsemble`] when path
    /// lengths differ.
    pub fn from_paths(paths: Vec<Vec<f64>>) -> Result<Self, ComputationError> {
        let path_len = paths.first().map_or(0, Vec::len);
        if path_len == 0 {
            return Err(ComputationError::EmptyEnsemble {
                iteration_count: paths.len(),
                horizon_days: 0,
            });
        }
        if let Some(path) = paths.iter().position(|p| p.len() != path_len) {
            return Err(ComputationError::RaggedEnsemble {
                path,
                expected: path_len,
                found: paths[path].len(),
            });
        }
        Ok(Self { paths })
    }

    /// Number of paths.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        self.paths.len()
    }

    /// Number of prices per path.
    #[must_use]
    pub fn path_len(&self) -> usize {
        self.paths.first().map_or(0, Vec::len)
    }

    /// Number of simulated steps.
    #[must_use]
    pub fn horizon_days(&self) -> usize {
        self.path_len().saturating_sub(1)
    }

    /// All paths.
    #[must_use]
    pub fn paths(&self) -> &[Vec<f64>] {
        &self.paths
    }

    /// Prices of every path at time index `t`, in path order, or `None` if `t`
    /// is past the end of the paths.
    #[must_use]
    pub fn cross_section(&self, t: usize) -> Option<Vec<f64>> {
        self.paths.iter().map(|path| path.get(t).copied()).collect()
    }

    /// Prices of every path at the last time index.
    #[must_use]
    pub fn terminal_prices(&self) -> Vec<f64> {
        self.paths
            .iter()
            .filter_map(|path| path.last().copied())
            .collect()
    }

    /// Releases the underlying matrix.
    #[must_use]
    pub fn into_paths(self) -> Vec<Vec<f64>> {
        self.paths
    }
}

/// Zero-drift GBM stepped over trading days.
#[derive(Debug, Clone)]
pub struct GeometricBrownianMotion {
    pub initial_price: f64,
    pub annual_volatility: f64, // percent, 20.0 = 20%
    pub horizon_days: usize,
    pub iteration_count: usize,
    pub parallel: bool,
}

impl GeometricBrownianMotion {
    pub fn new(
        initial_price: f64,
        annual_volatility: f64,
        horizon_days: usize,
        iteration_count: usize,
    ) -> Self {
        Self {
            initial_price,
            annual_volatility,
            horizon_days,
            iteration_count,
            parallel: true,
        }
    }

    pub fn from_parameters(params: &SimulationParameters) -> Self {
        Self::new(
            params.initial_price,
            params.annual_volatility,
            params.horizon_days as usize,
            params.iteration_count as usize,
        )
    }

    /// Enables or disables rayon stepping across paths.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// `annual_volatility / 100 / sqrt(252)`.
    pub fn daily_volatility(&self) -> f64 {
        self.annual_volatility / 100.0 / TRADING_DAYS_PER_YEAR.sqrt()
    }

    /// Per-step log drift and shock scale.
    fn step_coefficients(&self) -> (f64, f64) {
        let dt = 1.0 / TRADING_DAYS_PER_YEAR;
        let daily_vol = self.daily_volatility();
        let drift_term = (RISK_FREE_RATE - 0.5 * daily_vol.powi(2)) * dt;
        let vol_term = daily_vol * dt.sqrt();
        (drift_term, vol_term)
    }

    /// Simulates the full ensemble.
    ///
    /// Each step draws one normal per path, in path order, before any path is
    /// advanced; the random stream is therefore consumed identically whether or
    /// not the update runs in parallel.
    ///
    /// # Errors
    /// Returns [`ComputationError::EmptyEnsemble`] for zero paths or steps, and
    /// [`ComputationError::InvalidPrice`] if a price is not finite and positive.
    pub fn simulate<R: Rng>(
        &self,
        generator: &mut NormalGenerator<R>,
    ) -> Result<PathEnsemble, ComputationError> {
        if self.iteration_count == 0 || self.horizon_days == 0 {
            return Err(ComputationError::EmptyEnsemble {
                iteration_count: self.iteration_count,
                horizon_days: self.horizon_days,
            });
        }

        let (drift_term, vol_term) = self.step_coefficients();
        let mut paths = vec![vec![self.initial_price; self.horizon_days + 1]; self.iteration_count];
        let mut shocks = vec![0.0; self.iteration_count];

        for t in 1..=self.horizon_days {
            generator.fill(&mut shocks);

            let advance = |(path, z): (&mut Vec<f64>, &f64)| {
                path[t] = path[t - 1] * (drift_term + vol_term * z).exp();
            };
            if self.parallel {
                paths.par_iter_mut().zip(shocks.par_iter()).for_each(advance);
            } else {
                paths.iter_mut().zip(shocks.iter()).for_each(advance);
            }
        }

        if let Some(err) = first_invalid_price(&paths) {
            return Err(err);
        }

        Ok(PathEnsemble { paths })
    }
}

fn first_invalid_price(paths: &[Vec<f64>]) -> Option<ComputationError> {
    paths.iter().enumerate().find_map(|(i, path)| {
        path.iter()
            .position(|p| !(p.is_finite() && *p > 0.0))
            .map(|step| ComputationError::InvalidPrice {
                path: i,
                step,
                value: path[step],
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gbm_generation() {
        let gbm = GeometricBrownianMotion::new(100.0, 20.0, 10, 200);
        let ensemble = gbm.simulate(&mut NormalGenerator::seeded(1)).unwrap();

        assert_eq!(ensemble.iteration_count(), 200);
        assert_eq!(ensemble.path_len(), 11); // initial + 10 steps
        assert_eq!(ensemble.horizon_days(), 10);
        assert!(ensemble.paths().iter().all(|p| p[0] == 100.0));
        assert!(ensemble.paths().iter().flatten().all(|p| *p > 0.0));

        // Prices move when volatility is non-zero
        let all_same = ensemble.terminal_prices().iter().all(|p| *p == 100.0);
        assert!(!all_same);
    }

    #[test]
    fn test_daily_volatility() {
        let gbm = GeometricBrownianMotion::new(100.0, 20.0, 1, 100);
        let expected = 0.2 / 252f64.sqrt();
        assert!((gbm.daily_volatility() - expected).abs() < 1e-15);
    }

    #[test]
    fn test_zero_volatility_is_flat() {
        let gbm = GeometricBrownianMotion::new(42.5, 0.0, 30, 100);
        let ensemble = gbm.simulate(&mut NormalGenerator::seeded(3)).unwrap();
        assert!(ensemble.paths().iter().flatten().all(|p| *p == 42.5));
    }

    #[test]
    fn test_single_step_matches_recurrence() {
        let gbm = GeometricBrownianMotion::new(100.0, 50.0, 1, 100).with_parallel(false);
        let ensemble = gbm.simulate(&mut NormalGenerator::seeded(11)).unwrap();

        let z = NormalGenerator::seeded(11).batch(100);
        let dt = 1.0 / 252.0;
        let daily_vol = 0.5 / 252f64.sqrt();
        for (path, z) in ensemble.paths().iter().zip(z) {
            let expected = 100.0 * ((-0.5 * daily_vol * daily_vol) * dt + daily_vol * dt.sqrt() * z).exp();
            assert!((path[1] - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = GeometricBrownianMotion::new(100.0, 80.0, 20, 500)
            .with_parallel(false)
            .simulate(&mut NormalGenerator::seeded(99))
            .unwrap();
        let parallel = GeometricBrownianMotion::new(100.0, 80.0, 20, 500)
            .with_parallel(true)
            .simulate(&mut NormalGenerator::seeded(99))
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_empty_ensemble_fails() {
        let mut generator = NormalGenerator::seeded(0);
        let err = GeometricBrownianMotion::new(100.0, 20.0, 0, 100)
            .simulate(&mut generator)
            .unwrap_err();
        assert_eq!(
            err,
            ComputationError::EmptyEnsemble {
                iteration_count: 100,
                horizon_days: 0
            }
        );

        assert!(
            GeometricBrownianMotion::new(100.0, 20.0, 10, 0)
                .simulate(&mut generator)
                .is_err()
        );
    }

    #[test]
    fn test_invalid_price_detected() {
        let err = GeometricBrownianMotion::new(f64::NAN, 20.0, 5, 100)
            .simulate(&mut NormalGenerator::seeded(0))
            .unwrap_err();
        assert!(matches!(
            err,
            ComputationError::InvalidPrice { path: 0, step: 0, .. }
        ));
    }

    #[test]
    fn test_cross_sections() {
        let ensemble =
            PathEnsemble::from_paths(vec![vec![1.0, 2.0, 3.0], vec![1.0, 4.0, 9.0]]).unwrap();
        assert_eq!(ensemble.cross_section(1), Some(vec![2.0, 4.0]));
        assert_eq!(ensemble.cross_section(3), None);
        assert_eq!(ensemble.terminal_prices(), vec![3.0, 9.0]);
        assert_eq!(ensemble.horizon_days(), 2);
    }

    #[test]
    fn test_from_paths_rejects_ragged_rows() {
        let err = PathEnsemble::from_paths(vec![vec![1.0, 2.0, 3.0], vec![1.0, 2.0]]).unwrap_err();
        assert_eq!(
            err,
            ComputationError::RaggedEnsemble {
                path: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_from_paths_rejects_empty() {
        assert!(matches!(
            PathEnsemble::from_paths(Vec::new()),
            Err(ComputationError::EmptyEnsemble { .. })
        ));
        assert!(matches!(
            PathEnsemble::from_paths(vec![Vec::new(), Vec::new()]),
            Err(ComputationError::EmptyEnsemble { iteration_count: 2, .. })
        ));
    }
}
