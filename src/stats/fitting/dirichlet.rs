//! Maximum likelihood estimation of the Dirichlet concentration parameters.

use super::validation::check_sample;
use super::{construct, DistributionFactory};
use crate::optimize::utils::norm;
use crate::stats::config::ToleranceConfig;
use crate::stats::continuous::special::{digamma, digamma_inv, trigamma};
use crate::stats::continuous::Dirichlet;
use crate::stats::descriptive;
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::sample::Sample;
use log::{debug, trace, warn};

/// Solver that produced a [`DirichletFit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirichletMethod {
    /// Newton-Raphson on the stationarity equations
    Newton,
    /// Fixed-point fallback θᵢ = ψ⁻¹(ψ(Σθ) + mean ln yᵢ)
    FixedPoint,
}

/// Result of a Dirichlet likelihood fit.
#[derive(Debug, Clone, PartialEq)]
pub struct DirichletFit {
    /// Concentration parameters, length dimension + 1
    pub theta: Vec<f64>,
    /// Mean log of each coordinate, the last being ln(1 - Σ y)
    pub mean_log: Vec<f64>,
    /// Solver that converged
    pub method: DirichletMethod,
    /// Iterations used by that solver
    pub iterations: usize,
}

impl DirichletFit {
    /// Newton residual `g - b` at the fitted parameters.
    pub fn residual(&self) -> Vec<f64> {
        DirichletFactory::newton_residual(&self.theta, &self.mean_log)
    }
}

/// Dirichlet by maximum likelihood.
///
/// Solves ψ(θᵢ) - ψ(Σθ) = mean ln yᵢ for every coordinate, the last one being
/// 1 - Σ y. Newton-Raphson runs first, using the diagonal-plus-rank-one
/// structure of the Hessian; if it does not converge within
/// `newton_max_iter` steps the factory logs a warning and continues with the
/// fixed-point iteration, bounded by `fixed_point_max_iter`.
#[derive(Debug, Clone, Default)]
pub struct DirichletFactory {
    config: ToleranceConfig,
}

/// Gradient and Newton step at θ.
struct NewtonStep {
    /// Per-coordinate residual g - b
    residual: Vec<f64>,
    /// Update subtracted from θ
    delta: Vec<f64>,
}

fn newton_step(theta: &[f64], mean_log: &[f64]) -> NewtonStep {
    let total: f64 = theta.iter().sum();
    let psi_total = digamma(total);
    let z = trigamma(total);

    let g: Vec<f64> = theta
        .iter()
        .zip(mean_log)
        .map(|(&t, &m)| m - digamma(t) + psi_total)
        .collect();
    let q: Vec<f64> = theta.iter().map(|&t| -trigamma(t)).collect();

    let numerator: f64 = g.iter().zip(&q).map(|(gi, qi)| gi / qi).sum();
    let denominator: f64 = 1.0 / z + q.iter().map(|qi| 1.0 / qi).sum::<f64>();
    let b = numerator / denominator;

    let residual: Vec<f64> = g.iter().map(|gi| gi - b).collect();
    let delta = residual.iter().zip(&q).map(|(r, qi)| r / qi).collect();
    NewtonStep { residual, delta }
}

impl DirichletFactory {
    /// Create a factory running with the given tolerances.
    pub fn new(config: ToleranceConfig) -> Self {
        Self { config }
    }

    /// Residual `gᵢ - b` of the Newton system at θ, where
    /// `gᵢ = mean_logᵢ - ψ(θᵢ) + ψ(Σθ)` and `b` is the shared correction term.
    pub fn newton_residual(theta: &[f64], mean_log: &[f64]) -> Vec<f64> {
        newton_step(theta, mean_log).residual
    }

    /// Mean log of every coordinate, including the implied last one.
    fn sufficient_statistics(sample: &Sample) -> StatsResult<Vec<f64>> {
        let d = sample.dimension();
        let mut mean_log = vec![0.0; d + 1];
        for row in sample.rows() {
            let last = 1.0 - row.iter().sum::<f64>();
            if row.iter().any(|&y| !(y > 0.0)) || !(last > 0.0) {
                return Err(StatsError::invalid_argument(
                    "DirichletFactory",
                    format!("point {row:?} is not inside the open simplex"),
                ));
            }
            for (acc, &y) in mean_log.iter_mut().zip(row) {
                *acc += y.ln();
            }
            mean_log[d] += last.ln();
        }
        let n = sample.len() as f64;
        Ok(mean_log.into_iter().map(|s| s / n).collect())
    }

    /// Moment starting point: the concentration total from the first
    /// coordinate's mean and variance, split along the coordinate means.
    fn initial_guess(sample: &Sample) -> Vec<f64> {
        let d = sample.dimension();
        let mut means: Vec<f64> = (0..d).map(|j| descriptive::mean(&sample.column(j))).collect();
        means.push(1.0 - means.iter().sum::<f64>());

        let first = sample.column(0);
        let m = means[0];
        let total = m * (1.0 - m) / descriptive::variance(&first) - 1.0;
        let total = if total > 0.0 && total.is_finite() {
            total
        } else {
            (d + 1) as f64
        };
        means.iter().map(|&m| (m * total).max(f64::MIN_POSITIVE)).collect()
    }

    /// Run the likelihood fit.
    pub fn fit(&self, sample: &Sample) -> StatsResult<DirichletFit> {
        const CONTEXT: &str = "DirichletFactory";
        if sample.dimension() == 0 {
            return Err(StatsError::invalid_argument(CONTEXT, "sample dimension must be at least 1"));
        }
        check_sample(sample, sample.dimension(), CONTEXT)?;
        let mean_log = Self::sufficient_statistics(sample)?;
        let threshold = sample.dimension() as f64 * self.config.newton_epsilon;

        let mut theta = Self::initial_guess(sample);
        for iteration in 1..=self.config.newton_max_iter {
            let step = newton_step(&theta, &mean_log);
            let next: Vec<f64> = theta.iter().zip(&step.delta).map(|(t, dt)| t - dt).collect();
            if next.iter().any(|t| !(*t > 0.0 && t.is_finite())) {
                trace!("{CONTEXT}: Newton step {iteration} left the positive orthant");
                break;
            }
            theta = next;
            let size = norm(&step.delta);
            trace!("{CONTEXT}: Newton step {iteration} |delta|={size:e}");
            if size < threshold {
                debug!("{CONTEXT}: Newton converged after {iteration} iterations");
                return Ok(DirichletFit {
                    theta,
                    mean_log,
                    method: DirichletMethod::Newton,
                    iterations: iteration,
                });
            }
        }

        warn!(
            "{CONTEXT}: Newton did not converge within {} iterations, switching to fixed-point iteration",
            self.config.newton_max_iter
        );
        for iteration in 1..=self.config.fixed_point_max_iter {
            let psi_total = digamma(theta.iter().sum());
            let next: Vec<f64> = mean_log.iter().map(|&m| digamma_inv(psi_total + m)).collect();
            let change: Vec<f64> = next.iter().zip(&theta).map(|(a, b)| a - b).collect();
            theta = next;
            if norm(&change) < threshold {
                debug!("{CONTEXT}: fixed point converged after {iteration} iterations");
                return Ok(DirichletFit {
                    theta,
                    mean_log,
                    method: DirichletMethod::FixedPoint,
                    iterations: iteration,
                });
            }
        }

        Err(StatsError::ConvergenceError {
            iterations: self.config.fixed_point_max_iter,
            context: format!("{CONTEXT} fixed-point iteration"),
        })
    }
}

impl DistributionFactory for DirichletFactory {
    type Output = Dirichlet;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<Dirichlet> {
        let fit = self.fit(sample)?;
        construct("DirichletFactory", &fit.theta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::distribution::MultivariateDistribution;
    use crate::stats::error::ErrorKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_dirichlet_factory_recovers_parameters() {
        let truth = Dirichlet::new(vec![2.0, 3.0, 4.0]).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let sample = truth.sample_n(&mut rng, 20_000);

        let fit = DirichletFactory::default().fit(&sample).unwrap();
        assert_eq!(fit.method, DirichletMethod::Newton);
        for (estimate, t) in fit.theta.iter().zip(truth.theta()) {
            assert!((estimate - t).abs() < 0.1 * t, "theta {:?}", fit.theta);
        }
        let dist = DirichletFactory::default().build_from_sample(&sample).unwrap();
        assert_eq!(dist.dimension(), 2);
    }

    #[test]
    fn test_fixed_point_fallback() {
        let truth = Dirichlet::new(vec![1.5, 0.5]).unwrap();
        let mut rng = StdRng::seed_from_u64(12);
        let sample = truth.sample_n(&mut rng, 5_000);

        let no_newton = DirichletFactory::new(ToleranceConfig {
            newton_max_iter: 0,
            newton_epsilon: 1e-10,
            ..Default::default()
        });
        let fallback = no_newton.fit(&sample).unwrap();
        assert_eq!(fallback.method, DirichletMethod::FixedPoint);

        let newton = DirichletFactory::default().fit(&sample).unwrap();
        for (a, b) in fallback.theta.iter().zip(&newton.theta) {
            assert!((a - b).abs() < 1e-6 * b);
        }
    }

    #[test]
    fn test_fixed_point_budget_exhausted() {
        let truth = Dirichlet::new(vec![2.0, 2.0]).unwrap();
        let mut rng = StdRng::seed_from_u64(13);
        let sample = truth.sample_n(&mut rng, 100);

        let starved = DirichletFactory::new(ToleranceConfig {
            newton_max_iter: 0,
            fixed_point_max_iter: 1,
            ..Default::default()
        });
        let err = starved.fit(&sample).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NumericalConvergenceFailure);
    }

    #[test]
    fn test_dirichlet_factory_rejects_points_off_simplex() {
        let factory = DirichletFactory::default();
        let sample = Sample::from_rows(&[[0.2, 0.3], [0.6, 0.5]]).unwrap();
        let err = factory.build_from_sample(&sample).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = factory.build_from_sample(&Sample::new(2)).unwrap_err();
        assert!(err.to_string().contains("empty sample"));
    }
}
