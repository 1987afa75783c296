//! Numerical tolerances for fallbacks and iterative estimators.

use crate::optimize::scalar::ScalarOptions;

/// Epsilons and iteration budgets consumed by the numerical fallbacks of
/// [`Distribution`](crate::stats::Distribution) and by the iterative
/// estimators in [`fitting`](crate::stats::fitting).
///
/// The record is passed by reference into every algorithm that needs it and is
/// carried by each factory, so independent computations never share state.
///
/// ```
/// use estimr::stats::ToleranceConfig;
///
/// let config = ToleranceConfig {
///     newton_max_iter: 50,
///     ..Default::default()
/// };
/// assert_eq!(config.newton_max_iter, 50);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ToleranceConfig {
    /// CDF gap at which quantile bisection accepts a point
    pub quantile_epsilon: f64,
    /// Maximum bisection steps for a quantile
    pub quantile_max_iter: usize,
    /// Relative step of the centered finite difference used for the DDF
    pub ddf_relative_step: f64,
    /// Gauss-Legendre order used by moment and characteristic-function fallbacks
    pub integration_nodes: usize,
    /// Number of sub-intervals of the composite quadrature rule
    pub integration_intervals: usize,
    /// Dirichlet Newton convergence threshold (scaled by the dimension)
    pub newton_epsilon: f64,
    /// Dirichlet Newton iteration budget
    pub newton_max_iter: usize,
    /// Dirichlet fixed-point fallback iteration budget
    pub fixed_point_max_iter: usize,
    /// Bracket width at which monotone-map bisection stops (Frank theta)
    pub bisection_epsilon: f64,
    /// Maximum steps for monotone-map bracketing and bisection
    pub bisection_max_iter: usize,
    /// Tolerance when checking that sample values lie on an integer support
    pub support_epsilon: f64,
    /// Maximum steps of the Binomial integer hill climb
    pub hill_climb_max_iter: usize,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            quantile_epsilon: 1e-12,
            quantile_max_iter: 256,
            ddf_relative_step: 1e-5,
            integration_nodes: 64,
            integration_intervals: 32,
            newton_epsilon: 1e-12,
            newton_max_iter: 10,
            fixed_point_max_iter: 10_000,
            bisection_epsilon: 1e-14,
            bisection_max_iter: 256,
            support_epsilon: 1e-14,
            hill_climb_max_iter: 100_000,
        }
    }
}

impl ToleranceConfig {
    /// Root-finding options for monotone-map inversion.
    pub fn bisection_options(&self) -> ScalarOptions {
        ScalarOptions {
            max_iter: self.bisection_max_iter,
            tol: self.bisection_epsilon,
            rtol: 4.0 * f64::EPSILON,
        }
    }

    /// Root-finding options for quantile bisection.
    pub fn quantile_options(&self) -> ScalarOptions {
        ScalarOptions {
            max_iter: self.quantile_max_iter,
            tol: self.quantile_epsilon,
            rtol: self.quantile_epsilon,
        }
    }
}
