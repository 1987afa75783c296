//! The distribution evaluation contract.
//!
//! [`Distribution`] is the univariate contract: implementors supply the
//! support, PDF and CDF, and override any other method for which a closed
//! form exists. Every default delegates to the matching generic fallback in
//! [`numerical`](crate::stats::numerical) with [`ToleranceConfig::default`];
//! the fallbacks are public so callers can run them with other tolerances.
//!
//! [`MultivariateDistribution`] covers the Dirichlet distribution and the
//! bivariate copulas; [`Copula`] adds the rank-correlation interface.

use crate::stats::config::ToleranceConfig;
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::numerical;
use crate::stats::sample::Sample;
use log::warn;
use num_complex::Complex64;
use rand::distributions::Open01;
use rand::Rng;

/// Closed interval holding the support of a univariate distribution.
///
/// Either bound may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Support {
    /// Lower bound (may be `-inf`)
    pub lower: f64,
    /// Upper bound (may be `+inf`)
    pub upper: f64,
}

impl Support {
    /// Create a support interval.
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// The whole real line.
    pub fn real_line() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// `[lower, +inf)`.
    pub fn from_lower(lower: f64) -> Self {
        Self::new(lower, f64::INFINITY)
    }

    /// Whether `x` lies in the interval.
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }

    /// Whether both bounds are finite.
    pub fn is_bounded(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }
}

/// Univariate distribution evaluation contract.
///
/// Required: [`support`](Self::support), [`pdf`](Self::pdf),
/// [`cdf`](Self::cdf). Discrete families return the probability mass at
/// integer points from `pdf` and report [`is_discrete`](Self::is_discrete).
pub trait Distribution {
    /// Support interval.
    fn support(&self) -> Support;

    /// Probability density (or mass) at `x`; 0 outside the support.
    fn pdf(&self, x: f64) -> f64;

    /// Cumulative distribution function P(X <= x).
    fn cdf(&self, x: f64) -> f64;

    /// Natural log of the density; `-inf` where the density is zero.
    fn log_pdf(&self, x: f64) -> f64 {
        let p = self.pdf(x);
        if p > 0.0 { p.ln() } else { f64::NEG_INFINITY }
    }

    /// Survival function P(X > x).
    fn sf(&self, x: f64) -> f64 {
        1.0 - self.cdf(x)
    }

    /// Derivative of the density with respect to `x`.
    fn ddf(&self, x: f64) -> f64 {
        numerical::ddf(self, x, &ToleranceConfig::default())
    }

    /// Quantile function: smallest x with CDF(x) >= p.
    ///
    /// # Errors
    ///
    /// `InvalidProbability` unless 0 < p < 1.
    fn ppf(&self, p: f64) -> StatsResult<f64> {
        numerical::quantile(self, p, false, &ToleranceConfig::default())
    }

    /// Tail quantile: x with SF(x) = p.
    fn isf(&self, p: f64) -> StatsResult<f64> {
        numerical::quantile(self, p, true, &ToleranceConfig::default())
    }

    /// Characteristic function E[exp(i t X)].
    fn characteristic_function(&self, t: f64) -> Complex64 {
        numerical::characteristic_function(self, t, &ToleranceConfig::default())
    }

    /// Mean.
    fn mean(&self) -> f64 {
        numerical::mean(self, &ToleranceConfig::default())
    }

    /// Variance.
    fn var(&self) -> f64 {
        numerical::central_moment(self, 2, &ToleranceConfig::default())
    }

    /// Standard deviation.
    fn std(&self) -> f64 {
        self.var().sqrt()
    }

    /// Skewness.
    fn skewness(&self) -> f64 {
        numerical::skewness(self, &ToleranceConfig::default())
    }

    /// Excess kurtosis.
    fn kurtosis(&self) -> f64 {
        numerical::kurtosis(self, &ToleranceConfig::default())
    }

    /// Whether the distribution is supported on integers.
    fn is_discrete(&self) -> bool {
        false
    }

    /// Draw one realization by inverting the quantile function at a uniform
    /// draw on (0, 1).
    ///
    /// # Errors
    ///
    /// Whatever [`ppf`](Self::ppf) reports for the drawn level.
    fn try_sample<R: Rng + ?Sized>(&self, rng: &mut R) -> StatsResult<f64>
    where
        Self: Sized,
    {
        let u: f64 = rng.sample(Open01);
        self.ppf(u)
    }

    /// Draw one realization. Defaults to [`try_sample`](Self::try_sample);
    /// a failed inversion is logged and returned as NaN.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64
    where
        Self: Sized,
    {
        self.try_sample(rng).unwrap_or_else(|err| {
            warn!("quantile inversion failed while sampling: {err}");
            f64::NAN
        })
    }

    /// Draw `n` realizations into a one-dimensional [`Sample`].
    fn sample_n<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Sample
    where
        Self: Sized,
    {
        let values: Vec<f64> = (0..n).map(|_| self.sample(rng)).collect();
        Sample::from_values(&values)
    }
}

/// Multivariate distribution evaluation contract.
pub trait MultivariateDistribution {
    /// Dimension of the points.
    fn dimension(&self) -> usize;

    /// Probability density at `x`; 0 outside the support.
    fn pdf(&self, x: &[f64]) -> f64;

    /// Joint CDF P(X_1 <= x_1, ..., X_d <= x_d).
    fn cdf(&self, x: &[f64]) -> f64;

    /// Natural log of the density.
    fn log_pdf(&self, x: &[f64]) -> f64 {
        let p = self.pdf(x);
        if p > 0.0 { p.ln() } else { f64::NEG_INFINITY }
    }

    /// Gradient of the density with respect to the point.
    fn ddf(&self, x: &[f64]) -> Vec<f64> {
        numerical::gradient(|y| self.pdf(y), x, &ToleranceConfig::default())
    }

    /// Mean vector.
    fn mean(&self) -> Vec<f64>;

    /// Covariance matrix.
    fn covariance(&self) -> Vec<Vec<f64>>;

    /// Draw one realization.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64>
    where
        Self: Sized;

    /// Draw `n` realizations.
    fn sample_n<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Sample
    where
        Self: Sized,
    {
        let mut sample = Sample::new(self.dimension());
        for _ in 0..n {
            sample.push_unchecked(&self.sample(rng));
        }
        sample
    }
}

/// Bivariate copula: a distribution on [0, 1]² with uniform marginals.
pub trait Copula: MultivariateDistribution {
    /// Kendall's tau implied by the parameter.
    fn kendall_tau(&self) -> f64;

    /// Spearman's rho, by default `12 ∫∫ C(u, v) du dv - 3` by quadrature.
    fn spearman_rho(&self) -> f64 {
        numerical::copula_spearman_rho(self, &ToleranceConfig::default())
    }

    /// P(V <= v | U = u).
    fn conditional_cdf(&self, u: f64, v: f64) -> f64;

    /// Inverse of [`conditional_cdf`](Self::conditional_cdf) in `v`.
    fn conditional_ppf(&self, u: f64, q: f64) -> f64;
}

/// Reject probabilities outside the open interval (0, 1).
pub(crate) fn check_probability(p: f64) -> StatsResult<()> {
    if p > 0.0 && p < 1.0 {
        Ok(())
    } else {
        Err(StatsError::InvalidProbability { value: p })
    }
}

/// Mean vector of a bivariate copula.
pub(crate) fn copula_mean() -> Vec<f64> {
    vec![0.5, 0.5]
}

/// Covariance matrix of a bivariate copula with the given Spearman's rho.
pub(crate) fn copula_covariance(rho: f64) -> Vec<Vec<f64>> {
    let var = 1.0 / 12.0;
    vec![vec![var, rho * var], vec![rho * var, var]]
}
