//! Normal (Gaussian) distribution.

use super::special::{self, INV_SQRT_2PI, LN_SQRT_2PI};
use crate::stats::distribution::{check_probability, Distribution, Support};
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::parametric::{expect_parameter_count, names, Family, Parametric};
use num_complex::Complex64;
use rand::Rng;
use rand_distr::StandardNormal;

/// Normal (Gaussian) distribution.
///
/// The normal distribution with mean μ and standard deviation σ has PDF:
///
/// f(x) = (1 / (σ√(2π))) exp(-(x-μ)² / (2σ²))
///
/// # Examples
///
/// ```
/// use estimr::stats::{Distribution, Normal};
///
/// let n = Normal::standard();
/// assert!((n.pdf(0.0) - 0.3989422804).abs() < 1e-6);
/// assert!((n.cdf(0.0) - 0.5).abs() < 1e-10);
///
/// let n = Normal::new(100.0, 15.0).unwrap();
/// assert!((n.ppf(0.5).unwrap() - 100.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    /// Mean (μ)
    mu: f64,
    /// Standard deviation (σ)
    sigma: f64,
}

impl Normal {
    /// Create a new normal distribution with given mean and standard deviation.
    ///
    /// # Errors
    ///
    /// Returns an error if sigma is not positive or mu is not finite.
    pub fn new(mu: f64, sigma: f64) -> StatsResult<Self> {
        if !(sigma > 0.0 && sigma.is_finite()) {
            return Err(StatsError::InvalidParameter {
                name: "sigma".to_string(),
                value: sigma,
                reason: "must be positive".to_string(),
            });
        }
        if !mu.is_finite() {
            return Err(StatsError::InvalidParameter {
                name: "mu".to_string(),
                value: mu,
                reason: "must be finite".to_string(),
            });
        }
        Ok(Self { mu, sigma })
    }

    /// Create a standard normal distribution N(0, 1).
    pub fn standard() -> Self {
        Self { mu: 0.0, sigma: 1.0 }
    }

    /// Get the mean parameter.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Get the standard deviation parameter.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Standardize a value: z = (x - μ) / σ
    fn standardize(&self, x: f64) -> f64 {
        (x - self.mu) / self.sigma
    }
}

impl Default for Normal {
    fn default() -> Self {
        Self::standard()
    }
}

impl Distribution for Normal {
    fn support(&self) -> Support {
        Support::real_line()
    }

    fn pdf(&self, x: f64) -> f64 {
        let z = self.standardize(x);
        INV_SQRT_2PI * (-0.5 * z * z).exp() / self.sigma
    }

    fn log_pdf(&self, x: f64) -> f64 {
        let z = self.standardize(x);
        -LN_SQRT_2PI - self.sigma.ln() - 0.5 * z * z
    }

    fn cdf(&self, x: f64) -> f64 {
        special::norm_cdf(self.standardize(x))
    }

    fn sf(&self, x: f64) -> f64 {
        special::norm_sf(self.standardize(x))
    }

    fn ddf(&self, x: f64) -> f64 {
        -self.standardize(x) / self.sigma * self.pdf(x)
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        Ok(self.mu + self.sigma * special::norm_ppf(p))
    }

    fn isf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        Ok(self.mu - self.sigma * special::norm_ppf(p))
    }

    fn characteristic_function(&self, t: f64) -> Complex64 {
        Complex64::new(-0.5 * self.sigma * self.sigma * t * t, self.mu * t).exp()
    }

    fn mean(&self) -> f64 {
        self.mu
    }

    fn var(&self) -> f64 {
        self.sigma * self.sigma
    }

    fn std(&self) -> f64 {
        self.sigma
    }

    fn skewness(&self) -> f64 {
        0.0
    }

    fn kurtosis(&self) -> f64 {
        0.0
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        self.mu + self.sigma * z
    }
}

impl Parametric for Normal {
    const FAMILY: Family = Family::Normal;

    fn parameters(&self) -> Vec<f64> {
        vec![self.mu, self.sigma]
    }

    fn parameter_names(&self) -> Vec<String> {
        names(&["mu", "sigma"])
    }

    fn from_parameters(parameters: &[f64]) -> StatsResult<Self> {
        expect_parameter_count(Self::FAMILY, parameters, 2)?;
        Self::new(parameters[0], parameters[1])
    }
}
