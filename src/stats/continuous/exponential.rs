//! Exponential distribution.

use crate::stats::distribution::{check_probability, Distribution, Support};
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::parametric::{expect_parameter_count, names, require_finite, Family, Parametric};
use num_complex::Complex64;
use rand::Rng;
use rand_distr::Exp1;

/// Exponential distribution with rate λ and location γ.
///
/// f(x) = λ exp(-λ(x - γ))  for x ≥ γ
///
/// # Examples
///
/// ```
/// use estimr::stats::{Distribution, Exponential};
///
/// let e = Exponential::new(2.0, 0.0).unwrap();
/// assert!((e.mean() - 0.5).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exponential {
    /// Rate parameter (λ)
    lambda: f64,
    /// Location (γ)
    gamma: f64,
}

impl Exponential {
    /// Create a new exponential distribution.
    ///
    /// # Errors
    ///
    /// Returns an error if lambda is not positive or gamma is not finite.
    pub fn new(lambda: f64, gamma: f64) -> StatsResult<Self> {
        if !(lambda > 0.0 && lambda.is_finite()) {
            return Err(StatsError::InvalidParameter {
                name: "lambda".to_string(),
                value: lambda,
                reason: "must be positive".to_string(),
            });
        }
        require_finite("gamma", gamma)?;
        Ok(Self { lambda, gamma })
    }

    /// Unit-rate exponential at the origin.
    pub fn standard() -> Self {
        Self {
            lambda: 1.0,
            gamma: 0.0,
        }
    }

    /// Get the rate parameter λ.
    pub fn rate(&self) -> f64 {
        self.lambda
    }

    /// Get the location γ.
    pub fn location(&self) -> f64 {
        self.gamma
    }
}

impl Default for Exponential {
    fn default() -> Self {
        Self::standard()
    }
}

impl Distribution for Exponential {
    fn support(&self) -> Support {
        Support::from_lower(self.gamma)
    }

    fn pdf(&self, x: f64) -> f64 {
        if x < self.gamma {
            0.0
        } else {
            self.lambda * (-self.lambda * (x - self.gamma)).exp()
        }
    }

    fn log_pdf(&self, x: f64) -> f64 {
        if x < self.gamma {
            f64::NEG_INFINITY
        } else {
            self.lambda.ln() - self.lambda * (x - self.gamma)
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= self.gamma {
            0.0
        } else {
            -(-self.lambda * (x - self.gamma)).exp_m1()
        }
    }

    fn sf(&self, x: f64) -> f64 {
        if x <= self.gamma {
            1.0
        } else {
            (-self.lambda * (x - self.gamma)).exp()
        }
    }

    fn ddf(&self, x: f64) -> f64 {
        -self.lambda * self.pdf(x)
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        Ok(self.gamma - (-p).ln_1p() / self.lambda)
    }

    fn isf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        Ok(self.gamma - p.ln() / self.lambda)
    }

    fn characteristic_function(&self, t: f64) -> Complex64 {
        Complex64::new(0.0, t * self.gamma).exp() * self.lambda / Complex64::new(self.lambda, -t)
    }

    fn mean(&self) -> f64 {
        self.gamma + 1.0 / self.lambda
    }

    fn var(&self) -> f64 {
        1.0 / (self.lambda * self.lambda)
    }

    fn skewness(&self) -> f64 {
        2.0
    }

    fn kurtosis(&self) -> f64 {
        6.0
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let e: f64 = rng.sample(Exp1);
        self.gamma + e / self.lambda
    }
}

impl Parametric for Exponential {
    const FAMILY: Family = Family::Exponential;

    fn parameters(&self) -> Vec<f64> {
        vec![self.lambda, self.gamma]
    }

    fn parameter_names(&self) -> Vec<String> {
        names(&["lambda", "gamma"])
    }

    fn from_parameters(parameters: &[f64]) -> StatsResult<Self> {
        expect_parameter_count(Self::FAMILY, parameters, 2)?;
        Self::new(parameters[0], parameters[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_creation() {
        assert!(Exponential::new(1.0, 0.0).is_ok());
        assert!(Exponential::new(0.0, 0.0).is_err());
        assert!(Exponential::new(-1.0, 0.0).is_err());
        assert!(Exponential::new(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_exponential_pdf_cdf() {
        let e = Exponential::new(2.0, 1.0).unwrap();
        assert_eq!(e.pdf(0.5), 0.0);
        assert!((e.pdf(1.0) - 2.0).abs() < 1e-15);
        assert!((e.cdf(1.5) - (1.0 - (-1.0f64).exp())).abs() < 1e-15);
        assert!((e.sf(1.5) - (-1.0f64).exp()).abs() < 1e-15);
        assert!((e.log_pdf(2.0) - e.pdf(2.0).ln()).abs() < 1e-14);
    }

    #[test]
    fn test_exponential_ppf() {
        let e = Exponential::new(0.5, -1.0).unwrap();
        for p in [1e-10, 0.1, 0.5, 0.99] {
            assert!((e.cdf(e.ppf(p).unwrap()) - p).abs() < 1e-14);
            assert!((e.sf(e.isf(p).unwrap()) - p).abs() < 1e-14);
        }
        assert!((e.ppf(0.5).unwrap() - (-1.0 + 2.0 * 2.0f64.ln())).abs() < 1e-14);
    }

    #[test]
    fn test_exponential_moments() {
        let e = Exponential::new(2.0, 3.0).unwrap();
        assert!((e.mean() - 3.5).abs() < 1e-15);
        assert!((e.var() - 0.25).abs() < 1e-15);
        let numeric = crate::stats::numerical::characteristic_function(&e, 0.8, &Default::default());
        assert!((e.characteristic_function(0.8) - numeric).norm() < 1e-8);
    }
}
