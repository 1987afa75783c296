//! Chi-squared distribution.

use super::Gamma;
use crate::stats::distribution::{Distribution, Support};
use crate::stats::error::StatsResult;
use crate::stats::parametric::{expect_parameter_count, names, require_positive, Family, Parametric};
use num_complex::Complex64;
use rand::Rng;

/// Chi-squared distribution.
///
/// The chi-squared distribution with ν degrees of freedom is a special case
/// of the gamma distribution: χ²(ν) = Gamma(ν/2, 1/2).
///
/// f(x) = (1 / (2^(ν/2) Γ(ν/2))) x^(ν/2-1) exp(-x/2)  for x > 0
///
/// # Examples
///
/// ```
/// use estimr::stats::{ChiSquared, Distribution};
///
/// let chi2 = ChiSquared::new(5.0).unwrap();
/// assert!((chi2.mean() - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquared {
    /// Degrees of freedom
    nu: f64,
    /// Underlying gamma distribution
    gamma: Gamma,
}

impl ChiSquared {
    /// Create a new chi-squared distribution with ν degrees of freedom.
    ///
    /// # Errors
    ///
    /// Returns an error if ν is not positive.
    pub fn new(nu: f64) -> StatsResult<Self> {
        require_positive("nu", nu)?;
        // χ²(ν) = Gamma(ν/2, 1/2)
        let gamma = Gamma::new(nu / 2.0, 0.5, 0.0)?;
        Ok(Self { nu, gamma })
    }

    /// Get the degrees of freedom.
    pub fn nu(&self) -> f64 {
        self.nu
    }
}

impl Default for ChiSquared {
    fn default() -> Self {
        Self {
            nu: 2.0,
            gamma: Gamma::new(1.0, 0.5, 0.0).unwrap_or_default(),
        }
    }
}

impl Distribution for ChiSquared {
    fn support(&self) -> Support {
        Support::from_lower(0.0)
    }

    fn pdf(&self, x: f64) -> f64 {
        self.gamma.pdf(x)
    }

    fn log_pdf(&self, x: f64) -> f64 {
        self.gamma.log_pdf(x)
    }

    fn ddf(&self, x: f64) -> f64 {
        self.gamma.ddf(x)
    }

    fn cdf(&self, x: f64) -> f64 {
        self.gamma.cdf(x)
    }

    fn sf(&self, x: f64) -> f64 {
        self.gamma.sf(x)
    }

    fn characteristic_function(&self, t: f64) -> Complex64 {
        self.gamma.characteristic_function(t)
    }

    fn mean(&self) -> f64 {
        self.nu
    }

    fn var(&self) -> f64 {
        2.0 * self.nu
    }

    fn skewness(&self) -> f64 {
        (8.0 / self.nu).sqrt()
    }

    fn kurtosis(&self) -> f64 {
        12.0 / self.nu
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.gamma.sample(rng)
    }
}

impl Parametric for ChiSquared {
    const FAMILY: Family = Family::ChiSquared;

    fn parameters(&self) -> Vec<f64> {
        vec![self.nu]
    }

    fn parameter_names(&self) -> Vec<String> {
        names(&["nu"])
    }

    fn from_parameters(parameters: &[f64]) -> StatsResult<Self> {
        expect_parameter_count(Self::FAMILY, parameters, 1)?;
        Self::new(parameters[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chi_squared_creation() {
        assert!(ChiSquared::new(1.0).is_ok());
        assert!(ChiSquared::new(0.0).is_err());
        assert!(ChiSquared::new(-2.0).is_err());
    }

    #[test]
    fn test_chi_squared_cdf() {
        // χ²(2) = Exp(1/2)
        let c = ChiSquared::default();
        assert!((c.cdf(2.0) - (1.0 - (-1.0f64).exp())).abs() < 1e-12);
        let c = ChiSquared::new(1.0).unwrap();
        assert!((c.cdf(3.841458820694124) - 0.95).abs() < 1e-10);
    }

    #[test]
    fn test_chi_squared_ppf() {
        let c = ChiSquared::new(5.0).unwrap();
        let x = c.ppf(0.95).unwrap();
        assert!((x - 11.070497693516351).abs() < 1e-8);
    }
}
