//! Rice distribution.

use super::special;
use super::NonCentralChiSquared;
use crate::stats::distribution::{Distribution, Support};
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::parametric::{expect_parameter_count, names, require_positive, Family, Parametric};
use rand::Rng;
use rand_distr::StandardNormal;
use std::f64::consts::PI;

/// Rice distribution.
///
/// The magnitude of a bivariate normal vector with independent components of
/// standard deviation σ, centred at distance ν from the origin.
///
/// f(x) = x / σ² exp(-(x² + ν²) / (2σ²)) I₀(xν / σ²)  for x ≥ 0
///
/// The Bessel factor is evaluated in exponentially scaled form so large
/// arguments do not overflow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rice {
    sigma: f64,
    nu: f64,
}

impl Rice {
    /// Create a new Rice distribution.
    ///
    /// # Errors
    ///
    /// Returns an error if σ is not positive or ν is negative or not finite.
    pub fn new(sigma: f64, nu: f64) -> StatsResult<Self> {
        require_positive("sigma", sigma)?;
        if !(nu >= 0.0 && nu.is_finite()) {
            return Err(StatsError::invalid_parameter(
                "nu",
                nu,
                "must be non-negative and finite",
            ));
        }
        Ok(Self { sigma, nu })
    }

    /// Get the scale σ.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Get the non-centrality ν.
    pub fn nu(&self) -> f64 {
        self.nu
    }

    /// The squared, rescaled variable follows a non-central χ²(2, (ν/σ)²).
    fn squared_scaled(&self) -> StatsResult<NonCentralChiSquared> {
        let ratio = self.nu / self.sigma;
        NonCentralChiSquared::new(2.0, ratio * ratio)
    }
}

impl Default for Rice {
    fn default() -> Self {
        Self { sigma: 1.0, nu: 0.0 }
    }
}

impl Distribution for Rice {
    fn support(&self) -> Support {
        Support::from_lower(0.0)
    }

    fn pdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        let s2 = self.sigma * self.sigma;
        let d = x - self.nu;
        x / s2 * (-0.5 * d * d / s2).exp() * special::bessel_i0e(x * self.nu / s2)
    }

    fn log_pdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return f64::NEG_INFINITY;
        }
        let s2 = self.sigma * self.sigma;
        let d = x - self.nu;
        x.ln() - s2.ln() - 0.5 * d * d / s2 + special::bessel_i0e(x * self.nu / s2).ln()
    }

    fn ddf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        let s2 = self.sigma * self.sigma;
        let d = x - self.nu;
        let z = x * self.nu / s2;
        let envelope = (-0.5 * d * d / s2).exp() / s2;
        envelope * (special::bessel_i0e(z) * (1.0 - x * x / s2) + z * special::bessel_i1e(z))
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        let scaled = x / self.sigma;
        match self.squared_scaled() {
            Ok(chi2) => chi2.cdf(scaled * scaled),
            Err(_) => f64::NAN,
        }
    }

    fn sf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 1.0;
        }
        let scaled = x / self.sigma;
        match self.squared_scaled() {
            Ok(chi2) => chi2.sf(scaled * scaled),
            Err(_) => f64::NAN,
        }
    }

    fn mean(&self) -> f64 {
        let a = self.nu * self.nu / (2.0 * self.sigma * self.sigma);
        let laguerre = (1.0 + a) * special::bessel_i0e(0.5 * a) + a * special::bessel_i1e(0.5 * a);
        self.sigma * (0.5 * PI).sqrt() * laguerre
    }

    fn var(&self) -> f64 {
        let m = self.mean();
        2.0 * self.sigma * self.sigma + self.nu * self.nu - m * m
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let z1: f64 = rng.sample(StandardNormal);
        let z2: f64 = rng.sample(StandardNormal);
        (self.sigma * z1 + self.nu).hypot(self.sigma * z2)
    }
}

impl Parametric for Rice {
    const FAMILY: Family = Family::Rice;

    fn parameters(&self) -> Vec<f64> {
        vec![self.sigma, self.nu]
    }

    fn parameter_names(&self) -> Vec<String> {
        names(&["sigma", "nu"])
    }

    fn from_parameters(parameters: &[f64]) -> StatsResult<Self> {
        expect_parameter_count(Self::FAMILY, parameters, 2)?;
        Self::new(parameters[0], parameters[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::continuous::Rayleigh;
    use crate::stats::numerical;

    #[test]
    fn test_rice_creation() {
        assert!(Rice::new(1.0, 0.0).is_ok());
        assert!(Rice::new(0.0, 1.0).is_err());
        assert!(Rice::new(1.0, -0.5).is_err());
    }

    #[test]
    fn test_rice_reduces_to_rayleigh() {
        let rice = Rice::new(1.5, 0.0).unwrap();
        let rayleigh = Rayleigh::new(1.5, 0.0).unwrap();
        for x in [0.1, 0.7, 1.5, 3.0, 6.0] {
            assert!((rice.pdf(x) - rayleigh.pdf(x)).abs() < 1e-12);
            assert!((rice.cdf(x) - rayleigh.cdf(x)).abs() < 1e-10);
        }
        assert!((rice.mean() - rayleigh.mean()).abs() < 1e-12);
        assert!((rice.var() - rayleigh.var()).abs() < 1e-12);
    }

    #[test]
    fn test_rice_moments_match_quadrature() {
        let rice = Rice::new(0.8, 2.5).unwrap();
        let cfg = Default::default();
        assert!((rice.mean() - numerical::mean(&rice, &cfg)).abs() < 1e-9);
        assert!((rice.var() - numerical::central_moment(&rice, 2, &cfg)).abs() < 1e-8);
    }

    #[test]
    fn test_rice_cdf_and_derivative() {
        let rice = Rice::new(1.0, 2.0).unwrap();
        for x in [0.5, 1.8, 3.2] {
            assert!((rice.cdf(x) + rice.sf(x) - 1.0).abs() < 1e-10);
            let fd = numerical::ddf(&rice, x, &Default::default());
            assert!((rice.ddf(x) - fd).abs() < 1e-7);
            assert!((rice.log_pdf(x) - rice.pdf(x).ln()).abs() < 1e-12);
        }
        let p = rice.cdf(2.0);
        assert!((rice.ppf(p).unwrap() - 2.0).abs() < 1e-8);
    }
}
