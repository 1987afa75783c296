//! Chi distribution.

use super::special;
use crate::stats::distribution::{Distribution, Support};
use crate::stats::error::StatsResult;
use crate::stats::parametric::{expect_parameter_count, names, require_positive, Family, Parametric};
use rand::Rng;
use std::f64::consts::LN_2;

/// Chi distribution with ν degrees of freedom: the norm of ν independent
/// standard normal variables.
///
/// f(x) = x^(ν-1) exp(-x²/2) / (2^(ν/2-1) Γ(ν/2))  for x ≥ 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chi {
    nu: f64,
    log_norm: f64,
}

impl Chi {
    /// Create a chi distribution.
    ///
    /// # Errors
    ///
    /// Returns an error if ν is not positive.
    pub fn new(nu: f64) -> StatsResult<Self> {
        require_positive("nu", nu)?;
        let log_norm = (1.0 - 0.5 * nu) * LN_2 - special::lgamma(0.5 * nu);
        Ok(Self { nu, log_norm })
    }

    /// Degrees of freedom.
    pub fn nu(&self) -> f64 {
        self.nu
    }
}

impl Default for Chi {
    fn default() -> Self {
        Self {
            nu: 1.0,
            log_norm: 0.5 * LN_2 - special::lgamma(0.5),
        }
    }
}

impl Distribution for Chi {
    fn support(&self) -> Support {
        Support::from_lower(0.0)
    }

    fn pdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            if x == 0.0 && self.nu == 1.0 {
                return self.log_norm.exp();
            }
            return 0.0;
        }
        self.log_pdf(x).exp()
    }

    fn log_pdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return self.pdf(x).ln();
        }
        self.log_norm + (self.nu - 1.0) * x.ln() - 0.5 * x * x
    }

    fn ddf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        self.pdf(x) * ((self.nu - 1.0) / x - x)
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            0.0
        } else {
            special::gammainc(0.5 * self.nu, 0.5 * x * x)
        }
    }

    fn sf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            1.0
        } else {
            special::gammaincc(0.5 * self.nu, 0.5 * x * x)
        }
    }

    fn mean(&self) -> f64 {
        std::f64::consts::SQRT_2 * (special::lgamma(0.5 * (self.nu + 1.0)) - special::lgamma(0.5 * self.nu)).exp()
    }

    fn var(&self) -> f64 {
        let mu = self.mean();
        self.nu - mu * mu
    }

    fn skewness(&self) -> f64 {
        let mu = self.mean();
        let v = self.var();
        mu * (1.0 - 2.0 * v) / v.powf(1.5)
    }

    fn kurtosis(&self) -> f64 {
        let mu = self.mean();
        let v = self.var();
        let sigma = v.sqrt();
        2.0 * (1.0 - mu * sigma * self.skewness() - v) / v
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match rand_distr::ChiSquared::new(self.nu) {
            Ok(chi2) => rng.sample(chi2).sqrt(),
            Err(_) => f64::NAN,
        }
    }
}

impl Parametric for Chi {
    const FAMILY: Family = Family::Chi;

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
    fn test_chi_half_normal() {
        // χ(1) is the half-normal distribution
        let c = Chi::new(1.0).unwrap();
        assert!((c.pdf(0.0) - (2.0 / std::f64::consts::PI).sqrt()).abs() < 1e-14);
        assert!((c.mean() - (2.0 / std::f64::consts::PI).sqrt()).abs() < 1e-14);
        assert!((c.cdf(1.0) - 0.6826894921370859).abs() < 1e-12);
    }

    #[test]
    fn test_chi_moments_match_quadrature() {
        let c = Chi::new(3.5).unwrap();
        let cfg = Default::default();
        assert!((c.mean() - crate::stats::numerical::mean(&c, &cfg)).abs() < 1e-10);
        assert!((c.var() - crate::stats::numerical::central_moment(&c, 2, &cfg)).abs() < 1e-10);
        assert!((c.skewness() - crate::stats::numerical::skewness(&c, &cfg)).abs() < 1e-8);
        assert!((c.kurtosis() - crate::stats::numerical::kurtosis(&c, &cfg)).abs() < 1e-7);
        let fd = crate::stats::numerical::ddf(&c, 1.2, &cfg);
        assert!((c.ddf(1.2) - fd).abs() < 1e-9);
    }
}
