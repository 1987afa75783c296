//! Gumbel copula.

use super::{boundary_cdf, interior, invert_conditional, sample_conditional, COPULA_DIMENSION};
use crate::stats::distribution::{copula_covariance, copula_mean, Copula, MultivariateDistribution};
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::parametric::{expect_parameter_count, names, Family, Parametric};
use rand::Rng;

/// Gumbel (Gumbel-Hougaard) copula with parameter θ >= 1.
///
/// C(u, v) = exp(-((-ln u)^θ + (-ln v)^θ)^(1/θ))
///
/// θ = 1 is the independence copula. Kendall's tau is 1 - 1/θ. The
/// conditional distribution has no closed-form inverse, so sampling
/// inverts it by bisection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GumbelCopula {
    theta: f64,
}

impl GumbelCopula {
    /// Create a new Gumbel copula.
    ///
    /// # Errors
    ///
    /// Returns an error if θ < 1 or θ is not finite.
    pub fn new(theta: f64) -> StatsResult<Self> {
        if !(theta >= 1.0 && theta.is_finite()) {
            return Err(StatsError::invalid_parameter("theta", theta, "must be finite and >= 1"));
        }
        Ok(Self { theta })
    }

    /// Get θ.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// A = ((-ln u)^θ + (-ln v)^θ)^(1/θ)
    fn norm(&self, x: f64, y: f64) -> f64 {
        (x.powf(self.theta) + y.powf(self.theta)).powf(1.0 / self.theta)
    }
}

impl Default for GumbelCopula {
    fn default() -> Self {
        Self { theta: 2.0 }
    }
}

impl MultivariateDistribution for GumbelCopula {
    fn dimension(&self) -> usize {
        COPULA_DIMENSION
    }

    fn pdf(&self, x: &[f64]) -> f64 {
        let Some((u, v)) = interior(x) else {
            return 0.0;
        };
        let theta = self.theta;
        let (lx, ly) = (-u.ln(), -v.ln());
        let a = self.norm(lx, ly);
        let log_density = -a + lx + ly + (theta - 1.0) * (lx.ln() + ly.ln()) + (1.0 - 2.0 * theta) * a.ln()
            + (a + theta - 1.0).ln();
        log_density.exp()
    }

    fn cdf(&self, x: &[f64]) -> f64 {
        if let Some(c) = boundary_cdf(x) {
            return c;
        }
        (-self.norm(-x[0].ln(), -x[1].ln())).exp()
    }

    fn mean(&self) -> Vec<f64> {
        copula_mean()
    }

    fn covariance(&self) -> Vec<Vec<f64>> {
        copula_covariance(self.spearman_rho())
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        sample_conditional(self, rng)
    }
}

impl Copula for GumbelCopula {
    fn kendall_tau(&self) -> f64 {
        1.0 - 1.0 / self.theta
    }

    fn conditional_cdf(&self, u: f64, v: f64) -> f64 {
        if v <= 0.0 {
            return 0.0;
        }
        if v >= 1.0 {
            return 1.0;
        }
        let theta = self.theta;
        let (lx, ly) = (-u.ln(), -v.ln());
        let a = self.norm(lx, ly);
        // ∂C/∂u = C A^(1-θ) (-ln u)^(θ-1) / u
        (-a + (1.0 - theta) * a.ln() + (theta - 1.0) * lx.ln() + lx).exp().min(1.0)
    }

    fn conditional_ppf(&self, u: f64, q: f64) -> f64 {
        invert_conditional(|v| self.conditional_cdf(u, v), q)
    }
}

impl Parametric for GumbelCopula {
    const FAMILY: Family = Family::GumbelCopula;

    fn parameters(&self) -> Vec<f64> {
        vec![self.theta]
    }

    fn parameter_names(&self) -> Vec<String> {
        names(&["theta"])
    }

    fn from_parameters(parameters: &[f64]) -> StatsResult<Self> {
        expect_parameter_count(Self::FAMILY, parameters, 1)?;
        Self::new(parameters[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::copula::testing::{check_copula, check_density};

    #[test]
    fn test_gumbel_creation() {
        assert!(GumbelCopula::new(1.0).is_ok());
        assert!(GumbelCopula::new(0.9).is_err());
        assert!(GumbelCopula::new(f64::NAN).is_err());
    }

    #[test]
    fn test_gumbel_closed_forms() {
        let c = GumbelCopula::new(2.0).unwrap();
        assert!((c.kendall_tau() - 0.5).abs() < 1e-15);
        // C(u, u) = u^(2^(1/θ))
        let u: f64 = 0.4;
        assert!((c.cdf(&[u, u]) - u.powf(2f64.sqrt())).abs() < 1e-14);

        let independent = GumbelCopula::new(1.0).unwrap();
        assert!((independent.cdf(&[0.3, 0.6]) - 0.18).abs() < 1e-14);
        assert!((independent.pdf(&[0.3, 0.6]) - 1.0).abs() < 1e-12);
        assert!((independent.conditional_cdf(0.3, 0.6) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_gumbel_copula_properties() {
        check_copula(&GumbelCopula::new(2.0).unwrap());
        check_copula(&GumbelCopula::new(1.3).unwrap());
        check_density(&GumbelCopula::new(2.0).unwrap());
    }
}
