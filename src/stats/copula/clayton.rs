//! Clayton copula.

use super::{boundary_cdf, interior, sample_conditional, COPULA_DIMENSION};
use crate::stats::distribution::{copula_covariance, copula_mean, Copula, MultivariateDistribution};
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::parametric::{expect_parameter_count, names, Family, Parametric};
use rand::Rng;

/// Clayton copula with parameter θ >= -1.
///
/// C(u, v) = max(u^(-θ) + v^(-θ) - 1, 0)^(-1/θ)
///
/// θ = 0 is the independence copula and θ = -1 the countermonotonic bound.
/// Kendall's tau is θ / (θ + 2).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClaytonCopula {
    theta: f64,
}

impl ClaytonCopula {
    /// Create a new Clayton copula.
    ///
    /// # Errors
    ///
    /// Returns an error if θ < -1 or θ is not finite.
    pub fn new(theta: f64) -> StatsResult<Self> {
        if !(theta >= -1.0 && theta.is_finite()) {
            return Err(StatsError::invalid_parameter("theta", theta, "must be finite and >= -1"));
        }
        Ok(Self { theta })
    }

    /// Get θ.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// u^(-θ) + v^(-θ) - 1
    fn generator_sum(&self, u: f64, v: f64) -> f64 {
        (-self.theta * u.ln()).exp() + (-self.theta * v.ln()).exp() - 1.0
    }
}

impl Default for ClaytonCopula {
    fn default() -> Self {
        Self { theta: 2.0 }
    }
}

impl MultivariateDistribution for ClaytonCopula {
    fn dimension(&self) -> usize {
        COPULA_DIMENSION
    }

    fn pdf(&self, x: &[f64]) -> f64 {
        let Some((u, v)) = interior(x) else {
            return 0.0;
        };
        let theta = self.theta;
        if theta == 0.0 {
            return 1.0;
        }
        let s = self.generator_sum(u, v);
        if s <= 0.0 || theta == -1.0 {
            return 0.0;
        }
        ((1.0 + theta).ln() - (theta + 1.0) * (u.ln() + v.ln()) - (2.0 + 1.0 / theta) * s.ln()).exp()
    }

    fn cdf(&self, x: &[f64]) -> f64 {
        if let Some(c) = boundary_cdf(x) {
            return c;
        }
        let (u, v) = (x[0], x[1]);
        if self.theta == 0.0 {
            return u * v;
        }
        let s = self.generator_sum(u, v);
        if s <= 0.0 {
            0.0
        } else {
            (-s.ln() / self.theta).exp()
        }
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

impl Copula for ClaytonCopula {
    fn kendall_tau(&self) -> f64 {
        self.theta / (self.theta + 2.0)
    }

    fn conditional_cdf(&self, u: f64, v: f64) -> f64 {
        if v <= 0.0 {
            return 0.0;
        }
        if v >= 1.0 {
            return 1.0;
        }
        let theta = self.theta;
        if theta == 0.0 {
            return v;
        }
        let s = self.generator_sum(u, v);
        if s <= 0.0 {
            return 0.0;
        }
        // ∂C/∂u = u^(-θ-1) s^(-1-1/θ)
        (-(theta + 1.0) * u.ln() - (1.0 + 1.0 / theta) * s.ln()).exp().min(1.0)
    }

    fn conditional_ppf(&self, u: f64, q: f64) -> f64 {
        let theta = self.theta;
        if theta == 0.0 {
            return q;
        }
        if theta == -1.0 {
            return 1.0 - u;
        }
        let s = ((q.ln() + (theta + 1.0) * u.ln()) * (-theta / (1.0 + theta))).exp();
        let base = s + 1.0 - (-theta * u.ln()).exp();
        (-base.ln() / theta).exp().clamp(0.0, 1.0)
    }
}

impl Parametric for ClaytonCopula {
    const FAMILY: Family = Family::ClaytonCopula;

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
    fn test_clayton_creation() {
        assert!(ClaytonCopula::new(2.0).is_ok());
        assert!(ClaytonCopula::new(-1.0).is_ok());
        assert!(ClaytonCopula::new(-1.5).is_err());
        assert!(ClaytonCopula::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_clayton_closed_forms() {
        let c = ClaytonCopula::new(2.0).unwrap();
        assert!((c.kendall_tau() - 0.5).abs() < 1e-15);
        // C(0.5, 0.5) = (4 + 4 - 1)^(-1/2)
        assert!((c.cdf(&[0.5, 0.5]) - 7.0f64.powf(-0.5)).abs() < 1e-14);
        assert_eq!(c.cdf(&[0.0, 0.5]), 0.0);
        assert_eq!(c.pdf(&[1.5, 0.5]), 0.0);

        let independent = ClaytonCopula::new(0.0).unwrap();
        assert!((independent.cdf(&[0.3, 0.6]) - 0.18).abs() < 1e-15);
        assert!(independent.spearman_rho().abs() < 1e-10);
    }

    #[test]
    fn test_clayton_copula_properties() {
        check_copula(&ClaytonCopula::new(2.0).unwrap());
        check_copula(&ClaytonCopula::new(-0.5).unwrap());
        check_density(&ClaytonCopula::new(2.0).unwrap());
    }

    #[test]
    fn test_clayton_countermonotonic() {
        let c = ClaytonCopula::new(-1.0).unwrap();
        // W(u, v) = max(u + v - 1, 0)
        assert!((c.cdf(&[0.7, 0.6]) - 0.3).abs() < 1e-14);
        assert_eq!(c.cdf(&[0.3, 0.4]), 0.0);
        assert!((c.conditional_ppf(0.25, 0.5) - 0.75).abs() < 1e-15);
    }
}
