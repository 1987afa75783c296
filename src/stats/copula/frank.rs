//! Frank copula.

use super::{boundary_cdf, interior, sample_conditional, COPULA_DIMENSION};
use crate::stats::continuous::special;
use crate::stats::distribution::{copula_covariance, copula_mean, Copula, MultivariateDistribution};
use crate::stats::error::StatsResult;
use crate::stats::parametric::{expect_parameter_count, names, require_finite, Family, Parametric};
use rand::Rng;

/// Below this |θ| Kendall's tau comes from its Taylor expansion.
const TAU_SERIES_THRESHOLD: f64 = 1e-2;

/// Frank copula with real parameter θ.
///
/// C(u, v) = -1/θ ln(1 + (e^(-θu) - 1)(e^(-θv) - 1) / (e^(-θ) - 1))
///
/// θ = 0 is the independence copula; negative θ gives negative dependence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrankCopula {
    theta: f64,
}

impl FrankCopula {
    /// Create a new Frank copula.
    ///
    /// # Errors
    ///
    /// Returns an error if θ is not finite.
    pub fn new(theta: f64) -> StatsResult<Self> {
        require_finite("theta", theta)?;
        Ok(Self { theta })
    }

    /// Get θ.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Kendall's tau of the Frank copula with parameter θ.
    ///
    /// τ(θ) = 1 - 4/θ (1 - D₁(θ)), with D₁ the first Debye function. The
    /// map is odd and increasing; near zero the expansion θ/9 - θ³/900
    /// avoids the cancellation in 1 - D₁(θ).
    pub fn kendall_tau_for(theta: f64) -> f64 {
        if theta.abs() < TAU_SERIES_THRESHOLD {
            theta / 9.0 - theta.powi(3) / 900.0
        } else {
            1.0 - 4.0 / theta * (1.0 - special::debye1(theta))
        }
    }

    /// (e^(-θu) - 1, e^(-θv) - 1, e^(-θ) - 1)
    fn expm1_terms(&self, u: f64, v: f64) -> (f64, f64, f64) {
        let t = self.theta;
        ((-t * u).exp_m1(), (-t * v).exp_m1(), (-t).exp_m1())
    }
}

impl Default for FrankCopula {
    fn default() -> Self {
        Self { theta: 0.5 }
    }
}

impl MultivariateDistribution for FrankCopula {
    fn dimension(&self) -> usize {
        COPULA_DIMENSION
    }

    fn pdf(&self, x: &[f64]) -> f64 {
        let Some((u, v)) = interior(x) else {
            return 0.0;
        };
        if self.theta == 0.0 {
            return 1.0;
        }
        let (a, b, k) = self.expm1_terms(u, v);
        let denom = k + a * b;
        -self.theta * k * (-self.theta * (u + v)).exp() / (denom * denom)
    }

    fn cdf(&self, x: &[f64]) -> f64 {
        if let Some(c) = boundary_cdf(x) {
            return c;
        }
        let (u, v) = (x[0], x[1]);
        if self.theta == 0.0 {
            return u * v;
        }
        let (a, b, k) = self.expm1_terms(u, v);
        (-(a * b / k).ln_1p() / self.theta).clamp(0.0, u.min(v))
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

impl Copula for FrankCopula {
    fn kendall_tau(&self) -> f64 {
        Self::kendall_tau_for(self.theta)
    }

    fn conditional_cdf(&self, u: f64, v: f64) -> f64 {
        if v <= 0.0 {
            return 0.0;
        }
        if v >= 1.0 {
            return 1.0;
        }
        if self.theta == 0.0 {
            return v;
        }
        let (a, b, k) = self.expm1_terms(u, v);
        ((-self.theta * u).exp() * b / (k + a * b)).clamp(0.0, 1.0)
    }

    fn conditional_ppf(&self, u: f64, q: f64) -> f64 {
        if self.theta == 0.0 {
            return q;
        }
        let k = (-self.theta).exp_m1();
        let shift = q * k / (q + (1.0 - q) * (-self.theta * u).exp());
        (-shift.ln_1p() / self.theta).clamp(0.0, 1.0)
    }
}

impl Parametric for FrankCopula {
    const FAMILY: Family = Family::FrankCopula;

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
