//! Ali-Mikhail-Haq copula.

use super::{boundary_cdf, interior, sample_conditional, COPULA_DIMENSION};
use crate::stats::distribution::{copula_covariance, copula_mean, Copula, MultivariateDistribution};
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::parametric::{expect_parameter_count, names, Family, Parametric};
use rand::Rng;

/// Below this |θ| Kendall's tau is summed from its power series.
const TAU_SERIES_THRESHOLD: f64 = 0.5;

/// Ali-Mikhail-Haq copula with parameter θ in [-1, 1].
///
/// C(u, v) = uv / (1 - θ(1-u)(1-v))
///
/// The attainable Kendall's tau is limited to [(5 - 8 ln 2)/3, 1/3].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AliMikhailHaqCopula {
    theta: f64,
}

impl AliMikhailHaqCopula {
    /// Create a new Ali-Mikhail-Haq copula.
    ///
    /// # Errors
    ///
    /// Returns an error unless -1 <= θ <= 1.
    pub fn new(theta: f64) -> StatsResult<Self> {
        if !(-1.0..=1.0).contains(&theta) {
            return Err(StatsError::invalid_parameter("theta", theta, "must lie in [-1, 1]"));
        }
        Ok(Self { theta })
    }

    /// Get θ.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Kendall's tau of the copula with parameter θ.
    ///
    /// τ(θ) = 1 - 2(θ + (1-θ)² ln(1-θ)) / (3θ²), evaluated near zero through
    /// the series Σ_{k>=1} 4θᵏ / (3k(k+1)(k+2)).
    pub fn kendall_tau_for(theta: f64) -> f64 {
        if theta.abs() < TAU_SERIES_THRESHOLD {
            let mut sum = 0.0;
            let mut power = theta;
            for k in 1..200 {
                let kf = k as f64;
                let term = 4.0 * power / (3.0 * kf * (kf + 1.0) * (kf + 2.0));
                sum += term;
                if term.abs() < 1e-17 {
                    break;
                }
                power *= theta;
            }
            sum
        } else if theta == 1.0 {
            1.0 / 3.0
        } else {
            let one_minus = 1.0 - theta;
            1.0 - 2.0 * (theta + one_minus * one_minus * (-theta).ln_1p()) / (3.0 * theta * theta)
        }
    }

    /// 1 - θ(1-u)(1-v)
    fn denominator(&self, u: f64, v: f64) -> f64 {
        1.0 - self.theta * (1.0 - u) * (1.0 - v)
    }
}

impl Default for AliMikhailHaqCopula {
    fn default() -> Self {
        Self { theta: 0.5 }
    }
}

impl MultivariateDistribution for AliMikhailHaqCopula {
    fn dimension(&self) -> usize {
        COPULA_DIMENSION
    }

    fn pdf(&self, x: &[f64]) -> f64 {
        let Some((u, v)) = interior(x) else {
            return 0.0;
        };
        let t = self.theta;
        let numerator = 1.0 + t * ((1.0 + u) * (1.0 + v) - 3.0) + t * t * (1.0 - u) * (1.0 - v);
        numerator / self.denominator(u, v).powi(3)
    }

    fn cdf(&self, x: &[f64]) -> f64 {
        if let Some(c) = boundary_cdf(x) {
            return c;
        }
        let (u, v) = (x[0], x[1]);
        u * v / self.denominator(u, v)
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

impl Copula for AliMikhailHaqCopula {
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
        let d = self.denominator(u, v);
        (v * (1.0 - self.theta * (1.0 - v)) / (d * d)).clamp(0.0, 1.0)
    }

    fn conditional_ppf(&self, u: f64, q: f64) -> f64 {
        // q (1 - θa + θa v)² = v (1 - θ + θv) with a = 1 - u, a quadratic in v
        let t = self.theta;
        let a = 1.0 - u;
        let ta = t * a;
        let quad = t * (q * t * a * a - 1.0);
        let lin = 2.0 * q * ta * (1.0 - ta) - (1.0 - t);
        let constant = q * (1.0 - ta) * (1.0 - ta);
        let disc = (lin * lin - 4.0 * quad * constant).max(0.0);
        // Root continuous in θ, written to avoid cancellation as quad -> 0
        (2.0 * constant / (disc.sqrt() - lin)).clamp(0.0, 1.0)
    }
}

impl Parametric for AliMikhailHaqCopula {
    const FAMILY: Family = Family::AliMikhailHaqCopula;

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
