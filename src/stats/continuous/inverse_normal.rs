//! Inverse Gaussian (Wald) distribution.

use super::special::{self, LN_SQRT_2PI};
use crate::stats::distribution::{Distribution, Support};
use crate::stats::error::StatsResult;
use crate::stats::parametric::{expect_parameter_count, names, require_positive, Family, Parametric};
use num_complex::Complex64;
use rand::Rng;
use rand_distr::StandardNormal;

/// Inverse normal distribution with shape λ and mean μ.
///
/// f(x) = √(λ / (2π x³)) exp(-λ (x - μ)² / (2 μ² x))  for x > 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseNormal {
    lambda: f64,
    mu: f64,
}

impl InverseNormal {
    /// Create an inverse normal distribution.
    ///
    /// # Errors
    ///
    /// Returns an error if λ or μ is not positive.
    pub fn new(lambda: f64, mu: f64) -> StatsResult<Self> {
        require_positive("lambda", lambda)?;
        require_positive("mu", mu)?;
        Ok(Self { lambda, mu })
    }

    /// Shape λ.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Mean μ.
    pub fn mu(&self) -> f64 {
        self.mu
    }
}

impl Default for InverseNormal {
    fn default() -> Self {
        Self { lambda: 1.0, mu: 1.0 }
    }
}

impl Distribution for InverseNormal {
    fn support(&self) -> Support {
        Support::from_lower(0.0)
    }

    fn pdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        self.log_pdf(x).exp()
    }

    fn log_pdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return f64::NEG_INFINITY;
        }
        let d = x - self.mu;
        0.5 * self.lambda.ln() - LN_SQRT_2PI - 1.5 * x.ln() - self.lambda * d * d / (2.0 * self.mu * self.mu * x)
    }

    fn ddf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        let mu2 = self.mu * self.mu;
        self.pdf(x) * (-1.5 / x - self.lambda * (x * x - mu2) / (2.0 * mu2 * x * x))
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        let s = (self.lambda / x).sqrt();
        let first = special::norm_cdf(s * (x / self.mu - 1.0));
        // exp(2λ/μ) Φ(-s (x/μ + 1)) evaluated in log space
        let log_second = 2.0 * self.lambda / self.mu + special::norm_cdf(-s * (x / self.mu + 1.0)).ln();
        (first + log_second.exp()).min(1.0)
    }

    fn sf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 1.0;
        }
        let s = (self.lambda / x).sqrt();
        let first = special::norm_sf(s * (x / self.mu - 1.0));
        let log_second = 2.0 * self.lambda / self.mu + special::norm_cdf(-s * (x / self.mu + 1.0)).ln();
        (first - log_second.exp()).max(0.0)
    }

    fn characteristic_function(&self, t: f64) -> Complex64 {
        // exp((λ/μ)(1 - √(1 - 2iμ²t/λ)))
        let inner = Complex64::new(1.0, -2.0 * self.mu * self.mu * t / self.lambda).sqrt();
        ((Complex64::new(1.0, 0.0) - inner) * (self.lambda / self.mu)).exp()
    }

    fn mean(&self) -> f64 {
        self.mu
    }

    fn var(&self) -> f64 {
        self.mu.powi(3) / self.lambda
    }

    fn skewness(&self) -> f64 {
        3.0 * (self.mu / self.lambda).sqrt()
    }

    fn kurtosis(&self) -> f64 {
        15.0 * self.mu / self.lambda
    }

    /// Michael, Schucany and Haas transformation with one normal and one
    /// uniform draw.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let (mu, lambda) = (self.mu, self.lambda);
        let nu: f64 = rng.sample(StandardNormal);
        let y = nu * nu;
        let x = mu + mu * mu * y / (2.0 * lambda)
            - mu / (2.0 * lambda) * (4.0 * mu * lambda * y + mu * mu * y * y).sqrt();
        if rng.gen::<f64>() <= mu / (mu + x) {
            x
        } else {
            mu * mu / x
        }
    }
}

impl Parametric for InverseNormal {
    const FAMILY: Family = Family::InverseNormal;

    fn parameters(&self) -> Vec<f64> {
        vec![self.lambda, self.mu]
    }

    fn parameter_names(&self) -> Vec<String> {
        names(&["lambda", "mu"])
    }

    fn from_parameters(parameters: &[f64]) -> StatsResult<Self> {
        expect_parameter_count(Self::FAMILY, parameters, 2)?;
        Self::new(parameters[0], parameters[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_inverse_normal_density() {
        let d = InverseNormal::new(2.0, 1.5).unwrap();
        let cfg = Default::default();
        let total = crate::stats::numerical::expectation(&d, |_| 1.0, &cfg);
        assert!((total - 1.0).abs() < 1e-10);
        assert!((d.var() - crate::stats::numerical::central_moment(&d, 2, &cfg)).abs() < 1e-8);
        let fd = crate::stats::numerical::ddf(&d, 0.9, &cfg);
        assert!((d.ddf(0.9) - fd).abs() < 1e-8);
    }

    #[test]
    fn test_inverse_normal_cdf_is_integral_of_pdf() {
        let d = InverseNormal::new(2.0, 1.5).unwrap();
        let q = crate::integrate::GaussLegendreQuadrature::new(64);
        for x in [0.3, 1.0, 2.5] {
            let integral = q.integrate_composite(|t| d.pdf(t), 0.0, x, 16);
            assert!((d.cdf(x) - integral).abs() < 1e-10, "x={x}");
            assert!((d.sf(x) + d.cdf(x) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_inverse_normal_sampler_mean() {
        let d = InverseNormal::new(3.0, 2.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let n = 20_000;
        let m: f64 = (0..n).map(|_| d.sample(&mut rng)).sum::<f64>() / n as f64;
        // Standard error √(μ³/λ / n) ≈ 0.012
        assert!((m - 2.0).abs() < 0.06);
    }
}
