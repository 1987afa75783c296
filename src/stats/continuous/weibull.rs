//! Weibull distribution.

use super::special;
use crate::stats::distribution::{check_probability, Distribution, Support};
use crate::stats::error::StatsResult;
use crate::stats::parametric::{expect_parameter_count, names, require_finite, require_positive, Family, Parametric};

/// Weibull distribution with scale α, shape β and location γ.
///
/// f(x) = (β/α) ((x-γ)/α)^(β-1) exp(-((x-γ)/α)^β)  for x ≥ γ
///
/// Special cases:
/// - β = 1: Exponential distribution
/// - β = 2: Rayleigh distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weibull {
    /// Scale parameter (α)
    scale: f64,
    /// Shape parameter (β)
    shape: f64,
    /// Location (γ)
    gamma: f64,
}

impl Weibull {
    /// Create a new Weibull distribution.
    ///
    /// # Errors
    ///
    /// Returns an error if scale or shape is not positive, or γ is not finite.
    pub fn new(scale: f64, shape: f64, gamma: f64) -> StatsResult<Self> {
        require_positive("scale", scale)?;
        require_positive("shape", shape)?;
        require_finite("gamma", gamma)?;
        Ok(Self { scale, shape, gamma })
    }

    /// Get the shape parameter β.
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Get the scale parameter α.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Get the location γ.
    pub fn location(&self) -> f64 {
        self.gamma
    }

    /// E[((X-γ)/α)^n] = Γ(1 + n/β)
    fn unit_moment(&self, n: f64) -> f64 {
        special::gamma(1.0 + n / self.shape)
    }
}

impl Default for Weibull {
    fn default() -> Self {
        Self {
            scale: 1.0,
            shape: 1.0,
            gamma: 0.0,
        }
    }
}

impl Distribution for Weibull {
    fn support(&self) -> Support {
        Support::from_lower(self.gamma)
    }

    fn pdf(&self, x: f64) -> f64 {
        if x < self.gamma {
            return 0.0;
        }
        if x == self.gamma {
            // Unbounded for shape < 1; reported as 0 like every other boundary
            return if self.shape == 1.0 { 1.0 / self.scale } else { 0.0 };
        }
        self.log_pdf(x).exp()
    }

    fn log_pdf(&self, x: f64) -> f64 {
        if x <= self.gamma {
            return self.pdf(x).ln();
        }
        let z = (x - self.gamma) / self.scale;
        (self.shape / self.scale).ln() + (self.shape - 1.0) * z.ln() - z.powf(self.shape)
    }

    fn ddf(&self, x: f64) -> f64 {
        if x <= self.gamma {
            return 0.0;
        }
        let z = (x - self.gamma) / self.scale;
        let k = self.shape;
        self.pdf(x) * ((k - 1.0) / z - k * z.powf(k - 1.0)) / self.scale
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= self.gamma {
            return 0.0;
        }
        let z = (x - self.gamma) / self.scale;
        -(-z.powf(self.shape)).exp_m1()
    }

    fn sf(&self, x: f64) -> f64 {
        if x <= self.gamma {
            return 1.0;
        }
        let z = (x - self.gamma) / self.scale;
        (-z.powf(self.shape)).exp()
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        // x = γ + α (-ln(1-p))^(1/β)
        Ok(self.gamma + self.scale * (-(-p).ln_1p()).powf(1.0 / self.shape))
    }

    fn isf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        Ok(self.gamma + self.scale * (-p.ln()).powf(1.0 / self.shape))
    }

    fn mean(&self) -> f64 {
        self.gamma + self.scale * self.unit_moment(1.0)
    }

    fn var(&self) -> f64 {
        let g1 = self.unit_moment(1.0);
        let g2 = self.unit_moment(2.0);
        self.scale * self.scale * (g2 - g1 * g1)
    }

    fn skewness(&self) -> f64 {
        let g1 = self.unit_moment(1.0);
        let g2 = self.unit_moment(2.0);
        let g3 = self.unit_moment(3.0);
        let v = g2 - g1 * g1;
        (g3 - 3.0 * g1 * g2 + 2.0 * g1.powi(3)) / v.powf(1.5)
    }

    fn kurtosis(&self) -> f64 {
        let g1 = self.unit_moment(1.0);
        let g2 = self.unit_moment(2.0);
        let g3 = self.unit_moment(3.0);
        let g4 = self.unit_moment(4.0);
        let v = g2 - g1 * g1;
        (g4 - 4.0 * g1 * g3 + 6.0 * g1 * g1 * g2 - 3.0 * g1.powi(4)) / (v * v) - 3.0
    }
}

impl Parametric for Weibull {
    const FAMILY: Family = Family::Weibull;

    fn parameters(&self) -> Vec<f64> {
        vec![self.scale, self.shape, self.gamma]
    }

    fn parameter_names(&self) -> Vec<String> {
        names(&["alpha", "beta", "gamma"])
    }

    fn from_parameters(parameters: &[f64]) -> StatsResult<Self> {
        expect_parameter_count(Self::FAMILY, parameters, 3)?;
        Self::new(parameters[0], parameters[1], parameters[2])
    }
}
