//! Logistic distribution.

use crate::stats::distribution::{check_probability, Distribution, Support};
use crate::stats::error::StatsResult;
use crate::stats::parametric::{expect_parameter_count, names, require_finite, require_positive, Family, Parametric};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Logistic distribution with location μ and scale β.
///
/// F(x) = 1 / (1 + exp(-(x-μ)/β))
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Logistic {
    mu: f64,
    beta: f64,
}

impl Logistic {
    /// Create a logistic distribution.
    ///
    /// # Errors
    ///
    /// Returns an error if β is not positive or μ is not finite.
    pub fn new(mu: f64, beta: f64) -> StatsResult<Self> {
        require_finite("mu", mu)?;
        require_positive("beta", beta)?;
        Ok(Self { mu, beta })
    }

    /// Location μ.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Scale β.
    pub fn beta(&self) -> f64 {
        self.beta
    }
}

impl Default for Logistic {
    fn default() -> Self {
        Self { mu: 0.0, beta: 1.0 }
    }
}

impl Distribution for Logistic {
    fn support(&self) -> Support {
        Support::real_line()
    }

    fn pdf(&self, x: f64) -> f64 {
        // Symmetric form avoids overflow of exp(-z) for large negative z
        let e = (-((x - self.mu) / self.beta).abs()).exp();
        e / (self.beta * (1.0 + e) * (1.0 + e))
    }

    fn ddf(&self, x: f64) -> f64 {
        let z = (x - self.mu) / self.beta;
        -self.pdf(x) * (0.5 * z).tanh() / self.beta
    }

    fn cdf(&self, x: f64) -> f64 {
        let z = (x - self.mu) / self.beta;
        if z >= 0.0 {
            1.0 / (1.0 + (-z).exp())
        } else {
            let e = z.exp();
            e / (1.0 + e)
        }
    }

    fn sf(&self, x: f64) -> f64 {
        let z = (x - self.mu) / self.beta;
        if z <= 0.0 {
            1.0 / (1.0 + z.exp())
        } else {
            let e = (-z).exp();
            e / (1.0 + e)
        }
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        Ok(self.mu + self.beta * (p.ln() - (-p).ln_1p()))
    }

    fn isf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        Ok(self.mu - self.beta * (p.ln() - (-p).ln_1p()))
    }

    fn characteristic_function(&self, t: f64) -> Complex64 {
        let x = PI * self.beta * t;
        let modulus = if x == 0.0 { 1.0 } else { x / x.sinh() };
        Complex64::from_polar(modulus, self.mu * t)
    }

    fn mean(&self) -> f64 {
        self.mu
    }

    fn var(&self) -> f64 {
        PI * PI * self.beta * self.beta / 3.0
    }

    fn skewness(&self) -> f64 {
        0.0
    }

    fn kurtosis(&self) -> f64 {
        1.2
    }
}

impl Parametric for Logistic {
    const FAMILY: Family = Family::Logistic;

    fn parameters(&self) -> Vec<f64> {
        vec![self.mu, self.beta]
    }

    fn parameter_names(&self) -> Vec<String> {
        names(&["mu", "beta"])
    }

    fn from_parameters(parameters: &[f64]) -> StatsResult<Self> {
        expect_parameter_count(Self::FAMILY, parameters, 2)?;
        Self::new(parameters[0], parameters[1])
    }
}
