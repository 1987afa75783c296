//! Non-central chi-squared distribution.

use super::special;
use super::ChiSquared;
use crate::stats::distribution::{Distribution, Support};
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::parametric::{expect_parameter_count, names, require_positive, Family, Parametric};
use num_complex::Complex64;
use rand::Rng;

/// Weight below which the Poisson series is truncated.
const MIXTURE_EPSILON: f64 = 1e-17;

/// Hard cap on the number of series terms on either side of the mode.
const MIXTURE_MAX_TERMS: u64 = 100_000;

/// Σ_j Poisson(j; mean) term(j), summed outward from the Poisson mode.
pub(crate) fn poisson_mixture<F>(mean: f64, term: F) -> f64
where
    F: Fn(u64) -> f64,
{
    if mean == 0.0 {
        return term(0);
    }
    let ln_mean = mean.ln();
    let weight = |j: u64| (-mean + j as f64 * ln_mean - special::lgamma(j as f64 + 1.0)).exp();
    let center = mean.floor() as u64;

    let mut sum = 0.0;
    let mut j = center;
    loop {
        let w = weight(j);
        sum += w * term(j);
        if w < MIXTURE_EPSILON || j - center >= MIXTURE_MAX_TERMS {
            break;
        }
        j += 1;
    }
    let mut j = center;
    while j > 0 && center - j < MIXTURE_MAX_TERMS {
        j -= 1;
        let w = weight(j);
        sum += w * term(j);
        if w < MIXTURE_EPSILON {
            break;
        }
    }
    sum
}

/// Non-central chi-squared distribution with ν degrees of freedom and
/// non-centrality λ.
///
/// The density and CDF are Poisson(λ/2) mixtures of central chi-squared
/// densities and CDFs with ν + 2j degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonCentralChiSquared {
    nu: f64,
    lambda: f64,
}

impl NonCentralChiSquared {
    /// Create a non-central chi-squared distribution.
    ///
    /// # Errors
    ///
    /// Returns an error if ν is not positive or λ is negative.
    pub fn new(nu: f64, lambda: f64) -> StatsResult<Self> {
        require_positive("nu", nu)?;
        if !(lambda >= 0.0 && lambda.is_finite()) {
            return Err(StatsError::invalid_parameter("lambda", lambda, "must be non-negative and finite"));
        }
        Ok(Self { nu, lambda })
    }

    /// Degrees of freedom ν.
    pub fn nu(&self) -> f64 {
        self.nu
    }

    /// Non-centrality λ.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    fn central(&self, j: u64) -> Option<ChiSquared> {
        ChiSquared::new(self.nu + 2.0 * j as f64).ok()
    }
}

impl Default for NonCentralChiSquared {
    fn default() -> Self {
        Self { nu: 5.0, lambda: 0.0 }
    }
}

impl Distribution for NonCentralChiSquared {
    fn support(&self) -> Support {
        Support::from_lower(0.0)
    }

    fn pdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        poisson_mixture(0.5 * self.lambda, |j| self.central(j).map_or(0.0, |c| c.pdf(x)))
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        let half_x = 0.5 * x;
        let nu = self.nu;
        poisson_mixture(0.5 * self.lambda, |j| special::gammainc(0.5 * nu + j as f64, half_x)).clamp(0.0, 1.0)
    }

    fn sf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 1.0;
        }
        let half_x = 0.5 * x;
        let nu = self.nu;
        poisson_mixture(0.5 * self.lambda, |j| special::gammaincc(0.5 * nu + j as f64, half_x)).clamp(0.0, 1.0)
    }

    fn characteristic_function(&self, t: f64) -> Complex64 {
        // exp(iλt / (1 - 2it)) (1 - 2it)^(-ν/2)
        let base = Complex64::new(1.0, -2.0 * t);
        let exponent = Complex64::new(0.0, self.lambda * t) / base - base.ln() * (0.5 * self.nu);
        exponent.exp()
    }

    fn mean(&self) -> f64 {
        self.nu + self.lambda
    }

    fn var(&self) -> f64 {
        2.0 * (self.nu + 2.0 * self.lambda)
    }

    fn skewness(&self) -> f64 {
        2.0f64.powf(1.5) * (self.nu + 3.0 * self.lambda) / (self.nu + 2.0 * self.lambda).powf(1.5)
    }

    fn kurtosis(&self) -> f64 {
        let d = self.nu + 2.0 * self.lambda;
        12.0 * (self.nu + 4.0 * self.lambda) / (d * d)
    }

    /// Poisson(λ/2) mixture of central chi-squared draws.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let j = if self.lambda > 0.0 {
            match rand_distr::Poisson::new(0.5 * self.lambda) {
                Ok(poisson) => rng.sample(poisson),
                Err(_) => return f64::NAN,
            }
        } else {
            0.0
        };
        match rand_distr::ChiSquared::new(self.nu + 2.0 * j) {
            Ok(chi2) => rng.sample(chi2),
            Err(_) => f64::NAN,
        }
    }
}

impl Parametric for NonCentralChiSquared {
    const FAMILY: Family = Family::NonCentralChiSquared;

    fn parameters(&self) -> Vec<f64> {
        vec![self.nu, self.lambda]
    }

    fn parameter_names(&self) -> Vec<String> {
        names(&["nu", "lambda"])
    }

    fn from_parameters(parameters: &[f64]) -> StatsResult<Self> {
        expect_parameter_count(Self::FAMILY, parameters, 2)?;
        Self::new(parameters[0], parameters[1])
    }
}
