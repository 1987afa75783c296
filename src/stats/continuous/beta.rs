//! Beta distribution.

use super::special;
use crate::stats::distribution::{Distribution, Support};
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::parametric::{expect_parameter_count, names, require_finite, require_positive, Family, Parametric};
use rand::Rng;

/// Beta distribution on [a, b].
///
/// The beta distribution with shape parameters α, β on [a, b] has PDF:
///
/// f(x) = (x-a)^(α-1) (b-x)^(β-1) / (B(α, β) (b-a)^(α+β-1))  for a < x < b
///
/// where B(α, β) is the beta function.
///
/// # Examples
///
/// ```
/// use estimr::stats::{Beta, Distribution};
///
/// // Uniform distribution as Beta(1, 1) on [0, 1]
/// let b = Beta::new(1.0, 1.0, 0.0, 1.0).unwrap();
/// assert!((b.pdf(0.5) - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beta {
    /// Shape parameter α
    alpha: f64,
    /// Shape parameter β
    beta: f64,
    /// Lower bound
    a: f64,
    /// Upper bound
    b: f64,
    /// Log of normalizing constant: -ln(B(α, β)) - (α+β-1) ln(b-a)
    log_norm: f64,
}

impl Beta {
    /// Create a new beta distribution.
    ///
    /// # Errors
    ///
    /// Returns an error if a shape is not positive or a >= b.
    pub fn new(alpha: f64, beta: f64, a: f64, b: f64) -> StatsResult<Self> {
        require_positive("alpha", alpha)?;
        require_positive("beta", beta)?;
        require_finite("a", a)?;
        require_finite("b", b)?;
        if a >= b {
            return Err(StatsError::InvalidParameter {
                name: "a".to_string(),
                value: a,
                reason: format!("lower bound must be less than b = {}", b),
            });
        }

        let log_norm = -special::lbeta(alpha, beta) - (alpha + beta - 1.0) * (b - a).ln();
        Ok(Self {
            alpha,
            beta,
            a,
            b,
            log_norm,
        })
    }

    /// Get the first shape parameter α.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Get the second shape parameter β.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Lower bound.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Upper bound.
    pub fn b(&self) -> f64 {
        self.b
    }

    fn unit(&self, x: f64) -> f64 {
        (x - self.a) / (self.b - self.a)
    }
}

impl Default for Beta {
    fn default() -> Self {
        Self {
            alpha: 2.0,
            beta: 2.0,
            a: -1.0,
            b: 1.0,
            log_norm: -special::lbeta(2.0, 2.0) - 3.0 * 2.0f64.ln(),
        }
    }
}

impl Distribution for Beta {
    fn support(&self) -> Support {
        Support::new(self.a, self.b)
    }

    fn pdf(&self, x: f64) -> f64 {
        if x <= self.a || x >= self.b {
            // Finite boundary values only when the exponent vanishes
            if x == self.a && self.alpha == 1.0 {
                return (self.log_norm + (self.beta - 1.0) * (self.b - self.a).ln()).exp();
            }
            if x == self.b && self.beta == 1.0 {
                return (self.log_norm + (self.alpha - 1.0) * (self.b - self.a).ln()).exp();
            }
            return 0.0;
        }
        self.log_pdf(x).exp()
    }

    fn log_pdf(&self, x: f64) -> f64 {
        if x <= self.a || x >= self.b {
            return f64::NEG_INFINITY;
        }
        self.log_norm + (self.alpha - 1.0) * (x - self.a).ln() + (self.beta - 1.0) * (self.b - x).ln()
    }

    fn ddf(&self, x: f64) -> f64 {
        if x <= self.a || x >= self.b {
            return 0.0;
        }
        self.pdf(x) * ((self.alpha - 1.0) / (x - self.a) - (self.beta - 1.0) / (self.b - x))
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= self.a {
            0.0
        } else if x >= self.b {
            1.0
        } else {
            special::betainc(self.alpha, self.beta, self.unit(x))
        }
    }

    fn sf(&self, x: f64) -> f64 {
        if x <= self.a {
            1.0
        } else if x >= self.b {
            0.0
        } else {
            // SF(x; α, β) = I_{1-u}(β, α)
            special::betainc(self.beta, self.alpha, 1.0 - self.unit(x))
        }
    }

    fn mean(&self) -> f64 {
        self.a + (self.b - self.a) * self.alpha / (self.alpha + self.beta)
    }

    fn var(&self) -> f64 {
        let sum = self.alpha + self.beta;
        let w = self.b - self.a;
        w * w * self.alpha * self.beta / (sum * sum * (sum + 1.0))
    }

    fn skewness(&self) -> f64 {
        let sum = self.alpha + self.beta;
        2.0 * (self.beta - self.alpha) * (sum + 1.0).sqrt() / ((sum + 2.0) * (self.alpha * self.beta).sqrt())
    }

    fn kurtosis(&self) -> f64 {
        let sum = self.alpha + self.beta;
        let num = 6.0
            * ((self.alpha - self.beta).powi(2) * (sum + 1.0)
                - self.alpha * self.beta * (sum + 2.0));
        let denom = self.alpha * self.beta * (sum + 2.0) * (sum + 3.0);
        num / denom
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match rand_distr::Beta::new(self.alpha, self.beta) {
            Ok(unit) => self.a + (self.b - self.a) * rng.sample(unit),
            Err(_) => f64::NAN,
        }
    }
}

impl Parametric for Beta {
    const FAMILY: Family = Family::Beta;

    fn parameters(&self) -> Vec<f64> {
        vec![self.alpha, self.beta, self.a, self.b]
    }

    fn parameter_names(&self) -> Vec<String> {
        names(&["alpha", "beta", "a", "b"])
    }

    fn from_parameters(parameters: &[f64]) -> StatsResult<Self> {
        expect_parameter_count(Self::FAMILY, parameters, 4)?;
        Self::new(parameters[0], parameters[1], parameters[2], parameters[3])
    }
}
