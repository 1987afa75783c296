//! Truncated Normal distribution.

use super::special::{self, INV_SQRT_2PI, LN_SQRT_2PI};
use crate::stats::distribution::{check_probability, Distribution, Support};
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::parametric::{expect_parameter_count, names, require_finite, require_positive, Family, Parametric};

/// Truncated Normal distribution.
///
/// The truncated normal distribution is a normal distribution bounded to the interval [a, b].
/// It has parameters μ (mean of parent normal), σ (std dev of parent normal), a (lower bound), b (upper bound).
///
/// The PDF is:
///
/// f(x) = φ((x-μ)/σ) / (σ * (Φ((b-μ)/σ) - Φ((a-μ)/σ)))  for a ≤ x ≤ b, 0 otherwise
///
/// where φ is the standard normal PDF and Φ is the standard normal CDF.
///
/// When the interval lies in the upper tail of the parent, the normalization
/// is computed from survival probabilities instead, which keeps it positive
/// for intervals many standard deviations above μ.
///
/// # Examples
///
/// ```
/// use estimr::stats::{Distribution, TruncatedNormal};
///
/// // Truncate standard normal to [-1, 1]
/// let tn = TruncatedNormal::new(0.0, 1.0, -1.0, 1.0).unwrap();
/// assert!(tn.pdf(-0.5) > 0.0);
/// assert!(tn.pdf(2.0) == 0.0);  // Outside support
/// assert!(tn.cdf(1.0) == 1.0);  // At upper bound
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruncatedNormal {
    /// Mean of parent normal distribution (μ)
    mu: f64,
    /// Standard deviation of parent normal (σ)
    sigma: f64,
    /// Lower bound (a)
    a: f64,
    /// Upper bound (b)
    b: f64,
    /// Standardized lower bound: α = (a - μ) / σ
    alpha: f64,
    /// Standardized upper bound: β = (b - μ) / σ
    beta: f64,
    /// Tail probability at α: Φ(α), or 1 - Φ(α) when `upper_tail`
    tail_alpha: f64,
    /// Tail probability at β: Φ(β), or 1 - Φ(β) when `upper_tail`
    tail_beta: f64,
    /// Normalization constant: Z = Φ(β) - Φ(α)
    z_norm: f64,
    /// Whether tails are measured from the right (α > 0)
    upper_tail: bool,
}

impl TruncatedNormal {
    /// Create a new truncated normal distribution.
    ///
    /// # Arguments
    ///
    /// * `mu` - Mean of parent normal distribution
    /// * `sigma` - Standard deviation (must be positive)
    /// * `a` - Lower truncation bound
    /// * `b` - Upper truncation bound (must be > a)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `sigma <= 0`
    /// - `a >= b`
    /// - Any parameter is not finite
    /// - The interval carries no representable mass
    pub fn new(mu: f64, sigma: f64, a: f64, b: f64) -> StatsResult<Self> {
        require_finite("mu", mu)?;
        require_positive("sigma", sigma)?;
        require_finite("a", a)?;
        require_finite("b", b)?;
        if a >= b {
            return Err(StatsError::invalid_parameter(
                "a",
                a,
                format!("lower bound must be < upper bound {}", b),
            ));
        }

        let alpha = (a - mu) / sigma;
        let beta = (b - mu) / sigma;
        let upper_tail = alpha > 0.0;
        let (tail_alpha, tail_beta, z_norm) = if upper_tail {
            let sa = special::norm_sf(alpha);
            let sb = special::norm_sf(beta);
            (sa, sb, sa - sb)
        } else {
            let ca = special::norm_cdf(alpha);
            let cb = special::norm_cdf(beta);
            (ca, cb, cb - ca)
        };

        if !(z_norm > 0.0) {
            return Err(StatsError::invalid_parameter(
                "b",
                b,
                "normalization constant must be positive (bounds may be too far in the tail)",
            ));
        }

        Ok(Self {
            mu,
            sigma,
            a,
            b,
            alpha,
            beta,
            tail_alpha,
            tail_beta,
            z_norm,
            upper_tail,
        })
    }

    /// Get the mean parameter of parent normal.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Get the standard deviation parameter of parent normal.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Get the lower bound.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Get the upper bound.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Mode: μ when it lies inside [a, b], otherwise the nearest bound.
    pub fn mode(&self) -> f64 {
        self.mu.clamp(self.a, self.b)
    }

    /// Standardize a value: z = (x - μ) / σ
    fn standardize(&self, x: f64) -> f64 {
        (x - self.mu) / self.sigma
    }

    /// Standard normal PDF value: φ(z) = (1/√(2π)) * exp(-z²/2)
    fn std_normal_pdf(&self, z: f64) -> f64 {
        INV_SQRT_2PI * (-0.5 * z * z).exp()
    }

    /// Raw moments E[Y^k], k = 0..=4, of the standardized truncated variable.
    ///
    /// E[Y^k] = (k-1) E[Y^(k-2)] + (α^(k-1) φ(α) - β^(k-1) φ(β)) / Z
    fn standardized_moments(&self) -> [f64; 5] {
        let phi_a = self.std_normal_pdf(self.alpha);
        let phi_b = self.std_normal_pdf(self.beta);
        let mut m = [1.0, 0.0, 0.0, 0.0, 0.0];
        m[1] = (phi_a - phi_b) / self.z_norm;
        for k in 2..5 {
            let boundary = self.alpha.powi(k as i32 - 1) * phi_a - self.beta.powi(k as i32 - 1) * phi_b;
            m[k] = (k - 1) as f64 * m[k - 2] + boundary / self.z_norm;
        }
        m
    }

    fn standardized_variance(&self) -> f64 {
        let m = self.standardized_moments();
        (m[2] - m[1] * m[1]).max(0.0)
    }

    /// Map a standardized quantile back to the truncated support.
    fn unstandardize(&self, z: f64) -> f64 {
        (self.mu + self.sigma * z).clamp(self.a, self.b)
    }
}

impl Default for TruncatedNormal {
    fn default() -> Self {
        let alpha: f64 = -1.0;
        let beta: f64 = 1.0;
        let tail_alpha = special::norm_cdf(alpha);
        let tail_beta = special::norm_cdf(beta);
        Self {
            mu: 0.0,
            sigma: 1.0,
            a: alpha,
            b: beta,
            alpha,
            beta,
            tail_alpha,
            tail_beta,
            z_norm: tail_beta - tail_alpha,
            upper_tail: false,
        }
    }
}

impl Distribution for TruncatedNormal {
    fn support(&self) -> Support {
        Support::new(self.a, self.b)
    }

    fn pdf(&self, x: f64) -> f64 {
        // PDF = 0 outside support
        if x < self.a || x > self.b {
            return 0.0;
        }

        let z = self.standardize(x);
        self.std_normal_pdf(z) / (self.sigma * self.z_norm)
    }

    fn log_pdf(&self, x: f64) -> f64 {
        // log(PDF) = -∞ outside support
        if x < self.a || x > self.b {
            return f64::NEG_INFINITY;
        }

        let z = self.standardize(x);
        // ln(φ(z)) - ln(σ) - ln(Z)
        -LN_SQRT_2PI - 0.5 * z * z - self.sigma.ln() - self.z_norm.ln()
    }

    fn ddf(&self, x: f64) -> f64 {
        if x < self.a || x > self.b {
            return 0.0;
        }
        -self.standardize(x) / self.sigma * self.pdf(x)
    }

    fn cdf(&self, x: f64) -> f64 {
        // CDF = 0 below lower bound
        if x <= self.a {
            return 0.0;
        }

        // CDF = 1 above upper bound
        if x >= self.b {
            return 1.0;
        }

        let z = self.standardize(x);
        let mass = if self.upper_tail {
            self.tail_alpha - special::norm_sf(z)
        } else {
            special::norm_cdf(z) - self.tail_alpha
        };
        (mass / self.z_norm).clamp(0.0, 1.0)
    }

    fn sf(&self, x: f64) -> f64 {
        // SF = 1 below lower bound
        if x <= self.a {
            return 1.0;
        }

        // SF = 0 above upper bound
        if x >= self.b {
            return 0.0;
        }

        let z = self.standardize(x);
        let mass = if self.upper_tail {
            special::norm_sf(z) - self.tail_beta
        } else {
            self.tail_beta - special::norm_cdf(z)
        };
        (mass / self.z_norm).clamp(0.0, 1.0)
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;

        // PPF(p) = μ + σ * Φ⁻¹(Φ(α) + p * Z)
        let z = if self.upper_tail {
            -special::norm_ppf(self.tail_alpha - p * self.z_norm)
        } else {
            special::norm_ppf(self.tail_alpha + p * self.z_norm)
        };
        Ok(self.unstandardize(z))
    }

    fn isf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;

        let z = if self.upper_tail {
            -special::norm_ppf(self.tail_beta + p * self.z_norm)
        } else {
            special::norm_ppf(self.tail_beta - p * self.z_norm)
        };
        Ok(self.unstandardize(z))
    }

    fn mean(&self) -> f64 {
        self.mu + self.sigma * self.standardized_moments()[1]
    }

    fn var(&self) -> f64 {
        self.sigma * self.sigma * self.standardized_variance()
    }

    fn skewness(&self) -> f64 {
        let m = self.standardized_moments();
        let var = m[2] - m[1] * m[1];
        if var <= 0.0 {
            return 0.0;
        }
        // Central third moment: μ3 = E'3 - 3·E'1·E'2 + 2·E'1³
        let mu3 = m[3] - 3.0 * m[1] * m[2] + 2.0 * m[1].powi(3);
        mu3 / var.powf(1.5)
    }

    fn kurtosis(&self) -> f64 {
        let m = self.standardized_moments();
        let var = m[2] - m[1] * m[1];
        if var <= 0.0 {
            return 0.0;
        }
        let mu4 = m[4] - 4.0 * m[1] * m[3] + 6.0 * m[1] * m[1] * m[2] - 3.0 * m[1].powi(4);
        mu4 / (var * var) - 3.0
    }
}

impl Parametric for TruncatedNormal {
    const FAMILY: Family = Family::TruncatedNormal;

    fn parameters(&self) -> Vec<f64> {
        vec![self.mu, self.sigma, self.a, self.b]
    }

    fn parameter_names(&self) -> Vec<String> {
        names(&["mu", "sigma", "a", "b"])
    }

    fn from_parameters(parameters: &[f64]) -> StatsResult<Self> {
        expect_parameter_count(Self::FAMILY, parameters, 4)?;
        Self::new(parameters[0], parameters[1], parameters[2], parameters[3])
    }
}
