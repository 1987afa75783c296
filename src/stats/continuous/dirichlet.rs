//! Dirichlet distribution.

use super::special;
use super::Beta;
use crate::integrate::GaussLegendreQuadrature;
use crate::stats::config::ToleranceConfig;
use crate::stats::distribution::{Distribution, MultivariateDistribution};
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::parametric::{Family, Parametric};
use rand::Rng;
use std::sync::OnceLock;

/// Dirichlet distribution.
///
/// The Dirichlet distribution is a multivariate generalization of the Beta distribution.
/// It is parameterized by a vector of concentration parameters θ = (θ₀, ..., θ_d).
///
/// Points are the first d coordinates y = (y₀, ..., y_{d-1}) of a point on the
/// d-simplex; the last coordinate 1 - Σ yᵢ is implied. The density is
///
/// f(y) = (1/B(θ)) ∏ yᵢ^(θᵢ - 1) · (1 - Σ yᵢ)^(θ_d - 1)
///
/// where B(θ) = ∏ Γ(θᵢ) / Γ(Σ θᵢ) is the multivariate beta function.
#[derive(Debug, Clone)]
pub struct Dirichlet {
    /// Concentration parameters, length d + 1
    theta: Vec<f64>,
    /// Sum of the concentration parameters
    theta_sum: f64,
    /// Log normalizing constant: Σ lgamma(θᵢ) - lgamma(Σ θᵢ)
    log_beta: f64,
    covariance: OnceLock<Vec<Vec<f64>>>,
}

impl Dirichlet {
    /// Create a new Dirichlet distribution.
    ///
    /// # Arguments
    ///
    /// * `theta` - Concentration parameters (all must be positive, length >= 2)
    pub fn new(theta: Vec<f64>) -> StatsResult<Self> {
        if theta.len() < 2 {
            return Err(StatsError::invalid_parameter(
                "theta",
                theta.len() as f64,
                "Dirichlet requires at least 2 concentration parameters",
            ));
        }

        for (i, &t) in theta.iter().enumerate() {
            if !(t > 0.0 && t.is_finite()) {
                return Err(StatsError::invalid_parameter(
                    format!("theta[{}]", i),
                    t,
                    "concentration parameter must be positive and finite",
                ));
            }
        }

        let theta_sum: f64 = theta.iter().sum();
        let log_beta = theta.iter().map(|&t| special::lgamma(t)).sum::<f64>() - special::lgamma(theta_sum);

        Ok(Self {
            theta,
            theta_sum,
            log_beta,
            covariance: OnceLock::new(),
        })
    }

    /// Get the concentration parameters.
    pub fn theta(&self) -> &[f64] {
        &self.theta
    }

    /// Get the sum of concentration parameters.
    pub fn theta_sum(&self) -> f64 {
        self.theta_sum
    }

    /// Σ θⱼ over j > i.
    fn rest_sum(&self, i: usize) -> f64 {
        self.theta[i + 1..].iter().sum()
    }

    /// Conditional law of coordinate `y.len()` given the coordinates `y`:
    /// a Beta(θᵢ, Σ_{j>i} θⱼ) stretched over [0, 1 - Σ y].
    fn conditional(&self, y: &[f64]) -> StatsResult<Beta> {
        let i = y.len();
        let d = self.dimension();
        if i >= d {
            return Err(StatsError::invalid_argument(
                "Dirichlet conditional",
                format!("conditioning on {} coordinates leaves nothing free in dimension {}", i, d),
            ));
        }
        if y.iter().any(|&v| !(v > 0.0)) {
            return Err(StatsError::invalid_argument(
                "Dirichlet conditional",
                "conditioning coordinates must be positive",
            ));
        }
        let remaining = 1.0 - y.iter().sum::<f64>();
        if !(remaining > 0.0) {
            return Err(StatsError::invalid_argument(
                "Dirichlet conditional",
                format!("conditioning coordinates sum to {} >= 1", 1.0 - remaining),
            ));
        }
        Beta::new(self.theta[i], self.rest_sum(i), 0.0, remaining)
    }

    /// Density of coordinate `y.len()` at `x` given the preceding coordinates `y`.
    pub fn conditional_pdf(&self, y: &[f64], x: f64) -> StatsResult<f64> {
        Ok(self.conditional(y)?.pdf(x))
    }

    /// CDF of coordinate `y.len()` at `x` given the preceding coordinates `y`.
    pub fn conditional_cdf(&self, y: &[f64], x: f64) -> StatsResult<f64> {
        Ok(self.conditional(y)?.cdf(x))
    }

    /// Quantile of coordinate `y.len()` given the preceding coordinates `y`.
    pub fn conditional_ppf(&self, y: &[f64], q: f64) -> StatsResult<f64> {
        self.conditional(y)?.ppf(q)
    }

    /// P(Y_i <= b_i, ..., Y_{d-1} <= b_{d-1}) when the coordinates before i
    /// leave `remaining` mass, integrating the chain of Beta conditionals.
    fn chain_cdf(&self, i: usize, remaining: f64, bounds: &[f64], rule: &GaussLegendreQuadrature) -> f64 {
        if bounds[i] <= 0.0 || remaining <= 0.0 {
            return 0.0;
        }
        let a = self.theta[i];
        let b = self.rest_sum(i);
        let upper = (bounds[i] / remaining).min(1.0);
        if i + 1 == bounds.len() {
            return special::betainc(a, b, upper);
        }
        let log_norm = special::lbeta(a, b);
        let integrand = |u: f64| {
            if u <= 0.0 || u >= 1.0 {
                return 0.0;
            }
            let density = ((a - 1.0) * u.ln() + (b - 1.0) * (-u).ln_1p() - log_norm).exp();
            density * self.chain_cdf(i + 1, remaining * (1.0 - u), bounds, rule)
        };

        // Past `kink` the next bound stops binding; the inner CDF reaches 1 there
        // like 1 - c (kink - u)^b' with b' the next conditional's second shape.
        let kink = 1.0 - bounds[i + 1] / remaining;
        let kink_power = (1.0 / self.rest_sum(i + 1)).max(1.0);
        let mut points = vec![0.0];
        if kink > 0.0 && kink < upper {
            points.push(kink);
        }
        points.push(upper);

        let mut total = 0.0;
        for panel in points.windows(2) {
            let (l, r) = (panel[0], panel[1]);
            let left = (a < 1.0).then(|| Grading::Left { anchor: 0.0, power: 1.0 / a });
            let right = if r == kink {
                Some(Grading::Right { anchor: kink, power: kink_power })
            } else if b < 1.0 {
                Some(Grading::Right { anchor: 1.0, power: 1.0 / b })
            } else {
                None
            };
            total += match (left, right) {
                (Some(left), Some(right)) => {
                    let mid = 0.5 * (l + r);
                    graded_panel(rule, &integrand, l, mid, left) + graded_panel(rule, &integrand, mid, r, right)
                }
                (Some(grading), None) | (None, Some(grading)) => graded_panel(rule, &integrand, l, r, grading),
                (None, None) => rule.integrate(&integrand, l, r),
            };
        }
        total
    }
}

impl Default for Dirichlet {
    fn default() -> Self {
        Self {
            theta: vec![1.0, 1.0],
            theta_sum: 2.0,
            log_beta: 0.0,
            covariance: OnceLock::new(),
        }
    }
}

impl MultivariateDistribution for Dirichlet {
    fn dimension(&self) -> usize {
        self.theta.len() - 1
    }

    fn log_pdf(&self, y: &[f64]) -> f64 {
        if y.len() != self.dimension() || y.iter().any(|&v| !(v > 0.0)) {
            return f64::NEG_INFINITY;
        }
        let last = 1.0 - y.iter().sum::<f64>();
        if !(last > 0.0) {
            return f64::NEG_INFINITY;
        }

        let mut log_p = -self.log_beta;
        for (yi, ti) in y.iter().zip(&self.theta) {
            log_p += (ti - 1.0) * yi.ln();
        }
        log_p + (self.theta[self.dimension()] - 1.0) * last.ln()
    }

    fn pdf(&self, y: &[f64]) -> f64 {
        self.log_pdf(y).exp()
    }

    fn cdf(&self, y: &[f64]) -> f64 {
        if y.len() != self.dimension() {
            return f64::NAN;
        }
        if y.iter().any(|&v| v <= 0.0) {
            return 0.0;
        }
        if y.iter().all(|&v| v >= 1.0) {
            return 1.0;
        }
        let rule = GaussLegendreQuadrature::new(ToleranceConfig::default().integration_nodes);
        self.chain_cdf(0, 1.0, y, &rule).clamp(0.0, 1.0)
    }

    /// Mean vector: E[Yᵢ] = θᵢ / θ₀ where θ₀ = Σ θⱼ
    fn mean(&self) -> Vec<f64> {
        self.theta[..self.dimension()].iter().map(|&t| t / self.theta_sum).collect()
    }

    /// Covariance matrix.
    ///
    /// Cov(Yᵢ, Yⱼ) = -θᵢθⱼ / (θ₀²(θ₀+1))  for i ≠ j
    /// Var(Yᵢ) = θᵢ(θ₀-θᵢ) / (θ₀²(θ₀+1))
    fn covariance(&self) -> Vec<Vec<f64>> {
        self.covariance
            .get_or_init(|| {
                let d = self.dimension();
                let t0 = self.theta_sum;
                let denom = t0 * t0 * (t0 + 1.0);
                let mut cov = vec![vec![0.0; d]; d];
                for (i, row) in cov.iter_mut().enumerate() {
                    for (j, cell) in row.iter_mut().enumerate() {
                        *cell = if i == j {
                            self.theta[i] * (t0 - self.theta[i]) / denom
                        } else {
                            -self.theta[i] * self.theta[j] / denom
                        };
                    }
                }
                cov
            })
            .clone()
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        let mut draws = Vec::with_capacity(self.theta.len());
        for &t in &self.theta {
            match rand_distr::Gamma::new(t, 1.0) {
                Ok(g) => draws.push(rng.sample(g)),
                Err(_) => return vec![f64::NAN; self.dimension()],
            }
        }
        let total: f64 = draws.iter().sum();
        draws.truncate(self.dimension());
        draws.iter().map(|g| g / total).collect()
    }
}

impl Parametric for Dirichlet {
    const FAMILY: Family = Family::Dirichlet;

    fn parameters(&self) -> Vec<f64> {
        self.theta.clone()
    }

    fn parameter_names(&self) -> Vec<String> {
        (0..self.theta.len()).map(|i| format!("theta_{}", i)).collect()
    }

    fn from_parameters(parameters: &[f64]) -> StatsResult<Self> {
        Self::new(parameters.to_vec())
    }
}

/// Power substitution clustering quadrature nodes toward a singular point.
#[derive(Debug, Clone, Copy)]
enum Grading {
    /// u = anchor + t^power, anchor at or below the panel
    Left { anchor: f64, power: f64 },
    /// u = anchor - t^power, anchor at or above the panel
    Right { anchor: f64, power: f64 },
}

/// Integrate `f` over [l, r] in the graded variable t. A factor
/// |u - anchor|^(1/power - 1) in `f` becomes constant in t.
fn graded_panel<F: Fn(f64) -> f64>(rule: &GaussLegendreQuadrature, f: &F, l: f64, r: f64, grading: Grading) -> f64 {
    match grading {
        Grading::Left { anchor, power } => rule.integrate(
            |t: f64| f(anchor + t.powf(power)) * power * t.powf(power - 1.0),
            (l - anchor).powf(1.0 / power),
            (r - anchor).powf(1.0 / power),
        ),
        Grading::Right { anchor, power } => rule.integrate(
            |t: f64| f(anchor - t.powf(power)) * power * t.powf(power - 1.0),
            (anchor - r).powf(1.0 / power),
            (anchor - l).powf(1.0 / power),
        ),
    }
}
