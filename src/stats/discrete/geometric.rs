//! Geometric distribution.

use super::{as_count, floor_count};
use crate::stats::distribution::{check_probability, Distribution, Support};
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::parametric::{expect_parameter_count, names, Family, Parametric};
use num_complex::Complex64;
use rand::distributions::Open01;
use rand::Rng;

/// Geometric distribution.
///
/// The geometric distribution models the number of trials up to and
/// including the first success in a sequence of independent Bernoulli trials.
///
/// P(X = k) = (1-p)^(k-1) * p  for k = 1, 2, 3, ...
///
/// # Examples
///
/// ```
/// use estimr::stats::{Distribution, Geometric};
///
/// // Success probability 0.3
/// let g = Geometric::new(0.3).unwrap();
/// assert!((g.pdf(1.0) - 0.3).abs() < 1e-15); // First trial succeeds
/// assert!((g.mean() - 1.0 / 0.3).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometric {
    /// Success probability
    p: f64,
    /// Failure probability (1 - p)
    q: f64,
}

impl Geometric {
    /// Create a new geometric distribution.
    ///
    /// # Arguments
    ///
    /// * `p` - Probability of success on each trial (must be in (0, 1])
    pub fn new(p: f64) -> StatsResult<Self> {
        if !(p > 0.0 && p <= 1.0) {
            return Err(StatsError::invalid_parameter("p", p, "probability must be in (0, 1]"));
        }
        Ok(Self { p, q: 1.0 - p })
    }

    /// Get the success probability.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Probability mass at k.
    pub fn pmf(&self, k: u64) -> f64 {
        if k == 0 {
            return 0.0;
        }
        if self.q == 0.0 {
            return if k == 1 { 1.0 } else { 0.0 };
        }
        self.log_pmf(k).exp()
    }

    /// Log probability mass at k.
    pub fn log_pmf(&self, k: u64) -> f64 {
        if k == 0 {
            return f64::NEG_INFINITY;
        }
        if self.q == 0.0 {
            return if k == 1 { 0.0 } else { f64::NEG_INFINITY };
        }
        (k - 1) as f64 * self.q.ln() + self.p.ln()
    }

    // SF = (1-p)^k
    fn sf_count(&self, k: u64) -> f64 {
        if self.q == 0.0 {
            return if k == 0 { 1.0 } else { 0.0 };
        }
        (k as f64 * self.q.ln()).exp()
    }

    fn cdf_count(&self, k: u64) -> f64 {
        if self.q == 0.0 {
            return if k == 0 { 0.0 } else { 1.0 };
        }
        -(k as f64 * self.q.ln()).exp_m1()
    }

    /// Smallest k >= 1 with SF(k) <= tail.
    fn invert_tail(&self, tail: f64, reached: impl Fn(u64) -> bool) -> u64 {
        if self.q == 0.0 {
            return 1;
        }
        // (1-p)^k <= tail  <=>  k >= ln(tail) / ln(1-p)
        let guess = (tail.ln() / self.q.ln()).ceil();
        let mut k = if guess.is_finite() && guess >= 1.0 { guess as u64 } else { 1 };
        while k > 1 && reached(k - 1) {
            k -= 1;
        }
        while !reached(k) {
            k += 1;
        }
        k
    }
}

impl Default for Geometric {
    fn default() -> Self {
        Self { p: 0.5, q: 0.5 }
    }
}

impl Distribution for Geometric {
    fn support(&self) -> Support {
        Support::from_lower(1.0)
    }

    fn pdf(&self, x: f64) -> f64 {
        as_count(x).map_or(0.0, |k| self.pmf(k))
    }

    fn log_pdf(&self, x: f64) -> f64 {
        as_count(x).map_or(f64::NEG_INFINITY, |k| self.log_pmf(k))
    }

    fn cdf(&self, x: f64) -> f64 {
        floor_count(x).map_or(0.0, |k| self.cdf_count(k))
    }

    fn sf(&self, x: f64) -> f64 {
        floor_count(x).map_or(1.0, |k| self.sf_count(k))
    }

    fn ppf(&self, prob: f64) -> StatsResult<f64> {
        check_probability(prob)?;
        Ok(self.invert_tail(1.0 - prob, |k| self.cdf_count(k) >= prob) as f64)
    }

    fn isf(&self, prob: f64) -> StatsResult<f64> {
        check_probability(prob)?;
        Ok(self.invert_tail(prob, |k| self.sf_count(k) <= prob) as f64)
    }

    fn characteristic_function(&self, t: f64) -> Complex64 {
        // p e^{it} / (1 - q e^{it})
        let e = Complex64::from_polar(1.0, t);
        e * self.p / (1.0 - e * self.q)
    }

    fn mean(&self) -> f64 {
        1.0 / self.p
    }

    fn var(&self) -> f64 {
        self.q / (self.p * self.p)
    }

    fn skewness(&self) -> f64 {
        (2.0 - self.p) / self.q.sqrt()
    }

    fn kurtosis(&self) -> f64 {
        6.0 + (self.p * self.p) / self.q
    }

    fn is_discrete(&self) -> bool {
        true
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.q == 0.0 {
            return 1.0;
        }
        let u: f64 = rng.sample(Open01);
        (u.ln() / self.q.ln()).ceil().max(1.0)
    }
}

impl Parametric for Geometric {
    const FAMILY: Family = Family::Geometric;

    fn parameters(&self) -> Vec<f64> {
        vec![self.p]
    }

    fn parameter_names(&self) -> Vec<String> {
        names(&["p"])
    }

    fn from_parameters(parameters: &[f64]) -> StatsResult<Self> {
        expect_parameter_count(Self::FAMILY, parameters, 1)?;
        Self::new(parameters[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometric_creation() {
        let g = Geometric::new(0.3).unwrap();
        assert!((g.p() - 0.3).abs() < 1e-10);

        assert!(Geometric::new(0.0).is_err());
        assert!(Geometric::new(-0.1).is_err());
        assert!(Geometric::new(1.1).is_err());
        assert!(Geometric::new(f64::NAN).is_err());

        // p = 1 is valid (always succeed first try)
        assert!(Geometric::new(1.0).is_ok());
    }

    #[test]
    fn test_geometric_moments() {
        let g = Geometric::new(0.25).unwrap();

        // Mean = 1/p = 4
        assert!((g.mean() - 4.0).abs() < 1e-10);

        // Var = q/p² = 0.75/0.0625 = 12
        assert!((g.var() - 12.0).abs() < 1e-10);
        assert!(g.is_discrete());
    }

    #[test]
    fn test_geometric_pmf() {
        let g = Geometric::new(0.5).unwrap();

        // Support starts at one trial
        assert_eq!(g.pdf(0.0), 0.0);

        // P(X = 1) = p = 0.5
        assert!((g.pdf(1.0) - 0.5).abs() < 1e-10);

        // P(X = 2) = q*p = 0.25
        assert!((g.pdf(2.0) - 0.25).abs() < 1e-10);

        // P(X = 3) = q²*p = 0.125
        assert!((g.pdf(3.0) - 0.125).abs() < 1e-10);

        // Sum should approach 1
        let total: f64 = (1..40).map(|k| g.pmf(k)).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_geometric_cdf() {
        let g = Geometric::new(0.5).unwrap();

        assert_eq!(g.cdf(0.5), 0.0);

        // CDF(1) = p = 0.5
        assert!((g.cdf(1.0) - 0.5).abs() < 1e-10);

        // CDF(2) = 1 - q² = 0.75
        assert!((g.cdf(2.0) - 0.75).abs() < 1e-10);

        // CDF(3) = 1 - q³ = 0.875
        assert!((g.cdf(3.0) - 0.875).abs() < 1e-10);

        for k in 1..10 {
            let x = k as f64;
            assert!(g.cdf(x) <= g.cdf(x + 1.0));
            assert!((g.sf(x) + g.cdf(x) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_geometric_ppf() {
        let g = Geometric::new(0.3).unwrap();

        // PPF should give smallest k with CDF(k) >= prob
        for k in 1..12 {
            let prob = g.cdf(k as f64);
            assert_eq!(g.ppf(prob).unwrap(), k as f64);
            let tail = g.sf(k as f64);
            assert_eq!(g.isf(tail).unwrap(), k as f64);
        }
        assert_eq!(g.ppf(0.1).unwrap(), 1.0);
    }

    #[test]
    fn test_geometric_characteristic_function() {
        let g = Geometric::new(0.4).unwrap();
        let t = 1.3;
        let direct: Complex64 = (1..200)
            .map(|k| Complex64::from_polar(g.pmf(k), t * k as f64))
            .sum();
        assert!((g.characteristic_function(t) - direct).norm() < 1e-12);
    }

    #[test]
    fn test_geometric_p_equals_1() {
        // When p = 1, always succeed on first trial
        let g = Geometric::new(1.0).unwrap();

        assert!((g.pdf(1.0) - 1.0).abs() < 1e-10);
        assert!((g.pdf(2.0) - 0.0).abs() < 1e-10);
        assert!((g.cdf(1.0) - 1.0).abs() < 1e-10);
        assert!((g.mean() - 1.0).abs() < 1e-10);
        assert_eq!(g.ppf(0.7).unwrap(), 1.0);
    }
}
