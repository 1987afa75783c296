//! Binomial distribution.

use super::{as_count, discrete_isf, discrete_ppf, floor_count, log_binom};
use crate::stats::continuous::special;
use crate::stats::distribution::{Distribution, Support};
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::parametric::{expect_parameter_count, names, Family, Parametric};
use num_complex::Complex64;
use rand::Rng;

/// Binomial distribution.
///
/// The binomial distribution models the number of successes in n independent
/// Bernoulli trials with success probability p.
///
/// P(X = k) = C(n, k) p^k (1-p)^(n-k)
///
/// # Examples
///
/// ```
/// use estimr::stats::{Binomial, Distribution};
///
/// // 10 coin flips with fair coin
/// let b = Binomial::new(10, 0.5).unwrap();
/// assert!((b.pdf(5.0) - 252.0 / 1024.0).abs() < 1e-12);
/// assert!(b.cdf(3.0) < 0.2); // At most 3 heads
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binomial {
    /// Number of trials
    n: u64,
    /// Success probability
    p: f64,
    /// Failure probability (1 - p)
    q: f64,
}

impl Binomial {
    /// Create a new binomial distribution.
    ///
    /// # Arguments
    ///
    /// * `n` - Number of trials
    /// * `p` - Probability of success on each trial (must be in [0, 1])
    pub fn new(n: u64, p: f64) -> StatsResult<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(StatsError::invalid_parameter("p", p, "probability must be in [0, 1]"));
        }
        Ok(Self { n, p, q: 1.0 - p })
    }

    /// Get the number of trials.
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Get the success probability.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Probability mass at k.
    pub fn pmf(&self, k: u64) -> f64 {
        if k > self.n {
            return 0.0;
        }
        if self.p == 0.0 {
            return if k == 0 { 1.0 } else { 0.0 };
        }
        if self.p == 1.0 {
            return if k == self.n { 1.0 } else { 0.0 };
        }

        self.log_pmf(k).exp()
    }

    /// Log probability mass at k.
    pub fn log_pmf(&self, k: u64) -> f64 {
        if k > self.n {
            return f64::NEG_INFINITY;
        }
        if self.p == 0.0 {
            return if k == 0 { 0.0 } else { f64::NEG_INFINITY };
        }
        if self.p == 1.0 {
            return if k == self.n { 0.0 } else { f64::NEG_INFINITY };
        }

        let k_f = k as f64;
        let n_f = self.n as f64;

        log_binom(self.n, k) + k_f * self.p.ln() + (n_f - k_f) * self.q.ln()
    }

    fn cdf_count(&self, k: u64) -> f64 {
        if k >= self.n || self.p == 0.0 {
            return 1.0;
        }
        if self.p == 1.0 {
            return 0.0;
        }

        // CDF = I_{1-p}(n-k, k+1) = 1 - I_p(k+1, n-k)
        special::betainc((self.n - k) as f64, (k + 1) as f64, self.q)
    }

    fn sf_count(&self, k: u64) -> f64 {
        if k >= self.n || self.p == 0.0 {
            return 0.0;
        }
        if self.p == 1.0 {
            return 1.0;
        }

        // SF = P(X > k) = I_p(k+1, n-k)
        special::betainc((k + 1) as f64, (self.n - k) as f64, self.p)
    }
}

impl Default for Binomial {
    fn default() -> Self {
        Self { n: 1, p: 0.5, q: 0.5 }
    }
}

impl Distribution for Binomial {
    fn support(&self) -> Support {
        Support::new(0.0, self.n as f64)
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

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        discrete_ppf(p, 0, Some(self.n), |k| self.cdf_count(k))
    }

    fn isf(&self, p: f64) -> StatsResult<f64> {
        discrete_isf(p, 0, Some(self.n), |k| self.sf_count(k))
    }

    fn characteristic_function(&self, t: f64) -> Complex64 {
        (Complex64::new(self.q, 0.0) + Complex64::from_polar(self.p, t)).powf(self.n as f64)
    }

    fn mean(&self) -> f64 {
        self.n as f64 * self.p
    }

    fn var(&self) -> f64 {
        self.n as f64 * self.p * self.q
    }

    fn skewness(&self) -> f64 {
        if self.var() == 0.0 {
            return 0.0;
        }
        (self.q - self.p) / self.var().sqrt()
    }

    fn kurtosis(&self) -> f64 {
        if self.var() == 0.0 {
            return 0.0;
        }
        (1.0 - 6.0 * self.p * self.q) / self.var()
    }

    fn is_discrete(&self) -> bool {
        true
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match rand_distr::Binomial::new(self.n, self.p) {
            Ok(b) => rng.sample(b) as f64,
            Err(_) => f64::NAN,
        }
    }
}

impl Parametric for Binomial {
    const FAMILY: Family = Family::Binomial;

    fn parameters(&self) -> Vec<f64> {
        vec![self.n as f64, self.p]
    }

    fn parameter_names(&self) -> Vec<String> {
        names(&["n", "p"])
    }

    fn from_parameters(parameters: &[f64]) -> StatsResult<Self> {
        expect_parameter_count(Self::FAMILY, parameters, 2)?;
        let n = as_count(parameters[0]).ok_or_else(|| {
            StatsError::invalid_parameter("n", parameters[0], "must be a non-negative integer")
        })?;
        Self::new(n, parameters[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binomial_creation() {
        let b = Binomial::new(10, 0.5).unwrap();
        assert_eq!(b.n(), 10);
        assert!((b.p() - 0.5).abs() < 1e-10);

        assert!(Binomial::new(10, -0.1).is_err());
        assert!(Binomial::new(10, 1.1).is_err());
        assert!(Binomial::from_parameters(&[2.5, 0.5]).is_err());
        assert_eq!(Binomial::from_parameters(&[4.0, 0.25]).unwrap(), Binomial::new(4, 0.25).unwrap());
    }

    #[test]
    fn test_binomial_moments() {
        let b = Binomial::new(10, 0.3).unwrap();

        // Mean = np = 3
        assert!((b.mean() - 3.0).abs() < 1e-10);

        // Var = npq = 2.1
        assert!((b.var() - 2.1).abs() < 1e-10);

        // Skewness = (q-p)/sqrt(npq)
        let expected_skew = 0.4 / 2.1_f64.sqrt();
        assert!((b.skewness() - expected_skew).abs() < 1e-10);
        assert!(b.is_discrete());
    }

    #[test]
    fn test_binomial_pmf() {
        let b = Binomial::new(10, 0.5).unwrap();

        // P(X = 5) for fair coin is C(10,5) * 0.5^10 = 252/1024
        let expected = 252.0 / 1024.0;
        assert!((b.pdf(5.0) - expected).abs() < 1e-10);

        // Sum of all PMFs should be 1
        let total: f64 = (0..=10).map(|k| b.pmf(k)).sum();
        assert!((total - 1.0).abs() < 1e-10);

        // Mass only at integers inside the support
        assert_eq!(b.pdf(11.0), 0.0);
        assert_eq!(b.pdf(4.5), 0.0);
        assert_eq!(b.pdf(-1.0), 0.0);
    }

    #[test]
    fn test_binomial_cdf() {
        let b = Binomial::new(10, 0.5).unwrap();

        // CDF should be cumulative
        let cdf_5: f64 = (0..=5).map(|k| b.pmf(k)).sum();
        assert!((b.cdf(5.0) - cdf_5).abs() < 1e-12);
        assert_eq!(b.cdf(5.7), b.cdf(5.0));
        assert_eq!(b.cdf(-0.5), 0.0);

        // CDF(n) = 1
        assert!((b.cdf(10.0) - 1.0).abs() < 1e-10);

        for k in 0..10 {
            let x = k as f64;
            assert!(b.cdf(x) <= b.cdf(x + 1.0));
            assert!((b.cdf(x) + b.sf(x) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_binomial_ppf() {
        let b = Binomial::new(10, 0.5).unwrap();

        // PPF should give smallest k with CDF(k) >= p
        for k in 0..10 {
            let p = b.cdf(k as f64);
            let result = b.ppf(p).unwrap();
            assert!(b.cdf(result) >= p);
            if result > 0.0 {
                assert!(b.cdf(result - 1.0) < p);
            }
        }
        assert_eq!(b.ppf(0.5).unwrap(), 5.0);
        assert_eq!(b.isf(0.5).unwrap(), 5.0);
        assert!(b.ppf(0.0).is_err());
    }

    #[test]
    fn test_binomial_characteristic_function() {
        let b = Binomial::new(6, 0.3).unwrap();
        let direct: Complex64 = (0..=6)
            .map(|k| Complex64::from_polar(b.pmf(k), 0.7 * k as f64))
            .sum();
        assert!((b.characteristic_function(0.7) - direct).norm() < 1e-12);
    }

    #[test]
    fn test_binomial_edge_cases() {
        // p = 0: always 0 successes
        let b = Binomial::new(10, 0.0).unwrap();
        assert!((b.pmf(0) - 1.0).abs() < 1e-10);
        assert!((b.pmf(1) - 0.0).abs() < 1e-10);

        // p = 1: always n successes
        let b = Binomial::new(10, 1.0).unwrap();
        assert!((b.pmf(10) - 1.0).abs() < 1e-10);
        assert!((b.pmf(9) - 0.0).abs() < 1e-10);

        // n = 0: always 0
        let b = Binomial::new(0, 0.5).unwrap();
        assert!((b.pmf(0) - 1.0).abs() < 1e-10);
    }
}
