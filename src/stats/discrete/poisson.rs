//! Poisson distribution.

use super::{as_count, discrete_isf, discrete_ppf, floor_count};
use crate::stats::continuous::special;
use crate::stats::distribution::{Distribution, Support};
use crate::stats::error::StatsResult;
use crate::stats::parametric::{expect_parameter_count, names, require_positive, Family, Parametric};
use num_complex::Complex64;
use rand::Rng;

/// Poisson distribution.
///
/// The Poisson distribution models the number of events occurring in a fixed
/// interval when events occur independently at a constant rate λ.
///
/// P(X = k) = λ^k e^(-λ) / k!
///
/// # Examples
///
/// ```
/// use estimr::stats::{Distribution, Poisson};
///
/// // Average 5 events per interval
/// let p = Poisson::new(5.0).unwrap();
/// assert!(p.pdf(5.0) > p.pdf(9.0));
/// assert!(p.cdf(3.0) < 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Poisson {
    /// Rate parameter (λ)
    lambda: f64,
}

impl Poisson {
    /// Create a new Poisson distribution with rate λ.
    ///
    /// # Arguments
    ///
    /// * `lambda` - Rate parameter (must be positive)
    pub fn new(lambda: f64) -> StatsResult<Self> {
        require_positive("lambda", lambda)?;
        Ok(Self { lambda })
    }

    /// Get the rate parameter λ.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Probability mass at k.
    pub fn pmf(&self, k: u64) -> f64 {
        self.log_pmf(k).exp()
    }

    /// Log probability mass at k.
    pub fn log_pmf(&self, k: u64) -> f64 {
        let k_f = k as f64;
        k_f * self.lambda.ln() - self.lambda - special::lgamma(k_f + 1.0)
    }

    // CDF = Q(k+1, λ), the regularized upper incomplete gamma
    fn cdf_count(&self, k: u64) -> f64 {
        special::gammaincc((k + 1) as f64, self.lambda)
    }

    fn sf_count(&self, k: u64) -> f64 {
        special::gammainc((k + 1) as f64, self.lambda)
    }
}

impl Default for Poisson {
    fn default() -> Self {
        Self { lambda: 1.0 }
    }
}

impl Distribution for Poisson {
    fn support(&self) -> Support {
        Support::from_lower(0.0)
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
        discrete_ppf(p, 0, None, |k| self.cdf_count(k))
    }

    fn isf(&self, p: f64) -> StatsResult<f64> {
        discrete_isf(p, 0, None, |k| self.sf_count(k))
    }

    fn characteristic_function(&self, t: f64) -> Complex64 {
        // exp(λ(e^{it} - 1))
        (Complex64::from_polar(self.lambda, t) - self.lambda).exp()
    }

    fn mean(&self) -> f64 {
        self.lambda
    }

    fn var(&self) -> f64 {
        self.lambda
    }

    fn skewness(&self) -> f64 {
        1.0 / self.lambda.sqrt()
    }

    fn kurtosis(&self) -> f64 {
        1.0 / self.lambda
    }

    fn is_discrete(&self) -> bool {
        true
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match rand_distr::Poisson::new(self.lambda) {
            Ok(poisson) => rng.sample::<f64, _>(poisson),
            Err(_) => f64::NAN,
        }
    }
}

impl Parametric for Poisson {
    const FAMILY: Family = Family::Poisson;

    fn parameters(&self) -> Vec<f64> {
        vec![self.lambda]
    }

    fn parameter_names(&self) -> Vec<String> {
        names(&["lambda"])
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
    fn test_poisson_creation() {
        let p = Poisson::new(5.0).unwrap();
        assert!((p.lambda() - 5.0).abs() < 1e-10);

        assert!(Poisson::new(0.0).is_err());
        assert!(Poisson::new(-1.0).is_err());
        assert!(Poisson::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_poisson_moments() {
        let p = Poisson::new(4.0).unwrap();

        assert!((p.mean() - 4.0).abs() < 1e-10);
        assert!((p.var() - 4.0).abs() < 1e-10);
        assert!((p.std() - 2.0).abs() < 1e-10);
        assert!((p.skewness() - 0.5).abs() < 1e-10);
        assert!((p.kurtosis() - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_poisson_pmf() {
        let p = Poisson::new(3.0).unwrap();

        // P(X = 0) = e^(-3)
        assert!((p.pdf(0.0) - (-3.0_f64).exp()).abs() < 1e-10);

        // P(X = 3) = 3^3 * e^(-3) / 3! = 27 * e^(-3) / 6
        let expected = 27.0 * (-3.0_f64).exp() / 6.0;
        assert!((p.pdf(3.0) - expected).abs() < 1e-10);
        assert_eq!(p.pdf(2.5), 0.0);

        // Sum of PMFs should approach 1 (test with large k)
        let total: f64 = (0..50).map(|k| p.pmf(k)).sum();
        assert!((total - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_poisson_cdf() {
        let p = Poisson::new(3.0).unwrap();

        // CDF(0) = P(X ≤ 0) = P(X = 0) = e^(-3)
        assert!((p.cdf(0.0) - (-3.0_f64).exp()).abs() < 1e-10);

        // CDF should be cumulative
        let cdf_3: f64 = (0..=3).map(|k| p.pmf(k)).sum();
        assert!((p.cdf(3.0) - cdf_3).abs() < 1e-12);
        assert_eq!(p.cdf(3.9), p.cdf(3.0));

        for k in 0..10 {
            let x = k as f64;
            assert!(p.cdf(x) <= p.cdf(x + 1.0));
            assert!((p.sf(x) + p.cdf(x) - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_poisson_ppf() {
        let p = Poisson::new(5.0).unwrap();

        // PPF should give smallest k with CDF(k) >= prob
        for k in 0..15 {
            let prob = p.cdf(k as f64);
            let result = p.ppf(prob).unwrap();
            assert_eq!(result, k as f64);
        }
        assert!(p.ppf(1.0).is_err());
    }

    #[test]
    fn test_poisson_characteristic_function() {
        let p = Poisson::new(2.0).unwrap();
        let t = 0.4;
        let direct: Complex64 = (0..60)
            .map(|k| Complex64::from_polar(p.pmf(k), t * k as f64))
            .sum();
        assert!((p.characteristic_function(t) - direct).norm() < 1e-12);
    }
}
