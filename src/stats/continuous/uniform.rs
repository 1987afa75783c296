//! Uniform distribution.

use crate::stats::distribution::{check_probability, Distribution, Support};
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::parametric::{expect_parameter_count, names, require_finite, Family, Parametric};
use num_complex::Complex64;
use rand::Rng;

/// Continuous uniform distribution on [a, b].
///
/// f(x) = 1 / (b - a)  for a ≤ x ≤ b
///
/// ```
/// use estimr::stats::{Distribution, Uniform};
///
/// let u = Uniform::new(2.0, 8.0).unwrap();
/// assert!((u.mean() - 5.0).abs() < 1e-10);
/// assert!((u.cdf(5.0) - 0.5).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform {
    /// Lower bound
    a: f64,
    /// Upper bound
    b: f64,
    /// Range (b - a)
    range: f64,
}

impl Uniform {
    /// Create a new uniform distribution on [a, b].
    ///
    /// # Errors
    ///
    /// Returns an error if a >= b or if bounds are not finite.
    pub fn new(a: f64, b: f64) -> StatsResult<Self> {
        require_finite("a", a)?;
        require_finite("b", b)?;
        if a >= b {
            return Err(StatsError::InvalidParameter {
                name: "a".to_string(),
                value: a,
                reason: format!("must be less than b = {}", b),
            });
        }
        Ok(Self { a, b, range: b - a })
    }

    /// Create a standard uniform distribution U(0, 1).
    pub fn standard() -> Self {
        Self {
            a: 0.0,
            b: 1.0,
            range: 1.0,
        }
    }

    /// Get the lower bound.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Get the upper bound.
    pub fn b(&self) -> f64 {
        self.b
    }
}

impl Default for Uniform {
    fn default() -> Self {
        Self::standard()
    }
}

impl Distribution for Uniform {
    fn support(&self) -> Support {
        Support::new(self.a, self.b)
    }

    fn pdf(&self, x: f64) -> f64 {
        if x < self.a || x > self.b {
            0.0
        } else {
            1.0 / self.range
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= self.a {
            0.0
        } else if x >= self.b {
            1.0
        } else {
            (x - self.a) / self.range
        }
    }

    fn sf(&self, x: f64) -> f64 {
        if x <= self.a {
            1.0
        } else if x >= self.b {
            0.0
        } else {
            (self.b - x) / self.range
        }
    }

    fn ddf(&self, _x: f64) -> f64 {
        0.0
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        Ok(self.a + p * self.range)
    }

    fn isf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        Ok(self.b - p * self.range)
    }

    fn characteristic_function(&self, t: f64) -> Complex64 {
        if t == 0.0 {
            return Complex64::new(1.0, 0.0);
        }
        let ea = Complex64::new(0.0, t * self.a).exp();
        let eb = Complex64::new(0.0, t * self.b).exp();
        (eb - ea) / Complex64::new(0.0, t * self.range)
    }

    fn mean(&self) -> f64 {
        0.5 * (self.a + self.b)
    }

    fn var(&self) -> f64 {
        self.range * self.range / 12.0
    }

    fn skewness(&self) -> f64 {
        0.0
    }

    fn kurtosis(&self) -> f64 {
        -1.2
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.a + self.range * rng.gen::<f64>()
    }
}

impl Parametric for Uniform {
    const FAMILY: Family = Family::Uniform;

    fn parameters(&self) -> Vec<f64> {
        vec![self.a, self.b]
    }

    fn parameter_names(&self) -> Vec<String> {
        names(&["a", "b"])
    }

    fn from_parameters(parameters: &[f64]) -> StatsResult<Self> {
        expect_parameter_count(Self::FAMILY, parameters, 2)?;
        Self::new(parameters[0], parameters[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_creation() {
        assert!(Uniform::new(0.0, 1.0).is_ok());
        assert!(Uniform::new(1.0, 1.0).is_err());
        assert!(Uniform::new(2.0, 1.0).is_err());
        assert!(Uniform::new(f64::NEG_INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_uniform_pdf_cdf() {
        let u = Uniform::new(2.0, 6.0).unwrap();
        assert!((u.pdf(3.0) - 0.25).abs() < 1e-15);
        assert_eq!(u.pdf(7.0), 0.0);
        assert_eq!(u.log_pdf(1.0), f64::NEG_INFINITY);
        assert_eq!(u.cdf(1.0), 0.0);
        assert!((u.cdf(3.0) - 0.25).abs() < 1e-15);
        assert_eq!(u.cdf(6.5), 1.0);
        assert!((u.sf(3.0) - 0.75).abs() < 1e-15);
    }

    #[test]
    fn test_uniform_ppf() {
        let u = Uniform::new(2.0, 6.0).unwrap();
        assert!((u.ppf(0.25).unwrap() - 3.0).abs() < 1e-15);
        assert!((u.isf(0.25).unwrap() - 5.0).abs() < 1e-15);
        assert!(u.ppf(0.0).is_err());
    }

    #[test]
    fn test_uniform_moments() {
        let u = Uniform::new(2.0, 8.0).unwrap();
        assert!((u.mean() - 5.0).abs() < 1e-15);
        assert!((u.var() - 3.0).abs() < 1e-15);
        assert!((u.kurtosis() + 1.2).abs() < 1e-15);
        let numeric = crate::stats::numerical::kurtosis(&u, &Default::default());
        assert!((numeric + 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_uniform_characteristic_function() {
        let u = Uniform::new(-1.0, 3.0).unwrap();
        let numeric = crate::stats::numerical::characteristic_function(&u, 2.0, &Default::default());
        assert!((u.characteristic_function(2.0) - numeric).norm() < 1e-10);
        assert_eq!(u.characteristic_function(0.0), Complex64::new(1.0, 0.0));
    }
}
