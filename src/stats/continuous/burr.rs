//! Burr (type XII) distribution.

use super::special;
use crate::stats::distribution::{check_probability, Distribution, Support};
use crate::stats::error::StatsResult;
use crate::stats::parametric::{expect_parameter_count, names, require_positive, Family, Parametric};
use rand::distributions::Open01;
use rand::Rng;

/// Burr type XII distribution with shape parameters c and k.
///
/// F(x) = 1 - (1 + x^c)^(-k)  for x > 0
///
/// The r-th raw moment exists only for r < c·k; moments that do not exist
/// are reported as NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burr {
    c: f64,
    k: f64,
}

impl Burr {
    /// Create a new Burr distribution.
    ///
    /// # Errors
    ///
    /// Returns an error if c or k is not positive.
    pub fn new(c: f64, k: f64) -> StatsResult<Self> {
        require_positive("c", c)?;
        require_positive("k", k)?;
        Ok(Self { c, k })
    }

    /// Get the shape c.
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Get the shape k.
    pub fn k(&self) -> f64 {
        self.k
    }

    /// E[X^r] = k B(k - r/c, 1 + r/c)
    fn raw_moment(&self, r: f64) -> f64 {
        if r >= self.c * self.k {
            return f64::NAN;
        }
        let s = r / self.c;
        self.k * special::lbeta(self.k - s, 1.0 + s).exp()
    }

    /// ln(1 + x^c)
    fn log_tail(&self, x: f64) -> f64 {
        x.powf(self.c).ln_1p()
    }

    /// Inverse of the survival function on a probability in (0, 1).
    fn invert_sf(&self, q: f64) -> f64 {
        (-q.ln() / self.k).exp_m1().powf(1.0 / self.c)
    }
}

impl Default for Burr {
    fn default() -> Self {
        Self { c: 1.0, k: 1.0 }
    }
}

impl Distribution for Burr {
    fn support(&self) -> Support {
        Support::from_lower(0.0)
    }

    fn pdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        self.log_pdf(x).exp()
    }

    fn log_pdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return f64::NEG_INFINITY;
        }
        (self.c * self.k).ln() + (self.c - 1.0) * x.ln() - (self.k + 1.0) * self.log_tail(x)
    }

    fn ddf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        let xc = x.powf(self.c);
        self.pdf(x) * ((self.c - 1.0) - (self.k + 1.0) * self.c * xc / (1.0 + xc)) / x
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            0.0
        } else {
            -(-self.k * self.log_tail(x)).exp_m1()
        }
    }

    fn sf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            1.0
        } else {
            (-self.k * self.log_tail(x)).exp()
        }
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        Ok(self.invert_sf(1.0 - p))
    }

    fn isf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        Ok(self.invert_sf(p))
    }

    fn mean(&self) -> f64 {
        self.raw_moment(1.0)
    }

    fn var(&self) -> f64 {
        let m1 = self.raw_moment(1.0);
        self.raw_moment(2.0) - m1 * m1
    }

    fn skewness(&self) -> f64 {
        let m1 = self.raw_moment(1.0);
        let m2 = self.raw_moment(2.0);
        let m3 = self.raw_moment(3.0);
        let var = m2 - m1 * m1;
        (m3 - 3.0 * m1 * m2 + 2.0 * m1.powi(3)) / var.powf(1.5)
    }

    fn kurtosis(&self) -> f64 {
        let m1 = self.raw_moment(1.0);
        let m2 = self.raw_moment(2.0);
        let m3 = self.raw_moment(3.0);
        let m4 = self.raw_moment(4.0);
        let var = m2 - m1 * m1;
        let mu4 = m4 - 4.0 * m1 * m3 + 6.0 * m1 * m1 * m2 - 3.0 * m1.powi(4);
        mu4 / (var * var) - 3.0
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.sample(Open01);
        self.invert_sf(u)
    }
}

impl Parametric for Burr {
    const FAMILY: Family = Family::Burr;

    fn parameters(&self) -> Vec<f64> {
        vec![self.c, self.k]
    }

    fn parameter_names(&self) -> Vec<String> {
        names(&["c", "k"])
    }

    fn from_parameters(parameters: &[f64]) -> StatsResult<Self> {
        expect_parameter_count(Self::FAMILY, parameters, 2)?;
        Self::new(parameters[0], parameters[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::numerical;

    #[test]
    fn test_burr_creation() {
        assert!(Burr::new(2.0, 3.0).is_ok());
        assert!(Burr::new(0.0, 3.0).is_err());
        assert!(Burr::new(2.0, -1.0).is_err());
    }

    #[test]
    fn test_burr_cdf_ppf() {
        let burr = Burr::new(2.0, 3.0).unwrap();
        // F(1) = 1 - 2^-3
        assert!((burr.cdf(1.0) - 0.875).abs() < 1e-14);
        assert!((burr.sf(1.0) - 0.125).abs() < 1e-14);
        for p in [0.01, 0.2, 0.5, 0.875, 0.999] {
            assert!((burr.cdf(burr.ppf(p).unwrap()) - p).abs() < 1e-12);
            assert!((burr.sf(burr.isf(p).unwrap()) - p).abs() < 1e-12);
        }
        assert!((burr.ppf(0.875).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_burr_moments() {
        let burr = Burr::new(2.0, 3.0).unwrap();
        let expected_mean = 3.0 * special::lbeta(2.5, 1.5).exp();
        assert!((burr.mean() - expected_mean).abs() < 1e-12);

        let cfg = Default::default();
        assert!((burr.mean() - numerical::mean(&burr, &cfg)).abs() < 1e-9);
        assert!((burr.var() - numerical::central_moment(&burr, 2, &cfg)).abs() < 1e-8);
        assert!((burr.skewness() - numerical::skewness(&burr, &cfg)).abs() < 1e-5);

        // Only moments of order below c·k exist
        let heavy = Burr::new(1.0, 1.5).unwrap();
        assert!(heavy.mean().is_finite());
        assert!(heavy.var().is_nan());
    }

    #[test]
    fn test_burr_density() {
        let burr = Burr::new(3.0, 2.0).unwrap();
        let total = numerical::expectation(&burr, |_| 1.0, &Default::default());
        assert!((total - 1.0).abs() < 1e-8);
        let fd = numerical::ddf(&burr, 0.8, &Default::default());
        assert!((burr.ddf(0.8) - fd).abs() < 1e-8);
        assert_eq!(burr.pdf(-1.0), 0.0);
    }
}
