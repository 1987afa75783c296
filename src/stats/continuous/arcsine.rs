//! Arcsine distribution.

use crate::integrate::GaussLegendreQuadrature;
use crate::stats::distribution::{check_probability, Distribution, Support};
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::parametric::{expect_parameter_count, names, require_finite, Family, Parametric};
use num_complex::Complex64;
use std::f64::consts::{FRAC_2_PI, FRAC_PI_2, PI};

/// Arcsine distribution on [a, b].
///
/// f(x) = 1 / (π √((x - a)(b - x)))  for a < x < b
///
/// The density is unbounded at both ends of the support.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arcsine {
    a: f64,
    b: f64,
}

impl Arcsine {
    /// Create an arcsine distribution on [a, b].
    ///
    /// # Errors
    ///
    /// Returns an error unless a < b with both bounds finite.
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
        Ok(Self { a, b })
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

impl Default for Arcsine {
    fn default() -> Self {
        Self { a: -1.0, b: 1.0 }
    }
}

impl Distribution for Arcsine {
    fn support(&self) -> Support {
        Support::new(self.a, self.b)
    }

    fn pdf(&self, x: f64) -> f64 {
        if x <= self.a || x >= self.b {
            return 0.0;
        }
        1.0 / (PI * ((x - self.a) * (self.b - x)).sqrt())
    }

    fn ddf(&self, x: f64) -> f64 {
        if x <= self.a || x >= self.b {
            return 0.0;
        }
        // d/dx [(x-a)(b-x)]^(-1/2)
        let q = (x - self.a) * (self.b - x);
        let dq = self.a + self.b - 2.0 * x;
        -0.5 * dq / (PI * q * q.sqrt())
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= self.a {
            0.0
        } else if x >= self.b {
            1.0
        } else {
            FRAC_2_PI * self.unit(x).sqrt().asin()
        }
    }

    fn sf(&self, x: f64) -> f64 {
        if x <= self.a {
            1.0
        } else if x >= self.b {
            0.0
        } else {
            FRAC_2_PI * (1.0 - self.unit(x)).sqrt().asin()
        }
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        let s = (FRAC_PI_2 * p).sin();
        Ok(self.a + (self.b - self.a) * s * s)
    }

    fn isf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        let s = (FRAC_PI_2 * p).sin();
        Ok(self.b - (self.b - self.a) * s * s)
    }

    /// exp(itc) J0(th) with c the midpoint and h the half-width; J0 is
    /// evaluated from its integral representation.
    fn characteristic_function(&self, t: f64) -> Complex64 {
        let c = 0.5 * (self.a + self.b);
        let h = 0.5 * (self.b - self.a);
        let j0 = GaussLegendreQuadrature::new(32).integrate_composite(|theta| (h * t * theta.sin()).cos(), 0.0, PI, 8) / PI;
        Complex64::from_polar(j0, t * c)
    }

    fn mean(&self) -> f64 {
        0.5 * (self.a + self.b)
    }

    fn var(&self) -> f64 {
        let w = self.b - self.a;
        w * w / 8.0
    }

    fn skewness(&self) -> f64 {
        0.0
    }

    fn kurtosis(&self) -> f64 {
        -1.5
    }
}

impl Parametric for Arcsine {
    const FAMILY: Family = Family::Arcsine;

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
    fn test_arcsine_cdf_ppf() {
        let d = Arcsine::new(0.0, 1.0).unwrap();
        assert!((d.cdf(0.5) - 0.5).abs() < 1e-15);
        assert!((d.cdf(0.25) - 1.0 / 3.0).abs() < 1e-14);
        for p in [0.01, 0.2, 0.5, 0.9] {
            let x = d.ppf(p).unwrap();
            assert!((d.cdf(x) - p).abs() < 1e-14);
            assert!((d.sf(d.isf(p).unwrap()) - p).abs() < 1e-14);
        }
        assert!(Arcsine::new(1.0, 1.0).is_err());
    }

    #[test]
    fn test_arcsine_ddf() {
        let d = Arcsine::new(-1.0, 3.0).unwrap();
        let fd = crate::stats::numerical::ddf(&d, 2.0, &Default::default());
        assert!((d.ddf(2.0) - fd).abs() < 1e-7);
        assert!(d.ddf(1.0).abs() < 1e-15);
    }

    #[test]
    fn test_arcsine_characteristic_function() {
        // J0(1) = 0.7651976865579666
        let d = Arcsine::default();
        let phi = d.characteristic_function(1.0);
        assert!((phi.re - 0.7651976865579666).abs() < 1e-12);
        assert!(phi.im.abs() < 1e-15);
    }
}
