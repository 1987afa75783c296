//! Log-uniform distribution.

use crate::stats::distribution::{check_probability, Distribution, Support};
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::parametric::{expect_parameter_count, names, require_finite, Family, Parametric};
use rand::Rng;

/// Distribution of exp(U) with U uniform on [a_log, b_log].
///
/// f(x) = 1 / (x (b_log - a_log))  for exp(a_log) ≤ x ≤ exp(b_log)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogUniform {
    a_log: f64,
    b_log: f64,
    /// Support bounds exp(a_log), exp(b_log)
    a: f64,
    b: f64,
}

impl LogUniform {
    /// Create a log-uniform distribution from the bounds of log X.
    ///
    /// # Errors
    ///
    /// Returns an error unless a_log < b_log with both finite.
    pub fn new(a_log: f64, b_log: f64) -> StatsResult<Self> {
        require_finite("a_log", a_log)?;
        require_finite("b_log", b_log)?;
        if a_log >= b_log {
            return Err(StatsError::InvalidParameter {
                name: "a_log".to_string(),
                value: a_log,
                reason: format!("must be less than b_log = {}", b_log),
            });
        }
        Ok(Self {
            a_log,
            b_log,
            a: a_log.exp(),
            b: b_log.exp(),
        })
    }

    /// Lower bound of log X.
    pub fn a_log(&self) -> f64 {
        self.a_log
    }

    /// Upper bound of log X.
    pub fn b_log(&self) -> f64 {
        self.b_log
    }

    /// E[X^k] = (e^(k b) - e^(k a)) / (k (b - a))
    fn raw_moment(&self, k: f64) -> f64 {
        ((k * self.b_log).exp() - (k * self.a_log).exp()) / (k * (self.b_log - self.a_log))
    }
}

impl Default for LogUniform {
    fn default() -> Self {
        Self {
            a_log: -1.0,
            b_log: 1.0,
            a: (-1.0f64).exp(),
            b: 1.0f64.exp(),
        }
    }
}

impl Distribution for LogUniform {
    fn support(&self) -> Support {
        Support::new(self.a, self.b)
    }

    fn pdf(&self, x: f64) -> f64 {
        if x < self.a || x > self.b {
            return 0.0;
        }
        1.0 / (x * (self.b_log - self.a_log))
    }

    fn ddf(&self, x: f64) -> f64 {
        if x < self.a || x > self.b {
            return 0.0;
        }
        -1.0 / (x * x * (self.b_log - self.a_log))
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= self.a {
            0.0
        } else if x >= self.b {
            1.0
        } else {
            (x.ln() - self.a_log) / (self.b_log - self.a_log)
        }
    }

    fn sf(&self, x: f64) -> f64 {
        if x <= self.a {
            1.0
        } else if x >= self.b {
            0.0
        } else {
            (self.b_log - x.ln()) / (self.b_log - self.a_log)
        }
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        Ok((self.a_log + p * (self.b_log - self.a_log)).exp())
    }

    fn isf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        Ok((self.b_log - p * (self.b_log - self.a_log)).exp())
    }

    fn mean(&self) -> f64 {
        self.raw_moment(1.0)
    }

    fn var(&self) -> f64 {
        let m = self.raw_moment(1.0);
        self.raw_moment(2.0) - m * m
    }

    fn skewness(&self) -> f64 {
        let m1 = self.raw_moment(1.0);
        let m2 = self.raw_moment(2.0);
        let m3 = self.raw_moment(3.0);
        let v = m2 - m1 * m1;
        (m3 - 3.0 * m1 * m2 + 2.0 * m1.powi(3)) / v.powf(1.5)
    }

    fn kurtosis(&self) -> f64 {
        let m1 = self.raw_moment(1.0);
        let m2 = self.raw_moment(2.0);
        let m3 = self.raw_moment(3.0);
        let m4 = self.raw_moment(4.0);
        let v = m2 - m1 * m1;
        (m4 - 4.0 * m1 * m3 + 6.0 * m1 * m1 * m2 - 3.0 * m1.powi(4)) / (v * v) - 3.0
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        (self.a_log + (self.b_log - self.a_log) * rng.gen::<f64>()).exp()
    }
}

impl Parametric for LogUniform {
    const FAMILY: Family = Family::LogUniform;

    fn parameters(&self) -> Vec<f64> {
        vec![self.a_log, self.b_log]
    }

    fn parameter_names(&self) -> Vec<String> {
        names(&["a_log", "b_log"])
    }

    fn from_parameters(parameters: &[f64]) -> StatsResult<Self> {
        expect_parameter_count(Self::FAMILY, parameters, 2)?;
        Self::new(parameters[0], parameters[1])
    }
}
