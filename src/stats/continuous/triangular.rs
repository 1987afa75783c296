//! Triangular distribution.

use crate::stats::distribution::{check_probability, Distribution, Support};
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::parametric::{expect_parameter_count, names, require_finite, Family, Parametric};

/// Triangular distribution on [a, b] with mode m.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangular {
    a: f64,
    m: f64,
    b: f64,
}

impl Triangular {
    /// Create a triangular distribution.
    ///
    /// # Errors
    ///
    /// Returns an error unless a ≤ m ≤ b and a < b.
    pub fn new(a: f64, m: f64, b: f64) -> StatsResult<Self> {
        require_finite("a", a)?;
        require_finite("m", m)?;
        require_finite("b", b)?;
        if a >= b {
            return Err(StatsError::InvalidParameter {
                name: "a".to_string(),
                value: a,
                reason: format!("must be less than b = {}", b),
            });
        }
        if m < a || m > b {
            return Err(StatsError::InvalidParameter {
                name: "m".to_string(),
                value: m,
                reason: format!("mode must lie in [{}, {}]", a, b),
            });
        }
        Ok(Self { a, m, b })
    }

    /// Lower bound.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Mode.
    pub fn m(&self) -> f64 {
        self.m
    }

    /// Upper bound.
    pub fn b(&self) -> f64 {
        self.b
    }

    fn quadratic_form(&self) -> f64 {
        let (a, m, b) = (self.a, self.m, self.b);
        a * a + b * b + m * m - a * b - a * m - b * m
    }
}

impl Default for Triangular {
    fn default() -> Self {
        Self {
            a: -1.0,
            m: 0.0,
            b: 1.0,
        }
    }
}

impl Distribution for Triangular {
    fn support(&self) -> Support {
        Support::new(self.a, self.b)
    }

    fn pdf(&self, x: f64) -> f64 {
        let (a, m, b) = (self.a, self.m, self.b);
        if x < a || x > b {
            0.0
        } else if x < m {
            2.0 * (x - a) / ((b - a) * (m - a))
        } else if x > m {
            2.0 * (b - x) / ((b - a) * (b - m))
        } else {
            2.0 / (b - a)
        }
    }

    fn ddf(&self, x: f64) -> f64 {
        let (a, m, b) = (self.a, self.m, self.b);
        if x < a || x > b || x == m {
            0.0
        } else if x < m {
            2.0 / ((b - a) * (m - a))
        } else {
            -2.0 / ((b - a) * (b - m))
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        let (a, m, b) = (self.a, self.m, self.b);
        if x <= a {
            0.0
        } else if x >= b {
            1.0
        } else if x <= m {
            (x - a) * (x - a) / ((b - a) * (m - a))
        } else {
            1.0 - (b - x) * (b - x) / ((b - a) * (b - m))
        }
    }

    fn sf(&self, x: f64) -> f64 {
        let (a, m, b) = (self.a, self.m, self.b);
        if x <= a {
            1.0
        } else if x >= b {
            0.0
        } else if x <= m {
            1.0 - (x - a) * (x - a) / ((b - a) * (m - a))
        } else {
            (b - x) * (b - x) / ((b - a) * (b - m))
        }
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        let (a, m, b) = (self.a, self.m, self.b);
        let split = (m - a) / (b - a);
        if p <= split {
            Ok(a + (p * (b - a) * (m - a)).sqrt())
        } else {
            Ok(b - ((1.0 - p) * (b - a) * (b - m)).sqrt())
        }
    }

    fn mean(&self) -> f64 {
        (self.a + self.m + self.b) / 3.0
    }

    fn var(&self) -> f64 {
        self.quadratic_form() / 18.0
    }

    fn skewness(&self) -> f64 {
        let (a, m, b) = (self.a, self.m, self.b);
        std::f64::consts::SQRT_2 * (a + b - 2.0 * m) * (2.0 * a - b - m) * (a - 2.0 * b + m)
            / (5.0 * self.quadratic_form().powf(1.5))
    }

    fn kurtosis(&self) -> f64 {
        -0.6
    }
}

impl Parametric for Triangular {
    const FAMILY: Family = Family::Triangular;

    fn parameters(&self) -> Vec<f64> {
        vec![self.a, self.m, self.b]
    }

    fn parameter_names(&self) -> Vec<String> {
        names(&["a", "m", "b"])
    }

    fn from_parameters(parameters: &[f64]) -> StatsResult<Self> {
        expect_parameter_count(Self::FAMILY, parameters, 3)?;
        Self::new(parameters[0], parameters[1], parameters[2])
    }
}
