//! Gumbel distribution (Extreme Value Type I, maximum).

use super::special::EULER_MASCHERONI;
use crate::stats::distribution::{check_probability, Distribution, Support};
use crate::stats::error::StatsResult;
use crate::stats::parametric::{expect_parameter_count, names, require_finite, require_positive, Family, Parametric};
use std::f64::consts::PI;

/// Skewness of every Gumbel distribution: 12√6 ζ(3) / π³
const GUMBEL_SKEWNESS: f64 = 1.1395470994046486;

/// Gumbel distribution with scale β and mode γ.
///
/// f(x) = (1/β) exp(-(z + exp(-z))),  z = (x - γ)/β
///
/// # Example
///
/// ```
/// use estimr::stats::{Distribution, Gumbel};
///
/// let g = Gumbel::new(1.0, 0.0).unwrap();
/// assert!((g.cdf(0.0) - (-1.0f64).exp()).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gumbel {
    /// Scale parameter (β)
    beta: f64,
    /// Location parameter, the mode (γ)
    gamma: f64,
}

impl Gumbel {
    /// Create a new Gumbel distribution.
    ///
    /// # Errors
    ///
    /// Returns an error if β is not positive or γ is not finite.
    pub fn new(beta: f64, gamma: f64) -> StatsResult<Self> {
        require_positive("beta", beta)?;
        require_finite("gamma", gamma)?;
        Ok(Self { beta, gamma })
    }

    /// Scale β.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Location γ.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    fn z(&self, x: f64) -> f64 {
        (x - self.gamma) / self.beta
    }
}

impl Default for Gumbel {
    fn default() -> Self {
        Self {
            beta: 1.0,
            gamma: 0.0,
        }
    }
}

impl Distribution for Gumbel {
    fn support(&self) -> Support {
        Support::real_line()
    }

    fn pdf(&self, x: f64) -> f64 {
        self.log_pdf(x).exp()
    }

    fn log_pdf(&self, x: f64) -> f64 {
        let z = self.z(x);
        -self.beta.ln() - z - (-z).exp()
    }

    fn ddf(&self, x: f64) -> f64 {
        let z = self.z(x);
        self.pdf(x) * ((-z).exp() - 1.0) / self.beta
    }

    fn cdf(&self, x: f64) -> f64 {
        (-(-self.z(x)).exp()).exp()
    }

    fn sf(&self, x: f64) -> f64 {
        -(-(-self.z(x)).exp()).exp_m1()
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        Ok(self.gamma - self.beta * (-p.ln()).ln())
    }

    fn isf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        // SF(x) = p  <=>  exp(-z) = -ln(1-p)
        Ok(self.gamma - self.beta * (-(-p).ln_1p()).ln())
    }

    fn mean(&self) -> f64 {
        self.gamma + EULER_MASCHERONI * self.beta
    }

    fn var(&self) -> f64 {
        PI * PI * self.beta * self.beta / 6.0
    }

    fn skewness(&self) -> f64 {
        GUMBEL_SKEWNESS
    }

    fn kurtosis(&self) -> f64 {
        2.4
    }
}

impl Parametric for Gumbel {
    const FAMILY: Family = Family::Gumbel;

    fn parameters(&self) -> Vec<f64> {
        vec![self.beta, self.gamma]
    }

    fn parameter_names(&self) -> Vec<String> {
        names(&["beta", "gamma"])
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
    fn test_gumbel_creation() {
        assert!(Gumbel::new(1.0, 0.0).is_ok());
        assert!(Gumbel::new(0.0, 0.0).is_err());
        assert!(Gumbel::new(-1.0, 0.0).is_err());
    }

    #[test]
    fn test_gumbel_pdf() {
        let g = Gumbel::default();
        // f(0) = exp(-1)
        assert!((g.pdf(0.0) - (-1.0f64).exp()).abs() < 1e-15);
        let fd = crate::stats::numerical::ddf(&g, 0.7, &Default::default());
        assert!((g.ddf(0.7) - fd).abs() < 1e-9);
    }

    #[test]
    fn test_gumbel_ppf() {
        let g = Gumbel::new(2.0, 1.0).unwrap();
        for p in [1e-6, 0.1, 0.5, 0.9, 1.0 - 1e-9] {
            assert!((g.cdf(g.ppf(p).unwrap()) - p).abs() < 1e-13);
            assert!((g.sf(g.isf(p).unwrap()) - p).abs() < 1e-13);
        }
    }

    #[test]
    fn test_gumbel_moments() {
        let g = Gumbel::new(2.0, 1.0).unwrap();
        let cfg = Default::default();
        assert!((g.mean() - crate::stats::numerical::mean(&g, &cfg)).abs() < 1e-9);
        assert!((g.var() - crate::stats::numerical::central_moment(&g, 2, &cfg)).abs() < 1e-8);
        assert!((g.skewness() - crate::stats::numerical::skewness(&g, &cfg)).abs() < 1e-7);
    }
}
