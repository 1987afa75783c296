//! Copula factories inverting the empirical Kendall's tau.

use super::validation::check_sample;
use super::{construct, DistributionFactory};
use crate::optimize::scalar::{bisect, bracket_increasing};
use crate::stats::config::ToleranceConfig;
use crate::stats::copula::{AliMikhailHaqCopula, ClaytonCopula, FrankCopula, GumbelCopula};
use crate::stats::descriptive;
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::sample::Sample;
use log::debug;

/// Empirical Kendall's tau of a bivariate sample.
fn sample_kendall_tau(sample: &Sample, context: &str) -> StatsResult<f64> {
    check_sample(sample, 2, context)?;
    let tau = descriptive::kendall_tau(&sample.column(0), &sample.column(1));
    if tau.is_nan() {
        return Err(StatsError::invalid_argument(
            context,
            "Kendall's tau is undefined for a constant margin",
        ));
    }
    debug!("{context}: empirical Kendall's tau {tau}");
    Ok(tau)
}

fn reject_perfect_concordance(tau: f64, context: &str) -> StatsResult<()> {
    if tau >= 1.0 {
        return Err(StatsError::invalid_argument(
            context,
            format!("Kendall's tau {tau} leaves no finite parameter"),
        ));
    }
    Ok(())
}

/// Clayton copula from θ = 2τ / (1 - τ).
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaytonCopulaFactory;

impl ClaytonCopulaFactory {
    /// θ for a given Kendall's tau.
    pub fn theta_from_tau(&self, tau: f64) -> StatsResult<f64> {
        reject_perfect_concordance(tau, "ClaytonCopulaFactory")?;
        Ok(2.0 * tau / (1.0 - tau))
    }
}

impl DistributionFactory for ClaytonCopulaFactory {
    type Output = ClaytonCopula;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<ClaytonCopula> {
        const CONTEXT: &str = "ClaytonCopulaFactory";
        let theta = self.theta_from_tau(sample_kendall_tau(sample, CONTEXT)?)?;
        construct(CONTEXT, &[theta])
    }
}

/// Gumbel copula from θ = 1 / (1 - τ).
#[derive(Debug, Clone, Copy, Default)]
pub struct GumbelCopulaFactory;

impl GumbelCopulaFactory {
    /// θ for a given Kendall's tau.
    pub fn theta_from_tau(&self, tau: f64) -> StatsResult<f64> {
        reject_perfect_concordance(tau, "GumbelCopulaFactory")?;
        Ok(1.0 / (1.0 - tau))
    }
}

impl DistributionFactory for GumbelCopulaFactory {
    type Output = GumbelCopula;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<GumbelCopula> {
        const CONTEXT: &str = "GumbelCopulaFactory";
        let theta = self.theta_from_tau(sample_kendall_tau(sample, CONTEXT)?)?;
        construct(CONTEXT, &[theta])
    }
}

/// Frank copula: θ solves τ(θ) = τ̂ by bracket doubling and bisection.
#[derive(Debug, Clone, Default)]
pub struct FrankCopulaFactory {
    config: ToleranceConfig,
}

impl FrankCopulaFactory {
    /// Create a factory running with the given tolerances.
    pub fn new(config: ToleranceConfig) -> Self {
        Self { config }
    }

    /// θ with `FrankCopula::kendall_tau_for(θ) = tau`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when |τ| >= 1, a convergence error when the bracket
    /// or the bisection exhausts `bisection_max_iter`.
    pub fn theta_from_tau(&self, tau: f64) -> StatsResult<f64> {
        const CONTEXT: &str = "FrankCopulaFactory";
        if !(tau.abs() < 1.0) {
            return Err(StatsError::invalid_argument(
                CONTEXT,
                format!("Kendall's tau {tau} leaves no finite parameter"),
            ));
        }
        let residual = |theta: f64| FrankCopula::kendall_tau_for(theta) - tau;
        let options = self.config.bisection_options();
        let (lo, hi) = bracket_increasing(residual, 0.0, 1.0, &options)?;
        if lo == hi {
            return Ok(lo);
        }
        let root = bisect(residual, lo, hi, &options)?;
        debug!(
            "{CONTEXT}: theta={} from bracket [{lo}, {hi}] in {} steps",
            root.root, root.iterations
        );
        Ok(root.root)
    }
}

impl DistributionFactory for FrankCopulaFactory {
    type Output = FrankCopula;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<FrankCopula> {
        const CONTEXT: &str = "FrankCopulaFactory";
        let theta = self.theta_from_tau(sample_kendall_tau(sample, CONTEXT)?)?;
        construct(CONTEXT, &[theta])
    }
}

/// Ali-Mikhail-Haq copula: θ in [-1, 1] solves τ(θ) = τ̂ by bisection.
#[derive(Debug, Clone, Default)]
pub struct AliMikhailHaqCopulaFactory {
    config: ToleranceConfig,
}

impl AliMikhailHaqCopulaFactory {
    /// Create a factory running with the given tolerances.
    pub fn new(config: ToleranceConfig) -> Self {
        Self { config }
    }

    /// θ with `AliMikhailHaqCopula::kendall_tau_for(θ) = tau`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when τ lies outside the attainable range
    /// [(5 - 8 ln 2)/3, 1/3].
    pub fn theta_from_tau(&self, tau: f64) -> StatsResult<f64> {
        const CONTEXT: &str = "AliMikhailHaqCopulaFactory";
        let lowest = AliMikhailHaqCopula::kendall_tau_for(-1.0);
        let highest = AliMikhailHaqCopula::kendall_tau_for(1.0);
        if !(lowest..=highest).contains(&tau) {
            return Err(StatsError::invalid_argument(
                CONTEXT,
                format!("Kendall's tau {tau} is outside the attainable range [{lowest}, {highest}]"),
            ));
        }
        let residual = |theta: f64| AliMikhailHaqCopula::kendall_tau_for(theta) - tau;
        Ok(bisect(residual, -1.0, 1.0, &self.config.bisection_options())?.root.clamp(-1.0, 1.0))
    }
}

impl DistributionFactory for AliMikhailHaqCopulaFactory {
    type Output = AliMikhailHaqCopula;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<AliMikhailHaqCopula> {
        const CONTEXT: &str = "AliMikhailHaqCopulaFactory";
        let theta = self.theta_from_tau(sample_kendall_tau(sample, CONTEXT)?)?;
        construct(CONTEXT, &[theta])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::distribution::{Copula, MultivariateDistribution};
    use crate::stats::error::ErrorKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn draw<C: MultivariateDistribution>(copula: &C, seed: u64) -> Sample {
        let mut rng = StdRng::seed_from_u64(seed);
        copula.sample_n(&mut rng, 4000)
    }

    #[test]
    fn test_closed_form_inversions() {
        assert!((ClaytonCopulaFactory.theta_from_tau(0.5).unwrap() - 2.0).abs() < 1e-15);
        assert!((GumbelCopulaFactory.theta_from_tau(0.5).unwrap() - 2.0).abs() < 1e-15);
        assert_eq!(ClaytonCopulaFactory.theta_from_tau(1.0).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(GumbelCopulaFactory.theta_from_tau(1.0).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_frank_inversion() {
        let factory = FrankCopulaFactory::default();
        for tau in [-0.8, -0.2, 0.0, 0.001, 0.3, 0.9] {
            let theta = factory.theta_from_tau(tau).unwrap();
            assert!((FrankCopula::kendall_tau_for(theta) - tau).abs() < 1e-10, "tau {tau}");
        }
        assert_eq!(factory.theta_from_tau(1.0).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(factory.theta_from_tau(-1.0).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_amh_inversion() {
        let factory = AliMikhailHaqCopulaFactory::default();
        for theta in [-1.0, -0.4, 0.2, 0.7, 1.0] {
            let tau = AliMikhailHaqCopula::kendall_tau_for(theta);
            assert!((factory.theta_from_tau(tau).unwrap() - theta).abs() < 1e-8);
        }
        assert!(factory.theta_from_tau(0.5).is_err());
    }

    #[test]
    fn test_factories_recover_copulas() {
        let clayton = ClaytonCopula::new(2.0).unwrap();
        let fitted = ClaytonCopulaFactory.build_from_sample(&draw(&clayton, 21)).unwrap();
        assert!((fitted.kendall_tau() - clayton.kendall_tau()).abs() < 0.05);

        let gumbel = GumbelCopula::new(1.5).unwrap();
        let fitted = GumbelCopulaFactory.build_from_sample(&draw(&gumbel, 22)).unwrap();
        assert!((fitted.kendall_tau() - gumbel.kendall_tau()).abs() < 0.05);

        let frank = FrankCopula::new(-4.0).unwrap();
        let fitted = FrankCopulaFactory::default().build_from_sample(&draw(&frank, 23)).unwrap();
        assert!((fitted.kendall_tau() - frank.kendall_tau()).abs() < 0.05);

        let amh = AliMikhailHaqCopula::new(0.6).unwrap();
        let fitted = AliMikhailHaqCopulaFactory::default().build_from_sample(&draw(&amh, 24)).unwrap();
        assert!((fitted.kendall_tau() - amh.kendall_tau()).abs() < 0.05);
    }

    #[test]
    fn test_copula_factory_sample_checks() {
        let univariate = Sample::from_values(&[0.1, 0.2]);
        let err = ClaytonCopulaFactory.build_from_sample(&univariate).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        // Perfect concordance
        let diagonal = Sample::from_rows(&[[0.1, 0.2], [0.3, 0.4], [0.5, 0.6]]).unwrap();
        let err = FrankCopulaFactory::default().build_from_sample(&diagonal).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        // Negative dependence is outside the Gumbel family
        let anti = Sample::from_rows(&[[0.1, 0.6], [0.3, 0.4], [0.5, 0.2]]).unwrap();
        let err = GumbelCopulaFactory.build_from_sample(&anti).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
