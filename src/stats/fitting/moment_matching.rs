//! Moment-matching factories for continuous families.
//!
//! Each factory equates sample statistics (mean, standard deviation,
//! extremes, median) with their closed-form counterparts. Bound parameters
//! use the widened extremes of [`widen_lower`] and [`widen_upper`].

use super::validation::{check_positive, univariate, widen_lower, widen_upper};
use super::{construct, DistributionFactory};
use crate::optimize::scalar::{bisect, bracket_increasing};
use crate::stats::config::ToleranceConfig;
use crate::stats::continuous::special::{lgamma, EULER_MASCHERONI};
use crate::stats::continuous::{
    Arcsine, Beta, Chi, ChiSquared, Exponential, Gamma, Gumbel, InverseNormal, Laplace, LogUniform, Logistic,
    Normal, Rayleigh, Triangular, Uniform, Weibull,
};
use crate::stats::descriptive;
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::sample::Sample;
use log::debug;
use std::f64::consts::{PI, SQRT_2};

/// Require non-negative values.
fn check_non_negative(values: &[f64], context: &str) -> StatsResult<()> {
    match values.iter().find(|&&x| !(x >= 0.0 && x.is_finite())) {
        Some(x) => Err(StatsError::invalid_argument(
            context,
            format!("sample value {x} must be non-negative"),
        )),
        None => Ok(()),
    }
}

/// Uniform on the widened sample range.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformFactory;

impl DistributionFactory for UniformFactory {
    type Output = Uniform;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<Uniform> {
        const CONTEXT: &str = "UniformFactory";
        let x = univariate(sample, CONTEXT)?;
        let a = widen_lower(descriptive::min(x), x.len());
        let b = widen_upper(descriptive::max(x), x.len());
        construct(CONTEXT, &[a, b])
    }
}

/// Beta on the widened range with shapes matched to mean and variance.
#[derive(Debug, Clone, Copy, Default)]
pub struct BetaFactory;

impl DistributionFactory for BetaFactory {
    type Output = Beta;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<Beta> {
        const CONTEXT: &str = "BetaFactory";
        let x = univariate(sample, CONTEXT)?;
        let a = widen_lower(descriptive::min(x), x.len());
        let b = widen_upper(descriptive::max(x), x.len());
        let width = b - a;
        // Moments of the standardized variable (X - a) / (b - a)
        let m = (descriptive::mean(x) - a) / width;
        let v = descriptive::variance(x) / (width * width);
        let t = m * (1.0 - m) / v - 1.0;
        construct(CONTEXT, &[m * t, (1.0 - m) * t, a, b])
    }
}

/// Gamma with location at the widened minimum.
#[derive(Debug, Clone, Copy, Default)]
pub struct GammaFactory;

impl DistributionFactory for GammaFactory {
    type Output = Gamma;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<Gamma> {
        const CONTEXT: &str = "GammaFactory";
        let x = univariate(sample, CONTEXT)?;
        let gamma = widen_lower(descriptive::min(x), x.len());
        let shifted_mean = descriptive::mean(x) - gamma;
        let var = descriptive::variance(x);
        construct(CONTEXT, &[shifted_mean * shifted_mean / var, shifted_mean / var, gamma])
    }
}

/// Exponential with location at the widened minimum.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExponentialFactory;

impl DistributionFactory for ExponentialFactory {
    type Output = Exponential;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<Exponential> {
        const CONTEXT: &str = "ExponentialFactory";
        let x = univariate(sample, CONTEXT)?;
        let gamma = widen_lower(descriptive::min(x), x.len());
        let mean = descriptive::mean(x);
        if mean <= gamma {
            return Err(StatsError::invalid_argument(
                CONTEXT,
                format!("sample mean {mean} does not exceed the location estimate {gamma}"),
            ));
        }
        construct(CONTEXT, &[1.0 / (mean - gamma), gamma])
    }
}

/// Rayleigh with location at the widened minimum and σ matched to the mean.
#[derive(Debug, Clone, Copy, Default)]
pub struct RayleighFactory;

impl DistributionFactory for RayleighFactory {
    type Output = Rayleigh;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<Rayleigh> {
        const CONTEXT: &str = "RayleighFactory";
        let x = univariate(sample, CONTEXT)?;
        let gamma = widen_lower(descriptive::min(x), x.len());
        let sigma = (descriptive::mean(x) - gamma) / (0.5 * PI).sqrt();
        construct(CONTEXT, &[sigma, gamma])
    }
}

/// Weibull with location at the widened minimum; the shape solves the
/// coefficient-of-variation equation by bisection.
#[derive(Debug, Clone, Default)]
pub struct WeibullFactory {
    config: ToleranceConfig,
}

impl WeibullFactory {
    /// Create a factory running with the given tolerances.
    pub fn new(config: ToleranceConfig) -> Self {
        Self { config }
    }

    /// Coefficient of variation of a Weibull variable (above its location)
    /// with shape β.
    pub fn coefficient_of_variation(shape: f64) -> f64 {
        let ratio = (lgamma(1.0 + 2.0 / shape) - 2.0 * lgamma(1.0 + 1.0 / shape)).exp();
        (ratio - 1.0).sqrt()
    }
}

impl DistributionFactory for WeibullFactory {
    type Output = Weibull;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<Weibull> {
        const CONTEXT: &str = "WeibullFactory";
        let x = univariate(sample, CONTEXT)?;
        let gamma = widen_lower(descriptive::min(x), x.len());
        let shifted_mean = descriptive::mean(x) - gamma;
        let cv = descriptive::std_dev(x) / shifted_mean;
        if !(cv > 0.0 && cv.is_finite()) {
            return Err(StatsError::invalid_argument(
                CONTEXT,
                format!("coefficient of variation {cv} must be positive"),
            ));
        }

        // cv decreases with the shape: solve in log-shape
        let residual = |log_shape: f64| cv - Self::coefficient_of_variation(log_shape.exp());
        let options = self.config.bisection_options();
        let (lo, hi) = bracket_increasing(residual, 0.0, 1.0, &options)?;
        let log_shape = if lo == hi { lo } else { bisect(residual, lo, hi, &options)?.root };
        let shape = log_shape.exp();
        let scale = shifted_mean / lgamma(1.0 + 1.0 / shape).exp();
        debug!("{CONTEXT}: cv={cv} shape={shape} scale={scale}");
        construct(CONTEXT, &[scale, shape, gamma])
    }
}

/// Logistic with μ at the mean and β matched to the standard deviation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogisticFactory;

impl DistributionFactory for LogisticFactory {
    type Output = Logistic;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<Logistic> {
        const CONTEXT: &str = "LogisticFactory";
        let x = univariate(sample, CONTEXT)?;
        let beta = descriptive::std_dev(x) * 3f64.sqrt() / PI;
        construct(CONTEXT, &[descriptive::mean(x), beta])
    }
}

/// Laplace with μ at the median and λ the inverse mean absolute deviation
/// around it (the maximum likelihood estimate).
#[derive(Debug, Clone, Copy, Default)]
pub struct LaplaceFactory;

impl DistributionFactory for LaplaceFactory {
    type Output = Laplace;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<Laplace> {
        const CONTEXT: &str = "LaplaceFactory";
        let x = univariate(sample, CONTEXT)?;
        let mu = descriptive::median(x);
        let deviation = x.iter().map(|v| (v - mu).abs()).sum::<f64>() / x.len() as f64;
        construct(CONTEXT, &[mu, 1.0 / deviation])
    }
}

/// Log-uniform on the widened range of a positive sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogUniformFactory;

impl DistributionFactory for LogUniformFactory {
    type Output = LogUniform;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<LogUniform> {
        const CONTEXT: &str = "LogUniformFactory";
        let x = univariate(sample, CONTEXT)?;
        check_positive(x, CONTEXT)?;
        let a = widen_lower(descriptive::min(x), x.len());
        let b = widen_upper(descriptive::max(x), x.len());
        construct(CONTEXT, &[a.ln(), b.ln()])
    }
}

/// Triangular on the widened range with the mode matched to the mean.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriangularFactory;

impl DistributionFactory for TriangularFactory {
    type Output = Triangular;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<Triangular> {
        const CONTEXT: &str = "TriangularFactory";
        let x = univariate(sample, CONTEXT)?;
        let a = widen_lower(descriptive::min(x), x.len());
        let b = widen_upper(descriptive::max(x), x.len());
        // mean = (a + m + b) / 3
        let m = 3.0 * descriptive::mean(x) - a - b;
        construct(CONTEXT, &[a, m, b])
    }
}

/// Gumbel (maximum) matched to mean and standard deviation.
#[derive(Debug, Clone, Copy, Default)]
pub struct GumbelFactory;

impl DistributionFactory for GumbelFactory {
    type Output = Gumbel;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<Gumbel> {
        const CONTEXT: &str = "GumbelFactory";
        let x = univariate(sample, CONTEXT)?;
        let beta = descriptive::std_dev(x) * 6f64.sqrt() / PI;
        let gamma = descriptive::mean(x) - EULER_MASCHERONI * beta;
        construct(CONTEXT, &[beta, gamma])
    }
}

/// Arcsine centred on the mean, with half-width √2 standard deviations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArcsineFactory;

impl DistributionFactory for ArcsineFactory {
    type Output = Arcsine;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<Arcsine> {
        const CONTEXT: &str = "ArcsineFactory";
        let x = univariate(sample, CONTEXT)?;
        let mean = descriptive::mean(x);
        let half_width = SQRT_2 * descriptive::std_dev(x);
        construct(CONTEXT, &[mean - half_width, mean + half_width])
    }
}

/// Chi with ν = E[X²].
#[derive(Debug, Clone, Copy, Default)]
pub struct ChiFactory;

impl DistributionFactory for ChiFactory {
    type Output = Chi;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<Chi> {
        const CONTEXT: &str = "ChiFactory";
        let x = univariate(sample, CONTEXT)?;
        check_non_negative(x, CONTEXT)?;
        construct(CONTEXT, &[descriptive::raw_moment(x, 2)])
    }
}

/// Chi-squared with ν = E[X].
#[derive(Debug, Clone, Copy, Default)]
pub struct ChiSquaredFactory;

impl DistributionFactory for ChiSquaredFactory {
    type Output = ChiSquared;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<ChiSquared> {
        const CONTEXT: &str = "ChiSquaredFactory";
        let x = univariate(sample, CONTEXT)?;
        check_non_negative(x, CONTEXT)?;
        construct(CONTEXT, &[descriptive::mean(x)])
    }
}

/// Normal with μ the mean and σ the standard deviation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalFactory;

impl DistributionFactory for NormalFactory {
    type Output = Normal;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<Normal> {
        const CONTEXT: &str = "NormalFactory";
        let x = univariate(sample, CONTEXT)?;
        construct(CONTEXT, &[descriptive::mean(x), descriptive::std_dev(x)])
    }
}

/// Inverse Gaussian by maximum likelihood:
/// μ = mean, 1/λ = mean(1/x) - 1/μ.
#[derive(Debug, Clone, Copy, Default)]
pub struct InverseNormalFactory;

impl DistributionFactory for InverseNormalFactory {
    type Output = InverseNormal;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<InverseNormal> {
        const CONTEXT: &str = "InverseNormalFactory";
        let x = univariate(sample, CONTEXT)?;
        check_positive(x, CONTEXT)?;
        let mu = descriptive::mean(x);
        let excess = x.iter().map(|v| 1.0 / v - 1.0 / mu).sum::<f64>() / x.len() as f64;
        construct(CONTEXT, &[1.0 / excess, mu])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::distribution::Distribution;
    use crate::stats::error::ErrorKind;
    use crate::stats::parametric::Parametric;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const N: usize = 20_000;

    fn draw<D: Distribution>(dist: &D, seed: u64) -> Sample {
        let mut rng = StdRng::seed_from_u64(seed);
        dist.sample_n(&mut rng, N)
    }

    fn assert_close(estimate: &[f64], truth: &[f64], tol: f64) {
        for (e, t) in estimate.iter().zip(truth) {
            assert!(
                (e - t).abs() < tol * t.abs().max(1.0),
                "estimate {estimate:?} vs truth {truth:?}"
            );
        }
    }

    #[test]
    fn test_uniform_factory() {
        let u = UniformFactory.build_from_sample(&Sample::from_values(&[1.0, 2.0, 3.0])).unwrap();
        assert_close(&u.parameters(), &[0.8, 3.6], 1e-14);

        let err = UniformFactory.build_from_sample(&Sample::new(1)).unwrap_err();
        assert!(err.to_string().contains("empty sample"));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        // Widening leaves a constant zero sample degenerate
        let err = UniformFactory.build_from_sample(&Sample::from_values(&[0.0, 0.0])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_beta_factory() {
        let truth = Beta::new(2.0, 2.5, -1.0, 2.0).unwrap();
        let fitted = BetaFactory.build_from_sample(&draw(&truth, 1)).unwrap();
        assert_close(&fitted.parameters(), &truth.parameters(), 0.1);
    }

    #[test]
    fn test_gamma_and_exponential_factories() {
        let truth = Gamma::new(3.0, 2.0, 1.0).unwrap();
        let fitted = GammaFactory.build_from_sample(&draw(&truth, 2)).unwrap();
        assert_close(&fitted.parameters(), &truth.parameters(), 0.1);

        let truth = Exponential::new(1.5, -2.0).unwrap();
        let fitted = ExponentialFactory.build_from_sample(&draw(&truth, 3)).unwrap();
        assert_close(&fitted.parameters(), &truth.parameters(), 0.05);

        let err = ExponentialFactory.build_from_sample(&Sample::from_values(&[0.0])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_rayleigh_and_weibull_factories() {
        let truth = Rayleigh::new(2.0, 1.0).unwrap();
        let fitted = RayleighFactory.build_from_sample(&draw(&truth, 4)).unwrap();
        assert_close(&fitted.parameters(), &truth.parameters(), 0.05);

        let truth = Weibull::new(2.0, 1.7, 0.5).unwrap();
        let fitted = WeibullFactory::default().build_from_sample(&draw(&truth, 5)).unwrap();
        assert_close(&fitted.parameters(), &truth.parameters(), 0.1);
    }

    #[test]
    fn test_weibull_coefficient_of_variation() {
        // β = 1 is exponential: cv = 1
        assert!((WeibullFactory::coefficient_of_variation(1.0) - 1.0).abs() < 1e-12);
        // β = 2: cv = sqrt(4/π - 1)
        let expected = (4.0 / PI - 1.0).sqrt();
        assert!((WeibullFactory::coefficient_of_variation(2.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_location_scale_factories() {
        let truth = Logistic::new(1.0, 0.5).unwrap();
        let fitted = LogisticFactory.build_from_sample(&draw(&truth, 6)).unwrap();
        assert_close(&fitted.parameters(), &truth.parameters(), 0.05);

        let truth = Laplace::new(-1.0, 2.0).unwrap();
        let fitted = LaplaceFactory.build_from_sample(&draw(&truth, 7)).unwrap();
        assert_close(&fitted.parameters(), &truth.parameters(), 0.05);

        let truth = Gumbel::new(2.0, 3.0).unwrap();
        let fitted = GumbelFactory.build_from_sample(&draw(&truth, 8)).unwrap();
        assert_close(&fitted.parameters(), &truth.parameters(), 0.05);

        let truth = Normal::new(4.0, 0.5).unwrap();
        let fitted = NormalFactory.build_from_sample(&draw(&truth, 9)).unwrap();
        assert_close(&fitted.parameters(), &truth.parameters(), 0.05);
    }

    #[test]
    fn test_bounded_factories() {
        let truth = LogUniform::new(0.0, 2.0).unwrap();
        let fitted = LogUniformFactory.build_from_sample(&draw(&truth, 10)).unwrap();
        assert_close(&fitted.parameters(), &truth.parameters(), 0.05);
        assert!(LogUniformFactory.build_from_sample(&Sample::from_values(&[1.0, -1.0])).is_err());

        let truth = Triangular::new(-1.0, 0.5, 2.0).unwrap();
        let fitted = TriangularFactory.build_from_sample(&draw(&truth, 11)).unwrap();
        assert_close(&fitted.parameters(), &truth.parameters(), 0.1);

        let truth = Arcsine::new(-1.0, 3.0).unwrap();
        let fitted = ArcsineFactory.build_from_sample(&draw(&truth, 12)).unwrap();
        assert_close(&fitted.parameters(), &truth.parameters(), 0.05);
    }

    #[test]
    fn test_chi_factories() {
        let truth = Chi::new(3.0).unwrap();
        let fitted = ChiFactory.build_from_sample(&draw(&truth, 13)).unwrap();
        assert_close(&fitted.parameters(), &truth.parameters(), 0.05);

        let truth = ChiSquared::new(4.0).unwrap();
        let fitted = ChiSquaredFactory.build_from_sample(&draw(&truth, 14)).unwrap();
        assert_close(&fitted.parameters(), &truth.parameters(), 0.05);

        assert!(ChiSquaredFactory.build_from_sample(&Sample::from_values(&[-1.0])).is_err());
    }

    #[test]
    fn test_inverse_normal_factory() {
        let truth = InverseNormal::new(3.0, 1.5).unwrap();
        let fitted = InverseNormalFactory.build_from_sample(&draw(&truth, 15)).unwrap();
        assert_close(&fitted.parameters(), &truth.parameters(), 0.05);
    }

    #[test]
    fn test_dimension_mismatch() {
        let pairs = Sample::from_rows(&[[0.1, 0.2], [0.3, 0.4]]).unwrap();
        let err = NormalFactory.build_from_sample(&pairs).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
