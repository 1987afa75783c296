//! Estimation factories: turn a sample or a parameter vector into a
//! validated distribution.
//!
//! Every factory implements [`DistributionFactory`]. Factories are cheap
//! values; those driving an iterative estimator carry the
//! [`ToleranceConfig`](crate::stats::ToleranceConfig) they run with.
//!
//! ```
//! use estimr::stats::fitting::{DistributionFactory, PoissonFactory};
//! use estimr::stats::Sample;
//!
//! let sample = Sample::from_values(&[1.0, 2.0, 3.0]);
//! let poisson = PoissonFactory::default().build_from_sample(&sample).unwrap();
//! assert_eq!(poisson.lambda(), 2.0);
//! ```
//!
//! # Strategies
//!
//! - Moment matching: [`moment_matching`] factories plus Poisson and Geometric
//! - Integer hill climbing on the likelihood: [`BinomialFactory`]
//! - Newton-Raphson with a fixed-point fallback: [`DirichletFactory`]
//! - Inversion of Kendall's tau: the copula factories

mod copula;
mod dirichlet;
mod discrete;
pub mod moment_matching;
pub(crate) mod validation;

pub use copula::{AliMikhailHaqCopulaFactory, ClaytonCopulaFactory, FrankCopulaFactory, GumbelCopulaFactory};
pub use dirichlet::{DirichletFactory, DirichletFit, DirichletMethod};
pub use discrete::{BinomialFactory, BinomialSearch, GeometricFactory, PoissonFactory};
pub use moment_matching::{
    ArcsineFactory, BetaFactory, ChiFactory, ChiSquaredFactory, ExponentialFactory, GammaFactory, GumbelFactory,
    InverseNormalFactory, LaplaceFactory, LogUniformFactory, LogisticFactory, NormalFactory, RayleighFactory,
    TriangularFactory, UniformFactory, WeibullFactory,
};
pub use validation::{widen_lower, widen_upper};

use crate::stats::error::{StatsError, StatsResult};
use crate::stats::parametric::Parametric;
use crate::stats::sample::Sample;

/// A fitted distribution with the optional covariance of its parameter
/// estimator.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate<D> {
    /// The fitted distribution
    pub distribution: D,
    /// Asymptotic covariance of the parameter estimator, in parameter order
    pub parameter_covariance: Option<Vec<Vec<f64>>>,
}

/// Build distributions of one family from samples, parameters or defaults.
pub trait DistributionFactory {
    /// The family this factory produces.
    type Output: Parametric + Default;

    /// Estimate the family's parameters from a sample.
    ///
    /// # Errors
    ///
    /// Fails with an `InvalidArgument` kind error on an empty sample, a sample
    /// of the wrong dimension, values outside the family's domain or an
    /// estimate the family rejects.
    fn build_from_sample(&self, sample: &Sample) -> StatsResult<Self::Output>;

    /// Build from an explicit parameter vector.
    fn build_from_parameters(&self, parameters: &[f64]) -> StatsResult<Self::Output> {
        Self::Output::from_parameters(parameters)
    }

    /// The family's default distribution.
    fn build_default(&self) -> Self::Output {
        Self::Output::default()
    }

    /// Estimate from a sample, with the estimator covariance when known.
    fn build_estimate(&self, sample: &Sample) -> StatsResult<Estimate<Self::Output>> {
        Ok(Estimate {
            distribution: self.build_from_sample(sample)?,
            parameter_covariance: None,
        })
    }
}

/// Construct a distribution from estimated parameters, attaching the
/// estimate to any rejection.
pub(crate) fn construct<D: Parametric>(context: &str, parameters: &[f64]) -> StatsResult<D> {
    D::from_parameters(parameters).map_err(|source| StatsError::Estimation {
        context: format!("{context}: estimated parameters {parameters:?}"),
        source: Box::new(source),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::error::ErrorKind;
    use crate::stats::{Family, Uniform};

    #[test]
    fn test_construct_wraps_rejection() {
        let err = construct::<Uniform>("UniformFactory", &[2.0, 1.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("UniformFactory"));
        assert!(err.to_string().contains("[2.0, 1.0]"));
    }

    #[test]
    fn test_default_methods() {
        let factory = UniformFactory;
        let u = factory.build_from_parameters(&[-1.0, 3.0]).unwrap();
        assert_eq!(u.descriptor().family, Family::Uniform);
        assert_eq!(u.parameters(), vec![-1.0, 3.0]);
        assert_eq!(factory.build_default(), Uniform::default());

        let err = factory.build_from_parameters(&[3.0, -1.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DomainError);

        let estimate = factory.build_estimate(&Sample::from_values(&[1.0, 2.0])).unwrap();
        assert!(estimate.parameter_covariance.is_none());
    }
}
