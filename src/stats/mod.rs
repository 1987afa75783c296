//! Parametric probability distributions and the factories that estimate them.
//!
//! # Distributions
//!
//! Univariate families implement [`Distribution`]. Every family supplies its
//! support, density and CDF; quantiles, the density derivative, the
//! characteristic function and the moments have numerical defaults (see
//! [`numerical`]) that families override with closed forms where one exists.
//!
//! ```
//! use estimr::stats::{Distribution, Gamma};
//!
//! let g = Gamma::new(2.0, 1.5, 0.0).unwrap();
//! let x = g.ppf(0.9).unwrap();
//! assert!((g.cdf(x) - 0.9).abs() < 1e-10);
//! ```
//!
//! Multivariate families implement [`MultivariateDistribution`]; bivariate
//! copulas additionally implement [`Copula`].
//!
//! # Estimation
//!
//! [`fitting`] holds one [`DistributionFactory`](fitting::DistributionFactory)
//! per estimable family:
//!
//! ```
//! use estimr::stats::fitting::{DistributionFactory, GeometricFactory};
//! use estimr::stats::Sample;
//!
//! let sample = Sample::from_values(&[1.0, 1.0, 2.0, 2.0, 2.0]);
//! let g = GeometricFactory::default().build_from_sample(&sample).unwrap();
//! assert_eq!(g.p(), 0.625);
//! ```
//!
//! # Parameters
//!
//! [`Parametric`] gives uniform access to a family's parameter vector, and
//! [`ParameterDescriptor`] pairs it with a [`Family`] tag for persistence.

// Core modules
mod config;
mod continuous;
mod copula;
mod discrete;
mod distribution;
mod error;
mod memo;
mod parametric;
mod sample;

// Public submodules
pub mod descriptive;
pub mod fitting;
pub mod numerical;

// Public API: Distribution traits and types
pub use config::ToleranceConfig;
pub use distribution::{Copula, Distribution, MultivariateDistribution, Support};
pub use error::{ErrorKind, StatsError, StatsResult};
pub use memo::Memoized;
pub use parametric::{Family, ParameterDescriptor, Parametric};
pub use sample::Sample;

// Public API: Continuous distributions
pub use continuous::{
    Arcsine, Beta, Burr, Chi, ChiSquared, Dirichlet, Exponential, FisherSnedecor, Gamma, Gumbel, InverseNormal,
    Laplace, LogNormal, LogUniform, Logistic, NonCentralChiSquared, NonCentralStudentT, Normal, Rayleigh, Rice,
    Triangular, TruncatedNormal, Uniform, Weibull,
};

// Public API: Discrete distributions
pub use discrete::{Binomial, Geometric, Poisson};

// Public API: Copulas
pub use copula::{AliMikhailHaqCopula, ClaytonCopula, FrankCopula, GumbelCopula};
