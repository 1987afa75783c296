//! estimr - Parametric distributions and estimation factories
//!
//! estimr evaluates parametric probability distributions (density, CDF,
//! quantile, characteristic function, moments, sampling) and fits them to
//! data. Closed forms are used wherever a family has one; everything else
//! falls back to generic numerical routines driven by an explicit
//! [`ToleranceConfig`](stats::ToleranceConfig).
//!
//! # Modules
//!
//! - [`stats`] - Distribution contracts, families, sample statistics and factories
//! - [`optimize`] - Scalar root finding (bisection, bracket expansion)
//! - [`integrate`] - Gauss-Legendre quadrature on finite and infinite ranges
//!
//! # Example
//!
//! ```
//! use estimr::stats::fitting::{DistributionFactory, NormalFactory};
//! use estimr::stats::{Distribution, Normal, Sample};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let truth = Normal::new(3.0, 2.0).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//! let sample = truth.sample_n(&mut rng, 10_000);
//!
//! let fitted = NormalFactory.build_from_sample(&sample).unwrap();
//! assert!((fitted.mu() - 3.0).abs() < 0.1);
//! assert!((fitted.sigma() - 2.0).abs() < 0.1);
//! ```
//!
//! # Logging
//!
//! Iterative estimators report progress through the [`log`] facade; install
//! any logger to see it.

pub mod integrate;
pub mod optimize;
pub mod stats;

pub use optimize::{OptimizeError, OptimizeResult};
pub use stats::{Distribution, MultivariateDistribution, Sample, StatsError, StatsResult};
