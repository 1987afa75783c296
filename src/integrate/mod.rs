//! Numerical integration for estimr.
//!
//! Gauss-Legendre quadrature on finite intervals, extended to semi-infinite and
//! infinite ranges through rational changes of variable. The distribution
//! fallbacks (moments, characteristic function, copula rank correlations) are
//! built on these routines.
//!
//! - [`GaussLegendreQuadrature`] - Reusable nodes and weights of a given order
//!
//! # Example
//!
//! ```
//! use estimr::integrate::GaussLegendreQuadrature;
//!
//! // Integrate f(x) = x^2 from 0 to 1
//! let integral: f64 = GaussLegendreQuadrature::new(5).integrate(|x| x * x, 0.0, 1.0);
//! assert!((integral - 1.0 / 3.0).abs() < 1e-12);
//! ```

mod quadrature;

pub use quadrature::GaussLegendreQuadrature;
