//! Root finding used by the numerical fallbacks and estimators.
//!
//! # Modules
//!
//! - [`scalar`] - Univariate (1D) bisection and bracket expansion
//!
//! # Quick Start
//!
//! ```
//! use estimr::optimize::scalar::{bisect, ScalarOptions};
//!
//! // Find root of f(x) = x^2 - 4 in [1, 3]
//! let result = bisect(|x| x * x - 4.0, 1.0, 3.0, &ScalarOptions::default()).unwrap();
//! assert!((result.root - 2.0).abs() < 1e-10);
//! ```

pub mod error;
pub mod scalar;
pub(crate) mod utils;

pub use error::{OptimizeError, OptimizeResult};
