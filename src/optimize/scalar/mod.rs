//! Scalar (1D) root finding.
//!
//! Root finding methods require a function `f: (f64) -> f64`. Bracketing methods
//! require an interval [a, b] where f(a)*f(b) <= 0; [`bracket_increasing`] finds
//! such an interval for monotone functions by doubling a step outward.

mod root_finding;

pub use root_finding::{bisect, bracket_increasing};

/// Options for scalar root finding.
#[derive(Debug, Clone)]
pub struct ScalarOptions {
    /// Maximum number of iterations
    pub max_iter: usize,
    /// Absolute tolerance for convergence (bracket width)
    pub tol: f64,
    /// Relative tolerance for convergence (width of interval relative to the midpoint)
    pub rtol: f64,
}

impl Default for ScalarOptions {
    fn default() -> Self {
        Self {
            max_iter: 100,
            tol: 1e-12,
            rtol: 1e-12,
        }
    }
}

/// Result from a root finding method.
#[derive(Debug, Clone)]
pub struct RootResult {
    /// The root found
    pub root: f64,
    /// Function value at root
    pub function_value: f64,
    /// Number of iterations used
    pub iterations: usize,
    /// Final bracket width (for bracketing methods)
    pub bracket_width: f64,
}
