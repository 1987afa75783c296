//! Error types for root finding.

use std::fmt;

/// Result type for optimization operations.
pub type OptimizeResult<T> = Result<T, OptimizeError>;

/// Errors that can occur while solving for a root.
#[derive(Debug, Clone)]
pub enum OptimizeError {
    /// The solver did not converge within the maximum iterations.
    DidNotConverge {
        iterations: usize,
        tolerance: f64,
        context: String,
    },

    /// Invalid interval provided (e.g., for bracketing methods).
    InvalidInterval { a: f64, b: f64, context: String },

    /// Function has the same sign at both bracket endpoints.
    SameSignBracket { fa: f64, fb: f64, context: String },

    /// No sign change was found while expanding a bracket outward.
    BracketNotFound {
        lower: f64,
        upper: f64,
        context: String,
    },

    /// Numerical computation failed (e.g., non-finite function value).
    NumericalError { message: String },
}

impl fmt::Display for OptimizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DidNotConverge {
                iterations,
                tolerance,
                context,
            } => {
                write!(
                    f,
                    "{}: did not converge after {} iterations (tolerance: {})",
                    context, iterations, tolerance
                )
            }
            Self::InvalidInterval { a, b, context } => {
                write!(
                    f,
                    "Invalid interval [{}, {}] in {}: bounds must satisfy a < b",
                    a, b, context
                )
            }
            Self::SameSignBracket { fa, fb, context } => {
                write!(
                    f,
                    "Function has same sign at bracket endpoints in {}: f(a)={}, f(b)={}",
                    context, fa, fb
                )
            }
            Self::BracketNotFound {
                lower,
                upper,
                context,
            } => {
                write!(
                    f,
                    "{}: no sign change found while expanding the bracket to [{}, {}]",
                    context, lower, upper
                )
            }
            Self::NumericalError { message } => {
                write!(f, "Numerical error: {}", message)
            }
        }
    }
}

impl std::error::Error for OptimizeError {}
