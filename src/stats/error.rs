//! Error types for statistical operations.

use crate::optimize::OptimizeError;
use std::fmt;

/// Result type for statistics operations.
pub type StatsResult<T> = Result<T, StatsError>;

/// Errors that can occur during statistical operations.
#[derive(Debug, Clone)]
pub enum StatsError {
    /// Invalid parameter value for a distribution.
    InvalidParameter {
        name: String,
        value: f64,
        reason: String,
    },

    /// Malformed input to an operation (sample values outside the family's
    /// domain, degenerate rank correlation, degenerate derived bound).
    InvalidArgument { context: String, reason: String },

    /// A sample was empty where at least one point is required.
    EmptySample { context: String },

    /// Sample or point dimension does not match what the operation expects.
    DimensionMismatch {
        expected: usize,
        got: usize,
        context: String,
    },

    /// Probability value out of the open interval (0, 1).
    InvalidProbability { value: f64 },

    /// Numerical computation failed.
    NumericalError { message: String },

    /// Iterative method did not converge.
    ConvergenceError { iterations: usize, context: String },

    /// A factory produced parameters that the family rejected.
    Estimation {
        context: String,
        source: Box<StatsError>,
    },
}

/// Coarse classification of [`StatsError`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input supplied by the caller.
    InvalidArgument,
    /// Explicit parameters violate a family's validity predicate.
    DomainError,
    /// An iterative estimator exhausted its iteration budget.
    NumericalConvergenceFailure,
    /// Any other numerical breakdown.
    Numerical,
}

impl StatsError {
    /// Shorthand for [`StatsError::InvalidParameter`].
    pub fn invalid_parameter(name: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`StatsError::InvalidArgument`].
    pub fn invalid_argument(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Classify the error.
    ///
    /// A factory that wraps an `InvalidParameter` reports `InvalidArgument`:
    /// the caller supplied a sample, not the rejected parameters.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter { .. } => ErrorKind::DomainError,
            Self::InvalidArgument { .. }
            | Self::EmptySample { .. }
            | Self::DimensionMismatch { .. }
            | Self::InvalidProbability { .. } => ErrorKind::InvalidArgument,
            Self::ConvergenceError { .. } => ErrorKind::NumericalConvergenceFailure,
            Self::NumericalError { .. } => ErrorKind::Numerical,
            Self::Estimation { source, .. } => match source.kind() {
                ErrorKind::DomainError => ErrorKind::InvalidArgument,
                kind => kind,
            },
        }
    }
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                name,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{}' = {}: {}", name, value, reason)
            }
            Self::InvalidArgument { context, reason } => {
                write!(f, "Invalid argument in {}: {}", context, reason)
            }
            Self::EmptySample { context } => {
                write!(f, "{}: cannot build from an empty sample", context)
            }
            Self::DimensionMismatch {
                expected,
                got,
                context,
            } => {
                write!(
                    f,
                    "Dimension mismatch in {}: expected {}, got {}",
                    context, expected, got
                )
            }
            Self::InvalidProbability { value } => {
                write!(f, "Invalid probability {}: must be in (0, 1)", value)
            }
            Self::NumericalError { message } => {
                write!(f, "Numerical error: {}", message)
            }
            Self::ConvergenceError {
                iterations,
                context,
            } => {
                write!(
                    f,
                    "{} did not converge after {} iterations",
                    context, iterations
                )
            }
            Self::Estimation { context, source } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for StatsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Estimation { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<OptimizeError> for StatsError {
    fn from(err: OptimizeError) -> Self {
        match err {
            OptimizeError::DidNotConverge {
                iterations,
                context,
                ..
            } => Self::ConvergenceError {
                iterations,
                context,
            },
            OptimizeError::BracketNotFound { ref context, .. } => Self::ConvergenceError {
                iterations: 0,
                context: format!("{} ({})", context, err),
            },
            other => Self::NumericalError {
                message: other.to_string(),
            },
        }
    }
}
