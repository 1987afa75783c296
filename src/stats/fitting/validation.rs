//! Sample checks shared by the factories.

use crate::stats::error::{StatsError, StatsResult};
use crate::stats::sample::Sample;

/// Require a non-empty sample of the given dimension.
pub(crate) fn check_sample(sample: &Sample, dimension: usize, context: &str) -> StatsResult<()> {
    if sample.is_empty() {
        return Err(StatsError::EmptySample {
            context: context.to_string(),
        });
    }
    if sample.dimension() != dimension {
        return Err(StatsError::DimensionMismatch {
            expected: dimension,
            got: sample.dimension(),
            context: format!("{context} sample"),
        });
    }
    Ok(())
}

/// Values of a non-empty one-dimensional sample.
pub(crate) fn univariate<'a>(sample: &'a Sample, context: &str) -> StatsResult<&'a [f64]> {
    check_sample(sample, 1, context)?;
    Ok(sample.as_flat())
}

/// Require every value to be an integer no smaller than `lower`, up to
/// `epsilon` relative to the value's magnitude.
pub(crate) fn check_integer_support(values: &[f64], lower: f64, epsilon: f64, context: &str) -> StatsResult<()> {
    for &x in values {
        let nearest = x.round();
        if !x.is_finite() || (x - nearest).abs() > epsilon * x.abs().max(1.0) || nearest < lower {
            return Err(StatsError::invalid_argument(
                context,
                format!("sample value {x} is not an integer >= {lower}"),
            ));
        }
    }
    Ok(())
}

/// Require every value to be strictly positive.
pub(crate) fn check_positive(values: &[f64], context: &str) -> StatsResult<()> {
    match values.iter().find(|&&x| !(x > 0.0 && x.is_finite())) {
        Some(x) => Err(StatsError::invalid_argument(
            context,
            format!("sample value {x} must be positive"),
        )),
        None => Ok(()),
    }
}

/// Lower bound estimate: the sample minimum pushed outward by
/// `|min| / (size + 2)`, so the sample lies strictly inside the fitted support
/// (unless the minimum is zero).
pub fn widen_lower(min: f64, size: usize) -> f64 {
    min - min.abs() / (size as f64 + 2.0)
}

/// Upper bound estimate: the sample maximum pushed outward by
/// `|max| / (size + 2)`.
pub fn widen_upper(max: f64, size: usize) -> f64 {
    max + max.abs() / (size as f64 + 2.0)
}
