//! Root finding algorithms for scalar functions.

use super::{RootResult, ScalarOptions};
use crate::optimize::error::{OptimizeError, OptimizeResult};

/// Bisection method for root finding.
///
/// # Arguments
/// * `f` - Function to find root of
/// * `a` - Left bracket endpoint
/// * `b` - Right bracket endpoint
/// * `options` - Solver options
///
/// # Returns
/// Root of `f` in interval [a, b]
///
/// # Errors
/// * `InvalidInterval` if a >= b
/// * `SameSignBracket` if f(a) and f(b) have same sign
/// * `DidNotConverge` if iterations exceed max_iter
///
/// # Note
/// Bisection is slow (linear convergence) but very robust.
pub fn bisect<F>(f: F, a: f64, b: f64, options: &ScalarOptions) -> OptimizeResult<RootResult>
where
    F: Fn(f64) -> f64,
{
    if a >= b || a.is_nan() || b.is_nan() {
        return Err(OptimizeError::InvalidInterval {
            a,
            b,
            context: "bisect".to_string(),
        });
    }

    let fa = f(a);
    let fb = f(b);

    if fa.is_nan() || fb.is_nan() {
        return Err(OptimizeError::NumericalError {
            message: format!("bisect: function is NaN at bracket [{}, {}]", a, b),
        });
    }

    if (fa > 0.0 && fb > 0.0) || (fa < 0.0 && fb < 0.0) {
        return Err(OptimizeError::SameSignBracket {
            fa,
            fb,
            context: "bisect".to_string(),
        });
    }

    let mut left = a;
    let mut right = b;
    let mut f_left = fa;

    for iter in 0..options.max_iter {
        let mid = 0.5 * (left + right);
        let f_mid = f(mid);

        let width = right - left;
        if width.abs() < options.tol
            || width.abs() / mid.abs().max(1.0) < options.rtol
            || f_mid == 0.0
        {
            return Ok(RootResult {
                root: mid,
                function_value: f_mid,
                iterations: iter + 1,
                bracket_width: width,
            });
        }

        if (f_mid > 0.0 && f_left > 0.0) || (f_mid < 0.0 && f_left < 0.0) {
            left = mid;
            f_left = f_mid;
        } else {
            right = mid;
        }
    }

    Err(OptimizeError::DidNotConverge {
        iterations: options.max_iter,
        tolerance: options.tol,
        context: "bisect".to_string(),
    })
}

/// Find a bracket around the root of a nondecreasing function.
///
/// Starting from `x0`, a step of size `step` is doubled outward in the
/// direction of the root (up when `f(x0) < 0`, down when `f(x0) > 0`) until
/// the function changes sign. The returned `(lower, upper)` satisfies
/// `f(lower) <= 0 <= f(upper)`.
///
/// # Errors
/// * `InvalidInterval` if `step` is not positive
/// * `BracketNotFound` if no sign change appears within `max_iter` doublings
pub fn bracket_increasing<F>(
    f: F,
    x0: f64,
    step: f64,
    options: &ScalarOptions,
) -> OptimizeResult<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    if step <= 0.0 || !step.is_finite() || !x0.is_finite() {
        return Err(OptimizeError::InvalidInterval {
            a: x0,
            b: x0 + step,
            context: "bracket_increasing".to_string(),
        });
    }

    let f0 = f(x0);
    if f0 == 0.0 {
        return Ok((x0, x0));
    }

    let mut step = step;
    let mut anchor = x0;
    for _ in 0..options.max_iter {
        if f0 < 0.0 {
            let upper = anchor + step;
            if f(upper) >= 0.0 {
                return Ok((anchor, upper));
            }
            anchor = upper;
        } else {
            let lower = anchor - step;
            if f(lower) <= 0.0 {
                return Ok((lower, anchor));
            }
            anchor = lower;
        }
        step *= 2.0;
    }

    let (lower, upper) = if f0 < 0.0 { (x0, anchor) } else { (anchor, x0) };
    Err(OptimizeError::BracketNotFound {
        lower,
        upper,
        context: "bracket_increasing".to_string(),
    })
}
