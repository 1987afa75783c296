//! Discrete probability distributions.
//!
//! Discrete families implement [`Distribution`](crate::stats::Distribution)
//! with `pdf` returning the probability mass at integer points and `cdf`
//! evaluated at the floor of its argument.

mod binomial;
mod geometric;
mod poisson;

pub use binomial::Binomial;
pub use geometric::Geometric;
pub use poisson::Poisson;

use crate::stats::distribution::check_probability;
use crate::stats::error::StatsResult;

/// Helper for computing log-binomial coefficients.
pub(crate) fn log_binom(n: u64, k: u64) -> f64 {
    use super::continuous::special::lgamma;

    if k > n {
        return f64::NEG_INFINITY;
    }
    if k == 0 || k == n {
        return 0.0;
    }

    let n_f = n as f64;
    let k_f = k as f64;

    lgamma(n_f + 1.0) - lgamma(k_f + 1.0) - lgamma(n_f - k_f + 1.0)
}

/// The non-negative integer `x` represents, if any.
pub(crate) fn as_count(x: f64) -> Option<u64> {
    if x >= 0.0 && x.fract() == 0.0 && x < u64::MAX as f64 {
        Some(x as u64)
    } else {
        None
    }
}

/// Index of the largest count not above `x`, or `None` below zero.
pub(crate) fn floor_count(x: f64) -> Option<u64> {
    if x < 0.0 || x.is_nan() {
        None
    } else if x >= u64::MAX as f64 {
        Some(u64::MAX)
    } else {
        Some(x.floor() as u64)
    }
}

/// Smallest k in [lower, upper] with `reached(k)`, for a predicate that is
/// monotone in k. The bracket grows geometrically from `lower` when `upper`
/// is unbounded.
pub(crate) fn integer_search<F>(lower: u64, upper: Option<u64>, reached: F) -> u64
where
    F: Fn(u64) -> bool,
{
    let mut lo = lower;
    let mut hi = match upper {
        Some(hi) => hi,
        None => {
            let mut step = 1u64;
            let mut hi = lower;
            while !reached(hi) {
                lo = hi + 1;
                hi = hi.saturating_add(step);
                step = step.saturating_mul(2);
                if hi == u64::MAX {
                    break;
                }
            }
            hi
        }
    };

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if reached(mid) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

/// Integer quantile: smallest k with CDF(k) >= p.
pub(crate) fn discrete_ppf<F>(p: f64, lower: u64, upper: Option<u64>, cdf: F) -> StatsResult<f64>
where
    F: Fn(u64) -> f64,
{
    check_probability(p)?;
    Ok(integer_search(lower, upper, |k| cdf(k) >= p) as f64)
}

/// Integer tail quantile: smallest k with SF(k) <= p.
pub(crate) fn discrete_isf<F>(p: f64, lower: u64, upper: Option<u64>, sf: F) -> StatsResult<f64>
where
    F: Fn(u64) -> f64,
{
    check_probability(p)?;
    Ok(integer_search(lower, upper, |k| sf(k) <= p) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_binom() {
        // C(5, 2) = 10
        assert!((log_binom(5, 2).exp() - 10.0).abs() < 1e-10);

        // C(10, 5) = 252
        assert!((log_binom(10, 5).exp() - 252.0).abs() < 1e-6);

        // Edge cases
        assert!((log_binom(5, 0) - 0.0).abs() < 1e-10); // C(n,0) = 1
        assert!((log_binom(5, 5) - 0.0).abs() < 1e-10); // C(n,n) = 1
        assert!(log_binom(3, 5).is_infinite()); // k > n
    }

    #[test]
    fn test_count_conversion() {
        assert_eq!(as_count(3.0), Some(3));
        assert_eq!(as_count(0.0), Some(0));
        assert_eq!(as_count(2.5), None);
        assert_eq!(as_count(-1.0), None);
        assert_eq!(as_count(f64::NAN), None);

        assert_eq!(floor_count(2.7), Some(2));
        assert_eq!(floor_count(-0.1), None);
    }

    #[test]
    fn test_integer_search() {
        assert_eq!(integer_search(0, Some(100), |k| k >= 37), 37);
        assert_eq!(integer_search(0, None, |k| k >= 1000), 1000);
        assert_eq!(integer_search(5, None, |k| k >= 2), 5);
        assert_eq!(integer_search(1, None, |k| k >= 1), 1);
    }
}
