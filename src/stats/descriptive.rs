//! Descriptive statistics over one-dimensional data.
//!
//! Pure functions over slices; they never reorder the caller's data. Empty
//! input yields `NaN` for every location or dispersion statistic, so callers
//! that need an error validate the sample first.

use crate::stats::distribution::Distribution;
use std::cmp::Ordering;

/// Arithmetic mean.
pub fn mean(x: &[f64]) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    x.iter().sum::<f64>() / x.len() as f64
}

/// Unbiased sample variance (divides by n - 1). A single point has variance 0.
pub fn variance(x: &[f64]) -> f64 {
    match x.len() {
        0 => f64::NAN,
        1 => 0.0,
        n => {
            let m = mean(x);
            x.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (n - 1) as f64
        }
    }
}

/// Sample standard deviation (square root of the unbiased variance).
pub fn std_dev(x: &[f64]) -> f64 {
    variance(x).sqrt()
}

/// Smallest value.
pub fn min(x: &[f64]) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    x.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Largest value.
pub fn max(x: &[f64]) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    x.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn sorted(x: &[f64]) -> Vec<f64> {
    let mut v = x.to_vec();
    v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    v
}

/// Empirical quantile with linear interpolation between order statistics.
///
/// `p` is clamped to [0, 1].
pub fn quantile(x: &[f64], p: f64) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    let v = sorted(x);
    let h = p.clamp(0.0, 1.0) * (v.len() - 1) as f64;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    v[lo] + (h - lo as f64) * (v[hi] - v[lo])
}

/// Median: middle order statistic, or the mean of the two middle ones.
pub fn median(x: &[f64]) -> f64 {
    quantile(x, 0.5)
}

/// Raw moment E[X^k].
pub fn raw_moment(x: &[f64], k: i32) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    x.iter().map(|v| v.powi(k)).sum::<f64>() / x.len() as f64
}

/// Central moment E[(X - mean)^k] (biased, divides by n).
pub fn central_moment(x: &[f64], k: i32) -> f64 {
    let m = mean(x);
    if m.is_nan() {
        return f64::NAN;
    }
    x.iter().map(|v| (v - m).powi(k)).sum::<f64>() / x.len() as f64
}

/// Sample skewness (Fisher's moment coefficient).
pub fn skewness(x: &[f64]) -> f64 {
    let m2 = central_moment(x, 2);
    central_moment(x, 3) / m2.powf(1.5)
}

/// Sample excess kurtosis.
pub fn kurtosis(x: &[f64]) -> f64 {
    let m2 = central_moment(x, 2);
    central_moment(x, 4) / (m2 * m2) - 3.0
}

/// Mean of ln(x). Non-positive values give `-inf` or `NaN`.
pub fn mean_log(x: &[f64]) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    x.iter().map(|v| v.ln()).sum::<f64>() / x.len() as f64
}

/// 1-based ranks, ties receiving the average of the ranks they span.
pub fn ranks(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| x[i].partial_cmp(&x[j]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && x[order[end]] == x[order[start]] {
            end += 1;
        }
        // Positions start..end share the average of ranks start+1..=end
        let rank = 0.5 * ((start + 1) + end) as f64;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }
    ranks
}

/// Pearson correlation coefficient.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return f64::NAN;
    }
    let (mx, my) = (mean(&x[..n]), mean(&y[..n]));
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y) {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    sxy / (sxx * syy).sqrt()
}

/// Spearman's rank correlation: Pearson correlation of the average ranks.
pub fn spearman_rho(x: &[f64], y: &[f64]) -> f64 {
    pearson(&ranks(x), &ranks(y))
}

/// Kendall's tau-b with tie correction, computed in O(n log n) (Knight's
/// algorithm: sort by (x, y), then count discordant pairs with a merge sort
/// on y).
pub fn kendall_tau(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return f64::NAN;
    }

    let mut pairs: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).take(n).collect();
    pairs.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(Ordering::Equal)
            .then(a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
    });

    let n_pairs = (n * (n - 1) / 2) as f64;
    let tied_x = tied_pairs(pairs.iter().map(|p| p.0));
    let tied_xy = tied_pairs_joint(&pairs);

    let mut ys: Vec<f64> = pairs.iter().map(|p| p.1).collect();
    let mut buffer = vec![0.0; n];
    let swaps = merge_count(&mut ys, &mut buffer) as f64;
    let tied_y = tied_pairs(ys.iter().copied());

    let numerator = n_pairs - tied_x - tied_y + tied_xy - 2.0 * swaps;
    let denominator = ((n_pairs - tied_x) * (n_pairs - tied_y)).sqrt();
    if denominator == 0.0 {
        return f64::NAN;
    }
    numerator / denominator
}

/// Number of tied pairs in an already sorted sequence.
fn tied_pairs<I: Iterator<Item = f64>>(sorted: I) -> f64 {
    let mut total = 0.0;
    let mut run = 0u64;
    let mut prev: Option<f64> = None;
    for v in sorted {
        if prev == Some(v) {
            run += 1;
        } else {
            total += (run * (run + 1) / 2) as f64;
            run = 0;
        }
        prev = Some(v);
    }
    total + (run * (run + 1) / 2) as f64
}

fn tied_pairs_joint(sorted: &[(f64, f64)]) -> f64 {
    let mut total = 0.0;
    let mut run = 0u64;
    for w in sorted.windows(2) {
        if w[0] == w[1] {
            run += 1;
        } else {
            total += (run * (run + 1) / 2) as f64;
            run = 0;
        }
    }
    total + (run * (run + 1) / 2) as f64
}

/// Stable merge sort of `v`, returning the number of inversions.
fn merge_count(v: &mut [f64], buffer: &mut [f64]) -> u64 {
    let n = v.len();
    if n < 2 {
        return 0;
    }
    let mid = n / 2;
    let mut swaps = {
        let (left, right) = v.split_at_mut(mid);
        let (buf_left, buf_right) = buffer.split_at_mut(mid);
        merge_count(left, buf_left) + merge_count(right, buf_right)
    };

    let (mut i, mut j, mut k) = (0, mid, 0);
    while i < mid && j < n {
        if v[j] < v[i] {
            buffer[k] = v[j];
            swaps += (mid - i) as u64;
            j += 1;
        } else {
            buffer[k] = v[i];
            i += 1;
        }
        k += 1;
    }
    buffer[k..k + mid - i].copy_from_slice(&v[i..mid]);
    k += mid - i;
    buffer[k..k + n - j].copy_from_slice(&v[j..n]);
    v.copy_from_slice(&buffer[..n]);
    swaps
}

/// Sample log-likelihood `Σ log pdf(x_i)` under a univariate distribution.
pub fn log_likelihood<D: Distribution + ?Sized>(dist: &D, x: &[f64]) -> f64 {
    x.iter().map(|&v| dist.log_pdf(v)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_and_dispersion() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((mean(&x) - 3.0).abs() < 1e-15);
        assert!((variance(&x) - 2.5).abs() < 1e-15);
        assert!((std_dev(&x) - 2.5_f64.sqrt()).abs() < 1e-15);
        assert_eq!(min(&x), 1.0);
        assert_eq!(max(&x), 5.0);
        assert_eq!(median(&x), 3.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert!((quantile(&x, 0.25) - 2.0).abs() < 1e-15);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_shape_statistics() {
        let symmetric = [-2.0, -1.0, 0.0, 1.0, 2.0];
        assert!(skewness(&symmetric).abs() < 1e-15);
        assert!((raw_moment(&symmetric, 2) - 2.0).abs() < 1e-15);
        // Uniform-like data has negative excess kurtosis
        assert!(kurtosis(&symmetric) < 0.0);
    }

    #[test]
    fn test_ranks_with_ties() {
        let r = ranks(&[10.0, 20.0, 10.0, 30.0]);
        assert_eq!(r, vec![1.5, 3.0, 1.5, 4.0]);
    }

    #[test]
    fn test_kendall_tau_perfect_and_reversed() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0];
        assert!((kendall_tau(&x, &y) - 1.0).abs() < 1e-15);
        let y_rev: Vec<f64> = y.iter().rev().copied().collect();
        assert!((kendall_tau(&x, &y_rev) + 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_kendall_tau_matches_quadratic_count() {
        let x = [1.0, 2.0, 2.0, 3.0, 4.0, 5.0, 5.0, 6.0];
        let y = [3.0, 1.0, 2.0, 2.0, 6.0, 4.0, 5.0, 5.0];

        let mut concordant = 0.0;
        let mut discordant = 0.0;
        let mut ties_x = 0.0;
        let mut ties_y = 0.0;
        for i in 0..x.len() {
            for j in (i + 1)..x.len() {
                let s = (x[i] - x[j]) * (y[i] - y[j]);
                if x[i] == x[j] {
                    ties_x += 1.0;
                }
                if y[i] == y[j] {
                    ties_y += 1.0;
                }
                if s > 0.0 {
                    concordant += 1.0;
                } else if s < 0.0 {
                    discordant += 1.0;
                }
            }
        }
        let n0: f64 = 28.0;
        let expected = (concordant - discordant) / ((n0 - ties_x) * (n0 - ties_y)).sqrt();
        assert!((kendall_tau(&x, &y) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_spearman_monotone() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [1.0, 8.0, 27.0, 64.0];
        assert!((spearman_rho(&x, &y) - 1.0).abs() < 1e-15);
    }
}
