//! Generic numerical fallbacks behind the [`Distribution`] defaults.
//!
//! Each function works for any implementor and takes the tolerances it runs
//! with explicitly, so callers can trade accuracy for speed without touching
//! the distribution itself.

use crate::integrate::GaussLegendreQuadrature;
use crate::optimize::scalar::bracket_increasing;
use crate::stats::config::ToleranceConfig;
use crate::stats::distribution::{Copula, Distribution};
use crate::stats::error::{StatsError, StatsResult};
use num_complex::Complex64;

/// Quantile by bracketing and bisection.
///
/// With `tail == false` solves `CDF(x) = p`, otherwise `SF(x) = p`. Finite
/// support bounds are used as the initial bracket; infinite ends are pushed
/// outward by step doubling until the bracket contains the root. Bisection
/// succeeds once the CDF gap drops below `quantile_epsilon`. Otherwise it
/// stops when the bracket has shrunk to adjacent floats, which keeps quantiles
/// near zero as accurate as those near one, or after `quantile_max_iter`
/// halvings.
///
/// # Errors
///
/// * `InvalidProbability` unless 0 < p < 1
/// * `ConvergenceError` if no bracket is found
/// * `NumericalError` if the CDF evaluates to NaN inside the bracket
pub fn quantile<D>(dist: &D, p: f64, tail: bool, config: &ToleranceConfig) -> StatsResult<f64>
where
    D: Distribution + ?Sized,
{
    if !(p > 0.0 && p < 1.0) {
        return Err(StatsError::InvalidProbability { value: p });
    }

    // Increasing in x for both orientations
    let gap = |x: f64| {
        if tail {
            p - dist.sf(x)
        } else {
            dist.cdf(x) - p
        }
    };

    let support = dist.support();
    let options = config.quantile_options();
    let (mut lo, mut hi) = match (support.lower.is_finite(), support.upper.is_finite()) {
        (true, true) => (support.lower, support.upper),
        (true, false) => bracket_increasing(&gap, support.lower, support.lower.abs().max(1.0), &options)?,
        (false, true) => bracket_increasing(&gap, support.upper, support.upper.abs().max(1.0), &options)?,
        (false, false) => bracket_increasing(&gap, 0.0, 1.0, &options)?,
    };
    if lo == hi {
        return Ok(lo);
    }
    log::trace!("quantile p={p} tail={tail}: bracket [{lo}, {hi}]");

    let eps = config.quantile_epsilon;
    for _ in 0..config.quantile_max_iter {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            // Adjacent floats
            break;
        }
        let g = gap(mid);
        if g.is_nan() {
            return Err(StatsError::NumericalError {
                message: format!("CDF is NaN at {mid} while inverting p = {p}"),
            });
        }
        if g.abs() <= eps {
            return Ok(mid);
        }
        if g < 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Ok(0.5 * (lo + hi))
}

/// Centered finite-difference derivative of the density.
///
/// The step is `ddf_relative_step * max(|x|, 1)`.
pub fn ddf<D>(dist: &D, x: f64, config: &ToleranceConfig) -> f64
where
    D: Distribution + ?Sized,
{
    let h = config.ddf_relative_step * x.abs().max(1.0);
    (dist.pdf(x + h) - dist.pdf(x - h)) / (2.0 * h)
}

/// Centered finite-difference gradient of a multivariate function.
pub fn gradient<F>(f: F, x: &[f64], config: &ToleranceConfig) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let mut point = x.to_vec();
    (0..x.len())
        .map(|i| {
            let h = config.ddf_relative_step * x[i].abs().max(1.0);
            point[i] = x[i] + h;
            let up = f(&point);
            point[i] = x[i] - h;
            let down = f(&point);
            point[i] = x[i];
            (up - down) / (2.0 * h)
        })
        .collect()
}

fn quadrature(config: &ToleranceConfig) -> GaussLegendreQuadrature {
    GaussLegendreQuadrature::new(config.integration_nodes)
}

/// Integrate `g(x) * pdf(x)` over the support.
pub fn expectation<D, G>(dist: &D, g: G, config: &ToleranceConfig) -> f64
where
    D: Distribution + ?Sized,
    G: Fn(f64) -> f64,
{
    let support = dist.support();
    quadrature(config).integrate_range(
        |x| {
            let density = dist.pdf(x);
            if density == 0.0 { 0.0 } else { g(x) * density }
        },
        support.lower,
        support.upper,
        config.integration_intervals,
    )
}

/// Mean by quadrature.
pub fn mean<D>(dist: &D, config: &ToleranceConfig) -> f64
where
    D: Distribution + ?Sized,
{
    expectation(dist, |x| x, config)
}

/// Central moment of order `k` by quadrature around [`Distribution::mean`].
pub fn central_moment<D>(dist: &D, k: i32, config: &ToleranceConfig) -> f64
where
    D: Distribution + ?Sized,
{
    let m = dist.mean();
    expectation(dist, |x| (x - m).powi(k), config)
}

/// Skewness by quadrature.
pub fn skewness<D>(dist: &D, config: &ToleranceConfig) -> f64
where
    D: Distribution + ?Sized,
{
    central_moment(dist, 3, config) / dist.var().powf(1.5)
}

/// Excess kurtosis by quadrature.
pub fn kurtosis<D>(dist: &D, config: &ToleranceConfig) -> f64
where
    D: Distribution + ?Sized,
{
    let v = dist.var();
    central_moment(dist, 4, config) / (v * v) - 3.0
}

/// Characteristic function E[exp(itX)] by quadrature.
pub fn characteristic_function<D>(dist: &D, t: f64, config: &ToleranceConfig) -> Complex64
where
    D: Distribution + ?Sized,
{
    let support = dist.support();
    quadrature(config).integrate_range(
        |x| {
            let density = dist.pdf(x);
            if density == 0.0 {
                Complex64::new(0.0, 0.0)
            } else {
                Complex64::from_polar(density, t * x)
            }
        },
        support.lower,
        support.upper,
        config.integration_intervals,
    )
}

/// Spearman's rho of a copula: `12 ∫∫ C(u, v) du dv - 3` on the unit square.
pub fn copula_spearman_rho<C>(copula: &C, config: &ToleranceConfig) -> f64
where
    C: Copula + ?Sized,
{
    let integral = quadrature(config).integrate_rectangle(|u, v| copula.cdf(&[u, v]), (0.0, 1.0), (0.0, 1.0), 1);
    12.0 * integral - 3.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::distribution::Support;

    /// Unit exponential with only the required methods.
    struct BareExponential;

    impl Distribution for BareExponential {
        fn support(&self) -> Support {
            Support::from_lower(0.0)
        }

        fn pdf(&self, x: f64) -> f64 {
            if x < 0.0 { 0.0 } else { (-x).exp() }
        }

        fn cdf(&self, x: f64) -> f64 {
            if x < 0.0 { 0.0 } else { 1.0 - (-x).exp() }
        }
    }

    /// Standard logistic, supported on the whole line.
    struct BareLogistic;

    impl Distribution for BareLogistic {
        fn support(&self) -> Support {
            Support::real_line()
        }

        fn pdf(&self, x: f64) -> f64 {
            let e = (-x.abs()).exp();
            e / ((1.0 + e) * (1.0 + e))
        }

        fn cdf(&self, x: f64) -> f64 {
            1.0 / (1.0 + (-x).exp())
        }
    }

    #[test]
    fn test_quantile_fallback() {
        let d = BareExponential;
        let eps = ToleranceConfig::default().quantile_epsilon;
        for p in [1e-6, 0.1, 0.5, 0.9, 0.999] {
            let x = d.ppf(p).unwrap();
            assert!((d.cdf(x) - p).abs() <= eps, "p={p}: x={x}");
            assert!((x + (1.0 - p).ln()).abs() < 1e-6, "p={p}: x={x}");
            let y = d.isf(p).unwrap();
            assert!((d.sf(y) - p).abs() <= eps, "p={p}: y={y}");
            assert!((y + p.ln()).abs() < 1e-6, "p={p}: y={y}");
        }
        assert!(d.ppf(0.0).is_err());
        assert!(d.ppf(1.0).is_err());
        assert!(d.isf(f64::NAN).is_err());

        let l = BareLogistic;
        for p in [0.01, 0.3, 0.5, 0.7, 0.99] {
            let x = l.ppf(p).unwrap();
            assert!((l.cdf(x) - p).abs() < 1e-10);
        }
    }

    #[test]
    fn test_quantile_fallback_near_zero() {
        use crate::stats::continuous::{Beta, ChiSquared, Gamma};

        let eps = ToleranceConfig::default().quantile_epsilon;
        // CDF x^0.1: the 1% quantile is 1e-20
        let beta = Beta::new(0.1, 1.0, 0.0, 1.0).unwrap();
        let x = beta.ppf(0.01).unwrap();
        assert!((x / 1e-20 - 1.0).abs() < 1e-8, "x={x}");
        assert!((beta.cdf(x) - 0.01).abs() <= eps);

        let gamma = Gamma::new(0.2, 1.0, 0.0).unwrap();
        let chi2 = ChiSquared::new(0.5).unwrap();
        for p in [0.001, 0.01] {
            let x = gamma.ppf(p).unwrap();
            assert!((gamma.cdf(x) - p).abs() <= eps, "gamma p={p}: x={x}");
            let x = chi2.ppf(p).unwrap();
            assert!((chi2.cdf(x) - p).abs() <= eps, "chi2 p={p}: x={x}");
        }
    }

    #[test]
    fn test_ddf_fallback() {
        let d = BareExponential;
        assert!((d.ddf(1.0) + (-1.0f64).exp()).abs() < 1e-8);
        let g = gradient(|v| v[0] * v[0] + 3.0 * v[1], &[2.0, 5.0], &ToleranceConfig::default());
        assert!((g[0] - 4.0).abs() < 1e-6);
        assert!((g[1] - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_moment_fallbacks() {
        let d = BareExponential;
        assert!((d.mean() - 1.0).abs() < 1e-8);
        assert!((d.var() - 1.0).abs() < 1e-7);
        assert!((d.skewness() - 2.0).abs() < 1e-5);
        assert!((d.kurtosis() - 6.0).abs() < 1e-4);

        let l = BareLogistic;
        assert!(l.mean().abs() < 1e-10);
        let pi2_3 = std::f64::consts::PI.powi(2) / 3.0;
        assert!((l.var() - pi2_3).abs() < 1e-7);
    }

    #[test]
    fn test_characteristic_function_fallback() {
        let d = BareExponential;
        // φ(t) = 1 / (1 - it)
        let t = 0.7;
        let expected = Complex64::new(1.0, 0.0) / Complex64::new(1.0, -t);
        let phi = d.characteristic_function(t);
        assert!((phi - expected).norm() < 1e-6);
        assert!((d.characteristic_function(0.0).re - 1.0).abs() < 1e-9);
    }
}
