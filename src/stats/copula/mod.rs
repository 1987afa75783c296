//! Bivariate Archimedean copulas.
//!
//! Each copula is a [`MultivariateDistribution`](crate::stats::MultivariateDistribution) of dimension 2 on the unit
//! square and a [`Copula`], so it reports the Kendall's tau implied by its
//! parameter and samples by inverting the conditional distribution of the
//! second coordinate given the first.

mod ali_mikhail_haq;
mod clayton;
mod frank;
mod gumbel;

pub use ali_mikhail_haq::AliMikhailHaqCopula;
pub use clayton::ClaytonCopula;
pub use frank::FrankCopula;
pub use gumbel::GumbelCopula;

use crate::optimize::scalar::bisect;
use crate::stats::config::ToleranceConfig;
use crate::stats::distribution::Copula;
use rand::distributions::Open01;
use rand::Rng;

/// The coordinates of `x` when it is a point strictly inside the unit square.
pub(crate) fn interior(x: &[f64]) -> Option<(f64, f64)> {
    match x {
        [u, v] if *u > 0.0 && *u < 1.0 && *v > 0.0 && *v < 1.0 => Some((*u, *v)),
        _ => None,
    }
}

/// Copula CDF outside the open unit square, where every copula agrees with
/// the Fréchet bounds. `None` for interior points and malformed input.
pub(crate) fn boundary_cdf(x: &[f64]) -> Option<f64> {
    let [u, v] = x else {
        return Some(f64::NAN);
    };
    if *u <= 0.0 || *v <= 0.0 {
        Some(0.0)
    } else if *u >= 1.0 {
        Some(v.min(1.0))
    } else if *v >= 1.0 {
        Some(*u)
    } else {
        None
    }
}

/// Invert a conditional CDF `v -> h(v)` that increases from 0 to 1 on [0, 1].
pub(crate) fn invert_conditional<H>(h: H, q: f64) -> f64
where
    H: Fn(f64) -> f64,
{
    if q <= 0.0 {
        return 0.0;
    }
    if q >= 1.0 {
        return 1.0;
    }
    let gap = |v: f64| {
        if v <= 0.0 {
            -q
        } else if v >= 1.0 {
            1.0 - q
        } else {
            h(v) - q
        }
    };
    match bisect(gap, 0.0, 1.0, &ToleranceConfig::default().bisection_options()) {
        Ok(result) => result.root,
        Err(_) => f64::NAN,
    }
}

/// Draw (U, V) by sampling U uniformly and V from its conditional law.
pub(crate) fn sample_conditional<C, R>(copula: &C, rng: &mut R) -> Vec<f64>
where
    C: Copula + ?Sized,
    R: Rng + ?Sized,
{
    let u: f64 = rng.sample(Open01);
    let q: f64 = rng.sample(Open01);
    vec![u, copula.conditional_ppf(u, q)]
}

/// Dimension every copula reports.
pub(crate) const COPULA_DIMENSION: usize = 2;
