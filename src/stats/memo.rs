//! Lazily cached moments.

use crate::stats::distribution::{Distribution, Support};
use crate::stats::error::StatsResult;
use crate::stats::parametric::Parametric;
use num_complex::Complex64;
use rand::Rng;
use std::sync::OnceLock;

/// Wrapper caching the moments of a distribution whose moments are expensive
/// (quadrature fallbacks, series).
///
/// Each moment is computed on first request. [`Memoized::set_parameters`]
/// drops every cached value together with the parameter change, so a stale
/// moment is never observable.
#[derive(Debug, Clone)]
pub struct Memoized<D> {
    inner: D,
    mean: OnceLock<f64>,
    var: OnceLock<f64>,
    skewness: OnceLock<f64>,
    kurtosis: OnceLock<f64>,
}

impl<D: Distribution> Memoized<D> {
    /// Wrap a distribution.
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            mean: OnceLock::new(),
            var: OnceLock::new(),
            skewness: OnceLock::new(),
            kurtosis: OnceLock::new(),
        }
    }

    /// The wrapped distribution.
    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Unwrap.
    pub fn into_inner(self) -> D {
        self.inner
    }

    fn invalidate(&mut self) {
        self.mean = OnceLock::new();
        self.var = OnceLock::new();
        self.skewness = OnceLock::new();
        self.kurtosis = OnceLock::new();
    }
}

impl<D: Distribution + Parametric> Memoized<D> {
    /// Replace the parameters of the wrapped distribution and drop the cache.
    pub fn set_parameters(&mut self, parameters: &[f64]) -> StatsResult<()> {
        self.inner.set_parameters(parameters)?;
        self.invalidate();
        Ok(())
    }
}

impl<D: Distribution> Distribution for Memoized<D> {
    fn support(&self) -> Support {
        self.inner.support()
    }

    fn pdf(&self, x: f64) -> f64 {
        self.inner.pdf(x)
    }

    fn cdf(&self, x: f64) -> f64 {
        self.inner.cdf(x)
    }

    fn log_pdf(&self, x: f64) -> f64 {
        self.inner.log_pdf(x)
    }

    fn sf(&self, x: f64) -> f64 {
        self.inner.sf(x)
    }

    fn ddf(&self, x: f64) -> f64 {
        self.inner.ddf(x)
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        self.inner.ppf(p)
    }

    fn isf(&self, p: f64) -> StatsResult<f64> {
        self.inner.isf(p)
    }

    fn characteristic_function(&self, t: f64) -> Complex64 {
        self.inner.characteristic_function(t)
    }

    fn mean(&self) -> f64 {
        *self.mean.get_or_init(|| self.inner.mean())
    }

    fn var(&self) -> f64 {
        *self.var.get_or_init(|| self.inner.var())
    }

    fn skewness(&self) -> f64 {
        *self.skewness.get_or_init(|| self.inner.skewness())
    }

    fn kurtosis(&self) -> f64 {
        *self.kurtosis.get_or_init(|| self.inner.kurtosis())
    }

    fn is_discrete(&self) -> bool {
        self.inner.is_discrete()
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.inner.sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::continuous::NonCentralStudentT;

    #[test]
    fn test_cache_follows_parameters() {
        let mut m = Memoized::new(NonCentralStudentT::new(10.0, 1.0).unwrap());
        let first = m.mean();
        assert!((m.mean() - first).abs() == 0.0);

        m.set_parameters(&[10.0, 2.0]).unwrap();
        let direct = NonCentralStudentT::new(10.0, 2.0).unwrap().mean();
        assert!((m.mean() - direct).abs() < 1e-12);
        assert!(m.mean() > first);

        // Rejected parameters leave both the distribution and the cache intact
        assert!(m.set_parameters(&[-1.0, 0.0]).is_err());
        assert!((m.mean() - direct).abs() < 1e-12);
        assert_eq!(m.inner().parameters(), vec![10.0, 2.0]);
    }
}
