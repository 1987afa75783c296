//! Factories for the discrete families.

use super::validation::{check_integer_support, univariate};
use super::{construct, DistributionFactory, Estimate};
use crate::stats::config::ToleranceConfig;
use crate::stats::continuous::special::lgamma;
use crate::stats::descriptive;
use crate::stats::discrete::{Binomial, Geometric, Poisson};
use crate::stats::error::StatsResult;
use crate::stats::sample::Sample;
use log::{debug, trace, warn};
use std::collections::BTreeMap;

/// Poisson by matching the mean: λ = mean.
#[derive(Debug, Clone, Default)]
pub struct PoissonFactory {
    config: ToleranceConfig,
}

impl PoissonFactory {
    /// Create a factory running with the given tolerances.
    pub fn new(config: ToleranceConfig) -> Self {
        Self { config }
    }
}

impl DistributionFactory for PoissonFactory {
    type Output = Poisson;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<Poisson> {
        const CONTEXT: &str = "PoissonFactory";
        let x = univariate(sample, CONTEXT)?;
        check_integer_support(x, 0.0, self.config.support_epsilon, CONTEXT)?;
        construct(CONTEXT, &[descriptive::mean(x)])
    }

    /// Var(λ̂) = λ / size.
    fn build_estimate(&self, sample: &Sample) -> StatsResult<Estimate<Poisson>> {
        let distribution = self.build_from_sample(sample)?;
        let variance = distribution.lambda() / sample.len() as f64;
        Ok(Estimate {
            distribution,
            parameter_covariance: Some(vec![vec![variance]]),
        })
    }
}

/// Geometric on {1, 2, ...} by maximum likelihood: p = size / sum.
#[derive(Debug, Clone, Default)]
pub struct GeometricFactory {
    config: ToleranceConfig,
}

impl GeometricFactory {
    /// Create a factory running with the given tolerances.
    pub fn new(config: ToleranceConfig) -> Self {
        Self { config }
    }
}

impl DistributionFactory for GeometricFactory {
    type Output = Geometric;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<Geometric> {
        const CONTEXT: &str = "GeometricFactory";
        let x = univariate(sample, CONTEXT)?;
        check_integer_support(x, 1.0, self.config.support_epsilon, CONTEXT)?;
        let sum: f64 = x.iter().sum();
        construct(CONTEXT, &[x.len() as f64 / sum])
    }

    /// Var(p̂) = p²(1 - p) / size.
    fn build_estimate(&self, sample: &Sample) -> StatsResult<Estimate<Geometric>> {
        let distribution = self.build_from_sample(sample)?;
        let p = distribution.p();
        let variance = p * p * (1.0 - p) / sample.len() as f64;
        Ok(Estimate {
            distribution,
            parameter_covariance: Some(vec![vec![variance]]),
        })
    }
}

/// `x ln y`, zero when `x` is zero.
fn xlogy(x: f64, y: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x * y.ln()
    }
}

/// Binomial log-likelihood of a fixed sample, grouped by distinct count.
///
/// The `ln k!` terms do not depend on the candidate `n` and are summed once.
struct LogLikelihood {
    /// Distinct counts and their multiplicities
    counts: Vec<(u64, f64)>,
    size: f64,
    sum: f64,
    log_factorials: f64,
}

impl LogLikelihood {
    fn new(values: &[f64]) -> Self {
        let mut grouped: BTreeMap<u64, usize> = BTreeMap::new();
        for &x in values {
            *grouped.entry(x.round() as u64).or_insert(0) += 1;
        }
        let counts: Vec<(u64, f64)> = grouped.into_iter().map(|(k, m)| (k, m as f64)).collect();
        let log_factorials = counts.iter().map(|&(k, m)| m * lgamma(k as f64 + 1.0)).sum();
        let sum = counts.iter().map(|&(k, m)| m * k as f64).sum();
        Self {
            counts,
            size: values.len() as f64,
            sum,
            log_factorials,
        }
    }

    fn max_count(&self) -> u64 {
        self.counts.last().map_or(0, |&(k, _)| k)
    }

    /// Σ ln P(X = x_i) under Binomial(n, p), for n at least the largest count.
    fn at(&self, n: u64, p: f64) -> f64 {
        let nf = n as f64;
        let ln_n_factorial = lgamma(nf + 1.0);
        let arrangements: f64 = self
            .counts
            .iter()
            .map(|&(k, m)| m * (ln_n_factorial - lgamma(nf - k as f64 + 1.0)))
            .sum();
        arrangements - self.log_factorials + xlogy(self.sum, p) + xlogy(self.size * nf - self.sum, 1.0 - p)
    }
}

/// Outcome of the integer likelihood search of [`BinomialFactory`].
#[derive(Debug, Clone, PartialEq)]
pub struct BinomialSearch {
    /// Number of trials at the best point
    pub n: u64,
    /// Success probability at the best point (mean / n)
    pub p: f64,
    /// Sample log-likelihood at the best point
    pub log_likelihood: f64,
    /// Accepted `(n, log-likelihood)` pairs in visiting order, starting with
    /// the initial guess
    pub path: Vec<(u64, f64)>,
}

/// Binomial by maximum likelihood over the integer `n`, with `p = mean / n`.
///
/// The search starts at the moment estimate `mean² / (mean - variance)`
/// (never below the largest count), picks a direction by probing `n - 1`,
/// then steps while the likelihood strictly increases.
#[derive(Debug, Clone, Default)]
pub struct BinomialFactory {
    config: ToleranceConfig,
}

impl BinomialFactory {
    /// Create a factory running with the given tolerances.
    pub fn new(config: ToleranceConfig) -> Self {
        Self { config }
    }

    /// Run the likelihood search on a sample of counts.
    pub fn search(&self, sample: &Sample) -> StatsResult<BinomialSearch> {
        const CONTEXT: &str = "BinomialFactory";
        let x = univariate(sample, CONTEXT)?;
        check_integer_support(x, 0.0, self.config.support_epsilon, CONTEXT)?;

        let likelihood = LogLikelihood::new(x);
        let max_count = likelihood.max_count();
        let mean = descriptive::mean(x);
        let variance = descriptive::variance(x);

        let guess = if variance < mean {
            (mean * mean / (mean - variance)).round()
        } else {
            max_count as f64
        };
        let mut n = (guess.min(u64::MAX as f64) as u64).max(max_count).max(1);
        let mut log_likelihood = likelihood.at(n, mean / n as f64);
        let mut path = vec![(n, log_likelihood)];

        let mut step: i64 = 1;
        if n > max_count {
            let below = likelihood.at(n - 1, mean / (n - 1) as f64);
            if below > log_likelihood {
                step = -1;
                n -= 1;
                log_likelihood = below;
                path.push((n, log_likelihood));
            }
        }
        trace!("{CONTEXT}: start n={n} step={step} log-likelihood={log_likelihood}");

        let mut converged = false;
        for _ in 0..self.config.hill_climb_max_iter {
            let candidate = if step > 0 {
                n.saturating_add(1)
            } else {
                n - 1
            };
            if step < 0 && candidate <= max_count {
                converged = true;
                break;
            }
            let candidate_likelihood = likelihood.at(candidate, mean / candidate as f64);
            if !(candidate_likelihood > log_likelihood) {
                converged = true;
                break;
            }
            n = candidate;
            log_likelihood = candidate_likelihood;
            path.push((n, log_likelihood));
        }
        if converged {
            debug!("{CONTEXT}: n={n} after {} accepted steps", path.len() - 1);
        } else {
            warn!(
                "{CONTEXT}: step budget {} exhausted at n={n}",
                self.config.hill_climb_max_iter
            );
        }

        Ok(BinomialSearch {
            n,
            p: mean / n as f64,
            log_likelihood,
            path,
        })
    }
}

impl DistributionFactory for BinomialFactory {
    type Output = Binomial;

    fn build_from_sample(&self, sample: &Sample) -> StatsResult<Binomial> {
        let search = self.search(sample)?;
        construct("BinomialFactory", &[search.n as f64, search.p])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::descriptive::log_likelihood;
    use crate::stats::distribution::Distribution;
    use crate::stats::error::ErrorKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_poisson_factory() {
        let factory = PoissonFactory::default();
        let p = factory.build_from_sample(&Sample::from_values(&[1.0, 2.0, 3.0])).unwrap();
        assert_eq!(p.lambda(), 2.0);

        let estimate = factory.build_estimate(&Sample::from_values(&[1.0, 2.0, 3.0])).unwrap();
        let cov = estimate.parameter_covariance.unwrap();
        assert!((cov[0][0] - 2.0 / 3.0).abs() < 1e-15);

        let err = factory.build_from_sample(&Sample::from_values(&[1.0, 2.5])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = factory.build_from_sample(&Sample::from_values(&[0.0, 0.0])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_geometric_factory() {
        let factory = GeometricFactory::default();
        let g = factory
            .build_from_sample(&Sample::from_values(&[1.0, 1.0, 2.0, 2.0, 2.0]))
            .unwrap();
        assert_eq!(g.p(), 0.625);
        assert!(factory.build_from_sample(&Sample::from_values(&[0.0, 1.0])).is_err());

        let estimate = factory
            .build_estimate(&Sample::from_values(&[1.0, 1.0, 2.0, 2.0, 2.0]))
            .unwrap();
        let expected = 0.625 * 0.625 * 0.375 / 5.0;
        assert!((estimate.parameter_covariance.unwrap()[0][0] - expected).abs() < 1e-15);
    }

    #[test]
    fn test_grouped_log_likelihood() {
        let values = [0.0, 3.0, 3.0, 5.0, 2.0];
        let grouped = LogLikelihood::new(&values);
        assert_eq!(grouped.max_count(), 5);
        let direct = log_likelihood(&Binomial::new(8, 0.4).unwrap(), &values);
        assert!((grouped.at(8, 0.4) - direct).abs() < 1e-10);

        // p = 1 with every count equal to n
        let all_max = LogLikelihood::new(&[4.0, 4.0]);
        assert!(all_max.at(4, 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_binomial_search_recovers_parameters() {
        let truth = Binomial::new(12, 0.6).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let sample = truth.sample_n(&mut rng, 5000);

        let search = BinomialFactory::default().search(&sample).unwrap();
        assert!((search.n as i64 - 12).abs() <= 1, "n = {}", search.n);
        assert!((search.n as f64 * search.p - descriptive::mean(sample.as_flat())).abs() < 1e-12);

        // Neither neighbour of the final point improves the likelihood
        let likelihood = LogLikelihood::new(sample.as_flat());
        let mean = descriptive::mean(sample.as_flat());
        let above = likelihood.at(search.n + 1, mean / (search.n + 1) as f64);
        assert!(above <= search.log_likelihood);
    }

    #[test]
    fn test_binomial_degenerate_samples() {
        let factory = BinomialFactory::default();
        // Every count equal: n clamps to the maximum
        let b = factory.build_from_sample(&Sample::from_values(&[3.0, 3.0, 3.0])).unwrap();
        assert_eq!(b.n(), 3);
        assert_eq!(b.p(), 1.0);

        let zeros = factory.build_from_sample(&Sample::from_values(&[0.0, 0.0])).unwrap();
        assert_eq!(zeros.p(), 0.0);

        assert!(factory.build_from_sample(&Sample::from_values(&[-1.0])).is_err());
        assert!(factory.build_from_sample(&Sample::new(1)).is_err());
    }
}
