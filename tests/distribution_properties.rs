//! Properties every univariate family must satisfy: quantiles invert the
//! CDF and the CDF never decreases.

use estimr::stats::{
    Arcsine, Beta, Binomial, Burr, Chi, ChiSquared, Distribution, Exponential, FisherSnedecor, Gamma, Geometric,
    Gumbel, InverseNormal, Laplace, LogNormal, LogUniform, Logistic, NonCentralChiSquared, NonCentralStudentT,
    Normal, Poisson, Rayleigh, Rice, ToleranceConfig, Triangular, TruncatedNormal, Uniform, Weibull,
};

const PROBABILITIES: [f64; 9] = [0.001, 0.01, 0.1, 0.25, 0.5, 0.75, 0.9, 0.99, 0.999];

fn continuous_families() -> Vec<(&'static str, Box<dyn Distribution>)> {
    vec![
        ("Arcsine", Box::new(Arcsine::new(0.0, 2.0).unwrap())),
        ("Beta", Box::new(Beta::new(2.0, 3.0, -1.0, 1.0).unwrap())),
        ("Burr", Box::new(Burr::new(2.0, 3.0).unwrap())),
        ("Chi", Box::new(Chi::new(3.0).unwrap())),
        ("ChiSquared", Box::new(ChiSquared::new(4.0).unwrap())),
        ("Exponential", Box::new(Exponential::new(1.5, 0.5).unwrap())),
        ("FisherSnedecor", Box::new(FisherSnedecor::new(5.0, 7.0).unwrap())),
        ("Gamma", Box::new(Gamma::new(2.5, 1.5, 0.0).unwrap())),
        ("Gumbel", Box::new(Gumbel::new(1.0, 0.5).unwrap())),
        ("InverseNormal", Box::new(InverseNormal::new(2.0, 1.0).unwrap())),
        ("Laplace", Box::new(Laplace::new(0.0, 2.0).unwrap())),
        ("LogNormal", Box::new(LogNormal::new(0.0, 0.5, 0.0).unwrap())),
        ("LogUniform", Box::new(LogUniform::new(0.0, 1.0).unwrap())),
        ("Logistic", Box::new(Logistic::new(0.0, 1.0).unwrap())),
        ("NonCentralChiSquared", Box::new(NonCentralChiSquared::new(3.0, 2.0).unwrap())),
        ("NonCentralStudentT", Box::new(NonCentralStudentT::new(5.0, 1.0).unwrap())),
        ("Normal", Box::new(Normal::new(1.0, 2.0).unwrap())),
        ("Rayleigh", Box::new(Rayleigh::new(2.0, 0.0).unwrap())),
        ("Rice", Box::new(Rice::new(1.0, 2.0).unwrap())),
        ("Triangular", Box::new(Triangular::new(-1.0, 0.0, 2.0).unwrap())),
        ("TruncatedNormal", Box::new(TruncatedNormal::new(0.0, 1.0, -1.0, 2.0).unwrap())),
        ("Uniform", Box::new(Uniform::new(-1.0, 3.0).unwrap())),
        ("Weibull", Box::new(Weibull::new(2.0, 1.5, 0.0).unwrap())),
    ]
}

fn discrete_families() -> Vec<(&'static str, Box<dyn Distribution>)> {
    vec![
        ("Binomial", Box::new(Binomial::new(10, 0.3).unwrap())),
        ("Geometric", Box::new(Geometric::new(0.3).unwrap())),
        ("Poisson", Box::new(Poisson::new(3.5).unwrap())),
    ]
}

fn assert_round_trip(name: &str, dist: &dyn Distribution, probabilities: &[f64]) {
    let eps = ToleranceConfig::default().quantile_epsilon;
    for &p in probabilities {
        let x = dist.ppf(p).unwrap();
        assert!((dist.cdf(x) - p).abs() <= eps, "{name}: cdf(ppf({p})) = {}", dist.cdf(x));
        let y = dist.isf(p).unwrap();
        assert!((dist.sf(y) - p).abs() <= eps, "{name}: sf(isf({p})) = {}", dist.sf(y));
        assert!(dist.support().contains(x), "{name}: ppf({p}) = {x} outside the support");
    }
}

#[test]
fn quantile_round_trip_continuous() {
    for (name, dist) in continuous_families() {
        assert_round_trip(name, dist.as_ref(), &PROBABILITIES);
    }
}

#[test]
fn quantile_round_trip_small_shapes() {
    // Densities that blow up at the lower support bound
    let families: Vec<(&str, Box<dyn Distribution>)> = vec![
        ("Gamma(0.3)", Box::new(Gamma::new(0.3, 1.0, 0.0).unwrap())),
        ("Gamma(0.2)", Box::new(Gamma::new(0.2, 2.0, 0.0).unwrap())),
        ("Beta(0.4, 2)", Box::new(Beta::new(0.4, 2.0, 0.0, 1.0).unwrap())),
        ("Beta(0.1, 1)", Box::new(Beta::new(0.1, 1.0, 0.0, 1.0).unwrap())),
        ("ChiSquared(0.6)", Box::new(ChiSquared::new(0.6).unwrap())),
        ("ChiSquared(0.5)", Box::new(ChiSquared::new(0.5).unwrap())),
    ];
    for (name, dist) in families {
        assert_round_trip(name, dist.as_ref(), &[0.001, 0.01]);
    }
}

#[test]
fn quantile_round_trip_discrete() {
    for (name, dist) in discrete_families() {
        assert!(dist.is_discrete());
        for p in PROBABILITIES {
            let k = dist.ppf(p).unwrap();
            assert_eq!(k.fract(), 0.0, "{name}: ppf({p}) = {k}");
            assert!(dist.cdf(k) >= p, "{name}: cdf({k}) < {p}");
            if k > dist.support().lower {
                assert!(dist.cdf(k - 1.0) < p, "{name}: ppf({p}) = {k} is not the smallest");
            }
        }
    }
}

#[test]
fn quantile_rejects_closed_interval_endpoints() {
    for (name, dist) in continuous_families().into_iter().chain(discrete_families()) {
        for p in [0.0, 1.0, -0.5, f64::NAN] {
            assert!(dist.ppf(p).is_err(), "{name}: ppf({p}) accepted");
        }
    }
}

#[test]
fn cdf_is_monotone() {
    for (name, dist) in continuous_families().into_iter().chain(discrete_families()) {
        let lo = dist.ppf(1e-4).unwrap() - 1.0;
        let hi = dist.ppf(1.0 - 1e-4).unwrap() + 1.0;
        let mut previous = dist.cdf(lo);
        assert!((0.0..=1.0).contains(&previous), "{name}");
        for i in 1..=400 {
            let x = lo + (hi - lo) * i as f64 / 400.0;
            let c = dist.cdf(x);
            assert!(c >= previous - 1e-12, "{name}: cdf decreases at {x}: {previous} -> {c}");
            assert!(c <= 1.0, "{name}: cdf({x}) = {c}");
            previous = c;
        }
    }
}

#[test]
fn density_vanishes_outside_support() {
    for (name, dist) in continuous_families() {
        let support = dist.support();
        if support.lower.is_finite() {
            assert_eq!(dist.pdf(support.lower - 1.0), 0.0, "{name}");
            assert_eq!(dist.cdf(support.lower - 1.0), 0.0, "{name}");
        }
        if support.upper.is_finite() {
            assert_eq!(dist.pdf(support.upper + 1.0), 0.0, "{name}");
            assert_eq!(dist.cdf(support.upper + 1.0), 1.0, "{name}");
        }
    }
}
