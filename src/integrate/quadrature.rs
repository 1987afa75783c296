//! Gauss-Legendre quadrature on finite and unbounded intervals.

use std::ops::{Add, Mul};

/// Gauss-Legendre nodes and weights on [-1, 1].
///
/// The integrand may return any value that can be scaled by an `f64` and
/// summed, so the same rule integrates real densities and complex
/// characteristic-function integrands.
#[derive(Debug, Clone)]
pub struct GaussLegendreQuadrature {
    nodes: Vec<f64>,
    weights: Vec<f64>,
}

impl GaussLegendreQuadrature {
    /// Build an `n`-point rule. Orders below 1 are raised to 1.
    pub fn new(n: usize) -> Self {
        let (nodes, weights) = gauss_legendre_nodes_weights(n.max(1));
        Self { nodes, weights }
    }

    /// Number of nodes.
    pub fn order(&self) -> usize {
        self.nodes.len()
    }

    /// Integrate `f` over the finite interval [a, b].
    pub fn integrate<T, F>(&self, f: F, a: f64, b: f64) -> T
    where
        T: Copy + Default + Add<Output = T> + Mul<f64, Output = T>,
        F: Fn(f64) -> T,
    {
        let half_width = 0.5 * (b - a);
        let center = 0.5 * (a + b);
        self.nodes
            .iter()
            .zip(&self.weights)
            .fold(T::default(), |acc, (&x, &w)| {
                acc + f(center + half_width * x) * (w * half_width)
            })
    }

    /// Composite rule: split [a, b] into `intervals` equal pieces.
    pub fn integrate_composite<T, F>(&self, f: F, a: f64, b: f64, intervals: usize) -> T
    where
        T: Copy + Default + Add<Output = T> + Mul<f64, Output = T>,
        F: Fn(f64) -> T,
    {
        let intervals = intervals.max(1);
        let h = (b - a) / intervals as f64;
        (0..intervals).fold(T::default(), |acc, i| {
            let lo = a + i as f64 * h;
            let hi = if i + 1 == intervals { b } else { lo + h };
            acc + self.integrate(&f, lo, hi)
        })
    }

    /// Integrate `f` over [lower, upper], where either bound may be infinite.
    ///
    /// Semi-infinite ranges use `x = a + t/(1-t)` on [0, 1); the full line
    /// uses `x = t/(1-t²)` on (-1, 1). Gauss nodes never touch the
    /// endpoints, so the singular Jacobian is never evaluated.
    pub fn integrate_range<T, F>(&self, f: F, lower: f64, upper: f64, intervals: usize) -> T
    where
        T: Copy + Default + Add<Output = T> + Mul<f64, Output = T>,
        F: Fn(f64) -> T,
    {
        match (lower.is_finite(), upper.is_finite()) {
            (true, true) => self.integrate_composite(f, lower, upper, intervals),
            (true, false) => self.integrate_composite(
                |t| {
                    let s = 1.0 - t;
                    f(lower + t / s) * (1.0 / (s * s))
                },
                0.0,
                1.0,
                intervals,
            ),
            (false, true) => self.integrate_composite(
                |t| {
                    let s = 1.0 - t;
                    f(upper - t / s) * (1.0 / (s * s))
                },
                0.0,
                1.0,
                intervals,
            ),
            (false, false) => self.integrate_composite(
                |t| {
                    let s = 1.0 - t * t;
                    f(t / s) * ((1.0 + t * t) / (s * s))
                },
                -1.0,
                1.0,
                intervals,
            ),
        }
    }

    /// Integrate `f(x, y)` over the rectangle [x0, x1] × [y0, y1] with the
    /// tensor-product rule on an `intervals × intervals` grid.
    pub fn integrate_rectangle<F>(
        &self,
        f: F,
        (x0, x1): (f64, f64),
        (y0, y1): (f64, f64),
        intervals: usize,
    ) -> f64
    where
        F: Fn(f64, f64) -> f64,
    {
        self.integrate_composite(
            |x| self.integrate_composite(|y| f(x, y), y0, y1, intervals),
            x0,
            x1,
            intervals,
        )
    }
}

/// Compute Gauss-Legendre nodes and weights.
///
/// Uses Newton iteration to find roots of Legendre polynomials.
fn gauss_legendre_nodes_weights(n: usize) -> (Vec<f64>, Vec<f64>) {
    let mut nodes = vec![0.0; n];
    let mut weights = vec![0.0; n];

    let m = n.div_ceil(2);

    for i in 0..m {
        // Initial guess using Chebyshev approximation
        let mut z = ((i as f64 + 0.75) / (n as f64 + 0.5) * std::f64::consts::PI).cos();

        for _ in 0..100 {
            let (p, dp) = legendre_p_and_dp(n, z);
            let z_new = z - p / dp;

            if (z_new - z).abs() < 1e-15 {
                z = z_new;
                break;
            }
            z = z_new;
        }

        let (_, dp) = legendre_p_and_dp(n, z);
        let w = 2.0 / ((1.0 - z * z) * dp * dp);

        nodes[i] = -z;
        nodes[n - 1 - i] = z;
        weights[i] = w;
        weights[n - 1 - i] = w;
    }

    (nodes, weights)
}

/// Evaluate Legendre polynomial P_n(x) and its derivative.
fn legendre_p_and_dp(n: usize, x: f64) -> (f64, f64) {
    if n == 0 {
        return (1.0, 0.0);
    }
    if n == 1 {
        return (x, 1.0);
    }

    let mut p_prev = 1.0;
    let mut p_curr = x;

    for k in 2..=n {
        let p_next = ((2 * k - 1) as f64 * x * p_curr - (k - 1) as f64 * p_prev) / k as f64;
        p_prev = p_curr;
        p_curr = p_next;
    }

    // Derivative: P'_n(x) = n * (x * P_n - P_{n-1}) / (x^2 - 1)
    let dp = n as f64 * (x * p_curr - p_prev) / (x * x - 1.0);

    (p_curr, dp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn test_polynomial_exact() {
        // n-point rule is exact for degree 2n-1
        let integral: f64 = GaussLegendreQuadrature::new(3).integrate(|x| x.powi(5) - 2.0 * x * x + 1.0, -1.0, 2.0);
        let exact = (64.0 - 1.0) / 6.0 - 2.0 * 9.0 / 3.0 + 3.0;
        assert!((integral - exact).abs() < 1e-12);
    }

    #[test]
    fn test_weights_sum_to_two() {
        let rule = GaussLegendreQuadrature::new(64);
        let total: f64 = rule.integrate(|_| 1.0, -1.0, 1.0);
        assert!((total - 2.0).abs() < 1e-12);
        assert_eq!(rule.order(), 64);
    }

    #[test]
    fn test_semi_infinite_exponential() {
        let rule = GaussLegendreQuadrature::new(32);
        let integral: f64 = rule.integrate_range(|x| (-x).exp(), 0.0, f64::INFINITY, 16);
        assert!((integral - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_full_line_gaussian() {
        let rule = GaussLegendreQuadrature::new(64);
        let integral: f64 =
            rule.integrate_range(|x| (-0.5 * x * x).exp(), f64::NEG_INFINITY, f64::INFINITY, 16);
        assert!((integral - (2.0 * std::f64::consts::PI).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_complex_integrand() {
        // ∫_0^1 e^{ix} dx = sin(1) + i(1 - cos(1))
        let rule = GaussLegendreQuadrature::new(16);
        let value: Complex64 = rule.integrate(|x| Complex64::new(0.0, x).exp(), 0.0, 1.0);
        assert!((value.re - 1.0_f64.sin()).abs() < 1e-12);
        assert!((value.im - (1.0 - 1.0_f64.cos())).abs() < 1e-12);
    }

    #[test]
    fn test_rectangle() {
        let rule = GaussLegendreQuadrature::new(8);
        let value = rule.integrate_rectangle(|x, y| x * y, (0.0, 1.0), (0.0, 2.0), 2);
        assert!((value - 1.0).abs() < 1e-12);
    }
}
