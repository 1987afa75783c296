//! Shared vector helpers for iterative solvers.

/// Compute the L2 (Euclidean) norm of a vector.
#[inline]
pub fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}
