//! Linear kernel implementation

use crate::core::SparseVector;
use crate::kernel::Kernel;

/// Linear kernel: K(x, y) = x^T * y
///
/// Works on dense slices, vectors and arrays of any numeric type convertible
/// to `f64`, and on [`SparseVector`]. Dense inputs of unequal length are
/// compared over their common prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearKernel;

impl LinearKernel {
    /// Create a new linear kernel
    pub fn new() -> Self {
        Self
    }
}

impl<T> Kernel<[T]> for LinearKernel
where
    T: Copy + Into<f64>,
{
    fn compute(&self, x: &[T], y: &[T]) -> f64 {
        dot_product_dense(x, y)
    }
}

impl<T> Kernel<Vec<T>> for LinearKernel
where
    T: Copy + Into<f64>,
{
    fn compute(&self, x: &Vec<T>, y: &Vec<T>) -> f64 {
        dot_product_dense(x, y)
    }
}

impl<T, const N: usize> Kernel<[T; N]> for LinearKernel
where
    T: Copy + Into<f64>,
{
    fn compute(&self, x: &[T; N], y: &[T; N]) -> f64 {
        dot_product_dense(x, y)
    }
}

impl Kernel<SparseVector> for LinearKernel {
    fn compute(&self, x: &SparseVector, y: &SparseVector) -> f64 {
        dot_product_sparse(x, y)
    }
}

pub(crate) fn dot_product_dense<T: Copy + Into<f64>>(x: &[T], y: &[T]) -> f64 {
    x.iter()
        .zip(y)
        .map(|(&a, &b)| a.into() * b.into())
        .sum()
}

/// Compute dot product between two sparse vectors
///
/// Since both vectors have sorted indices, we can compute this efficiently
/// using a merge-like algorithm in O(nnz(x) + nnz(y)) time.
pub(crate) fn dot_product_sparse(x: &SparseVector, y: &SparseVector) -> f64 {
    let mut result = 0.0;
    let mut i = 0;
    let mut j = 0;

    while i < x.indices.len() && j < y.indices.len() {
        let x_idx = x.indices[i];
        let y_idx = y.indices[j];

        if x_idx == y_idx {
            result += x.values[i] * y.values[j];
            i += 1;
            j += 1;
        } else if x_idx < y_idx {
            i += 1;
        } else {
            j += 1;
        }
    }

    result
}
