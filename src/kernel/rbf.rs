//! RBF (Radial Basis Function) kernel implementation
//!
//! The RBF kernel is defined as: K(x, y) = exp(-γ * ||x - y||²)
//! where γ (gamma) is a hyperparameter that controls the kernel width.

use crate::core::SparseVector;
use crate::kernel::Kernel;

/// RBF (Radial Basis Function) kernel: K(x, y) = exp(-γ * ||x - y||²)
///
/// Separates classes that no hyperplane in input space can, e.g. XOR-like
/// layouts. The gamma parameter controls the "reach" of each training example:
/// - High gamma: close points have high influence (potential overfitting)
/// - Low gamma: distant points have influence (potential underfitting)
#[derive(Debug, Clone, Copy)]
pub struct RBFKernel {
    gamma: f64,
}

impl RBFKernel {
    /// Create a new RBF kernel with specified gamma parameter
    ///
    /// # Panics
    /// Panics if gamma is not positive
    pub fn new(gamma: f64) -> Self {
        assert!(gamma > 0.0, "Gamma must be positive, got: {}", gamma);
        Self { gamma }
    }

    /// Create RBF kernel with gamma = 1.0 / n_features
    ///
    /// # Panics
    /// Panics if `n_features` is zero
    pub fn with_auto_gamma(n_features: usize) -> Self {
        assert!(n_features > 0, "Number of features must be positive");
        Self::new(1.0 / n_features as f64)
    }

    /// Get the gamma parameter
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    fn from_squared_distance(&self, squared_distance: f64) -> f64 {
        (-self.gamma * squared_distance).exp()
    }
}

impl Default for RBFKernel {
    /// Default RBF kernel with gamma = 1.0
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl<T> Kernel<[T]> for RBFKernel
where
    T: Copy + Into<f64>,
{
    fn compute(&self, x: &[T], y: &[T]) -> f64 {
        self.from_squared_distance(squared_distance_dense(x, y))
    }
}

impl<T> Kernel<Vec<T>> for RBFKernel
where
    T: Copy + Into<f64>,
{
    fn compute(&self, x: &Vec<T>, y: &Vec<T>) -> f64 {
        self.from_squared_distance(squared_distance_dense(x, y))
    }
}

impl<T, const N: usize> Kernel<[T; N]> for RBFKernel
where
    T: Copy + Into<f64>,
{
    fn compute(&self, x: &[T; N], y: &[T; N]) -> f64 {
        self.from_squared_distance(squared_distance_dense(x, y))
    }
}

impl Kernel<SparseVector> for RBFKernel {
    fn compute(&self, x: &SparseVector, y: &SparseVector) -> f64 {
        self.from_squared_distance(squared_distance_sparse(x, y))
    }
}

/// Squared Euclidean distance, treating missing trailing entries as zero
fn squared_distance_dense<T: Copy + Into<f64>>(x: &[T], y: &[T]) -> f64 {
    let common = x.len().min(y.len());
    let shared: f64 = x[..common]
        .iter()
        .zip(&y[..common])
        .map(|(&a, &b)| {
            let diff = a.into() - b.into();
            diff * diff
        })
        .sum();
    let tail: f64 = x[common..]
        .iter()
        .chain(&y[common..])
        .map(|&v| {
            let v = v.into();
            v * v
        })
        .sum();
    shared + tail
}

/// Compute squared Euclidean distance between two sparse vectors
///
/// For sparse vectors this merges the sorted indices:
/// - Indices where both vectors have non-zero values: (xᵢ - yᵢ)²
/// - Indices where only one vector has a value: that value squared
fn squared_distance_sparse(x: &SparseVector, y: &SparseVector) -> f64 {
    let mut distance_sq = 0.0;
    let mut i = 0;
    let mut j = 0;

    while i < x.indices.len() && j < y.indices.len() {
        let x_idx = x.indices[i];
        let y_idx = y.indices[j];

        if x_idx == y_idx {
            let diff = x.values[i] - y.values[j];
            distance_sq += diff * diff;
            i += 1;
            j += 1;
        } else if x_idx < y_idx {
            distance_sq += x.values[i] * x.values[i];
            i += 1;
        } else {
            distance_sq += y.values[j] * y.values[j];
            j += 1;
        }
    }

    distance_sq += x.values[i..].iter().map(|v| v * v).sum::<f64>();
    distance_sq += y.values[j..].iter().map(|v| v * v).sum::<f64>();

    distance_sq
}
