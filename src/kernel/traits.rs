//! Kernel trait definition

/// Kernel function trait
///
/// A kernel `K(x, y)` measures the similarity of two values of the domain
/// type `V`. Implementations must be deterministic and symmetric
/// (`K(x, y) == K(y, x)`); the solver relies on both but checks neither.
/// For SMO to find the optimum the Gram matrix should also be positive
/// semi-definite.
///
/// Kernels are shared read-only between concurrent pairwise trainings, hence
/// the `Send + Sync` bound.
pub trait Kernel<V: ?Sized>: Send + Sync {
    /// Compute kernel value K(x, y)
    fn compute(&self, x: &V, y: &V) -> f64;
}
