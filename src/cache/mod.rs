//! Error cache for the SMO solver
//!
//! Holds one prediction error `E_i = f(x_i) - y_i` per training example.
//! Entries are only trustworthy for non-bound examples (`0 < alpha_i < C`);
//! the solver recomputes errors of bound examples from scratch and never
//! reads their entries. No kernel values are cached.

/// Dense cache of prediction errors, indexed by training example
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorCache {
    errors: Vec<f64>,
}

impl ErrorCache {
    /// Create a cache of `n` zeroed entries
    pub fn new(n: usize) -> Self {
        Self {
            errors: vec![0.0; n],
        }
    }

    /// Cached error of example `i`
    pub fn get(&self, i: usize) -> f64 {
        self.errors[i]
    }

    /// Add `delta` to the cached error of example `i`
    pub fn shift(&mut self, i: usize, delta: f64) {
        self.errors[i] += delta;
    }

    /// Reset the entry of example `i` to zero
    pub fn invalidate(&mut self, i: usize) {
        self.errors[i] = 0.0;
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.errors
    }
}
