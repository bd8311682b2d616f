//! Core type definitions for SVM

use crate::core::{Result, SVMError};

/// Prediction result containing label and decision value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Predicted class label (+1 or -1)
    pub label: i32,
    /// Raw decision function value
    pub decision_value: f64,
}

impl Prediction {
    /// Create a new prediction
    pub fn new(label: i32, decision_value: f64) -> Self {
        Self {
            label,
            decision_value,
        }
    }

    /// Get confidence as absolute value of decision value
    pub fn confidence(&self) -> f64 {
        self.decision_value.abs()
    }
}

/// Sparse vector representation with sorted indices
#[derive(Clone, Debug, PartialEq)]
pub struct SparseVector {
    /// Sorted indices of non-zero elements
    pub indices: Vec<usize>,
    /// Values corresponding to indices
    pub values: Vec<f64>,
}

impl SparseVector {
    /// Create a new sparse vector, ensuring indices are sorted
    pub fn new(indices: Vec<usize>, values: Vec<f64>) -> Self {
        assert_eq!(
            indices.len(),
            values.len(),
            "Indices and values must have same length"
        );

        let mut pairs: Vec<_> = indices.into_iter().zip(values).collect();
        pairs.sort_by_key(|&(idx, _)| idx);

        let (indices, values): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        Self { indices, values }
    }

    /// Create an empty sparse vector
    pub fn empty() -> Self {
        Self {
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Get the value at a specific index (0 if not present)
    pub fn get(&self, index: usize) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    /// Compute squared L2 norm
    pub fn norm_squared(&self) -> f64 {
        self.values.iter().map(|&v| v * v).sum()
    }

    /// Number of non-zero elements
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Check if vector is empty
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// A labeled training example.
///
/// Observations are immutable once built; the multi-class trainer groups them
/// by label and the binary trainer consumes their [`BinaryObservation`] form.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation<V, L> {
    value: V,
    label: L,
}

impl<V, L> Observation<V, L> {
    pub fn new(value: V, label: L) -> Self {
        Self { value, label }
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn label(&self) -> &L {
        &self.label
    }

    pub fn into_parts(self) -> (V, L) {
        (self.value, self.label)
    }
}

/// A training example for a two-class problem, labeled -1 or +1.
#[derive(Clone, Debug, PartialEq)]
pub struct BinaryObservation<V> {
    value: V,
    label: i32,
}

impl<V> BinaryObservation<V> {
    /// Create a binary observation
    ///
    /// # Errors
    /// Returns [`SVMError::InvalidLabel`] unless `label` is -1 or +1.
    pub fn new(value: V, label: i32) -> Result<Self> {
        if label != 1 && label != -1 {
            return Err(SVMError::InvalidLabel(label));
        }
        Ok(Self { value, label })
    }

    /// Observation of the +1 class
    pub fn positive(value: V) -> Self {
        Self { value, label: 1 }
    }

    /// Observation of the -1 class
    pub fn negative(value: V) -> Self {
        Self { value, label: -1 }
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    /// Class label, always -1 or +1
    pub fn label(&self) -> i32 {
        self.label
    }

    pub(crate) fn sign(&self) -> f64 {
        f64::from(self.label)
    }
}

impl<V> From<BinaryObservation<V>> for Observation<V, i32> {
    fn from(observation: BinaryObservation<V>) -> Self {
        Observation::new(observation.value, observation.label)
    }
}

/// A training example retained by a trained model, with its multiplier
#[derive(Clone, Debug, PartialEq)]
pub struct SupportVector<V> {
    /// Lagrange multiplier, strictly positive
    pub alpha: f64,
    /// The training example
    pub observation: BinaryObservation<V>,
}

impl<V> SupportVector<V> {
    pub fn new(alpha: f64, observation: BinaryObservation<V>) -> Self {
        Self { alpha, observation }
    }
}

/// Result of optimization process
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    /// Lagrange multipliers (alpha values), one per training example
    pub alphas: Vec<f64>,
    /// Threshold subtracted from the kernel expansion
    pub b: f64,
    /// Number of sweeps over the training set (full or non-bound)
    pub sweeps: usize,
    /// Number of successful joint updates
    pub steps: usize,
    /// Final dual objective value
    pub objective_value: f64,
}

impl OptimizationResult {
    /// Indices of examples with a positive multiplier
    pub fn support_vector_indices(&self) -> Vec<usize> {
        self.alphas
            .iter()
            .enumerate()
            .filter(|&(_, &alpha)| alpha > 0.0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether example `i` lies strictly inside the box `(0, c)`
    pub fn is_non_bound(&self, i: usize, c: f64) -> bool {
        self.alphas[i] > 0.0 && self.alphas[i] < c
    }
}

/// Configuration for optimizer
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerConfig {
    /// Regularization parameter (upper bound for alpha)
    pub c: f64,
    /// Slack allowed on the KKT conditions
    pub tolerance: f64,
    /// Floor below which a change in alpha counts as no change
    pub eps: f64,
    /// Width under which the feasible segment `[L, H]` counts as empty
    pub bound_epsilon: f64,
    /// Seed of the pseudo-random source used for tie-breaking
    pub seed: u64,
    /// Maximum number of sweeps before giving up
    ///
    /// Full and non-bound sweeps both count. Loosely regularized problems on
    /// overlapping data can take tens of thousands of sweeps.
    pub max_sweeps: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            c: 0.05,
            tolerance: 1e-3,
            eps: 2.2204460492503131e-16,
            bound_epsilon: 1e-9,
            seed: 42,
            max_sweeps: 1_000_000,
        }
    }
}

impl OptimizerConfig {
    /// Check that every parameter is usable by the solver
    pub fn validate(&self) -> Result<()> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(SVMError::InvalidParameter(format!(
                "C must be positive and finite, got: {}",
                self.c
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(SVMError::InvalidParameter(format!(
                "Tolerance must be non-negative, got: {}",
                self.tolerance
            )));
        }
        if !(self.eps.is_finite() && self.eps > 0.0) {
            return Err(SVMError::InvalidParameter(format!(
                "Eps must be positive, got: {}",
                self.eps
            )));
        }
        if !(self.bound_epsilon.is_finite() && self.bound_epsilon >= 0.0) {
            return Err(SVMError::InvalidParameter(format!(
                "Bound epsilon must be non-negative, got: {}",
                self.bound_epsilon
            )));
        }
        if self.max_sweeps == 0 {
            return Err(SVMError::InvalidParameter(
                "Maximum number of sweeps must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_vector_creation() {
        let indices = vec![2, 0, 4];
        let values = vec![2.0, 1.0, 3.0];
        let sv = SparseVector::new(indices, values);

        // Check that indices are sorted
        assert_eq!(sv.indices, vec![0, 2, 4]);
        assert_eq!(sv.values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_sparse_vector_get() {
        let sv = SparseVector::new(vec![1, 3, 5], vec![1.0, 2.0, 3.0]);

        assert_eq!(sv.get(0), 0.0);
        assert_eq!(sv.get(3), 2.0);
        assert_eq!(sv.get(6), 0.0);
        assert_eq!(sv.norm_squared(), 14.0);
        assert_eq!(sv.nnz(), 3);
        assert!(SparseVector::empty().is_empty());
    }

    #[test]
    #[should_panic(expected = "Indices and values must have same length")]
    fn test_sparse_vector_length_mismatch() {
        SparseVector::new(vec![0, 1], vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_prediction() {
        let pred = Prediction::new(-1, -1.8);
        assert_eq!(pred.label, -1);
        assert_eq!(pred.confidence(), 1.8);
    }

    #[test]
    fn test_binary_observation_accepts_signs() {
        let neg = BinaryObservation::new([0, 1], -1).expect("-1 is a valid label");
        let pos = BinaryObservation::new([0, 1], 1).expect("+1 is a valid label");
        assert_eq!(neg.label(), -1);
        assert_eq!(pos.label(), 1);
        assert_eq!(neg.sign(), -1.0);
        assert_eq!(BinaryObservation::positive(3).label(), 1);
        assert_eq!(BinaryObservation::negative(3).label(), -1);
    }

    #[test]
    fn test_binary_observation_rejects_other_labels() {
        for label in [0, 2, -2, 7, i32::MIN, i32::MAX] {
            let result = BinaryObservation::new(1.0, label);
            assert!(matches!(result, Err(SVMError::InvalidLabel(l)) if l == label));
        }
    }

    #[test]
    fn test_observation_parts() {
        let obs = Observation::new(vec![1.0, 2.0], "a");
        assert_eq!(obs.value(), &vec![1.0, 2.0]);
        assert_eq!(*obs.label(), "a");

        let general: Observation<_, i32> = BinaryObservation::negative(5).into();
        assert_eq!(general.into_parts(), (5, -1));
    }

    #[test]
    fn test_optimization_result_helpers() {
        let result = OptimizationResult {
            alphas: vec![0.0, 0.05, 0.02, 0.0],
            b: 0.5,
            sweeps: 3,
            steps: 2,
            objective_value: 0.1,
        };
        assert_eq!(result.support_vector_indices(), vec![1, 2]);
        assert!(!result.is_non_bound(1, 0.05));
        assert!(result.is_non_bound(2, 0.05));
        assert!(!result.is_non_bound(3, 0.05));
    }

    #[test]
    fn test_optimizer_config_default() {
        let config = OptimizerConfig::default();
        assert_eq!(config.c, 0.05);
        assert_eq!(config.tolerance, 1e-3);
        assert_eq!(config.eps, f64::EPSILON);
        assert_eq!(config.bound_epsilon, 1e-9);
        assert_eq!(config.seed, 42);
        assert_eq!(config.max_sweeps, 1_000_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_optimizer_config_validation() {
        let invalid = [
            OptimizerConfig {
                c: 0.0,
                ..Default::default()
            },
            OptimizerConfig {
                c: f64::INFINITY,
                ..Default::default()
            },
            OptimizerConfig {
                tolerance: -1.0,
                ..Default::default()
            },
            OptimizerConfig {
                eps: 0.0,
                ..Default::default()
            },
            OptimizerConfig {
                bound_epsilon: f64::NAN,
                ..Default::default()
            },
            OptimizerConfig {
                max_sweeps: 0,
                ..Default::default()
            },
        ];

        for config in &invalid {
            assert!(
                matches!(config.validate(), Err(SVMError::InvalidParameter(_))),
                "{config:?} should be rejected"
            );
        }
    }
}
