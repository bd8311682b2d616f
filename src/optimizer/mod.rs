//! Binary SVM training and the trained decision model
//!
//! [`BinaryTrainer`] runs the SMO solver over binary observations and keeps
//! the examples with a positive multiplier as the support vectors of a
//! [`BinaryDecisionModel`].

use crate::core::{
    BinaryObservation, Classifier, OptimizationResult, OptimizerConfig, Prediction, Result,
    SupportVector,
};
use crate::kernel::Kernel;
use crate::solver::SMOSolver;
use log::debug;
use std::sync::Arc;

/// Trains binary decision models with a shared kernel
pub struct BinaryTrainer<K> {
    kernel: Arc<K>,
    config: OptimizerConfig,
}

impl<K> BinaryTrainer<K> {
    /// Create a new trainer with the given kernel and configuration
    pub fn new(kernel: K, config: OptimizerConfig) -> Self {
        Self::from_shared(Arc::new(kernel), config)
    }

    /// Create a trainer around a kernel that is already shared
    pub fn from_shared(kernel: Arc<K>, config: OptimizerConfig) -> Self {
        Self { kernel, config }
    }

    /// Create a new trainer with default configuration
    pub fn with_kernel(kernel: K) -> Self {
        Self::new(kernel, OptimizerConfig::default())
    }

    /// Get the optimizer configuration
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Get the kernel
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Train a binary decision model on the given observations
    ///
    /// Fewer than two observations, or observations of a single class, give a
    /// model without support vectors.
    pub fn train<V>(&self, observations: &[BinaryObservation<V>]) -> Result<BinaryDecisionModel<V, K>>
    where
        V: Clone,
        K: Kernel<V>,
    {
        let solver = SMOSolver::new(Arc::clone(&self.kernel), self.config.clone());
        let result = solver.solve(observations)?;

        let model = BinaryDecisionModel::from_result(Arc::clone(&self.kernel), observations, &result);
        debug!(
            "trained binary model on {} observations: {} support vectors, b = {}",
            observations.len(),
            model.n_support_vectors(),
            model.bias()
        );
        Ok(model)
    }
}

/// A trained binary classifier: `f(x) = Σ αᵢ yᵢ K(svᵢ, x) - b`
///
/// Values with `f(x) < 0` are classified `-1`, all others `+1`.
#[derive(Debug)]
pub struct BinaryDecisionModel<V, K> {
    b: f64,
    support_vectors: Vec<SupportVector<V>>,
    kernel: Arc<K>,
}

impl<V, K> BinaryDecisionModel<V, K> {
    /// Assemble a model from its parts
    pub fn new(b: f64, support_vectors: Vec<SupportVector<V>>, kernel: Arc<K>) -> Self {
        Self {
            b,
            support_vectors,
            kernel,
        }
    }

    pub(crate) fn from_result(
        kernel: Arc<K>,
        observations: &[BinaryObservation<V>],
        result: &OptimizationResult,
    ) -> Self
    where
        V: Clone,
    {
        let support_vectors = observations
            .iter()
            .zip(&result.alphas)
            .filter(|&(_, &alpha)| alpha > 0.0)
            .map(|(observation, &alpha)| SupportVector::new(alpha, observation.clone()))
            .collect();

        Self::new(result.b, support_vectors, kernel)
    }

    /// Get the support vectors
    pub fn support_vectors(&self) -> &[SupportVector<V>] {
        &self.support_vectors
    }

    /// Number of support vectors
    pub fn n_support_vectors(&self) -> usize {
        self.support_vectors.len()
    }

    /// Threshold subtracted from the kernel expansion
    pub fn bias(&self) -> f64 {
        self.b
    }

    /// Get the kernel
    pub fn kernel(&self) -> &K {
        &self.kernel
    }
}

impl<V, K: Kernel<V>> BinaryDecisionModel<V, K> {
    /// Raw decision function value for `value`
    pub fn decision_value(&self, value: &V) -> f64 {
        let sum: f64 = self
            .support_vectors
            .iter()
            .map(|sv| {
                sv.alpha * sv.observation.sign() * self.kernel.compute(sv.observation.value(), value)
            })
            .sum();
        sum - self.b
    }

    /// Label together with the decision value it was derived from
    pub fn predict(&self, value: &V) -> Prediction {
        let decision_value = self.decision_value(value);
        let label = if decision_value < 0.0 { -1 } else { 1 };
        Prediction::new(label, decision_value)
    }
}

impl<V, K> Classifier<V> for BinaryDecisionModel<V, K>
where
    V: Send + Sync,
    K: Kernel<V>,
{
    type Label = i32;

    fn classify(&self, value: &V) -> i32 {
        self.predict(value).label
    }
}
