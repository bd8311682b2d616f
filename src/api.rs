//! High-level API for Support Vector Machine operations
//!
//! This module provides a user-friendly interface for common SVM tasks,
//! including training, prediction, and model evaluation.
//!
//! # Quick Start
//!
//! ```rust
//! use smosvm::api::SVM;
//! use smosvm::{Classifier, Observation};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let observations = vec![
//!     Observation::new([1, 2], "a"),
//!     Observation::new([1, 3], "a"),
//!     Observation::new([5, 2], "b"),
//!     Observation::new([5, 3], "b"),
//! ];
//!
//! let model = SVM::new().with_c(1.0).train(&observations)?;
//! assert_eq!(model.classify(&[1, 1]), "a");
//! # Ok(())
//! # }
//! ```

use crate::core::{
    BinaryObservation, Classifier, Observation, OptimizerConfig, Result, SVMError,
};
use crate::kernel::{Kernel, LinearKernel};
use crate::multiclass::{MultiClassDecisionModel, MultiClassTrainer};
use crate::optimizer::{BinaryDecisionModel, BinaryTrainer};

/// High-level SVM interface with builder pattern
pub struct SVM<K = LinearKernel> {
    kernel: K,
    config: OptimizerConfig,
}

impl SVM<LinearKernel> {
    /// Create a new SVM with linear kernel and default parameters
    pub fn new() -> Self {
        Self::with_kernel(LinearKernel::new())
    }
}

impl Default for SVM<LinearKernel> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> SVM<K> {
    /// Create SVM with custom kernel
    pub fn with_kernel(kernel: K) -> Self {
        Self {
            kernel,
            config: OptimizerConfig::default(),
        }
    }

    /// Set regularization parameter C
    pub fn with_c(mut self, c: f64) -> Self {
        self.config.c = c;
        self
    }

    /// Set the slack allowed on the KKT conditions
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Set the seed used for tie-breaking
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set maximum number of sweeps
    pub fn with_max_sweeps(mut self, max_sweeps: usize) -> Self {
        self.config.max_sweeps = max_sweeps;
        self
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: OptimizerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Train a binary model on observations labeled -1 / +1
    pub fn train_binary<V>(
        self,
        observations: &[BinaryObservation<V>],
    ) -> Result<BinaryDecisionModel<V, K>>
    where
        V: Clone,
        K: Kernel<V>,
    {
        BinaryTrainer::new(self.kernel, self.config).train(observations)
    }

    /// Train a one-vs-one multi-class model, comparing labels with `==`
    pub fn train<V, L>(
        self,
        observations: &[Observation<V, L>],
    ) -> Result<MultiClassDecisionModel<V, K, L>>
    where
        V: Clone + Send + Sync,
        K: Kernel<V>,
        L: PartialEq + Clone,
    {
        MultiClassTrainer::new(self.kernel, self.config).train(observations)
    }

    /// Train a one-vs-one multi-class model with a custom label equality
    pub fn train_with<V, L, F>(
        self,
        observations: &[Observation<V, L>],
        eq: F,
    ) -> Result<MultiClassDecisionModel<V, K, L>>
    where
        V: Clone + Send + Sync,
        K: Kernel<V>,
        L: Clone,
        F: Fn(&L, &L) -> bool,
    {
        MultiClassTrainer::new(self.kernel, self.config).train_with(observations, eq)
    }
}

/// Fraction of observations whose label the classifier reproduces
///
/// Returns 0 for an empty slice.
pub fn accuracy<V, C>(classifier: &C, observations: &[Observation<V, C::Label>]) -> f64
where
    C: Classifier<V>,
    C::Label: PartialEq,
{
    if observations.is_empty() {
        return 0.0;
    }

    let correct = observations
        .iter()
        .filter(|o| classifier.classify(o.value()) == *o.label())
        .count();

    correct as f64 / observations.len() as f64
}

/// Detailed evaluation metrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationMetrics {
    pub true_positives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl EvaluationMetrics {
    fn new(tp: usize, tn: usize, fp: usize, fn_: usize) -> Self {
        Self {
            true_positives: tp,
            true_negatives: tn,
            false_positives: fp,
            false_negatives: fn_,
        }
    }

    /// Confusion counts of a binary model over labeled observations
    pub fn evaluate<V, K: Kernel<V>>(
        model: &BinaryDecisionModel<V, K>,
        observations: &[BinaryObservation<V>],
    ) -> Self {
        let mut tp = 0; // True positives
        let mut tn = 0; // True negatives
        let mut fp = 0; // False positives
        let mut fn_ = 0; // False negatives

        for observation in observations {
            let predicted = model.predict(observation.value()).label;
            match (predicted > 0, observation.label() > 0) {
                (true, true) => tp += 1,
                (false, false) => tn += 1,
                (true, false) => fp += 1,
                (false, true) => fn_ += 1,
            }
        }

        Self::new(tp, tn, fp, fn_)
    }

    /// Calculate accuracy: (TP + TN) / (TP + TN + FP + FN)
    pub fn accuracy(&self) -> f64 {
        let total =
            self.true_positives + self.true_negatives + self.false_positives + self.false_negatives;
        ratio(self.true_positives + self.true_negatives, total)
    }

    /// Calculate precision: TP / (TP + FP)
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// Calculate recall (sensitivity): TP / (TP + FN)
    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    /// Calculate F1 score: 2 * (precision * recall) / (precision + recall)
    pub fn f1_score(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * (p * r) / (p + r)
        }
    }

    /// Calculate specificity: TN / (TN + FP)
    pub fn specificity(&self) -> f64 {
        ratio(self.true_negatives, self.true_negatives + self.false_positives)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Convenience functions for quick operations
pub mod quick {
    use super::*;

    /// Train a linear binary model with default parameters
    pub fn train_binary<V>(
        observations: &[BinaryObservation<V>],
    ) -> Result<BinaryDecisionModel<V, LinearKernel>>
    where
        V: Clone,
        LinearKernel: Kernel<V>,
    {
        SVM::new().train_binary(observations)
    }

    /// Train a linear multi-class model with default parameters
    pub fn train<V, L>(
        observations: &[Observation<V, L>],
    ) -> Result<MultiClassDecisionModel<V, LinearKernel, L>>
    where
        V: Clone + Send + Sync,
        LinearKernel: Kernel<V>,
        L: PartialEq + Clone,
    {
        SVM::new().train(observations)
    }

    /// Hold-out validation: train on the leading `train_ratio` share of the
    /// observations and report accuracy on the rest
    ///
    /// The split is sequential, not shuffled.
    pub fn simple_validation<V, L>(
        observations: &[Observation<V, L>],
        train_ratio: f64,
        c: f64,
    ) -> Result<f64>
    where
        V: Clone + Send + Sync,
        LinearKernel: Kernel<V>,
        L: PartialEq + Clone + Send + Sync,
    {
        if train_ratio <= 0.0 || train_ratio >= 1.0 {
            return Err(SVMError::InvalidParameter(format!(
                "Train ratio must be between 0 and 1, got: {train_ratio}"
            )));
        }

        let train_size = (observations.len() as f64 * train_ratio) as usize;
        if train_size == 0 || train_size == observations.len() {
            return Err(SVMError::InvalidParameter(format!(
                "Train ratio {train_ratio} leaves no observations on one side of the split"
            )));
        }

        let (train, test) = observations.split_at(train_size);
        let model = SVM::new().with_c(c).train(train)?;
        Ok(accuracy(&model, test))
    }
}
