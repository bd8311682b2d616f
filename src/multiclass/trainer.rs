//! One-vs-one training of multi-class models

use crate::core::{BinaryObservation, Observation, OptimizerConfig, Result, SVMError};
use crate::kernel::Kernel;
use crate::multiclass::{MultiClassDecisionModel, TriangularMatrix};
use crate::optimizer::{BinaryDecisionModel, BinaryTrainer};
use log::{debug, info};
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Trains one binary model per unordered pair of classes
///
/// Every pairwise problem is solved independently with the same kernel and
/// configuration, so the result does not depend on the order in which the
/// pairs are trained. With the `parallel` feature the pairs are trained on
/// the rayon thread pool.
pub struct MultiClassTrainer<K> {
    kernel: Arc<K>,
    config: OptimizerConfig,
}

/// Observations sharing one label, in input order
struct ClassGroup<'a, V, L> {
    label: &'a L,
    values: Vec<&'a V>,
}

impl<K> MultiClassTrainer<K> {
    pub fn new(kernel: K, config: OptimizerConfig) -> Self {
        Self::from_shared(Arc::new(kernel), config)
    }

    pub fn from_shared(kernel: Arc<K>, config: OptimizerConfig) -> Self {
        Self { kernel, config }
    }

    pub fn with_kernel(kernel: K) -> Self {
        Self::new(kernel, OptimizerConfig::default())
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Train a multi-class model, comparing labels with `==`
    pub fn train<V, L>(
        &self,
        observations: &[Observation<V, L>],
    ) -> Result<MultiClassDecisionModel<V, K, L>>
    where
        V: Clone + Send + Sync,
        K: Kernel<V>,
        L: PartialEq + Clone,
    {
        self.train_with(observations, |a, b| a == b)
    }

    /// Train a multi-class model, comparing labels with `eq`
    ///
    /// Labels are numbered in the order they first appear. The classifier for
    /// the pair `(i, j)` is trained with class `i` as `-1` and class `j` as
    /// `+1`. A single class gives a model without classifiers that always
    /// answers that class.
    ///
    /// # Errors
    /// [`SVMError::EmptyDataset`] without observations, and
    /// [`SVMError::PairwiseTraining`] wrapping the failure of any pair.
    pub fn train_with<V, L, F>(
        &self,
        observations: &[Observation<V, L>],
        eq: F,
    ) -> Result<MultiClassDecisionModel<V, K, L>>
    where
        V: Clone + Send + Sync,
        K: Kernel<V>,
        L: Clone,
        F: Fn(&L, &L) -> bool,
    {
        if observations.is_empty() {
            return Err(SVMError::EmptyDataset);
        }
        self.config.validate()?;

        let groups = group_by_label(observations, eq);
        let n_classes = groups.len();
        let pairs: Vec<(usize, usize)> = TriangularMatrix::<()>::coordinates(n_classes).collect();

        info!(
            "training {} pairwise classifiers for {} classes on {} observations",
            pairs.len(),
            n_classes,
            observations.len()
        );

        let values: Vec<&[&V]> = groups.iter().map(|g| g.values.as_slice()).collect();
        let train = |&(i, j): &(usize, usize)| {
            self.train_pair(values[i], values[j])
                .map_err(|source| SVMError::PairwiseTraining {
                    first: i,
                    second: j,
                    source: Box::new(source),
                })
        };

        #[cfg(feature = "parallel")]
        let classifiers = pairs.par_iter().map(train).collect::<Result<Vec<_>>>()?;
        #[cfg(not(feature = "parallel"))]
        let classifiers = pairs.iter().map(train).collect::<Result<Vec<_>>>()?;

        let labels: Vec<L> = groups.into_iter().map(|g| g.label.clone()).collect();
        info!("trained multi-class model with {} classes", n_classes);

        Ok(MultiClassDecisionModel::from_parts(
            TriangularMatrix::from_row_major(n_classes, classifiers),
            labels,
        ))
    }

    fn train_pair<V>(&self, negatives: &[&V], positives: &[&V]) -> Result<BinaryDecisionModel<V, K>>
    where
        V: Clone,
        K: Kernel<V>,
    {
        let observations: Vec<BinaryObservation<V>> = negatives
            .iter()
            .map(|&v| BinaryObservation::negative(v.clone()))
            .chain(positives.iter().map(|&v| BinaryObservation::positive(v.clone())))
            .collect();

        let trainer = BinaryTrainer::from_shared(Arc::clone(&self.kernel), self.config.clone());
        let model = trainer.train(&observations)?;
        debug!(
            "pair of {} vs {} observations: {} support vectors",
            negatives.len(),
            positives.len(),
            model.n_support_vectors()
        );
        Ok(model)
    }
}

fn group_by_label<'a, V, L, F>(observations: &'a [Observation<V, L>], eq: F) -> Vec<ClassGroup<'a, V, L>>
where
    F: Fn(&L, &L) -> bool,
{
    let mut groups: Vec<ClassGroup<'a, V, L>> = Vec::new();

    for observation in observations {
        let label = observation.label();
        match groups.iter_mut().find(|g| eq(g.label, label)) {
            Some(group) => group.values.push(observation.value()),
            None => groups.push(ClassGroup {
                label,
                values: vec![observation.value()],
            }),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Classifier;
    use crate::kernel::LinearKernel;

    fn observations() -> Vec<Observation<[i32; 2], char>> {
        vec![
            Observation::new([1, 2], 'a'),
            Observation::new([5, 2], 'b'),
            Observation::new([5, 9], 'c'),
            Observation::new([1, 3], 'a'),
            Observation::new([5, 3], 'b'),
            Observation::new([6, 9], 'c'),
            Observation::new([1, 4], 'a'),
            Observation::new([5, 4], 'b'),
            Observation::new([7, 9], 'c'),
        ]
    }

    #[test]
    fn test_group_by_label_first_seen_order() {
        let observations = vec![
            Observation::new(1, "y"),
            Observation::new(2, "x"),
            Observation::new(3, "y"),
            Observation::new(4, "z"),
        ];
        let groups = group_by_label(&observations, |a, b| a == b);

        let labels: Vec<&str> = groups.iter().map(|g| *g.label).collect();
        assert_eq!(labels, vec!["y", "x", "z"]);
        assert_eq!(groups[0].values, vec![&1, &3]);
    }

    #[test]
    fn test_group_by_label_custom_equality() {
        let observations = vec![
            Observation::new(1, "Spam".to_string()),
            Observation::new(2, "ham".to_string()),
            Observation::new(3, "SPAM".to_string()),
        ];
        let groups = group_by_label(&observations, |a, b| a.eq_ignore_ascii_case(b));

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "Spam");
        assert_eq!(groups[0].values, vec![&1, &3]);
    }

    #[test]
    fn test_train_three_classes() {
        let trainer = MultiClassTrainer::with_kernel(LinearKernel::new());
        let model = trainer
            .train(&observations())
            .expect("Training should succeed");

        assert_eq!(model.labels(), &['a', 'b', 'c']);
        assert_eq!(model.n_classifiers(), 3);
        assert_eq!(model.classify(&[1, 2]), 'a');
        assert_eq!(model.classify(&[7, 2]), 'b');
        assert_eq!(model.classify(&[1, 9]), 'c');
    }

    #[test]
    fn test_pair_orientation() {
        let trainer = MultiClassTrainer::with_kernel(LinearKernel::new());
        let model = trainer
            .train(&observations())
            .expect("Training should succeed");

        // Class 0 ('a') is the negative side, class 1 ('b') the positive side
        let ab = model.classifier(0, 1).expect("pair (0, 1) is trained");
        assert_eq!(ab.classify(&[1, 1]), -1);
        assert_eq!(ab.classify(&[8, 1]), 1);
    }

    #[test]
    fn test_single_class() {
        let trainer = MultiClassTrainer::with_kernel(LinearKernel::new());
        let observations = vec![Observation::new([0, 0], 5), Observation::new([3, 3], 5)];

        let model = trainer.train(&observations).expect("Single class is valid");
        assert_eq!(model.n_classes(), 1);
        assert_eq!(model.n_classifiers(), 0);
        assert_eq!(model.classify(&[9, 9]), 5);
    }

    #[test]
    fn test_empty_dataset() {
        let trainer = MultiClassTrainer::with_kernel(LinearKernel::new());
        let observations: Vec<Observation<[i32; 2], char>> = Vec::new();

        assert!(matches!(
            trainer.train(&observations),
            Err(SVMError::EmptyDataset)
        ));
    }

    #[test]
    fn test_pair_failure_is_wrapped() {
        let config = OptimizerConfig {
            max_sweeps: 1,
            ..Default::default()
        };
        let trainer = MultiClassTrainer::new(LinearKernel::new(), config);

        match trainer.train(&observations()) {
            Err(SVMError::PairwiseTraining { first, second, source }) => {
                assert!(first < second && second < 3);
                assert!(matches!(*source, SVMError::ConvergenceFailure { sweeps: 1 }));
            }
            other => panic!("expected a pairwise failure, got {:?}", other.map(|m| m.n_classes())),
        }
    }

    #[test]
    fn test_invalid_config() {
        let config = OptimizerConfig {
            c: 0.0,
            ..Default::default()
        };
        let trainer = MultiClassTrainer::new(LinearKernel::new(), config);

        assert!(matches!(
            trainer.train(&observations()),
            Err(SVMError::InvalidParameter(_))
        ));
    }
}
