//! One-vs-one multi-class decision model

use crate::core::Classifier;
use crate::kernel::Kernel;
use crate::multiclass::TriangularMatrix;
use crate::optimizer::BinaryDecisionModel;

/// A multi-class classifier assembled from pairwise binary models
///
/// Classes are numbered in the order their labels were first seen during
/// training. The model for the pair `(i, j)`, `i < j`, answers `-1` for class
/// `i` and `+1` for class `j`.
///
/// Classification runs a tournament over the class ids: the candidates are
/// `first..=last`, and each binary decision eliminates one end of the range
/// (`-1` eliminates `last`, `+1` eliminates `first`). The surviving id is
/// mapped back to its label after exactly `k - 1` binary classifications.
#[derive(Debug)]
pub struct MultiClassDecisionModel<V, K, L> {
    classifiers: TriangularMatrix<BinaryDecisionModel<V, K>>,
    labels: Vec<L>,
}

impl<V, K, L> MultiClassDecisionModel<V, K, L> {
    /// Assemble a model from pairwise classifiers and the id to label table
    ///
    /// Returns `None` when there is no class, or when the matrix and the table
    /// disagree on the number of classes.
    pub fn new(
        classifiers: TriangularMatrix<BinaryDecisionModel<V, K>>,
        labels: Vec<L>,
    ) -> Option<Self> {
        let consistent = !labels.is_empty() && classifiers.size() == labels.len();
        consistent.then_some(Self { classifiers, labels })
    }

    pub(crate) fn from_parts(
        classifiers: TriangularMatrix<BinaryDecisionModel<V, K>>,
        labels: Vec<L>,
    ) -> Self {
        debug_assert!(!labels.is_empty());
        debug_assert_eq!(classifiers.size(), labels.len());
        Self { classifiers, labels }
    }

    /// Labels indexed by class id
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Number of classes
    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// Number of pairwise binary classifiers, `k * (k - 1) / 2`
    pub fn n_classifiers(&self) -> usize {
        self.classifiers.len()
    }

    /// Binary classifier separating class `i` (`-1`) from class `j` (`+1`)
    pub fn classifier(&self, i: usize, j: usize) -> Option<&BinaryDecisionModel<V, K>> {
        self.classifiers.get(i, j)
    }

    /// All pairwise classifiers
    pub fn classifiers(&self) -> &TriangularMatrix<BinaryDecisionModel<V, K>> {
        &self.classifiers
    }
}

impl<V, K: Kernel<V>, L> MultiClassDecisionModel<V, K, L> {
    /// Class id chosen by the tournament
    pub fn classify_id(&self, value: &V) -> usize {
        let mut first = 0;
        let mut last = self.n_classes().saturating_sub(1);

        while first < last {
            let decision = self
                .classifiers
                .get(first, last)
                .map_or(1, |model| model.predict(value).label);

            if decision < 0 {
                last -= 1;
            } else {
                first += 1;
            }
        }

        first
    }
}

impl<V, K, L> Classifier<V> for MultiClassDecisionModel<V, K, L>
where
    V: Send + Sync,
    K: Kernel<V>,
    L: Clone + Send + Sync,
{
    type Label = L;

    fn classify(&self, value: &V) -> L {
        self.labels[self.classify_id(value)].clone()
    }
}
