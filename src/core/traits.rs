//! Core traits for SVM implementation

/// A trained decision model mapping values to labels
pub trait Classifier<V>: Send + Sync {
    /// Label type produced by the model
    type Label;

    /// Classify a single value
    fn classify(&self, value: &V) -> Self::Label;

    /// Classify several values in order
    fn classify_batch(&self, values: &[V]) -> Vec<Self::Label> {
        values.iter().map(|v| self.classify(v)).collect()
    }
}
