//! Error types for SVM implementation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SVMError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid label: expected -1 or +1, got {0}")]
    InvalidLabel(i32),

    #[error("Empty dataset")]
    EmptyDataset,

    #[error("Optimization did not converge after {sweeps} sweeps")]
    ConvergenceFailure { sweeps: usize },

    #[error("Training classifier for classes {first} and {second} failed: {source}")]
    PairwiseTraining {
        first: usize,
        second: usize,
        #[source]
        source: Box<SVMError>,
    },
}

pub type Result<T> = std::result::Result<T, SVMError>;
