//! Kernel functions for SVM

pub mod linear;
pub mod rbf;
pub mod traits;
pub mod word_count;

pub use self::linear::*;
pub use self::rbf::*;
pub use self::traits::*;
pub use self::word_count::{
    Corpus, Document, TermFrequencyKernel, WordCountKernel, WordFrequency,
};
