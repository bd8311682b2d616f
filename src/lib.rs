//! Kernel Support Vector Machines trained with Sequential Minimal Optimization
//!
//! Based on "Fast Training of Support Vector Machines using Sequential Minimal
//! Optimization" by John C. Platt. Binary models are trained directly; models
//! for more than two classes combine one binary model per pair of classes and
//! classify by tournament elimination.

pub mod api;
pub mod cache;
pub mod core;
pub mod kernel;
pub mod multiclass;
pub mod optimizer;
pub mod solver;

// Re-export main types for convenience
pub use crate::api::{accuracy, EvaluationMetrics, SVM};
pub use crate::cache::ErrorCache;
pub use crate::core::error::{Result, SVMError};
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::kernel::{
    Corpus, Document, Kernel, LinearKernel, RBFKernel, TermFrequencyKernel, WordCountKernel,
    WordFrequency,
};
pub use crate::multiclass::{MultiClassDecisionModel, MultiClassTrainer, TriangularMatrix};
pub use crate::optimizer::{BinaryDecisionModel, BinaryTrainer};
pub use crate::solver::SMOSolver;

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
