//! Multi-class classification by one-vs-one composition of binary models

pub mod matrix;
pub mod model;
pub mod trainer;

pub use self::matrix::TriangularMatrix;
pub use self::model::MultiClassDecisionModel;
pub use self::trainer::MultiClassTrainer;
