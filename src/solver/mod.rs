//! SVM solver implementations
//!
//! This module implements the Sequential Minimal Optimization (SMO) algorithm
//! as described in "Fast Training of Support Vector Machines using Sequential
//! Minimal Optimization" by John C. Platt.

pub mod smo;

pub use self::smo::*;
