//! The state estimators.

pub mod kalman;
pub mod scalar;
