//! Recursive Bayesian position tracking.
//!
//! The library tracks the unknown position of a moving object from noisy, indirect observations.
//! Probabilities represent the state of the system: the belief is a Gaussian posterior over the
//! true hidden state, maintained as a mean and covariance pair and revised with each observation
//! by a discrete linear Kalman filter.
//!
//! Two estimators are provided. [`estimators::kalman::KalmanFilter`] is dimensionally generic
//! over nalgebra state and observation dimensions, with arbitrary linear transition and
//! observation matrices and full noise covariance matrices.
//! [`estimators::scalar::ScalarKalman`] is the 1-dimensional closed-form filter, expressed as
//! the 1x1 specialisation of the general recursion.
//!
//! The generative side of the system is modelled too: [`sampling::TransitionModel`] advances the
//! hidden true state and [`sampling::SensorModel`] produces the noisy observation the filter
//! consumes. [`simulation::Tracker`] composes the three into the discrete tick of a tracking
//! simulation.
//!
//! Randomness is always injected as an external generator so estimation runs are seedable and
//! deterministic under test.

pub mod error;
pub mod estimators;
pub mod linalg;
pub mod models;
pub mod noise;
pub mod sampling;
pub mod simulation;
