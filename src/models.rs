#![allow(non_snake_case)]

//! Estimation state representations.
//!
//! The belief state is modeled as a struct, the estimate operation as a trait.

use na::storage::Storage;
use na::SimdRealField;
use na::{allocator::Allocator, DefaultAllocator, Dim, MatrixN, RealField, VectorN, U1};
use nalgebra as na;

use crate::error::{EstimateError, Result};
use crate::linalg;

/// Belief State.
///
/// Gaussian posterior over the true hidden state, represented as a state vector and the state
/// covariance (symmetric positive semi-definite) matrix. Owned solely by its estimator and
/// mutated in place by each update.
#[derive(Debug, PartialEq, Clone)]
pub struct BeliefState<N: SimdRealField, D: Dim>
where
    DefaultAllocator: Allocator<N, D, D> + Allocator<N, D>,
{
    /// State vector
    pub x: VectorN<N, D>,
    /// State covariance matrix (symmetric positive semi-definite)
    pub X: MatrixN<N, D>,
}

impl<N: RealField, D: Dim> BeliefState<N, D>
where
    DefaultAllocator: Allocator<N, D, D> + Allocator<N, D>,
{
    /// Creates a belief from a prior mean and covariance.
    ///
    /// The covariance shape must agree with the mean and its diagonal must not be negative.
    pub fn new(x: VectorN<N, D>, X: MatrixN<N, D>) -> Result<BeliefState<N, D>> {
        if X.nrows() != x.nrows() || X.ncols() != x.nrows() {
            return Err(EstimateError::DimensionMismatch(
                "covariance shape does not agree with the state vector",
            ));
        }
        linalg::check_non_negative(
            linalg::rcond_symmetric(&X),
            EstimateError::InvalidParameter("prior covariance not positive semi-definite"),
        )?;

        Ok(BeliefState { x, X })
    }

    pub fn new_zero(d: D) -> BeliefState<N, D> {
        BeliefState {
            x: VectorN::zeros_generic(d, U1),
            X: MatrixN::zeros_generic(d, d),
        }
    }

    /// Dimension of the state vector.
    pub fn dim(&self) -> D {
        self.x.data.shape().0
    }
}

/// A state estimator.
pub trait Estimator<N: SimdRealField, D: Dim>
where
    DefaultAllocator: Allocator<N, D>,
{
    /// The estimator's estimate of the system's state.
    fn state(&self) -> Result<VectorN<N, D>>;
}
