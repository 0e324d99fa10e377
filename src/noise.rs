#![allow(non_snake_case)]

//! Additive Gaussian noise models.
//!
//! Noise is zero-mean and described entirely by its covariance. The same representation serves
//! as process noise (uncertainty injected by the unmodeled dynamics between ticks) and as
//! measurement noise (uncertainty in the observation given the true state).
//!
//! A noise model may be reassigned on a live filter between updates; each update reads
//! whatever covariance is current at that instant.

use na::SimdRealField;
use na::{allocator::Allocator, DefaultAllocator, Dim, Matrix1, MatrixN, RealField, VectorN, U1};
use nalgebra as na;

use crate::error::{EstimateError, Result};

/// Additive noise.
///
/// Noise represented as a full covariance matrix.
#[derive(PartialEq, Clone)]
pub struct CorrelatedNoise<N: SimdRealField, D: Dim>
where
    DefaultAllocator: Allocator<N, D, D>,
{
    /// Noise covariance
    pub Q: MatrixN<N, D>,
}

impl<N: RealField, D: Dim> CorrelatedNoise<N, D>
where
    DefaultAllocator: Allocator<N, D, D> + Allocator<N, D>,
{
    /// Creates a CorrelatedNoise from a covariance matrix, rejecting non-square shapes.
    pub fn from_covariance(Q: MatrixN<N, D>) -> Result<Self> {
        if Q.nrows() != Q.ncols() {
            return Err(EstimateError::DimensionMismatch(
                "noise covariance must be square",
            ));
        }
        Ok(CorrelatedNoise { Q })
    }

    /// Creates a CorrelatedNoise with the given diagonal and zero correlation.
    pub fn from_diagonal(q: &VectorN<N, D>) -> Self {
        CorrelatedNoise {
            Q: MatrixN::from_diagonal(q),
        }
    }

    /// Creates an isotropic CorrelatedNoise, variance * identity.
    pub fn isotropic(variance: N, d: D) -> Self {
        CorrelatedNoise {
            Q: MatrixN::identity_generic(d, d) * variance,
        }
    }

    /// Creates an isotropic CorrelatedNoise from a slider-style control value.
    ///
    /// A control in [0, 1] is mapped to covariance units by a fixed multiplier,
    /// Q = scale * value * identity.
    pub fn from_slider(scale: N, value: N, d: D) -> Self {
        Self::isotropic(scale * value, d)
    }
}

impl<N: RealField> CorrelatedNoise<N, U1> {
    /// Creates a 1x1 CorrelatedNoise from a standard deviation, squared to a variance.
    pub fn from_std_dev(sigma: N) -> Self {
        CorrelatedNoise {
            Q: Matrix1::new(sigma * sigma),
        }
    }
}
