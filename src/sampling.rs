#![allow(non_snake_case)]

//! Generative models of the tracked system.
//!
//! [`TransitionModel`] samples the next true state, [`SensorModel`] samples a noisy observation
//! of the current true state. Both are pure functions of their inputs plus an injected
//! randomness source; they hold no mutable state beyond their configurable noise covariance
//! and never touch an estimator's belief.
//!
//! A multivariate draw is `mean + L.e` where `L` is the Cholesky factor of the noise covariance
//! and `e` is a vector of independent standard normal draws. An all-zero covariance is treated
//! as a point mass; a nonzero covariance that cannot be factorised is rejected.

use na::storage::Storage;
use na::SimdRealField;
use na::{allocator::Allocator, DefaultAllocator, Dim, MatrixMN, MatrixN, RealField, VectorN, U1};
use nalgebra as na;
use num_traits::Float;
use rand_core::RngCore;
use rand_distr::{Distribution, Normal, StandardNormal};

use crate::error::{EstimateError, Result};
use crate::noise::CorrelatedNoise;

/// Linear motion model with additive Gaussian process noise.
pub struct TransitionModel<N: SimdRealField, D: Dim>
where
    DefaultAllocator: Allocator<N, D, D>,
{
    /// State transition matrix
    pub Fx: MatrixN<N, D>,
    /// Process noise
    pub noise: CorrelatedNoise<N, D>,
}

impl<N: RealField, D: Dim> TransitionModel<N, D>
where
    DefaultAllocator: Allocator<N, D, D> + Allocator<N, D>,
    StandardNormal: Distribution<N>,
{
    pub fn new(Fx: MatrixN<N, D>, noise: CorrelatedNoise<N, D>) -> Result<TransitionModel<N, D>> {
        if Fx.nrows() != Fx.ncols() {
            return Err(EstimateError::DimensionMismatch(
                "transition matrix must be square",
            ));
        }
        if noise.Q.nrows() != Fx.nrows() || noise.Q.ncols() != Fx.nrows() {
            return Err(EstimateError::DimensionMismatch(
                "process noise shape does not agree with the transition matrix",
            ));
        }
        Ok(TransitionModel { Fx, noise })
    }

    /// Samples the next true state, a Gaussian draw centred at `Fx.x`.
    pub fn sample_next<R: RngCore + ?Sized>(
        &self,
        x: &VectorN<N, D>,
        rng: &mut R,
    ) -> Result<VectorN<N, D>> {
        if x.nrows() != self.Fx.ncols() {
            return Err(EstimateError::DimensionMismatch(
                "state length does not agree with the transition matrix",
            ));
        }
        gaussian_draw(&(&self.Fx * x), &self.noise.Q, rng)
    }
}

/// Linear sensor model with additive Gaussian measurement noise.
pub struct SensorModel<N: SimdRealField, D: Dim, ZD: Dim>
where
    DefaultAllocator: Allocator<N, ZD, D> + Allocator<N, ZD, ZD>,
{
    /// Observation matrix
    pub Hx: MatrixMN<N, ZD, D>,
    /// Measurement noise
    pub noise: CorrelatedNoise<N, ZD>,
}

impl<N: RealField, D: Dim, ZD: Dim> SensorModel<N, D, ZD>
where
    DefaultAllocator:
        Allocator<N, ZD, D> + Allocator<N, ZD, ZD> + Allocator<N, D> + Allocator<N, ZD>,
    StandardNormal: Distribution<N>,
{
    pub fn new(Hx: MatrixMN<N, ZD, D>, noise: CorrelatedNoise<N, ZD>) -> Result<SensorModel<N, D, ZD>> {
        if noise.Q.nrows() != Hx.nrows() || noise.Q.ncols() != Hx.nrows() {
            return Err(EstimateError::DimensionMismatch(
                "measurement noise shape does not agree with the observation matrix",
            ));
        }
        Ok(SensorModel { Hx, noise })
    }

    /// Samples a noisy observation of the true state, a Gaussian draw centred at `Hx.x`.
    pub fn sample<R: RngCore + ?Sized>(
        &self,
        x: &VectorN<N, D>,
        rng: &mut R,
    ) -> Result<VectorN<N, ZD>> {
        if x.nrows() != self.Hx.ncols() {
            return Err(EstimateError::DimensionMismatch(
                "state length does not agree with the observation matrix",
            ));
        }
        gaussian_draw(&(&self.Hx * x), &self.noise.Q, rng)
    }
}

/// Samples a 1-dimensional Gaussian motion step.
pub fn sample_motion<N, R>(mean: N, sigma: N, rng: &mut R) -> Result<N>
where
    N: Float,
    StandardNormal: Distribution<N>,
    R: RngCore + ?Sized,
{
    scalar_draw(mean, sigma, rng)
}

/// Samples a 1-dimensional noisy observation of a true value.
pub fn sample_observation<N, R>(mean: N, sigma: N, rng: &mut R) -> Result<N>
where
    N: Float,
    StandardNormal: Distribution<N>,
    R: RngCore + ?Sized,
{
    scalar_draw(mean, sigma, rng)
}

fn scalar_draw<N, R>(mean: N, sigma: N, rng: &mut R) -> Result<N>
where
    N: Float,
    StandardNormal: Distribution<N>,
    R: RngCore + ?Sized,
{
    // Normal::new does not reject a negative standard deviation
    if !sigma.is_finite() || sigma < N::zero() {
        return Err(EstimateError::InvalidParameter(
            "standard deviation must be finite and non-negative",
        ));
    }
    let normal = Normal::new(mean, sigma).map_err(|_| {
        EstimateError::InvalidParameter("standard deviation must be finite and non-negative")
    })?;
    Ok(normal.sample(rng))
}

fn gaussian_draw<N, D, R>(mean: &VectorN<N, D>, Q: &MatrixN<N, D>, rng: &mut R) -> Result<VectorN<N, D>>
where
    N: RealField,
    D: Dim,
    R: RngCore + ?Sized,
    StandardNormal: Distribution<N>,
    DefaultAllocator: Allocator<N, D, D> + Allocator<N, D>,
{
    // A zero covariance is a point mass
    if Q.iter().all(|q| *q == N::zero()) {
        return Ok(mean.clone());
    }

    let L = Q
        .clone()
        .cholesky()
        .ok_or(EstimateError::SingularCovariance(
            "noise covariance not positive definite",
        ))?
        .l();

    let (d, _) = mean.data.shape();
    let e = VectorN::from_fn_generic(d, U1, |_, _| StandardNormal.sample(&mut *rng));

    Ok(mean + L * e)
}
