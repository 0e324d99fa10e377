#![allow(non_snake_case)]

//! Covariance form Kalman estimation.
//!
//! A discrete Bayesian estimator that uses the linear belief representation [`BeliefState`] of
//! the system. Prediction and correction are fused into a single `update` per observation:
//! the process noise is folded into the one predicted covariance term used for both the gain
//! and the covariance update,
//!
//! ```text
//! P  = Fx.X.Fx' + Q
//! S  = Hx.P.Hx' + Z
//! W  = P.Hx'.S^-1
//! x' = Fx.x + W.(z - Hx.Fx.x)
//! X' = (I - W.Hx).P
//! ```
//!
//! This is not the textbook two-phase recursion; it is kept deliberately so that the numeric
//! output of a tick matches the fused update it models. Do not rewrite it into a separate
//! predict step.
//!
//! [`BeliefState`]: ../../models/struct.BeliefState.html

use na::SimdRealField;
use na::{allocator::Allocator, DefaultAllocator, Dim, MatrixMN, MatrixN, RealField, VectorN};
use nalgebra as na;

use crate::error::{EstimateError, Result};
use crate::linalg;
use crate::models::{BeliefState, Estimator};
use crate::noise::CorrelatedNoise;

/// Linear Kalman filter over a state of dimension `D` observed in dimension `ZD`.
///
/// The transition matrix `Fx` and observation matrix `Hx` are fixed for the lifetime of the
/// filter; the two noise models are public and may be reassigned between updates.
pub struct KalmanFilter<N: SimdRealField, D: Dim, ZD: Dim>
where
    DefaultAllocator:
        Allocator<N, D, D> + Allocator<N, ZD, D> + Allocator<N, ZD, ZD> + Allocator<N, D>,
{
    /// State transition matrix
    pub Fx: MatrixN<N, D>,
    /// Observation matrix
    pub Hx: MatrixMN<N, ZD, D>,
    /// Current belief
    pub belief: BeliefState<N, D>,
    /// Process noise
    pub process_noise: CorrelatedNoise<N, D>,
    /// Measurement noise
    pub observe_noise: CorrelatedNoise<N, ZD>,
    t: u64,
}

impl<N: RealField, D: Dim, ZD: Dim> KalmanFilter<N, D, ZD>
where
    DefaultAllocator: Allocator<N, D, D>
        + Allocator<N, ZD, ZD>
        + Allocator<N, ZD, D>
        + Allocator<N, D, ZD>
        + Allocator<N, D>
        + Allocator<N, ZD>,
{
    /// Creates a filter from its models and a prior belief.
    ///
    /// All shapes are validated eagerly; the prior covariance must already have passed the
    /// positive semi-definite check in [`BeliefState::new`].
    pub fn new(
        Fx: MatrixN<N, D>,
        Hx: MatrixMN<N, ZD, D>,
        prior: BeliefState<N, D>,
        process_noise: CorrelatedNoise<N, D>,
        observe_noise: CorrelatedNoise<N, ZD>,
    ) -> Result<KalmanFilter<N, D, ZD>> {
        let d = prior.x.nrows();
        if Fx.nrows() != d || Fx.ncols() != d {
            return Err(EstimateError::DimensionMismatch(
                "transition matrix shape does not agree with the state",
            ));
        }
        if Hx.ncols() != d {
            return Err(EstimateError::DimensionMismatch(
                "observation matrix columns do not agree with the state",
            ));
        }
        if process_noise.Q.nrows() != d || process_noise.Q.ncols() != d {
            return Err(EstimateError::DimensionMismatch(
                "process noise shape does not agree with the state",
            ));
        }
        if observe_noise.Q.nrows() != Hx.nrows() || observe_noise.Q.ncols() != Hx.nrows() {
            return Err(EstimateError::DimensionMismatch(
                "measurement noise shape does not agree with the observation",
            ));
        }

        Ok(KalmanFilter {
            Fx,
            Hx,
            belief: prior,
            process_noise,
            observe_noise,
            t: 0,
        })
    }

    /// Number of successful updates so far.
    pub fn time_step(&self) -> u64 {
        self.t
    }

    /// The Kalman gain for the current belief and noise models.
    pub fn gain(&self) -> Result<MatrixMN<N, D, ZD>> {
        self.gain_of(&self.predicted_covariance())
    }

    /// Consumes one observation and commits the corrected belief.
    ///
    /// Returns the incremental mean correction. On any error the prior belief and the time
    /// step counter are left untouched.
    pub fn update(&mut self, z: &VectorN<N, ZD>) -> Result<VectorN<N, D>> {
        if z.nrows() != self.Hx.nrows() {
            return Err(EstimateError::DimensionMismatch(
                "observation length does not agree with the observation matrix",
            ));
        }

        let P = self.predicted_covariance();
        let W = self.gain_of(&P)?;

        let x_pred = &self.Fx * &self.belief.x;
        // Innovation
        let s = z - &self.Hx * &x_pred;
        let x_next = x_pred + &W * s;

        // X = (I - W.Hx).P
        let d = self.belief.dim();
        let X_next = (MatrixN::identity_generic(d, d) - &W * &self.Hx) * &P;
        linalg::check_non_negative(
            linalg::rcond_symmetric(&X_next),
            EstimateError::SingularCovariance("posterior covariance not positive semi-definite"),
        )?;

        let delta = &x_next - &self.belief.x;
        self.belief.x = x_next;
        self.belief.X = X_next;
        self.t += 1;

        Ok(delta)
    }

    // P = Fx.X.Fx' + Q
    fn predicted_covariance(&self) -> MatrixN<N, D> {
        let mut P = self.process_noise.Q.clone();
        P.quadform_tr(N::one(), &self.Fx, &self.belief.X, N::one());
        P
    }

    // W = P.Hx'.S^-1 with S = Hx.P.Hx' + Z
    fn gain_of(&self, P: &MatrixN<N, D>) -> Result<MatrixMN<N, D, ZD>> {
        let PHt = P * self.Hx.transpose();
        let S = &self.Hx * &PHt + &self.observe_noise.Q;

        // Inverse innovation covariance
        let SI = S
            .cholesky()
            .ok_or(EstimateError::SingularCovariance(
                "innovation covariance not invertible",
            ))?
            .inverse();

        Ok(&PHt * SI)
    }
}

impl<N: RealField, D: Dim, ZD: Dim> Estimator<N, D> for KalmanFilter<N, D, ZD>
where
    DefaultAllocator: Allocator<N, D, D>
        + Allocator<N, ZD, ZD>
        + Allocator<N, ZD, D>
        + Allocator<N, D, ZD>
        + Allocator<N, D>
        + Allocator<N, ZD>,
{
    fn state(&self) -> Result<VectorN<N, D>> {
        Ok(self.belief.x.clone())
    }
}
