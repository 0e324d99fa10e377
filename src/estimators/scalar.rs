//! Scalar Kalman estimation.
//!
//! The 1-dimensional closed-form filter, expressed as the 1x1 specialisation of
//! [`KalmanFilter`] with an identity process model and no control input. For a prior variance
//! `v`, process variance `q` and sense variance `r` a single update computes
//!
//! ```text
//! predicted = v + q
//! mean'     = (predicted * z + r * mean) / (predicted + r)
//! v'        = predicted * r / (predicted + r)
//! ```
//!
//! so `v' <= predicted` and `v' <= r` always: information never increases uncertainty.
//!
//! [`KalmanFilter`]: ../kalman/struct.KalmanFilter.html

use na::{Matrix1, RealField, Vector1, U1};
use nalgebra as na;

use crate::error::{EstimateError, Result};
use crate::estimators::kalman::KalmanFilter;
use crate::models::{BeliefState, Estimator};
use crate::noise::CorrelatedNoise;

/// 1-dimensional Kalman filter over raw numbers.
pub struct ScalarKalman<N: RealField> {
    filter: KalmanFilter<N, U1, U1>,
}

impl<N: RealField> ScalarKalman<N> {
    /// Creates a scalar filter from a prior mean and standard deviations.
    ///
    /// All three sigmas are standard deviations, squared internally to variances.
    pub fn new(mean_0: N, sigma_0: N, sigma_process: N, sigma_sense: N) -> Result<ScalarKalman<N>> {
        let prior = BeliefState::new(Vector1::new(mean_0), Matrix1::new(sigma_0 * sigma_0))?;
        let filter = KalmanFilter::new(
            Matrix1::identity(),
            Matrix1::identity(),
            prior,
            CorrelatedNoise::from_std_dev(sigma_process),
            CorrelatedNoise::from_std_dev(sigma_sense),
        )?;

        Ok(ScalarKalman { filter })
    }

    /// Consumes one observation and returns the mean correction.
    ///
    /// Fails with [`EstimateError::InvalidParameter`] when prior, process and sense variances
    /// are all zero, which would make the gain denominator vanish. The belief and the time
    /// step counter are untouched on error.
    pub fn update(&mut self, z: N) -> Result<N> {
        let predicted = self.filter.belief.X[(0, 0)] + self.filter.process_noise.Q[(0, 0)];
        if predicted + self.filter.observe_noise.Q[(0, 0)] == N::zero() {
            return Err(EstimateError::InvalidParameter(
                "total variance is zero, the update is undefined",
            ));
        }

        let delta = self.filter.update(&Vector1::new(z))?;
        Ok(delta[0])
    }

    /// Best estimate of the true state.
    pub fn mean(&self) -> N {
        self.filter.belief.x[0]
    }

    /// Uncertainty of the estimate.
    pub fn variance(&self) -> N {
        self.filter.belief.X[(0, 0)]
    }

    /// Number of successful updates so far.
    pub fn time_step(&self) -> u64 {
        self.filter.time_step()
    }

    /// Replaces the process noise, sigma squared internally.
    pub fn set_sigma_process(&mut self, sigma: N) {
        self.filter.process_noise = CorrelatedNoise::from_std_dev(sigma);
    }

    /// Replaces the measurement noise, sigma squared internally.
    pub fn set_sigma_sense(&mut self, sigma: N) {
        self.filter.observe_noise = CorrelatedNoise::from_std_dev(sigma);
    }
}

impl<N: RealField> Estimator<N, U1> for ScalarKalman<N> {
    fn state(&self) -> Result<Vector1<N>> {
        self.filter.state()
    }
}
