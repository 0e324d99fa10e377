#![allow(non_snake_case)]

//! Discrete tick orchestration of a tracking simulation.
//!
//! One tick is an indivisible, synchronous sequence: advance the hidden true state, sample a
//! noisy observation of it, run one filter update. The noise magnitudes for the tick are
//! explicit configuration passed into the call, so there is no ordering dependency on who
//! mutated a shared covariance first; the same [`TickNoise`] is installed on the motion model,
//! the sensor model and the filter before anything is sampled.
//!
//! The caller drives the loop and decides when a tick happens. The library performs no
//! blocking, suspension or parallelism of its own.

use na::SimdRealField;
use na::{allocator::Allocator, DefaultAllocator, Dim, RealField, VectorN};
use nalgebra as na;
use rand_core::RngCore;
use rand_distr::{Distribution, StandardNormal};

use crate::error::{EstimateError, Result};
use crate::estimators::kalman::KalmanFilter;
use crate::models::BeliefState;
use crate::noise::CorrelatedNoise;
use crate::sampling::{SensorModel, TransitionModel};

/// Noise configuration for a single tick.
#[derive(Clone)]
pub struct TickNoise<N: SimdRealField, D: Dim, ZD: Dim>
where
    DefaultAllocator: Allocator<N, D, D> + Allocator<N, ZD, ZD>,
{
    /// Process noise for this tick
    pub process: CorrelatedNoise<N, D>,
    /// Measurement noise for this tick
    pub observe: CorrelatedNoise<N, ZD>,
}

impl<N: RealField, D: Dim, ZD: Dim> TickNoise<N, D, ZD>
where
    DefaultAllocator:
        Allocator<N, D, D> + Allocator<N, ZD, ZD> + Allocator<N, D> + Allocator<N, ZD>,
{
    /// Builds isotropic tick noise from two slider-style controls.
    ///
    /// Each control is a `(scale, value)` pair, mapped to covariance units as
    /// `scale * value * identity`.
    pub fn from_sliders(process: (N, N), observe: (N, N), d: D, zd: ZD) -> Self {
        TickNoise {
            process: CorrelatedNoise::from_slider(process.0, process.1, d),
            observe: CorrelatedNoise::from_slider(observe.0, observe.1, zd),
        }
    }
}

/// What one tick produced, for the visualization sink.
#[derive(Debug, Clone)]
pub struct TickReport<N: SimdRealField, D: Dim, ZD: Dim>
where
    DefaultAllocator: Allocator<N, D, D> + Allocator<N, D> + Allocator<N, ZD>,
{
    /// The hidden true state after the motion step
    pub truth: VectorN<N, D>,
    /// The noisy observation the filter consumed
    pub observation: VectorN<N, ZD>,
    /// Incremental mean correction
    pub delta: VectorN<N, D>,
    /// Updated belief
    pub state: BeliefState<N, D>,
}

/// A tracked object: the generative models, the filter and the hidden true state.
pub struct Tracker<N: SimdRealField, D: Dim, ZD: Dim>
where
    DefaultAllocator:
        Allocator<N, D, D> + Allocator<N, ZD, D> + Allocator<N, ZD, ZD> + Allocator<N, D>,
{
    /// Motion model advancing the true state
    pub transition: TransitionModel<N, D>,
    /// Sensor model observing the true state
    pub sensor: SensorModel<N, D, ZD>,
    /// The estimator tracking the true state
    pub filter: KalmanFilter<N, D, ZD>,
    truth: VectorN<N, D>,
}

impl<N: RealField, D: Dim, ZD: Dim> Tracker<N, D, ZD>
where
    DefaultAllocator: Allocator<N, D, D>
        + Allocator<N, ZD, ZD>
        + Allocator<N, ZD, D>
        + Allocator<N, D, ZD>
        + Allocator<N, D>
        + Allocator<N, ZD>,
    StandardNormal: Distribution<N>,
{
    pub fn new(
        transition: TransitionModel<N, D>,
        sensor: SensorModel<N, D, ZD>,
        filter: KalmanFilter<N, D, ZD>,
        truth_0: VectorN<N, D>,
    ) -> Result<Tracker<N, D, ZD>> {
        let d = truth_0.nrows();
        if transition.Fx.nrows() != d
            || sensor.Hx.ncols() != d
            || filter.belief.x.nrows() != d
            || sensor.Hx.nrows() != filter.Hx.nrows()
        {
            return Err(EstimateError::DimensionMismatch(
                "models, filter and initial state do not agree",
            ));
        }

        Ok(Tracker {
            transition,
            sensor,
            filter,
            truth: truth_0,
        })
    }

    /// The hidden true state the models move and the filter only sees through observations.
    pub fn truth(&self) -> &VectorN<N, D> {
        &self.truth
    }

    /// Advances one discrete time step.
    ///
    /// Installs this tick's noise everywhere, moves the truth, senses it, updates the filter.
    /// On error the truth and the belief are left untouched.
    pub fn tick<R: RngCore + ?Sized>(
        &mut self,
        noise: &TickNoise<N, D, ZD>,
        rng: &mut R,
    ) -> Result<TickReport<N, D, ZD>> {
        let d = self.truth.nrows();
        if noise.process.Q.nrows() != d
            || noise.process.Q.ncols() != d
            || noise.observe.Q.nrows() != self.sensor.Hx.nrows()
            || noise.observe.Q.ncols() != self.sensor.Hx.nrows()
        {
            return Err(EstimateError::DimensionMismatch(
                "tick noise shape does not agree with the tracker",
            ));
        }

        self.transition.noise = noise.process.clone();
        self.filter.process_noise = noise.process.clone();
        self.sensor.noise = noise.observe.clone();
        self.filter.observe_noise = noise.observe.clone();

        let truth = self.transition.sample_next(&self.truth, rng)?;
        let observation = self.sensor.sample(&truth, rng)?;
        let delta = self.filter.update(&observation)?;

        self.truth = truth.clone();
        Ok(TickReport {
            truth,
            observation,
            delta,
            state: self.filter.belief.clone(),
        })
    }
}
