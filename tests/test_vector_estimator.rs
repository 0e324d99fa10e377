//! Test the numerical operations of the vector estimator.
//!
//! Tests are performed with matrices with fixed dimensions and with Dynamic matrices.

use approx::assert_relative_eq;
use na::{DMatrix, DVector, Dynamic, Matrix2, Vector2, U2};
use nalgebra as na;

use sonar_estimate::error::EstimateError;
use sonar_estimate::estimators::kalman::KalmanFilter;
use sonar_estimate::models::{BeliefState, Estimator};
use sonar_estimate::noise::CorrelatedNoise;

fn squid_filter() -> KalmanFilter<f64, U2, U2> {
    let prior = BeliefState::new(
        Vector2::new(15.0, 5.0),
        Matrix2::new(0.3, 0.0, 0.0, 0.4),
    )
    .unwrap();

    KalmanFilter::new(
        Matrix2::identity(),
        Matrix2::identity(),
        prior,
        CorrelatedNoise::from_diagonal(&Vector2::new(0.2, 0.2)),
        CorrelatedNoise::isotropic(0.2, U2),
    )
    .unwrap()
}

#[test]
fn single_update_blends_prior_and_observation() {
    let mut filter = squid_filter();

    // P = diag(0.5, 0.6), S = diag(0.7, 0.8)
    let gain = filter.gain().unwrap();
    assert_relative_eq!(gain[(0, 0)], 5.0 / 7.0, epsilon = 1e-12);
    assert_relative_eq!(gain[(1, 1)], 0.75, epsilon = 1e-12);
    assert_relative_eq!(gain[(0, 1)], 0.0, epsilon = 1e-12);
    assert_relative_eq!(gain[(1, 0)], 0.0, epsilon = 1e-12);

    let delta = filter.update(&Vector2::new(15.5, 5.2)).unwrap();
    assert_relative_eq!(filter.belief.x[0], 15.0 + 0.5 * 5.0 / 7.0, epsilon = 1e-12);
    assert_relative_eq!(filter.belief.x[1], 5.15, epsilon = 1e-12);
    assert_relative_eq!(delta[0], 0.5 * 5.0 / 7.0, epsilon = 1e-12);
    assert_relative_eq!(delta[1], 0.15, epsilon = 1e-12);

    // the posterior mean lies strictly between prior and observation component-wise
    assert!(filter.belief.x[0] > 15.0 && filter.belief.x[0] < 15.5);
    assert!(filter.belief.x[1] > 5.0 && filter.belief.x[1] < 5.2);

    // X = (I - W.H).P
    assert_relative_eq!(filter.belief.X[(0, 0)], 0.5 * 2.0 / 7.0, epsilon = 1e-12);
    assert_relative_eq!(filter.belief.X[(1, 1)], 0.15, epsilon = 1e-12);
    assert_eq!(filter.time_step(), 1);
}

#[test]
fn covariance_trace_never_exceeds_the_prediction() {
    let mut filter = squid_filter();
    let z = Vector2::new(15.5, 5.2);

    for _ in 0..20 {
        let predicted_trace = filter.belief.X.trace() + filter.process_noise.Q.trace();
        filter.update(&z).unwrap();
        assert!(filter.belief.X.trace() <= predicted_trace);
    }
}

#[test]
fn near_noiseless_sensor_dominates() {
    let mut filter = squid_filter();
    filter.observe_noise = CorrelatedNoise::isotropic(1e-12, U2);

    filter.update(&Vector2::new(16.0, 6.0)).unwrap();
    assert_relative_eq!(filter.belief.x[0], 16.0, epsilon = 1e-9);
    assert_relative_eq!(filter.belief.x[1], 6.0, epsilon = 1e-9);
}

#[test]
fn mismatched_observation_is_rejected() {
    let prior = BeliefState::new(
        DVector::from_vec(vec![15.0, 5.0]),
        DMatrix::from_diagonal(&DVector::from_vec(vec![0.3, 0.4])),
    )
    .unwrap();
    let mut filter = KalmanFilter::new(
        DMatrix::identity(2, 2),
        DMatrix::identity(2, 2),
        prior,
        CorrelatedNoise::isotropic(0.2, Dynamic::new(2)),
        CorrelatedNoise::isotropic(0.2, Dynamic::new(2)),
    )
    .unwrap();

    let before = filter.belief.clone();
    let err = filter
        .update(&DVector::from_vec(vec![1.0, 2.0, 3.0]))
        .unwrap_err();

    assert!(matches!(err, EstimateError::DimensionMismatch(_)));
    assert!(filter.belief == before);
    assert_eq!(filter.time_step(), 0);
}

#[test]
fn mismatched_models_are_rejected_at_construction() {
    let prior = BeliefState::<f64, Dynamic>::new_zero(Dynamic::new(2));
    let result = KalmanFilter::new(
        DMatrix::identity(2, 2),
        DMatrix::from_element(1, 3, 1.0),
        prior,
        CorrelatedNoise::isotropic(0.1, Dynamic::new(2)),
        CorrelatedNoise::isotropic(0.1, Dynamic::new(1)),
    );

    assert!(matches!(result, Err(EstimateError::DimensionMismatch(_))));
}

#[test]
fn negative_prior_covariance_is_rejected() {
    let result = BeliefState::new(Vector2::new(0.0, 0.0), Matrix2::new(-1.0, 0.0, 0.0, 1.0));
    assert!(matches!(result, Err(EstimateError::InvalidParameter(_))));
}

#[test]
fn singular_innovation_covariance_is_rejected() {
    let prior = BeliefState::new(Vector2::new(1.0, 2.0), Matrix2::identity()).unwrap();
    let mut filter = KalmanFilter::new(
        Matrix2::identity(),
        Matrix2::zeros(),
        prior,
        CorrelatedNoise::isotropic(0.0, U2),
        CorrelatedNoise::isotropic(0.0, U2),
    )
    .unwrap();

    let before = filter.belief.clone();
    let err = filter.update(&Vector2::new(0.0, 0.0)).unwrap_err();

    assert!(matches!(err, EstimateError::SingularCovariance(_)));
    assert!(filter.belief == before);
    assert_eq!(filter.time_step(), 0);
}

#[test]
fn estimator_state_is_the_mean() {
    let mut filter = squid_filter();
    filter.update(&Vector2::new(15.5, 5.2)).unwrap();

    let state = filter.state().unwrap();
    assert_relative_eq!(state[0], filter.belief.x[0], epsilon = 1e-15);
    assert_relative_eq!(state[1], filter.belief.x[1], epsilon = 1e-15);
}
