//! Operation of the vector estimator in a 2-dimensional squid hunt.
//!
//! A squid jitters around its lair, its skittishness and the sonar noise set by slider-style
//! controls that are read afresh every tick. Halfway through the run the squid gets nervous
//! and the tick noise follows.

use nalgebra::{Matrix2, Vector2, U2};
use rand::thread_rng;
use sonar_estimate::estimators::kalman::KalmanFilter;
use sonar_estimate::models::BeliefState;
use sonar_estimate::sampling::{SensorModel, TransitionModel};
use sonar_estimate::simulation::{TickNoise, Tracker};

const SKITTISHNESS_SCALE: f64 = 2.0;
const SENSOR_NOISE_SCALE: f64 = 4.0;

fn main() {
    let mut rng = thread_rng();

    let slider_noise = |skittishness: f64, sensor_noise: f64| {
        TickNoise::from_sliders(
            (SKITTISHNESS_SCALE, skittishness),
            (SENSOR_NOISE_SCALE, sensor_noise),
            U2,
            U2,
        )
    };
    let mut skittishness = 0.1;
    let sensor_noise = 0.1;
    let noise = slider_noise(skittishness, sensor_noise);

    let start = Vector2::new(15.0, 5.0);
    let transition = TransitionModel::new(Matrix2::identity(), noise.process.clone()).unwrap();
    let sensor = SensorModel::new(Matrix2::identity(), noise.observe.clone()).unwrap();
    let prior = BeliefState::new(start, Matrix2::new(0.3, 0.0, 0.0, 0.4)).unwrap();
    let filter = KalmanFilter::new(
        Matrix2::identity(),
        Matrix2::identity(),
        prior,
        noise.process.clone(),
        noise.observe.clone(),
    )
    .unwrap();
    let mut tracker = Tracker::new(transition, sensor, filter, start).unwrap();

    for t in 1..=20 {
        if t == 10 {
            skittishness = 0.4;
        }
        let report = tracker
            .tick(&slider_noise(skittishness, sensor_noise), &mut rng)
            .unwrap();
        println!(
            "t{:>2} truth ({:6.2}, {:5.2})  sensed ({:6.2}, {:5.2})  tracked ({:6.2}, {:5.2})  moved ({:+.2}, {:+.2})",
            t,
            report.truth[0],
            report.truth[1],
            report.observation[0],
            report.observation[1],
            report.state.x[0],
            report.state.x[1],
            report.delta[0],
            report.delta[1]
        );
    }
}
