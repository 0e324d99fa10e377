//! Operation of the scalar estimator in a 1-dimensional sonar hunt.
//!
//! A whale descends at an ideal rate of one unit per tick, disturbed by process noise, and is
//! observed through a noisy sonar. The filter tracks the deviation of the true depth from the
//! ideal descent.

use rand::thread_rng;
use sonar_estimate::estimators::scalar::ScalarKalman;
use sonar_estimate::sampling::{sample_motion, sample_observation};

fn main() {
    let mut rng = thread_rng();

    let sigma_0 = 0.3;
    let sigma_x = 0.2;
    let sigma_z = 0.4;
    let ideal_delta = -1.0;
    let mut ideal_depth = 18.0;
    let mut actual_depth = sample_motion(ideal_depth, sigma_0, &mut rng).unwrap();

    let mut kalman = ScalarKalman::new(0.0, sigma_0, sigma_x, sigma_z).unwrap();

    println!(
        "{:>4} {:>9} {:>9} {:>9} {:>9}",
        "t", "truth", "sensed", "tracked", "variance"
    );
    for _ in 0..15 {
        let step = sample_motion(ideal_delta, sigma_x, &mut rng).unwrap();
        actual_depth += step;
        ideal_depth += ideal_delta;

        let observation = sample_observation(actual_depth, sigma_z, &mut rng).unwrap();
        let correction = kalman.update(observation - ideal_depth).unwrap();
        let tracked = ideal_depth + kalman.mean();

        println!(
            "{:>4} {:>9.3} {:>9.3} {:>9.3} {:>9.4}  (moved {:+.3})",
            kalman.time_step(),
            actual_depth,
            observation,
            tracked,
            kalman.variance(),
            correction + ideal_delta
        );
    }
}
