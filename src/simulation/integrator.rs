//! Fixed-step star → planet integration.
//!
//! Each call advances one planet by `micro_steps` semi-implicit Euler steps:
//! the velocity is kicked toward the star first, then the position drifts
//! with the updated velocity. Swapping the two updates (explicit Euler) makes
//! orbits spiral outward.

use super::body::Body;
use super::gravity::{distance, gravitational_acceleration};

/// A trail sample is recorded on every micro-step index divisible by this.
pub const TRAIL_SAMPLE_INTERVAL: u32 = 10_000;

/// Advance `planet` around a fixed `star`.
pub fn advance(
    planet: &mut Body,
    star: &Body,
    micro_steps: u32,
    seconds_per_micro_step: f64,
    meters_per_unit: f64,
) {
    let dt = seconds_per_micro_step;

    for step in 0..micro_steps {
        let r_units = distance(star.position, planet.position);
        let accel = gravitational_acceleration(r_units * meters_per_unit, star.mass);
        let speed = accel * dt;

        // kick: unit vector toward the star, in units/s
        let toward_star = (star.position - planet.position) / r_units;
        planet.velocity += toward_star * (speed / meters_per_unit);

        // drift with the new velocity
        planet.position += planet.velocity * dt;

        if step % TRAIL_SAMPLE_INTERVAL == 0 {
            planet.trail.push(planet.position);
        }
    }
}
