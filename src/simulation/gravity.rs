use bevy::math::DVec3;
use std::f64::consts::TAU;

/// Gravitational constant in m^3 kg^-1 s^-2.
pub const G: f64 = 6.67384e-11;
/// One simulation unit is a billion meters.
pub const METERS_PER_UNIT: f64 = 1.0e9;

/// Euclidean distance between two positions.
pub fn distance(a: DVec3, b: DVec3) -> f64 {
    (a - b).length()
}

/// Acceleration magnitude (m/s^2) felt at `distance_m` meters from an attractor.
///
/// Singular at zero distance: the result is infinite (or NaN for a massless
/// attractor) and is not guarded against.
pub fn gravitational_acceleration(distance_m: f64, attractor_mass_kg: f64) -> f64 {
    G * attractor_mass_kg / (distance_m * distance_m)
}

/// Speed of a circular orbit at `distance_units`, in simulation units per second.
pub fn circular_orbit_speed(distance_units: f64, attractor_mass_kg: f64) -> f64 {
    let r = distance_units * METERS_PER_UNIT;
    (G * attractor_mass_kg / r).sqrt() / METERS_PER_UNIT
}

/// Kepler's third law period, in seconds, for a circular orbit of radius `distance_units`.
pub fn orbital_period(distance_units: f64, attractor_mass_kg: f64) -> f64 {
    let r = distance_units * METERS_PER_UNIT;
    TAU * (r * r * r / (G * attractor_mass_kg)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUN_MASS: f64 = 1.988435e30;

    #[test]
    fn distance_is_euclidean() {
        let d = distance(DVec3::new(1.0, 2.0, 3.0), DVec3::new(4.0, 6.0, 3.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn acceleration_follows_inverse_square_law() {
        let near = gravitational_acceleration(1.0e11, SUN_MASS);
        let far = gravitational_acceleration(2.0e11, SUN_MASS);
        assert!((near / far - 4.0).abs() < 1e-12, "expected 4x, got {}", near / far);
    }

    #[test]
    fn acceleration_at_earth_distance() {
        // ~5.9 mm/s^2 at one astronomical unit
        let a = gravitational_acceleration(1.5e11, SUN_MASS);
        assert!((a - 5.898e-3).abs() < 1e-5, "got {a}");
    }

    #[test]
    fn zero_distance_is_singular() {
        assert!(gravitational_acceleration(0.0, SUN_MASS).is_infinite());
    }

    #[test]
    fn earth_orbit_speed_and_period() {
        let v = circular_orbit_speed(150.0, SUN_MASS);
        assert!((v - 2.9744e-5).abs() < 1e-8, "got {v}");

        let days = orbital_period(150.0, SUN_MASS) / 86_400.0;
        assert!((days - 366.7).abs() < 1.0, "got {days} days");
    }
}
