//! Star and planet state, independent of any scene entity.

use bevy::math::DVec3;

use super::trail::TrailBuffer;

/// Camera distance (simulation units) below which ghosts are hidden.
pub const MIN_GHOST_DISTANCE: f64 = 100.0;
/// Camera distance per unit of ghost scale.
pub const GHOST_DISTANCE_SCALE: f64 = 80.0;
/// Opacity of a visible ghost.
pub const MAX_GHOST_OPACITY: f64 = 0.15;

/// Handle to a body inside a [`SimulationState`](super::state::SimulationState).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyRef {
    Star,
    Planet(usize),
}

/// Far-distance visibility proxy that keeps small bodies visible when zoomed out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ghost {
    pub position: DVec3,
    pub opacity: f64,
    pub scale: f64,
}

impl Ghost {
    fn new(position: DVec3) -> Self {
        Self {
            position,
            opacity: 0.0,
            scale: 1.0,
        }
    }

    /// Mirrors `position` and rescales against the camera distance.
    ///
    /// Below `MIN_GHOST_DISTANCE` only the opacity drops; the previous scale is kept.
    pub fn update(&mut self, position: DVec3, camera: DVec3) {
        self.position = position;
        let distance = camera.distance(position);
        if distance < MIN_GHOST_DISTANCE {
            self.opacity = 0.0;
        } else {
            self.scale = distance / GHOST_DISTANCE_SCALE;
            self.opacity = MAX_GHOST_OPACITY;
        }
    }
}

#[derive(Clone, Debug)]
pub struct Body {
    /// Simulation units (1e9 m).
    pub position: DVec3,
    /// Simulation units per second.
    pub velocity: DVec3,
    /// Kilograms. Only the star's mass enters the physics.
    pub mass: f64,
    /// Display radius in simulation units.
    pub radius: f64,
    pub trail: TrailBuffer,
    pub ghost: Ghost,
}

impl Body {
    pub fn new(mass: f64, radius: f64, position: DVec3, velocity: DVec3) -> Self {
        Self {
            position,
            velocity,
            mass,
            radius,
            trail: TrailBuffer::new(position),
            ghost: Ghost::new(position),
        }
    }
}

/// Start position and velocity for a body `distance` units from the origin,
/// tilted by `inclination_deg` out of the x-z plane and moving along +z at
/// `speed` units per second.
pub fn inclined_placement(distance: f64, speed: f64, inclination_deg: f64) -> (DVec3, DVec3) {
    let inclination = inclination_deg.to_radians();
    let position = DVec3::new(
        inclination.cos() * distance,
        inclination.sin() * distance,
        0.0,
    );
    (position, DVec3::new(0.0, 0.0, speed))
}
