use anyhow::{Result, ensure};
use bevy::log::info;
use bevy::math::DVec3;
use bevy::prelude::Resource;

use super::body::{Body, BodyRef};
use crate::resources::{
    DEFAULT_MICRO_STEPS_PER_TICK, INITIAL_CAMERA_POSITION, MIN_CAMERA_DISTANCE,
    SECONDS_PER_MICRO_STEP,
};

/// Where a run currently is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No star yet; the form is being filled in.
    Configuring,
    Running,
    Paused,
}

/// Everything one simulation run owns: the star, its planets, the run
/// controls and the camera that follows the focused body.
#[derive(Resource, Debug, Clone)]
pub struct SimulationState {
    pub star: Option<Body>,
    pub planets: Vec<Body>,
    pub paused: bool,
    pub micro_steps_per_tick: u32,
    pub seconds_per_micro_step: f64,
    pub focus: Option<BodyRef>,
    /// Camera position in simulation units.
    pub camera: DVec3,
    /// Cosmetic spin of the star mesh, in radians.
    pub star_rotation: f64,
    pub ticks: u64,
    pub simulated_seconds: f64,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationState {
    /// An empty simulation in the `Configuring` phase.
    pub fn new() -> Self {
        Self {
            star: None,
            planets: Vec::new(),
            paused: false,
            micro_steps_per_tick: DEFAULT_MICRO_STEPS_PER_TICK,
            seconds_per_micro_step: SECONDS_PER_MICRO_STEP,
            focus: None,
            camera: INITIAL_CAMERA_POSITION,
            star_rotation: 0.0,
            ticks: 0,
            simulated_seconds: 0.0,
        }
    }

    pub fn phase(&self) -> Phase {
        match (&self.star, self.paused) {
            (None, _) => Phase::Configuring,
            (Some(_), true) => Phase::Paused,
            (Some(_), false) => Phase::Running,
        }
    }

    /// Sets (or replaces) the attractor. The star has no velocity.
    pub fn set_star(&mut self, mass: f64, radius: f64, position: DVec3) {
        self.star = Some(Body::new(mass, radius, position, DVec3::ZERO));
    }

    pub fn add_planet(&mut self, mass: f64, radius: f64, position: DVec3, velocity: DVec3) {
        self.planets.push(Body::new(mass, radius, position, velocity));
    }

    /// Zero is bumped to one so a tick always makes progress.
    pub fn set_micro_steps_per_tick(&mut self, count: u32) {
        self.micro_steps_per_tick = count.max(1);
    }

    /// Leaves configuration and starts ticking, with the camera on the star.
    pub fn start(&mut self) -> Result<()> {
        ensure!(self.star.is_some(), "cannot start a simulation without a star");
        self.paused = false;
        self.focus = Some(BodyRef::Star);
        info!(
            planets = self.planets.len(),
            micro_steps = self.micro_steps_per_tick,
            "simulation started"
        );
        Ok(())
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!(paused = self.paused, "pause toggled");
    }

    /// Discards every body and returns to `Configuring`.
    pub fn reset(&mut self) {
        let micro_steps = self.micro_steps_per_tick;
        *self = Self::new();
        // the speed slider is a user preference, not run state
        self.micro_steps_per_tick = micro_steps;
        info!("simulation reset");
    }

    pub fn body(&self, body: BodyRef) -> Option<&Body> {
        match body {
            BodyRef::Star => self.star.as_ref(),
            BodyRef::Planet(index) => self.planets.get(index),
        }
    }

    pub fn focus_position(&self) -> Option<DVec3> {
        self.focus
            .and_then(|focus| self.body(focus))
            .map(|body| body.position)
    }

    /// Points the camera at another body, keeping the same relative offset.
    ///
    /// References to missing bodies are ignored.
    pub fn set_focus(&mut self, target: BodyRef) {
        let Some(new_position) = self.body(target).map(|body| body.position) else {
            return;
        };
        if let Some(old_position) = self.focus_position() {
            self.camera += new_position - old_position;
        }
        self.focus = Some(target);
    }

    /// Scales the camera's distance to its focus (origin when unfocused).
    pub fn zoom_camera(&mut self, factor: f64) {
        let target = self.focus_position().unwrap_or(DVec3::ZERO);
        let offset = (self.camera - target) * factor;
        if offset.length() >= MIN_CAMERA_DISTANCE {
            self.camera = target + offset;
        }
    }

    /// Swings the camera around the vertical axis through its focus.
    pub fn orbit_camera(&mut self, angle: f64) {
        let target = self.focus_position().unwrap_or(DVec3::ZERO);
        let offset = self.camera - target;
        let (sin, cos) = angle.sin_cos();
        let rotated = DVec3::new(
            offset.x * cos + offset.z * sin,
            offset.y,
            -offset.x * sin + offset.z * cos,
        );
        self.camera = target + rotated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_state() -> SimulationState {
        let mut state = SimulationState::new();
        state.set_star(2.0e30, 0.7, DVec3::ZERO);
        state.add_planet(6.0e24, 0.006, DVec3::new(150.0, 0.0, 0.0), DVec3::new(0.0, 0.0, 3.0e-5));
        state.add_planet(6.4e23, 0.003, DVec3::new(228.0, 0.0, 0.0), DVec3::new(0.0, 0.0, 2.3e-5));
        state.start().expect("star is set");
        state
    }

    #[test]
    fn lifecycle_phases() {
        let mut state = SimulationState::new();
        assert_eq!(state.phase(), Phase::Configuring);
        assert!(state.start().is_err());

        state.set_star(2.0e30, 0.7, DVec3::ZERO);
        state.start().expect("star is set");
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.focus, Some(BodyRef::Star));

        state.toggle_pause();
        assert_eq!(state.phase(), Phase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase(), Phase::Running);

        state.reset();
        assert_eq!(state.phase(), Phase::Configuring);
    }

    #[test]
    fn toggle_pause_twice_only_touches_flag() {
        let mut state = running_state();
        let before = format!("{state:?}");
        state.toggle_pause();
        state.toggle_pause();
        assert_eq!(format!("{state:?}"), before);
    }

    #[test]
    fn reset_discards_bodies_but_keeps_speed() {
        let mut state = running_state();
        state.set_micro_steps_per_tick(7_000);
        state.reset();

        assert!(state.star.is_none());
        assert!(state.planets.is_empty());
        assert!(state.focus.is_none());
        assert_eq!(state.camera, INITIAL_CAMERA_POSITION);
        assert_eq!(state.micro_steps_per_tick, 7_000);
    }

    #[test]
    fn micro_steps_never_zero() {
        let mut state = SimulationState::new();
        state.set_micro_steps_per_tick(0);
        assert_eq!(state.micro_steps_per_tick, 1);
    }

    #[test]
    fn focus_moves_camera_by_body_offset() {
        let mut state = running_state();
        let camera = state.camera;

        state.set_focus(BodyRef::Planet(1));
        assert_eq!(state.camera, camera + DVec3::new(228.0, 0.0, 0.0));
        assert_eq!(state.focus_position(), Some(DVec3::new(228.0, 0.0, 0.0)));

        state.set_focus(BodyRef::Planet(0));
        assert_eq!(state.camera, camera + DVec3::new(150.0, 0.0, 0.0));

        state.set_focus(BodyRef::Planet(9));
        assert_eq!(state.focus, Some(BodyRef::Planet(0)));
    }

    #[test]
    fn zoom_keeps_direction_and_minimum_distance() {
        let mut state = running_state();
        state.camera = DVec3::new(0.0, 700.0, 0.0);

        state.zoom_camera(0.5);
        assert_eq!(state.camera, DVec3::new(0.0, 350.0, 0.0));

        state.zoom_camera(1.0e-9);
        assert_eq!(state.camera, DVec3::new(0.0, 350.0, 0.0));
    }

    #[test]
    fn orbit_preserves_distance_to_focus() {
        let mut state = running_state();
        state.camera = DVec3::new(100.0, 300.0, 0.0);
        state.orbit_camera(std::f64::consts::FRAC_PI_2);

        assert!((state.camera.length() - DVec3::new(100.0, 300.0, 0.0).length()).abs() < 1e-9);
        assert!((state.camera.y - 300.0).abs() < 1e-12);
        assert!((state.camera.z + 100.0).abs() < 1e-9);
    }
}
