use bevy::math::DVec3;
use bevy::prelude::*;

// --- Simulation Defaults ---
/// Micro-steps integrated per planet per frame.
pub const DEFAULT_MICRO_STEPS_PER_TICK: u32 = 5_000;
/// Bounds of the speed slider.
pub const MIN_MICRO_STEPS_PER_TICK: u32 = 100;
pub const MAX_MICRO_STEPS_PER_TICK: u32 = 20_000;
/// Simulated seconds per micro-step.
pub const SECONDS_PER_MICRO_STEP: f64 = 8.0;
/// Cosmetic star spin per frame, in radians.
pub const STAR_SPIN_PER_TICK: f64 = 0.05;

// --- Camera Defaults ---
/// Starting camera position: straight above the star.
pub const INITIAL_CAMERA_POSITION: DVec3 = DVec3::new(0.0, 700.0, 0.0);
/// Closest the camera may zoom to its focus.
pub const MIN_CAMERA_DISTANCE: f64 = 1.0;
pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 200_000.0;
/// Zoom multiplier per mouse wheel notch.
pub const ZOOM_STEP: f64 = 1.1;
/// Keyboard orbit speed in radians per second.
pub const ORBIT_SPEED: f64 = 1.5;

/// Display toggles for the scene embellishments.
#[derive(Resource)]
pub struct SceneSettings {
    pub show_trails: bool,
    pub show_ghosts: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            show_trails: true,
            show_ghosts: true,
        }
    }
}

/// Marker resource asking the renderer to respawn body visuals, set whenever
/// the set of bodies changes (run or reset).
#[derive(Resource, Default)]
pub struct RebuildScene {
    pub pending: bool,
}
