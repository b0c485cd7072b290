//! Per-frame driver: one macro-step for every planet, then ghosts, star spin
//! and camera follow.

use super::gravity::METERS_PER_UNIT;
use super::integrator::advance;
use super::state::SimulationState;
use crate::resources::STAR_SPIN_PER_TICK;

/// Advances the simulation by one frame.
///
/// Returns `false` without touching any body when paused or when there is no
/// star; the caller still draws the frozen scene.
pub fn tick(state: &mut SimulationState) -> bool {
    if state.paused || state.star.is_none() {
        return false;
    }

    let focus_before = state.focus_position();
    let camera = state.camera;
    let micro_steps = state.micro_steps_per_tick;
    let dt = state.seconds_per_micro_step;

    state.star_rotation += STAR_SPIN_PER_TICK;

    if let Some(star) = state.star.as_mut() {
        for planet in state.planets.iter_mut() {
            advance(planet, star, micro_steps, dt, METERS_PER_UNIT);
            star.ghost.update(star.position, camera);
            planet.ghost.update(planet.position, camera);
        }
    }

    // follow the focus so it stays at the same spot on screen
    if let (Some(before), Some(after)) = (focus_before, state.focus_position()) {
        state.camera += after - before;
    }

    state.ticks += 1;
    state.simulated_seconds += f64::from(micro_steps) * dt;
    true
}
