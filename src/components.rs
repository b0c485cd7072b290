use bevy::prelude::*;

use crate::simulation::BodyRef;

/// Mesh entity drawing one simulated body. Holds a lookup handle only; the
/// body itself lives in [`SimulationState`](crate::simulation::SimulationState).
#[derive(Component, Clone, Copy, Deref)]
pub struct BodyVisual(pub BodyRef);

/// Translucent far-distance proxy for a body.
#[derive(Component, Clone, Copy, Deref)]
pub struct GhostVisual(pub BodyRef);

/// Colour used for the body's trail.
#[derive(Component, Clone, Copy, Deref)]
pub struct TrailColor(pub Color);

/// The camera driven by the simulation's focus.
#[derive(Component)]
pub struct MainCamera;
