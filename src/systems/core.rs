use bevy::input::mouse::MouseWheel;
use bevy::math::DVec3;
use bevy::prelude::MessageReader;
use bevy::prelude::*;
use bevy_egui::input::EguiWantsInput;

use crate::components::*;
use crate::resources::*;
use crate::simulation::{BodyRef, SimulationState, tick};

const STAR_COLOR: Color = Color::srgb(1.0, 0.8, 0.3);
const GHOST_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.0);

/// Spawns the camera above the star.
pub fn setup_scene(mut commands: Commands, state: Res<SimulationState>) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        camera_transform(&state),
        MainCamera,
    ));
}

fn planet_color(index: usize) -> Color {
    Color::hsl((index as f32 * 47.0) % 360.0, 0.7, 0.6)
}

/// Responds to a pending rebuild: despawns every body visual and spawns one
/// mesh plus one ghost per body currently in the simulation.
pub fn apply_scene_rebuild(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rebuild: ResMut<RebuildScene>,
    state: Res<SimulationState>,
    visuals: Query<Entity, Or<(With<BodyVisual>, With<GhostVisual>)>>,
) {
    if !rebuild.pending {
        return;
    }
    rebuild.pending = false;

    for entity in visuals.iter() {
        commands.entity(entity).despawn();
    }

    let sphere = meshes.add(Sphere::new(1.0));
    let star = state.star.iter().map(|body| (BodyRef::Star, body, STAR_COLOR));
    let planets = state
        .planets
        .iter()
        .enumerate()
        .map(|(i, body)| (BodyRef::Planet(i), body, planet_color(i)));

    for (body_ref, body, color) in star.chain(planets) {
        let position = body.position.as_vec3();
        commands.spawn((
            Mesh3d(sphere.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                unlit: true,
                ..default()
            })),
            Transform::from_translation(position).with_scale(Vec3::splat(body.radius as f32)),
            BodyVisual(body_ref),
            TrailColor(color.with_alpha(0.6)),
        ));
        // each ghost owns its material so opacities can differ
        commands.spawn((
            Mesh3d(sphere.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: GHOST_COLOR,
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            })),
            Transform::from_translation(position),
            GhostVisual(body_ref),
        ));
    }

    debug!(bodies = state.planets.len() + 1, "scene rebuilt");
}

/// The frame driver: one simulation tick per rendered frame.
pub fn drive_simulation(mut state: ResMut<SimulationState>) {
    tick(&mut state);
}

/// Copies body positions (and the star's spin) onto their meshes.
pub fn sync_body_transforms(
    state: Res<SimulationState>,
    mut query: Query<(&BodyVisual, &mut Transform)>,
) {
    for (visual, mut transform) in query.iter_mut() {
        let Some(body) = state.body(**visual) else {
            continue;
        };
        transform.translation = body.position.as_vec3();
        if **visual == BodyRef::Star {
            transform.rotation = Quat::from_rotation_y(state.star_rotation as f32);
        }
    }
}

/// Mirrors each body's ghost proxy onto its translucent sphere.
pub fn sync_ghosts(
    state: Res<SimulationState>,
    settings: Res<SceneSettings>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut query: Query<(
        &GhostVisual,
        &mut Transform,
        &MeshMaterial3d<StandardMaterial>,
    )>,
) {
    for (visual, mut transform, handle) in query.iter_mut() {
        let Some(body) = state.body(**visual) else {
            continue;
        };
        let ghost = body.ghost;
        transform.translation = ghost.position.as_vec3();
        transform.scale = Vec3::splat(ghost.scale as f32);

        let opacity = if settings.show_ghosts { ghost.opacity as f32 } else { 0.0 };
        if let Some(material) = materials.get_mut(&handle.0) {
            material.base_color = GHOST_COLOR.with_alpha(opacity);
        }
    }
}

/// Draws every planet's trail as a line strip, newest point first.
pub fn draw_trails(
    mut gizmos: Gizmos,
    state: Res<SimulationState>,
    settings: Res<SceneSettings>,
    query: Query<(&BodyVisual, &TrailColor)>,
) {
    if !settings.show_trails {
        return;
    }

    for (visual, color) in query.iter() {
        if **visual == BodyRef::Star {
            continue;
        }
        if let Some(body) = state.body(**visual) {
            gizmos.linestrip(body.trail.iter().map(|p| p.as_vec3()), **color);
        }
    }
}

/// Zooms with the scroll wheel (or Z/X) and swings the camera around its
/// focus with the arrow keys / A and D, unless egui has the pointer.
pub fn camera_controls(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    mut state: ResMut<SimulationState>,
    time: Res<Time>,
    egui_input: Res<EguiWantsInput>,
) {
    if egui_input.wants_any_pointer_input() {
        mouse_wheel.clear();
        return;
    }

    for event in mouse_wheel.read() {
        if event.y > 0.0 {
            state.zoom_camera(1.0 / ZOOM_STEP);
        } else if event.y < 0.0 {
            state.zoom_camera(ZOOM_STEP);
        }
    }

    if egui_input.wants_any_keyboard_input() {
        return;
    }

    let dt = time.delta_secs_f64();
    if keyboard.pressed(KeyCode::KeyZ) {
        state.zoom_camera(1.0 - dt);
    }
    if keyboard.pressed(KeyCode::KeyX) {
        state.zoom_camera(1.0 + dt);
    }

    let mut direction = 0.0;
    if keyboard.pressed(KeyCode::ArrowLeft) || keyboard.pressed(KeyCode::KeyA) {
        direction -= 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowRight) || keyboard.pressed(KeyCode::KeyD) {
        direction += 1.0;
    }
    if direction != 0.0 {
        state.orbit_camera(direction * ORBIT_SPEED * dt);
    }
}

fn camera_transform(state: &SimulationState) -> Transform {
    let target = state.focus_position().unwrap_or(DVec3::ZERO);
    Transform::from_translation(state.camera.as_vec3()).looking_at(target.as_vec3(), Vec3::NEG_Z)
}

/// Places the camera where the simulation says, looking at the focus.
pub fn sync_camera(
    state: Res<SimulationState>,
    mut query: Query<&mut Transform, With<MainCamera>>,
) {
    if let Ok(mut transform) = query.single_mut() {
        *transform = camera_transform(&state);
    }
}
