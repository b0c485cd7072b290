use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use bevy_egui::egui;

use crate::config::{ConfigForm, PlanetForm, ScenarioConfig, random_planet};
use crate::resources::{
    MAX_MICRO_STEPS_PER_TICK, MIN_MICRO_STEPS_PER_TICK, RebuildScene, SceneSettings,
};
use crate::simulation::{BodyRef, Phase, SimulationState};

const FIELD_WIDTH: f32 = 90.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

pub fn ui_controls(
    mut contexts: EguiContexts,
    mut state: ResMut<SimulationState>,
    mut form: ResMut<ConfigForm>,
    mut settings: ResMut<SceneSettings>,
    mut rebuild: ResMut<RebuildScene>,
    diagnostics: Res<DiagnosticsStore>,
    mut frames_rendered: Local<usize>,
) {
    if *frames_rendered < 5 {
        *frames_rendered += 1;
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    if state.phase() == Phase::Configuring {
        egui::Window::new("Configure System")
            .default_pos(egui::pos2(10.0, 10.0))
            .vscroll(true)
            .show(ctx, |ui| {
                configuration_form(ui, &mut form);

                ui.separator();
                if ui.button("Run").clicked() && launch(&mut form, &mut state) {
                    rebuild.pending = true;
                }
                if let Some(error) = &form.error {
                    ui.colored_label(egui::Color32::LIGHT_RED, error);
                }
            });
        return;
    }

    egui::Window::new("Simulation Controls")
        .default_pos(egui::pos2(10.0, 10.0))
        .max_size([320.0, 360.0])
        .show(ctx, |ui| {
            ui.heading("Simulation");
            let label = if state.paused { "Resume" } else { "Pause" };
            ui.horizontal(|ui| {
                if ui.button(label).clicked() {
                    state.toggle_pause();
                }
                if ui.button("Reset").clicked() {
                    state.reset();
                    form.error = None;
                    rebuild.pending = true;
                }
            });

            let mut steps = state.micro_steps_per_tick;
            let slider = egui::Slider::new(&mut steps, MIN_MICRO_STEPS_PER_TICK..=MAX_MICRO_STEPS_PER_TICK)
                .text("Speed (steps/frame)");
            if ui.add(slider).changed() {
                state.set_micro_steps_per_tick(steps);
            }

            focus_picker(ui, &mut state, &form);

            ui.separator();
            ui.heading("Display");
            ui.checkbox(&mut settings.show_trails, "Trails");
            ui.checkbox(&mut settings.show_ghosts, "Ghosts");

            ui.separator();
            ui.label(format!(
                "Simulated: {:.1} days",
                state.simulated_seconds / SECONDS_PER_DAY
            ));
            if let Some(frame_ms) = diagnostics
                .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
                .and_then(|d| d.smoothed())
            {
                ui.label(format!("Frame time: {frame_ms:.1} ms"));
            }
            ui.label("Zoom: Scroll Wheel / Z & X");
            ui.label("Orbit: Arrow Keys / A & D");
        });
}

fn configuration_form(ui: &mut egui::Ui, form: &mut ConfigForm) {
    ui.heading("Star");
    egui::Grid::new("star_form").show(ui, |ui| {
        ui.label("Mass (kg)");
        ui.add(egui::TextEdit::singleline(&mut form.star_mass).desired_width(FIELD_WIDTH));
        ui.end_row();
        ui.label("Radius (1e9 m)");
        ui.add(egui::TextEdit::singleline(&mut form.star_radius).desired_width(FIELD_WIDTH));
        ui.end_row();
    });

    ui.separator();
    ui.heading("Planets");
    let mut remove = None;
    egui::Grid::new("planet_form").striped(true).show(ui, |ui| {
        for header in ["Name", "Mass (kg)", "Radius", "Distance", "Speed (km/s)", "Incl. (°)", ""] {
            ui.label(header);
        }
        ui.end_row();

        for (i, planet) in form.planets.iter_mut().enumerate() {
            for field in [
                &mut planet.name,
                &mut planet.mass,
                &mut planet.radius,
                &mut planet.distance,
                &mut planet.speed,
                &mut planet.inclination,
            ] {
                ui.add(egui::TextEdit::singleline(field).desired_width(FIELD_WIDTH));
            }
            if ui.small_button("✖").clicked() {
                remove = Some(i);
            }
            ui.end_row();
        }
    });
    if let Some(i) = remove {
        form.planets.remove(i);
    }

    ui.horizontal(|ui| {
        if ui.button("Add planet").clicked() {
            form.planets.push(PlanetForm::default());
        }
        if ui.button("Random planet").clicked() {
            add_random_planet(form);
        }
        if ui.button("Solar system").clicked() {
            *form = ConfigForm::from_scenario(&ScenarioConfig::solar_system());
        }
    });
}

fn add_random_planet(form: &mut ConfigForm) {
    let star_mass = form
        .star_mass
        .trim()
        .parse()
        .unwrap_or(ScenarioConfig::solar_system().star.mass);
    let name = format!("Planet {}", form.planets.len() + 1);
    let planet = random_planet(&mut rand::rng(), star_mass, name);
    form.planets.push(PlanetForm::from(&planet));
}

fn focus_picker(ui: &mut egui::Ui, state: &mut SimulationState, form: &ConfigForm) {
    let name = |body: BodyRef| match body {
        BodyRef::Star => "Star".to_string(),
        BodyRef::Planet(i) => planet_name(form, i),
    };

    let current = state.focus.unwrap_or(BodyRef::Star);
    let mut selected = current;
    egui::ComboBox::from_label("Focus")
        .selected_text(name(current))
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut selected, BodyRef::Star, name(BodyRef::Star));
            for i in 0..state.planets.len() {
                ui.selectable_value(&mut selected, BodyRef::Planet(i), name(BodyRef::Planet(i)));
            }
        });
    if selected != current {
        state.set_focus(selected);
    }
}

fn planet_name(form: &ConfigForm, index: usize) -> String {
    form.planets
        .get(index)
        .map(|planet| planet.name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Planet {}", index + 1))
}

/// Validates the form and, if it holds up, builds and starts the run.
///
/// On failure the message is stored on the form and the state is untouched.
pub fn launch(form: &mut ConfigForm, state: &mut SimulationState) -> bool {
    let result = form
        .to_scenario()
        .and_then(|scenario| scenario.apply(state))
        .and_then(|()| state.start());

    match result {
        Ok(()) => {
            form.error = None;
            true
        }
        Err(err) => {
            let message = format!("{err:#}");
            warn!("configuration rejected: {message}");
            form.error = Some(message);
            false
        }
    }
}
