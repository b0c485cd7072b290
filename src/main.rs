mod components;
mod config;
mod resources;
mod simulation;
mod systems;

use anyhow::{Result, bail};
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_egui::{EguiPlugin, EguiPrimaryContextPass};
use clap::Parser;
use std::path::PathBuf;

use crate::config::{ConfigForm, ScenarioConfig};
use crate::resources::{RebuildScene, SceneSettings};
use crate::simulation::SimulationState;
use crate::systems::*;

#[derive(Parser, Debug)]
#[command(about = "Star and planets under Newtonian gravity")]
struct Args {
    /// JSON scenario used to fill the configuration form
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Micro-steps integrated per planet per frame
    #[arg(short, long)]
    micro_steps: Option<u32>,

    /// Skip the form and start the scenario right away
    #[arg(long)]
    autostart: bool,

    /// Print the built-in solar system scenario as JSON and exit
    #[arg(long)]
    print_preset: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_preset {
        println!("{}", serde_json::to_string_pretty(&ScenarioConfig::solar_system())?);
        return Ok(());
    }

    let scenario = match &args.scenario {
        Some(path) => ScenarioConfig::load(path)?,
        None => ScenarioConfig::default(),
    };

    let mut form = ConfigForm::from_scenario(&scenario);
    let mut state = SimulationState::new();
    if let Some(steps) = args.micro_steps {
        form.micro_steps_per_tick = Some(steps);
        state.set_micro_steps_per_tick(steps);
    }
    if args.autostart && !launch(&mut form, &mut state) {
        bail!(form.error.unwrap_or_else(|| "scenario rejected".to_string()));
    }

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Orbit".into(),
                resolution: WindowResolution::new(1280, 800),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(EguiPlugin::default())
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(state)
        .insert_resource(form)
        .init_resource::<SceneSettings>()
        .insert_resource(RebuildScene {
            pending: args.autostart,
        })
        .add_systems(EguiPrimaryContextPass, ui_controls)
        .add_systems(Startup, setup_scene)
        .add_systems(
            Update,
            (
                apply_scene_rebuild,
                camera_controls,
                drive_simulation,
                sync_body_transforms,
                sync_ghosts,
                draw_trails,
                sync_camera,
            )
                .chain(),
        )
        .run();

    Ok(())
}
