//! Starting conditions for a run.
//!
//! A [`ScenarioConfig`] is what the configuration form edits and what a JSON
//! scenario file holds. It is validated once, before any body is created;
//! the simulation itself never sees a non-numeric or non-positive input.
//!
//! ```json
//! {
//!   "star": { "mass": 1.988435e30, "radius": 0.6955 },
//!   "planets": [
//!     { "name": "Earth", "mass": 5.9721986e24, "radius": 0.0064,
//!       "distance": 150.0, "speed_km_s": 29.63, "inclination_deg": 0.0 }
//!   ],
//!   "micro_steps_per_tick": 10000
//! }
//! ```
//!
//! Distances and radii are in simulation units (1e9 m), masses in kg and
//! speeds in km/s.

use anyhow::{Context, Result, ensure};
use bevy::log::debug;
use bevy::math::DVec3;
use bevy::prelude::Resource;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::simulation::gravity::circular_orbit_speed;
use crate::simulation::SimulationState;
use crate::simulation::body::inclined_placement;

/// km/s to simulation units per second.
pub const KM_PER_S_TO_UNITS: f64 = 1.0e-6;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StarConfig {
    pub mass: f64,
    pub radius: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlanetConfig {
    #[serde(default)]
    pub name: String,
    pub mass: f64,
    pub radius: f64,
    /// Distance from the star in simulation units.
    pub distance: f64,
    pub speed_km_s: f64,
    #[serde(default)]
    pub inclination_deg: f64,
}

impl PlanetConfig {
    fn label(&self, index: usize) -> String {
        if self.name.is_empty() {
            format!("planet {}", index + 1)
        } else {
            format!("planet {} ({})", index + 1, self.name)
        }
    }

    /// Start position and velocity in simulation units.
    pub fn initial_state(&self) -> (DVec3, DVec3) {
        inclined_placement(
            self.distance,
            self.speed_km_s * KM_PER_S_TO_UNITS,
            self.inclination_deg,
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub star: StarConfig,
    pub planets: Vec<PlanetConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub micro_steps_per_tick: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds_per_micro_step: Option<f64>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::solar_system()
    }
}

impl ScenarioConfig {
    /// The Sun and the eight planets, all starting in line on the +x axis.
    pub fn solar_system() -> Self {
        let planet = |name: &str, mass, radius, distance, speed_km_s| PlanetConfig {
            name: name.to_string(),
            mass,
            radius,
            distance,
            speed_km_s,
            inclination_deg: 0.0,
        };
        Self {
            star: StarConfig {
                mass: 1.988435e30,
                radius: 0.6955,
            },
            planets: vec![
                planet("Mercury", 3.30104e23, 0.0024397, 50.32, 47.4),
                planet("Venus", 4.86732e24, 0.0060519, 108.8, 35.0),
                planet("Earth", 5.9721986e24, 0.0063674447, 150.0, 29.63),
                planet("Mars", 6.41693e23, 0.003386, 227.94, 22.8175),
                planet("Jupiter", 1.89813e27, 0.069173, 778.33, 12.9824),
                planet("Saturn", 5.68319e26, 0.057316, 1429.4, 9.28),
                planet("Uranus", 8.68103e25, 0.025266, 2870.99, 6.509),
                planet("Neptune", 1.0241e26, 0.024553, 4504.0, 5.449),
            ],
            micro_steps_per_tick: None,
            seconds_per_micro_step: None,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        let scenario: Self = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse scenario {}", path.display()))?;
        scenario
            .validate()
            .with_context(|| format!("invalid scenario {}", path.display()))?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.star.mass.is_finite() && self.star.mass > 0.0,
            "star: mass must be positive, got {}",
            self.star.mass
        );
        ensure!(
            self.star.radius.is_finite() && self.star.radius > 0.0,
            "star: radius must be positive, got {}",
            self.star.radius
        );

        for (i, planet) in self.planets.iter().enumerate() {
            validate_planet(planet).with_context(|| planet.label(i))?;
        }

        if let Some(steps) = self.micro_steps_per_tick {
            ensure!(steps > 0, "micro_steps_per_tick must be at least 1");
        }
        if let Some(dt) = self.seconds_per_micro_step {
            ensure!(
                dt.is_finite() && dt > 0.0,
                "seconds_per_micro_step must be positive, got {dt}"
            );
        }
        Ok(())
    }

    /// Replaces whatever `state` held with this scenario's bodies.
    ///
    /// Nothing is touched when validation fails.
    pub fn apply(&self, state: &mut SimulationState) -> Result<()> {
        self.validate()?;

        state.reset();
        state.set_star(self.star.mass, self.star.radius, DVec3::ZERO);
        for planet in &self.planets {
            let (position, velocity) = planet.initial_state();
            state.add_planet(planet.mass, planet.radius, position, velocity);
        }
        if let Some(steps) = self.micro_steps_per_tick {
            state.set_micro_steps_per_tick(steps);
        }
        if let Some(dt) = self.seconds_per_micro_step {
            state.seconds_per_micro_step = dt;
        }
        debug!(planets = self.planets.len(), "scenario applied");
        Ok(())
    }
}

fn validate_planet(planet: &PlanetConfig) -> Result<()> {
    ensure!(
        planet.mass.is_finite() && planet.mass > 0.0,
        "mass must be positive, got {}",
        planet.mass
    );
    ensure!(
        planet.radius.is_finite() && planet.radius > 0.0,
        "radius must be positive, got {}",
        planet.radius
    );
    ensure!(
        planet.distance.is_finite() && planet.distance > 0.0,
        "distance must be positive, got {}",
        planet.distance
    );
    ensure!(planet.speed_km_s.is_finite(), "speed must be a finite number");
    ensure!(
        planet.inclination_deg.is_finite(),
        "inclination must be a finite number"
    );
    Ok(())
}

/// A planet somewhere between Mercury and Jupiter on a roughly circular orbit.
pub fn random_planet<R: Rng>(rng: &mut R, star_mass: f64, name: String) -> PlanetConfig {
    let distance = rng.random_range(40.0..800.0);
    let speed = circular_orbit_speed(distance, star_mass) / KM_PER_S_TO_UNITS;
    PlanetConfig {
        name,
        mass: 10f64.powf(rng.random_range(23.0..27.0)),
        radius: rng.random_range(0.002..0.07),
        distance,
        speed_km_s: speed * rng.random_range(0.95..1.05),
        inclination_deg: rng.random_range(-10.0..10.0),
    }
}

// --- Form ---

/// Text fields for one planet, as typed by the user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlanetForm {
    pub name: String,
    pub mass: String,
    pub radius: String,
    pub distance: String,
    pub speed: String,
    pub inclination: String,
}

impl From<&PlanetConfig> for PlanetForm {
    fn from(planet: &PlanetConfig) -> Self {
        Self {
            name: planet.name.clone(),
            mass: planet.mass.to_string(),
            radius: planet.radius.to_string(),
            distance: planet.distance.to_string(),
            speed: planet.speed_km_s.to_string(),
            inclination: planet.inclination_deg.to_string(),
        }
    }
}

impl PlanetForm {
    fn parse(&self) -> Result<PlanetConfig> {
        Ok(PlanetConfig {
            name: self.name.trim().to_string(),
            mass: parse_field("mass", &self.mass)?,
            radius: parse_field("radius", &self.radius)?,
            distance: parse_field("distance", &self.distance)?,
            speed_km_s: parse_field("speed", &self.speed)?,
            inclination_deg: if self.inclination.trim().is_empty() {
                0.0
            } else {
                parse_field("inclination", &self.inclination)?
            },
        })
    }
}

/// The whole configuration form. Lives as a resource so edits survive frames.
#[derive(Resource, Clone, Debug)]
pub struct ConfigForm {
    pub star_mass: String,
    pub star_radius: String,
    pub planets: Vec<PlanetForm>,
    pub micro_steps_per_tick: Option<u32>,
    pub seconds_per_micro_step: Option<f64>,
    /// Last validation failure, shown under the form.
    pub error: Option<String>,
}

impl Default for ConfigForm {
    fn default() -> Self {
        Self::from_scenario(&ScenarioConfig::default())
    }
}

impl ConfigForm {
    pub fn from_scenario(scenario: &ScenarioConfig) -> Self {
        Self {
            star_mass: scenario.star.mass.to_string(),
            star_radius: scenario.star.radius.to_string(),
            planets: scenario.planets.iter().map(PlanetForm::from).collect(),
            micro_steps_per_tick: scenario.micro_steps_per_tick,
            seconds_per_micro_step: scenario.seconds_per_micro_step,
            error: None,
        }
    }

    pub fn to_scenario(&self) -> Result<ScenarioConfig> {
        let star = StarConfig {
            mass: parse_field("mass", &self.star_mass).context("star")?,
            radius: parse_field("radius", &self.star_radius).context("star")?,
        };
        let planets = self
            .planets
            .iter()
            .enumerate()
            .map(|(i, form)| form.parse().with_context(|| format!("planet {}", i + 1)))
            .collect::<Result<Vec<_>>>()?;

        let scenario = ScenarioConfig {
            star,
            planets,
            micro_steps_per_tick: self.micro_steps_per_tick,
            seconds_per_micro_step: self.seconds_per_micro_step,
        };
        scenario.validate()?;
        Ok(scenario)
    }
}

fn parse_field(field: &str, text: &str) -> Result<f64> {
    let trimmed = text.trim();
    ensure!(!trimmed.is_empty(), "{field} is required");
    let value: f64 = trimmed
        .parse()
        .with_context(|| format!("{field} must be a number, got {trimmed:?}"))?;
    ensure!(value.is_finite(), "{field} must be a finite number");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Phase;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn solar_system_is_valid() {
        let scenario = ScenarioConfig::solar_system();
        scenario.validate().expect("preset validates");
        assert_eq!(scenario.planets.len(), 8);
        assert_eq!(scenario.planets[2].name, "Earth");
    }

    #[test]
    fn earth_speed_converts_to_units() {
        let (position, velocity) = ScenarioConfig::solar_system().planets[2].initial_state();
        assert_eq!(position, DVec3::new(150.0, 0.0, 0.0));
        assert!((velocity.z - 2.963e-5).abs() < 1e-15);
    }

    #[test]
    fn apply_builds_star_and_planets() {
        let mut scenario = ScenarioConfig::solar_system();
        scenario.micro_steps_per_tick = Some(10_000);
        let mut state = SimulationState::new();

        scenario.apply(&mut state).expect("valid scenario");

        assert_eq!(state.planets.len(), 8);
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.micro_steps_per_tick, 10_000);
        let star = state.star.as_ref().expect("star set");
        assert_eq!(star.mass, 1.988435e30);
        assert_eq!(star.position, DVec3::ZERO);
    }

    #[test]
    fn invalid_scenario_leaves_state_alone() {
        let mut scenario = ScenarioConfig::solar_system();
        scenario.planets[3].distance = 0.0;
        let mut state = SimulationState::new();
        state.set_star(1.0, 1.0, DVec3::ZERO);

        let err = scenario.apply(&mut state).expect_err("zero distance");
        let message = format!("{err:#}");
        assert!(message.contains("planet 4 (Mars)"), "{message}");
        assert!(message.contains("distance must be positive"), "{message}");
        assert_eq!(state.star.as_ref().map(|s| s.mass), Some(1.0));
    }

    #[test]
    fn json_round_trip_of_preset() {
        let scenario = ScenarioConfig::solar_system();
        let json = serde_json::to_string_pretty(&scenario).expect("serializes");
        assert!(!json.contains("micro_steps_per_tick"));
        let back: ScenarioConfig = serde_json::from_str(&json).expect("parses");
        assert_eq!(back, scenario);
    }

    #[test]
    fn json_defaults_optional_fields() {
        let json = r#"{
            "star": { "mass": 2.0e30, "radius": 0.7 },
            "planets": [ { "mass": 6.0e24, "radius": 0.006, "distance": 150.0, "speed_km_s": 29.7 } ]
        }"#;
        let scenario: ScenarioConfig = serde_json::from_str(json).expect("parses");
        assert_eq!(scenario.planets[0].inclination_deg, 0.0);
        assert!(scenario.planets[0].name.is_empty());
        assert!(scenario.micro_steps_per_tick.is_none());
        scenario.validate().expect("valid");
    }

    #[test]
    fn bundled_scenario_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("scenarios")
            .join("inner_planets.json");
        let scenario = ScenarioConfig::load(&path).expect("bundled scenario is valid");
        assert_eq!(scenario.planets.len(), 4);
        assert_eq!(scenario.micro_steps_per_tick, Some(10_000));
        assert_eq!(scenario.planets[2].inclination_deg, 0.0);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ScenarioConfig::load(Path::new("/nonexistent/scenario.json")).expect_err("missing");
        assert!(format!("{err}").contains("failed to read scenario"));
    }

    #[test]
    fn form_round_trips_preset() {
        let form = ConfigForm::default();
        let scenario = form.to_scenario().expect("preset form is valid");
        assert_eq!(scenario, ScenarioConfig::solar_system());
    }

    #[test]
    fn form_rejects_non_numeric_field() {
        let mut form = ConfigForm::default();
        form.planets[1].speed = "fast".to_string();

        let message = format!("{:#}", form.to_scenario().expect_err("not a number"));
        assert!(message.contains("planet 2"), "{message}");
        assert!(message.contains("speed must be a number"), "{message}");
    }

    #[test]
    fn form_rejects_missing_star_mass() {
        let mut form = ConfigForm::default();
        form.star_mass = "  ".to_string();

        let message = format!("{:#}", form.to_scenario().expect_err("empty"));
        assert!(message.contains("star"), "{message}");
        assert!(message.contains("mass is required"), "{message}");
    }

    #[test]
    fn form_rejects_negative_radius() {
        let mut form = ConfigForm::default();
        form.planets[0].radius = "-1".to_string();
        let message = format!("{:#}", form.to_scenario().expect_err("negative"));
        assert!(message.contains("radius must be positive"), "{message}");
    }

    #[test]
    fn blank_inclination_means_zero() {
        let mut form = ConfigForm::default();
        form.planets[0].inclination = String::new();
        let scenario = form.to_scenario().expect("valid");
        assert_eq!(scenario.planets[0].inclination_deg, 0.0);
    }

    #[test]
    fn random_planets_are_valid_and_nearly_circular() {
        let mut rng = StdRng::seed_from_u64(7);
        let star_mass = 1.988435e30;
        for i in 0..50 {
            let planet = random_planet(&mut rng, star_mass, format!("P{i}"));
            validate_planet(&planet).expect("random planet is valid");
            assert!((40.0..800.0).contains(&planet.distance));
            assert!(planet.inclination_deg.abs() <= 10.0);

            let circular = circular_orbit_speed(planet.distance, star_mass) / KM_PER_S_TO_UNITS;
            assert!((planet.speed_km_s / circular - 1.0).abs() <= 0.05);
        }
    }
}
