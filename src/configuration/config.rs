//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`WorldConfig`]     – arena size, policies and physical constants
//! - [`GeneratorConfig`] – procedural body generators (scatter, fixed center, ...)
//! - [`BodyConfig`]      – explicitly placed bodies
//! - [`ScenarioConfig`]  – top-level wrapper used to load a scenario from YAML
//!
//! Every field except the generator parameters has a default, so the
//! smallest valid file is `{}`.
//!
//! # YAML format
//!
//! ```yaml
//! world:
//!   width: 1280.0
//!   height: 720.0
//!   absorb: true              # merge colliding bodies
//!   bounded: false            # false -> bodies leaving the arena are removed
//!   speed: 1.0                # simulation seconds per real second
//!   length_to_physical: 9.461e11
//!   trail_length: 10          # 0 disables trails
//!   density: 1000.0           # mass = density * radius^3
//!   expansion_rate: 2.27e-18
//!
//! generators:
//!   - scatter: { count: 100, size_range: [2.0, 4.0], seed: 42 }
//!   - random_spawn: { interval_ms: 1000.0, size_range: [0.1, 1.0], count: 10 }
//!   - center_mass: { size: 1.0 }
//!
//! bodies:
//!   - { x: 100.0, y: 100.0, radius: 3.0, speed: 5.0, direction: 1.57 }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::configuration::error::{ConfigError, ScenarioError};
use crate::simulation::params::{
    Parameters, DEFAULT_DENSITY, DEFAULT_LENGTH_TO_PHYSICAL, HUBBLE_CONSTANT,
};
use crate::simulation::states::BodyColor;

/// Arena and per-tick policy
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub absorb: bool,
    pub bounded: bool,
    pub speed: f64,
    pub length_to_physical: f64,
    pub trail_length: usize,
    pub density: f64,
    pub expansion_rate: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            absorb: true,
            bounded: false,
            speed: 1.0,
            length_to_physical: DEFAULT_LENGTH_TO_PHYSICAL,
            trail_length: 10,
            density: DEFAULT_DENSITY,
            expansion_rate: HUBBLE_CONSTANT,
        }
    }
}

impl WorldConfig {
    pub fn parameters(&self) -> Parameters {
        Parameters {
            absorb: self.absorb,
            bounded: self.bounded,
            speed: self.speed,
            length_to_physical: self.length_to_physical,
            expansion_rate: self.expansion_rate,
            density: self.density,
            trail_length: self.trail_length,
        }
    }
}

/// Bodies scattered uniformly inside the arena
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScatterConfig {
    pub count: usize,
    pub size_range: [f64; 2],
    #[serde(default)]
    pub seed: Option<u64>, // reproducible placement when set
}

/// Bodies inserted periodically while the host loop runs
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RandomSpawnConfig {
    pub interval_ms: f64,
    pub size_range: [f64; 2],
    #[serde(default = "default_spawn_count")]
    pub count: usize,
}

fn default_spawn_count() -> usize {
    1
}

/// A fixed body at the arena center
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CenterMassConfig {
    #[serde(default = "default_center_size")]
    pub size: f64,
}

fn default_center_size() -> f64 {
    20.0
}

/// Fixed sun with two bodies on circular orbits
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SolarSystemConfig {
    pub sun_radius: f64,
    pub planet_radius: f64,
    pub planet_distance: f64,
    pub moon_radius: f64,
    pub moon_distance: f64,
}

impl Default for SolarSystemConfig {
    fn default() -> Self {
        Self {
            sun_radius: 20.0,
            planet_radius: 10.0,
            planet_distance: 200.0,
            moon_radius: 2.0,
            moon_distance: 250.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorConfig {
    Scatter(ScatterConfig),
    RandomSpawn(RandomSpawnConfig),
    CenterMass(CenterMassConfig),
    SolarSystem(SolarSystemConfig),
}

/// Configuration for a single body’s initial state
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    #[serde(default)]
    pub speed: f64, // initial linear speed
    #[serde(default)]
    pub direction: f64, // initial heading, radians
    #[serde(default)]
    pub angular_speed: f64,
    #[serde(default)]
    pub fixed: bool,
    #[serde(default)]
    pub color: Option<BodyColor>, // random when omitted
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub world: WorldConfig,
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub generators: Vec<GeneratorConfig>,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    /// Read and validate a scenario file
    pub fn from_path(path: &Path) -> Result<Self, ScenarioError> {
        let file = File::open(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ScenarioError> {
        let cfg: ScenarioConfig = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.world;
        if !(w.width > 0.0 && w.height > 0.0) {
            return Err(ConfigError::InvalidArena { width: w.width, height: w.height });
        }
        if !(w.density > 0.0) {
            return Err(ConfigError::NonPositiveDensity(w.density));
        }
        if !(w.length_to_physical > 0.0) {
            return Err(ConfigError::NonPositiveLengthFactor(w.length_to_physical));
        }
        if !(w.speed > 0.0) {
            return Err(ConfigError::NonPositiveSpeed(w.speed));
        }

        for generator in &self.generators {
            match generator {
                GeneratorConfig::Scatter(s) => check_size_range(s.size_range, w)?,
                GeneratorConfig::RandomSpawn(s) => {
                    if !(s.interval_ms > 0.0) {
                        return Err(ConfigError::NonPositiveInterval(s.interval_ms));
                    }
                    check_size_range(s.size_range, w)?;
                }
                GeneratorConfig::CenterMass(c) => {
                    if !(c.size > 0.0) {
                        return Err(ConfigError::InvalidSizeRange { min: c.size, max: c.size });
                    }
                }
                GeneratorConfig::SolarSystem(s) => {
                    for r in [s.sun_radius, s.planet_radius, s.moon_radius] {
                        if !(r > 0.0) {
                            return Err(ConfigError::InvalidSizeRange { min: r, max: r });
                        }
                    }
                    for d in [s.planet_distance, s.moon_distance] {
                        if !(d > 0.0) {
                            return Err(ConfigError::NonPositiveDistance(d));
                        }
                    }
                }
            }
        }

        for (index, b) in self.bodies.iter().enumerate() {
            if !(b.radius > 0.0) {
                return Err(ConfigError::NonPositiveRadius { index, radius: b.radius });
            }
        }

        Ok(())
    }
}

// Placement keeps the whole circle inside, so the largest body must fit
fn check_size_range([min, max]: [f64; 2], w: &WorldConfig) -> Result<(), ConfigError> {
    if !(min > 0.0 && min <= max) {
        return Err(ConfigError::InvalidSizeRange { min, max });
    }
    if 2.0 * max > w.width || 2.0 * max > w.height {
        return Err(ConfigError::SizeRangeExceedsArena {
            min,
            max,
            width: w.width,
            height: w.height,
        });
    }
    Ok(())
}
