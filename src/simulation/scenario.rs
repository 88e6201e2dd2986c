//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - the `World` with its parameters, arena and initial bodies
//! - periodic `Spawner`s for generators that keep inserting bodies
//! - the random generator used by those spawners
//!
//! With the `viewer` feature the scenario is inserted into Bevy as a
//! `Resource` and driven by the viewer systems.

use std::f64::consts::FRAC_PI_2;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::configuration::config::{
    BodyConfig, CenterMassConfig, GeneratorConfig, RandomSpawnConfig, ScatterConfig,
    ScenarioConfig, SolarSystemConfig,
};
use crate::configuration::error::ConfigError;
use crate::simulation::states::{Arena, Body, BodyColor, NVec2};
use crate::simulation::world::World;

#[cfg_attr(feature = "viewer", derive(bevy::prelude::Resource))]
pub struct Scenario {
    pub world: World,
    pub spawners: Vec<Spawner>,
    pub rng: StdRng,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;

        let arena = Arena::new(cfg.world.width, cfg.world.height);
        let mut world = World::new(arena, cfg.world.parameters());
        let mut rng = StdRng::from_entropy();
        let mut spawners = Vec::new();

        for generator in &cfg.generators {
            match generator {
                GeneratorConfig::Scatter(s) => scatter(&mut world, s),
                GeneratorConfig::RandomSpawn(s) => spawners.push(Spawner::new(s)),
                GeneratorConfig::CenterMass(c) => center_mass(&mut world, c),
                GeneratorConfig::SolarSystem(s) => solar_system(&mut world, s, &mut rng),
            }
        }

        let density = world.params().density;
        for bc in &cfg.bodies {
            world.add_body(body_from_config(bc, density, &mut rng));
        }

        info!(
            bodies = world.len(),
            spawners = spawners.len(),
            width = arena.width,
            height = arena.height,
            "scenario built"
        );

        Ok(Self { world, spawners, rng })
    }

    /// Run every spawner against the host timestamp, returns bodies inserted
    pub fn poll_spawners(&mut self, timestamp_ms: f64) -> usize {
        let Self { world, spawners, rng } = self;
        let mut spawned = 0;
        for spawner in spawners.iter_mut() {
            spawned += spawner.poll(timestamp_ms, world, rng);
        }
        spawned
    }
}

/// Map a `BodyConfig` to a runtime `Body`
pub fn body_from_config<R: Rng + ?Sized>(bc: &BodyConfig, density: f64, rng: &mut R) -> Body {
    let color = bc.color.unwrap_or_else(|| BodyColor::random(rng));
    let mut body = Body::new(bc.x, bc.y, bc.radius, density)
        .with_velocity(bc.speed, bc.direction)
        .with_angular_speed(bc.angular_speed)
        .with_color(color);
    body.is_fixed = bc.fixed;
    body
}

/// A body at rest with radius in `size_range`, placed so the whole circle
/// is inside the arena
pub fn random_body<R: Rng + ?Sized>(
    rng: &mut R,
    arena: &Arena,
    [min, max]: [f64; 2],
    density: f64,
) -> Body {
    let size = rng.gen_range(min..=max);
    let x = rng.gen_range(size..=(arena.width - size).max(size));
    let y = rng.gen_range(size..=(arena.height - size).max(size));
    Body::new(x, y, size, density).with_color(BodyColor::random(rng))
}

/// Insert `count` random bodies, reproducibly when a seed is given
pub fn scatter(world: &mut World, cfg: &ScatterConfig) {
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let arena = world.arena();
    let density = world.params().density;
    for _ in 0..cfg.count {
        world.add_body(random_body(&mut rng, &arena, cfg.size_range, density));
    }
}

/// A single fixed body at the arena center
pub fn center_mass(world: &mut World, cfg: &CenterMassConfig) {
    let c = world.arena().center();
    let body = Body::new(c.x, c.y, cfg.size, world.params().density).fixed();
    world.add_body(body);
}

/// Fixed sun at the center, planet and moon on circular orbits around it
pub fn solar_system<R: Rng + ?Sized>(world: &mut World, cfg: &SolarSystemConfig, rng: &mut R) {
    let c = world.arena().center();
    let density = world.params().density;

    let sun = Body::new(c.x, c.y, cfg.sun_radius, density)
        .with_color(BodyColor::hsl(50.0, 100.0, 60.0))
        .fixed();
    let sun_mass = sun.mass;
    world.add_body(sun);

    for (radius, distance) in [
        (cfg.planet_radius, cfg.planet_distance),
        (cfg.moon_radius, cfg.moon_distance),
    ] {
        let p = c + NVec2::new(distance, 0.0);
        let body = Body::new(p.x, p.y, radius, density)
            .with_velocity(circular_speed(sun_mass, distance), FRAC_PI_2)
            .with_color(BodyColor::random(rng));
        world.add_body(body);
    }
}

/// Speed of a circular orbit at `distance` around `mass`, G = 1
pub fn circular_speed(mass: f64, distance: f64) -> f64 {
    (mass / distance).sqrt()
}

/// Periodic body insertion driven by host timestamps
#[derive(Debug, Clone)]
pub struct Spawner {
    pub interval_ms: f64,
    pub size_range: [f64; 2],
    pub count: usize,
    last_spawn: Option<f64>,
}

impl Spawner {
    pub fn new(cfg: &RandomSpawnConfig) -> Self {
        Self {
            interval_ms: cfg.interval_ms,
            size_range: cfg.size_range,
            count: cfg.count,
            last_spawn: None,
        }
    }

    /// Spawn on the first poll and whenever `interval_ms` has elapsed since the last spawn
    pub fn poll<R: Rng + ?Sized>(&mut self, timestamp_ms: f64, world: &mut World, rng: &mut R) -> usize {
        if let Some(last) = self.last_spawn {
            if timestamp_ms - last < self.interval_ms {
                return 0;
            }
        }
        self.last_spawn = Some(timestamp_ms);

        let arena = world.arena();
        let density = world.params().density;
        for _ in 0..self.count {
            world.add_body(random_body(rng, &arena, self.size_range, density));
        }
        self.count
    }
}
