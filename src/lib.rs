pub mod simulation;
pub mod configuration;
#[cfg(feature = "viewer")]
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Arena, Body, BodyColor, BodyId, NVec2, Trail};
pub use simulation::params::Parameters;
pub use simulation::clock::Clock;
pub use simulation::world::World;
pub use simulation::scenario::{Scenario, Spawner};

pub use configuration::config::{
    BodyConfig, CenterMassConfig, GeneratorConfig, RandomSpawnConfig, ScatterConfig,
    ScenarioConfig, SolarSystemConfig, WorldConfig,
};
pub use configuration::error::{ConfigError, ScenarioError};

#[cfg(feature = "viewer")]
pub use visualization::orbsim_vis2d::run_2d;

pub use benchmark::benchmark::{bench_step, bench_step_curve};
