use std::path::PathBuf;

use thiserror::Error;

/// A scenario file parsed but describes an impossible world
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("arena must have positive size, got {width} x {height}")]
    InvalidArena { width: f64, height: f64 },

    #[error("density must be positive, got {0}")]
    NonPositiveDensity(f64),

    #[error("length_to_physical must be positive, got {0}")]
    NonPositiveLengthFactor(f64),

    #[error("speed multiplier must be positive, got {0}")]
    NonPositiveSpeed(f64),

    #[error("size range [{min}, {max}] must satisfy 0 < min <= max")]
    InvalidSizeRange { min: f64, max: f64 },

    #[error("size range [{min}, {max}] does not fit inside a {width} x {height} arena")]
    SizeRangeExceedsArena { min: f64, max: f64, width: f64, height: f64 },

    #[error("body {index} has non-positive radius {radius}")]
    NonPositiveRadius { index: usize, radius: f64 },

    #[error("orbit distance must be positive, got {0}")]
    NonPositiveDistance(f64),

    #[error("spawn interval must be positive, got {0} ms")]
    NonPositiveInterval(f64),
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid scenario: {0}")]
    Config(#[from] ConfigError),
}
