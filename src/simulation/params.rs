//! Runtime physical and behavioral parameters for a `World`
//!
//! `Parameters` holds settings read on every tick:
//! - absorption and boundary policy (`absorb`, `bounded`),
//! - time scaling (`speed`),
//! - unit conversion for the expansion overlay (`length_to_physical`, `expansion_rate`),
//! - constant density used to derive mass from radius,
//! - trail length for the renderer

/// Hubble constant, 70 km/s/Mpc expressed per second
pub const HUBBLE_CONSTANT: f64 = 2.27e-18;

/// Meters per arena unit used when no scenario overrides it
pub const DEFAULT_LENGTH_TO_PHYSICAL: f64 = 9.461e11;

/// Mass per cubic arena unit used when no scenario overrides it
pub const DEFAULT_DENSITY: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub absorb: bool, // merge colliding bodies
    pub bounded: bool, // reflect at the arena edge instead of removing
    pub speed: f64, // simulation seconds per wall-clock second
    pub length_to_physical: f64, // meters per arena unit
    pub expansion_rate: f64, // H, outward speed per unit of distance
    pub density: f64, // k in mass = k * radius^3
    pub trail_length: usize, // 0 disables trail recording
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            absorb: true,
            bounded: false,
            speed: 1.0,
            length_to_physical: DEFAULT_LENGTH_TO_PHYSICAL,
            expansion_rate: HUBBLE_CONSTANT,
            density: DEFAULT_DENSITY,
            trail_length: 10,
        }
    }
}
