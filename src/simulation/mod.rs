pub mod states;
pub mod params;
pub mod clock;
pub mod forces;
pub mod collision;
pub mod integrator;
pub mod world;
pub mod scenario;
