pub mod body;
pub mod integrator;
pub mod scene;
pub mod spec;
pub mod system;

pub use body::{BodyId, SimBody};
pub use scene::{SceneOptions, bootstrap};
pub use spec::CelestialBodySpec;
pub use system::{Placement, Simulation};

/// Newtonian gravitational constant, m^3 / (kg s^2).
pub const G: f64 = 6.6743e-11;

#[cfg(test)]
mod system_test;
