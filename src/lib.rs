pub mod application;
pub mod error;
pub mod graphics;
pub mod input;
pub mod scene_file;
pub mod settings;
pub mod simulation;
pub mod vector;

pub use error::{Result, SimulationError};
pub use simulation::{
    BodyId, CelestialBodySpec, Placement, SceneOptions, SimBody, Simulation, bootstrap,
};
pub use vector::Vector2;
