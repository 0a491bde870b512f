use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    /// Lookup by identifier or by name found nothing.
    #[error("simulation does not contain a body with {0}")]
    BodyNotFound(String),

    /// A body could not be placed into the simulation.
    #[error("invalid body configuration: {0}")]
    Configuration(String),

    #[error("cannot take the direction of a zero-length vector")]
    DegenerateGeometry,
}

pub type Result<T> = std::result::Result<T, SimulationError>;
