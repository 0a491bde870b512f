use std::fmt;

use getset::{CopyGetters, Getters};
use uuid::Uuid;

use crate::error::Result;
use crate::simulation::G;
use crate::simulation::spec::CelestialBodySpec;
use crate::vector::Vector2;

/// Process-unique handle to a body owned by a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(Uuid);

impl BodyId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Live, simulated instance of a [`CelestialBodySpec`].
///
/// Only the owning simulation can change the kinematic state; everything
/// else sees a read-only view.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct SimBody {
    #[getset(get_copy = "pub")]
    id: BodyId,
    #[getset(get = "pub")]
    name: String,
    /// kg
    #[getset(get_copy = "pub")]
    mass: f64,
    /// m
    #[getset(get_copy = "pub")]
    radius: f64,
    #[getset(get = "pub")]
    color: String,
    /// m
    #[getset(get_copy = "pub")]
    position: Vector2,
    /// m/s
    #[getset(get_copy = "pub")]
    velocity: Vector2,
}

impl SimBody {
    pub(crate) fn spawn(
        id: BodyId,
        spec: &CelestialBodySpec,
        position: Vector2,
        velocity: Vector2,
    ) -> Self {
        Self {
            id,
            name: spec.name().clone(),
            mass: spec.mass(),
            radius: spec.radius(),
            color: spec.color().clone(),
            position,
            velocity,
        }
    }

    pub fn distance_to(&self, other: &SimBody) -> f64 {
        self.position.distance_to(other.position)
    }

    pub fn distance_squared_to(&self, other: &SimBody) -> f64 {
        self.position.distance_squared_to(other.position)
    }

    pub fn direction_to(&self, other: &SimBody) -> Result<Vector2> {
        self.position.direction_to(other.position)
    }

    /// Magnitude of the gravitational pull between two bodies, in newtons.
    ///
    /// Coincident bodies exert no force on each other.
    pub fn gravity_to(&self, other: &SimBody) -> f64 {
        let distance_squared = self.distance_squared_to(other);
        if distance_squared == 0.0 {
            return 0.0;
        }
        G * self.mass * other.mass / distance_squared
    }

    /// Force exerted on `self` by `other`.
    ///
    /// Bodies too close for the magnitude to be representable are treated
    /// like coincident ones and exert no force.
    pub fn force_from(&self, other: &SimBody) -> Vector2 {
        let magnitude = self.gravity_to(other);
        if magnitude == 0.0 || !magnitude.is_finite() {
            return Vector2::ZERO;
        }
        match self.direction_to(other) {
            Ok(direction) => direction * magnitude,
            Err(_) => Vector2::ZERO,
        }
    }

    pub fn momentum(&self) -> Vector2 {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Semi-implicit Euler update: velocity first, then position from the
    /// new velocity.
    pub(crate) fn advance(&mut self, net_force: Vector2, dt: f64) {
        let acceleration = net_force / self.mass;
        self.velocity = self.velocity + acceleration * dt;
        self.position = self.position + self.velocity * dt;
    }
}
