use std::collections::HashMap;
use std::f64::consts::FRAC_PI_2;

use tracing::debug;

use crate::error::{Result, SimulationError};
use crate::simulation::body::{BodyId, SimBody};
use crate::simulation::integrator;
use crate::simulation::spec::CelestialBodySpec;
use crate::simulation::G;
use crate::vector::Vector2;

/// Where a newly inserted body starts out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// At the coordinate origin, at rest. Used for root bodies.
    Origin,
    /// On a roughly circular orbit around the spec's parent, which must
    /// already be in the simulation.
    Orbit,
    /// At an explicit position and velocity.
    At { position: Vector2, velocity: Vector2 },
}

/// Owns every simulated body and advances them through time.
///
/// Bodies are kept in insertion order, which fixes the pair order used by
/// the integrator and makes runs reproducible.
#[derive(Debug, Clone, Default)]
pub struct Simulation {
    bodies: Vec<SimBody>,
    index: HashMap<BodyId, usize>,
    elapsed: f64,
    ticks: u64,
}

impl Simulation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Simulated seconds since the simulation was created.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of steps taken so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn get(&self, id: BodyId) -> Result<&SimBody> {
        self.index
            .get(&id)
            .map(|&slot| &self.bodies[slot])
            .ok_or_else(|| SimulationError::BodyNotFound(format!("id {id}")))
    }

    /// First body, in insertion order, called `name`.
    pub fn get_by_name(&self, name: &str) -> Result<&SimBody> {
        self.bodies
            .iter()
            .find(|body| body.name() == name)
            .ok_or_else(|| SimulationError::BodyNotFound(format!("name '{name}'")))
    }

    pub fn id_of(&self, name: &str) -> Result<BodyId> {
        self.get_by_name(name).map(SimBody::id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &SimBody)> {
        self.bodies.iter().map(|body| (body.id(), body))
    }

    pub fn bodies(&self) -> &[SimBody] {
        &self.bodies
    }

    /// Adds a body built from `spec` and returns its freshly allocated id.
    ///
    /// Orbit placement puts the body at `initial_distance` from its parent
    /// along `initial_angle`, and gives it the parent's velocity plus
    /// `initial_velocity` along the parent direction turned a quarter turn
    /// clockwise.
    pub fn insert(&mut self, spec: &CelestialBodySpec, placement: Placement) -> Result<BodyId> {
        if !(spec.mass() > 0.0 && spec.mass().is_finite()) {
            return Err(SimulationError::Configuration(format!(
                "{} must have a positive mass, got {}",
                spec.name(),
                spec.mass()
            )));
        }
        if !(spec.radius() >= 0.0 && spec.radius().is_finite()) {
            return Err(SimulationError::Configuration(format!(
                "{} must have a non-negative radius, got {}",
                spec.name(),
                spec.radius()
            )));
        }

        let (position, velocity) = match placement {
            Placement::Origin => (Vector2::ZERO, Vector2::ZERO),
            Placement::At { position, velocity } => (position, velocity),
            Placement::Orbit => self.orbital_state(spec)?,
        };

        let id = BodyId::generate();
        debug!(name = %spec.name(), %id, %position, %velocity, "inserting body");
        self.index.insert(id, self.bodies.len());
        self.bodies.push(SimBody::spawn(id, spec, position, velocity));
        Ok(id)
    }

    fn orbital_state(&self, spec: &CelestialBodySpec) -> Result<(Vector2, Vector2)> {
        let Some(parent_name) = spec.parent() else {
            return Err(SimulationError::Configuration(format!(
                "{} does not have a parent body; it must be placed at the origin",
                spec.name()
            )));
        };
        let parent = self.get_by_name(parent_name).map_err(|err| {
            SimulationError::Configuration(format!(
                "parent of {} is not in the simulation: {err}",
                spec.name()
            ))
        })?;

        let position =
            parent.position() + Vector2::from_polar(spec.initial_angle(), spec.initial_distance());
        let inward = position.direction_to(parent.position()).map_err(|_| {
            SimulationError::Configuration(format!(
                "{} would spawn on top of {}",
                spec.name(),
                parent_name
            ))
        })?;
        let velocity = parent.velocity() + inward.rotated(-FRAC_PI_2) * spec.initial_velocity();

        Ok((position, velocity))
    }

    /// Advances the whole system by `dt` simulated seconds.
    pub fn step(&mut self, dt: f64) {
        integrator::step(&mut self.bodies, dt);
        self.elapsed += dt;
        self.ticks += 1;
    }

    pub fn steps(&mut self, dt: f64, count: usize) {
        for _ in 0..count {
            self.step(dt);
        }
    }

    /// Sum of all body momenta. Stays constant for an isolated system, up to
    /// round-off.
    pub fn total_momentum(&self) -> Vector2 {
        self.bodies
            .iter()
            .map(SimBody::momentum)
            .fold(Vector2::ZERO, |acc, p| acc + p)
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(SimBody::kinetic_energy).sum()
    }

    /// Gravitational potential energy, each pair counted once. Coincident
    /// pairs contribute nothing.
    pub fn potential_energy(&self) -> f64 {
        self.bodies
            .iter()
            .enumerate()
            .flat_map(|(i, a)| {
                self.bodies[i + 1..].iter().filter_map(move |b| {
                    let distance = a.distance_to(b);
                    (distance > 0.0).then(|| -G * a.mass() * b.mass() / distance)
                })
            })
            .sum()
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }
}
