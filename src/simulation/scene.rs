//! Turns a flat list of body specs into a populated simulation.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::{Result, SimulationError};
use crate::simulation::spec::CelestialBodySpec;
use crate::simulation::system::{Placement, Simulation};

/// Controls which specs make it into the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_new::new)]
pub struct SceneOptions {
    /// Deepest parent chain to include: 0 keeps only roots, 1 adds planets,
    /// 2 adds moons. `None` keeps everything.
    pub max_depth: Option<usize>,
}

impl SceneOptions {
    pub fn with_moons(show_moons: bool) -> Self {
        Self::new(if show_moons { None } else { Some(1) })
    }
}

/// Builds a simulation from `specs`.
///
/// Roots go in first at the origin, then every other body in order of
/// depth, so each parent is already simulated when its children are placed.
pub fn bootstrap(specs: &[CelestialBodySpec], options: SceneOptions) -> Result<Simulation> {
    let ordered = dependency_order(specs)?;
    let mut simulation = Simulation::new();

    for (depth, spec) in ordered {
        if options.max_depth.is_some_and(|max| depth > max) {
            debug!(name = %spec.name(), depth, "skipping body below inclusion depth");
            continue;
        }
        let placement = if spec.is_root() {
            Placement::Origin
        } else {
            Placement::Orbit
        };
        simulation.insert(spec, placement)?;
    }

    info!(bodies = simulation.len(), "scene ready");
    Ok(simulation)
}

/// Pairs every spec with its depth and sorts parents before children.
///
/// Fails on duplicate names, unknown parents and parent chains that loop.
pub fn dependency_order(specs: &[CelestialBodySpec]) -> Result<Vec<(usize, &CelestialBodySpec)>> {
    let mut by_name: HashMap<&str, &CelestialBodySpec> = HashMap::with_capacity(specs.len());
    for spec in specs {
        if by_name.insert(spec.name().as_str(), spec).is_some() {
            return Err(SimulationError::Configuration(format!(
                "body name '{}' is declared more than once",
                spec.name()
            )));
        }
    }

    let mut ordered = specs
        .iter()
        .map(|spec| depth_of(spec, &by_name, specs.len()).map(|depth| (depth, spec)))
        .collect::<Result<Vec<_>>>()?;
    ordered.sort_by_key(|(depth, _)| *depth);
    Ok(ordered)
}

fn depth_of(
    spec: &CelestialBodySpec,
    by_name: &HashMap<&str, &CelestialBodySpec>,
    limit: usize,
) -> Result<usize> {
    let mut depth = 0;
    let mut current = spec;

    while let Some(parent_name) = current.parent() {
        current = by_name.get(parent_name).copied().ok_or_else(|| {
            SimulationError::Configuration(format!(
                "{} orbits '{}', which is not part of the scene",
                current.name(),
                parent_name
            ))
        })?;
        depth += 1;
        if depth > limit {
            return Err(SimulationError::Configuration(format!(
                "parent chain of {} loops back on itself",
                spec.name()
            )));
        }
    }

    Ok(depth)
}
