use std::collections::HashSet;
use std::f64::consts::FRAC_PI_2;

use crate::error::SimulationError;
use crate::simulation::{CelestialBodySpec, Placement, Simulation};
use crate::vector::Vector2;

fn star() -> CelestialBodySpec {
    CelestialBodySpec::root("Star", 2.0e30, 7.0e8, "yellow")
}

fn planet() -> CelestialBodySpec {
    CelestialBodySpec::root("Planet", 6.0e24, 6.4e6, "blue").orbiting("Star", 1.5e11, 0.0, 3.0e4)
}

#[test]
fn test_insert_root_at_origin() {
    let mut sim = Simulation::new();
    let id = sim.insert(&star(), Placement::Origin).unwrap();

    let body = sim.get(id).unwrap();
    assert_eq!(body.name(), "Star");
    assert_eq!(body.position(), Vector2::ZERO);
    assert_eq!(body.velocity(), Vector2::ZERO);
    assert_eq!(body.color(), "yellow");
    assert_eq!(sim.len(), 1);
}

#[test]
fn test_insert_root_in_orbit_fails() {
    let mut sim = Simulation::new();
    let err = sim.insert(&star(), Placement::Orbit).unwrap_err();

    assert!(matches!(err, SimulationError::Configuration(_)), "{err:?}");
    assert!(sim.is_empty());
}

#[test]
fn test_insert_child_without_parent_in_simulation_fails() {
    let mut sim = Simulation::new();
    let err = sim.insert(&planet(), Placement::Orbit).unwrap_err();

    assert!(matches!(err, SimulationError::Configuration(_)), "{err:?}");
}

#[test]
fn test_insert_rejects_non_positive_mass() {
    let mut sim = Simulation::new();
    let massless = CelestialBodySpec::root("Ghost", 0.0, 1.0, "white");

    assert!(matches!(
        sim.insert(&massless, Placement::Origin),
        Err(SimulationError::Configuration(_))
    ));
}

#[test]
fn test_insert_rejects_negative_radius() {
    let mut sim = Simulation::new();
    let inverted = CelestialBodySpec::root("Inverted", 1.0e20, -5.0, "white");
    let endless = CelestialBodySpec::root("Endless", 1.0e20, f64::INFINITY, "white");

    assert!(matches!(
        sim.insert(&inverted, Placement::Origin),
        Err(SimulationError::Configuration(_))
    ));
    assert!(matches!(
        sim.insert(&endless, Placement::Origin),
        Err(SimulationError::Configuration(_))
    ));
    assert!(sim.is_empty());

    let point = CelestialBodySpec::root("Point", 1.0e20, 0.0, "white");
    assert!(sim.insert(&point, Placement::Origin).is_ok());
}

#[test]
fn test_insert_on_top_of_parent_fails() {
    let mut sim = Simulation::new();
    sim.insert(&star(), Placement::Origin).unwrap();
    let clinging = CelestialBodySpec::root("Clinging", 1.0e20, 1.0, "white")
        .orbiting("Star", 0.0, 0.0, 1.0e3);

    assert!(matches!(
        sim.insert(&clinging, Placement::Orbit),
        Err(SimulationError::Configuration(_))
    ));
}

#[test]
fn test_planet_orbit_placement() {
    let mut sim = Simulation::new();
    let star_id = sim.insert(&star(), Placement::Origin).unwrap();
    let planet_id = sim.insert(&planet(), Placement::Orbit).unwrap();

    let star = sim.get(star_id).unwrap();
    let planet = sim.get(planet_id).unwrap();
    assert_eq!(planet.position(), Vector2::new(1.5e11, 0.0));

    // direction to the star is (-1, 0); a quarter turn clockwise gives (0, 1)
    let expected = star.velocity() + Vector2::new(0.0, 3.0e4);
    assert!((planet.velocity() - expected).length() < 1e-6);
    assert!((planet.velocity().length() - 3.0e4).abs() < 1e-6);
    let dot = planet.velocity().dot(planet.position());
    let scale = planet.velocity().length() * planet.position().length();
    assert!(dot.abs() <= 1e-12 * scale, "velocity not tangential, dot {dot:e}");
}

#[test]
fn test_orbit_placement_follows_moving_parent() {
    let mut sim = Simulation::new();
    let parent = CelestialBodySpec::root("Parent", 1.0e25, 1.0, "white");
    sim.insert(
        &parent,
        Placement::At {
            position: Vector2::new(1.0e9, 2.0e9),
            velocity: Vector2::new(100.0, -50.0),
        },
    )
    .unwrap();
    let moon = CelestialBodySpec::root("Moon", 1.0e20, 1.0, "gray")
        .orbiting("Parent", 1.0e6, FRAC_PI_2, 10.0);
    let moon_id = sim.insert(&moon, Placement::Orbit).unwrap();

    let moon = sim.get(moon_id).unwrap();
    assert!((moon.position() - Vector2::new(1.0e9, 2.001e9)).length() < 1e-3);
    // direction to the parent is (0, -1); a quarter turn clockwise gives (-1, 0)
    assert!((moon.velocity() - Vector2::new(90.0, -50.0)).length() < 1e-9);
}

#[test]
fn test_get_unknown_id() {
    let mut other = Simulation::new();
    let foreign = other.insert(&star(), Placement::Origin).unwrap();

    let sim = Simulation::new();
    assert!(matches!(
        sim.get(foreign),
        Err(SimulationError::BodyNotFound(_))
    ));
}

#[test]
fn test_get_by_name() {
    let mut sim = Simulation::new();
    let star_id = sim.insert(&star(), Placement::Origin).unwrap();
    sim.insert(&planet(), Placement::Orbit).unwrap();

    assert_eq!(sim.get_by_name("Star").unwrap().id(), star_id);
    assert_eq!(sim.id_of("Star").unwrap(), star_id);
    assert!(matches!(
        sim.get_by_name("star"),
        Err(SimulationError::BodyNotFound(_))
    ));
}

#[test]
fn test_get_by_name_first_match_wins() {
    let mut sim = Simulation::new();
    let first = sim.insert(&star(), Placement::Origin).unwrap();
    let second = sim.insert(&star(), Placement::Origin).unwrap();

    assert_ne!(first, second);
    assert_eq!(sim.get_by_name("Star").unwrap().id(), first);
}

#[test]
fn test_ids_are_unique() {
    let mut sim = Simulation::new();
    let ids: HashSet<_> = (0..50)
        .map(|_| sim.insert(&star(), Placement::Origin).unwrap())
        .collect();

    assert_eq!(ids.len(), 50);
    assert_eq!(sim.len(), 50);
}

#[test]
fn test_iter_follows_insertion_order() {
    let mut sim = Simulation::new();
    let star_id = sim.insert(&star(), Placement::Origin).unwrap();
    let planet_id = sim.insert(&planet(), Placement::Orbit).unwrap();

    let ids: Vec<_> = sim.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![star_id, planet_id]);
}

#[test]
fn test_step_tracks_time() {
    let mut sim = Simulation::new();
    sim.insert(&star(), Placement::Origin).unwrap();

    sim.steps(60.0, 10);

    assert_eq!(sim.ticks(), 10);
    assert!((sim.elapsed() - 600.0).abs() < 1e-9);
}
