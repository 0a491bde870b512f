//! Fixed-step symplectic Euler integration with direct pairwise gravity.
//!
//! A step runs in two phases. First the net force on every body is summed
//! over all unordered pairs, using positions from the start of the step.
//! Only then are velocities and positions updated, so the result does not
//! depend on the order bodies are visited in.

use tracing::trace;

use crate::simulation::body::SimBody;
use crate::vector::Vector2;

/// Net gravitational force on every body, in slice order.
///
/// Each pair is evaluated once; the force on the second body is the exact
/// negation of the force on the first.
pub fn net_forces(bodies: &[SimBody]) -> Vec<Vector2> {
    let mut forces = vec![Vector2::ZERO; bodies.len()];

    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let force = bodies[i].force_from(&bodies[j]);
            forces[i] = forces[i] + force;
            forces[j] = forces[j] - force;
        }
    }

    forces
}

/// Advances every body by `dt` seconds under the given net forces.
pub fn symplectic_euler(bodies: &mut [SimBody], forces: &[Vector2], dt: f64) {
    bodies
        .iter_mut()
        .zip(forces.iter())
        .for_each(|(body, force)| body.advance(*force, dt));
}

/// One full integration tick.
pub fn step(bodies: &mut [SimBody], dt: f64) {
    let forces = net_forces(bodies);
    trace!(bodies = bodies.len(), dt, "integrating step");
    symplectic_euler(bodies, &forces, dt);
}
