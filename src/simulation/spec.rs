use getset::{CopyGetters, Getters};

/// Static description of an astronomical object.
///
/// The parent is referenced by name and resolved when the body is inserted
/// into a [`Simulation`](crate::simulation::Simulation), so specs can be
/// declared in any order.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters, derive_new::new)]
pub struct CelestialBodySpec {
    #[getset(get = "pub")]
    name: String,
    /// kg
    #[getset(get_copy = "pub")]
    mass: f64,
    /// m
    #[getset(get_copy = "pub")]
    radius: f64,
    /// Opaque color name handed through to rendering.
    #[getset(get = "pub")]
    color: String,
    parent: Option<String>,
    /// m, distance from the parent at spawn time
    #[getset(get_copy = "pub")]
    initial_distance: f64,
    /// rad, polar angle from the parent at spawn time
    #[getset(get_copy = "pub")]
    initial_angle: f64,
    /// m/s, tangential speed relative to the parent at spawn time
    #[getset(get_copy = "pub")]
    initial_velocity: f64,
}

impl CelestialBodySpec {
    /// A body without a parent, spawned at the origin at rest.
    pub fn root(name: impl Into<String>, mass: f64, radius: f64, color: impl Into<String>) -> Self {
        Self::new(name.into(), mass, radius, color.into(), None, 0.0, 0.0, 0.0)
    }

    /// Attaches this body to `parent` with the given orbital placement.
    pub fn orbiting(
        mut self,
        parent: impl Into<String>,
        distance: f64,
        angle: f64,
        velocity: f64,
    ) -> Self {
        self.parent = Some(parent.into());
        self.initial_distance = distance;
        self.initial_angle = angle;
        self.initial_velocity = velocity;
        self
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
