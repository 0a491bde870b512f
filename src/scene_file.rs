//! YAML scene descriptions.
//!
//! A scene file lists body specs; parents are referenced by name and angles
//! are written in degrees:
//!
//! ```yaml
//! bodies:
//!   - name: Sun
//!     mass: 1.9885e30
//!     radius: 6.957e8
//!     color: yellow
//!   - name: Earth
//!     mass: 5.972e24
//!     radius: 6371008.771
//!     color: blue
//!     parent: Sun
//!     distance: 1.4710e11
//!     angle degrees: 288.1
//!     speed: 3.029e4
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::simulation::CelestialBodySpec;

const SOLAR_SYSTEM: &str = include_str!("../assets/solar_system.yml");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, derive_new::new)]
pub struct SceneFile {
    #[serde(rename = "bodies")]
    pub scene_bodies: Vec<SceneBody>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SceneBody {
    pub name: String,
    #[serde(rename = "mass")]
    pub body_mass: f64,
    #[serde(rename = "radius")]
    pub body_radius: f64,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(rename = "distance", default)]
    pub orbit_distance: f64,
    #[serde(rename = "angle degrees", default)]
    pub orbit_angle_degrees: f64,
    #[serde(rename = "speed", default)]
    pub orbit_speed: f64,
}

fn default_color() -> String {
    "white".to_string()
}

impl SceneBody {
    pub fn to_spec(&self) -> CelestialBodySpec {
        let spec =
            CelestialBodySpec::root(&self.name, self.body_mass, self.body_radius, &self.color);
        match &self.parent {
            Some(parent) => spec.orbiting(
                parent,
                self.orbit_distance,
                self.orbit_angle_degrees.to_radians(),
                self.orbit_speed,
            ),
            None => spec,
        }
    }
}

impl SceneFile {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        serde_yml::from_str(source).context("scene is not valid YAML")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open scene file {}", path.display()))?;
        let scene: SceneFile = serde_yml::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse scene file {}", path.display()))?;
        info!(
            "loaded scene [{}] with {} bodies",
            path.display(),
            scene.scene_bodies.len()
        );
        Ok(scene)
    }

    /// The built-in solar system.
    pub fn solar_system() -> Result<Self> {
        Self::from_yaml_str(SOLAR_SYSTEM).context("built-in solar system is broken")
    }

    pub fn specs(&self) -> Vec<CelestialBodySpec> {
        self.scene_bodies.iter().map(SceneBody::to_spec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{SceneOptions, bootstrap};

    #[test]
    fn test_parse_minimal_scene() {
        let scene = SceneFile::from_yaml_str(
            r#"
bodies:
  - name: Star
    mass: 2.0e30
    radius: 7.0e8
  - name: Planet
    mass: 6.0e24
    radius: 6.4e6
    color: blue
    parent: Star
    distance: 1.5e11
    angle degrees: 90.0
    speed: 3.0e4
"#,
        )
        .unwrap();

        let specs = scene.specs();
        assert_eq!(specs.len(), 2);
        assert!(specs[0].is_root());
        assert_eq!(specs[0].color(), "white");
        assert_eq!(specs[1].parent(), Some("Star"));
        assert!((specs[1].initial_angle() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(specs[1].initial_distance(), 1.5e11);
        assert_eq!(specs[1].initial_velocity(), 3.0e4);
    }

    #[test]
    fn test_missing_mass_is_an_error() {
        let result = SceneFile::from_yaml_str("bodies:\n  - name: Nothing\n    radius: 1.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_builtin_solar_system() {
        let scene = SceneFile::solar_system().unwrap();
        let specs = scene.specs();
        assert_eq!(specs.len(), 16);

        let roots: Vec<_> = specs.iter().filter(|s| s.is_root()).collect();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].name(), "Sun");

        let planets_only = bootstrap(&specs, SceneOptions::with_moons(false)).unwrap();
        assert_eq!(planets_only.len(), 10);

        let everything = bootstrap(&specs, SceneOptions::with_moons(true)).unwrap();
        assert_eq!(everything.len(), 16);
        assert!(everything.get_by_name("Callisto").is_ok());
    }

    #[test]
    fn test_from_path_reports_missing_file() {
        let err = SceneFile::from_path(Path::new("does/not/exist.yml")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.yml"));
    }
}
