use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use getset::{CopyGetters, Getters, Setters};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Display and pacing parameters for a run.
///
/// Every field has a default, so a settings file only needs the values it
/// changes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Getters, CopyGetters, Setters)]
#[serde(default)]
pub struct Settings {
    /// Meters of simulated space per terminal row.
    #[serde(rename = "distance scale")]
    #[getset(get_copy = "pub", set = "pub")]
    distance_scale: f64,
    /// Multiplier applied to body glyph sizes.
    #[serde(rename = "planet scale")]
    #[getset(get_copy = "pub", set = "pub")]
    planet_scale: f64,
    /// Simulated seconds per wall-clock second.
    #[serde(rename = "timescale")]
    #[getset(get_copy = "pub", set = "pub")]
    timescale: f64,
    #[serde(rename = "ticks per second")]
    #[getset(get_copy = "pub", set = "pub")]
    ticks_per_second: u32,
    #[serde(rename = "show moons")]
    #[getset(get_copy = "pub", set = "pub")]
    show_moons: bool,
    /// Name of the body kept at the center of the screen.
    #[serde(rename = "focus")]
    #[getset(get = "pub", set = "pub")]
    focus: String,
    /// Stop after this many frames; run until interrupted when absent.
    #[serde(rename = "frame limit")]
    #[getset(get_copy = "pub", set = "pub")]
    frame_limit: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            distance_scale: 1.0e10,
            planet_scale: 0.1,
            timescale: 5.0e6,
            ticks_per_second: 120,
            show_moons: false,
            focus: "Sun".to_string(),
            frame_limit: None,
        }
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open settings file {}", path.display()))?;
        let settings: Settings = serde_yml::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse settings file {}", path.display()))?;
        settings.validate()?;
        info!("loaded settings from [{}]", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.distance_scale > 0.0 && self.distance_scale.is_finite(),
            "distance scale must be positive and finite, got {}",
            self.distance_scale
        );
        ensure!(
            self.planet_scale > 0.0 && self.planet_scale.is_finite(),
            "planet scale must be positive and finite, got {}",
            self.planet_scale
        );
        ensure!(
            self.timescale > 0.0 && self.timescale.is_finite(),
            "timescale must be positive and finite, got {}",
            self.timescale
        );
        ensure!(self.ticks_per_second > 0, "ticks per second must be positive");
        Ok(())
    }

    /// Simulated seconds advanced by every tick.
    pub fn dt(&self) -> f64 {
        self.timescale / f64::from(self.ticks_per_second)
    }
}
