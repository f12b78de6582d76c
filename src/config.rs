use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants;
use crate::error::{Result, ScraperError};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub thresholds: Thresholds,
    pub catalog: CatalogConfig,
}

/// Filter bounds for one run. Built fresh per run and never mutated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Kelvin
    pub max_temperature: f64,
    /// kg/m³. Used as a lower bound despite the name: density must exceed it.
    pub max_density: f64,
    /// Earth masses
    pub max_mass: f64,
    /// Earth radii
    pub max_radius: f64,
    pub semi_major_axis: AxisRange,
    pub max_eccentricity: f64,
    /// Accepted spectral class letters, uppercase
    pub star_classes: String,
}

/// Open interval in AU
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub url: String,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_temperature: constants::MAX_TEMPERATURE_K,
            max_density: constants::MAX_DENSITY_KG_M3,
            max_mass: constants::MAX_MASS_EARTH,
            max_radius: constants::MAX_RADIUS_EARTH,
            semi_major_axis: AxisRange::default(),
            max_eccentricity: constants::MAX_ECCENTRICITY,
            star_classes: constants::STAR_CLASSES.to_string(),
        }
    }
}

impl Default for AxisRange {
    fn default() -> Self {
        Self {
            min: constants::MIN_SEMI_MAJOR_AXIS_AU,
            max: constants::MAX_SEMI_MAJOR_AXIS_AU,
        }
    }
}

impl AxisRange {
    pub fn contains(&self, axis: f64) -> bool {
        self.min < axis && axis < self.max
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: constants::CATALOG_URL.to_string(),
        }
    }
}

impl Thresholds {
    /// Case-insensitive test on the first letter of a spectral type.
    pub fn accepts_star_class(&self, star_type: &str) -> bool {
        star_type
            .chars()
            .next()
            .map(|c| {
                let upper = c.to_ascii_uppercase();
                self.star_classes.chars().any(|accepted| accepted.to_ascii_uppercase() == upper)
            })
            .unwrap_or(false)
    }
}

impl Config {
    /// Loads the config file at `path`, or the built-in defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(config_path) = path else {
            return Ok(Self::default());
        };

        let config_content = fs::read_to_string(config_path).map_err(|e| {
            ScraperError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        Self::from_toml(&config_content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let axis = &self.thresholds.semi_major_axis;
        if axis.min >= axis.max {
            return Err(ScraperError::Config(format!(
                "semi_major_axis.min ({}) must be below semi_major_axis.max ({})",
                axis.min, axis.max
            )));
        }
        if self.thresholds.star_classes.trim().is_empty() {
            return Err(ScraperError::Config("star_classes must not be empty".into()));
        }
        Ok(())
    }
}
