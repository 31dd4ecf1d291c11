//! Study-area configuration shared by all simulators
//!
//! Every simulator is constructed once from a [`SiteConfig`] describing the
//! fixed urban study area (center coordinates, analysis area, base
//! elevation). The configuration is immutable after construction and shared
//! read-only by all calculations of that instance.
//!
//! Missing or non-numeric fields are a fatal construction-time error; there
//! is no partial configuration or fallback.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a site configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed (missing field,
    /// wrong type, malformed JSON).
    #[error("failed to parse site configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// `location.area_km2` must be a positive area.
    #[error("location.area_km2 must be positive, got {0}")]
    NonPositiveArea(f64),
}

/// Geographic description of the study area.
///
/// All simulators read the same four numeric fields; `city` is carried along
/// for labeling and export metadata only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Display name of the city or district (not used computationally).
    #[serde(default)]
    pub city: String,

    /// Latitude of the area center in decimal degrees.
    pub center_lat: f64,

    /// Longitude of the area center in decimal degrees.
    pub center_lng: f64,

    /// Analysis area in km². Must be positive.
    pub area_km2: f64,

    /// Mean terrain elevation in meters above sea level.
    pub elevation_avg: f64,
}

/// Top-level project configuration handed to simulator constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Study-area location parameters.
    pub location: LocationConfig,
}

impl SiteConfig {
    /// Parse a configuration from a JSON document and validate it.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] when a required field is absent or
    /// non-numeric, and [`ConfigError::NonPositiveArea`] when the analysis
    /// area is zero or negative.
    ///
    /// # Example
    /// ```
    /// use urban_sim_core::SiteConfig;
    ///
    /// let config = SiteConfig::from_json_str(
    ///     r#"{"location": {"city": "Testville", "center_lat": 54.10,
    ///         "center_lng": 22.95, "area_km2": 5.0, "elevation_avg": 163.0}}"#,
    /// )
    /// .unwrap();
    /// assert_eq!(config.location.area_km2, 5.0);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate invariants that the type system cannot express.
    ///
    /// # Errors
    /// Returns [`ConfigError::NonPositiveArea`] for a non-positive area.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.location.area_km2 <= 0.0 {
            return Err(ConfigError::NonPositiveArea(self.location.area_km2));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> SiteConfig {
    SiteConfig {
        location: LocationConfig {
            city: "Testville".to_string(),
            center_lat: 54.10,
            center_lng: 22.95,
            area_km2: 5.0,
            elevation_avg: 163.0,
        },
    }
}
