use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Tunables for building and querying the region lookup.
///
/// Every field has a default, so a config file only needs the keys it
/// changes:
///
/// ```json
/// { "raster_width": 3600, "raster_height": 1800, "outline_width": 2.0 }
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RegionConfig {
    /// Minimum bounding-box width and height in degrees for a region to be kept.
    pub min_span: f64,
    /// Raster width in pixels (10800 = 1/30 degree per pixel).
    pub raster_width: usize,
    /// Raster height in pixels.
    pub raster_height: usize,
    /// Outline stroke width in raster pixels.
    pub outline_width: f64,
    /// Globe radius in world units.
    pub globe_radius: f64,
    /// Vertical field of view in degrees.
    pub camera_fov: f64,
    pub camera_near: f64,
    pub camera_far: f64,
    /// Initial camera distance from the globe centre.
    pub camera_distance: f64,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            min_span: 1.0,
            raster_width: 10800,
            raster_height: 5400,
            outline_width: 8.0,
            globe_radius: 1.0,
            camera_fov: 75.0,
            camera_near: 0.01,
            camera_far: 5.0,
            camera_distance: 2.0,
        }
    }
}

impl RegionConfig {
    /// Parse from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let mut bytes = text.as_bytes().to_vec();
        let config: RegionConfig = simd_json::serde::from_slice(&mut bytes)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.raster_width == 0 || self.raster_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "raster resolution must be non-zero, got {}x{}",
                self.raster_width, self.raster_height
            )));
        }
        if !(self.min_span >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "min_span must be a non-negative number, got {}",
                self.min_span
            )));
        }
        if !(self.outline_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "outline_width must be positive, got {}",
                self.outline_width
            )));
        }
        if !(self.globe_radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "globe_radius must be positive, got {}",
                self.globe_radius
            )));
        }
        if !(self.camera_near > 0.0 && self.camera_far > self.camera_near) {
            return Err(ConfigError::Invalid(format!(
                "camera clip range must satisfy 0 < near < far, got {}..{}",
                self.camera_near, self.camera_far
            )));
        }
        if !(self.camera_fov > 0.0 && self.camera_fov < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera_fov must be in (0, 180), got {}",
                self.camera_fov
            )));
        }
        Ok(())
    }
}
