use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::camera::{DEFAULT_FAR, DEFAULT_FOV_DEGREES, DEFAULT_NEAR};

pub const DEFAULT_PARTICLE_COUNT: u32 = 50;
pub const DEFAULT_CAMERA_DISTANCE: f32 = 50.0;
/// Radians the camera orbits about Y on every frame
pub const DEFAULT_ORBIT_STEP: f32 = 0.01;
pub const DEFAULT_WINDOW_WIDTH: u32 = 800;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 600;

/// Scene parameters; every field falls back to its default when absent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub particle_count: u32,
    pub particle_radius: f32,
    pub sphere_segments: u32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub camera_distance: f32,
    pub orbit_step: f32,
    /// Clear the offscreen target every frame instead of accumulating
    pub clear_offscreen: bool,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            particle_radius: 1.0,
            sphere_segments: 10,
            fov_degrees: DEFAULT_FOV_DEGREES,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            camera_distance: DEFAULT_CAMERA_DISTANCE,
            orbit_step: DEFAULT_ORBIT_STEP,
            clear_offscreen: false,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl SceneConfig {
    /// Parse a JSON config document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Invalid scene config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Failed to load config {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.near > 0.0) {
            bail!("near plane must be positive, got {}", self.near);
        }
        if !(self.far > self.near) {
            bail!("far plane ({}) must lie beyond near plane ({})", self.far, self.near);
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            bail!("field of view must be within (0, 180) degrees, got {}", self.fov_degrees);
        }
        if !(self.particle_radius > 0.0) {
            bail!("particle radius must be positive, got {}", self.particle_radius);
        }
        if self.sphere_segments < 3 {
            bail!("sphere needs at least 3 segments, got {}", self.sphere_segments);
        }
        if self.window_width == 0 || self.window_height == 0 {
            bail!(
                "window must have a non-zero size, got {}x{}",
                self.window_width,
                self.window_height
            );
        }
        if !self.camera_distance.is_finite() || !self.orbit_step.is_finite() {
            bail!("camera distance and orbit step must be finite");
        }
        Ok(())
    }
}
