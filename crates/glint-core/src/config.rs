//! Effects configuration loaded from TOML

use crate::error::{GlintError, Result};
use crate::types::Rect;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Effects configuration (host-adjustable, loaded once per run).
///
/// Every field has a default so partial files are valid. `world` is not
/// range-checked: unknown worlds resolve to the neutral default downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FxConfig {
    pub world: i32,
    pub width: u32,
    pub height: u32,
    pub cell_size: f32,
    pub fps: f32,
    pub lighting: bool,
    pub ambient: bool,
    pub weather: bool,
    pub decals: bool,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            world: 0,
            width: 960,
            height: 640,
            cell_size: 32.0,
            fps: 60.0,
            lighting: true,
            ambient: true,
            weather: true,
            decals: true,
        }
    }
}

impl FxConfig {
    /// Parse and validate a config from TOML text
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GlintError::ConfigError(format!(
                "field size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.cell_size > 0.0) {
            return Err(GlintError::ConfigError(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        if !(self.fps > 0.0) {
            return Err(GlintError::ConfigError(format!(
                "fps must be positive, got {}",
                self.fps
            )));
        }
        Ok(())
    }

    /// Field bounds in pixels
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width as f32, self.height as f32)
    }

    /// Fixed frame step in seconds
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.fps
    }
}
