//! CLI command implementations

pub mod decals;
pub mod render;
pub mod simulate;

use anyhow::{Context, Result};
use glint_core::FxConfig;
use std::path::Path;

/// Load the config file when given, otherwise the defaults
pub fn load_config(path: Option<&Path>) -> Result<FxConfig> {
    match path {
        Some(path) => FxConfig::load(path)
            .with_context(|| format!("Failed to load config '{}'", path.display())),
        None => Ok(FxConfig::default()),
    }
}

/// Whole frames covering `seconds` at `fps`, at least one
pub fn frame_count(seconds: f32, fps: f32) -> u32 {
    let frames = (seconds.max(0.0) * fps).round();
    if frames.is_finite() {
        (frames as u32).max(1)
    } else {
        1
    }
}
