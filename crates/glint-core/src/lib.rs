//! Glint Core - Foundational types for the Glint effects core
//!
//! This crate provides the types every other Glint crate depends on:
//! - `World` - the biome selector driving all per-world tables
//! - `noise` - deterministic hash, cell random, value noise and FBM
//! - `Color`, `Rect` - drawing value types
//! - `FxConfig` - TOML configuration
//! - Error types and Result alias

mod config;
mod error;
pub mod noise;
mod types;
mod world;

pub use config::FxConfig;
pub use error::{GlintError, Result};
pub use glam::Vec2;
pub use types::{Color, Rect};
pub use world::World;
