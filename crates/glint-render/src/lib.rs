//! Glint Render - the drawing surface the effects core paints into
//!
//! The core never owns a real renderer. It issues primitive draw calls into
//! an injected [`Canvas`] and never reads back from it. This crate provides:
//! - the `Canvas` trait and its value types (`Paint`, `Path`, `GradientStop`)
//! - scoped pooled drawing state (`DrawState`, `PaintScope`, `PathScope`)
//! - `RecordingCanvas` for draw-call assertions and golden comparisons
//! - `ImageCanvas`, a CPU rasterizer over `image::RgbaImage`
//! - per-world backdrop gradients

pub mod backdrop;
mod canvas;
mod paint;
mod path;
mod raster;
mod recording;

pub use canvas::{Canvas, DrawCtx, DrawState, GradientStop};
pub use paint::{BlendMode, Paint, PaintScope, PaintStyle};
pub use path::{Path, PathScope, PathVerb};
pub use raster::ImageCanvas;
pub use recording::{DrawCall, RecordingCanvas};
