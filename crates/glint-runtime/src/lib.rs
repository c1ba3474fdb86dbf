//! Glint Runtime - frame loop building blocks
//!
//! - `FrameClock` - wall-clock or fixed-step effect time
//! - `FramePipeline` - owns the particle layers and lighting and enforces the
//!   per-frame update -> collect -> render order

mod clock;
mod pipeline;

pub use clock::{FrameClock, MAX_FRAME_TIME};
pub use pipeline::{FramePipeline, FrameStats, Layers};
