//! Glint Particles - fixed-capacity per-world particle layers
//!
//! Two layers share one implementation:
//! - ambient (60 slots): atmospheric particles drawn behind the terrain
//! - weather (80 slots): precipitation drawn over the terrain, culled once it
//!   leaves the play area
//!
//! Each layer keeps its particles in a fixed array with swap-remove kill, so
//! nothing allocates after construction. What spawns and how it is drawn comes
//! from a per-world table; unknown worlds select an empty layer.

mod ambient;
mod particle;
mod policy;
mod system;
mod weather;

pub use ambient::{AMBIENT_CAPACITY, AMBIENT_FX};
pub use particle::{Particle, ParticlePool};
pub use policy::{spawn_seed, SpawnPolicy, SpawnSite, Span};
pub use system::{
    AmbientParticles, DrawFn, FxTable, GlowFn, ParticleSystem, WeatherParticles, WorldFx,
    CULL_MARGIN, PHASE_STRIDE,
};
pub use weather::{WEATHER_CAPACITY, WEATHER_FX};
