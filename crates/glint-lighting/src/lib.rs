//! Glint Lighting - per-frame dynamic light aggregation
//!
//! Every frame the host clears the aggregator, feeds it light descriptors
//! derived from live entity state, then renders the result as additive radial
//! gradients (or hands packed instances to an optional shader):
//!
//! ```text
//! clear() -> add_*() ... -> render()
//! ```
//!
//! Skipping `clear()` or rendering before collecting yields stale or
//! duplicated lights. [`LightAggregator::collect_light_sources`] performs the
//! clear and the adds in one call.

mod collect;
mod gpu;
mod light;
mod sources;

pub use collect::{
    has_torch, torch_chance, BombSnapshot, BossSnapshot, CellFlags, ExplosionSnapshot,
    FrameSnapshot, GridSnapshot, LightEmitter, PowerUpSnapshot, TORCH_SALT,
};
pub use gpu::{LightInstance, LightingBackend, LightingRenderer, LightingShader};
pub use light::{LightAggregator, LightSource, INTENSITY_EPSILON, MAX_LIGHTS};
pub use sources::{PowerUpKind, EXPLOSION_VISIBILITY};
