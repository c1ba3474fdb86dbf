//! Glint Decals - procedural tile decoration
//!
//! Every routine draws a small, fixed number of primitives into one grid cell.
//! Counts, positions and sizes all come from `cell_random(gx, gy, salt)`, so a
//! cell looks the same every frame without storing anything per cell.

mod built;
mod cell;
mod mineral;
mod organic;
mod painter;

pub use built::{brick, rivets};
pub use cell::{DecalCell, DecalFn};
pub use mineral::{cracks, ember_cracks, ice_crystals, marble_veins, sand_grain};
pub use organic::{coral, grass, moss, wood_grain};
pub use painter::{decal_for_world, DecalPainter};

/// Every routine with its name, for contact sheets and exhaustive tests
pub const ALL_DECALS: [(&str, DecalFn); 11] = [
    ("grass", grass),
    ("cracks", cracks),
    ("sand_grain", sand_grain),
    ("brick", brick),
    ("wood_grain", wood_grain),
    ("ice_crystals", ice_crystals),
    ("moss", moss),
    ("rivets", rivets),
    ("coral", coral),
    ("ember_cracks", ember_cracks),
    ("marble_veins", marble_veins),
];
