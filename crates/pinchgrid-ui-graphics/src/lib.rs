//! Pure math/data for item geometry and layer transforms.
//!
//! Coordinates are logical pixels in root (window) space.

mod geometry;
mod layer;

pub use geometry::*;
pub use layer::*;
