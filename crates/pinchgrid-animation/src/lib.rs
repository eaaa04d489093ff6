//! Animation primitives for the pinch-zoom grid.

mod animation;

pub use animation::*;
