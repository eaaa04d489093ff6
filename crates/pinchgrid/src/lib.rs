//! Pinch-to-zoom grid density switching.
//!
//! A [`PinchZoomGridState`] sits between a pinch gesture and a lazy grid. While
//! the user pinches, it mounts a second grid at the neighbouring
//! [`GridCells`] level and morphs every bound item from its slot in the
//! current grid to its slot in the next one. On release the transition either
//! commits (the next level becomes current and the scroll position is carried
//! over) or springs back.
//!
//! The host provides the grid through [`LazyGridHandle`], forwards pointer
//! events to a [`PinchGestureDetector`] with the state as listener, mounts the
//! grids returned by [`PinchZoomGridState::grid_scopes`], and applies the
//! [`ItemLayer`] of each bound item when drawing.

mod cells;
mod compositor;
mod config;
mod grid;
mod registry;
mod scroll_anchor;
mod state;
mod transitions;
mod zoom;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

pub use cells::{CellLevels, GridCells};
pub use compositor::{GridRole, GridScope, ItemLayer, PinchItem};
pub use config::{PinchZoomConfig, PinchZoomError};
pub use grid::{LazyGridHandle, LazyGridItemInfo, LazyGridLayoutInfo, Orientation};
pub use registry::ItemBoundsRegistry;
pub use scroll_anchor::{apply_anchor_next_frame, capture_anchor, GridScrollAnchor};
pub use state::{PinchZoomGridState, ZoomState};
pub use transitions::ItemTransitions;
pub use zoom::{
    clamp_zoom, progress_for_zoom, ZoomDirection, NEUTRAL_ZOOM, ZOOM_IN_FINAL_VALUE,
    ZOOM_OUT_FINAL_VALUE,
};

pub use pinchgrid_animation::{AnimationSpec, AnimationType, Easing, SpringSpec};
pub use pinchgrid_core::{DefaultScheduler, Runtime, RuntimeHandle, RuntimeScheduler};
pub use pinchgrid_foundation::{
    PinchGestureConfig, PinchGestureDetector, PinchGestureListener, PointerEvent,
    PointerInputChange,
};
pub use pinchgrid_ui_graphics::{GraphicsLayer, Point, Rect, Size, TransformOrigin};
