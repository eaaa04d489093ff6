//! Pointer input types and the pinch gesture detector.

pub mod gesture_constants;
pub mod nodes;

pub use nodes::input::gestures::{PinchGestureConfig, PinchGestureDetector, PinchGestureListener};
pub use nodes::input::types::{PointerEvent, PointerId, PointerInputChange};
pub use pinchgrid_ui_graphics::{Point, Size};
