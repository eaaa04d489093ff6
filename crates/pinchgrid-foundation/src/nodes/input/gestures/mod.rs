pub mod pinch;
pub mod transform;

pub use pinch::{PinchGestureConfig, PinchGestureDetector, PinchGestureListener};
