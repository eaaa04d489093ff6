//! Frame runtime for the pinch-zoom grid.
//!
//! Everything here runs on a single UI thread. Work is expressed as one-shot
//! frame continuations that the host resumes by draining the runtime once per
//! frame.

pub mod collections;
mod frame_clock;
mod platform;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{DefaultScheduler, RuntimeScheduler};
pub use runtime::{Runtime, RuntimeHandle};

pub type FrameCallbackId = u64;
