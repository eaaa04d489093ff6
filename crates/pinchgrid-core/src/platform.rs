//! Platform abstraction traits for the frame runtime.
//!
//! The host owns the real frame loop; the runtime only asks it for frames.

/// Schedules work for the runtime.
///
/// Implementations are responsible for triggering a new frame on the host,
/// which in turn calls
/// [`RuntimeHandle::drain_frame_callbacks`](crate::RuntimeHandle::drain_frame_callbacks).
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Scheduler that ignores frame requests. Useful for hosts that render
/// continuously and for tests that drive frames by hand.
#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}
