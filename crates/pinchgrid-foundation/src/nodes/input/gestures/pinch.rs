//! Two-finger pinch recogniser.
//!
//! The detector never consumes anything until the accumulated pinch passes
//! the slop, so taps and scrolls on children behave as if it were absent.

use crate::gesture_constants::{PINCH_SLOP_DIVISOR, TOUCH_SLOP};
use crate::nodes::input::types::PointerEvent;
use pinchgrid_ui_graphics::Point;

/// Receives the zoom stream produced by [`PinchGestureDetector`].
pub trait PinchGestureListener {
    /// The pinch passed the slop. `zoom` is the ratio accumulated so far.
    fn on_zoom_start(&mut self, centroid: Point, zoom: f32);

    /// Zoom ratio between this event and the previous one.
    fn on_zoom(&mut self, zoom_change: f32);

    /// All pointers lifted or the gesture was cancelled. Only sent after
    /// [`on_zoom_start`](Self::on_zoom_start).
    fn on_zoom_stopped(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchGestureConfig {
    /// Platform touch slop in logical pixels.
    pub touch_slop: f32,
}

impl PinchGestureConfig {
    pub fn pinch_slop(&self) -> f32 {
        self.touch_slop / PINCH_SLOP_DIVISOR
    }
}

impl Default for PinchGestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: TOUCH_SLOP,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum PinchPhase {
    /// Waiting for the first pointer to go down.
    Idle,
    Tracking {
        zoom: f32,
        past_slop: bool,
        started: bool,
    },
}

#[derive(Debug)]
pub struct PinchGestureDetector {
    config: PinchGestureConfig,
    phase: PinchPhase,
}

impl PinchGestureDetector {
    pub fn new(config: PinchGestureConfig) -> Self {
        Self {
            config,
            phase: PinchPhase::Idle,
        }
    }

    pub fn config(&self) -> PinchGestureConfig {
        self.config
    }

    /// Whether a pinch is confirmed and currently streaming zoom changes.
    pub fn is_pinching(&self) -> bool {
        matches!(self.phase, PinchPhase::Tracking { started: true, .. })
    }

    /// Feeds one pointer event. Returns `true` when the event was consumed by
    /// the pinch.
    pub fn on_pointer_event<L: PinchGestureListener + ?Sized>(
        &mut self,
        event: &PointerEvent,
        listener: &mut L,
    ) -> bool {
        let (mut zoom, mut past_slop, mut started) = match self.phase {
            PinchPhase::Idle => {
                let first_down = !event.changes.is_empty()
                    && event
                        .changes
                        .iter()
                        .all(|change| change.changed_to_down_ignore_consumed());
                if first_down {
                    // Down is observed, never consumed, so children can still claim it.
                    self.phase = PinchPhase::Tracking {
                        zoom: 1.0,
                        past_slop: false,
                        started: false,
                    };
                }
                return false;
            }
            PinchPhase::Tracking {
                zoom,
                past_slop,
                started,
            } => (zoom, past_slop, started),
        };

        let canceled = event.is_consumed();
        let mut consumed = false;
        if !canceled {
            let zoom_change = event.calculate_zoom();

            if !past_slop {
                zoom *= zoom_change;
                let centroid_size = event.calculate_centroid_size(false);
                let zoom_motion = (1.0 - zoom).abs() * centroid_size;
                if zoom_motion > self.config.pinch_slop() {
                    log::trace!("pinch passed slop: zoom={zoom} centroid_size={centroid_size}");
                    past_slop = true;
                }
            }

            if past_slop {
                if zoom_change != 1.0 {
                    if !started {
                        let centroid = event.calculate_centroid(false).unwrap_or(Point::ZERO);
                        log::debug!("pinch start at ({}, {}) zoom={zoom}", centroid.x, centroid.y);
                        listener.on_zoom_start(centroid, zoom);
                        started = true;
                    }
                    listener.on_zoom(zoom_change);
                }
                for change in &event.changes {
                    if change.position_changed() {
                        change.consume();
                        consumed = true;
                    }
                }
            }
        }

        if canceled || !event.any_pressed() {
            self.finish(started, listener);
        } else {
            self.phase = PinchPhase::Tracking {
                zoom,
                past_slop,
                started,
            };
        }
        consumed
    }

    /// Aborts the current gesture, e.g. on a system interruption.
    pub fn cancel<L: PinchGestureListener + ?Sized>(&mut self, listener: &mut L) {
        if let PinchPhase::Tracking { started, .. } = self.phase {
            self.finish(started, listener);
        }
    }

    fn finish<L: PinchGestureListener + ?Sized>(&mut self, started: bool, listener: &mut L) {
        self.phase = PinchPhase::Idle;
        if started {
            log::debug!("pinch stopped");
            listener.on_zoom_stopped();
        }
    }
}

impl Default for PinchGestureDetector {
    fn default() -> Self {
        Self::new(PinchGestureConfig::default())
    }
}

#[cfg(test)]
#[path = "../../../tests/pinch_tests.rs"]
mod tests;
