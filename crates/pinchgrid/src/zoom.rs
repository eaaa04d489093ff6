//! Zoom factor domain.
//!
//! The factor lives in `[ZOOM_OUT_FINAL_VALUE, ZOOM_IN_FINAL_VALUE]` with
//! `NEUTRAL_ZOOM` in the middle. Each half maps linearly onto a `[0, 1]`
//! transition progress.

pub const NEUTRAL_ZOOM: f32 = 1.0;
pub const ZOOM_IN_FINAL_VALUE: f32 = 1.5;
pub const ZOOM_OUT_FINAL_VALUE: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZoomDirection {
    /// Fingers spreading: fewer, larger cells (higher level index).
    In,
    /// Fingers pinching: more, smaller cells (lower level index).
    Out,
}

impl ZoomDirection {
    /// Direction implied by a zoom factor. Neutral counts as zooming in.
    pub fn of_zoom(zoom: f32) -> Self {
        if zoom < NEUTRAL_ZOOM {
            ZoomDirection::Out
        } else {
            ZoomDirection::In
        }
    }

    /// Zoom factor at which a transition in this direction is complete.
    pub fn final_zoom(self) -> f32 {
        match self {
            ZoomDirection::In => ZOOM_IN_FINAL_VALUE,
            ZoomDirection::Out => ZOOM_OUT_FINAL_VALUE,
        }
    }
}

pub fn clamp_zoom(zoom: f32) -> f32 {
    zoom.clamp(ZOOM_OUT_FINAL_VALUE, ZOOM_IN_FINAL_VALUE)
}

/// Normalized distance of `zoom` from neutral toward the final value of its half.
pub fn progress_for_zoom(zoom: f32) -> f32 {
    let progress = if zoom < NEUTRAL_ZOOM {
        (NEUTRAL_ZOOM - zoom) / (NEUTRAL_ZOOM - ZOOM_OUT_FINAL_VALUE)
    } else {
        (zoom - NEUTRAL_ZOOM) / (ZOOM_IN_FINAL_VALUE - NEUTRAL_ZOOM)
    };
    progress.clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "tests/zoom_tests.rs"]
mod tests;
