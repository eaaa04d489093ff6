use pinchgrid_animation::{AnimationType, SpringSpec};

/// Tuning for a [`PinchZoomGridState`](crate::PinchZoomGridState).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchZoomConfig {
    /// Curve used to settle the zoom factor after release and for
    /// programmatic level changes.
    pub animation: AnimationType,
    /// Progress past which a released pinch commits to the next level.
    pub settle_threshold: f32,
    /// Scale applied at full progress when there is no level to zoom to.
    pub over_zoom_scale: f32,
}

impl PinchZoomConfig {
    /// Slightly bouncy, slow spring.
    pub fn default_spring() -> SpringSpec {
        SpringSpec::new(
            SpringSpec::DAMPING_RATIO_LOW_BOUNCY + 0.15,
            SpringSpec::STIFFNESS_LOW + 50.0,
        )
    }

    pub fn with_animation(mut self, animation: AnimationType) -> Self {
        self.animation = animation;
        self
    }
}

impl Default for PinchZoomConfig {
    fn default() -> Self {
        Self {
            animation: AnimationType::Spring(Self::default_spring()),
            settle_threshold: 0.5,
            over_zoom_scale: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PinchZoomError {
    EmptyCellsList,
    DefaultIndexOutOfRange { index: usize, len: usize },
}

impl std::fmt::Display for PinchZoomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PinchZoomError::EmptyCellsList => write!(f, "cells list is empty"),
            PinchZoomError::DefaultIndexOutOfRange { index, len } => {
                write!(f, "default cells index {index} out of range for {len} levels")
            }
        }
    }
}

impl std::error::Error for PinchZoomError {}
