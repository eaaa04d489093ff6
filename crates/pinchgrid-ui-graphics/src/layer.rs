//! Layer transform data handed to the compositor.

/// Pivot for scale, as fractions of the layer size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformOrigin {
    pub pivot_fraction_x: f32,
    pub pivot_fraction_y: f32,
}

impl TransformOrigin {
    pub const fn new(pivot_fraction_x: f32, pivot_fraction_y: f32) -> Self {
        Self {
            pivot_fraction_x,
            pivot_fraction_y,
        }
    }

    pub const CENTER: TransformOrigin = TransformOrigin::new(0.5, 0.5);
    pub const TOP_LEFT: TransformOrigin = TransformOrigin::new(0.0, 0.0);
}

impl Default for TransformOrigin {
    fn default() -> Self {
        Self::CENTER
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphicsLayer {
    pub alpha: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub translation_x: f32,
    pub translation_y: f32,
    pub transform_origin: TransformOrigin,
}

impl GraphicsLayer {
    pub const IDENTITY: GraphicsLayer = GraphicsLayer {
        alpha: 1.0,
        scale_x: 1.0,
        scale_y: 1.0,
        translation_x: 0.0,
        translation_y: 0.0,
        transform_origin: TransformOrigin::CENTER,
    };

    pub fn uniform_scale(scale: f32) -> Self {
        Self {
            scale_x: scale,
            scale_y: scale,
            ..Self::IDENTITY
        }
    }

    pub fn is_identity(&self) -> bool {
        self.alpha == 1.0
            && self.scale_x == 1.0
            && self.scale_y == 1.0
            && self.translation_x == 0.0
            && self.translation_y == 0.0
    }
}

impl Default for GraphicsLayer {
    fn default() -> Self {
        Self::IDENTITY
    }
}
