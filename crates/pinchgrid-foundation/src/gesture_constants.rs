//! Shared gesture constants for consistent touch/pointer handling.
//!
//! Values are in logical pixels. For very high-density touch screens,
//! consider scaling by the device's DPI factor.

/// Distance a pointer may travel before a gesture is considered intentional.
///
/// Matches common platform conventions (Android uses ~8dp for
/// `ViewConfiguration.TOUCH_SLOP`).
pub const TOUCH_SLOP: f32 = 8.0;

/// Divisor applied to [`TOUCH_SLOP`] for pinch detection.
///
/// Pinches are measured as `|1 - zoom| * centroid_size`, which grows much
/// slower than a drag distance, so the pinch threshold is a quarter of the
/// drag slop.
pub const PINCH_SLOP_DIVISOR: f32 = 4.0;
