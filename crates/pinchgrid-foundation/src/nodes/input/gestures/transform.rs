//! Multi-touch transform math over a [`PointerEvent`].
//!
//! Only pointers that are pressed in both the previous and the current event
//! take part, so a finger landing or lifting never produces a zoom spike.

use smallvec::SmallVec;

use crate::nodes::input::types::PointerEvent;
use pinchgrid_ui_graphics::Point;

impl PointerEvent {
    fn tracked_positions(&self, use_current: bool) -> SmallVec<[Point; 4]> {
        self.changes
            .iter()
            .filter(|change| change.pressed && change.previous_pressed)
            .map(|change| {
                if use_current {
                    change.position
                } else {
                    change.previous_position
                }
            })
            .collect()
    }

    /// Mean position of the tracked pointers, or `None` when no pointer is
    /// held across both events.
    pub fn calculate_centroid(&self, use_current: bool) -> Option<Point> {
        let positions = self.tracked_positions(use_current);
        if positions.is_empty() {
            return None;
        }
        let sum = positions
            .iter()
            .fold(Point::ZERO, |acc, position| acc + *position);
        Some(sum * (1.0 / positions.len() as f32))
    }

    /// Mean distance of the tracked pointers from their centroid.
    pub fn calculate_centroid_size(&self, use_current: bool) -> f32 {
        let positions = self.tracked_positions(use_current);
        if positions.is_empty() {
            return 0.0;
        }
        let count = positions.len() as f32;
        let centroid = positions
            .iter()
            .fold(Point::ZERO, |acc, position| acc + *position)
            * (1.0 / count);
        let total: f32 = positions
            .iter()
            .map(|position| (*position - centroid).distance())
            .sum();
        total / count
    }

    /// Ratio of the current centroid size to the previous one.
    ///
    /// Returns `1.0` when either size is zero, which covers single-pointer
    /// events.
    pub fn calculate_zoom(&self) -> f32 {
        let current = self.calculate_centroid_size(true);
        if current == 0.0 {
            return 1.0;
        }
        let previous = self.calculate_centroid_size(false);
        if previous == 0.0 {
            return 1.0;
        }
        current / previous
    }
}
