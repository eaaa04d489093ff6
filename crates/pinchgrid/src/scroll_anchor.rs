//! Carries the scroll position from one grid instance to the other.

use std::rc::Rc;

use pinchgrid_core::{FrameCallbackRegistration, FrameClock};
use pinchgrid_ui_graphics::Point;

use crate::grid::LazyGridHandle;

/// Scroll position expressed as the item to put first and how far into it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridScrollAnchor {
    pub first_visible_item_index: usize,
    /// Pixels scrolled into the first item. Negative values push it down
    /// (or right) from the viewport start.
    pub first_item_scroll_offset: i32,
}

/// Reads the anchor from `grid`.
///
/// With a centroid over a visible item, that item becomes the anchor and
/// keeps its on-screen position; otherwise the grid's own first visible
/// item is used.
pub fn capture_anchor(grid: &dyn LazyGridHandle, centroid: Option<Point>) -> GridScrollAnchor {
    if let Some(centroid) = centroid {
        let layout = grid.layout_info();
        let hit = layout
            .visible_items_info
            .iter()
            .find(|item| item.bounds().contains_point(centroid));
        if let Some(item) = hit {
            let offset = -item.main_axis_offset(layout.orientation);
            return GridScrollAnchor {
                first_visible_item_index: item.index,
                first_item_scroll_offset: offset.round() as i32,
            };
        }
    }
    GridScrollAnchor {
        first_visible_item_index: grid.first_visible_item_index(),
        first_item_scroll_offset: grid.first_visible_item_scroll_offset(),
    }
}

/// Jumps `grid` to `anchor` on the next frame, then runs `on_applied`.
///
/// A grid that mounted this frame has not laid out yet, so the jump is
/// always deferred. Dropping the registration abandons both steps.
pub fn apply_anchor_next_frame(
    clock: &FrameClock,
    grid: Rc<dyn LazyGridHandle>,
    anchor: GridScrollAnchor,
    on_applied: impl FnOnce() + 'static,
) -> FrameCallbackRegistration {
    clock.with_frame_nanos(move |_| {
        log::trace!(
            "applying scroll anchor {} +{}",
            anchor.first_visible_item_index,
            anchor.first_item_scroll_offset
        );
        grid.scroll_to_item(anchor.first_visible_item_index, anchor.first_item_scroll_offset);
        on_applied();
    })
}

#[cfg(test)]
#[path = "tests/scroll_anchor_tests.rs"]
mod tests;
