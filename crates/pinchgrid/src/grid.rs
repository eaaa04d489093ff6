//! Contract with the host's lazy grid.
//!
//! Item offsets and the pinch centroid must share one coordinate space, the
//! grid container's.

use pinchgrid_ui_graphics::{Point, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A laid-out, visible grid item.
#[derive(Clone, Debug, PartialEq)]
pub struct LazyGridItemInfo {
    pub index: usize,
    /// Offset of the item relative to the grid viewport.
    pub offset: Point,
    pub size: Size,
}

impl LazyGridItemInfo {
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.offset, self.size)
    }

    /// Offset along the scrolling axis.
    pub fn main_axis_offset(&self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::Vertical => self.offset.y,
            Orientation::Horizontal => self.offset.x,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LazyGridLayoutInfo {
    pub visible_items_info: Vec<LazyGridItemInfo>,
    pub orientation: Orientation,
}

impl Default for LazyGridLayoutInfo {
    fn default() -> Self {
        Self {
            visible_items_info: Vec::new(),
            orientation: Orientation::Vertical,
        }
    }
}

/// The scroll/layout surface of one lazy grid instance.
///
/// Implemented by the host; the zoom state only reads the layout and issues
/// jump scrolls.
pub trait LazyGridHandle {
    fn first_visible_item_index(&self) -> usize;

    /// Scroll offset, in pixels, into the first visible item.
    fn first_visible_item_scroll_offset(&self) -> i32;

    fn layout_info(&self) -> LazyGridLayoutInfo;

    /// Jumps (without animating) so `index` is the first visible item,
    /// scrolled `scroll_offset` pixels into it.
    fn scroll_to_item(&self, index: usize, scroll_offset: i32);
}
