use std::cell::{Cell, RefCell};
use std::sync::Arc;

use pinchgrid_core::{DefaultScheduler, Runtime};
use pinchgrid_ui_graphics::{Point, Size};

use crate::grid::{LazyGridHandle, LazyGridItemInfo, LazyGridLayoutInfo, Orientation};

pub const FRAME_NANOS: u64 = 16_000_000;

/// Grid whose layout is set by the test and which records jump scrolls.
pub struct FakeGrid {
    pub first_index: Cell<usize>,
    pub first_offset: Cell<i32>,
    pub items: RefCell<Vec<LazyGridItemInfo>>,
    pub orientation: Cell<Orientation>,
    pub scrolls: RefCell<Vec<(usize, i32)>>,
}

impl FakeGrid {
    pub fn new(first_index: usize, first_offset: i32) -> Self {
        Self {
            first_index: Cell::new(first_index),
            first_offset: Cell::new(first_offset),
            items: RefCell::new(Vec::new()),
            orientation: Cell::new(Orientation::Vertical),
            scrolls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_item(self, index: usize, x: f32, y: f32, size: f32) -> Self {
        self.items.borrow_mut().push(LazyGridItemInfo {
            index,
            offset: Point::new(x, y),
            size: Size::new(size, size),
        });
        self
    }
}

impl LazyGridHandle for FakeGrid {
    fn first_visible_item_index(&self) -> usize {
        self.first_index.get()
    }

    fn first_visible_item_scroll_offset(&self) -> i32 {
        self.first_offset.get()
    }

    fn layout_info(&self) -> LazyGridLayoutInfo {
        LazyGridLayoutInfo {
            visible_items_info: self.items.borrow().clone(),
            orientation: self.orientation.get(),
        }
    }

    fn scroll_to_item(&self, index: usize, scroll_offset: i32) {
        self.scrolls.borrow_mut().push((index, scroll_offset));
    }
}

/// Runtime with a frame counter so every drained frame gets a later time.
pub struct TestFrames {
    pub runtime: Runtime,
    frame: Cell<u64>,
}

impl TestFrames {
    pub fn new() -> Self {
        Self {
            runtime: Runtime::new(Arc::new(DefaultScheduler)),
            frame: Cell::new(0),
        }
    }

    pub fn frame(&self) {
        let frame = self.frame.get() + 1;
        self.frame.set(frame);
        self.runtime.handle().drain_frame_callbacks(frame * FRAME_NANOS);
    }

    pub fn frames(&self, count: usize) {
        for _ in 0..count {
            self.frame();
        }
    }

    /// Drains frames until `done` holds. Panics after a generous bound.
    pub fn until(&self, mut done: impl FnMut() -> bool) {
        for _ in 0..500 {
            if done() {
                return;
            }
            self.frame();
        }
        panic!("condition not reached within 500 frames");
    }
}
