//! Grid configurations and the selector that walks between them.

use crate::config::PinchZoomError;
use crate::zoom::ZoomDirection;

/// How a lazy grid splits its cross axis into cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GridCells {
    /// Exactly `count` cells per line.
    Fixed(usize),
    /// As many cells as fit with at least `min_size` each.
    Adaptive { min_size: f32 },
    /// Cells of exactly `size`, as many as fit.
    FixedSize { size: f32 },
}

/// Ordered cell levels plus the index of the active one.
///
/// Levels are identified by position, so two equal configurations in the
/// list are still distinct levels. Zooming in moves toward the end of the
/// list.
#[derive(Clone, Debug, PartialEq)]
pub struct CellLevels {
    cells: Vec<GridCells>,
    current: usize,
}

impl CellLevels {
    pub fn new(cells: Vec<GridCells>, default_index: usize) -> Result<Self, PinchZoomError> {
        if cells.is_empty() {
            return Err(PinchZoomError::EmptyCellsList);
        }
        if default_index >= cells.len() {
            return Err(PinchZoomError::DefaultIndexOutOfRange {
                index: default_index,
                len: cells.len(),
            });
        }
        Ok(Self {
            cells,
            current: default_index,
        })
    }

    pub fn cells(&self) -> &[GridCells] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> GridCells {
        self.cells[self.current]
    }

    pub fn get(&self, index: usize) -> Option<GridCells> {
        self.cells.get(index).copied()
    }

    /// Level one step away from the current one, if the list has it.
    pub fn neighbor(&self, direction: ZoomDirection) -> Option<usize> {
        match direction {
            ZoomDirection::In => {
                let next = self.current + 1;
                (next < self.cells.len()).then_some(next)
            }
            ZoomDirection::Out => self.current.checked_sub(1),
        }
    }

    /// Direction of travel to `index`, or `None` when `index` is current or
    /// out of range.
    pub fn direction_to(&self, index: usize) -> Option<ZoomDirection> {
        if index == self.current || index >= self.cells.len() {
            return None;
        }
        Some(if index > self.current {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        })
    }

    /// Makes `index` current. Returns `false` and changes nothing when the
    /// index is already current or out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if self.direction_to(index).is_none() {
            return false;
        }
        self.current = index;
        true
    }
}

#[cfg(test)]
#[path = "tests/cells_tests.rs"]
mod tests;
