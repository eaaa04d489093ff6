//! Item bounds captured from the two mounted grids.
//!
//! Both maps are keyed by the caller's item key. The next-grid side is
//! rebuilt from scratch for every transition: [`begin_transition`] clears it
//! before the next grid can report a single placement.
//!
//! [`begin_transition`]: ItemBoundsRegistry::begin_transition

use std::hash::Hash;

use pinchgrid_core::collections::map::{HashMap, HashSet};
use pinchgrid_ui_graphics::Rect;

#[derive(Debug)]
pub struct ItemBoundsRegistry<K> {
    current: HashMap<K, Rect>,
    next: HashMap<K, Rect>,
    next_ready: bool,
    animating: HashSet<K>,
    animating_signal: u32,
}

impl<K: Eq + Hash + Clone> ItemBoundsRegistry<K> {
    pub fn new() -> Self {
        Self {
            current: HashMap::default(),
            next: HashMap::default(),
            next_ready: false,
            animating: HashSet::default(),
            animating_signal: 0,
        }
    }

    pub fn register_current(&mut self, key: K, bounds: Rect) {
        self.current.insert(key, bounds);
    }

    pub fn unregister_current(&mut self, key: &K) {
        self.current.remove(key);
    }

    pub fn register_next(&mut self, key: K, bounds: Rect) {
        self.next.insert(key, bounds);
    }

    pub fn current_bounds(&self, key: &K) -> Option<Rect> {
        self.current.get(key).copied()
    }

    pub fn next_bounds(&self, key: &K) -> Option<Rect> {
        self.next.get(key).copied()
    }

    pub fn current_len(&self) -> usize {
        self.current.len()
    }

    pub fn next_len(&self) -> usize {
        self.next.len()
    }

    /// Whether the next grid has had a full frame to report its placements.
    pub fn is_next_ready(&self) -> bool {
        self.next_ready
    }

    pub fn mark_next_ready(&mut self) {
        self.next_ready = true;
    }

    pub fn is_animating(&self, key: &K) -> bool {
        self.animating.contains(key)
    }

    /// Records that `key` started morphing in the current grid. Returns
    /// `true` (and bumps the signal) only the first time per transition.
    pub fn mark_animating(&mut self, key: &K) -> bool {
        if self.animating.contains(key) {
            return false;
        }
        self.animating.insert(key.clone());
        self.animating_signal = self.animating_signal.wrapping_add(1).max(1);
        true
    }

    /// Non-zero once any current-grid item started morphing in this transition.
    pub fn animating_signal(&self) -> u32 {
        self.animating_signal
    }

    /// Drops everything the previous transition collected for the next grid.
    pub fn begin_transition(&mut self) {
        self.next.clear();
        self.reset_animating();
        self.next_ready = false;
    }

    /// Leaves the transition. The current map survives unless `committed`,
    /// in which case the new current grid repopulates it on placement.
    pub fn end_transition(&mut self, committed: bool) {
        self.next.clear();
        if committed {
            self.current.clear();
        }
        self.reset_animating();
        self.next_ready = false;
    }

    pub fn clear(&mut self) {
        self.current.clear();
        self.next.clear();
        self.reset_animating();
        self.next_ready = false;
    }

    fn reset_animating(&mut self) {
        self.animating.clear();
        self.animating_signal = 0;
    }
}

impl<K: Eq + Hash + Clone> Default for ItemBoundsRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
