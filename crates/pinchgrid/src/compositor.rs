//! Per-item layers for the current and next grid.
//!
//! The state snapshots a [`TransitionFrame`] and the functions here turn it,
//! plus the bounds registry, into what each item draws this frame.

use std::hash::Hash;

use pinchgrid_ui_graphics::{GraphicsLayer, Rect, Size, TransformOrigin};

use crate::cells::GridCells;
use crate::registry::ItemBoundsRegistry;
use crate::scroll_anchor::GridScrollAnchor;
use crate::state::PinchZoomGridState;
use crate::transitions::ItemTransitions;
use crate::zoom::ZoomDirection;

/// Which of the two overlaid grids a scope belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridRole {
    /// The grid at the active level. Its items morph toward the next grid.
    Current,
    /// The grid at the target level, mounted behind the current one while a
    /// transition has a target.
    Next,
}

/// What an item should do this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemLayer {
    /// Whether the item's content is drawn at all.
    pub draw: bool,
    pub layer: GraphicsLayer,
}

impl ItemLayer {
    pub const VISIBLE: ItemLayer = ItemLayer {
        draw: true,
        layer: GraphicsLayer::IDENTITY,
    };

    pub const HIDDEN: ItemLayer = ItemLayer {
        draw: false,
        layer: GraphicsLayer::IDENTITY,
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TransitionFrame {
    pub is_zooming: bool,
    pub has_target: bool,
    pub progress: f32,
    pub direction: ZoomDirection,
    /// False while the committed scroll position is still pending.
    pub current_items_visible: bool,
    pub force_show_next: bool,
}

/// Layer for an item of the current grid. The boolean is `true` when this
/// call marked the key as animating for the first time.
pub(crate) fn current_item_layer<K: Eq + Hash + Clone>(
    frame: &TransitionFrame,
    registry: &mut ItemBoundsRegistry<K>,
    key: &K,
    transitions: ItemTransitions,
    size: Size,
) -> (ItemLayer, bool) {
    if !frame.current_items_visible {
        return (ItemLayer::HIDDEN, false);
    }
    if !frame.is_zooming || !frame.has_target {
        return (ItemLayer::VISIBLE, false);
    }

    let progress = frame.progress;
    let mut layer = GraphicsLayer::IDENTITY;
    let Some(next_bounds) = registry.next_bounds(key) else {
        if registry.is_next_ready() {
            // Absent from the next level.
            layer.alpha = 1.0 - progress;
        }
        return (ItemLayer { draw: true, layer }, false);
    };

    let current_bounds = registry.current_bounds(key);
    let should_scale = transitions.has(ItemTransitions::SCALE);
    let should_translate = transitions.has(ItemTransitions::TRANSLATE);
    let mut newly_animating = false;
    if current_bounds.is_some() && (should_scale || should_translate) {
        newly_animating = registry.mark_animating(key);
    }

    if should_scale {
        layer.transform_origin = TransformOrigin::TOP_LEFT;
        if size.width > 0.0 {
            layer.scale_x = lerp_scale(next_bounds.width / size.width, progress);
        }
        if size.height > 0.0 {
            layer.scale_y = lerp_scale(next_bounds.height / size.height, progress);
        }
    }

    if should_translate {
        if let Some(current_bounds) = current_bounds {
            let (dx, dy) = offset_between(current_bounds, next_bounds);
            layer.translation_x = dx * progress;
            layer.translation_y = dy * progress;
        }
    }

    (ItemLayer { draw: true, layer }, newly_animating)
}

/// Layer for an item of the next grid.
pub(crate) fn next_item_layer<K: Eq + Hash + Clone>(
    frame: &TransitionFrame,
    registry: &ItemBoundsRegistry<K>,
    key: &K,
) -> ItemLayer {
    let reveal = frame.is_zooming
        && registry.animating_signal() > 0
        && !registry.is_animating(key);
    let mut layer = GraphicsLayer::IDENTITY;
    if frame.is_zooming {
        layer.alpha = frame.progress;
    }
    ItemLayer {
        draw: frame.force_show_next || reveal,
        layer,
    }
}

/// Scale for the grid container when there is no level to zoom to.
pub(crate) fn over_zoom_layer(frame: &TransitionFrame, over_zoom_scale: f32) -> GraphicsLayer {
    if !frame.is_zooming || frame.has_target {
        return GraphicsLayer::IDENTITY;
    }
    let delta = frame.progress * over_zoom_scale;
    let scale = match frame.direction {
        ZoomDirection::In => 1.0 + delta,
        ZoomDirection::Out => 1.0 - delta,
    };
    GraphicsLayer::uniform_scale(scale)
}

fn lerp_scale(target: f32, progress: f32) -> f32 {
    1.0 + (target - 1.0) * progress
}

fn offset_between(from: Rect, to: Rect) -> (f32, f32) {
    (to.x - from.x, to.y - from.y)
}

/// One grid to mount this frame.
///
/// The host builds a lazy grid with [`cells`](Self::cells) for every scope
/// returned by [`PinchZoomGridState::grid_scopes`] and binds each keyed item
/// through [`pinch_item`](Self::pinch_item).
pub struct GridScope<K: Eq + Hash + Clone + 'static> {
    state: PinchZoomGridState<K>,
    role: GridRole,
    cells: GridCells,
    initial_anchor: Option<GridScrollAnchor>,
}

impl<K: Eq + Hash + Clone + 'static> GridScope<K> {
    pub(crate) fn new(
        state: PinchZoomGridState<K>,
        role: GridRole,
        cells: GridCells,
        initial_anchor: Option<GridScrollAnchor>,
    ) -> Self {
        Self {
            state,
            role,
            cells,
            initial_anchor,
        }
    }

    pub fn role(&self) -> GridRole {
        self.role
    }

    pub fn cells(&self) -> GridCells {
        self.cells
    }

    /// Scroll position the next grid must start at. `None` for the current
    /// grid, which keeps the host's own scroll state.
    pub fn initial_anchor(&self) -> Option<GridScrollAnchor> {
        self.initial_anchor
    }

    /// Binds an item. `key` must be the key the grid uses for the item.
    pub fn pinch_item(&self, key: K, transitions: ItemTransitions) -> PinchItem<K> {
        PinchItem {
            state: self.state.clone(),
            role: self.role,
            key,
            transitions,
        }
    }
}

/// A keyed item bound into one of the grids.
pub struct PinchItem<K: Eq + Hash + Clone + 'static> {
    state: PinchZoomGridState<K>,
    role: GridRole,
    key: K,
    transitions: ItemTransitions,
}

impl<K: Eq + Hash + Clone + 'static> PinchItem<K> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn role(&self) -> GridRole {
        self.role
    }

    /// Reports the item's bounds after layout.
    pub fn on_placed(&self, bounds: Rect) {
        self.state
            .with_registry(|registry| match self.role {
                GridRole::Current => registry.register_current(self.key.clone(), bounds),
                GridRole::Next => registry.register_next(self.key.clone(), bounds),
            });
    }

    /// The item left the composition.
    pub fn on_detach(&self) {
        if self.role == GridRole::Current {
            self.state
                .with_registry(|registry| registry.unregister_current(&self.key));
        }
    }

    /// Layer to draw the item with this frame. `size` is the item's own
    /// laid-out size.
    pub fn layer(&self, size: Size) -> ItemLayer {
        match self.role {
            GridRole::Current => self.state.current_item_layer(&self.key, self.transitions, size),
            GridRole::Next => self.state.next_item_layer(&self.key),
        }
    }
}

#[cfg(test)]
#[path = "tests/compositor_tests.rs"]
mod tests;
