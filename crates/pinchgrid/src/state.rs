//! Zoom transition state machine.
//!
//! `Idle -> Zooming -> Settling -> Idle`, with programmatic transitions
//! entering `Settling` directly after one frame. Every deferred step (the
//! bounds-ready rebase, the settle animation, the scroll swap) is owned by the
//! state and cancelled when a newer transition or [`dispose`] supersedes it.
//!
//! [`dispose`]: PinchZoomGridState::dispose

use std::cell::RefCell;
use std::hash::Hash;
use std::rc::{Rc, Weak};

use pinchgrid_animation::{animate, AnimationHandle, AnimationType};
use pinchgrid_core::{FrameCallbackRegistration, RuntimeHandle};
use pinchgrid_foundation::PinchGestureListener;
use pinchgrid_ui_graphics::{GraphicsLayer, Point, Size};

use crate::cells::{CellLevels, GridCells};
use crate::compositor::{self, GridRole, GridScope, ItemLayer, TransitionFrame};
use crate::config::{PinchZoomConfig, PinchZoomError};
use crate::grid::LazyGridHandle;
use crate::registry::ItemBoundsRegistry;
use crate::scroll_anchor::{apply_anchor_next_frame, capture_anchor, GridScrollAnchor};
use crate::transitions::ItemTransitions;
use crate::zoom::{clamp_zoom, progress_for_zoom, ZoomDirection, NEUTRAL_ZOOM};

/// Observable snapshot of the zoom transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomState {
    pub zoom: f32,
    pub is_zooming: bool,
    pub direction: ZoomDirection,
    pub progress: f32,
    pub target_index: Option<usize>,
}

enum SettleTask {
    /// Programmatic transition waiting for the next grid's first frame.
    AwaitingFrame(FrameCallbackRegistration),
    Animating(AnimationHandle),
}

impl SettleTask {
    fn cancel(self) {
        match self {
            SettleTask::AwaitingFrame(registration) => registration.cancel(),
            SettleTask::Animating(handle) => handle.cancel(),
        }
    }
}

struct ZoomStateInner<K> {
    runtime: RuntimeHandle,
    grid: Rc<dyn LazyGridHandle>,
    levels: CellLevels,
    config: PinchZoomConfig,
    zoom: f32,
    is_zooming: bool,
    direction: ZoomDirection,
    next_index: Option<usize>,
    scroll_anchor: Option<GridScrollAnchor>,
    registry: ItemBoundsRegistry<K>,
    is_swapping: bool,
    /// Bumped whenever a new transition intent replaces the previous one.
    transition_id: u64,
    settle: Option<SettleTask>,
    bounds_ready: Option<FrameCallbackRegistration>,
    swap: Option<FrameCallbackRegistration>,
}

impl<K: Eq + Hash + Clone> ZoomStateInner<K> {
    fn progress(&self) -> f32 {
        progress_for_zoom(self.zoom)
    }

    fn frame(&self) -> TransitionFrame {
        TransitionFrame {
            is_zooming: self.is_zooming,
            has_target: self.next_index.is_some(),
            progress: self.progress(),
            direction: self.direction,
            current_items_visible: !self.is_swapping,
            force_show_next: self.is_swapping,
        }
    }

    fn update_direction_and_target(&mut self, zoom: f32) {
        self.direction = ZoomDirection::of_zoom(zoom);
        self.next_index = self.levels.neighbor(self.direction);
    }

    fn cancel_settle(&mut self) {
        if let Some(settle) = self.settle.take() {
            log::trace!("cancelling in-flight settle");
            settle.cancel();
        }
    }
}

/// Drives a lazy grid through pinch-to-zoom level changes.
///
/// Cheap to clone; clones share one state. `K` is the item key type shared by
/// both grids.
pub struct PinchZoomGridState<K: Eq + Hash + Clone + 'static> {
    inner: Rc<RefCell<ZoomStateInner<K>>>,
}

impl<K: Eq + Hash + Clone + 'static> Clone for PinchZoomGridState<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<K: Eq + Hash + Clone + 'static> PinchZoomGridState<K> {
    pub fn new(
        runtime: RuntimeHandle,
        grid: Rc<dyn LazyGridHandle>,
        cells_list: Vec<GridCells>,
        default_index: usize,
    ) -> Result<Self, PinchZoomError> {
        Self::with_config(runtime, grid, cells_list, default_index, PinchZoomConfig::default())
    }

    pub fn with_config(
        runtime: RuntimeHandle,
        grid: Rc<dyn LazyGridHandle>,
        cells_list: Vec<GridCells>,
        default_index: usize,
        config: PinchZoomConfig,
    ) -> Result<Self, PinchZoomError> {
        let levels = CellLevels::new(cells_list, default_index)?;
        let inner = ZoomStateInner {
            runtime,
            grid,
            levels,
            config,
            zoom: NEUTRAL_ZOOM,
            is_zooming: false,
            direction: ZoomDirection::In,
            next_index: None,
            scroll_anchor: None,
            registry: ItemBoundsRegistry::new(),
            is_swapping: false,
            transition_id: 0,
            settle: None,
            bounds_ready: None,
            swap: None,
        };
        Ok(Self {
            inner: Rc::new(RefCell::new(inner)),
        })
    }

    pub fn current_cells(&self) -> GridCells {
        self.inner.borrow().levels.current()
    }

    pub fn current_level_index(&self) -> usize {
        self.inner.borrow().levels.current_index()
    }

    pub fn cells_list(&self) -> Vec<GridCells> {
        self.inner.borrow().levels.cells().to_vec()
    }

    /// Cells of the level being transitioned to, if any.
    pub fn next_cells(&self) -> Option<GridCells> {
        let inner = self.inner.borrow();
        inner.next_index.and_then(|index| inner.levels.get(index))
    }

    pub fn next_level_index(&self) -> Option<usize> {
        self.inner.borrow().next_index
    }

    pub fn is_zooming(&self) -> bool {
        self.inner.borrow().is_zooming
    }

    pub fn zoom(&self) -> f32 {
        self.inner.borrow().zoom
    }

    pub fn progress(&self) -> f32 {
        self.inner.borrow().progress()
    }

    pub fn direction(&self) -> ZoomDirection {
        self.inner.borrow().direction
    }

    /// True between a commit and the moment the new grid's scroll position
    /// has been applied.
    pub fn is_swapping(&self) -> bool {
        self.inner.borrow().is_swapping
    }

    pub fn scroll_anchor(&self) -> Option<GridScrollAnchor> {
        self.inner.borrow().scroll_anchor
    }

    pub fn zoom_state(&self) -> ZoomState {
        let inner = self.inner.borrow();
        ZoomState {
            zoom: inner.zoom,
            is_zooming: inner.is_zooming,
            direction: inner.direction,
            progress: inner.progress(),
            target_index: inner.next_index,
        }
    }

    pub fn config(&self) -> PinchZoomConfig {
        self.inner.borrow().config
    }

    /// Curve for settles started from now on.
    pub fn set_animation(&self, animation: AnimationType) {
        self.inner.borrow_mut().config.animation = animation;
    }

    /// Switches level instantly. Ignored for the current or an out-of-range
    /// index.
    pub fn select_level(&self, index: usize) {
        let changed = self.inner.borrow_mut().levels.select(index);
        if changed {
            log::debug!("selected cells level {index}");
            self.schedule();
        } else {
            log::debug!("ignoring select_level({index})");
        }
    }

    /// Animates to the level at `index` as if pinched there. Ignored for the
    /// current or an out-of-range index.
    pub fn animate_to_level(&self, index: usize) {
        let final_zoom = {
            let mut inner = self.inner.borrow_mut();
            let Some(direction) = inner.levels.direction_to(index) else {
                log::debug!("ignoring animate_to_level({index})");
                return;
            };
            inner.cancel_settle();
            inner.transition_id += 1;
            inner.direction = direction;
            inner.next_index = Some(index);
            inner.is_zooming = true;
            log::debug!("animating to cells level {index} ({direction:?})");
            direction.final_zoom()
        };
        self.collect_zoom_items(None);

        // The animation starts once the next grid had a frame to mount.
        let weak = Rc::downgrade(&self.inner);
        let clock = self.inner.borrow().runtime.frame_clock();
        let registration = clock.with_frame_nanos(move |_| {
            if let Some(inner) = weak.upgrade() {
                Self::start_settle(&inner, final_zoom, Some(index));
            }
        });
        self.inner.borrow_mut().settle = Some(SettleTask::AwaitingFrame(registration));
        self.schedule();
    }

    /// Grids to mount this frame, back to front.
    pub fn grid_scopes(&self) -> Vec<GridScope<K>> {
        let (current, next) = {
            let inner = self.inner.borrow();
            let next = match (inner.next_index, inner.scroll_anchor) {
                (Some(index), Some(anchor)) => inner.levels.get(index).map(|cells| (cells, anchor)),
                _ => None,
            };
            (inner.levels.current(), next)
        };
        let mut scopes = Vec::with_capacity(2);
        if let Some((cells, anchor)) = next {
            scopes.push(GridScope::new(self.clone(), GridRole::Next, cells, Some(anchor)));
        }
        scopes.push(GridScope::new(self.clone(), GridRole::Current, current, None));
        scopes
    }

    /// Layer for the container wrapping both grids. Scales slightly while
    /// pinching past the first or last level.
    pub fn container_layer(&self) -> GraphicsLayer {
        let inner = self.inner.borrow();
        compositor::over_zoom_layer(&inner.frame(), inner.config.over_zoom_scale)
    }

    /// Cancels everything in flight and releases all collected bounds.
    pub fn dispose(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.cancel_settle();
        if let Some(registration) = inner.bounds_ready.take() {
            registration.cancel();
        }
        if let Some(registration) = inner.swap.take() {
            registration.cancel();
        }
        inner.registry.clear();
        inner.is_zooming = false;
        inner.is_swapping = false;
        inner.zoom = NEUTRAL_ZOOM;
        inner.next_index = None;
        inner.scroll_anchor = None;
        inner.transition_id += 1;
        log::debug!("pinch zoom state disposed");
    }

    pub(crate) fn with_registry<R>(&self, f: impl FnOnce(&mut ItemBoundsRegistry<K>) -> R) -> R {
        f(&mut self.inner.borrow_mut().registry)
    }

    pub(crate) fn current_item_layer(
        &self,
        key: &K,
        transitions: ItemTransitions,
        size: Size,
    ) -> ItemLayer {
        let (layer, newly_animating) = {
            let mut inner = self.inner.borrow_mut();
            let frame = inner.frame();
            compositor::current_item_layer(&frame, &mut inner.registry, key, transitions, size)
        };
        if newly_animating {
            // The next grid reveals its non-animating items once this changes.
            self.schedule();
        }
        layer
    }

    pub(crate) fn next_item_layer(&self, key: &K) -> ItemLayer {
        let inner = self.inner.borrow();
        compositor::next_item_layer(&inner.frame(), &inner.registry, key)
    }

    fn schedule(&self) {
        let runtime = self.inner.borrow().runtime.clone();
        runtime.schedule();
    }

    /// Snapshots the scroll anchor and restarts next-grid bounds collection.
    fn collect_zoom_items(&self, centroid: Option<Point>) {
        let grid = {
            let mut inner = self.inner.borrow_mut();
            inner.registry.begin_transition();
            Rc::clone(&inner.grid)
        };
        let anchor = capture_anchor(&*grid, centroid);
        log::trace!("captured scroll anchor {anchor:?}");

        let weak = Rc::downgrade(&self.inner);
        let clock = self.inner.borrow().runtime.frame_clock();
        let registration = clock.with_frame_nanos(move |_| {
            if let Some(inner) = weak.upgrade() {
                Self::on_next_bounds_ready(&inner);
            }
        });
        let mut inner = self.inner.borrow_mut();
        inner.scroll_anchor = Some(anchor);
        // Replacing the registration cancels a rebase left over from a flip.
        inner.bounds_ready = Some(registration);
    }

    fn on_next_bounds_ready(this: &Rc<RefCell<ZoomStateInner<K>>>) {
        let runtime = {
            let mut inner = this.borrow_mut();
            inner.bounds_ready = None;
            inner.zoom = NEUTRAL_ZOOM;
            inner.registry.mark_next_ready();
            log::trace!(
                "next grid bounds ready ({} items)",
                inner.registry.next_len()
            );
            inner.runtime.clone()
        };
        runtime.schedule();
    }

    fn start_settle(this: &Rc<RefCell<ZoomStateInner<K>>>, to: f32, commit: Option<usize>) {
        let (clock, from, animation) = {
            let mut inner = this.borrow_mut();
            inner.cancel_settle();
            (inner.runtime.frame_clock(), inner.zoom, inner.config.animation)
        };
        let tick_target: Weak<RefCell<ZoomStateInner<K>>> = Rc::downgrade(this);
        let end_target = Rc::downgrade(this);
        let handle = animate(
            &clock,
            from,
            to,
            animation,
            move |value| {
                if let Some(inner) = tick_target.upgrade() {
                    let runtime = {
                        let mut inner = inner.borrow_mut();
                        inner.zoom = clamp_zoom(value);
                        inner.runtime.clone()
                    };
                    runtime.schedule();
                }
            },
            move || {
                if let Some(inner) = end_target.upgrade() {
                    Self::finish_transition(&inner, commit);
                }
            },
        );
        this.borrow_mut().settle = Some(SettleTask::Animating(handle));
    }

    fn finish_transition(this: &Rc<RefCell<ZoomStateInner<K>>>, commit: Option<usize>) {
        let runtime = {
            let mut inner = this.borrow_mut();
            inner.settle = None;
            if let Some(registration) = inner.bounds_ready.take() {
                registration.cancel();
            }
            let committed = Self::swap_grids(this, &mut inner, commit);
            inner.is_zooming = false;
            inner.zoom = NEUTRAL_ZOOM;
            inner.registry.end_transition(committed);
            inner.runtime.clone()
        };
        runtime.schedule();
    }

    /// Makes `commit` the current level and schedules the scroll handoff.
    /// Returns whether a swap happened.
    fn swap_grids(
        this: &Rc<RefCell<ZoomStateInner<K>>>,
        inner: &mut ZoomStateInner<K>,
        commit: Option<usize>,
    ) -> bool {
        let (Some(index), Some(anchor)) = (commit, inner.scroll_anchor) else {
            log::debug!(
                "transition cancelled, keeping cells level {}",
                inner.levels.current_index()
            );
            inner.is_swapping = false;
            inner.next_index = None;
            inner.scroll_anchor = None;
            return false;
        };
        if !inner.levels.select(index) {
            log::debug!("commit target {index} is no longer selectable");
            inner.is_swapping = false;
            inner.next_index = None;
            inner.scroll_anchor = None;
            return false;
        }
        log::debug!("committed cells level {index}");
        inner.is_swapping = true;
        let transition_id = inner.transition_id;
        let weak = Rc::downgrade(this);
        let registration = apply_anchor_next_frame(
            &inner.runtime.frame_clock(),
            Rc::clone(&inner.grid),
            anchor,
            move || {
                if let Some(inner) = weak.upgrade() {
                    Self::on_swapped(&inner, transition_id);
                }
            },
        );
        inner.swap = Some(registration);
        true
    }

    fn on_swapped(this: &Rc<RefCell<ZoomStateInner<K>>>, transition_id: u64) {
        let runtime = {
            let mut inner = this.borrow_mut();
            inner.swap = None;
            inner.is_swapping = false;
            // A newer transition owns the target and anchor now.
            if inner.transition_id == transition_id {
                inner.next_index = None;
                inner.scroll_anchor = None;
            }
            log::debug!(
                "scroll position handed over to cells level {}",
                inner.levels.current_index()
            );
            inner.runtime.clone()
        };
        runtime.schedule();
    }
}

impl<K: Eq + Hash + Clone + 'static> PinchGestureListener for PinchZoomGridState<K> {
    fn on_zoom_start(&mut self, centroid: Point, zoom: f32) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.cancel_settle();
            inner.transition_id += 1;
            inner.is_zooming = true;
        }
        self.collect_zoom_items(Some(centroid));
        {
            let mut inner = self.inner.borrow_mut();
            inner.update_direction_and_target(zoom);
            log::debug!(
                "zoom started at {centroid:?} ({:?}, target {:?})",
                inner.direction,
                inner.next_index
            );
        }
        self.schedule();
    }

    fn on_zoom(&mut self, zoom_change: f32) {
        let flipped = {
            let mut inner = self.inner.borrow_mut();
            if !inner.is_zooming {
                log::trace!("ignoring zoom change outside a transition");
                return;
            }
            let zoom = clamp_zoom(inner.zoom * zoom_change);
            let flipped = ZoomDirection::of_zoom(zoom) != inner.direction;
            if flipped {
                inner.update_direction_and_target(zoom);
                log::debug!(
                    "zoom direction flipped to {:?} (target {:?})",
                    inner.direction,
                    inner.next_index
                );
            }
            inner.zoom = zoom;
            flipped
        };
        if flipped {
            // Per-item animating marks restart; in-flight layers are not reset.
            self.collect_zoom_items(None);
        }
        self.schedule();
    }

    fn on_zoom_stopped(&mut self) {
        let (to, commit) = {
            let inner = self.inner.borrow();
            if !inner.is_zooming {
                return;
            }
            let progress = inner.progress();
            match inner.next_index {
                Some(index) if progress > inner.config.settle_threshold => {
                    log::debug!("settling toward cells level {index} at progress {progress}");
                    (inner.direction.final_zoom(), Some(index))
                }
                _ => {
                    log::debug!("settling back at progress {progress}");
                    (NEUTRAL_ZOOM, None)
                }
            }
        };
        Self::start_settle(&self.inner, to, commit);
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
