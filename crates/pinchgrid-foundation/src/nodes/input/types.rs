use pinchgrid_ui_graphics::Point;
use std::cell::Cell;
use std::rc::Rc;

pub type PointerId = u64;

/// Describes the change of one pointer between two consecutive events.
///
/// Consumption is shared through `Rc` so every handler sees it.
#[derive(Debug)]
pub struct PointerInputChange {
    pub id: PointerId,
    pub uptime: u64,
    pub position: Point,
    pub pressed: bool,
    pub previous_uptime: u64,
    pub previous_position: Point,
    pub previous_pressed: bool,
    is_consumed: Cell<bool>,
}

impl PointerInputChange {
    pub fn new(id: PointerId, uptime: u64, position: Point, pressed: bool) -> Self {
        Self {
            id,
            uptime,
            position,
            pressed,
            previous_uptime: uptime,
            previous_position: position,
            previous_pressed: false,
            is_consumed: Cell::new(false),
        }
    }

    /// Sets the state this pointer had in the previous event.
    pub fn with_previous(mut self, uptime: u64, position: Point, pressed: bool) -> Self {
        self.previous_uptime = uptime;
        self.previous_position = position;
        self.previous_pressed = pressed;
        self
    }

    pub fn is_consumed(&self) -> bool {
        self.is_consumed.get()
    }

    pub fn consume(&self) {
        self.is_consumed.set(true);
    }

    pub fn changed_to_down_ignore_consumed(&self) -> bool {
        !self.previous_pressed && self.pressed
    }

    pub fn position_changed(&self) -> bool {
        !self.is_consumed() && self.position != self.previous_position
    }
}

/// One frame's batch of pointer changes, as delivered to gesture handlers.
#[derive(Clone, Debug, Default)]
pub struct PointerEvent {
    pub changes: Vec<Rc<PointerInputChange>>,
}

impl PointerEvent {
    pub fn new(changes: Vec<Rc<PointerInputChange>>) -> Self {
        Self { changes }
    }

    pub fn is_consumed(&self) -> bool {
        self.changes.iter().any(|c| c.is_consumed())
    }

    pub fn any_pressed(&self) -> bool {
        self.changes.iter().any(|c| c.pressed)
    }

    pub fn consume(&self) {
        for change in &self.changes {
            change.consume();
        }
    }
}
