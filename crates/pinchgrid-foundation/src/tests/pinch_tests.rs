use super::*;
use crate::nodes::input::types::PointerInputChange;
use std::rc::Rc;

#[derive(Debug, PartialEq)]
enum Call {
    Start(Point, f32),
    Zoom(f32),
    Stop,
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl PinchGestureListener for Recorder {
    fn on_zoom_start(&mut self, centroid: Point, zoom: f32) {
        self.calls.push(Call::Start(centroid, zoom));
    }

    fn on_zoom(&mut self, zoom_change: f32) {
        self.calls.push(Call::Zoom(zoom_change));
    }

    fn on_zoom_stopped(&mut self) {
        self.calls.push(Call::Stop);
    }
}

fn change(
    id: u64,
    previous: (f32, f32, bool),
    current: (f32, f32, bool),
) -> Rc<PointerInputChange> {
    Rc::new(
        PointerInputChange::new(id, 16, Point::new(current.0, current.1), current.2).with_previous(
            0,
            Point::new(previous.0, previous.1),
            previous.2,
        ),
    )
}

fn event(changes: Vec<Rc<PointerInputChange>>) -> PointerEvent {
    PointerEvent::new(changes)
}

/// Both fingers down at x=100 and x=200 on y=100.
fn press_two_fingers(detector: &mut PinchGestureDetector, recorder: &mut Recorder) {
    let down = event(vec![change(1, (100.0, 100.0, false), (100.0, 100.0, true))]);
    assert!(!detector.on_pointer_event(&down, recorder));
    assert!(!down.is_consumed());

    let second = event(vec![
        change(1, (100.0, 100.0, true), (100.0, 100.0, true)),
        change(2, (200.0, 100.0, false), (200.0, 100.0, true)),
    ]);
    assert!(!detector.on_pointer_event(&second, recorder));
}

fn spread(
    detector: &mut PinchGestureDetector,
    recorder: &mut Recorder,
    from: f32,
    to: f32,
) -> bool {
    let moved = event(vec![
        change(1, (150.0 - from, 100.0, true), (150.0 - to, 100.0, true)),
        change(2, (150.0 + from, 100.0, true), (150.0 + to, 100.0, true)),
    ]);
    detector.on_pointer_event(&moved, recorder)
}

fn lift(detector: &mut PinchGestureDetector, recorder: &mut Recorder, half_span: f32) {
    let up = event(vec![
        change(1, (150.0 - half_span, 100.0, true), (150.0 - half_span, 100.0, false)),
        change(2, (150.0 + half_span, 100.0, true), (150.0 + half_span, 100.0, false)),
    ]);
    detector.on_pointer_event(&up, recorder);
}

#[test]
fn pinch_emits_start_zoom_and_stop() {
    let mut detector = PinchGestureDetector::default();
    let mut recorder = Recorder::default();

    press_two_fingers(&mut detector, &mut recorder);
    assert!(spread(&mut detector, &mut recorder, 50.0, 60.0));
    assert!(detector.is_pinching());
    assert!(spread(&mut detector, &mut recorder, 60.0, 75.0));
    lift(&mut detector, &mut recorder, 75.0);

    assert_eq!(
        recorder.calls,
        vec![
            Call::Start(Point::new(150.0, 100.0), 1.2),
            Call::Zoom(1.2),
            Call::Zoom(1.25),
            Call::Stop,
        ]
    );
    assert!(!detector.is_pinching());
}

#[test]
fn pinch_below_slop_leaves_events_untouched() {
    let mut detector = PinchGestureDetector::default();
    let mut recorder = Recorder::default();

    press_two_fingers(&mut detector, &mut recorder);
    // |1 - 50.5/50| * 50 = 0.5, below the 2px pinch slop.
    assert!(!spread(&mut detector, &mut recorder, 50.0, 50.5));
    lift(&mut detector, &mut recorder, 50.5);

    assert!(recorder.calls.is_empty());
}

#[test]
fn single_pointer_drag_never_starts() {
    let mut detector = PinchGestureDetector::default();
    let mut recorder = Recorder::default();

    let down = event(vec![change(1, (10.0, 10.0, false), (10.0, 10.0, true))]);
    detector.on_pointer_event(&down, &mut recorder);
    for step in 1..10 {
        let y = 10.0 + step as f32 * 20.0;
        let moved = event(vec![change(1, (10.0, y - 20.0, true), (10.0, y, true))]);
        assert!(!detector.on_pointer_event(&moved, &mut recorder));
        assert!(!moved.is_consumed());
    }
    let up = event(vec![change(1, (10.0, 190.0, true), (10.0, 190.0, false))]);
    detector.on_pointer_event(&up, &mut recorder);

    assert!(recorder.calls.is_empty());
}

#[test]
fn event_consumed_elsewhere_stops_started_pinch() {
    let mut detector = PinchGestureDetector::default();
    let mut recorder = Recorder::default();

    press_two_fingers(&mut detector, &mut recorder);
    spread(&mut detector, &mut recorder, 50.0, 60.0);

    let stolen = event(vec![
        change(1, (90.0, 100.0, true), (80.0, 100.0, true)),
        change(2, (210.0, 100.0, true), (220.0, 100.0, true)),
    ]);
    stolen.consume();
    detector.on_pointer_event(&stolen, &mut recorder);

    assert_eq!(recorder.calls.last(), Some(&Call::Stop));
    assert!(!detector.is_pinching());
}

#[test]
fn cancel_only_reports_stop_after_start() {
    let mut detector = PinchGestureDetector::default();
    let mut recorder = Recorder::default();

    press_two_fingers(&mut detector, &mut recorder);
    detector.cancel(&mut recorder);
    assert!(recorder.calls.is_empty());

    press_two_fingers(&mut detector, &mut recorder);
    spread(&mut detector, &mut recorder, 50.0, 40.0);
    detector.cancel(&mut recorder);

    assert_eq!(
        recorder.calls,
        vec![Call::Start(Point::new(150.0, 100.0), 0.8), Call::Zoom(0.8), Call::Stop]
    );
}

#[test]
fn centroid_math_ignores_pointers_not_held_across_events() {
    let moved = event(vec![
        change(1, (0.0, 0.0, true), (0.0, 0.0, true)),
        change(2, (10.0, 0.0, true), (20.0, 0.0, true)),
        change(3, (500.0, 500.0, false), (500.0, 500.0, true)),
    ]);

    assert_eq!(moved.calculate_centroid(false), Some(Point::new(5.0, 0.0)));
    assert_eq!(moved.calculate_centroid(true), Some(Point::new(10.0, 0.0)));
    assert_eq!(moved.calculate_centroid_size(false), 5.0);
    assert_eq!(moved.calculate_zoom(), 2.0);
}

#[test]
fn pinch_slop_is_quarter_of_touch_slop() {
    assert_eq!(PinchGestureConfig::default().pinch_slop(), 2.0);
    assert_eq!(PinchGestureConfig { touch_slop: 16.0 }.pinch_slop(), 4.0);
}
