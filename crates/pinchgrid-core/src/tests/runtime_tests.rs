use super::*;
use crate::platform::DefaultScheduler;
use crate::frame_clock::FrameCallbackRegistration;
use std::sync::atomic::{AtomicUsize, Ordering};

struct CountingScheduler {
    requests: AtomicUsize,
}

impl RuntimeScheduler for CountingScheduler {
    fn schedule_frame(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn frame_callback_runs_once_with_frame_time() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let clock = runtime.frame_clock();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&seen);
    let _registration = clock.with_frame_nanos(move |time| sink.borrow_mut().push(time));
    assert!(runtime.needs_frame());

    runtime.handle().drain_frame_callbacks(16_000_000);
    runtime.handle().drain_frame_callbacks(32_000_000);

    assert_eq!(seen.borrow().as_slice(), &[16_000_000]);
    assert!(!runtime.needs_frame());
}

#[test]
fn cancelled_registration_never_runs() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let ran = Rc::new(Cell::new(false));

    let flag = Rc::clone(&ran);
    let registration = runtime.frame_clock().with_frame_nanos(move |_| flag.set(true));
    registration.cancel();
    runtime.handle().drain_frame_callbacks(0);

    assert!(!ran.get());
}

#[test]
fn dropped_registration_never_runs() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let ran = Rc::new(Cell::new(false));

    {
        let flag = Rc::clone(&ran);
        let _registration = runtime.frame_clock().with_frame_nanos(move |_| flag.set(true));
    }
    runtime.handle().drain_frame_callbacks(0);

    assert!(!ran.get());
    assert!(!runtime.handle().has_frame_callbacks());
}

#[test]
fn callbacks_registered_while_draining_wait_for_next_frame() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let clock = runtime.frame_clock();
    let frames = Rc::new(RefCell::new(Vec::new()));
    let nested = Rc::new(RefCell::new(None));

    let outer_frames = Rc::clone(&frames);
    let nested_slot = Rc::clone(&nested);
    let inner_clock = clock.clone();
    let _outer = clock.with_frame_nanos(move |time| {
        outer_frames.borrow_mut().push(("outer", time));
        let frames = Rc::clone(&outer_frames);
        let next = inner_clock.with_frame_nanos(move |time| {
            frames.borrow_mut().push(("inner", time));
        });
        nested_slot.borrow_mut().replace(next);
    });

    runtime.handle().drain_frame_callbacks(1);
    assert_eq!(frames.borrow().as_slice(), &[("outer", 1)]);
    assert!(runtime.needs_frame());

    runtime.handle().drain_frame_callbacks(2);
    assert_eq!(frames.borrow().as_slice(), &[("outer", 1), ("inner", 2)]);
}

#[test]
fn registering_requests_a_frame_from_the_scheduler() {
    let scheduler = Arc::new(CountingScheduler {
        requests: AtomicUsize::new(0),
    });
    let runtime = Runtime::new(scheduler.clone());

    let _registration = runtime.frame_clock().with_frame_nanos(|_| {});
    runtime.handle().schedule();

    assert_eq!(scheduler.requests.load(Ordering::SeqCst), 2);
}

#[test]
fn handle_outliving_runtime_is_inert() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let handle = runtime.handle();
    drop(runtime);

    assert!(!handle.is_alive());
    assert!(handle.register_frame_callback(|_| {}).is_none());
    handle.drain_frame_callbacks(0);
}

#[test]
fn continuation_can_cancel_one_queued_in_the_same_frame() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let clock = runtime.frame_clock();
    let second_ran = Rc::new(Cell::new(false));
    let second_slot: Rc<RefCell<Option<FrameCallbackRegistration>>> = Rc::new(RefCell::new(None));

    let slot = Rc::clone(&second_slot);
    let _first = clock.with_frame_nanos(move |_| {
        if let Some(registration) = slot.borrow_mut().take() {
            registration.cancel();
        }
    });
    let flag = Rc::clone(&second_ran);
    *second_slot.borrow_mut() = Some(clock.with_frame_nanos(move |_| flag.set(true)));

    runtime.handle().drain_frame_callbacks(0);

    assert!(!second_ran.get());
    assert!(!runtime.handle().has_frame_callbacks());
}

#[test]
fn cancelling_a_callback_that_already_ran_leaves_others_queued() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let handle = runtime.handle();
    let ran = Rc::new(Cell::new(0));

    let first = handle.register_frame_callback(|_| {}).expect("runtime alive");
    handle.drain_frame_callbacks(0);

    let count = Rc::clone(&ran);
    let _second = handle
        .register_frame_callback(move |_| count.set(count.get() + 1))
        .expect("runtime alive");
    handle.cancel_frame_callback(first);
    handle.cancel_frame_callback(first);
    assert!(handle.has_frame_callbacks());

    handle.drain_frame_callbacks(16);
    assert_eq!(ran.get(), 1);
    assert!(!handle.has_frame_callbacks());
}
