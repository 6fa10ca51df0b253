use crate::Runtime;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn drain_runs_registered_callback_with_frame_time() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let seen_cb = Rc::clone(&seen);
    handle
        .register_frame_callback(move |time| seen_cb.borrow_mut().push(time))
        .expect("runtime alive");

    assert!(runtime.has_frame_callbacks());
    runtime.drain_frame_callbacks(16_666_667);
    assert_eq!(seen.borrow().as_slice(), &[16_666_667]);
    assert!(!runtime.has_frame_callbacks());

    // One-shot: a second drain must not run it again.
    runtime.drain_frame_callbacks(33_333_334);
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn cancelled_callback_does_not_run() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let ran = Rc::new(RefCell::new(false));

    let ran_cb = Rc::clone(&ran);
    let id = handle
        .register_frame_callback(move |_| *ran_cb.borrow_mut() = true)
        .expect("runtime alive");
    handle.cancel_frame_callback(id);

    runtime.drain_frame_callbacks(1);
    assert!(!*ran.borrow());
}

#[test]
fn callback_registered_during_drain_waits_for_next_frame() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let frames = Rc::new(RefCell::new(Vec::new()));

    let frames_outer = Rc::clone(&frames);
    let reschedule_handle = handle.clone();
    handle
        .register_frame_callback(move |time| {
            frames_outer.borrow_mut().push(("first", time));
            let frames_inner = Rc::clone(&frames_outer);
            reschedule_handle.register_frame_callback(move |time| {
                frames_inner.borrow_mut().push(("second", time));
            });
        })
        .expect("runtime alive");

    runtime.drain_frame_callbacks(100);
    assert_eq!(frames.borrow().as_slice(), &[("first", 100)]);

    runtime.drain_frame_callbacks(200);
    assert_eq!(
        frames.borrow().as_slice(),
        &[("first", 100), ("second", 200)]
    );
}

#[test]
fn callbacks_run_in_registration_order() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let order = Rc::new(RefCell::new(Vec::new()));

    for label in 0..4 {
        let order = Rc::clone(&order);
        handle
            .register_frame_callback(move |_| order.borrow_mut().push(label))
            .expect("runtime alive");
    }

    runtime.drain_frame_callbacks(1);
    assert_eq!(order.borrow().as_slice(), &[0, 1, 2, 3]);
}

#[test]
fn handle_outliving_runtime_is_inert() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    drop(runtime);

    assert!(handle.register_frame_callback(|_| {}).is_none());
    assert!(!handle.has_frame_callbacks());
    // Must not panic.
    handle.drain_frame_callbacks(1);
}

#[test]
fn wall_clock_drain_runs_callbacks() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let seen = Rc::new(RefCell::new(None));

    let seen_cb = Rc::clone(&seen);
    handle
        .register_frame_callback(move |time| *seen_cb.borrow_mut() = Some(time))
        .expect("runtime alive");

    runtime.drain_frames_now();
    // The frame time is elapsed-since-construction, so it only moves forward.
    assert!(seen.borrow().is_some());
}

#[test]
fn frame_clock_reports_millis() {
    let runtime = Runtime::new();
    let clock = runtime.handle().frame_clock();
    let seen = Rc::new(RefCell::new(None));

    let seen_cb = Rc::clone(&seen);
    let registration = clock.with_frame_millis(move |millis| *seen_cb.borrow_mut() = Some(millis));

    runtime.drain_frame_callbacks(33_333_334);
    assert_eq!(*seen.borrow(), Some(33));
    drop(registration);
}

#[test]
fn frame_clock_registration_cancels_on_drop() {
    let runtime = Runtime::new();
    let clock = runtime.handle().frame_clock();
    let ran = Rc::new(RefCell::new(false));

    let ran_cb = Rc::clone(&ran);
    let registration = clock.with_frame_nanos(move |_| *ran_cb.borrow_mut() = true);
    drop(registration);

    runtime.drain_frame_callbacks(1);
    assert!(!*ran.borrow());
}
