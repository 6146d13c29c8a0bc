use super::StdRuntime;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use web_time::Duration;

#[test]
fn std_runtime_records_frame_requests() {
    let runtime = StdRuntime::new();
    assert!(!runtime.take_frame_request());

    runtime.runtime_handle().post_local(|| {});
    assert!(runtime.take_frame_request());
    assert!(!runtime.take_frame_request());
}

#[test]
fn frame_waker_fires_on_schedule() {
    let runtime = StdRuntime::new();
    let wakes = Arc::new(AtomicUsize::new(0));
    {
        let wakes = Arc::clone(&wakes);
        runtime
            .scheduler()
            .set_frame_waker(move || {
                wakes.fetch_add(1, Ordering::SeqCst);
            });
    }

    runtime.runtime_handle().register_frame_callback(|_| {});
    assert_eq!(wakes.load(Ordering::SeqCst), 1);

    runtime.scheduler().clear_frame_waker();
    runtime.pump_frame();
    runtime.runtime_handle().register_frame_callback(|_| {});
    assert_eq!(wakes.load(Ordering::SeqCst), 1);
}

#[test]
fn run_until_idle_drains_chained_frames() {
    let runtime = StdRuntime::new();
    let frames = Rc::new(Cell::new(0));
    fn chain(handle: autogrow_core::RuntimeHandle, frames: Rc<Cell<u32>>) {
        let next = handle.clone();
        handle.register_frame_callback(move |_| {
            frames.set(frames.get() + 1);
            if frames.get() < 3 {
                chain(next, frames);
            }
        });
    }
    chain(runtime.runtime_handle(), Rc::clone(&frames));

    let idle = runtime.run_until_idle(Duration::from_millis(1), Duration::from_secs(2));
    assert!(idle);
    assert_eq!(frames.get(), 3);
}

#[test]
fn frame_waker_keeps_chained_frames_going() {
    let runtime = StdRuntime::new();
    let wakes = Arc::new(AtomicUsize::new(0));
    {
        let wakes = Arc::clone(&wakes);
        runtime.scheduler().set_frame_waker(move || {
            wakes.fetch_add(1, Ordering::SeqCst);
        });
    }
    let frames = Rc::new(Cell::new(0));
    fn chain(handle: autogrow_core::RuntimeHandle, frames: Rc<Cell<u32>>) {
        let next = handle.clone();
        handle.register_frame_callback(move |_| {
            frames.set(frames.get() + 1);
            if frames.get() < 3 {
                chain(next, frames);
            }
        });
    }
    chain(runtime.runtime_handle(), Rc::clone(&frames));

    // Pump only when the host was asked for a frame.
    let mut pumped = 0;
    while runtime.take_frame_request() && pumped < 10 {
        runtime.pump_frame();
        pumped += 1;
    }
    assert_eq!(frames.get(), 3);
    assert_eq!(pumped, 3);
    assert_eq!(wakes.load(Ordering::SeqCst), 3);
    assert!(!runtime.runtime().needs_frame());
}
