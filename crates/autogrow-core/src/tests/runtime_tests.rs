use super::*;
use crate::platform::{DefaultScheduler, RuntimeScheduler};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct CountingScheduler {
    requests: AtomicUsize,
}

impl RuntimeScheduler for CountingScheduler {
    fn schedule_frame(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn frame_callbacks_run_on_drain() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let seen = Rc::new(Cell::new(None));
    {
        let seen = Rc::clone(&seen);
        runtime
            .handle()
            .register_frame_callback(move |time| seen.set(Some(time)));
    }
    assert!(runtime.needs_frame());
    assert_eq!(seen.get(), None);

    runtime.drain_frame_callbacks(16_000_000);
    assert_eq!(seen.get(), Some(16_000_000));
    assert!(!runtime.needs_frame());
}

#[test]
fn cancelled_frame_callback_never_runs() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let ran = Rc::new(Cell::new(false));
    let registration = {
        let ran = Rc::clone(&ran);
        runtime.frame_clock().with_frame_nanos(move |_| ran.set(true))
    };
    assert!(registration.is_active());

    registration.cancel();
    assert!(!runtime.has_frame_callbacks());
    runtime.drain_frame_callbacks(1);
    assert!(!ran.get());
}

#[test]
fn callbacks_registered_during_drain_wait_for_next_frame() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let handle = runtime.handle();
    let times = Rc::new(RefCell::new(Vec::new()));
    {
        let times = Rc::clone(&times);
        let inner_handle = handle.clone();
        handle.register_frame_callback(move |time| {
            times.borrow_mut().push(time);
            let times = Rc::clone(&times);
            inner_handle.register_frame_callback(move |time| times.borrow_mut().push(time));
        });
    }

    runtime.drain_frame_callbacks(10);
    assert_eq!(*times.borrow(), vec![10]);
    assert!(runtime.needs_frame());
    runtime.drain_frame_callbacks(20);
    assert_eq!(*times.borrow(), vec![10, 20]);
}

#[test]
fn local_tasks_run_on_next_tick_only() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let handle = runtime.handle();
    let order = Rc::new(RefCell::new(Vec::new()));
    {
        let order = Rc::clone(&order);
        let nested = handle.clone();
        handle.post_local(move || {
            order.borrow_mut().push("first");
            let order = Rc::clone(&order);
            nested.post_local(move || order.borrow_mut().push("second"));
        });
    }
    assert!(order.borrow().is_empty());

    runtime.drain_ui();
    assert_eq!(*order.borrow(), vec!["first"]);
    assert!(runtime.has_pending_ui());

    runtime.drain_ui();
    assert_eq!(*order.borrow(), vec!["first", "second"]);
    assert!(!runtime.has_pending_ui());
}

#[test]
fn scheduler_is_asked_for_every_registration() {
    let scheduler = Arc::new(CountingScheduler::default());
    let runtime = Runtime::new(scheduler.clone());
    let handle = runtime.handle();

    handle.register_frame_callback(|_| {});
    handle.register_frame_callback(|_| {});
    handle.post_local(|| {});
    assert_eq!(scheduler.requests.load(Ordering::SeqCst), 3);

    runtime.drain_ui();
    runtime.drain_frame_callbacks(1);
    assert!(!runtime.needs_frame());
    handle.register_frame_callback(|_| {});
    assert_eq!(scheduler.requests.load(Ordering::SeqCst), 4);
}

#[test]
fn registration_during_drain_requests_another_frame() {
    let scheduler = Arc::new(CountingScheduler::default());
    let runtime = Runtime::new(scheduler.clone());
    let handle = runtime.handle();
    {
        let inner_handle = handle.clone();
        handle.register_frame_callback(move |_| {
            inner_handle.register_frame_callback(|_| {});
        });
    }
    assert_eq!(scheduler.requests.load(Ordering::SeqCst), 1);

    runtime.drain_frame_callbacks(10);
    assert_eq!(scheduler.requests.load(Ordering::SeqCst), 2);
    assert!(runtime.needs_frame());

    runtime.drain_frame_callbacks(20);
    assert_eq!(scheduler.requests.load(Ordering::SeqCst), 2);
    assert!(!runtime.needs_frame());
}

#[test]
fn task_posted_during_frame_requests_another_frame() {
    let scheduler = Arc::new(CountingScheduler::default());
    let runtime = Runtime::new(scheduler.clone());
    let handle = runtime.handle();
    {
        let inner_handle = handle.clone();
        handle.register_frame_callback(move |_| {
            inner_handle.post_local(|| {});
        });
    }

    runtime.drain_frame_callbacks(10);
    assert_eq!(scheduler.requests.load(Ordering::SeqCst), 2);
    assert!(runtime.has_pending_ui());
}

#[test]
fn handle_is_inert_after_runtime_drop() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let handle = runtime.handle();
    drop(runtime);

    assert!(!handle.is_alive());
    assert!(handle.register_frame_callback(|_| {}).is_none());
    assert!(!handle.post_local(|| {}));
    let registration = handle.frame_clock().with_frame_nanos(|_| {});
    assert!(!registration.is_active());
}
