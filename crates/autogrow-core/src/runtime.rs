use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::frame_clock::FrameClock;
use crate::platform::RuntimeScheduler;

/// Identifier of a registered frame callback.
pub type FrameCallbackId = u64;

type FrameCallback = Box<dyn FnOnce(u64) + 'static>;
type LocalTask = Box<dyn FnOnce() + 'static>;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<FrameCallback>,
}

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<FrameCallbackId>,
    local_tasks: RefCell<VecDeque<LocalTask>>,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            needs_frame: Cell::new(false),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            local_tasks: RefCell::new(VecDeque::new()),
        }
    }

    // Work registered from inside a drain must reach the host too, so every
    // registration asks the scheduler even while a frame is outstanding.
    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn register_frame_callback(&self, callback: FrameCallback) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
        drop(callbacks);
        self.settle();
    }

    fn post_local(&self, task: LocalTask) {
        self.local_tasks.borrow_mut().push_back(task);
        self.schedule();
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn has_pending_ui(&self) -> bool {
        self.local_tasks
            .try_borrow()
            .map(|tasks| !tasks.is_empty())
            .unwrap_or(true)
    }

    /// Clears the frame request once nothing is left to run.
    fn settle(&self) {
        let callbacks_empty = self
            .frame_callbacks
            .try_borrow()
            .map(|callbacks| callbacks.is_empty())
            .unwrap_or(false);
        if callbacks_empty && !self.has_pending_ui() {
            self.needs_frame.set(false);
        }
    }

    fn drain_ui(&self) {
        // Tasks posted while draining belong to the next tick.
        let tasks: Vec<LocalTask> = self.local_tasks.borrow_mut().drain(..).collect();
        if !tasks.is_empty() {
            log::trace!("draining {} ui task(s)", tasks.len());
        }
        for task in tasks {
            task();
        }
        self.settle();
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: Vec<FrameCallback> = Vec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        for callback in pending {
            callback(frame_time_nanos);
        }
        self.settle();
    }
}

/// Owner of the UI-thread work queues.
///
/// The runtime is single threaded: it is created on the UI thread and every
/// callback it runs executes there. Hosts pump it once per run-loop turn by
/// calling [`drain_ui`](Self::drain_ui) followed by
/// [`drain_frame_callbacks`](Self::drain_frame_callbacks).
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    /// Returns a non-owning handle that widgets keep.
    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner.has_frame_callbacks()
    }

    pub fn has_pending_ui(&self) -> bool {
        self.inner.has_pending_ui()
    }

    /// Runs every task posted for the next UI tick.
    pub fn drain_ui(&self) {
        self.inner.drain_ui();
    }

    /// Runs every frame callback registered before this call.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.inner.drain_frame_callbacks(frame_time_nanos);
    }
}

/// Weak handle to a [`Runtime`].
///
/// Every operation is a no-op once the runtime has been dropped, so widgets
/// that outlive their host never touch freed queues.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    /// Queues `task` for the next UI tick. Returns false when the runtime is gone.
    pub fn post_local(&self, task: impl FnOnce() + 'static) -> bool {
        match self.inner.upgrade() {
            Some(inner) => {
                inner.post_local(Box::new(task));
                true
            }
            None => false,
        }
    }

    pub fn drain_ui(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_ui();
        }
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
