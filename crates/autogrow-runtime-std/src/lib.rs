//! Standard runtime services backed by Rust's `std` library.
//!
//! This crate provides concrete implementations of the platform traits
//! defined in `autogrow-core`, plus [`StdRuntime`], a small driver that
//! pumps UI ticks and frames against the wall clock. Headless hosts and the
//! console demo use it instead of a real windowing event loop.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use autogrow_core::{Clock, FrameClock, Runtime, RuntimeHandle, RuntimeScheduler};
use web_time::{Duration, Instant};

type FrameWaker = Arc<dyn Fn() + Send + Sync + 'static>;

/// Scheduler that records frame requests and optionally wakes the host loop.
pub struct StdScheduler {
    frame_requested: AtomicBool,
    frame_waker: RwLock<Option<FrameWaker>>,
}

impl StdScheduler {
    pub fn new() -> Self {
        Self {
            frame_requested: AtomicBool::new(false),
            frame_waker: RwLock::new(None),
        }
    }

    /// Returns whether a frame has been requested since the last call.
    pub fn take_frame_request(&self) -> bool {
        self.frame_requested.swap(false, Ordering::SeqCst)
    }

    /// Registers a waker that will be invoked whenever a new frame is scheduled.
    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        match self.frame_waker.write() {
            Ok(mut slot) => *slot = Some(Arc::new(waker)),
            Err(_) => log::warn!("frame waker lock poisoned; waker not installed"),
        }
    }

    /// Clears any registered frame waker.
    pub fn clear_frame_waker(&self) {
        if let Ok(mut slot) = self.frame_waker.write() {
            *slot = None;
        }
    }

    fn wake(&self) {
        let waker = self
            .frame_waker
            .read()
            .ok()
            .and_then(|slot| slot.as_ref().map(Arc::clone));
        if let Some(waker) = waker {
            waker();
        }
    }
}

impl Default for StdScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdScheduler")
            .field(
                "frame_requested",
                &self.frame_requested.load(Ordering::SeqCst),
            )
            .finish()
    }
}

impl RuntimeScheduler for StdScheduler {
    fn schedule_frame(&self) {
        self.frame_requested.store(true, Ordering::SeqCst);
        self.wake();
    }
}

/// Clock implementation backed by `web_time`.
#[derive(Debug, Default, Clone)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_millis(&self, since: Self::Instant) -> u64 {
        since.elapsed().as_millis() as u64
    }
}

/// Runtime bundled with the standard scheduler and clock.
///
/// Frame timestamps handed to frame callbacks are nanoseconds since the
/// runtime was created.
#[derive(Clone)]
pub struct StdRuntime {
    scheduler: Arc<StdScheduler>,
    clock: StdClock,
    runtime: Runtime,
    started: Instant,
}

impl StdRuntime {
    pub fn new() -> Self {
        let scheduler = Arc::new(StdScheduler::default());
        let runtime = Runtime::new(scheduler.clone());
        let clock = StdClock;
        let started = clock.now();
        Self {
            scheduler,
            clock,
            runtime,
            started,
        }
    }

    pub fn runtime(&self) -> Runtime {
        self.runtime.clone()
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    pub fn scheduler(&self) -> Arc<StdScheduler> {
        Arc::clone(&self.scheduler)
    }

    /// Returns whether a frame was requested since the last poll.
    pub fn take_frame_request(&self) -> bool {
        self.scheduler.take_frame_request()
    }

    /// Nanoseconds elapsed since this runtime was created.
    pub fn frame_time_nanos(&self) -> u64 {
        self.started.elapsed().as_nanos() as u64
    }

    /// Runs one UI tick followed by one frame at the current wall-clock time.
    pub fn pump_frame(&self) {
        self.runtime.drain_ui();
        self.runtime.drain_frame_callbacks(self.frame_time_nanos());
    }

    /// Pumps frames every `frame_interval` until the runtime is idle or
    /// `timeout` elapses. Returns `true` when the runtime went idle.
    pub fn run_until_idle(&self, frame_interval: Duration, timeout: Duration) -> bool {
        let deadline = self.clock.now() + timeout;
        loop {
            self.pump_frame();
            if !self.runtime.needs_frame() {
                return true;
            }
            if self.clock.now() >= deadline {
                log::debug!("runtime still busy after {:?}", timeout);
                return false;
            }
            std::thread::sleep(frame_interval);
        }
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("scheduler", &self.scheduler)
            .field("needs_frame", &self.runtime.needs_frame())
            .finish()
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/std_runtime_tests.rs"]
mod tests;
