//! Platform abstraction traits for the autogrow runtime.
//!
//! The host event loop owns the actual run loop. These traits let the
//! runtime ask it for another frame and read its clock without tying the
//! widgets to a particular windowing backend.

/// Asks the host to run another UI frame.
///
/// Implementations only record or forward the request; the frame itself is
/// driven by the host calling [`Runtime::drain_ui`](crate::Runtime::drain_ui)
/// and [`Runtime::drain_frame_callbacks`](crate::Runtime::drain_frame_callbacks).
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Provides timing information for the runtime.
pub trait Clock: Send + Sync {
    /// Instant type produced by this clock implementation.
    type Instant: Copy + Send + Sync;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the number of milliseconds elapsed since `since`.
    fn elapsed_millis(&self, since: Self::Instant) -> u64;
}

/// Scheduler that ignores frame requests.
///
/// Useful for tests and headless hosts that pump the runtime manually.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}
