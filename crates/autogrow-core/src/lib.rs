//! Core runtime for the autogrow widgets.
//!
//! Everything here runs on the UI thread. The [`Runtime`] owns two queues:
//! tasks for the next UI tick ([`RuntimeHandle::post_local`]) and frame
//! callbacks ([`FrameClock::with_frame_nanos`]). Widgets hold a weak
//! [`RuntimeHandle`] and an [`AliveWatcher`] so deferred work can never reach
//! a torn-down component.

mod alive;
mod frame_clock;
mod platform;
mod runtime;
mod state;

pub use alive::{AliveFlag, AliveWatcher};
pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{Clock, DefaultScheduler, RuntimeScheduler};
pub use runtime::{FrameCallbackId, Runtime, RuntimeHandle};
pub use state::{MutableState, StateSubscription};

/// Nanoseconds per millisecond, for converting frame timestamps.
pub const NANOS_PER_MILLI: u64 = 1_000_000;
