//! Animation system for autogrow
//!
//! Time-based tweens driven by the runtime's frame clock.

mod animation;

pub use animation::*;
