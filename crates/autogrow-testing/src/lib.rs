//! Testing utilities and harness for autogrow

pub mod measurers;
pub mod testing;

pub use measurers::{FnMeasurer, ScriptedMeasurer};
pub use testing::*;

pub mod prelude {
    pub use crate::measurers::{FnMeasurer, ScriptedMeasurer};
    pub use crate::testing::*;
}
