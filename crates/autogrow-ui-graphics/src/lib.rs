//! Pure geometry and typography data for autogrow.
//!
//! Nothing here knows about widgets or the runtime; these are the value types
//! exchanged between the measurer, the layout policies and the host.

mod geometry;
mod typography;

pub use geometry::*;
pub use typography::*;

pub mod prelude {
    pub use crate::geometry::{EdgeInsets, Point, Rect, Size};
    pub use crate::typography::FontSpec;
}
