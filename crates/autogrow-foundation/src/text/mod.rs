//! Text input building blocks: the editable surface, placeholder tracking
//! and the auto-grow height policy.

mod height;
mod line_limits;
mod placeholder;
mod state;

pub use height::{resolve, HeightBounds, HeightResolution, HeightTracker};
pub use line_limits::LineLimits;
pub use placeholder::{PlaceholderController, PlaceholderStyle};
pub use state::{TextChange, TextChangeSubscription, TextFieldState};
