//! Host-facing widgets: a single digit and a row of digits.

pub mod group;
pub mod view;

pub use group::{ComposeStatus, NumberGroup, SavedGroupState};
pub use view::{MorphSettings, NumberView};
