//! Hand-drawn digits that morph into each other.
//!
//! Each digit is a closed outline of four cubic Bézier segments. Changing
//! the shown value interpolates every control point from the old outline to
//! the new one over a short, eased transition.
//!
//! - [`glyph`] holds the built-in outlines and the override registry.
//! - [`animation`] is the morph engine, easing curves and the per-digit
//!   state machine.
//! - [`widget`] wraps those into a single digit ([`NumberView`]) and a row
//!   of digits showing one integer ([`NumberGroup`]).

pub mod animation;
pub mod error;
pub mod glyph;
pub mod widget;

pub use animation::{Easing, FractionPolicy, Geometry, RelayoutPolicy};
pub use error::{MorphError, MorphResult};
pub use glyph::{Glyph, GlyphId, GlyphRegistry};
pub use widget::{ComposeStatus, MorphSettings, NumberGroup, NumberView};
