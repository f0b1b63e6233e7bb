//! Glyph data model: fixed-topology digit outlines.
//!
//! Every glyph is one start anchor followed by four cubic Bézier segments.
//! Segment `i` runs from `anchors[i]` to `anchors[i + 1]` through
//! `controls1[i]` and `controls2[i]`. Because all glyphs share this topology,
//! any two of them can be morphed point-by-point.

pub mod registry;
pub mod table;

use std::fmt;

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::error::{MorphError, MorphResult};

pub use registry::GlyphRegistry;

/// Nominal glyph width at unit scale. "8" and friends are this wide.
pub const DEFAULT_WIDTH: f64 = 140.0;

/// Nominal glyph height at unit scale.
pub const DEFAULT_HEIGHT: f64 = 200.0;

pub const ASPECT_RATIO: f64 = DEFAULT_WIDTH / DEFAULT_HEIGHT;

/// On-curve points per glyph.
pub const ANCHOR_COUNT: usize = 5;

/// Cubic segments per glyph.
pub const SEGMENT_COUNT: usize = ANCHOR_COUNT - 1;

/// Identity of a renderable glyph: a digit 0-9 or the hidden placeholder.
///
/// Arbitrary raw values can be wrapped with [`GlyphId::from_raw`]; whether
/// they resolve is up to the [`GlyphRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlyphId(i64);

impl GlyphId {
    /// The empty glyph, drawn as nothing visible.
    pub const HIDDEN: Self = Self(-1);

    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Identity for a concrete digit, rejecting anything outside 0-9.
    pub fn digit(n: i64) -> MorphResult<Self> {
        if (0..=9).contains(&n) {
            Ok(Self(n))
        } else {
            Err(MorphError::InvalidDigit(n))
        }
    }

    pub const fn raw(self) -> i64 {
        self.0
    }

    pub fn as_digit(self) -> Option<u8> {
        (0..=9).contains(&self.0).then_some(self.0 as u8)
    }

    pub const fn is_hidden(self) -> bool {
        self.0 == Self::HIDDEN.0
    }

    /// True for the eleven identities a registry accepts.
    pub fn is_known(self) -> bool {
        self.is_hidden() || self.as_digit().is_some()
    }
}

impl fmt::Display for GlyphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_digit() {
            Some(d) => write!(f, "{d}"),
            None if self.is_hidden() => f.write_str("hidden"),
            None => write!(f, "#{}", self.0),
        }
    }
}

/// Immutable outline of one glyph at unit scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub id: GlyphId,
    pub anchors: [Point; ANCHOR_COUNT],
    pub controls1: [Point; SEGMENT_COUNT],
    pub controls2: [Point; SEGMENT_COUNT],
    /// Horizontal extent the glyph is designed to occupy
    pub width: f64,
}

impl Glyph {
    /// A glyph whose every point sits on `at`: zero-length paths that still
    /// take part in interpolation.
    pub const fn degenerate(id: GlyphId, at: Point, width: f64) -> Self {
        Self {
            id,
            anchors: [at; ANCHOR_COUNT],
            controls1: [at; SEGMENT_COUNT],
            controls2: [at; SEGMENT_COUNT],
            width,
        }
    }

    /// Copy of this outline registered under another identity.
    pub fn with_id(mut self, id: GlyphId) -> Self {
        self.id = id;
        self
    }

    /// Iterate every point of the outline in a fixed order
    /// (anchors, then first controls, then second controls).
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.anchors
            .iter()
            .chain(self.controls1.iter())
            .chain(self.controls2.iter())
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_ids_validate_range() {
        assert_eq!(GlyphId::digit(0).unwrap().as_digit(), Some(0));
        assert_eq!(GlyphId::digit(9).unwrap().as_digit(), Some(9));
        assert!(matches!(GlyphId::digit(10), Err(MorphError::InvalidDigit(10))));
        assert!(matches!(GlyphId::digit(-1), Err(MorphError::InvalidDigit(-1))));
    }

    #[test]
    fn hidden_is_known_but_not_a_digit() {
        assert!(GlyphId::HIDDEN.is_known());
        assert!(GlyphId::HIDDEN.is_hidden());
        assert_eq!(GlyphId::HIDDEN.as_digit(), None);
        assert!(!GlyphId::from_raw(42).is_known());
    }

    #[test]
    fn display_names() {
        assert_eq!(GlyphId::from_raw(7).to_string(), "7");
        assert_eq!(GlyphId::HIDDEN.to_string(), "hidden");
        assert_eq!(GlyphId::from_raw(12).to_string(), "#12");
    }

    #[test]
    fn degenerate_glyph_points_coincide() {
        let at = Point::new(3.0, 4.0);
        let glyph = Glyph::degenerate(GlyphId::HIDDEN, at, 1.0);
        assert_eq!(glyph.points().count(), ANCHOR_COUNT + 2 * SEGMENT_COUNT);
        assert!(glyph.points().all(|p| p == at));
    }
}
