//! Built-in outlines for the ten digits and the hidden placeholder.
//!
//! Coordinates are in glyph units: x grows right, y grows down, and the
//! design box is `DEFAULT_WIDTH` x `DEFAULT_HEIGHT`.

use kurbo::Point;

use super::{Glyph, GlyphId, DEFAULT_HEIGHT, DEFAULT_WIDTH};

const fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

const fn digit(
    n: i64,
    anchors: [Point; 5],
    controls1: [Point; 4],
    controls2: [Point; 4],
    width: f64,
) -> Glyph {
    Glyph {
        id: GlyphId::from_raw(n),
        anchors,
        controls1,
        controls2,
        width,
    }
}

pub const ZERO: Glyph = digit(
    0,
    [p(14.5, 100.0), p(70.0, 18.0), p(126.0, 100.0), p(70.0, 180.0), p(14.5, 100.0)],
    [p(14.5, 60.0), p(103.0, 18.0), p(126.0, 140.0), p(37.0, 180.0)],
    [p(37.0, 18.0), p(126.0, 60.0), p(103.0, 180.0), p(14.5, 140.0)],
    DEFAULT_WIDTH,
);

// Narrow: the stroke collapses onto its last anchor after the flag.
pub const ONE: Glyph = digit(
    1,
    [p(15.0, 20.5), p(42.5, 20.5), p(42.5, 181.0), p(42.5, 181.0), p(42.5, 181.0)],
    [p(15.0, 20.5), p(42.5, 20.5), p(42.5, 181.0), p(42.5, 181.0)],
    [p(15.0, 20.5), p(42.5, 20.5), p(42.5, 181.0), p(42.5, 181.0)],
    DEFAULT_WIDTH / 2.0,
);

pub const TWO: Glyph = digit(
    2,
    [p(26.0, 60.0), p(114.5, 61.0), p(78.0, 122.0), p(27.0, 177.0), p(117.0, 177.0)],
    [p(29.0, 2.0), p(114.5, 78.0), p(64.0, 138.0), p(27.0, 177.0)],
    [p(113.0, 4.0), p(100.0, 98.0), p(44.0, 155.0), p(117.0, 177.0)],
    DEFAULT_WIDTH,
);

pub const THREE: Glyph = digit(
    3,
    [p(33.25, 54.0), p(69.5, 18.0), p(69.5, 96.0), p(70.0, 180.0), p(26.5, 143.0)],
    [p(33.0, 27.0), p(126.0, 18.0), p(128.0, 96.0), p(24.0, 180.0)],
    [p(56.0, 18.0), p(116.0, 96.0), p(120.0, 180.0), p(26.0, 150.0)],
    DEFAULT_WIDTH,
);

pub const FOUR: Glyph = digit(
    4,
    [p(125.0, 146.0), p(13.0, 146.0), p(99.0, 25.0), p(99.0, 146.0), p(99.0, 179.0)],
    [p(125.0, 146.0), p(13.0, 146.0), p(99.0, 25.0), p(99.0, 146.0)],
    [p(13.0, 146.0), p(99.0, 25.0), p(99.0, 146.0), p(99.0, 179.0)],
    DEFAULT_WIDTH,
);

pub const FIVE: Glyph = digit(
    5,
    [p(116.0, 20.0), p(61.0, 20.0), p(42.0, 78.0), p(115.0, 129.0), p(15.0, 154.0)],
    [p(61.0, 20.0), p(42.0, 78.0), p(67.0, 66.0), p(110.0, 183.0)],
    [p(61.0, 20.0), p(42.0, 78.0), p(115.0, 85.0), p(38.0, 198.0)],
    DEFAULT_WIDTH,
);

pub const SIX: Glyph = digit(
    6,
    [p(80.0, 20.0), p(80.0, 20.0), p(16.0, 126.0), p(123.0, 126.0), p(23.0, 100.0)],
    [p(80.0, 20.0), p(41.0, 79.0), p(22.0, 208.0), p(116.0, 66.0)],
    [p(80.0, 20.0), p(18.0, 92.0), p(128.0, 192.0), p(46.0, 64.0)],
    DEFAULT_WIDTH,
);

pub const SEVEN: Glyph = digit(
    7,
    [p(17.0, 21.0), p(128.0, 21.0), p(90.67, 73.34), p(53.34, 126.67), p(16.0, 181.0)],
    [p(17.0, 21.0), p(128.0, 21.0), p(90.67, 73.34), p(53.34, 126.67)],
    [p(128.0, 21.0), p(90.67, 73.34), p(53.34, 126.67), p(16.0, 181.0)],
    DEFAULT_WIDTH,
);

pub const EIGHT: Glyph = digit(
    8,
    [p(71.0, 96.0), p(71.0, 19.0), p(71.0, 96.0), p(71.0, 179.0), p(71.0, 96.0)],
    [p(14.0, 95.0), p(124.0, 19.0), p(14.0, 96.0), p(124.0, 179.0)],
    [p(14.0, 19.0), p(124.0, 96.0), p(6.0, 179.0), p(124.0, 96.0)],
    DEFAULT_WIDTH,
);

pub const NINE: Glyph = digit(
    9,
    [p(117.0, 100.0), p(17.0, 74.0), p(124.0, 74.0), p(60.0, 180.0), p(60.0, 180.0)],
    [p(94.0, 136.0), p(12.0, 8.0), p(122.0, 108.0), p(60.0, 180.0)],
    [p(24.0, 134.0), p(118.0, -8.0), p(99.0, 121.0), p(60.0, 180.0)],
    DEFAULT_WIDTH,
);

/// Collapsed to a single point left of centre, one unit wide.
pub const HIDDEN: Glyph = Glyph::degenerate(
    GlyphId::HIDDEN,
    Point::new(DEFAULT_WIDTH / 8.0, DEFAULT_HEIGHT / 2.0),
    1.0,
);

/// All built-in glyphs, digits in order followed by the placeholder.
pub const BUILTIN: [Glyph; 11] = [
    ZERO, ONE, TWO, THREE, FOUR, FIVE, SIX, SEVEN, EIGHT, NINE, HIDDEN,
];

/// Built-in outline for `id`, if it is one of the eleven known identities.
pub fn lookup(id: GlyphId) -> Option<Glyph> {
    match id.as_digit() {
        Some(d) => Some(BUILTIN[d as usize]),
        None if id.is_hidden() => Some(HIDDEN),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ids_match_their_slot() {
        for (i, glyph) in BUILTIN.iter().take(10).enumerate() {
            assert_eq!(glyph.id.as_digit(), Some(i as u8));
        }
        assert!(BUILTIN[10].id.is_hidden());
    }

    #[test]
    fn lookup_covers_all_known_ids() {
        for n in 0..=9 {
            let id = GlyphId::from_raw(n);
            assert_eq!(lookup(id).map(|g| g.id), Some(id));
        }
        assert_eq!(lookup(GlyphId::HIDDEN), Some(HIDDEN));
        assert_eq!(lookup(GlyphId::from_raw(10)), None);
        assert_eq!(lookup(GlyphId::from_raw(-2)), None);
    }

    #[test]
    fn one_is_half_width_and_hidden_is_a_sliver() {
        assert_eq!(ONE.width, DEFAULT_WIDTH / 2.0);
        assert_eq!(HIDDEN.width, 1.0);
        assert!(HIDDEN.points().all(|p| p == Point::new(17.5, 100.0)));
    }

    #[test]
    fn digits_fit_roughly_inside_the_design_box() {
        // Control points may overshoot a little; anchors must not.
        for glyph in &BUILTIN[..10] {
            for a in glyph.anchors {
                assert!((0.0..=DEFAULT_WIDTH).contains(&a.x), "{}: {a:?}", glyph.id);
                assert!((0.0..=DEFAULT_HEIGHT).contains(&a.y), "{}: {a:?}", glyph.id);
            }
        }
    }
}
