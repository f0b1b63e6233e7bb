//! The morph engine: point-by-point blending of two glyph outlines.

use kurbo::{Affine, BezPath, PathEl, Point};

use super::{lerp, lerp_point};
use crate::glyph::{Glyph, ANCHOR_COUNT, SEGMENT_COUNT};

/// Renderable outline: one start anchor plus four cubic segments, and the
/// width the outline occupies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub anchors: [Point; ANCHOR_COUNT],
    pub controls1: [Point; SEGMENT_COUNT],
    pub controls2: [Point; SEGMENT_COUNT],
    pub width: f64,
}

impl From<&Glyph> for Geometry {
    fn from(glyph: &Glyph) -> Self {
        Self {
            anchors: glyph.anchors,
            controls1: glyph.controls1,
            controls2: glyph.controls2,
            width: glyph.width,
        }
    }
}

impl Geometry {
    /// Uniformly scale every coordinate and the width about the origin.
    pub fn scaled(&self, factor: f64) -> Self {
        let s = |p: Point| Point::new(p.x * factor, p.y * factor);
        Self {
            anchors: self.anchors.map(s),
            controls1: self.controls1.map(s),
            controls2: self.controls2.map(s),
            width: self.width * factor,
        }
    }

    /// The outline as a kurbo path: `move_to` the first anchor, then one
    /// `curve_to` per segment.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.anchors[0]);
        for i in 0..SEGMENT_COUNT {
            path.curve_to(self.controls1[i], self.controls2[i], self.anchors[i + 1]);
        }
        path
    }

    /// Flatten the outline into polyline segments after applying `transform`.
    ///
    /// Zero-length outlines (the hidden glyph) yield no segments.
    pub fn line_segments(&self, transform: Affine, tolerance: f64) -> Vec<(Point, Point)> {
        let path = transform * self.to_bez_path();
        let mut segments = Vec::new();
        let mut last = None;
        kurbo::flatten(path.iter(), tolerance, |el| match el {
            PathEl::MoveTo(p) => last = Some(p),
            PathEl::LineTo(p) => {
                if let Some(from) = last {
                    if from != p && p.is_finite() && from.is_finite() {
                        segments.push((from, p));
                    }
                }
                last = Some(p);
            }
            _ => {}
        });
        segments
    }
}

/// Blend `from` toward `to` by the (already eased) fraction `t`.
///
/// Every anchor, both control points of every segment, and the width are
/// interpolated independently. `t` is not clamped.
pub fn interpolate(from: &Glyph, to: &Glyph, t: f64) -> Geometry {
    let blend = |a: &[Point], b: &[Point], i: usize| lerp_point(a[i], b[i], t);
    Geometry {
        anchors: std::array::from_fn(|i| blend(&from.anchors, &to.anchors, i)),
        controls1: std::array::from_fn(|i| blend(&from.controls1, &to.controls1, i)),
        controls2: std::array::from_fn(|i| blend(&from.controls2, &to.controls2, i)),
        width: lerp(from.width, to.width, t),
    }
}
