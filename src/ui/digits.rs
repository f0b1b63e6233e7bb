//! Draws morphing digits onto a braille canvas.
//!
//! Geometry comes from the widgets in render units with y growing downward;
//! the canvas uses one unit per braille dot with y growing upward, so every
//! outline is flipped about the row's top edge.

use kurbo::{Affine, Point};
use morphclock::glyph::ASPECT_RATIO;
use morphclock::{Geometry, NumberGroup, NumberView};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Line};
use ratatui::widgets::{Block, Widget};

/// Width of a `:` separator relative to the text size.
const COLON_RATIO: f64 = 0.35;

/// Flattening tolerance in dots.
const TOLERANCE: f64 = 0.25;

/// Smallest text size handed to the widgets.
const MIN_TEXT_SIZE: f64 = 8.0;

/// Outlines at least this tall get a second, offset stroke.
const THICK_STROKE_AT: f64 = 48.0;

/// Largest text size at which `digits` glyphs and `separators` colons fit
/// into a `dots_w` x `dots_h` dot grid, leaving a margin.
pub fn fit_text_size(dots_w: f64, dots_h: f64, digits: usize, separators: usize) -> f64 {
    let units = digits as f64 * ASPECT_RATIO + separators as f64 * COLON_RATIO;
    let by_height = dots_h * 0.8;
    let size = if units > 0.0 {
        by_height.min(dots_w * 0.9 / units)
    } else {
        by_height
    };
    size.max(MIN_TEXT_SIZE)
}

#[derive(Debug, Clone, Copy)]
struct Placed {
    x: f64,
    geometry: Geometry,
    moving: bool,
}

/// A row of digit outlines, optionally with `:` separators.
pub struct DigitCanvas<'a> {
    placed: Vec<Placed>,
    /// Centre x of each separator
    colons: Vec<f64>,
    width: f64,
    height: f64,
    color: Color,
    moving_color: Color,
    block: Option<Block<'a>>,
}

impl<'a> DigitCanvas<'a> {
    /// Independent views left to right, with a colon after each index in
    /// `colon_after`.
    pub fn from_views(views: &[NumberView], colon_after: &[usize]) -> Self {
        let height = views.iter().map(NumberView::height).fold(0.0, f64::max);
        let colon_w = height * COLON_RATIO;
        let mut placed = Vec::with_capacity(views.len());
        let mut colons = Vec::new();
        let mut x = 0.0;
        for (i, view) in views.iter().enumerate() {
            placed.push(Placed {
                x,
                geometry: view.render_geometry(),
                moving: view.is_animating(),
            });
            x += view.width();
            if colon_after.contains(&i) {
                colons.push(x + colon_w / 2.0);
                x += colon_w;
            }
        }
        Self::new(placed, colons, x, height)
    }

    /// Every position of `group`, most significant on the left.
    pub fn from_group(group: &NumberGroup) -> Self {
        let placed = group
            .layout()
            .into_iter()
            .zip(group.positions().iter().rev())
            .map(|((x, geometry), view)| Placed {
                x,
                geometry,
                moving: view.is_animating(),
            })
            .collect();
        let (width, height) = group.size();
        Self::new(placed, Vec::new(), width, height)
    }

    fn new(placed: Vec<Placed>, colons: Vec<f64>, width: f64, height: f64) -> Self {
        Self {
            placed,
            colons,
            width,
            height,
            color: Color::White,
            moving_color: Color::White,
            block: None,
        }
    }

    pub fn colors(mut self, color: Color, moving_color: Color) -> Self {
        self.color = color;
        self.moving_color = moving_color;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Line segments in canvas coordinates, paired with their color.
    fn segments(&self, dots_w: f64, dots_h: f64) -> Vec<(Point, Point, Color)> {
        let left = (dots_w - self.width) / 2.0;
        let top = dots_h - (dots_h - self.height) / 2.0;
        let thick = self.height >= THICK_STROKE_AT;

        let mut out = Vec::new();
        for placed in &self.placed {
            let color = if placed.moving {
                self.moving_color
            } else {
                self.color
            };
            let flip = Affine::new([1.0, 0.0, 0.0, -1.0, left + placed.x, top]);
            for (a, b) in placed.geometry.line_segments(flip, TOLERANCE) {
                out.push((a, b, color));
                if thick {
                    let nudge = kurbo::Vec2::new(1.0, 0.0);
                    out.push((a + nudge, b + nudge, color));
                }
            }
        }
        out
    }
}

impl Widget for DigitCanvas<'_> {
    fn render(mut self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block.take() {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if inner.is_empty() {
            return;
        }

        let dots_w = f64::from(inner.width) * 2.0;
        let dots_h = f64::from(inner.height) * 4.0;
        let segments = self.segments(dots_w, dots_h);

        let left = (dots_w - self.width) / 2.0;
        let top = dots_h - (dots_h - self.height) / 2.0;
        let radius = (self.height * 0.03).max(0.5);
        let colons: Vec<Circle> = self
            .colons
            .iter()
            .flat_map(|cx| {
                [0.35, 0.7].map(|at| Circle {
                    x: left + cx,
                    y: top - self.height * at,
                    radius,
                    color: self.color,
                })
            })
            .collect();

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, dots_w])
            .y_bounds([0.0, dots_h])
            .paint(|ctx| {
                for (a, b, color) in &segments {
                    ctx.draw(&Line::new(a.x, a.y, b.x, b.y, *color));
                }
                for colon in &colons {
                    ctx.draw(colon);
                }
            })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use morphclock::GlyphRegistry;

    use super::*;

    fn views(digits: &[i64]) -> Vec<NumberView> {
        let registry = Arc::new(GlyphRegistry::standard());
        digits
            .iter()
            .map(|d| {
                let mut v = NumberView::new(registry.clone());
                v.advance_digit_immediate(*d).unwrap();
                v.set_text_size(40.0).unwrap();
                v
            })
            .collect()
    }

    fn braille_cells(buf: &Buffer) -> usize {
        buf.content()
            .iter()
            .filter(|c| c.symbol().chars().any(|ch| ('\u{2801}'..='\u{28FF}').contains(&ch)))
            .count()
    }

    #[test]
    fn fit_is_bounded_by_height_and_width() {
        // Tall and narrow: width-bound.
        let narrow = fit_text_size(28.0, 400.0, 4, 0);
        assert!((narrow - 28.0 * 0.9 / 2.8).abs() < 1e-9);
        // Wide and short: height-bound.
        assert!((fit_text_size(10_000.0, 100.0, 4, 1) - 80.0).abs() < 1e-9);
        assert_eq!(fit_text_size(0.0, 0.0, 4, 1), MIN_TEXT_SIZE);
    }

    #[test]
    fn colons_widen_the_row() {
        let v = views(&[1, 2, 3, 4]);
        let plain = DigitCanvas::from_views(&v, &[]);
        let clock = DigitCanvas::from_views(&v, &[1]);
        assert_eq!(clock.colons.len(), 1);
        assert!((clock.width - plain.width - 40.0 * COLON_RATIO).abs() < 1e-9);
    }

    #[test]
    fn outlines_are_flipped_into_the_grid() {
        let v = views(&[7]);
        let canvas = DigitCanvas::from_views(&v, &[]);
        let segments = canvas.segments(100.0, 100.0);
        assert!(!segments.is_empty());
        for (a, b, _) in segments {
            for p in [a, b] {
                assert!(p.y >= 29.0 && p.y <= 71.0, "{p:?}");
                assert!(p.x >= 0.0 && p.x <= 100.0, "{p:?}");
            }
        }
    }

    #[test]
    fn renders_braille_into_a_buffer() {
        let v = views(&[8, 0]);
        let mut buf = Buffer::empty(Rect::new(0, 0, 30, 12));
        DigitCanvas::from_views(&v, &[])
            .colors(Color::White, Color::Cyan)
            .render(buf.area, &mut buf);
        assert!(braille_cells(&buf) > 10);
    }

    #[test]
    fn hidden_group_draws_nothing() {
        let mut group = NumberGroup::new(Arc::new(GlyphRegistry::standard()));
        group.show_immediate(5).unwrap();
        group.hide_immediate().unwrap();
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 10));
        DigitCanvas::from_group(&group).render(buf.area, &mut buf);
        assert_eq!(braille_cells(&buf), 0);
    }
}
