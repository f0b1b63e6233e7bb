//! Several digit views side by side, displaying one integer.
//!
//! Positions are stored least-significant first. The list grows as the
//! number needs more digits but never shrinks on its own: positions that are
//! no longer needed morph to the hidden placeholder and stay allocated until
//! [`NumberGroup::compact`] is called.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::view::{MorphSettings, NumberView};
use crate::animation::digit::SavedDigitState;
use crate::animation::{Easing, Geometry, TickOutcome};
use crate::error::MorphResult;
use crate::glyph::{Glyph, GlyphId, GlyphRegistry};

/// Outcome of a display update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeStatus {
    /// `digits` positions now carry the value (including padding)
    Shown { digits: usize },
    /// Nothing to show and no minimum to honour; every position is hidden
    SequenceEmpty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGroupState {
    pub number: Option<i64>,
    pub minimum_shown: usize,
    pub digits: Vec<SavedDigitState>,
}

/// Number of decimal digits in `n`; zero has one.
pub fn decimal_digit_count(n: u64) -> usize {
    n.checked_ilog10().map_or(1, |log| log as usize + 1)
}

/// Decimal digit of `n` at `position` (0 = ones).
pub fn digit_at(n: u64, position: usize) -> u8 {
    u32::try_from(position)
        .ok()
        .and_then(|p| 10u64.checked_pow(p))
        .map_or(0, |place| ((n / place) % 10) as u8)
}

/// Decimal digits of `number`, least significant first. The sign is dropped.
pub fn decompose(number: i64) -> Vec<u8> {
    let magnitude = number.unsigned_abs();
    (0..decimal_digit_count(magnitude))
        .map(|i| digit_at(magnitude, i))
        .collect()
}

/// Glyph for position `i` of a value needing `required` digits, shown over
/// `digit_count` positions.
fn slot_target(
    magnitude: Option<u64>,
    required: usize,
    digit_count: usize,
    zero_padding: bool,
    i: usize,
) -> GlyphId {
    match magnitude {
        Some(_) if i >= required && !zero_padding && i < digit_count => GlyphId::HIDDEN,
        Some(m) if i < digit_count => GlyphId::from_raw(i64::from(digit_at(m, i))),
        _ => GlyphId::HIDDEN,
    }
}

#[derive(Debug, Clone)]
pub struct NumberGroup {
    registry: Arc<GlyphRegistry>,
    settings: MorphSettings,
    scale: f64,
    /// Least significant first
    positions: Vec<NumberView>,
    /// `None` while hidden
    number: Option<i64>,
    minimum_shown: usize,
    /// Show leading zeros in positions kept only by `minimum_shown`
    zero_padding: bool,
    layout_requested: bool,
}

impl NumberGroup {
    pub fn new(registry: Arc<GlyphRegistry>) -> Self {
        Self::with_settings(registry, MorphSettings::default())
    }

    pub fn with_settings(registry: Arc<GlyphRegistry>, settings: MorphSettings) -> Self {
        Self {
            registry,
            settings,
            scale: 1.0,
            positions: Vec::new(),
            number: None,
            minimum_shown: 0,
            zero_padding: true,
            layout_requested: true,
        }
    }

    fn new_position(&self) -> MorphResult<NumberView> {
        let mut view = NumberView::with_settings(self.registry.clone(), self.settings);
        view.set_scale(self.scale)?;
        Ok(view)
    }

    fn grow_to(&mut self, len: usize) -> MorphResult<()> {
        while self.positions.len() < len {
            let view = self.new_position()?;
            self.positions.push(view);
        }
        Ok(())
    }

    // ── Display ───────────────────────────────────────────────────────

    pub fn show(&mut self, number: i64) -> MorphResult<ComposeStatus> {
        self.bind(Some(number), false)
    }

    pub fn show_immediate(&mut self, number: i64) -> MorphResult<ComposeStatus> {
        self.bind(Some(number), true)
    }

    pub fn hide(&mut self) -> MorphResult<ComposeStatus> {
        self.bind(None, false)
    }

    pub fn hide_immediate(&mut self) -> MorphResult<ComposeStatus> {
        self.bind(None, true)
    }

    /// Show the current value plus `delta` (saturating). A hidden group
    /// counts from zero.
    pub fn advance_by(&mut self, delta: i64) -> MorphResult<ComposeStatus> {
        let next = self.number.map_or(0, |n| n.saturating_add(delta));
        self.show(next)
    }

    pub fn advance_by_one(&mut self) -> MorphResult<ComposeStatus> {
        self.advance_by(1)
    }

    pub fn advance_by_one_immediate(&mut self) -> MorphResult<ComposeStatus> {
        let next = self.number.map_or(0, |n| n.saturating_add(1));
        self.show_immediate(next)
    }

    fn bind(&mut self, number: Option<i64>, immediate: bool) -> MorphResult<ComposeStatus> {
        let magnitude = number.map(i64::unsigned_abs);
        let required = magnitude.map_or(0, decimal_digit_count);
        let digit_count = required.max(self.minimum_shown);
        self.grow_to(digit_count)?;

        let zero_padding = self.zero_padding;
        for (i, view) in self.positions.iter_mut().enumerate() {
            let target = slot_target(magnitude, required, digit_count, zero_padding, i);
            if immediate {
                view.advance_immediate(target)?;
            } else {
                view.advance(target)?;
            }
        }

        debug!(?number, digit_count, positions = self.positions.len(), immediate, "group bound");
        self.number = number;
        self.layout_requested = true;

        Ok(if digit_count == 0 {
            ComposeStatus::SequenceEmpty
        } else {
            ComposeStatus::Shown {
                digits: digit_count,
            }
        })
    }

    /// Keep at least `minimum` positions, allocating hidden ones now.
    pub fn set_minimum_shown(&mut self, minimum: usize) -> MorphResult<()> {
        self.minimum_shown = minimum;
        self.grow_to(minimum)?;
        self.layout_requested = true;
        Ok(())
    }

    pub fn minimum_shown(&self) -> usize {
        self.minimum_shown
    }

    pub fn set_zero_padding(&mut self, zero_padding: bool) {
        self.zero_padding = zero_padding;
    }

    /// Drop positions beyond what the current value and minimum need.
    /// Returns how many were removed.
    pub fn compact(&mut self) -> usize {
        let required = self
            .number
            .map_or(0, |n| decimal_digit_count(n.unsigned_abs()))
            .max(self.minimum_shown);
        let removed = self.positions.len().saturating_sub(required);
        if removed > 0 {
            self.positions.truncate(required);
            self.layout_requested = true;
            debug!(removed, "group compacted");
        }
        removed
    }

    // ── Frame progression ─────────────────────────────────────────────

    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        self.positions
            .iter_mut()
            .map(|view| view.tick(now))
            .fold(TickOutcome::Idle, |acc, outcome| match (acc, outcome) {
                (TickOutcome::Completed, _) | (_, TickOutcome::Completed) => TickOutcome::Completed,
                (TickOutcome::Running, _) | (_, TickOutcome::Running) => TickOutcome::Running,
                _ => TickOutcome::Idle,
            })
    }

    pub fn is_animating(&self) -> bool {
        self.positions.iter().any(NumberView::is_animating)
    }

    pub fn take_layout_request(&mut self) -> bool {
        let mut requested = std::mem::take(&mut self.layout_requested);
        for view in &mut self.positions {
            requested |= view.take_layout_request();
        }
        requested
    }

    pub fn take_redraw(&mut self) -> bool {
        let mut redraw = false;
        for view in &mut self.positions {
            redraw |= view.take_redraw();
        }
        redraw
    }

    // ── Queries ───────────────────────────────────────────────────────

    pub fn number(&self) -> Option<i64> {
        self.number
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Views, least significant first.
    pub fn positions(&self) -> &[NumberView] {
        &self.positions
    }

    pub fn position(&self, index: usize) -> Option<&NumberView> {
        self.positions.get(index)
    }

    pub fn render_geometry(&self, index: usize) -> Option<Geometry> {
        self.position(index).map(NumberView::render_geometry)
    }

    pub fn current_digit(&self, index: usize) -> Option<GlyphId> {
        self.position(index).map(NumberView::current_digit)
    }

    /// Per-position geometry paired with its x offset, most significant
    /// (leftmost) first.
    pub fn layout(&self) -> Vec<(f64, Geometry)> {
        let mut x = 0.0;
        self.positions
            .iter()
            .rev()
            .map(|view| {
                let placed = (x, view.render_geometry());
                x += view.width();
                placed
            })
            .collect()
    }

    /// Total `(width, height)` in render units.
    pub fn size(&self) -> (f64, f64) {
        let width = self.positions.iter().map(NumberView::width).sum();
        let height = self
            .positions
            .iter()
            .map(NumberView::height)
            .fold(0.0, f64::max);
        (width, height)
    }

    // ── Settings ──────────────────────────────────────────────────────

    pub fn set_scale(&mut self, scale: f64) -> MorphResult<()> {
        // Validate once up front so a bad value leaves every view untouched.
        crate::animation::Scale::new(scale)?;
        for view in &mut self.positions {
            view.set_scale(scale)?;
        }
        self.scale = scale;
        self.layout_requested = true;
        Ok(())
    }

    pub fn set_text_size(&mut self, size: f64) -> MorphResult<()> {
        self.set_scale(size / crate::glyph::DEFAULT_HEIGHT)
    }

    pub fn settings(&self) -> MorphSettings {
        self.settings
    }

    pub fn set_settings(&mut self, settings: MorphSettings) {
        self.settings = settings;
        for view in &mut self.positions {
            view.set_settings(settings);
        }
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.set_settings(MorphSettings {
            easing,
            ..self.settings
        });
    }

    /// Override a glyph outline for every position of this group.
    pub fn register_glyph(&mut self, id: GlyphId, glyph: Glyph) -> MorphResult<Option<Glyph>> {
        let previous = Arc::make_mut(&mut self.registry).register(id, glyph)?;
        for view in &mut self.positions {
            view.set_registry(self.registry.clone())?;
        }
        Ok(previous)
    }

    // ── Saved state ───────────────────────────────────────────────────

    pub fn save(&self) -> SavedGroupState {
        SavedGroupState {
            number: self.number,
            minimum_shown: self.minimum_shown,
            digits: self.positions.iter().map(NumberView::save).collect(),
        }
    }

    /// Rebuild positions from a snapshot; the value is shown without
    /// animation.
    ///
    /// All or nothing: a snapshot holding an unknown glyph is rejected with
    /// the group untouched. Positions the snapshot is missing are filled
    /// from `number`.
    pub fn restore(&mut self, state: &SavedGroupState) -> MorphResult<()> {
        let magnitude = state.number.map(i64::unsigned_abs);
        let required = magnitude.map_or(0, decimal_digit_count);
        let digit_count = required.max(state.minimum_shown);

        let mut positions = Vec::with_capacity(digit_count.max(state.digits.len()));
        for saved in &state.digits {
            let mut view = self.new_position()?;
            view.restore(*saved)?;
            positions.push(view);
        }
        for i in positions.len()..digit_count {
            let mut view = self.new_position()?;
            view.advance_immediate(slot_target(
                magnitude,
                required,
                digit_count,
                self.zero_padding,
                i,
            ))?;
            positions.push(view);
        }
        if positions.len() > state.digits.len() {
            debug!(
                saved = state.digits.len(),
                restored = positions.len(),
                "short snapshot padded"
            );
        }

        self.positions = positions;
        self.minimum_shown = state.minimum_shown;
        self.number = state.number;
        self.layout_requested = true;
        Ok(())
    }
}
