//! A single morphing digit with its own scale and layout bookkeeping.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::animation::digit::{SavedDigitState, DEFAULT_DURATION};
use crate::animation::{
    interpolate, AnimationPhase, DigitAnimation, DigitSequence, Easing, FractionPolicy, Geometry,
    RelayoutPolicy, Scale, TickOutcome,
};
use crate::error::MorphResult;
use crate::glyph::{Glyph, GlyphId, GlyphRegistry, DEFAULT_HEIGHT};

/// Timing and policy knobs shared by every digit of a widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphSettings {
    pub duration: Duration,
    pub easing: Easing,
    pub fraction_policy: FractionPolicy,
    pub relayout: RelayoutPolicy,
}

impl Default for MorphSettings {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            easing: Easing::default(),
            fraction_policy: FractionPolicy::default(),
            relayout: RelayoutPolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NumberView {
    animation: DigitAnimation,
    settings: MorphSettings,
    scale: Scale,
    /// Width last handed to the host's layout, in render units
    width: f64,
    /// Unit-scale width behind `width`
    measured: f64,
    layout_requested: bool,
}

impl NumberView {
    /// A view showing the hidden placeholder.
    pub fn new(registry: Arc<GlyphRegistry>) -> Self {
        Self::with_settings(registry, MorphSettings::default())
    }

    pub fn with_settings(registry: Arc<GlyphRegistry>, settings: MorphSettings) -> Self {
        let mut animation = DigitAnimation::hidden(registry);
        animation.set_duration(settings.duration);
        let mut view = Self {
            animation,
            settings,
            scale: Scale::default(),
            width: 0.0,
            measured: 0.0,
            layout_requested: true,
        };
        view.measured = view.canonical_geometry().width;
        view.width = view.layout_width();
        view
    }

    // ── Advancing ─────────────────────────────────────────────────────

    pub fn advance(&mut self, target: GlyphId) -> MorphResult<()> {
        self.animation.advance(target)
    }

    pub fn advance_immediate(&mut self, target: GlyphId) -> MorphResult<()> {
        self.animation.advance_immediate(target)?;
        self.refresh_width(true);
        Ok(())
    }

    /// Animate to a concrete digit, rejecting values outside 0-9.
    pub fn advance_digit(&mut self, n: i64) -> MorphResult<()> {
        self.advance(GlyphId::digit(n)?)
    }

    pub fn advance_digit_immediate(&mut self, n: i64) -> MorphResult<()> {
        self.advance_immediate(GlyphId::digit(n)?)
    }

    /// Animate to the digit after the current one (9 wraps to 0).
    pub fn advance_next(&mut self) -> MorphResult<()> {
        self.animation.advance_next()
    }

    pub fn advance_next_immediate(&mut self) -> MorphResult<()> {
        self.animation.advance_next_immediate()?;
        self.refresh_width(true);
        Ok(())
    }

    pub fn hide(&mut self) -> MorphResult<()> {
        self.advance(GlyphId::HIDDEN)
    }

    pub fn hide_immediate(&mut self) -> MorphResult<()> {
        self.advance_immediate(GlyphId::HIDDEN)
    }

    pub fn set_sequence(&mut self, sequence: DigitSequence) {
        self.animation.set_sequence(sequence);
    }

    pub fn set_auto_advance(&mut self, hold: Option<Duration>) {
        self.animation.set_auto_advance(hold);
    }

    /// Drive the animation to `now` and update the layout width.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let outcome = self.animation.tick(now);
        if outcome != TickOutcome::Idle {
            self.refresh_width(outcome == TickOutcome::Completed);
        }
        outcome
    }

    // ── Rendering ─────────────────────────────────────────────────────

    /// The eased, policy-resolved fraction used for the current frame.
    pub fn eased_fraction(&self) -> f64 {
        match self.animation.phase() {
            AnimationPhase::Idle => 0.0,
            AnimationPhase::Transitioning => {
                let eased = self.settings.easing.apply(self.animation.progress());
                self.settings.fraction_policy.resolve(eased)
            }
        }
    }

    /// Interpolated outline at unit scale.
    pub fn canonical_geometry(&self) -> Geometry {
        interpolate(
            self.animation.current_glyph(),
            self.animation.next_glyph(),
            self.eased_fraction(),
        )
    }

    /// Interpolated, scaled outline for the current frame. Stateless: safe
    /// to call any number of times per frame.
    pub fn render_geometry(&self) -> Geometry {
        self.scale.apply(&self.canonical_geometry())
    }

    fn layout_width(&self) -> f64 {
        self.scale.length(self.measured).max(1.0)
    }

    fn refresh_width(&mut self, landed: bool) {
        let allowed = match self.settings.relayout {
            RelayoutPolicy::EveryFrame => true,
            RelayoutPolicy::OnCompletion => {
                landed || self.animation.phase() == AnimationPhase::Idle
            }
        };
        if !allowed {
            return;
        }
        self.measured = self.canonical_geometry().width;
        let width = self.layout_width();
        if !fequals(width, self.width) {
            trace!(from = self.width, to = width, "width changed");
            self.width = width;
            self.layout_requested = true;
        }
    }

    // ── Layout ────────────────────────────────────────────────────────

    /// `(width, height)` in render units.
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height())
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.scale.length(DEFAULT_HEIGHT)
    }

    pub fn scale(&self) -> f64 {
        self.scale.get()
    }

    /// Set the absolute render scale.
    pub fn set_scale(&mut self, scale: f64) -> MorphResult<()> {
        if self.scale.set(scale)?.is_some() {
            self.width = self.layout_width();
            self.layout_requested = true;
            self.refresh_width(false);
        }
        Ok(())
    }

    /// Scale so the glyph is `size` render units tall.
    pub fn set_text_size(&mut self, size: f64) -> MorphResult<()> {
        self.set_scale(size / DEFAULT_HEIGHT)
    }

    pub fn text_size(&self) -> f64 {
        self.height()
    }

    /// Returns and clears the "please re-measure" flag.
    pub fn take_layout_request(&mut self) -> bool {
        std::mem::take(&mut self.layout_requested)
    }

    pub fn take_redraw(&mut self) -> bool {
        self.animation.take_redraw()
    }

    // ── Settings & state ──────────────────────────────────────────────

    pub fn settings(&self) -> MorphSettings {
        self.settings
    }

    pub fn set_settings(&mut self, settings: MorphSettings) {
        self.settings = settings;
        self.animation.set_duration(settings.duration);
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.settings.easing = easing;
    }

    pub fn set_registry(&mut self, registry: Arc<GlyphRegistry>) -> MorphResult<()> {
        self.animation.set_registry(registry)?;
        self.refresh_width(false);
        Ok(())
    }

    pub fn animation(&self) -> &DigitAnimation {
        &self.animation
    }

    pub fn current_digit(&self) -> GlyphId {
        self.animation.current_digit()
    }

    pub fn current_glyph(&self) -> &Glyph {
        self.animation.current_glyph()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_animating()
    }

    pub fn save(&self) -> SavedDigitState {
        self.animation.save()
    }

    pub fn restore(&mut self, state: SavedDigitState) -> MorphResult<()> {
        self.animation.restore(state)?;
        self.refresh_width(true);
        Ok(())
    }
}

/// Equal within one unit in the last place of the larger operand.
fn fequals(a: f64, b: f64) -> bool {
    (a - b).abs() <= f64::EPSILON * a.abs().max(b.abs())
}
