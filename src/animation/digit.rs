//! Per-position animation state: which glyph is shown, which one it is
//! morphing toward, and what to do next.
//!
//! Progress is derived from wall-clock time passed to [`DigitAnimation::tick`],
//! not from the number of ticks, so a digit that receives no ticks for a
//! while simply catches up (capped at the end of the transition) when ticks
//! resume.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::MorphResult;
use crate::glyph::{Glyph, GlyphId, GlyphRegistry};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    /// Showing `current`, nothing in flight
    Idle,
    /// Morphing from `current` to `next`
    Transitioning,
}

/// Result of a single [`DigitAnimation::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing moved
    Idle,
    /// A transition advanced but has not landed
    Running,
    /// At least one transition landed during this tick
    Completed,
}

/// Ordered glyph identities used by "advance to the next one" requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitSequence {
    ids: Vec<GlyphId>,
}

impl Default for DigitSequence {
    fn default() -> Self {
        Self {
            ids: (0..=9).map(GlyphId::from_raw).collect(),
        }
    }
}

impl DigitSequence {
    /// Build a sequence, rejecting identities `registry` cannot resolve.
    pub fn new(ids: Vec<GlyphId>, registry: &GlyphRegistry) -> MorphResult<Self> {
        for id in &ids {
            registry.lookup(*id)?;
        }
        Ok(Self { ids })
    }

    pub fn ids(&self) -> &[GlyphId] {
        &self.ids
    }

    /// The element after `id`, wrapping at the end. Identities not in the
    /// sequence continue from its start.
    pub fn successor(&self, id: GlyphId) -> Option<GlyphId> {
        let next = match self.ids.iter().position(|x| *x == id) {
            Some(idx) => (idx + 1) % self.ids.len(),
            None => 0,
        };
        self.ids.get(next).copied()
    }
}

/// What needs to survive a host teardown: the value, never the progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedDigitState {
    pub current: GlyphId,
    pub next: GlyphId,
}

#[derive(Debug, Clone)]
pub struct DigitAnimation {
    registry: Arc<GlyphRegistry>,
    current: GlyphId,
    next: GlyphId,
    phase: AnimationPhase,
    /// Linear fraction of the in-flight transition, before easing
    progress: f64,
    /// Set by the first tick after a transition begins
    started_at: Option<Instant>,
    duration: Duration,
    /// Target requested while a transition was in flight; becomes `next`
    /// once the in-flight transition lands
    pending: Option<GlyphId>,
    sequence: DigitSequence,
    pending_sequence: Option<DigitSequence>,
    /// Hold time between automatic steps through `sequence`
    auto_advance: Option<Duration>,
    idle_since: Option<Instant>,
    redraw: bool,
}

impl DigitAnimation {
    pub fn new(registry: Arc<GlyphRegistry>, initial: GlyphId) -> MorphResult<Self> {
        registry.lookup(initial)?;
        Ok(Self::resting_on(registry, initial))
    }

    /// A digit showing the empty placeholder.
    pub fn hidden(registry: Arc<GlyphRegistry>) -> Self {
        Self::resting_on(registry, GlyphId::HIDDEN)
    }

    fn resting_on(registry: Arc<GlyphRegistry>, initial: GlyphId) -> Self {
        Self {
            registry,
            current: initial,
            next: initial,
            phase: AnimationPhase::Idle,
            progress: 0.0,
            started_at: None,
            duration: DEFAULT_DURATION,
            pending: None,
            sequence: DigitSequence::default(),
            pending_sequence: None,
            auto_advance: None,
            idle_since: None,
            redraw: true,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────

    pub fn current(&self) -> GlyphId {
        self.current
    }

    pub fn next(&self) -> GlyphId {
        self.next
    }

    pub fn pending(&self) -> Option<GlyphId> {
        self.pending
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn sequence(&self) -> &DigitSequence {
        &self.sequence
    }

    pub fn registry(&self) -> &Arc<GlyphRegistry> {
        &self.registry
    }

    /// The value callers should treat as displayed: the target of the
    /// transition in flight, or the settled glyph.
    pub fn current_digit(&self) -> GlyphId {
        self.next
    }

    /// Whether the host should keep delivering ticks.
    pub fn is_animating(&self) -> bool {
        self.phase == AnimationPhase::Transitioning || self.auto_advance.is_some()
    }

    pub fn current_glyph(&self) -> &Glyph {
        self.glyph(self.current)
    }

    pub fn next_glyph(&self) -> &Glyph {
        self.glyph(self.next)
    }

    fn glyph(&self, id: GlyphId) -> &Glyph {
        self.registry
            .lookup(id)
            .unwrap_or_else(|_| self.registry.hidden())
    }

    /// Returns and clears the "please redraw" flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    // ── Configuration ─────────────────────────────────────────────────

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn set_auto_advance(&mut self, hold: Option<Duration>) {
        self.auto_advance = hold;
        self.idle_since = None;
    }

    /// Replace the sequence used by [`advance_next`](Self::advance_next).
    /// Deferred until the transition in flight lands.
    pub fn set_sequence(&mut self, sequence: DigitSequence) {
        match self.phase {
            AnimationPhase::Transitioning => self.pending_sequence = Some(sequence),
            AnimationPhase::Idle => self.sequence = sequence,
        }
    }

    /// Swap the glyph source. Identities in use must resolve in the new one.
    pub fn set_registry(&mut self, registry: Arc<GlyphRegistry>) -> MorphResult<()> {
        registry.lookup(self.current)?;
        registry.lookup(self.next)?;
        if let Some(pending) = self.pending {
            registry.lookup(pending)?;
        }
        self.registry = registry;
        self.redraw = true;
        Ok(())
    }

    // ── Advancing ─────────────────────────────────────────────────────

    /// Animate to `target`.
    ///
    /// When idle and already resting on `target` this is a no-op: the
    /// animation is not restarted and no redraw is requested.
    ///
    /// While a transition is in flight the request is deferred and replaces
    /// any earlier deferred request; it never alters the frame being drawn.
    pub fn advance(&mut self, target: GlyphId) -> MorphResult<()> {
        self.registry.lookup(target)?;
        match self.phase {
            AnimationPhase::Transitioning => {
                self.pending = (target != self.next).then_some(target);
                debug!(next = %self.next, pending = ?self.pending, "advance deferred");
            }
            AnimationPhase::Idle => {
                self.pending = None;
                if target != self.current {
                    self.begin(target, None);
                    debug!(current = %self.current, next = %target, "advance");
                }
            }
        }
        Ok(())
    }

    /// Jump to `target` with no animation, dropping anything in flight or
    /// deferred.
    pub fn advance_immediate(&mut self, target: GlyphId) -> MorphResult<()> {
        self.registry.lookup(target)?;
        if self.phase == AnimationPhase::Transitioning || self.pending.is_some() {
            debug!(next = %self.next, target = %target, "transition cancelled");
        }
        self.current = target;
        self.next = target;
        self.settle(None);
        self.pending = None;
        self.redraw = true;
        Ok(())
    }

    /// Animate to the successor of the latest requested target.
    pub fn advance_next(&mut self) -> MorphResult<()> {
        match self.successor() {
            Some(target) => self.advance(target),
            None => Ok(()),
        }
    }

    pub fn advance_next_immediate(&mut self) -> MorphResult<()> {
        match self.successor() {
            Some(target) => self.advance_immediate(target),
            None => Ok(()),
        }
    }

    fn successor(&self) -> Option<GlyphId> {
        let latest = self.pending.unwrap_or(self.next);
        self.sequence.successor(latest)
    }

    fn begin(&mut self, target: GlyphId, started_at: Option<Instant>) {
        self.next = target;
        self.phase = AnimationPhase::Transitioning;
        self.progress = 0.0;
        self.started_at = started_at;
        self.idle_since = None;
        self.redraw = true;
    }

    fn settle(&mut self, at: Option<Instant>) {
        self.phase = AnimationPhase::Idle;
        self.progress = 0.0;
        self.started_at = None;
        self.idle_since = at;
        if let Some(sequence) = self.pending_sequence.take() {
            self.sequence = sequence;
        }
    }

    fn fraction(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        }
    }

    // ── Frame progression ─────────────────────────────────────────────

    /// Advance progress to wall-clock time `now`.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if self.phase == AnimationPhase::Idle && !self.start_auto_advance(now) {
            return TickOutcome::Idle;
        }

        let mut completed = false;
        loop {
            let start = *self.started_at.get_or_insert(now);
            self.progress = self.fraction(now.saturating_duration_since(start));
            self.redraw = true;
            if self.progress < 1.0 {
                break;
            }

            // Landed: the outline now rests on `next`.
            completed = true;
            self.current = self.next;
            let end = start + self.duration;
            trace!(current = %self.current, "transition complete");

            match self.pending.take() {
                Some(target) if target != self.current => {
                    if let Some(sequence) = self.pending_sequence.take() {
                        self.sequence = sequence;
                    }
                    // Continue seamlessly from where the last one ended.
                    self.begin(target, Some(end));
                }
                _ => {
                    self.settle(Some(end));
                    break;
                }
            }
        }

        if completed {
            TickOutcome::Completed
        } else {
            TickOutcome::Running
        }
    }

    /// In continuous mode, begin the next step once the hold time passed.
    fn start_auto_advance(&mut self, now: Instant) -> bool {
        let Some(hold) = self.auto_advance else {
            return false;
        };
        let since = *self.idle_since.get_or_insert(now);
        let due = since + hold;
        if now < due {
            return false;
        }
        match self.sequence.successor(self.current) {
            Some(target) if target != self.current => {
                self.begin(target, Some(due));
                true
            }
            _ => false,
        }
    }

    // ── Saved state ───────────────────────────────────────────────────

    /// Snapshot for a host teardown. A transition in flight is collapsed to
    /// its target, since its progress means nothing after a restore.
    pub fn save(&self) -> SavedDigitState {
        let current = match self.phase {
            AnimationPhase::Transitioning => self.next,
            AnimationPhase::Idle => self.current,
        };
        SavedDigitState {
            current,
            next: self.pending.unwrap_or(self.next),
        }
    }

    pub fn restore(&mut self, state: SavedDigitState) -> MorphResult<()> {
        self.registry.lookup(state.next)?;
        self.advance_immediate(state.current)?;
        self.advance(state.next)
    }
}
