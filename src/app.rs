use std::sync::Arc;
use std::time::Instant;

use chrono::Timelike;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use morphclock::animation::TickOutcome;
use morphclock::{ComposeStatus, GlyphRegistry, MorphResult, MorphSettings, NumberGroup, NumberView};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::event::Event;
use crate::state::{SavedStopwatch, Session};
use crate::ui;
use crate::ui::theme::Theme;

/// Seconds a status message stays visible.
const TOAST_SECS: u8 = 3;

// ── Page & Mode enums ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Stopwatch,
    Counter,
    Clock,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Stopwatch, Page::Counter, Page::Clock];

    pub fn index(self) -> usize {
        match self {
            Page::Stopwatch => 0,
            Page::Counter => 1,
            Page::Clock => 2,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Stopwatch => "Stopwatch",
            Page::Counter => "Counter",
            Page::Clock => "Clock",
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
}

// ── Digit rows ────────────────────────────────────────────────────────

/// A fixed number of independent digits, left to right.
#[derive(Debug, Clone)]
pub struct DigitRow {
    views: Vec<NumberView>,
}

impl DigitRow {
    fn new(len: usize, registry: &Arc<GlyphRegistry>, settings: MorphSettings) -> MorphResult<Self> {
        let mut views = Vec::with_capacity(len);
        for _ in 0..len {
            let mut view = NumberView::with_settings(registry.clone(), settings);
            view.advance_digit_immediate(0)?;
            views.push(view);
        }
        Ok(Self { views })
    }

    pub fn views(&self) -> &[NumberView] {
        &self.views
    }

    fn show(&mut self, digits: &[u8], immediate: bool) -> MorphResult<()> {
        for (view, digit) in self.views.iter_mut().zip(digits) {
            let n = i64::from(*digit);
            if immediate {
                view.advance_digit_immediate(n)?;
            } else {
                view.advance_digit(n)?;
            }
        }
        Ok(())
    }

    fn tick(&mut self, now: Instant) -> bool {
        let mut moved = false;
        for view in &mut self.views {
            moved |= view.tick(now) != TickOutcome::Idle;
            moved |= view.take_redraw();
        }
        moved
    }

    fn set_text_size(&mut self, size: f64) -> MorphResult<()> {
        for view in &mut self.views {
            view.set_text_size(size)?;
        }
        Ok(())
    }

    fn set_settings(&mut self, settings: MorphSettings) {
        for view in &mut self.views {
            view.set_settings(settings);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.views.iter().any(NumberView::is_animating)
    }
}

// ── Stopwatch ─────────────────────────────────────────────────────────

/// `mm:ss` from four independent digits. Minutes wrap after 99.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    pub row: DigitRow,
    pub elapsed_secs: u64,
    pub running: bool,
}

impl Stopwatch {
    fn new(registry: &Arc<GlyphRegistry>, settings: MorphSettings) -> MorphResult<Self> {
        Ok(Self {
            row: DigitRow::new(4, registry, settings)?,
            elapsed_secs: 0,
            running: false,
        })
    }

    pub fn digits(elapsed_secs: u64) -> [u8; 4] {
        let minutes = (elapsed_secs / 60) % 100;
        let seconds = elapsed_secs % 60;
        [
            (minutes / 10) as u8,
            (minutes % 10) as u8,
            (seconds / 10) as u8,
            (seconds % 10) as u8,
        ]
    }

    /// One second forward.
    fn step(&mut self) -> MorphResult<()> {
        self.elapsed_secs += 1;
        self.row.show(&Self::digits(self.elapsed_secs), false)
    }

    fn reset(&mut self) -> MorphResult<()> {
        self.elapsed_secs = 0;
        self.running = false;
        self.row.show(&Self::digits(0), true)
    }

    fn save(&self) -> SavedStopwatch {
        SavedStopwatch {
            elapsed_secs: self.elapsed_secs,
            digits: self.row.views.iter().map(NumberView::save).collect(),
        }
    }

    fn restore(&mut self, saved: &SavedStopwatch) -> MorphResult<()> {
        let mut row = self.row.clone();
        if saved.digits.len() == row.views.len() {
            for (view, digit) in row.views.iter_mut().zip(&saved.digits) {
                view.restore(*digit)?;
            }
        } else {
            row.show(&Self::digits(saved.elapsed_secs), true)?;
        }
        self.row = row;
        self.elapsed_secs = saved.elapsed_secs;
        self.running = false;
        Ok(())
    }
}

// ── Clock ─────────────────────────────────────────────────────────────

/// `hh:mm:ss` of the local wall time.
#[derive(Debug, Clone)]
pub struct Clock {
    pub row: DigitRow,
    started: bool,
}

impl Clock {
    fn new(registry: &Arc<GlyphRegistry>, settings: MorphSettings) -> MorphResult<Self> {
        Ok(Self {
            row: DigitRow::new(6, registry, settings)?,
            started: false,
        })
    }

    pub fn digits(time: &impl Timelike) -> [u8; 6] {
        let (h, m, s) = (time.hour(), time.minute(), time.second());
        [h / 10, h % 10, m / 10, m % 10, s / 10, s % 10].map(|d| d as u8)
    }

    /// The first update jumps; later ones morph.
    fn update(&mut self, time: &impl Timelike) -> MorphResult<()> {
        let immediate = !std::mem::replace(&mut self.started, true);
        self.row.show(&Self::digits(time), immediate)
    }
}

// ── Application State ─────────────────────────────────────────────────

pub struct App {
    pub active_page: Page,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub settings: MorphSettings,

    pub stopwatch: Stopwatch,
    pub counter: NumberGroup,
    pub clock: Clock,
    /// Value the counter returns to when un-hidden
    last_counter: i64,

    /// Terminal size the digit sizes were fitted to
    viewport: (u16, u16),

    // Toast notification
    pub toast_message: Option<String>,
    pub toast_is_error: bool,
    toast_secs: u8,

    dirty: bool,
}

impl App {
    pub fn new(config: &Config) -> MorphResult<Self> {
        let registry = Arc::new(GlyphRegistry::standard());
        let settings = config.morph_settings();

        let mut counter = NumberGroup::with_settings(registry.clone(), settings);
        counter.set_zero_padding(config.display.zero_padding);
        counter.set_minimum_shown(config.display.minimum_digits)?;
        counter.show_immediate(0)?;

        let mut clock = Clock::new(&registry, settings)?;
        clock.update(&chrono::Local::now())?;

        Ok(Self {
            active_page: config.display.start_page,
            mode: Mode::Normal,
            should_quit: false,
            theme: Theme::from_config(&config.theme),
            settings,
            stopwatch: Stopwatch::new(&registry, settings)?,
            counter,
            clock,
            last_counter: 0,
            viewport: (0, 0),
            toast_message: None,
            toast_is_error: false,
            toast_secs: 0,
            dirty: true,
        })
    }

    /// Returns and clears the "something changed since the last draw" flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Handle events from the event loop
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                self.handle_key(key);
                self.dirty = true;
            }
            Event::Tick(now) => self.on_tick(now),
            Event::Step(now) => self.on_step(now),
            Event::Resize(w, h) => {
                self.resize(w, h);
                self.dirty = true;
            }
        }
    }

    fn on_tick(&mut self, now: Instant) {
        let mut moved = self.stopwatch.row.tick(now);
        moved |= self.clock.row.tick(now);
        moved |= self.counter.tick(now) != TickOutcome::Idle;
        moved |= self.counter.take_redraw();
        if self.counter.take_layout_request() {
            self.fit_counter();
            moved = true;
        }
        self.dirty |= moved;
    }

    fn on_step(&mut self, _now: Instant) {
        if self.stopwatch.running {
            let result = self.stopwatch.step();
            self.report(result);
        }
        let result = self.clock.update(&chrono::Local::now());
        self.report(result);
        self.tick_toast();
    }

    // ── Key handling ──────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.mode == Mode::Help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
                self.mode = Mode::Normal;
            }
            return;
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                self.active_page = self.active_page.next();
                return;
            }
            KeyCode::BackTab => {
                self.active_page = self.active_page.prev();
                return;
            }
            KeyCode::Char(c @ '1'..='3') => {
                let idx = c as usize - '1' as usize;
                self.active_page = Page::ALL[idx];
                return;
            }
            KeyCode::Char('?') => {
                self.mode = Mode::Help;
                return;
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                self.cycle_easing();
                return;
            }
            _ => {}
        }

        let result = match self.active_page {
            Page::Stopwatch => self.handle_stopwatch_key(key),
            Page::Counter => self.handle_counter_key(key),
            Page::Clock => Ok(()),
        };
        self.report(result);
    }

    fn handle_stopwatch_key(&mut self, key: KeyEvent) -> MorphResult<()> {
        match key.code {
            KeyCode::Char(' ') => {
                self.stopwatch.running = !self.stopwatch.running;
                debug!(running = self.stopwatch.running, "stopwatch toggled");
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.stopwatch.reset()?,
            KeyCode::Char('n') | KeyCode::Char('N') => self.stopwatch.step()?,
            _ => {}
        }
        Ok(())
    }

    fn handle_counter_key(&mut self, key: KeyEvent) -> MorphResult<()> {
        let status = match key.code {
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => self.counter.advance_by(1)?,
            KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Down => {
                self.counter.advance_by(-1)?
            }
            KeyCode::Char('n') | KeyCode::Char('N') => self.counter.advance_by_one()?,
            KeyCode::Char('r') | KeyCode::Char('R') => self.counter.show(0)?,
            KeyCode::Char('h') | KeyCode::Char('H') => self.toggle_counter_hidden()?,
            KeyCode::Char('c') | KeyCode::Char('C') => {
                let removed = self.counter.compact();
                self.show_toast(&format!("Dropped {removed} unused positions"), false);
                return Ok(());
            }
            _ => return Ok(()),
        };
        if status == ComposeStatus::SequenceEmpty {
            debug!("counter has no positions to show");
        }
        match self.counter.number() {
            Some(n) => self.last_counter = n,
            None => self.show_toast("Counter hidden", false),
        }
        Ok(())
    }

    fn toggle_counter_hidden(&mut self) -> MorphResult<ComposeStatus> {
        match self.counter.number() {
            Some(n) => {
                self.last_counter = n;
                self.counter.hide()
            }
            None => self.counter.show(self.last_counter),
        }
    }

    fn cycle_easing(&mut self) {
        self.settings.easing = self.settings.easing.cycle_next();
        self.stopwatch.row.set_settings(self.settings);
        self.clock.row.set_settings(self.settings);
        self.counter.set_settings(self.settings);
        info!(easing = %self.settings.easing, "easing changed");
        self.show_toast(&format!("Easing: {}", self.settings.easing), false);
    }

    // ── Layout ────────────────────────────────────────────────────────

    /// Fit every page's digits to a terminal of `width` x `height` cells.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
        let (dots_w, dots_h) = ui::content_dots(width, height);
        let stopwatch = ui::digits::fit_text_size(dots_w, dots_h, 4, 1);
        let clock = ui::digits::fit_text_size(dots_w, dots_h, 6, 2);
        let result = self
            .stopwatch
            .row
            .set_text_size(stopwatch)
            .and_then(|_| self.clock.row.set_text_size(clock));
        self.report(result);
        self.fit_counter();
    }

    fn fit_counter(&mut self) {
        let (width, height) = self.viewport;
        let (dots_w, dots_h) = ui::content_dots(width, height);
        let slots = self.counter.len().max(3);
        let size = ui::digits::fit_text_size(dots_w, dots_h, slots, 0);
        let result = self.counter.set_text_size(size);
        self.report(result);
        // Our own re-size must not trigger another fit.
        self.counter.take_layout_request();
    }

    // ── Saved state ───────────────────────────────────────────────────

    pub fn session(&self) -> Session {
        Session {
            stopwatch: Some(self.stopwatch.save()),
            counter: Some(self.counter.save()),
        }
    }

    /// Apply a saved session. Nothing changes unless every part of it
    /// restores.
    pub fn restore(&mut self, session: &Session) -> MorphResult<()> {
        let mut stopwatch = self.stopwatch.clone();
        if let Some(ref saved) = session.stopwatch {
            stopwatch.restore(saved)?;
        }
        let mut counter = self.counter.clone();
        if let Some(ref saved) = session.counter {
            counter.restore(saved)?;
        }

        self.stopwatch = stopwatch;
        self.counter = counter;
        if let Some(ref saved) = session.counter {
            self.last_counter = saved.number.unwrap_or(0);
        }
        self.fit_counter();
        self.dirty = true;
        Ok(())
    }

    // ── Toast Management ──────────────────────────────────────────────

    pub fn show_toast(&mut self, message: &str, is_error: bool) {
        self.toast_message = Some(message.to_string());
        self.toast_is_error = is_error;
        self.toast_secs = TOAST_SECS;
        self.dirty = true;
    }

    fn tick_toast(&mut self) {
        if self.toast_secs > 0 {
            self.toast_secs -= 1;
            if self.toast_secs == 0 {
                self.toast_message = None;
                self.dirty = true;
            }
        }
    }

    fn report<T>(&mut self, result: MorphResult<T>) {
        if let Err(e) = result {
            warn!("{e}");
            self.show_toast(&e.to_string(), true);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::NaiveTime;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use morphclock::GlyphId;
    use pretty_assertions::assert_eq;

    use super::*;

    fn app() -> App {
        let mut app = App::new(&Config::default()).unwrap();
        app.resize(80, 24);
        app
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    /// Let every transition in flight land.
    fn settle(app: &mut App) {
        let now = Instant::now();
        app.handle_event(Event::Tick(now));
        app.handle_event(Event::Tick(now + Duration::from_secs(5)));
    }

    fn row_digits(row: &DigitRow) -> Vec<i64> {
        row.views().iter().map(|v| v.current_digit().raw()).collect()
    }

    #[test]
    fn pages_cycle_and_jump() {
        let mut app = app();
        assert_eq!(app.active_page, Page::Stopwatch);
        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.active_page, Page::Counter);
        app.handle_event(key(KeyCode::BackTab));
        app.handle_event(key(KeyCode::BackTab));
        assert_eq!(app.active_page, Page::Clock);
        app.handle_event(key(KeyCode::Char('1')));
        assert_eq!(app.active_page, Page::Stopwatch);
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char('?')));
        assert_eq!(app.mode, Mode::Help);
        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.active_page, Page::Stopwatch);
        app.handle_event(key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Normal);
        assert!(!app.should_quit);
    }

    #[test]
    fn stopwatch_digits_wrap_seconds_at_sixty() {
        assert_eq!(Stopwatch::digits(0), [0, 0, 0, 0]);
        assert_eq!(Stopwatch::digits(59), [0, 0, 5, 9]);
        assert_eq!(Stopwatch::digits(60), [0, 1, 0, 0]);
        assert_eq!(Stopwatch::digits(100 * 60 + 7), [0, 0, 0, 7]);
    }

    #[test]
    fn stopwatch_counts_only_while_running() {
        let mut app = app();
        let base = Instant::now();
        app.handle_event(Event::Step(base));
        assert_eq!(app.stopwatch.elapsed_secs, 0);

        app.handle_event(key(KeyCode::Char(' ')));
        for s in 1..=12u64 {
            app.handle_event(Event::Step(base + Duration::from_secs(s)));
            app.handle_event(Event::Tick(base + Duration::from_secs(s)));
            app.handle_event(Event::Tick(base + Duration::from_millis(s * 1000 + 600)));
        }
        assert_eq!(app.stopwatch.elapsed_secs, 12);
        assert_eq!(row_digits(&app.stopwatch.row), vec![0, 0, 1, 2]);

        app.handle_event(key(KeyCode::Char('r')));
        assert!(!app.stopwatch.running);
        assert_eq!(row_digits(&app.stopwatch.row), vec![0, 0, 0, 0]);
    }

    #[test]
    fn counter_steps_hides_and_comes_back() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char('2')));
        for _ in 0..3 {
            app.handle_event(key(KeyCode::Char('+')));
        }
        app.handle_event(key(KeyCode::Char('-')));
        assert_eq!(app.counter.number(), Some(2));
        settle(&mut app);

        app.handle_event(key(KeyCode::Char('h')));
        settle(&mut app);
        assert_eq!(app.counter.number(), None);
        assert_eq!(app.toast_message.as_deref(), Some("Counter hidden"));
        assert!(app.counter.current_digit(0).unwrap().is_hidden());

        app.handle_event(key(KeyCode::Char('h')));
        settle(&mut app);
        assert_eq!(app.counter.number(), Some(2));
        assert_eq!(app.counter.current_digit(0), Some(GlyphId::from_raw(2)));
    }

    #[test]
    fn clock_shows_wall_time() {
        let time = NaiveTime::from_hms_opt(9, 41, 7).unwrap();
        assert_eq!(Clock::digits(&time), [0, 9, 4, 1, 0, 7]);
    }

    #[test]
    fn easing_cycles_through_every_widget() {
        let mut app = app();
        let before = app.settings.easing;
        app.handle_event(key(KeyCode::Char('e')));
        assert_eq!(app.settings.easing, before.cycle_next());
        assert_eq!(app.counter.settings().easing, app.settings.easing);
        assert_eq!(
            app.stopwatch.row.views()[0].settings().easing,
            app.settings.easing
        );
    }

    #[test]
    fn resize_fits_digits_to_the_terminal() {
        let mut app = app();
        let small = app.stopwatch.row.views()[0].text_size();
        app.handle_event(Event::Resize(160, 48));
        let large = app.stopwatch.row.views()[0].text_size();
        assert!(large > small);
    }

    #[test]
    fn session_restores_values() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char('2')));
        for _ in 0..12 {
            app.handle_event(key(KeyCode::Char('+')));
        }
        app.stopwatch.running = true;
        app.handle_event(Event::Step(Instant::now()));
        let session = app.session();

        let mut restored = self::app();
        restored.restore(&session).unwrap();
        assert_eq!(restored.counter.number(), Some(12));
        assert_eq!(restored.stopwatch.elapsed_secs, 1);
        assert!(!restored.stopwatch.running);
        assert_eq!(row_digits(&restored.stopwatch.row), vec![0, 0, 0, 1]);
    }

    #[test]
    fn bad_session_changes_nothing() {
        use morphclock::animation::digit::SavedDigitState;
        use morphclock::widget::SavedGroupState;

        let mut app = app();
        app.handle_event(key(KeyCode::Char('2')));
        app.handle_event(key(KeyCode::Char('+')));
        settle(&mut app);

        let unknown = SavedDigitState {
            current: GlyphId::from_raw(12),
            next: GlyphId::from_raw(12),
        };
        let session = Session {
            stopwatch: Some(SavedStopwatch {
                elapsed_secs: 754,
                digits: vec![unknown; 4],
            }),
            counter: None,
        };
        assert!(app.restore(&session).is_err());
        assert_eq!(app.stopwatch.elapsed_secs, 0);
        assert_eq!(row_digits(&app.stopwatch.row), vec![0, 0, 0, 0]);

        // A good stopwatch is not applied when the counter part fails.
        let session = Session {
            stopwatch: Some(SavedStopwatch {
                elapsed_secs: 754,
                digits: Vec::new(),
            }),
            counter: Some(SavedGroupState {
                number: Some(9),
                minimum_shown: 1,
                digits: vec![unknown],
            }),
        };
        assert!(app.restore(&session).is_err());
        assert_eq!(app.stopwatch.elapsed_secs, 0);
        assert_eq!(row_digits(&app.stopwatch.row), vec![0, 0, 0, 0]);
        assert_eq!(app.counter.number(), Some(1));
        assert_eq!(app.counter.current_digit(0), Some(GlyphId::from_raw(1)));
    }
}
