pub mod components;
pub mod digits;
pub mod help;
pub mod pages;
pub mod theme;

use ratatui::layout::Rect;
use ratatui::Frame;

use crate::app::{App, Mode};

/// Rows taken by the tab bar and status bar around the page content.
const CHROME_ROWS: u16 = 3;

/// Top-level draw function: the active page, then any overlay
pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    pages::render(f, app, area);
    if app.mode == Mode::Help {
        help::render(f, app, area);
    }
}

/// Braille dot grid available to a page's digits in a `width` x `height`
/// terminal. Each cell holds 2x4 dots.
pub fn content_dots(width: u16, height: u16) -> (f64, f64) {
    // Page block borders take one cell on every side.
    let inner_w = width.saturating_sub(2);
    let inner_h = height.saturating_sub(CHROME_ROWS + 2);
    (f64::from(inner_w) * 2.0, f64::from(inner_h) * 4.0)
}

/// A `width` x `height` rectangle centered in `area`, clipped to it.
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::config::Config;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn has_braille(text: &str) -> bool {
        text.chars().any(|c| ('\u{2801}'..='\u{28FF}').contains(&c))
    }

    #[test]
    fn content_dots_subtracts_chrome() {
        assert_eq!(content_dots(80, 24), (156.0, 76.0));
        assert_eq!(content_dots(1, 1), (0.0, 0.0));
    }

    #[test]
    fn centered_rect_clips_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect_fixed(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect_fixed(30, 30, area), area);
    }

    #[test]
    fn every_page_draws_digits() {
        let mut app = App::new(&Config::default()).unwrap();
        app.resize(80, 24);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        for key in ['1', '2', '3'] {
            app.handle_key(crossterm::event::KeyEvent::from(
                crossterm::event::KeyCode::Char(key),
            ));
            terminal.draw(|f| draw(f, &mut app)).unwrap();
            let text = screen_text(&terminal);
            assert!(text.contains(app.active_page.title()), "page {key}");
            assert!(has_braille(&text), "page {key} has no digits");
        }
    }

    #[test]
    fn help_overlay_lists_keys() {
        let mut app = App::new(&Config::default()).unwrap();
        app.resize(80, 30);
        app.handle_key(crossterm::event::KeyEvent::from(
            crossterm::event::KeyCode::Char('?'),
        ));
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Keybindings"));
        assert!(text.contains("Cycle easing"));
    }
}
