pub mod clock;
pub mod counter;
pub mod stopwatch;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::{App, Page};
use crate::ui::components;
use crate::ui::theme::{self, Theme};

/// Render the full screen: tabs + active page + status bar
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Page content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    components::tabs::render(f, app.active_page, &app.theme, chunks[0]);

    match app.active_page {
        Page::Stopwatch => stopwatch::render(f, app, chunks[1]),
        Page::Counter => counter::render(f, app, chunks[1]),
        Page::Clock => clock::render(f, app, chunks[1]),
    }

    components::status_bar::render(f, app, &app.theme, chunks[2]);

    if let Some(ref msg) = app.toast_message {
        render_toast(f, msg, app.toast_is_error, &app.theme);
    }
}

/// Bordered frame shared by every page, titled with the page name and an
/// optional state label.
pub(crate) fn page_block<'a>(theme: &Theme, title: &'a str, state: Option<Span<'a>>) -> Block<'a> {
    let mut spans = vec![Span::styled(format!(" {title} "), theme.style_accent_bold())];
    if let Some(state) = state {
        spans.push(state);
        spans.push(Span::raw(" "));
    }
    Block::default()
        .title(Line::from(spans))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(theme.style_border())
}

/// Render a temporary toast notification at the top-right
fn render_toast(f: &mut Frame, message: &str, is_error: bool, theme: &Theme) {
    let area = f.area();
    if area.width < 8 || area.height < 4 {
        return;
    }
    let width = (message.chars().count() as u16 + 6).min(area.width - 4);
    let x = area.width.saturating_sub(width + 2);
    let toast_area = Rect::new(x, 1, width, 3);

    f.render_widget(Clear, toast_area);

    let color = if is_error { theme::ERROR } else { theme::SUCCESS };
    let icon = if is_error { " ✗ " } else { " ✓ " };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(ratatui::style::Style::default().fg(color));

    let text = Paragraph::new(Line::from(vec![
        Span::styled(
            icon,
            ratatui::style::Style::default()
                .fg(color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(message, theme.style_default()),
    ]))
    .block(block);

    f.render_widget(text, toast_area);
}
