use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, Mode, Page};
use crate::ui::theme::Theme;

/// Render the bottom status bar with contextual keybindings and the
/// active easing curve
pub fn render(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let key_spans: Vec<Span> = keybindings(app)
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(format!(" {key} "), theme.style_key_hint()),
                Span::styled(format!("{desc} "), theme.style_key_desc()),
                Span::styled("│", Style::default().fg(theme.border)),
            ]
        })
        .collect();
    let help = Paragraph::new(Line::from(key_spans)).style(theme.status_bar());
    f.render_widget(help, chunks[0]);

    let moving = match app.active_page {
        Page::Stopwatch => app.stopwatch.row.is_animating(),
        Page::Counter => app.counter.is_animating(),
        Page::Clock => app.clock.row.is_animating(),
    };
    let marker = if moving {
        Span::styled(" ● ", Style::default().fg(theme.digits_moving))
    } else {
        Span::styled(" ○ ", theme.style_dim())
    };
    let status_line = Line::from(vec![
        marker,
        Span::styled(app.settings.easing.label(), theme.style_default()),
        Span::raw(" "),
    ]);
    let status = Paragraph::new(status_line)
        .style(theme.status_bar())
        .alignment(Alignment::Right);
    f.render_widget(status, chunks[1]);
}

fn keybindings(app: &App) -> Vec<(&'static str, &'static str)> {
    match app.mode {
        Mode::Normal => {
            let mut keys = vec![("q", "Quit"), ("Tab", "Next"), ("e", "Easing"), ("?", "Help")];
            match app.active_page {
                Page::Stopwatch => {
                    keys.extend([("Space", "Start/Stop"), ("r", "Reset"), ("n", "Step")]);
                }
                Page::Counter => {
                    keys.extend([("+/-", "Step"), ("h", "Hide"), ("c", "Compact")]);
                }
                Page::Clock => {}
            }
            keys
        }
        Mode::Help => vec![("?/Esc", "Close")],
    }
}
