use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::Frame;

use crate::app::App;
use crate::ui::digits::DigitCanvas;

pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;
    let stopwatch = &app.stopwatch;

    let state = if stopwatch.running {
        Span::styled("running", theme.style_accent())
    } else if stopwatch.elapsed_secs == 0 {
        Span::styled("ready", theme.style_dim())
    } else {
        Span::styled("paused", theme.style_dim())
    };

    let canvas = DigitCanvas::from_views(stopwatch.row.views(), &[1])
        .colors(theme.digits, theme.digits_moving)
        .block(super::page_block(theme, "Stopwatch", Some(state)));
    f.render_widget(canvas, area);
}
