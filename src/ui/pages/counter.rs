use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::Frame;

use crate::app::App;
use crate::ui::digits::DigitCanvas;

pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;
    let counter = &app.counter;

    let label = match counter.number() {
        Some(n) => format!("{n} · {} positions", counter.len()),
        None => format!("hidden · {} positions", counter.len()),
    };
    let state = Span::styled(label, theme.style_dim());

    let canvas = DigitCanvas::from_group(counter)
        .colors(theme.digits, theme.digits_moving)
        .block(super::page_block(theme, "Counter", Some(state)));
    f.render_widget(canvas, area);
}
