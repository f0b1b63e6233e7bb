use ratatui::layout::Rect;
use ratatui::Frame;

use crate::app::App;
use crate::ui::digits::DigitCanvas;

pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;
    let canvas = DigitCanvas::from_views(app.clock.row.views(), &[1, 3])
        .colors(theme.digits, theme.digits_moving)
        .block(super::page_block(theme, "Clock", None));
    f.render_widget(canvas, area);
}
