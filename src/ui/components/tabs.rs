use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Tabs as RataTabs};
use ratatui::Frame;

use crate::app::Page;
use crate::ui::theme::Theme;

/// Render the top navigation tab bar
pub fn render(f: &mut Frame, active_page: Page, theme: &Theme, area: Rect) {
    let titles: Vec<Line> = Page::ALL
        .iter()
        .map(|page| {
            let style = if *page == active_page {
                theme.tab_active()
            } else {
                theme.tab_inactive()
            };
            Line::from(vec![
                Span::styled(format!("{}", page.index() + 1), theme.style_key_hint()),
                Span::styled(format!(" {} ", page.title()), style),
            ])
        })
        .collect();

    let tabs = RataTabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(theme.style_border())
                .title(Span::styled(" morphclock ", theme.style_accent_bold())),
        )
        .select(active_page.index())
        .highlight_style(theme.tab_active())
        .divider(Span::styled(" │ ", Style::default().fg(theme.border)));

    f.render_widget(tabs, area);
}
