use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Tabs;

use crate::tui::app::Tab;
use crate::tui::widgets::color::Palette;

pub fn render_tabs(f: &mut Frame, area: Rect, current_tab: Tab, palette: &Palette) {
    // Padding on both sides gives each tab a box look
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            Line::from(vec![
                Span::styled(format!(" {} ", i + 1), palette.accent()),
                Span::styled(format!("{} ", tab.title()), Style::default()),
            ])
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(current_tab.index())
        .style(palette.base())
        .highlight_style(palette.highlight())
        .divider(" ")
        .padding("", "");

    f.render_widget(tabs, area);
}
