use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::dashboard::{Dashboard, FEATURES, greeting};
use crate::session::Session;
use crate::tui::widgets::color::Palette;

pub fn render_dashboard(
    f: &mut Frame,
    area: Rect,
    session: &Session,
    dashboard: &Dashboard,
    selected: usize,
    palette: &Palette,
) {
    let [header_area, cards_area] = Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(greeting(session), palette.accent().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled("Your all-in-one fitness companion.", palette.base())),
    ])
    .style(palette.base());
    f.render_widget(header, header_area);

    let mut lines = Vec::new();
    for (i, feature) in FEATURES.iter().enumerate() {
        let expanded = dashboard.active() == Some(i);
        let marker = if expanded { "▼" } else { "▶" };
        let title_style = if i == selected { palette.highlight() } else { palette.accent() };

        lines.push(Line::from(Span::styled(format!("{} {}", marker, feature.title), title_style)));
        lines.push(Line::from(Span::styled(format!("  {}", feature.desc), palette.base())));
        if expanded {
            lines.push(Line::from(Span::styled(
                format!("  {}", feature.details),
                palette.base().add_modifier(Modifier::ITALIC),
            )));
        }
        lines.push(Line::from(""));
    }

    let cards = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Features").style(palette.base()))
        .style(palette.base())
        .wrap(Wrap { trim: false });
    f.render_widget(cards, cards_area);
}
