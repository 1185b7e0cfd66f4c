use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::models::Post;
use crate::tui::widgets::color::Palette;
use crate::tui::widgets::popup::popup_area;

pub const DELETE_OPTIONS: [&str; 2] = ["Delete", "Cancel"];

pub fn render_confirm_delete(f: &mut Frame, area: Rect, post: &Post, selection: usize, palette: &Palette) {
    let popup = popup_area(area, 50, 40);
    f.render_widget(Clear, popup);

    let preview: String = post.content.chars().take(60).collect();
    let mut lines = vec![
        Line::from(Span::styled("Delete this post?", palette.base())),
        Line::from(""),
        Line::from(Span::styled(preview, palette.accent())),
        Line::from(""),
    ];

    for (index, option) in DELETE_OPTIONS.iter().enumerate() {
        let selected = index == selection;
        let prefix = if selected { "> " } else { "  " };
        let style = if selected { palette.highlight() } else { palette.base() };
        lines.push(Line::from(Span::styled(format!("{}{}", prefix, option), style)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Use ↑↓ to navigate, Enter to confirm, Esc to cancel",
        palette.base(),
    )));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm Delete")
                .title_alignment(Alignment::Center)
                .style(palette.base()),
        )
        .style(palette.base())
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    f.render_widget(paragraph, popup);
}
