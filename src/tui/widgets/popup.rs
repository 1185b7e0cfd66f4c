use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::widgets::color::Palette;
use crate::tui::widgets::input::Input;

/// Centered rect taking a percentage of `area`
/// Based on ratatui popup example: https://ratatui.rs/examples/apps/popup/
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// Centered rect with a fixed height, for single-line prompts
pub fn popup_area_fixed(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// One-line text prompt with a message above the input
pub fn render_prompt(f: &mut Frame, area: Rect, title: &str, message: &str, input: &Input, palette: &Palette) {
    let popup = popup_area_fixed(area, 60, 6);
    f.render_widget(Clear, popup);

    let inner_width = popup.width.saturating_sub(2) as usize;
    let (text, cursor_x) = input.visible(inner_width.saturating_sub(2));

    let lines = vec![
        Line::from(Span::styled(message.to_string(), palette.base())),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", palette.accent()),
            Span::styled(text, palette.base()),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .title_alignment(Alignment::Center)
                .style(palette.base()),
        )
        .style(palette.base())
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, popup);

    // Input sits on the third inner line
    f.set_cursor_position((popup.x + 3 + cursor_x as u16, popup.y + 3));
}
