use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::widgets::color::Palette;
use crate::tui::widgets::input::Input;
use crate::tui::widgets::popup::popup_area_fixed;

pub fn render_login(f: &mut Frame, area: Rect, input: &Input, palette: &Palette) {
    let popup = popup_area_fixed(area, 60, 9);
    let inner_width = popup.width.saturating_sub(4) as usize;
    let (text, cursor_x) = input.visible(inner_width);

    let lines = vec![
        Line::from(Span::styled("Welcome to FitTrack 💪", palette.accent())),
        Line::from(""),
        Line::from(Span::styled("Enter your name to sign in", palette.base())),
        Line::from(""),
        Line::from(vec![Span::styled("> ", palette.accent()), Span::styled(text, palette.base())]),
        Line::from(""),
        Line::from(Span::styled("Enter: Sign in • Esc: Quit", palette.base())),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Login")
                .title_alignment(Alignment::Center)
                .style(palette.base()),
        )
        .style(palette.base());
    f.render_widget(paragraph, popup);

    f.set_cursor_position((popup.x + 3 + cursor_x as u16, popup.y + 5));
}
