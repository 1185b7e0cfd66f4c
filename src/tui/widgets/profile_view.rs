use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use crate::profile::{ProfileEditor, ProfileField};
use crate::streak::{StreakWeek, WEEK_DAYS};
use crate::tui::widgets::color::Palette;
use crate::tui::widgets::form::{FieldForm, render_form};

const WEEK_COMPLETE: &str = "Week complete";

pub struct ProfileViewState<'a> {
    pub profile: &'a ProfileEditor,
    pub form: &'a FieldForm,
    pub streak: &'a StreakWeek,
    pub streak_index: usize,
    pub show_cursor: bool,
}

pub fn render_profile(f: &mut Frame, area: Rect, state: &ProfileViewState, palette: &Palette) {
    let [details_area, streak_area] =
        Layout::vertical([Constraint::Length(ProfileField::ALL.len() as u16 + 2), Constraint::Min(6)]).areas(area);

    if state.profile.is_editing() {
        render_form(f, details_area, state.form, palette, state.show_cursor);
    } else {
        render_details(f, details_area, state.profile, palette);
    }
    render_streak(f, streak_area, state.streak, state.streak_index, palette);
}

fn render_details(f: &mut Frame, area: Rect, profile: &ProfileEditor, palette: &Palette) {
    let lines: Vec<Line> = ProfileField::ALL
        .iter()
        .map(|field| {
            Line::from(vec![
                Span::styled(format!("{:<10}", format!("{}:", field.label())), palette.accent()),
                Span::styled(profile.field(*field).to_string(), palette.base()),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Profile").style(palette.base()))
        .style(palette.base());
    f.render_widget(paragraph, area);
}

fn render_streak(f: &mut Frame, area: Rect, streak: &StreakWeek, selected: usize, palette: &Palette) {
    let block = Block::default().borders(Borders::ALL).title("Weekly Streak").style(palette.base());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [days_area, gauge_area, message_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Min(1)]).areas(inner);

    let mut spans = Vec::new();
    for (i, day) in WEEK_DAYS.iter().enumerate() {
        let mark = if streak.is_done(i) { "✔" } else { "·" };
        let style = if i == selected { palette.highlight() } else { palette.base() };
        spans.push(Span::styled(format!(" {} {} ", day, mark), style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).style(palette.base()), days_area);

    let gauge = Gauge::default()
        .gauge_style(palette.accent())
        .ratio(streak.completion_percent() / 100.0)
        .label(format!("{}% completed", streak.completion_display()));
    f.render_widget(gauge, gauge_area);

    // The celebration itself is a one-shot status message
    if let Some(text) = streak_footer(streak) {
        let message = Paragraph::new(Span::styled(text, palette.accent().add_modifier(Modifier::BOLD)))
            .style(palette.base());
        f.render_widget(message, message_area);
    }
}

fn streak_footer(streak: &StreakWeek) -> Option<&'static str> {
    streak.is_complete().then_some(WEEK_COMPLETE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streak::CELEBRATION_MESSAGE;

    #[test]
    fn full_week_shows_neutral_footer() {
        let mut streak = StreakWeek::new();
        assert_eq!(streak_footer(&streak), None);

        for day in 0..WEEK_DAYS.len() {
            streak.toggle(day).unwrap();
        }
        assert_eq!(streak_footer(&streak), Some(WEEK_COMPLETE));
        assert_ne!(streak_footer(&streak), Some(CELEBRATION_MESSAGE));
    }
}
