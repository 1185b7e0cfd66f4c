use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table};

use crate::models::Mood;
use crate::mood::{CALENDAR_DAYS, MoodCalendar};
use crate::progress::{CategoryAverages, ProgressLog};
use crate::tui::layout::Layout as AppLayout;
use crate::tui::widgets::color::Palette;
use crate::tui::widgets::form::{FieldForm, render_form};

const MOOD_COLUMNS: u8 = 5;

pub struct ProgressViewState<'a> {
    pub log: &'a ProgressLog,
    pub form: &'a FieldForm,
    pub editing: bool,
    pub moods: &'a MoodCalendar,
    pub mood_day: u8,
}

pub fn render_progress(f: &mut Frame, area: Rect, state: &ProgressViewState, palette: &Palette) {
    let (left, right) = AppLayout::split_list_detail(area, 60);

    if state.editing {
        let [form_area, table_area] =
            Layout::vertical([Constraint::Length(state.form.len() as u16 + 2), Constraint::Min(1)]).areas(left);
        render_form(f, form_area, state.form, palette, true);
        render_entries(f, table_area, state.log, palette);
    } else {
        render_entries(f, left, state.log, palette);
    }

    let [averages_area, mood_area] = Layout::vertical([Constraint::Length(6), Constraint::Min(1)]).areas(right);
    render_averages(f, averages_area, &state.log.averages(), palette);
    render_mood_calendar(f, mood_area, state.moods, state.mood_day, palette);
}

fn render_entries(f: &mut Frame, area: Rect, log: &ProgressLog, palette: &Palette) {
    let header = Row::new(["Date", "Weight", "BMI", "Calories", "Steps"]).style(palette.accent().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = log
        .entries()
        .iter()
        .map(|e| {
            Row::new(vec![
                Cell::from(e.date.clone()),
                Cell::from(format!("{:.1}", e.weight)),
                Cell::from(format!("{:.1}", e.bmi)),
                Cell::from(format!("{}", e.calories)),
                Cell::from(e.steps.to_string()),
            ])
        })
        .collect();

    let title = if log.is_empty() { "Entries (none yet)".to_string() } else { format!("Entries ({})", log.len()) };
    let table = Table::new(rows, [
        Constraint::Length(11),
        Constraint::Length(7),
        Constraint::Length(5),
        Constraint::Length(9),
        Constraint::Min(5),
    ])
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title).style(palette.base()))
    .style(palette.base());
    f.render_widget(table, area);
}

/// Each category's share of the combined averages, 0.0 to 1.0
pub fn category_shares(averages: &CategoryAverages) -> [(&'static str, f64, f64); 4] {
    let pairs = averages.as_pairs();
    let total: f64 = pairs.iter().map(|(_, v)| v).sum();
    pairs.map(|(label, value)| {
        let share = if total > 0.0 { (value / total).clamp(0.0, 1.0) } else { 0.0 };
        (label, value, share)
    })
}

fn render_averages(f: &mut Frame, area: Rect, averages: &CategoryAverages, palette: &Palette) {
    let block = Block::default().borders(Borders::ALL).title("Category Averages").style(palette.base());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::vertical([Constraint::Length(1); 4]).split(inner);
    for (i, (label, value, share)) in category_shares(averages).into_iter().enumerate() {
        let gauge = Gauge::default()
            .gauge_style(palette.accent())
            .ratio(share)
            .label(format!("{} {:.1}", label, value));
        f.render_widget(gauge, rows[i]);
    }
}

fn render_mood_calendar(f: &mut Frame, area: Rect, moods: &MoodCalendar, selected: u8, palette: &Palette) {
    let mut lines = Vec::new();
    let mut spans = Vec::new();
    for day in 1..=CALENDAR_DAYS {
        let symbol = moods.get(day).map(|m| m.symbol()).unwrap_or("  ");
        let style = if day == selected { palette.highlight() } else { palette.base() };
        spans.push(Span::styled(format!("{:>2} {} ", day, symbol), style));
        if day % MOOD_COLUMNS == 0 {
            lines.push(Line::from(std::mem::take(&mut spans)));
        }
    }
    if !spans.is_empty() {
        lines.push(Line::from(spans));
    }

    let tally = mood_tally(moods)
        .iter()
        .map(|(mood, count)| format!("{} {}", mood.symbol(), count))
        .collect::<Vec<_>>()
        .join("  ");
    let title = format!("Mood Calendar ({})", tally);

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title).style(palette.base()))
        .style(palette.base());
    f.render_widget(paragraph, area);
}

/// Number of recorded days per mood, in `Mood::ALL` order
pub fn mood_tally(moods: &MoodCalendar) -> [(Mood, usize); 3] {
    let mut tally = Mood::ALL.map(|mood| (mood, 0));
    for (_, mood) in moods.iter() {
        if let Some(slot) = tally.iter_mut().find(|(m, _)| *m == mood) {
            slot.1 += 1;
        }
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_sum_to_one() {
        let averages = CategoryAverages { diet: 2.0, water: 2.0, sleep: 4.0, workout: 0.0 };
        let shares = category_shares(&averages);
        assert_eq!(shares[2].2, 0.5);
        let total: f64 = shares.iter().map(|s| s.2).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn tally_counts_recorded_days() {
        let mut moods = MoodCalendar::new();
        moods.record(1, "happy").unwrap();
        moods.record(2, "😊").unwrap();
        moods.record(9, "sad").unwrap();

        assert_eq!(mood_tally(&moods), [(Mood::Happy, 2), (Mood::Ok, 0), (Mood::Sad, 1)]);
    }

    #[test]
    fn empty_log_has_zero_shares() {
        let shares = category_shares(&CategoryAverages::default());
        assert!(shares.iter().all(|s| s.2 == 0.0));
    }
}
