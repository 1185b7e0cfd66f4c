use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::widgets::color::Palette;
use crate::tui::widgets::input::Input;

/// A labelled group of inputs with one focused field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldForm {
    pub title: &'static str,
    fields: Vec<(&'static str, Input)>,
    focus: usize,
}

impl FieldForm {
    pub fn new(title: &'static str, labels: &[&'static str]) -> Self {
        Self {
            title,
            fields: labels.iter().map(|l| (*l, Input::new())).collect(),
            focus: 0,
        }
    }

    /// Prefill fields in order; extra values are ignored
    pub fn with_values<S: AsRef<str>>(mut self, values: &[S]) -> Self {
        for ((_, input), value) in self.fields.iter_mut().zip(values) {
            input.set_value(value.as_ref().to_string());
        }
        self
    }

    /// Let the field at `index` accept line breaks
    pub fn with_multiline(mut self, index: usize) -> Self {
        if let Some((_, input)) = self.fields.get_mut(index) {
            *input = std::mem::take(input).multiline();
        }
        self
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|(_, i)| i.value()).unwrap_or("")
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Forward an editing key to the focused input. Returns true if its value changed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match self.fields.get_mut(self.focus) {
            Some((_, input)) => input.handle_key(key),
            None => false,
        }
    }

    pub fn clear(&mut self) {
        for (_, input) in &mut self.fields {
            input.clear();
        }
        self.focus = 0;
    }

    fn label_width(&self) -> usize {
        self.fields.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0) + 2
    }
}

/// Render one line per field; the focused line is highlighted and gets the cursor
pub fn render_form(f: &mut Frame, area: Rect, form: &FieldForm, palette: &Palette, show_cursor: bool) {
    let label_width = form.label_width();
    let inner_width = area.width.saturating_sub(2) as usize;
    let value_width = inner_width.saturating_sub(label_width);

    let mut cursor = None;
    let lines: Vec<Line> = form.fields.iter().enumerate().map(|(i, (label, input))| {
        let (text, cursor_x) = input.visible(value_width);
        let focused = i == form.focus;
        if focused {
            cursor = Some((label_width + cursor_x, i));
        }
        let style = if focused { palette.highlight() } else { palette.base() };
        Line::from(vec![
            Span::styled(format!("{:<width$}", format!("{}:", label), width = label_width), style),
            Span::styled(format!("{:<width$}", text, width = value_width), style),
        ])
    }).collect();

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(form.title))
        .style(palette.base());
    f.render_widget(paragraph, area);

    if show_cursor {
        if let Some((x, y)) = cursor {
            if (y as u16) < area.height.saturating_sub(2) {
                f.set_cursor_position((area.x + 1 + x as u16, area.y + 1 + y as u16));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn focus_wraps_both_ways() {
        let mut form = FieldForm::new("Test", &["a", "b", "c"]);
        form.prev_field();
        assert_eq!(form.focus(), 2);
        form.next_field();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn keys_go_to_focused_field() {
        let mut form = FieldForm::new("Test", &["a", "b"]);
        form.next_field();
        form.handle_key(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(form.value(0), "");
        assert_eq!(form.value(1), "x");
    }

    #[test]
    fn prefill_and_clear() {
        let mut form = FieldForm::new("Test", &["a", "b"]).with_values(&["1", "2", "3"]);
        assert_eq!(form.value(1), "2");
        form.clear();
        assert_eq!(form.value(0), "");
    }
}
