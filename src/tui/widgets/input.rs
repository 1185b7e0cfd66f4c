use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Text input with a character-indexed cursor. Multiline inputs take
/// Alt+Enter as a line break and still render on one row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Input {
    value: String,
    cursor: usize,
    multiline: bool,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_string(value: String) -> Self {
        let cursor = value.chars().count();
        Self { value, cursor, multiline: false }
    }

    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    /// Replace the value and move the cursor to the end
    pub fn set_value(&mut self, value: String) {
        self.cursor = value.chars().count();
        self.value = value;
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
    }

    /// Delete the character before the cursor
    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.value.remove(at);
        self.cursor -= 1;
    }

    /// Delete the character under the cursor
    pub fn delete_forward(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Apply an editing key. Returns true if the value changed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(ch);
                true
            }
            KeyCode::Enter if self.multiline && key.modifiers.contains(KeyModifiers::ALT) => {
                self.insert_char('\n');
                true
            }
            KeyCode::Backspace => {
                let before = self.value.len();
                self.delete_char();
                before != self.value.len()
            }
            KeyCode::Delete => {
                let before = self.value.len();
                self.delete_forward();
                before != self.value.len()
            }
            KeyCode::Left => {
                self.move_left();
                false
            }
            KeyCode::Right => {
                self.move_right();
                false
            }
            KeyCode::Home => {
                self.move_home();
                false
            }
            KeyCode::End => {
                self.move_end();
                false
            }
            _ => false,
        }
    }

    /// Visible slice for a field `width` columns wide and the cursor offset inside it
    pub fn visible(&self, width: usize) -> (String, usize) {
        if width == 0 {
            return (String::new(), 0);
        }
        let start = self.cursor.saturating_sub(width - 1);
        let text: String = self
            .value
            .chars()
            .skip(start)
            .take(width)
            .map(|c| if c == '\n' { '↵' } else { c })
            .collect();
        (text, self.cursor - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_and_backspace() {
        let mut input = Input::new();
        for ch in "hi!".chars() {
            input.handle_key(&key(KeyCode::Char(ch)));
        }
        assert_eq!(input.value(), "hi!");
        assert!(input.handle_key(&key(KeyCode::Backspace)));
        assert_eq!(input.value(), "hi");
    }

    #[test]
    fn edits_in_the_middle_of_multibyte_text() {
        let mut input = Input::from_string("😊ok".to_string());
        input.move_home();
        input.move_right();
        input.insert_char('!');
        assert_eq!(input.value(), "😊!ok");
        input.delete_forward();
        assert_eq!(input.value(), "😊!k");
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut input = Input::from_string("a".to_string());
        input.move_home();
        assert!(!input.handle_key(&key(KeyCode::Backspace)));
        assert_eq!(input.value(), "a");
    }

    #[test]
    fn alt_enter_breaks_lines_only_when_multiline() {
        let alt_enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT);

        let mut single = Input::from_string("a".to_string());
        assert!(!single.handle_key(&alt_enter));
        assert_eq!(single.value(), "a");

        let mut multi = Input::from_string("a".to_string()).multiline();
        assert!(multi.handle_key(&alt_enter));
        multi.insert_char('b');
        assert_eq!(multi.value(), "a\nb");
        assert_eq!(multi.visible(10).0, "a↵b");
    }

    #[test]
    fn visible_window_follows_cursor() {
        let input = Input::from_string("abcdefgh".to_string());
        let (text, cursor) = input.visible(4);
        assert_eq!(text, "fgh");
        assert_eq!(cursor, 3);
    }
}
