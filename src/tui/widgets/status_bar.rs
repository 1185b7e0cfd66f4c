use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;

use crate::tui::widgets::color::Palette;

const SEPARATOR: &str = " • ";
const ELLIPSIS: &str = "...";

/// Join as many hints as fit in `max_width`, ending with an ellipsis when some are dropped
pub fn fit_hints(hints: &[String], max_width: usize) -> String {
    let mut text = String::new();
    for (i, hint) in hints.iter().enumerate() {
        let extra = if i == 0 { 0 } else { SEPARATOR.chars().count() };
        let would_be = text.chars().count() + extra + hint.chars().count();

        if would_be > max_width {
            let keep = max_width.saturating_sub(ELLIPSIS.len());
            if i == 0 {
                text = hint.chars().take(keep).collect();
            } else if text.chars().count() > keep {
                text = text.chars().take(keep).collect();
            }
            text.push_str(ELLIPSIS);
            break;
        }

        if i > 0 {
            text.push_str(SEPARATOR);
        }
        text.push_str(hint);
    }
    text
}

pub fn render_status_bar(f: &mut Frame, area: Rect, message: Option<&str>, key_hints: &[String], palette: &Palette) {
    let max_width = area.width as usize;

    // A status message replaces the hints until it times out
    let (content, style) = match message {
        Some(msg) if msg.chars().count() > max_width => (
            msg.chars().take(max_width.saturating_sub(ELLIPSIS.len())).collect::<String>() + ELLIPSIS,
            palette.highlight(),
        ),
        Some(msg) => (msg.to_string(), palette.highlight()),
        None => (fit_hints(key_hints, max_width), palette.base()),
    };

    f.render_widget(Paragraph::new(content).style(style), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints() -> Vec<String> {
        vec!["q: Quit".into(), "F1: Help".into(), "n: New".into()]
    }

    #[test]
    fn all_hints_fit() {
        assert_eq!(fit_hints(&hints(), 80), "q: Quit • F1: Help • n: New");
    }

    #[test]
    fn overflow_ends_with_ellipsis() {
        let text = fit_hints(&hints(), 20);
        assert!(text.ends_with("..."));
        assert!(text.chars().count() <= 20);
        assert!(text.starts_with("q: Quit"));
    }
}
