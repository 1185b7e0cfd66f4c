use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::models::Post;
use crate::posts::PostCollection;
use crate::tui::layout::Layout as AppLayout;
use crate::tui::widgets::color::Palette;
use crate::tui::widgets::form::{FieldForm, render_form};

/// Single-line preview of a post for the list column
pub fn post_preview(post: &Post, width: usize) -> String {
    let first_line = post.content.lines().next().unwrap_or("");
    if first_line.chars().count() > width {
        let mut preview: String = first_line.chars().take(width.saturating_sub(3)).collect();
        preview.push_str("...");
        preview
    } else {
        first_line.to_string()
    }
}

pub fn render_blog(
    f: &mut Frame,
    area: Rect,
    posts: &PostCollection,
    list_state: &mut ListState,
    form: &FieldForm,
    editing: bool,
    palette: &Palette,
) {
    let content_area = if editing {
        let [form_area, rest] = Layout::vertical([Constraint::Length(form.len() as u16 + 2), Constraint::Min(1)]).areas(area);
        render_form(f, form_area, form, palette, true);
        rest
    } else {
        area
    };

    let (list_area, detail_area) = AppLayout::split_list_detail(content_area, 40);
    let preview_width = list_area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = posts
        .posts()
        .iter()
        .map(|post| {
            ListItem::new(vec![
                Line::from(Span::styled(post_preview(post, preview_width), palette.base())),
                Line::from(Span::styled(post.timestamp.clone(), palette.accent())),
            ])
        })
        .collect();

    let title = if posts.is_empty() { "Posts".to_string() } else { format!("Posts ({})", posts.len()) };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title).style(palette.base()))
        .style(palette.base())
        .highlight_style(palette.highlight());
    f.render_stateful_widget(list, list_area, list_state);

    let selected = list_state.selected().and_then(|i| posts.posts().get(i));
    let detail = match selected {
        Some(post) => vec![
            Line::from(Span::styled(post.author.clone(), palette.accent().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(post.timestamp.clone(), palette.base())),
            Line::from(""),
            Line::from(Span::styled(post.content.clone(), palette.base())),
            Line::from(""),
            Line::from(Span::styled(format!("🖼  {}", post.image), palette.base().add_modifier(Modifier::ITALIC))),
        ],
        None => vec![Line::from(Span::styled("No posts yet. Start writing!", palette.base()))],
    };

    let paragraph = Paragraph::new(detail)
        .block(Block::default().borders(Borders::ALL).title("Post").style(palette.base()))
        .style(palette.base())
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, detail_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(content: &str) -> Post {
        Post::new(content.to_string(), "Anonymous".to_string(), "img".to_string())
    }

    #[test]
    fn preview_uses_first_line() {
        assert_eq!(post_preview(&post("Leg day\nsquats"), 20), "Leg day");
    }

    #[test]
    fn long_preview_is_truncated() {
        assert_eq!(post_preview(&post("abcdefghij"), 6), "abc...");
    }
}
