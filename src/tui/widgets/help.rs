use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::Config;
use crate::tui::widgets::color::Palette;
use crate::tui::widgets::popup::popup_area;
use crate::utils::format_key_binding_for_display as key;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config, palette: &Palette) {
    let popup = popup_area(area, 60, 80);
    f.render_widget(Clear, popup);

    let paragraph = Paragraph::new(build_help_text(config))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help - Key Bindings")
                .title_alignment(Alignment::Center)
                .style(palette.base()),
        )
        .style(palette.base())
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup);
}

pub fn build_help_text(config: &Config) -> String {
    let kb = &config.key_bindings;
    let mut text = String::new();

    text.push_str("Navigation:\n");
    text.push_str(&format!("  {} / {}: Switch tabs\n", key(&kb.prev_tab), key(&kb.next_tab)));
    text.push_str("  1-5: Jump to tab\n");
    text.push_str(&format!("  {} / {}: Move selection\n", key(&kb.list_up), key(&kb.list_down)));
    text.push_str("  ← / →: Pick a day (streak and mood calendar)\n");
    text.push('\n');

    text.push_str("Actions:\n");
    text.push_str(&format!("  {}: New post, progress entry or diet details\n", key(&kb.new)));
    text.push_str(&format!("  {}: Edit profile\n", key(&kb.edit)));
    text.push_str(&format!("  {}: Delete selected post\n", key(&kb.delete)));
    text.push_str(&format!("  {}: Toggle streak day, feature card or diet type\n", key(&kb.toggle)));
    text.push_str(&format!("  {}: Expand card, set mood or generate plan\n", key(&kb.select)));
    text.push_str(&format!("  {}: Ask the diet advisor\n", key(&kb.ask)));
    text.push_str("  c: Clear diet details\n");
    text.push('\n');

    text.push_str("Forms:\n");
    text.push_str("  Tab / ↓ / ↑: Next / previous field\n");
    text.push_str("  Enter: Submit\n");
    text.push_str("  Esc: Close\n");
    text.push('\n');

    text.push_str("General:\n");
    text.push_str(&format!("  {}: Quit\n", key(&kb.quit)));
    text.push_str(&format!("  {}: Show/hide help\n", key(&kb.help)));
    text.push_str(&format!("  {}: Toggle light/dark theme\n", key(&kb.theme_toggle)));
    text.push_str(&format!("  {}: Sign out\n", key(&kb.sign_out)));

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_reflects_configured_bindings() {
        let mut config = Config::default();
        config.key_bindings.quit = "x".to_string();
        let text = build_help_text(&config);
        assert!(text.contains("x: Quit"));
        assert!(text.contains("Sign out"));
    }
}
