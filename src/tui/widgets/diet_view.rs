use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratskin::RatSkin;
use termimad::minimad::Text as MinimadText;

use crate::diet::DietPreference;
use crate::tui::app::DietState;
use crate::tui::widgets::color::Palette;
use crate::tui::widgets::form::{FieldForm, render_form};

pub fn render_diet(
    f: &mut Frame,
    area: Rect,
    diet: &DietState,
    form: &FieldForm,
    editing: bool,
    palette: &Palette,
) {
    let [pref_area, form_area, plan_area, answer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(form.len() as u16 + 2),
        Constraint::Min(3),
        Constraint::Length(4),
    ])
    .areas(area);

    let spans: Vec<Span> = [DietPreference::Veg, DietPreference::NonVeg]
        .iter()
        .map(|p| {
            let style = if *p == diet.preference { palette.highlight() } else { palette.base() };
            Span::styled(format!(" {} ", p.label()), style)
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(spans)).style(palette.base()), pref_area);

    render_form(f, form_area, form, palette, editing);

    let plan_block = Block::default().borders(Borders::ALL).title("Diet Plan").style(palette.base());
    if diet.is_generating() {
        let paragraph = Paragraph::new("Generating...").block(plan_block).style(palette.base());
        f.render_widget(paragraph, plan_area);
    } else {
        let inner = plan_block.inner(plan_area);
        f.render_widget(plan_block, plan_area);
        let markdown = diet.plan.as_deref().unwrap_or("Fill in your details and press Enter.");
        let parsed = RatSkin::default().parse(MinimadText::from(markdown), inner.width);
        // Rebuild as owned ratatui lines, keeping ratskin's span styles
        let lines: Vec<Line> = parsed
            .into_iter()
            .map(|line| {
                Line::from(
                    line.spans
                        .into_iter()
                        .map(|span| Span::styled(span.content.to_string(), span.style))
                        .collect::<Vec<Span>>(),
                )
            })
            .collect();
        f.render_widget(Paragraph::new(lines).style(palette.base()).wrap(Wrap { trim: false }), inner);
    }

    let answer = if diet.is_thinking() {
        "Thinking...".to_string()
    } else {
        diet.answer.clone().unwrap_or_else(|| "Press a to ask the advisor a question.".to_string())
    };
    let paragraph = Paragraph::new(answer)
        .block(Block::default().borders(Borders::ALL).title("AI Diet Advisor").style(palette.base()))
        .style(palette.base())
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, answer_area);
}
