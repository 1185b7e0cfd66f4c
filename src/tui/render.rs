use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::widgets::{Block, Borders};

use crate::mood::MOOD_PROMPT;
use crate::tui::app::{Mode, PromptKind, Tab};
use crate::tui::widgets::{
    blog_view::render_blog,
    color::Palette,
    confirm_delete::render_confirm_delete,
    dashboard_view::render_dashboard,
    diet_view::render_diet,
    help::render_help,
    login_view::render_login,
    popup::render_prompt,
    profile_view::{ProfileViewState, render_profile},
    progress_view::{ProgressViewState, render_progress},
    status_bar::render_status_bar,
    tabs::render_tabs,
};
use crate::tui::{App, Layout};
use crate::utils::format_key_binding_for_display as key;

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    let palette = Palette::from_config(&app.config);

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title(format!("FitTrack {}", app.route.path()))
        .title_alignment(Alignment::Center)
        .style(palette.base());
    f.render_widget(outer_block, f.area());

    // Unauthenticated sessions only ever see the login screen
    if app.is_locked() {
        render_login(f, layout.main_area, &app.ui.login, &palette);
        render_status_bar(f, layout.status_area, app.status.message.as_deref(), &[], &palette);
        return;
    }

    render_tabs(f, layout.tabs_area, app.ui.tab, &palette);

    let editing = app.ui.mode == Mode::Form;
    match app.ui.tab {
        Tab::Dashboard => render_dashboard(
            f,
            layout.main_area,
            &app.session,
            &app.dashboard,
            app.ui.dashboard_index,
            &palette,
        ),
        Tab::Profile => {
            let state = ProfileViewState {
                profile: &app.profile,
                form: &app.forms.profile,
                streak: &app.streak,
                streak_index: app.ui.streak_index,
                show_cursor: editing,
            };
            render_profile(f, layout.main_area, &state, &palette);
        }
        Tab::Diet => render_diet(f, layout.main_area, &app.diet, &app.forms.diet, editing, &palette),
        Tab::Progress => {
            let state = ProgressViewState {
                log: &app.progress,
                form: &app.forms.progress,
                editing,
                moods: &app.moods,
                mood_day: app.ui.mood_day,
            };
            render_progress(f, layout.main_area, &state, &palette);
        }
        Tab::Blog => render_blog(
            f,
            layout.main_area,
            &app.posts,
            &mut app.ui.post_list,
            &app.forms.post,
            editing,
            &palette,
        ),
    }

    // Overlays render after the tab content
    match app.ui.mode {
        Mode::Help => render_help(f, f.area(), &app.config, &palette),
        Mode::Prompt(PromptKind::Mood(day)) => {
            render_prompt(f, f.area(), &format!("Day {}", day), MOOD_PROMPT, &app.ui.prompt, &palette);
        }
        Mode::Prompt(PromptKind::AskAdvisor) => render_prompt(
            f,
            f.area(),
            "AI Diet Advisor",
            "Ask a diet question",
            &app.ui.prompt,
            &palette,
        ),
        Mode::ConfirmDelete => {
            let selected = app.selected_post_id();
            if let Some(post) = selected.and_then(|id| app.posts.get(&id)) {
                render_confirm_delete(f, f.area(), post, app.ui.delete_selection, &palette);
            }
        }
        Mode::View | Mode::Form => {}
    }

    let key_hints = get_key_hints(app);
    render_status_bar(f, layout.status_area, app.status.message.as_deref(), &key_hints, &palette);
}

fn get_key_hints(app: &App) -> Vec<String> {
    let kb = &app.config.key_bindings;
    match app.ui.mode {
        Mode::Help => vec![format!("Esc or {}: Exit help", key(&kb.help))],
        Mode::Form if app.ui.tab == Tab::Profile => vec![
            "Tab/↓: Next field".to_string(),
            "Shift+Tab/↑: Previous field".to_string(),
            "Enter/Esc: Done".to_string(),
        ],
        Mode::Form if app.ui.tab == Tab::Blog => vec![
            "Tab/↓: Next field".to_string(),
            "Alt+Enter: New line".to_string(),
            "Enter: Publish".to_string(),
            "Esc: Cancel".to_string(),
        ],
        Mode::Form => vec![
            "Tab/↓: Next field".to_string(),
            "Shift+Tab/↑: Previous field".to_string(),
            "Enter: Submit".to_string(),
            "Esc: Cancel".to_string(),
        ],
        Mode::Prompt(_) => vec!["Enter: Submit".to_string(), "Esc: Cancel".to_string()],
        Mode::ConfirmDelete => vec![
            "↑/↓: Choose".to_string(),
            "Enter: Confirm".to_string(),
            "Esc: Cancel".to_string(),
        ],
        Mode::View => {
            let mut hints = vec![format!("{}: Quit", key(&kb.quit))];
            match app.ui.tab {
                Tab::Dashboard => {
                    hints.push(format!("{}/{}: Select", key(&kb.list_up), key(&kb.list_down)));
                    hints.push(format!("{}: Expand", key(&kb.select)));
                }
                Tab::Profile => {
                    hints.push(format!("{}: Edit", key(&kb.edit)));
                    hints.push("←/→: Day".to_string());
                    hints.push(format!("{}: Toggle day", key(&kb.toggle)));
                }
                Tab::Diet => {
                    hints.push(format!("{}: Details", key(&kb.new)));
                    hints.push(format!("{}: Veg/Non-Veg", key(&kb.toggle)));
                    hints.push(format!("{}: Generate", key(&kb.select)));
                    hints.push(format!("{}: Ask AI", key(&kb.ask)));
                    hints.push("c: Clear".to_string());
                }
                Tab::Progress => {
                    hints.push(format!("{}: Add entry", key(&kb.new)));
                    hints.push("←/→: Day".to_string());
                    hints.push(format!("{}: Set mood", key(&kb.select)));
                }
                Tab::Blog => {
                    hints.push(format!("{}: New post", key(&kb.new)));
                    hints.push(format!("{}: Delete", key(&kb.delete)));
                }
            }
            hints.push(format!("{}: Theme", key(&kb.theme_toggle)));
            hints.push(format!("{}: Sign out", key(&kb.sign_out)));
            hints.push(format!("{}: Help", key(&kb.help)));
            hints
        }
    }
}
