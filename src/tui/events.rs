use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, size as terminal_size};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use std::io;
use std::time::Duration;

use crate::tui::App;
use crate::tui::app::{Mode, PromptKind, Tab};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::tui::widgets::confirm_delete::DELETE_OPTIONS;
use crate::utils::parse_key_binding;

const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Guard that ensures terminal state is restored even on panic
/// If the terminal is left in raw mode or the alternate screen, the user's shell is unusable.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Restore terminal state on normal exit; drop becomes a no-op afterwards
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Already in a cleanup path, errors are ignored
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check size before entering the alternate screen so the error is readable
    let (width, height) = terminal_size()?;
    if width < Layout::MIN_WIDTH || height < Layout::MIN_HEIGHT {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width,
            height,
            Layout::MIN_WIDTH,
            Layout::MIN_HEIGHT
        )));
    }

    let mut guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    tracing::info!("tui started");

    loop {
        app.check_status_message_timeout();
        app.poll_background();

        let size = terminal.size()?;
        let terminal_rect = Rect::new(0, 0, size.width, size.height);
        terminal.draw(|f| {
            let layout = Layout::calculate(terminal_rect);
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        // Only Press events; Windows also reports Release
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press && handle_key_event(&mut app, key_event)? {
                    break;
                }
            }
        }
    }

    guard.restore()?;
    tracing::info!("tui stopped");
    Ok(())
}

/// Whether `key_event` matches the configured binding string
fn is_binding(binding: &str, key_event: &KeyEvent) -> Result<bool, TuiError> {
    let parsed = parse_key_binding(binding).map_err(TuiError::KeyBindingError)?;
    Ok(parsed.matches(key_event))
}

/// Returns true when the app should quit
fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if app.is_locked() {
        return handle_login(app, key_event);
    }

    match app.ui.mode {
        Mode::Help => handle_help_mode(app, key_event),
        Mode::Form => handle_form_mode(app, key_event),
        Mode::Prompt(kind) => handle_prompt_mode(app, kind, key_event),
        Mode::ConfirmDelete => handle_delete_confirmation_modal(app, key_event),
        Mode::View => {
            if let Some(quit) = handle_global_key_bindings(app, key_event)? {
                return Ok(quit);
            }
            handle_tab_keys(app, key_event)?;
            Ok(false)
        }
    }
}

fn handle_login(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match key_event.code {
        KeyCode::Esc => return Ok(true),
        KeyCode::Enter => app.submit_login(),
        _ => {
            app.ui.login.handle_key(&key_event);
        }
    }
    Ok(false)
}

fn handle_help_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if key_event.code == KeyCode::Esc || is_binding(&app.config.key_bindings.help, &key_event)? {
        app.exit_to_view();
    }
    Ok(false)
}

fn handle_form_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match key_event.code {
        KeyCode::Esc => app.cancel_form(),
        // Alt+Enter falls through to the field as a line break
        KeyCode::Enter if !key_event.modifiers.contains(KeyModifiers::ALT) => app.submit_form(),
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.current_form_mut() {
                form.next_field();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = app.current_form_mut() {
                form.prev_field();
            }
        }
        _ => {
            let changed = app.current_form_mut().is_some_and(|form| form.handle_key(&key_event));
            // Profile edits apply as they are typed
            if changed && app.ui.tab == Tab::Profile {
                app.sync_profile_field();
            }
        }
    }
    Ok(false)
}

fn handle_prompt_mode(app: &mut App, kind: PromptKind, key_event: KeyEvent) -> Result<bool, TuiError> {
    match key_event.code {
        KeyCode::Esc => app.exit_to_view(),
        KeyCode::Enter => app.submit_prompt(kind),
        _ => {
            app.ui.prompt.handle_key(&key_event);
        }
    }
    Ok(false)
}

fn handle_delete_confirmation_modal(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let count = DELETE_OPTIONS.len();
    match key_event.code {
        KeyCode::Up => app.ui.delete_selection = (app.ui.delete_selection + count - 1) % count,
        KeyCode::Down => app.ui.delete_selection = (app.ui.delete_selection + 1) % count,
        KeyCode::Enter => app.confirm_delete(),
        KeyCode::Esc => app.exit_to_view(),
        _ => {}
    }
    Ok(false)
}

/// Bindings available on every tab in View mode. `Some(quit)` when the key was consumed.
fn handle_global_key_bindings(app: &mut App, key_event: KeyEvent) -> Result<Option<bool>, TuiError> {
    let kb = app.config.key_bindings.clone();

    if is_binding(&kb.quit, &key_event)? {
        return Ok(Some(true));
    }
    if is_binding(&kb.next_tab, &key_event)? {
        app.next_tab();
        return Ok(Some(false));
    }
    if is_binding(&kb.prev_tab, &key_event)? {
        app.prev_tab();
        return Ok(Some(false));
    }
    if is_binding(&kb.help, &key_event)? {
        app.enter_help_mode();
        return Ok(Some(false));
    }
    if is_binding(&kb.theme_toggle, &key_event)? {
        app.toggle_theme();
        return Ok(Some(false));
    }
    if is_binding(&kb.sign_out, &key_event)? {
        app.sign_out();
        return Ok(Some(false));
    }

    // Number keys jump straight to a tab
    if let KeyCode::Char(c) = key_event.code {
        if let Some(tab) = c.to_digit(10).and_then(|d| Tab::ALL.get((d as usize).wrapping_sub(1)).copied()) {
            app.switch_tab(tab);
            return Ok(Some(false));
        }
    }

    Ok(None)
}

fn handle_tab_keys(app: &mut App, key_event: KeyEvent) -> Result<(), TuiError> {
    let kb = app.config.key_bindings.clone();
    let up = is_binding(&kb.list_up, &key_event)? || key_event.code == KeyCode::Up;
    let down = is_binding(&kb.list_down, &key_event)? || key_event.code == KeyCode::Down;

    match app.ui.tab {
        Tab::Dashboard => {
            if up || down {
                app.move_dashboard_selection(down);
            } else if is_binding(&kb.select, &key_event)? || is_binding(&kb.toggle, &key_event)? {
                app.toggle_dashboard_card();
            }
        }
        Tab::Profile => {
            if is_binding(&kb.edit, &key_event)? {
                app.toggle_profile_edit();
            } else if is_binding(&kb.toggle, &key_event)? {
                app.toggle_streak_day();
            } else if matches!(key_event.code, KeyCode::Left | KeyCode::Char('h')) {
                app.move_streak_selection(false);
            } else if matches!(key_event.code, KeyCode::Right | KeyCode::Char('l')) {
                app.move_streak_selection(true);
            }
        }
        Tab::Diet => {
            if is_binding(&kb.new, &key_event)? {
                app.open_form();
            } else if is_binding(&kb.toggle, &key_event)? {
                app.toggle_diet_preference();
            } else if is_binding(&kb.select, &key_event)? {
                app.submit_diet_form();
            } else if is_binding(&kb.ask, &key_event)? {
                app.open_prompt(PromptKind::AskAdvisor);
            } else if key_event.code == KeyCode::Char('c') {
                app.clear_diet_form();
            }
        }
        Tab::Progress => {
            if is_binding(&kb.new, &key_event)? {
                app.open_form();
            } else if is_binding(&kb.select, &key_event)? {
                let day = app.ui.mood_day;
                app.open_prompt(PromptKind::Mood(day));
            } else if matches!(key_event.code, KeyCode::Left | KeyCode::Char('h')) {
                app.move_mood_day(-1);
            } else if matches!(key_event.code, KeyCode::Right | KeyCode::Char('l')) {
                app.move_mood_day(1);
            } else if up {
                app.move_mood_day(-5);
            } else if down {
                app.move_mood_day(5);
            }
        }
        Tab::Blog => {
            if is_binding(&kb.new, &key_event)? {
                app.open_form();
            } else if is_binding(&kb.delete, &key_event)? {
                app.request_delete();
            } else if up || down {
                app.move_post_selection(down);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::{Config, Database};

    fn app() -> App {
        App::new(Config::default(), Database::open_in_memory().unwrap(), Session::for_user(Some("Tester")))
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn quit_key_only_quits_in_view_mode() {
        let mut app = app();
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.ui.mode, Mode::Form);
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.forms.post.value(0), "q");

        press(&mut app, KeyCode::Esc);
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn alt_enter_adds_a_line_to_post_content() {
        let mut app = app();
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Run");
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT)).unwrap();
        type_text(&mut app, "5k");
        assert_eq!(app.ui.mode, Mode::Form);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.ui.mode, Mode::View);
        assert_eq!(app.posts.posts()[0].content, "Run\n5k");
    }

    #[test]
    fn number_keys_switch_tabs() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.ui.tab, Tab::Progress);
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.ui.tab, Tab::Progress);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.ui.tab, Tab::Blog);
    }

    #[test]
    fn login_screen_takes_typed_name() {
        let mut app = App::new(Config::default(), Database::open_in_memory().unwrap(), Session::signed_out());
        type_text(&mut app, "qa");
        assert!(app.is_locked());
        press(&mut app, KeyCode::Enter);
        assert!(!app.is_locked());
        assert_eq!(app.session.display_name(), Some("qa"));
    }

    #[test]
    fn blog_post_and_delete_via_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Deadlifts today");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.posts.len(), 1);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.ui.mode, Mode::ConfirmDelete);
        press(&mut app, KeyCode::Enter);
        assert!(app.posts.is_empty());
    }

    #[test]
    fn profile_typing_updates_record() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "X");
        assert_eq!(app.profile.field(crate::profile::ProfileField::Name), "TestX");
        press(&mut app, KeyCode::Enter);
        assert!(!app.profile.is_editing());
    }

    #[test]
    fn streak_day_toggles_with_space() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.streak.is_done(1));
        assert!(!app.streak.is_done(0));
    }

    #[test]
    fn mood_prompt_from_progress_tab() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.ui.mode, Mode::Prompt(PromptKind::Mood(6)));
        type_text(&mut app, "happy");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.moods.get(6), Some(crate::models::Mood::Happy));
    }

    #[test]
    fn help_toggles_with_f1() {
        let mut app = app();
        press(&mut app, KeyCode::F(1));
        assert_eq!(app.ui.mode, Mode::Help);
        press(&mut app, KeyCode::F(1));
        assert_eq!(app.ui.mode, Mode::View);
    }
}
