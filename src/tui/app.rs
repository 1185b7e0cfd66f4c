use ratatui::widgets::ListState;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use crate::advisor::{AdvisorClient, AdvisorError, format_answer};
use crate::dashboard::{Dashboard, FEATURES};
use crate::diet::{DietForm, DietPreference, MISSING_FIELDS_MESSAGE, spawn_plan};
use crate::mood::{CALENDAR_DAYS, MoodCalendar};
use crate::posts::PostCollection;
use crate::profile::{ProfileEditor, ProfileField, ProfileRecord};
use crate::progress::{PROGRESS_FIELDS, ProgressForm, ProgressLog};
use crate::session::{Route, Session};
use crate::streak::{CELEBRATION_MESSAGE, StreakWeek, WEEK_DAYS};
use crate::tui::widgets::form::FieldForm;
use crate::tui::widgets::input::Input;
use crate::utils::{Profile, get_current_date_string};
use crate::{Config, Database};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Profile,
    Diet,
    Progress,
    Blog,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Dashboard, Tab::Profile, Tab::Diet, Tab::Progress, Tab::Blog];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Profile => "Profile",
            Tab::Diet => "Diet",
            Tab::Progress => "Progress",
            Tab::Blog => "Blog",
        }
    }

    pub fn route(self) -> Route {
        match self {
            Tab::Dashboard => Route::Dashboard,
            Tab::Profile => Route::Profile,
            Tab::Diet => Route::Diet,
            Tab::Progress => Route::Progress,
            Tab::Blog => Route::Blog,
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Mood(u8),
    AskAdvisor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    Help,
    /// Editing the current tab's form
    Form,
    Prompt(PromptKind),
    ConfirmDelete,
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub tab: Tab,
    pub mode: Mode,
    pub dashboard_index: usize,
    pub streak_index: usize,
    pub mood_day: u8,
    pub post_list: ListState,
    pub prompt: Input,
    pub login: Input,
    /// 0 = Delete, 1 = Cancel
    pub delete_selection: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tab: Tab::Dashboard,
            mode: Mode::View,
            dashboard_index: 0,
            streak_index: 0,
            mood_day: 1,
            post_list: ListState::default(),
            prompt: Input::new(),
            login: Input::new(),
            delete_selection: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub post: FieldForm,
    pub progress: FieldForm,
    pub diet: FieldForm,
    pub profile: FieldForm,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            post: FieldForm::new("New Post", &["Content", "Image URL"]).with_multiline(0),
            progress: FieldForm::new("Add Progress", &[
                "Date", "Weight", "Calories", "Steps", "Diet", "Water", "Sleep", "Workout",
            ]),
            diet: FieldForm::new("Your Details", &["Height (cm)", "Weight (kg)", "Age", "Gender"]),
            profile: FieldForm::new("Edit Profile", &[]),
        }
    }
}

#[derive(Debug, Default)]
pub struct DietState {
    pub preference: DietPreference,
    pub plan: Option<String>,
    pub pending_plan: Option<Receiver<String>>,
    pub answer: Option<String>,
    pub pending_answer: Option<Receiver<Result<String, AdvisorError>>>,
    pub advisor: Option<AdvisorClient>,
}

impl DietState {
    pub fn is_generating(&self) -> bool {
        self.pending_plan.is_some()
    }

    pub fn is_thinking(&self) -> bool {
        self.pending_answer.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

pub struct App {
    pub config: Config,
    /// Where config changes are saved; `None` keeps them in memory
    pub config_profile: Option<Profile>,
    pub database: Database,
    pub session: Session,
    pub route: Route,

    pub posts: PostCollection,
    pub progress: ProgressLog,
    pub streak: StreakWeek,
    pub moods: MoodCalendar,
    pub profile: ProfileEditor,
    pub dashboard: Dashboard,
    pub diet: DietState,

    pub ui: UiState,
    pub forms: FormState,
    pub status: StatusState,
}

impl App {
    pub fn new(config: Config, database: Database, session: Session) -> Self {
        let posts = PostCollection::load(&database, &config.post_author, &config.default_post_image);
        let profile = ProfileEditor::new(ProfileRecord::from_session(&session));

        let advisor = match AdvisorClient::new(
            &config.advisor_endpoint,
            Duration::from_secs(config.advisor_timeout_secs),
        ) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::error!(error = %e, "advisor client unavailable");
                None
            }
        };

        let mut app = Self {
            route: Route::Root.resolve(&session),
            config,
            config_profile: None,
            database,
            session,
            posts,
            progress: ProgressLog::new(),
            streak: StreakWeek::new(),
            moods: MoodCalendar::new(),
            profile,
            dashboard: Dashboard::default(),
            diet: DietState { advisor, ..DietState::default() },
            ui: UiState::default(),
            forms: FormState::default(),
            status: StatusState::default(),
        };
        app.sync_post_selection();
        app
    }

    /// Persist config changes (theme) to the given profile
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.config_profile = Some(profile);
        self
    }

    /// True while the login screen is shown instead of the tabs
    pub fn is_locked(&self) -> bool {
        matches!(self.route, Route::Login | Route::Register)
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.route = tab.route().resolve(&self.session);
        if !self.is_locked() {
            self.ui.tab = tab;
            self.ui.mode = Mode::View;
        }
    }

    pub fn next_tab(&mut self) {
        let next = Tab::ALL[(self.ui.tab.index() + 1) % Tab::ALL.len()];
        self.switch_tab(next);
    }

    pub fn prev_tab(&mut self) {
        let prev = Tab::ALL[(self.ui.tab.index() + Tab::ALL.len() - 1) % Tab::ALL.len()];
        self.switch_tab(prev);
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status.message = Some(message.into());
        self.status.message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status.message = None;
        self.status.message_time = None;
    }

    /// Check if status message should be auto-cleared (after 3 seconds)
    pub fn check_status_message_timeout(&mut self) {
        const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 3;
        if let Some(time) = self.status.message_time {
            if time.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.clear_status_message();
            }
        }
    }

    pub fn enter_help_mode(&mut self) {
        self.ui.mode = Mode::Help;
    }

    pub fn exit_to_view(&mut self) {
        self.ui.mode = Mode::View;
    }

    // Session

    pub fn submit_login(&mut self) {
        let name = self.ui.login.value().to_string();
        if !self.session.sign_in(&name) {
            self.set_status_message("Please enter your name");
            return;
        }
        self.ui.login.clear();
        self.profile = ProfileEditor::new(ProfileRecord::from_session(&self.session));
        self.route = Route::Login.resolve(&self.session);
        self.ui.tab = Tab::Dashboard;
        self.ui.mode = Mode::View;
    }

    pub fn sign_out(&mut self) {
        self.session.sign_out();
        self.route = self.ui.tab.route().resolve(&self.session);
        self.ui.mode = Mode::View;
        self.set_status_message("Signed out");
    }

    pub fn toggle_theme(&mut self) {
        let theme = self.config.toggle_theme().to_string();
        if let Some(profile) = self.config_profile {
            if let Err(e) = self.config.save_with_profile(profile) {
                tracing::warn!(error = %e, "failed to save theme");
            }
        }
        self.set_status_message(format!("Theme: {}", theme));
    }

    // Dashboard

    pub fn move_dashboard_selection(&mut self, down: bool) {
        let last = FEATURES.len() - 1;
        self.ui.dashboard_index = if down {
            (self.ui.dashboard_index + 1).min(last)
        } else {
            self.ui.dashboard_index.saturating_sub(1)
        };
    }

    pub fn toggle_dashboard_card(&mut self) {
        self.dashboard.toggle(self.ui.dashboard_index);
    }

    // Profile

    /// Enter or leave profile edit mode. Leaving keeps every edit made so far.
    pub fn toggle_profile_edit(&mut self) {
        if self.profile.toggle_edit() {
            let labels: Vec<&'static str> = ProfileField::ALL.iter().map(|f| f.label()).collect();
            let values: Vec<&str> = ProfileField::ALL.iter().map(|f| self.profile.field(*f)).collect();
            self.forms.profile = FieldForm::new("Edit Profile", &labels).with_values(&values);
            self.ui.mode = Mode::Form;
        } else {
            self.ui.mode = Mode::View;
            self.set_status_message("Profile saved");
        }
    }

    /// Copy the focused profile input into the record
    pub fn sync_profile_field(&mut self) {
        let index = self.forms.profile.focus();
        if let Some(field) = ProfileField::ALL.get(index) {
            let value = self.forms.profile.value(index).to_string();
            if let Err(e) = self.profile.set_field(*field, &value) {
                tracing::warn!(error = %e, "profile edit ignored");
            }
        }
    }

    pub fn move_streak_selection(&mut self, right: bool) {
        self.ui.streak_index = if right {
            (self.ui.streak_index + 1).min(WEEK_DAYS.len() - 1)
        } else {
            self.ui.streak_index.saturating_sub(1)
        };
    }

    pub fn toggle_streak_day(&mut self) {
        match self.streak.toggle(self.ui.streak_index) {
            Ok(outcome) if outcome.celebrate => self.set_status_message(CELEBRATION_MESSAGE),
            Ok(_) => {}
            Err(e) => self.set_status_message(e.to_string()),
        }
    }

    // Progress

    pub fn submit_progress_form(&mut self) {
        let form = &self.forms.progress;
        let mut progress_form = ProgressForm::default();
        for (i, name) in PROGRESS_FIELDS.iter().enumerate() {
            if let Some(slot) = progress_form.field_mut(name) {
                *slot = form.value(i).to_string();
            }
        }

        match self.progress.add(&progress_form) {
            Ok(entry) => {
                tracing::info!(id = entry.id, date = %entry.date, bmi = entry.bmi, "progress entry added");
                self.forms.progress.clear();
                self.ui.mode = Mode::View;
                self.set_status_message(format!("Entry added (BMI {:.1})", entry.bmi));
            }
            Err(e) => self.set_status_message(e.to_string()),
        }
    }

    pub fn move_mood_day(&mut self, delta: i16) {
        let day = (self.ui.mood_day as i16 + delta).clamp(1, CALENDAR_DAYS as i16);
        self.ui.mood_day = day as u8;
    }

    pub fn open_prompt(&mut self, kind: PromptKind) {
        self.ui.prompt.clear();
        self.ui.mode = Mode::Prompt(kind);
    }

    pub fn submit_prompt(&mut self, kind: PromptKind) {
        let input = self.ui.prompt.value().to_string();
        self.ui.prompt.clear();
        self.ui.mode = Mode::View;

        match kind {
            PromptKind::Mood(day) => match self.moods.record(day, &input) {
                Ok(Some(mood)) => self.set_status_message(format!("Day {}: {}", day, mood.symbol())),
                Ok(None) => {}
                Err(e) => self.set_status_message(e.to_string()),
            },
            PromptKind::AskAdvisor => self.ask_advisor(&input),
        }
    }

    // Blog

    pub fn sync_post_selection(&mut self) {
        if self.posts.is_empty() {
            self.ui.post_list.select(None);
        } else {
            let index = self.ui.post_list.selected().unwrap_or(0).min(self.posts.len() - 1);
            self.ui.post_list.select(Some(index));
        }
    }

    pub fn move_post_selection(&mut self, down: bool) {
        if self.posts.is_empty() {
            return;
        }
        let current = self.ui.post_list.selected().unwrap_or(0);
        let next = if down {
            (current + 1).min(self.posts.len() - 1)
        } else {
            current.saturating_sub(1)
        };
        self.ui.post_list.select(Some(next));
    }

    pub fn selected_post_id(&self) -> Option<String> {
        let index = self.ui.post_list.selected()?;
        self.posts.posts().get(index).map(|p| p.id.clone())
    }

    pub fn submit_post_form(&mut self) {
        let content = self.forms.post.value(0).to_string();
        let image = self.forms.post.value(1).to_string();

        match self.posts.add(&self.database, &content, Some(&image)) {
            Ok(Some(_)) => {
                self.forms.post.clear();
                self.ui.mode = Mode::View;
                self.ui.post_list.select(Some(0));
                self.set_status_message("Post published");
            }
            Ok(None) => self.set_status_message("Write something first"),
            Err(e) => {
                tracing::error!(error = %e, "failed to save post");
                self.set_status_message(format!("Failed to save post: {}", e));
            }
        }
    }

    pub fn request_delete(&mut self) {
        if self.selected_post_id().is_some() {
            self.ui.delete_selection = 0;
            self.ui.mode = Mode::ConfirmDelete;
        } else {
            self.set_status_message("No post selected");
        }
    }

    pub fn confirm_delete(&mut self) {
        self.ui.mode = Mode::View;
        if self.ui.delete_selection != 0 {
            return;
        }
        let Some(id) = self.selected_post_id() else {
            return;
        };
        match self.posts.remove(&self.database, &id) {
            Ok(_) => {
                self.sync_post_selection();
                self.set_status_message("Post deleted");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to delete post");
                self.set_status_message(format!("Failed to delete post: {}", e));
            }
        }
    }

    // Diet

    pub fn toggle_diet_preference(&mut self) {
        self.diet.preference = self.diet.preference.toggle();
    }

    pub fn clear_diet_form(&mut self) {
        self.forms.diet.clear();
        self.diet.plan = None;
    }

    pub fn submit_diet_form(&mut self) {
        let form = DietForm {
            height: self.forms.diet.value(0).to_string(),
            weight: self.forms.diet.value(1).to_string(),
            age: self.forms.diet.value(2).to_string(),
            gender: self.forms.diet.value(3).to_string(),
        };
        self.ui.mode = Mode::View;

        match form.validate() {
            Ok(request) => {
                let delay = Duration::from_millis(self.config.diet_plan_delay_ms);
                self.diet.pending_plan = Some(spawn_plan(self.diet.preference, request, delay));
            }
            Err(_) => self.diet.plan = Some(MISSING_FIELDS_MESSAGE.to_string()),
        }
    }

    fn ask_advisor(&mut self, query: &str) {
        if query.trim().is_empty() {
            self.diet.answer = Some(AdvisorError::EmptyQuery.user_message().to_string());
            return;
        }
        match &self.diet.advisor {
            Some(client) => self.diet.pending_answer = Some(client.spawn_ask(query.to_string())),
            None => self.diet.answer = Some(crate::advisor::FAILURE_MESSAGE.to_string()),
        }
    }

    /// Pick up results from background work without blocking
    pub fn poll_background(&mut self) {
        if let Some(rx) = &self.diet.pending_plan {
            match rx.try_recv() {
                Ok(plan) => {
                    self.diet.plan = Some(plan);
                    self.diet.pending_plan = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    self.diet.plan = Some("⚠️ Failed to generate diet plan. Please try again.".to_string());
                    self.diet.pending_plan = None;
                }
            }
        }

        if let Some(rx) = &self.diet.pending_answer {
            match rx.try_recv() {
                Ok(result) => {
                    self.diet.answer = Some(format_answer(&result));
                    self.diet.pending_answer = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    self.diet.answer = Some(crate::advisor::FAILURE_MESSAGE.to_string());
                    self.diet.pending_answer = None;
                }
            }
        }
    }

    /// Form edited in Form mode for the current tab
    pub fn current_form_mut(&mut self) -> Option<&mut FieldForm> {
        match self.ui.tab {
            Tab::Blog => Some(&mut self.forms.post),
            Tab::Progress => Some(&mut self.forms.progress),
            Tab::Diet => Some(&mut self.forms.diet),
            Tab::Profile => Some(&mut self.forms.profile),
            Tab::Dashboard => None,
        }
    }

    pub fn open_form(&mut self) {
        if self.ui.tab == Tab::Progress && self.forms.progress.value(0).is_empty() {
            let values = [get_current_date_string()];
            self.forms.progress = self.forms.progress.clone().with_values(&values);
        }
        if self.current_form_mut().is_some() {
            self.ui.mode = Mode::Form;
        }
    }

    pub fn submit_form(&mut self) {
        match self.ui.tab {
            Tab::Blog => self.submit_post_form(),
            Tab::Progress => self.submit_progress_form(),
            Tab::Diet => self.submit_diet_form(),
            Tab::Profile => self.toggle_profile_edit(),
            Tab::Dashboard => self.ui.mode = Mode::View,
        }
    }

    pub fn cancel_form(&mut self) {
        if self.ui.tab == Tab::Profile {
            // Edits are already applied; leaving just ends edit mode
            self.toggle_profile_edit();
        } else {
            self.ui.mode = Mode::View;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mood;

    fn app() -> App {
        let mut config = Config::default();
        config.diet_plan_delay_ms = 0;
        App::new(config, Database::open_in_memory().unwrap(), Session::for_user(Some("Tester")))
    }

    fn type_into(form: &mut FieldForm, index: usize, text: &str) {
        while form.focus() != index {
            form.next_field();
        }
        for ch in text.chars() {
            form.handle_key(&crossterm::event::KeyEvent::new(
                crossterm::event::KeyCode::Char(ch),
                crossterm::event::KeyModifiers::NONE,
            ));
        }
    }

    #[test]
    fn signed_out_app_is_locked_until_login() {
        let mut app = App::new(Config::default(), Database::open_in_memory().unwrap(), Session::signed_out());
        assert!(app.is_locked());
        app.switch_tab(Tab::Blog);
        assert!(app.is_locked());

        app.submit_login();
        assert!(app.is_locked());

        app.ui.login = Input::from_string("Rae".to_string());
        app.submit_login();
        assert!(!app.is_locked());
        assert_eq!(app.route, Route::Dashboard);
        assert_eq!(app.profile.field(ProfileField::Name), "Rae");

        app.sign_out();
        assert!(app.is_locked());
    }

    #[test]
    fn tabs_cycle() {
        let mut app = app();
        app.prev_tab();
        assert_eq!(app.ui.tab, Tab::Blog);
        app.next_tab();
        assert_eq!(app.ui.tab, Tab::Dashboard);
    }

    #[test]
    fn post_form_publishes_and_delete_confirms() {
        let mut app = app();
        app.switch_tab(Tab::Blog);
        app.open_form();
        type_into(&mut app.forms.post, 0, "Morning run");
        app.submit_form();

        assert_eq!(app.posts.len(), 1);
        assert_eq!(app.ui.mode, Mode::View);
        assert_eq!(app.selected_post_id(), Some(app.posts.posts()[0].id.clone()));

        app.request_delete();
        app.ui.delete_selection = 1;
        app.confirm_delete();
        assert_eq!(app.posts.len(), 1);

        app.request_delete();
        app.confirm_delete();
        assert!(app.posts.is_empty());
        assert_eq!(app.ui.post_list.selected(), None);
    }

    #[test]
    fn incomplete_progress_form_stays_open() {
        let mut app = app();
        app.switch_tab(Tab::Progress);
        app.open_form();
        assert_eq!(app.forms.progress.value(0), get_current_date_string());
        app.submit_form();

        assert_eq!(app.ui.mode, Mode::Form);
        assert!(app.progress.is_empty());
        assert!(app.status.message.as_deref().unwrap_or("").contains("weight"));
    }

    #[test]
    fn full_progress_form_adds_entry() {
        let mut app = app();
        app.switch_tab(Tab::Progress);
        app.open_form();
        // Date is prefilled with today
        let values = ["70", "2000", "9000", "7", "8", "6", "5"];
        for (i, v) in values.iter().enumerate() {
            type_into(&mut app.forms.progress, i + 1, v);
        }
        app.submit_form();
        assert_eq!(app.progress.len(), 1);
        assert_eq!(app.progress.entries()[0].bmi, 22.9);
        assert_eq!(app.progress.entries()[0].date, get_current_date_string());
        assert_eq!(app.forms.progress.value(0), "");
    }

    #[test]
    fn progress_log_does_not_outlive_the_session() {
        let mut app = app();
        app.switch_tab(Tab::Blog);
        app.open_form();
        type_into(&mut app.forms.post, 0, "Leg day");
        app.submit_form();

        app.switch_tab(Tab::Progress);
        app.open_form();
        for (i, v) in ["70", "2000", "9000", "7", "8", "6", "5"].iter().enumerate() {
            type_into(&mut app.forms.progress, i + 1, v);
        }
        app.submit_form();
        assert_eq!(app.progress.len(), 1);

        let reopened = App::new(Config::default(), app.database, Session::for_user(Some("Tester")));
        assert!(reopened.progress.is_empty());
        assert_eq!(reopened.posts.len(), 1);
    }

    #[test]
    fn streak_celebration_sets_status_once() {
        let mut app = app();
        for i in 0..7 {
            app.ui.streak_index = i;
            app.toggle_streak_day();
            if i < 6 {
                assert_eq!(app.status.message, None);
            }
        }
        assert_eq!(app.status.message.as_deref(), Some(CELEBRATION_MESSAGE));
    }

    #[test]
    fn mood_prompt_records_day() {
        let mut app = app();
        app.move_mood_day(4);
        let day = app.ui.mood_day;
        app.open_prompt(PromptKind::Mood(day));
        app.ui.prompt = Input::from_string("😞".to_string());
        app.submit_prompt(PromptKind::Mood(day));
        assert_eq!(app.moods.get(5), Some(Mood::Sad));
        app.move_mood_day(100);
        assert_eq!(app.ui.mood_day, 30);
    }

    #[test]
    fn profile_edits_apply_while_editing() {
        let mut app = app();
        app.switch_tab(Tab::Profile);
        app.toggle_profile_edit();
        assert_eq!(app.ui.mode, Mode::Form);

        type_into(&mut app.forms.profile, 4, "!");
        app.sync_profile_field();
        app.cancel_form();

        assert!(!app.profile.is_editing());
        assert_eq!(app.profile.field(ProfileField::Goal), "Stay fit!");
    }

    #[test]
    fn diet_form_requires_all_fields() {
        let mut app = app();
        app.switch_tab(Tab::Diet);
        app.submit_diet_form();
        assert_eq!(app.diet.plan.as_deref(), Some(MISSING_FIELDS_MESSAGE));
        assert!(!app.diet.is_generating());
    }

    #[test]
    fn diet_plan_arrives_through_polling() {
        let mut app = app();
        for (i, v) in ["170", "60", "30", "male"].iter().enumerate() {
            type_into(&mut app.forms.diet, i, v);
        }
        app.toggle_diet_preference();
        app.submit_diet_form();
        assert!(app.diet.is_generating());

        let deadline = Instant::now() + Duration::from_secs(5);
        while app.diet.is_generating() && Instant::now() < deadline {
            app.poll_background();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(app.diet.plan.as_deref().unwrap_or("").contains("Non-Veg"));
    }

    #[test]
    fn empty_advisor_question_is_rejected_locally() {
        let mut app = app();
        app.open_prompt(PromptKind::AskAdvisor);
        app.submit_prompt(PromptKind::AskAdvisor);
        assert_eq!(app.diet.answer.as_deref(), Some(crate::advisor::EMPTY_QUERY_MESSAGE));
        assert!(!app.diet.is_thinking());
    }
}
