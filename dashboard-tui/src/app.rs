//! Application state and action handling.
//!
//! Key presses are translated into [`Action`]s by the input module. Handling
//! an action mutates the [`App`] synchronously; anything that has to wait
//! (theme persistence, profile save) is returned as an [`Effect`] for the
//! event loop to run.

use dashboard_lib::error::{ProfileError, SettingsError};
use dashboard_lib::notify::{Notice, Notifications};
use dashboard_lib::profile::{Profile, ProfileForm, SaveTask};
use dashboard_lib::route::Route;
use dashboard_lib::search::{SearchEntry, SearchIndex};
use dashboard_lib::settings::SettingsProvider;
use dashboard_lib::table::DataTable;
use dashboard_lib::theme::{ThemeContext, ThemeMode};
use dashboard_lib::{Record, SortKey};
use log::{debug, error};

/// Which part of the screen receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Search,
    Page,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Sidebar => Self::Search,
            Self::Search => Self::Page,
            Self::Page => Self::Sidebar,
        }
    }
}

/// A text field in a two-field form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Name,
    Email,
}

impl Field {
    fn other(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleTheme,
    FollowSystemTheme,
    CycleFocus,
    FocusSearch,

    SidebarMove(isize),
    SidebarOpen,

    SearchInput(char),
    SearchBackspace,
    SearchSubmit,
    SearchCancel,

    FilterInput(char),
    FilterBackspace,
    FilterClear,
    ColumnMove(isize),
    SortSelected,

    OpenDialog,
    DialogInput(char),
    DialogBackspace,
    DialogNextField,
    DialogSubmit,
    DialogCancel,

    ProfileInput(char),
    ProfileBackspace,
    ProfileNextField,
    ProfileSave,
    ProfileReset,
    DeleteAccount,
}

/// Work the event loop has to await on behalf of the app.
#[derive(Debug)]
pub enum Effect {
    ToggleTheme,
    FollowSystemTheme,
    SaveProfile(SaveTask),
}

/// Results of background work, fed back into the app.
#[derive(Debug)]
pub enum AppEvent {
    ProfileSaved(Result<Profile, ProfileError>),
}

pub struct App {
    pub running: bool,
    pub route: Route,
    pub focus: Focus,
    pub sidebar_cursor: usize,

    pub theme: ThemeContext,
    /// Terminal preference detected at startup.
    pub system_theme: Option<ThemeMode>,
    pub notices: Notifications,

    pub search: SearchIndex,
    pub search_query: String,

    pub table: DataTable,
    /// Header the cursor is on; `Enter` sorts by it.
    pub column_cursor: usize,
    /// The add-record dialog, with its active field, when open.
    pub dialog: Option<Field>,

    pub profile: ProfileForm,
    pub profile_field: Field,
}

/// Rows shown on first start.
pub fn sample_rows() -> Vec<Record> {
    vec![
        Record::new(1, "John Doe", "john@example.com"),
        Record::new(2, "Jane Smith", "jane@example.com"),
        Record::new(3, "Bob Johnson", "bob@example.com"),
    ]
}

impl App {
    /// Loads theme and profile from `settings`.
    pub async fn load(
        settings: SettingsProvider,
        system_theme: Option<ThemeMode>,
    ) -> Result<Self, SettingsError> {
        let theme = ThemeContext::init(settings.clone(), system_theme).await?;
        let profile = ProfileForm::load(settings).await?;
        let mut app = Self::new(theme, profile, DataTable::new(sample_rows()));
        app.system_theme = system_theme;
        Ok(app)
    }

    pub fn new(theme: ThemeContext, profile: ProfileForm, table: DataTable) -> Self {
        Self {
            running: true,
            route: Route::default(),
            focus: Focus::Page,
            sidebar_cursor: 0,
            theme,
            system_theme: None,
            notices: Notifications::new(),
            search: SearchIndex::default(),
            search_query: String::new(),
            table,
            column_cursor: 0,
            dialog: None,
            profile,
            profile_field: Field::Name,
        }
    }

    /// Current results for the navbar search box.
    pub fn search_results(&self) -> Vec<&SearchEntry> {
        self.search.search(&self.search_query)
    }

    pub fn selected_column(&self) -> SortKey {
        SortKey::ALL[self.column_cursor % SortKey::ALL.len()]
    }

    fn navigate(&mut self, route: Route) {
        debug!("Navigate to {}", route.path());
        self.route = route;
        self.dialog = None;
        self.sidebar_cursor = Route::ALL.iter().position(|r| *r == route).unwrap_or(0);
    }

    pub fn handle(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::Quit => self.running = false,
            Action::ToggleTheme => return Some(Effect::ToggleTheme),
            Action::FollowSystemTheme => return Some(Effect::FollowSystemTheme),
            Action::CycleFocus => self.focus = self.focus.next(),
            Action::FocusSearch => self.focus = Focus::Search,

            Action::SidebarMove(delta) => {
                let len = Route::ALL.len() as isize;
                let cursor = (self.sidebar_cursor as isize + delta).rem_euclid(len);
                self.sidebar_cursor = cursor as usize;
            }
            Action::SidebarOpen => {
                self.navigate(Route::ALL[self.sidebar_cursor]);
                self.focus = Focus::Page;
            }

            Action::SearchInput(c) => self.search_query.push(c),
            Action::SearchBackspace => {
                self.search_query.pop();
            }
            Action::SearchSubmit => self.submit_search(),
            Action::SearchCancel => {
                self.search_query.clear();
                self.focus = Focus::Page;
            }

            Action::FilterInput(c) => {
                let mut text = self.table.filter_text().to_string();
                text.push(c);
                self.table.set_filter_text(text);
            }
            Action::FilterBackspace => {
                let mut text = self.table.filter_text().to_string();
                text.pop();
                self.table.set_filter_text(text);
            }
            Action::FilterClear => self.table.set_filter_text(""),
            Action::ColumnMove(delta) => {
                let len = SortKey::ALL.len() as isize;
                self.column_cursor = (self.column_cursor as isize + delta).rem_euclid(len) as usize;
            }
            Action::SortSelected => {
                self.table.request_sort(self.selected_column());
            }

            Action::OpenDialog => self.dialog = Some(Field::Name),
            Action::DialogInput(c) => {
                if let Some(field) = self.dialog {
                    let draft = self.table.draft_mut();
                    match field {
                        Field::Name => draft.name.push(c),
                        Field::Email => draft.email.push(c),
                    }
                }
            }
            Action::DialogBackspace => {
                if let Some(field) = self.dialog {
                    let draft = self.table.draft_mut();
                    match field {
                        Field::Name => draft.name.pop(),
                        Field::Email => draft.email.pop(),
                    };
                }
            }
            Action::DialogNextField => self.dialog = self.dialog.map(Field::other),
            Action::DialogSubmit => self.submit_dialog(),
            Action::DialogCancel => self.dialog = None,

            Action::ProfileInput(c) => match self.profile_field {
                Field::Name => self.profile.draft_mut().name.push(c),
                Field::Email => self.profile.draft_mut().email.push(c),
            },
            Action::ProfileBackspace => {
                match self.profile_field {
                    Field::Name => self.profile.draft_mut().name.pop(),
                    Field::Email => self.profile.draft_mut().email.pop(),
                };
            }
            Action::ProfileNextField => self.profile_field = self.profile_field.other(),
            Action::ProfileReset => self.profile.reset_draft(),
            Action::ProfileSave => match self.profile.begin_save() {
                Ok(task) => return Some(Effect::SaveProfile(task)),
                Err(err) => {
                    let notice = self.profile.finish_save(Err(err));
                    self.notices.push(notice);
                }
            },
            Action::DeleteAccount => {
                let notice = self.profile.request_account_deletion();
                self.notices.push(notice);
            }
        }
        None
    }

    pub fn on_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ProfileSaved(result) => {
                let notice = self.profile.finish_save(result);
                self.notices.push(notice);
            }
        }
    }

    /// Applies the outcome of a theme toggle or reset.
    pub fn on_theme_changed(&mut self, result: Result<ThemeMode, SettingsError>) {
        if let Err(err) = result {
            // the in-memory choice still applies; only persisting failed
            error!("Failed to store theme: {}", err);
            self.notices.push(Notice::error("Failed to save theme"));
        }
    }

    fn submit_dialog(&mut self) {
        let result = self.table.submit_draft();
        self.notices.push(Notice::for_submission(&result));
        if result.is_ok() {
            self.dialog = None;
        }
    }

    fn submit_search(&mut self) {
        let Some(entry) = self.search_results().first().map(|entry| (*entry).clone()) else {
            if !self.search_query.trim().is_empty() {
                self.notices.push(Notice::info("No results found"));
            }
            return;
        };
        self.search_query.clear();
        match entry.route() {
            Some(route) => {
                self.navigate(route);
                self.focus = Focus::Page;
            }
            None => self
                .notices
                .push(Notice::info(format!("{} ({})", entry.name, entry.path))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use dashboard_lib::notify::Severity;

    use super::*;

    async fn app() -> App {
        let settings = SettingsProvider::in_memory();
        let theme = ThemeContext::init(settings.clone(), None).await.unwrap();
        let profile = ProfileForm::with_profile(settings, Profile::default()).with_delay(Duration::ZERO);
        App::new(theme, profile, DataTable::new(sample_rows()))
    }

    fn type_text(app: &mut App, text: &str, action: fn(char) -> Action) {
        for c in text.chars() {
            app.handle(action(c));
        }
    }

    #[tokio::test]
    async fn test_add_record_through_dialog() {
        let mut app = app().await;
        app.handle(Action::OpenDialog);
        type_text(&mut app, "Cara", Action::DialogInput);
        app.handle(Action::DialogNextField);
        type_text(&mut app, "cara@x.com", Action::DialogInput);
        app.handle(Action::DialogSubmit);

        assert_eq!(app.dialog, None);
        assert_eq!(app.table.len(), 4);
        assert_eq!(app.table.rows()[3].id, 4);
        assert_eq!(app.notices.iter().last().unwrap().severity, Severity::Success);
    }

    #[tokio::test]
    async fn test_rejected_dialog_stays_open() {
        let mut app = app().await;
        app.handle(Action::OpenDialog);
        type_text(&mut app, "Someone", Action::DialogInput);
        app.handle(Action::DialogSubmit);

        assert_eq!(app.dialog, Some(Field::Name));
        assert_eq!(app.table.len(), 3);
        assert_eq!(app.notices.iter().last().unwrap().severity, Severity::Error);
    }

    #[tokio::test]
    async fn test_sort_selected_column_twice() {
        let mut app = app().await;
        app.handle(Action::ColumnMove(1));
        app.handle(Action::SortSelected);
        app.handle(Action::SortSelected);

        let names: Vec<String> = app.table.visible_rows().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["John Doe", "Jane Smith", "Bob Johnson"]);
    }

    #[tokio::test]
    async fn test_filter_typing() {
        let mut app = app().await;
        type_text(&mut app, "JANE", Action::FilterInput);
        assert_eq!(app.table.visible_rows().len(), 1);

        app.handle(Action::FilterClear);
        assert_eq!(app.table.visible_rows().len(), 3);
    }

    #[tokio::test]
    async fn test_search_navigates() {
        let mut app = app().await;
        app.handle(Action::FocusSearch);
        type_text(&mut app, "sett", Action::SearchInput);
        app.handle(Action::SearchSubmit);

        assert_eq!(app.route, Route::Settings);
        assert_eq!(app.focus, Focus::Page);
        assert!(app.search_query.is_empty());
    }

    #[tokio::test]
    async fn test_sidebar_wraps() {
        let mut app = app().await;
        app.handle(Action::SidebarMove(-1));
        assert_eq!(app.sidebar_cursor, 1);
        app.handle(Action::SidebarOpen);
        assert_eq!(app.route, Route::Settings);
    }

    #[tokio::test]
    async fn test_profile_save_round_trip() {
        let mut app = app().await;
        app.handle(Action::ProfileNextField);
        app.handle(Action::ProfileBackspace);
        let Some(Effect::SaveProfile(task)) = app.handle(Action::ProfileSave) else {
            panic!("expected a save effect");
        };
        assert!(app.profile.is_saving());

        let result = task.run().await;
        app.on_event(AppEvent::ProfileSaved(result));

        assert!(!app.profile.is_saving());
        assert_eq!(app.profile.profile().email, "default@email.co");
    }

    #[tokio::test]
    async fn test_toggle_theme_is_an_effect() {
        let mut app = app().await;
        assert!(matches!(app.handle(Action::ToggleTheme), Some(Effect::ToggleTheme)));
    }

    #[tokio::test]
    async fn test_search_without_results_notifies() {
        let mut app = app().await;
        app.handle(Action::FocusSearch);
        type_text(&mut app, "zzz", Action::SearchInput);
        app.handle(Action::SearchSubmit);

        let notice = app.notices.iter().last().unwrap();
        assert_eq!(notice.severity, Severity::Info);
        assert_eq!(notice.message, "No results found");
        assert_eq!(app.route, Route::Dashboard);
    }

    #[tokio::test]
    async fn test_blank_search_is_silent() {
        let mut app = app().await;
        app.handle(Action::FocusSearch);
        type_text(&mut app, "  ", Action::SearchInput);
        app.handle(Action::SearchSubmit);
        assert!(app.notices.is_empty());
    }

    #[tokio::test]
    async fn test_follow_system_theme() {
        let mut app = app().await;
        app.system_theme = Some(ThemeMode::Dark);
        app.theme.set(ThemeMode::Light).await.unwrap();

        let Some(Effect::FollowSystemTheme) = app.handle(Action::FollowSystemTheme) else {
            panic!("expected a theme effect");
        };
        let result = app.theme.follow_system(app.system_theme).await;
        app.on_theme_changed(result);

        assert!(app.theme.is_dark());
        assert!(app.notices.is_empty());
    }

    #[tokio::test]
    async fn test_failed_profile_save_notifies() {
        let mut app = app().await;
        let before = app.profile.profile().clone();
        app.on_event(AppEvent::ProfileSaved(Err(ProfileError::missing("name"))));

        let notice = app.notices.iter().last().unwrap();
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(notice.message, "Failed to update profile");
        assert_eq!(app.profile.profile(), &before);
    }
}
