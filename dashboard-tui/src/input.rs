//! Key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dashboard_lib::route::Route;

use crate::app::{Action, App, Focus};

/// Translates a key press into an action for the current app state.
pub fn map_key(app: &App, key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl {
        return match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('t') => Some(Action::ToggleTheme),
            KeyCode::Char('f') => Some(Action::FocusSearch),
            KeyCode::Char('n') if app.route == Route::Dashboard && app.dialog.is_none() => {
                Some(Action::OpenDialog)
            }
            KeyCode::Char('s') if app.route == Route::Settings => Some(Action::ProfileSave),
            KeyCode::Char('d') if app.route == Route::Settings => Some(Action::DeleteAccount),
            KeyCode::Char('r') if app.route == Route::Settings => Some(Action::FollowSystemTheme),
            _ => None,
        };
    }

    // The dialog is modal.
    if app.dialog.is_some() {
        return match key.code {
            KeyCode::Char(c) => Some(Action::DialogInput(c)),
            KeyCode::Backspace => Some(Action::DialogBackspace),
            KeyCode::Tab | KeyCode::BackTab => Some(Action::DialogNextField),
            KeyCode::Enter => Some(Action::DialogSubmit),
            KeyCode::Esc => Some(Action::DialogCancel),
            _ => None,
        };
    }

    if key.code == KeyCode::Tab {
        return Some(Action::CycleFocus);
    }

    match app.focus {
        Focus::Sidebar => match key.code {
            KeyCode::Up => Some(Action::SidebarMove(-1)),
            KeyCode::Down => Some(Action::SidebarMove(1)),
            KeyCode::Enter => Some(Action::SidebarOpen),
            _ => None,
        },
        Focus::Search => match key.code {
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Enter => Some(Action::SearchSubmit),
            KeyCode::Esc => Some(Action::SearchCancel),
            _ => None,
        },
        Focus::Page => match app.route {
            Route::Dashboard => match key.code {
                KeyCode::Char(c) => Some(Action::FilterInput(c)),
                KeyCode::Backspace => Some(Action::FilterBackspace),
                KeyCode::Esc => Some(Action::FilterClear),
                KeyCode::Left => Some(Action::ColumnMove(-1)),
                KeyCode::Right => Some(Action::ColumnMove(1)),
                KeyCode::Enter => Some(Action::SortSelected),
                _ => None,
            },
            Route::Settings => match key.code {
                KeyCode::Char(c) => Some(Action::ProfileInput(c)),
                KeyCode::Backspace => Some(Action::ProfileBackspace),
                KeyCode::Up | KeyCode::Down => Some(Action::ProfileNextField),
                KeyCode::Esc => Some(Action::ProfileReset),
                _ => None,
            },
        },
    }
}
