//! Pages reachable from the sidebar.

use std::fmt;

/// A top-level page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Dashboard,
    Settings,
}

impl Route {
    /// Sidebar order.
    pub const ALL: [Route; 2] = [Route::Dashboard, Route::Settings];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Settings => "/settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Settings => "Settings",
        }
    }

    /// Resolves a path to a route. A trailing slash is ignored.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Self::Dashboard),
            "/settings" => Some(Self::Settings),
            _ => None,
        }
    }

    /// The next route in sidebar order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Dashboard => Self::Settings,
            Self::Settings => Self::Dashboard,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
