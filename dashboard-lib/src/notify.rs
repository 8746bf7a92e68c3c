//! User-facing notifications.

use std::time::{Duration, Instant};

use crate::error::SubmitError;
use crate::model::Record;

/// Default duration for notices.
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_secs(4);

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// A short-lived message for the user.
///
/// ```
/// use dashboard_lib::notify::{Notice, Severity};
///
/// let notice = Notice::warning("Email already exists!");
/// assert_eq!(notice.severity, Severity::Warning);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    /// How long to show the notice.
    pub duration: Duration,
}

impl Notice {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            duration: DEFAULT_NOTICE_DURATION,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Set a custom duration for this notice.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// The notice shown after an add-record submission.
    pub fn for_submission(result: &Result<Record, SubmitError>) -> Self {
        match result {
            Ok(_) => Self::success("Data added successfully!"),
            Err(err) => Self::from(err),
        }
    }
}

impl From<&SubmitError> for Notice {
    fn from(err: &SubmitError) -> Self {
        Self::new(err.severity(), err.user_message())
    }
}

/// The notices currently on screen, oldest first.
#[derive(Debug, Default)]
pub struct Notifications {
    active: Vec<(Notice, Instant)>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows a notice starting now.
    pub fn push(&mut self, notice: Notice) {
        self.push_at(notice, Instant::now());
    }

    /// Shows a notice starting at `shown_at`.
    pub fn push_at(&mut self, notice: Notice, shown_at: Instant) {
        self.active.push((notice, shown_at));
    }

    /// Drops every notice whose duration has elapsed at `now`.
    ///
    /// Returns `true` if anything was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.active.len();
        self.active
            .retain(|(notice, shown_at)| now.saturating_duration_since(*shown_at) < notice.duration);
        self.active.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.active.iter().map(|(notice, _)| notice)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
