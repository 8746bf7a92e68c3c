//! Profile settings form.
//!
//! Saving is split in two so a UI can keep drawing while the save runs:
//! [`ProfileForm::begin_save`] snapshots the draft into a [`SaveTask`] that
//! can be awaited (or spawned) on its own, and [`ProfileForm::finish_save`]
//! applies the outcome and produces the notice to show.

use std::time::Duration;

use email_address::EmailAddress;
use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::busy::{BusyFlag, BusyGuard};
use crate::error::ProfileError;
use crate::notify::Notice;
use crate::settings::{SettingsError, SettingsProvider};

/// Settings key holding the saved profile.
pub const PROFILE_KEY: &str = "profile";

/// Simulated round trip applied to every save.
pub const DEFAULT_SAVE_DELAY: Duration = Duration::from_secs(1);

/// The signed-in user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub initials: String,
}

impl Profile {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            initials: initials(&name),
            name,
            email: email.into(),
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new("Default Name", "default@email.com")
    }
}

/// First letter of every word, upper-cased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// The editable copy of the profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub email: String,
}

impl From<&Profile> for ProfileDraft {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
        }
    }
}

/// Checks a draft and builds the profile it describes.
///
/// Surrounding whitespace is trimmed from both fields.
pub fn validate_profile(draft: &ProfileDraft) -> Result<Profile, ProfileError> {
    let name = draft.name.trim();
    let email = draft.email.trim();
    if name.is_empty() {
        return Err(ProfileError::missing("name"));
    }
    if email.is_empty() {
        return Err(ProfileError::missing("email"));
    }
    if !EmailAddress::is_valid(email) {
        return Err(ProfileError::invalid_email(email));
    }
    Ok(Profile::new(name, email))
}

/// A save that has been started but not yet run.
///
/// Holds the form's saving flag until it is dropped.
#[derive(Debug)]
pub struct SaveTask {
    draft: ProfileDraft,
    settings: SettingsProvider,
    delay: Duration,
    _guard: BusyGuard,
}

impl SaveTask {
    /// Waits out the delay, validates and persists the profile.
    pub async fn run(self) -> Result<Profile, ProfileError> {
        tokio::time::sleep(self.delay).await;
        let profile = validate_profile(&self.draft)?;
        self.settings.set(PROFILE_KEY, &profile).await?;
        Ok(profile)
    }
}

/// State of the profile section of the settings page.
#[derive(Debug)]
pub struct ProfileForm {
    settings: SettingsProvider,
    profile: Profile,
    draft: ProfileDraft,
    /// The draft handed to the running save.
    saving_draft: Option<ProfileDraft>,
    saving: BusyFlag,
    delay: Duration,
}

impl ProfileForm {
    /// Loads the stored profile, or the default one.
    pub async fn load(settings: SettingsProvider) -> Result<Self, SettingsError> {
        let profile = settings.get_or(PROFILE_KEY, Profile::default()).await?;
        Ok(Self::with_profile(settings, profile))
    }

    /// Creates a form for `profile` without touching the store.
    pub fn with_profile(settings: SettingsProvider, profile: Profile) -> Self {
        Self {
            draft: ProfileDraft::from(&profile),
            settings,
            profile,
            saving_draft: None,
            saving: BusyFlag::new(),
            delay: DEFAULT_SAVE_DELAY,
        }
    }

    /// Overrides the simulated save delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ProfileDraft {
        &mut self.draft
    }

    /// Discards edits, restoring the saved values.
    pub fn reset_draft(&mut self) {
        self.draft = ProfileDraft::from(&self.profile);
    }

    pub fn is_saving(&self) -> bool {
        self.saving.is_busy()
    }

    /// Starts a save of the current draft.
    pub fn begin_save(&mut self) -> Result<SaveTask, ProfileError> {
        let guard = self.saving.try_acquire().ok_or(ProfileError::Busy)?;
        self.saving_draft = Some(self.draft.clone());
        Ok(SaveTask {
            draft: self.draft.clone(),
            settings: self.settings.clone(),
            delay: self.delay,
            _guard: guard,
        })
    }

    /// Applies the outcome of a [`SaveTask`].
    ///
    /// The draft is replaced by the saved values only if it was not edited
    /// while the save ran.
    pub fn finish_save(&mut self, result: Result<Profile, ProfileError>) -> Notice {
        if let Err(ProfileError::Busy) = result {
            return Notice::info("Already saving");
        }

        let saved_draft = self.saving_draft.take();
        match result {
            Ok(profile) => {
                info!("Updated user: {} <{}>", profile.name, profile.email);
                if saved_draft.as_ref() == Some(&self.draft) {
                    self.draft = ProfileDraft::from(&profile);
                }
                self.profile = profile;
                Notice::success("Profile updated successfully")
            }
            Err(err) => {
                error!("Update error: {}", err);
                Notice::error("Failed to update profile")
            }
        }
    }

    /// Starts, runs and applies a save in one go.
    pub async fn save(&mut self) -> Notice {
        let result = match self.begin_save() {
            Ok(task) => task.run().await,
            Err(err) => Err(err),
        };
        self.finish_save(result)
    }

    /// Account deletion is only acknowledged; nothing is removed.
    pub fn request_account_deletion(&self) -> Notice {
        Notice::warning(
            "Account deletion requested - this would trigger a confirmation dialog in production",
        )
    }
}
