//! Light/dark theme shared across the dashboard.
//!
//! [`ThemeContext`] is created once at startup and handed to whoever needs it;
//! clones share the same state. The choice is written through to the
//! settings store under [`THEME_KEY`] on every change, and removed from it
//! when the user goes back to following the system.
//!
//! Initialization order:
//! 1. the stored value, if any
//! 2. the system preference, if known
//! 3. [`ThemeMode::Light`]

use std::fmt;
use std::sync::{Arc, RwLock};

use log::{info, warn};

use crate::settings::{SettingsError, SettingsProvider};

/// Settings key holding the theme name.
pub const THEME_KEY: &str = "theme";

/// The two supported themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses `"light"` or `"dark"`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// The colours used to draw this theme.
    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette::light(),
            Self::Dark => Palette::dark(),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Named colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub surface: Rgb,
    pub border: Rgb,
    pub text: Rgb,
    pub text_muted: Rgb,
    pub primary: Rgb,
    pub success: Rgb,
    pub warning: Rgb,
    pub error: Rgb,
    pub info: Rgb,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            background: Rgb::new(243, 244, 246),
            surface: Rgb::new(255, 255, 255),
            border: Rgb::new(229, 231, 235),
            text: Rgb::new(17, 24, 39),
            text_muted: Rgb::new(107, 114, 128),
            primary: Rgb::new(79, 70, 229),
            success: Rgb::new(22, 163, 74),
            warning: Rgb::new(202, 138, 4),
            error: Rgb::new(220, 38, 38),
            info: Rgb::new(37, 99, 235),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Rgb::new(17, 24, 39),
            surface: Rgb::new(31, 41, 55),
            border: Rgb::new(55, 65, 81),
            text: Rgb::new(243, 244, 246),
            text_muted: Rgb::new(156, 163, 175),
            primary: Rgb::new(129, 140, 248),
            success: Rgb::new(74, 222, 128),
            warning: Rgb::new(250, 204, 21),
            error: Rgb::new(248, 113, 113),
            info: Rgb::new(96, 165, 250),
        }
    }
}

#[derive(Debug)]
struct ThemeInner {
    mode: ThemeMode,
    /// Set once a value is stored; system changes are ignored afterwards.
    explicit: bool,
}

/// Shared handle to the active theme.
#[derive(Debug, Clone)]
pub struct ThemeContext {
    settings: SettingsProvider,
    inner: Arc<RwLock<ThemeInner>>,
}

impl ThemeContext {
    /// Reads the stored theme, falling back to `system` and then to light.
    pub async fn init(
        settings: SettingsProvider,
        system: Option<ThemeMode>,
    ) -> Result<Self, SettingsError> {
        let stored = match settings.get::<String>(THEME_KEY).await? {
            Some(value) => {
                let mode = ThemeMode::parse(&value);
                if mode.is_none() {
                    warn!("Ignoring unknown stored theme {:?}", value);
                }
                mode
            }
            None => None,
        };

        let (mode, explicit) = match (stored, system) {
            (Some(mode), _) => (mode, true),
            (None, Some(mode)) => (mode, false),
            (None, None) => (ThemeMode::default(), false),
        };
        info!("Theme initialized to {}", mode);

        Ok(Self {
            settings,
            inner: Arc::new(RwLock::new(ThemeInner { mode, explicit })),
        })
    }

    pub fn mode(&self) -> ThemeMode {
        self.inner.read().map(|g| g.mode).unwrap_or_default()
    }

    pub fn is_dark(&self) -> bool {
        self.mode().is_dark()
    }

    pub fn palette(&self) -> Palette {
        self.mode().palette()
    }

    /// Switches to `mode` and stores it.
    pub async fn set(&self, mode: ThemeMode) -> Result<(), SettingsError> {
        if let Ok(mut guard) = self.inner.write() {
            guard.mode = mode;
            guard.explicit = true;
        }
        info!("Theme set to {}", mode);
        self.settings.set(THEME_KEY, &mode.as_str().to_string()).await
    }

    /// Flips between light and dark, returning the new mode.
    pub async fn toggle(&self) -> Result<ThemeMode, SettingsError> {
        let mode = self.mode().toggled();
        self.set(mode).await?;
        Ok(mode)
    }

    /// Forgets the stored choice and goes back to the system preference, or
    /// light when it is unknown.
    pub async fn follow_system(&self, system: Option<ThemeMode>) -> Result<ThemeMode, SettingsError> {
        if let Ok(mut guard) = self.inner.write() {
            guard.explicit = false;
        }
        self.on_system_change(system.unwrap_or_default());
        info!("Theme follows the system ({})", self.mode());
        self.settings.remove(THEME_KEY).await?;
        Ok(self.mode())
    }

    /// Follows a change of the system preference.
    ///
    /// Ignored once the user has picked a theme. Returns `true` if applied.
    pub fn on_system_change(&self, mode: ThemeMode) -> bool {
        match self.inner.write() {
            Ok(mut guard) if !guard.explicit => {
                guard.mode = mode;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_defaults_to_light() {
        let theme = ThemeContext::init(SettingsProvider::in_memory(), None)
            .await
            .unwrap();
        assert_eq!(theme.mode(), ThemeMode::Light);
    }

    #[tokio::test]
    async fn test_system_preference_used_when_nothing_stored() {
        let theme = ThemeContext::init(SettingsProvider::in_memory(), Some(ThemeMode::Dark))
            .await
            .unwrap();
        assert!(theme.is_dark());
    }

    #[tokio::test]
    async fn test_stored_value_wins() {
        let settings = SettingsProvider::in_memory();
        settings.set(THEME_KEY, &"light".to_string()).await.unwrap();

        let theme = ThemeContext::init(settings, Some(ThemeMode::Dark)).await.unwrap();
        assert_eq!(theme.mode(), ThemeMode::Light);
        assert!(!theme.on_system_change(ThemeMode::Dark));
    }

    #[tokio::test]
    async fn test_garbage_stored_value_is_ignored() {
        let settings = SettingsProvider::in_memory();
        settings.set(THEME_KEY, &"purple".to_string()).await.unwrap();

        let theme = ThemeContext::init(settings, Some(ThemeMode::Dark)).await.unwrap();
        assert_eq!(theme.mode(), ThemeMode::Dark);
    }

    #[tokio::test]
    async fn test_toggle_writes_through() {
        let settings = SettingsProvider::in_memory();
        let theme = ThemeContext::init(settings.clone(), None).await.unwrap();

        assert_eq!(theme.toggle().await.unwrap(), ThemeMode::Dark);
        assert_eq!(
            settings.get::<String>(THEME_KEY).await.unwrap().as_deref(),
            Some("dark")
        );

        assert_eq!(theme.toggle().await.unwrap(), ThemeMode::Light);
        assert_eq!(
            settings.get::<String>(THEME_KEY).await.unwrap().as_deref(),
            Some("light")
        );
    }

    #[tokio::test]
    async fn test_system_change_until_user_picks() {
        let theme = ThemeContext::init(SettingsProvider::in_memory(), None)
            .await
            .unwrap();
        assert!(theme.on_system_change(ThemeMode::Dark));
        assert!(theme.is_dark());

        theme.set(ThemeMode::Light).await.unwrap();
        assert!(!theme.on_system_change(ThemeMode::Dark));
        assert_eq!(theme.mode(), ThemeMode::Light);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let theme = ThemeContext::init(SettingsProvider::in_memory(), None)
            .await
            .unwrap();
        let other = theme.clone();
        theme.toggle().await.unwrap();
        assert!(other.is_dark());
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(ThemeMode::Light.palette(), ThemeMode::Dark.palette());
    }

    #[tokio::test]
    async fn test_follow_system_forgets_choice() {
        let settings = SettingsProvider::in_memory();
        let theme = ThemeContext::init(settings.clone(), Some(ThemeMode::Dark)).await.unwrap();
        theme.set(ThemeMode::Light).await.unwrap();

        assert_eq!(theme.follow_system(Some(ThemeMode::Dark)).await.unwrap(), ThemeMode::Dark);
        assert_eq!(settings.get::<String>(THEME_KEY).await.unwrap(), None);
        assert!(theme.on_system_change(ThemeMode::Light));

        let reloaded = ThemeContext::init(settings, None).await.unwrap();
        assert_eq!(reloaded.mode(), ThemeMode::Light);
    }

    #[tokio::test]
    async fn test_follow_unknown_system_is_light() {
        let theme = ThemeContext::init(SettingsProvider::in_memory(), None).await.unwrap();
        theme.set(ThemeMode::Dark).await.unwrap();
        assert_eq!(theme.follow_system(None).await.unwrap(), ThemeMode::Light);
    }
}
