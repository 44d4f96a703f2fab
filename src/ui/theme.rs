//! Light/dark theme preference

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::prefs::PreferenceStore;

/// Preference key the theme is stored under
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Value of the document's `data-theme` attribute; dark is the implicit default
    pub fn attribute(self) -> Option<&'static str> {
        match self {
            Theme::Dark => None,
            Theme::Light => Some("light"),
        }
    }

    /// Icon glyph shown on the toggle
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "fa-moon",
            Theme::Light => "fa-sun",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => anyhow::bail!("unknown theme '{}', expected 'dark' or 'light'", other),
        }
    }
}

/// Applies the stored theme and persists every change
pub struct ThemeController<S: PreferenceStore> {
    store: S,
    theme: Theme,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Read the stored preference back; unknown or missing values mean dark
    pub fn load(store: S) -> Self {
        let theme = store
            .get(THEME_KEY)
            .and_then(|value| match value.parse() {
                Ok(theme) => Some(theme),
                Err(e) => {
                    tracing::warn!("Ignoring stored theme: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        Self { store, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme and persist it
    pub fn toggle(&mut self) -> Result<Theme> {
        self.set(self.theme.toggled())
    }

    pub fn set(&mut self, theme: Theme) -> Result<Theme> {
        self.theme = theme;
        self.store.set(THEME_KEY, theme.as_str())?;
        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::{FilePreferences, MemoryPreferences};

    #[test]
    fn test_default_is_dark() {
        let controller = ThemeController::load(MemoryPreferences::default());
        assert_eq!(controller.theme(), Theme::Dark);
        assert_eq!(controller.theme().attribute(), None);
        assert_eq!(controller.theme().icon(), "fa-moon");
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let mut controller = ThemeController::load(MemoryPreferences::default());
        assert_eq!(controller.toggle().unwrap(), Theme::Light);
        assert_eq!(controller.theme().attribute(), Some("light"));
        assert_eq!(controller.theme().icon(), "fa-sun");
        assert_eq!(controller.toggle().unwrap(), Theme::Dark);
        assert_eq!(controller.store.get(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn test_persists_across_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut controller = ThemeController::load(FilePreferences::load(&path));
        controller.toggle().unwrap();

        let reloaded = ThemeController::load(FilePreferences::load(&path));
        assert_eq!(reloaded.theme(), Theme::Light);
    }

    #[test]
    fn test_unknown_stored_value_falls_back() {
        let mut store = MemoryPreferences::default();
        store.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(ThemeController::load(store).theme(), Theme::Dark);
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!("Light".parse::<Theme>().unwrap(), Theme::Light);
        assert!("blue".parse::<Theme>().is_err());
        assert_eq!(Theme::Dark.to_string(), "dark");
    }
}
