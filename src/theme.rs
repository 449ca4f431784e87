//! Light/dark theme selection.
//!
//! The page starts in whatever theme the settings store remembers, falling
//! back to dark. Toggling flips the theme and writes it back immediately.

use crate::settings::{SettingsError, SettingsStore, THEME_KEY};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Icon shown on the toggle control.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "🌙",
            Theme::Light => "☀️",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme '{}' (expected 'dark' or 'light')", self.0)
    }
}

impl std::error::Error for UnknownTheme {}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Owns the active theme and keeps the store in sync with it.
pub struct ThemeController<S: SettingsStore> {
    store: S,
    theme: Theme,
}

impl<S: SettingsStore> ThemeController<S> {
    /// Read the persisted theme. Unknown stored values fall back to the
    /// default rather than failing.
    pub fn init(store: S) -> Self {
        let theme = store
            .get(THEME_KEY)
            .and_then(|value| match value.parse() {
                Ok(theme) => Some(theme),
                Err(err) => {
                    tracing::warn!("ignoring stored theme: {err}");
                    None
                }
            })
            .unwrap_or_default();
        Self { store, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set(&mut self, theme: Theme) -> Result<(), SettingsError> {
        self.theme = theme;
        self.store.set(THEME_KEY, theme.as_str())
    }

    pub fn toggle(&mut self) -> Result<Theme, SettingsError> {
        self.set(self.theme.toggled())?;
        Ok(self.theme)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
