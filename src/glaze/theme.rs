//! Light/dark theme preference.
//!
//! The preference lives under a single key in a [`Preferences`] backend (the
//! browser's local storage, or a JSON file for the CLI). [`ThemeStore`]
//! borrows a backend for a scope; there is no process-wide theme.

use crate::dom::Document;
use crate::error::{GlazeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const THEME_KEY: &str = "pottery-theme";
pub const THEME_ATTR: &str = "data-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {} (expected light or dark)", other)),
        }
    }
}

/// String key/value storage, last writer wins.
pub trait Preferences {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Preferences for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as a flat JSON object in one file.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(GlazeError::Io)?;
        serde_json::from_str(&content).map_err(GlazeError::Serialization)
    }
}

impl Preferences for FilePreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(GlazeError::Io)?;
            }
        }
        let content = serde_json::to_string_pretty(&values).map_err(GlazeError::Serialization)?;
        fs::write(&self.path, content).map_err(GlazeError::Io)?;
        Ok(())
    }
}

/// Theme accessor over a borrowed preference backend.
pub struct ThemeStore<'a, P: Preferences + ?Sized> {
    prefs: &'a mut P,
}

impl<'a, P: Preferences + ?Sized> ThemeStore<'a, P> {
    pub fn new(prefs: &'a mut P) -> Self {
        Self { prefs }
    }

    /// The stored theme. Missing or unrecognized values read as light.
    pub fn get(&self) -> Result<Theme> {
        let stored = self.prefs.get(THEME_KEY)?;
        Ok(match stored.as_deref().map(str::parse::<Theme>) {
            Some(Ok(theme)) => theme,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "ignoring stored theme");
                Theme::default()
            }
            None => Theme::default(),
        })
    }

    pub fn set(&mut self, theme: Theme) -> Result<()> {
        tracing::debug!(theme = %theme, "storing theme preference");
        self.prefs.set(THEME_KEY, theme.as_str())
    }

    /// Flips the stored theme and returns the new one.
    pub fn toggle(&mut self) -> Result<Theme> {
        let next = self.get()?.toggled();
        self.set(next)?;
        Ok(next)
    }

    /// Writes the stored theme onto the document root's `data-theme`.
    pub fn apply<D: Document + ?Sized>(&self, doc: &mut D) -> Result<Theme> {
        let theme = self.get()?;
        let root = doc.root();
        doc.set_attribute(root, THEME_ATTR, theme.as_str());
        Ok(theme)
    }
}

/// Runs `f` with a [`ThemeStore`] over `prefs`.
pub fn with_theme<P, T, F>(prefs: &mut P, f: F) -> T
where
    P: Preferences + ?Sized,
    F: FnOnce(&mut ThemeStore<'_, P>) -> T,
{
    let mut store = ThemeStore::new(prefs);
    f(&mut store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryDocument;

    #[test]
    fn defaults_to_light() {
        let mut prefs = MemoryPreferences::new();
        let theme = with_theme(&mut prefs, |store| store.get()).unwrap();
        assert_eq!(theme, Theme::Light);
    }

    #[test]
    fn persists_choice() {
        let mut prefs = MemoryPreferences::new();
        with_theme(&mut prefs, |store| store.set(Theme::Dark)).unwrap();
        assert_eq!(prefs.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn toggles_back_and_forth() {
        let mut prefs = MemoryPreferences::new();
        let mut store = ThemeStore::new(&mut prefs);
        assert_eq!(store.toggle().unwrap(), Theme::Dark);
        assert_eq!(store.toggle().unwrap(), Theme::Light);
        assert_eq!(store.get().unwrap(), Theme::Light);
    }

    #[test]
    fn unknown_stored_value_reads_as_light() {
        let mut prefs = MemoryPreferences::new();
        prefs.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(ThemeStore::new(&mut prefs).get().unwrap(), Theme::Light);
    }

    #[test]
    fn applies_data_theme_attribute() {
        let mut prefs = MemoryPreferences::new();
        prefs.set(THEME_KEY, "dark").unwrap();
        let mut doc = MemoryDocument::new();

        let store = ThemeStore::new(&mut prefs);
        store.apply(&mut doc).unwrap();
        assert_eq!(doc.attribute(doc.root(), THEME_ATTR).as_deref(), Some("dark"));
    }

    #[test]
    fn file_preferences_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut prefs = FilePreferences::new(&path);
        assert_eq!(prefs.get(THEME_KEY).unwrap(), None);
        ThemeStore::new(&mut prefs).set(Theme::Dark).unwrap();

        let reopened = FilePreferences::new(&path);
        assert_eq!(reopened.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn parses_theme_names() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("Dark".parse::<Theme>().is_err());
    }
}
