/// Persisted theme preference
///
/// The theme follows the platform default until the user explicitly picks
/// one; an explicit choice is persisted as JSON in the user config
/// directory and wins on every later launch. The store takes its path at
/// construction so tests can point it anywhere.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
}

impl ThemePreference {
    pub fn toggled(self) -> ThemePreference {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }
}

/// On-disk shape: `{"theme": "dark"}`
#[derive(Serialize, Deserialize)]
struct StoredTheme {
    theme: ThemePreference,
}

/// Theme preference store with an explicit storage path
#[derive(Debug)]
pub struct ThemeStore {
    path: PathBuf,
    preference: Option<ThemePreference>,
}

impl ThemeStore {
    /// Open the store at the default location
    /// (e.g. ~/.config/photoweave/theme.json on Linux)
    pub fn load_default() -> Self {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        path.push("photoweave");
        path.push("theme.json");
        Self::load_from(path)
    }

    /// Open the store at an explicit path, reading any saved preference.
    /// A missing or unreadable file just means "no override yet".
    pub fn load_from(path: PathBuf) -> Self {
        let preference = fs::read_to_string(&path)
            .ok()
            .and_then(|text| serde_json::from_str::<StoredTheme>(&text).ok())
            .map(|stored| stored.theme);
        ThemeStore { path, preference }
    }

    /// The explicit user override, if any
    pub fn preference(&self) -> Option<ThemePreference> {
        self.preference
    }

    /// The theme to apply: the saved override, else the platform default
    pub fn effective(&self, system_default: ThemePreference) -> ThemePreference {
        self.preference.unwrap_or(system_default)
    }

    /// Record an explicit choice and persist it. Persistence failures are
    /// logged and otherwise ignored; the in-memory state still updates.
    pub fn set(&mut self, preference: ThemePreference) {
        self.preference = Some(preference);
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match serde_json::to_string(&StoredTheme { theme: preference }) {
            Ok(json) => {
                if let Err(err) = fs::write(&self.path, json) {
                    log::warn!("could not persist theme preference: {}", err);
                }
            }
            Err(err) => log::warn!("could not serialize theme preference: {}", err),
        }
    }

    /// Flip the effective theme and persist the result as an explicit choice
    pub fn toggle(&mut self, system_default: ThemePreference) {
        let next = self.effective(system_default).toggled();
        self.set(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("photoweave-theme-test-{tag}-{}.json", std::process::id()))
    }

    #[test]
    fn test_missing_file_means_no_override() {
        let store = ThemeStore::load_from(temp_store_path("missing"));
        assert_eq!(store.preference(), None);
        assert_eq!(store.effective(ThemePreference::Light), ThemePreference::Light);
        assert_eq!(store.effective(ThemePreference::Dark), ThemePreference::Dark);
    }

    #[test]
    fn test_set_persists_and_reloads() {
        let path = temp_store_path("roundtrip");
        let mut store = ThemeStore::load_from(path.clone());
        store.set(ThemePreference::Dark);

        let reloaded = ThemeStore::load_from(path.clone());
        assert_eq!(reloaded.preference(), Some(ThemePreference::Dark));
        // Saved override wins over the system default
        assert_eq!(
            reloaded.effective(ThemePreference::Light),
            ThemePreference::Dark
        );

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_toggle_from_system_default() {
        let path = temp_store_path("toggle");
        let mut store = ThemeStore::load_from(path.clone());

        // No override yet: toggling flips the system default
        store.toggle(ThemePreference::Light);
        assert_eq!(store.preference(), Some(ThemePreference::Dark));

        // With an override: toggling flips the override
        store.toggle(ThemePreference::Light);
        assert_eq!(store.preference(), Some(ThemePreference::Light));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let path = temp_store_path("corrupt");
        fs::write(&path, "{not json").unwrap();
        let store = ThemeStore::load_from(path.clone());
        assert_eq!(store.preference(), None);
        let _ = fs::remove_file(path);
    }
}
