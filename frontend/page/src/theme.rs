use std::{collections::HashMap, fmt, str::FromStr};

use tracing::debug;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
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

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme {other:?}")),
        }
    }
}

/// Client-side key-value persistence, `localStorage` in a browser.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage(HashMap<String, String>);

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }
}

pub struct ThemeStore<S> {
    storage: S,
    current: Theme,
}

impl<S: Storage> ThemeStore<S> {
    /// Stored preference first, then the light-mode media signal, else dark.
    pub fn load(storage: S, prefers_light: bool) -> Self {
        let stored = storage.get(THEME_KEY).and_then(|raw| {
            raw.parse::<Theme>()
                .map_err(|e| debug!("Ignoring stored theme: {e}"))
                .ok()
        });

        let current = match stored {
            Some(theme) => theme,
            None if prefers_light => Theme::Light,
            None => Theme::default(),
        };

        Self { storage, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        self.storage.set(THEME_KEY, self.current.as_str());
        self.current
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(value: &str) -> MemoryStorage {
        let mut storage = MemoryStorage::default();
        storage.set(THEME_KEY, value);
        storage
    }

    #[test]
    fn test_stored_preference_wins() {
        let store = ThemeStore::load(stored("dark"), true);

        assert_eq!(store.current(), Theme::Dark);
    }

    #[test]
    fn test_light_signal_without_preference() {
        assert_eq!(ThemeStore::load(MemoryStorage::default(), true).current(), Theme::Light);
        assert_eq!(ThemeStore::load(MemoryStorage::default(), false).current(), Theme::Dark);
    }

    #[test]
    fn test_garbage_preference_is_ignored() {
        let store = ThemeStore::load(stored("sepia"), true);

        assert_eq!(store.current(), Theme::Light);
    }

    #[test]
    fn test_toggle_persists() {
        let mut store = ThemeStore::load(MemoryStorage::default(), false);

        assert_eq!(store.toggle(), Theme::Light);
        assert_eq!(store.storage().get(THEME_KEY).as_deref(), Some("light"));

        assert_eq!(store.toggle(), Theme::Dark);
        assert_eq!(store.storage().get(THEME_KEY).as_deref(), Some("dark"));
    }
}
