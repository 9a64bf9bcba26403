//! Game settings and preferences
//!
//! Loaded once at startup and saved whenever a value changes. The store
//! also owns the persisted high score so the whole settings surface shares
//! one storage backend.

use std::io;

use serde::{Deserialize, Serialize};

use crate::highscores::{HighScore, HighScoreStore};
use crate::persistence::Storage;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play the score chime
    pub sound_enabled: bool,
    /// Let the host window/canvas be resized
    pub window_resizable: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            window_resizable: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "floaty_squirrel_settings";

    /// Load settings, falling back to defaults when missing or unreadable
    pub fn load(storage: &impl Storage) -> Self {
        match storage.read(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring corrupt settings: {}", e),
            },
            Ok(None) => log::info!("Using default settings"),
            Err(e) => log::warn!("Failed to read settings: {}", e),
        }
        Self::default()
    }

    pub fn save(&self, storage: &mut impl Storage) -> io::Result<()> {
        let json = serde_json::to_string(self)?;
        storage.write(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

/// Settings plus high score over a storage backend, saved on change
#[derive(Debug)]
pub struct SettingsStore<S: Storage> {
    storage: S,
    settings: Settings,
    high_score: HighScore,
}

impl<S: Storage> SettingsStore<S> {
    pub fn load(storage: S) -> Self {
        let settings = Settings::load(&storage);
        let high_score = HighScore::load(&storage);
        Self {
            storage,
            settings,
            high_score,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn sound_enabled(&self) -> bool {
        self.settings.sound_enabled
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        if self.settings.sound_enabled != enabled {
            self.settings.sound_enabled = enabled;
            self.save_settings();
        }
    }

    pub fn window_resizable(&self) -> bool {
        self.settings.window_resizable
    }

    pub fn set_window_resizable(&mut self, resizable: bool) {
        if self.settings.window_resizable != resizable {
            self.settings.window_resizable = resizable;
            self.save_settings();
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // Write failures leave the in-memory value in place
    fn save_settings(&mut self) {
        if let Err(e) = self.settings.save(&mut self.storage) {
            log::warn!("Failed to save settings: {}", e);
        }
    }
}

impl<S: Storage> HighScoreStore for SettingsStore<S> {
    fn get(&self) -> u32 {
        self.high_score.get()
    }

    fn record_if_higher(&mut self, score: u32) -> bool {
        if !self.high_score.record_if_higher(score) {
            return false;
        }
        if let Err(e) = self.high_score.save(&mut self.storage) {
            log::warn!("Failed to save high score: {}", e);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    /// Storage whose writes always fail
    struct ReadOnly;

    impl Storage for ReadOnly {
        fn read(&self, _key: &str) -> io::Result<Option<String>> {
            Ok(None)
        }

        fn write(&mut self, _key: &str, _value: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    #[test]
    fn test_defaults() {
        let store = SettingsStore::load(MemoryStorage::new());
        assert!(store.sound_enabled());
        assert!(!store.settings().window_resizable);
        assert_eq!(store.get(), 0);
    }

    #[test]
    fn test_changes_are_persisted() {
        let mut store = SettingsStore::load(MemoryStorage::new());
        store.set_sound_enabled(false);
        store.set_window_resizable(true);
        assert!(store.record_if_higher(7));

        let reloaded = SettingsStore::load(store.storage().clone());
        assert!(!reloaded.sound_enabled());
        assert!(reloaded.settings().window_resizable);
        assert_eq!(reloaded.get(), 7);
    }

    #[test]
    fn test_window_resizable_toggles() {
        let mut store = SettingsStore::load(MemoryStorage::new());
        assert!(!store.window_resizable());
        store.set_window_resizable(true);
        assert!(store.window_resizable());
        assert!(SettingsStore::load(store.storage().clone()).window_resizable());

        store.set_window_resizable(false);
        assert!(!SettingsStore::load(store.storage().clone()).window_resizable());
    }

    #[test]
    fn test_lower_score_not_written() {
        let mut store = SettingsStore::load(MemoryStorage::new());
        assert!(store.record_if_higher(10));
        assert!(!store.record_if_higher(4));
        let raw = store.storage().read(HighScore::STORAGE_KEY).unwrap();
        assert_eq!(raw.as_deref(), Some("{\"best\":10}"));
    }

    #[test]
    fn test_partial_settings_json() {
        let mut storage = MemoryStorage::new();
        storage
            .write(Settings::STORAGE_KEY, "{\"sound_enabled\":false}")
            .unwrap();
        let settings = Settings::load(&storage);
        assert!(!settings.sound_enabled);
        assert!(!settings.window_resizable);
    }

    #[test]
    fn test_write_failures_degrade_silently() {
        let mut store = SettingsStore::load(ReadOnly);
        store.set_sound_enabled(false);
        assert!(!store.sound_enabled());
        assert!(store.record_if_higher(3));
        assert_eq!(store.get(), 3);
    }
}
