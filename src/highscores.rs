//! Best-score tracking
//!
//! The best score is a single integer. The in-memory [`HighScore`] implements
//! the [`HighScoreStore`] contract directly; [`crate::SettingsStore`] wraps
//! it with persistence.

use std::io;

use serde::{Deserialize, Serialize};

use crate::persistence::Storage;

/// What the round controller needs from a high-score keeper
pub trait HighScoreStore {
    /// Current best score
    fn get(&self) -> u32;

    /// Keep `score` if it beats the current best.
    /// Returns true when a new best was set.
    fn record_if_higher(&mut self, score: u32) -> bool;
}

/// Best score across all rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    pub best: u32,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "floaty_squirrel_highscore";

    pub fn new() -> Self {
        Self::default()
    }

    /// Load from storage, falling back to zero when missing or unreadable
    pub fn load(storage: &impl Storage) -> Self {
        match storage.read(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<HighScore>(&json) {
                Ok(high_score) => {
                    log::info!("Loaded high score {}", high_score.best);
                    return high_score;
                }
                Err(e) => log::warn!("Ignoring corrupt high score: {}", e),
            },
            Ok(None) => log::info!("No high score found, starting fresh"),
            Err(e) => log::warn!("Failed to read high score: {}", e),
        }
        Self::new()
    }

    pub fn save(&self, storage: &mut impl Storage) -> io::Result<()> {
        let json = serde_json::to_string(self)?;
        storage.write(Self::STORAGE_KEY, &json)?;
        log::info!("High score saved ({})", self.best);
        Ok(())
    }
}

impl HighScoreStore for HighScore {
    fn get(&self) -> u32 {
        self.best
    }

    fn record_if_higher(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }
}
