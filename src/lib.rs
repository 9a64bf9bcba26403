//! Floaty Squirrel - A side-scrolling glider arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (glider, trees, round state machine)
//! - `session`: Round controller wiring the sim to high scores and audio
//! - `renderer`: WebGPU rendering pipeline
//! - `persistence`: Key-value storage backends (file, LocalStorage, memory)
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScore, HighScoreStore};
pub use session::Session;
pub use settings::{Settings, SettingsStore};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Timer period driving both simulation and redraw (ms)
    pub const TICK_MS: u32 = 16;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = TICK_MS as f32 / 1000.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 1200.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Height of the ground band at the bottom of the screen
    pub const GROUND_MARGIN: f32 = 100.0;

    /// Glider defaults
    pub const GLIDER_START_X: f32 = 100.0;
    pub const GLIDER_START_Y: f32 = 300.0;
    pub const GLIDER_SIZE: f32 = 40.0;
    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.4;
    /// Velocity the glider is set to on impulse (negative = up)
    pub const GLIDE_IMPULSE: f32 = -8.0;

    /// Tree defaults
    pub const TREE_COUNT: usize = 3;
    pub const TREE_SPACING: f32 = 300.0;
    pub const TREE_SPEED: f32 = 3.0;
    pub const TREE_WIDTH: f32 = 80.0;
    pub const TREE_GAP: f32 = 200.0;
    pub const TREE_MIN_HEIGHT: u32 = 50;
    /// Clearance kept below the gap when sizing the top section
    pub const TREE_BOTTOM_CLEARANCE: u32 = 150;

    /// Decorative cloud layer
    pub const CLOUD_COUNT: usize = 8;
    pub const CLOUD_SPEED: f32 = 1.0;
}

/// Axis-aligned rectangle in screen pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Top-left corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Strict overlap test. Rectangles that only share an edge do not
    /// intersect, and empty rectangles never intersect anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }
}
