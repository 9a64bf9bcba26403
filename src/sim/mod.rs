//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (trees left to right)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod background;
pub mod glider;
pub mod state;
pub mod tick;
pub mod tree;

pub use autopilot::autopilot_input;
pub use background::{Background, Cloud};
pub use glider::Glider;
pub use state::{CrashCause, GameEvent, GamePhase, GameState};
pub use tick::{GameInput, finish_round, handle_input, tick};
pub use tree::{Tree, TreeField};
