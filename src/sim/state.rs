//! Game state and core simulation types

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::background::Background;
use super::glider::Glider;
use super::tree::TreeField;
use crate::tuning::Tuning;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Glider parked at the start point, waiting for the first impulse
    Idle,
    /// Active gameplay
    Playing,
    /// Round lost; the session records the score and returns to Idle
    Ended,
}

/// What ended a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Tree,
    Ceiling,
    Ground,
}

/// Things that happened during a tick or input, for collaborators to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// First impulse of a round
    RoundStarted,
    /// A tree scrolled off the left edge; `score` is the new total
    TreePassed { score: u32 },
    /// The glider hit something
    Crashed { cause: CrashCause, score: u32 },
    /// Round abandoned by the player before it ended
    Cancelled { score: u32 },
}

/// Complete simulation state for one session of rounds
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub glider: Glider,
    pub trees: TreeField,
    /// Trees passed this round
    pub score: u32,
    /// Simulation tick counter (all phases)
    pub time_ticks: u64,
    /// Ticks spent in the current round
    pub round_ticks: u64,
    /// Cosmetic cloud layer (not gameplay-affecting)
    pub background: Background,
    /// Gameplay RNG (tree heights only)
    pub rng: Pcg32,
}

impl GameState {
    /// Create a new game state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let trees = TreeField::new(&tuning, &mut rng);
        Self {
            seed,
            glider: Glider::new(&tuning),
            trees,
            background: Background::new(seed, &tuning),
            tuning,
            phase: GamePhase::Idle,
            score: 0,
            time_ticks: 0,
            round_ticks: 0,
            rng,
        }
    }

    /// Put the glider, trees and score back to their pre-play layout
    pub fn reset_round(&mut self) {
        self.glider.reset();
        self.trees.reset(&mut self.rng);
        self.score = 0;
        self.round_ticks = 0;
        self.phase = GamePhase::Idle;
    }

    /// Whether the glider has left the open flying band `(0, ground_y)`
    pub fn glider_out_of_bounds(&self) -> Option<CrashCause> {
        let y = self.glider.pos.y;
        if y <= 0.0 {
            Some(CrashCause::Ceiling)
        } else if y >= self.tuning.ground_y() {
            Some(CrashCause::Ground)
        } else {
            None
        }
    }
}
