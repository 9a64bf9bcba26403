//! The player's glider
//!
//! Falls under constant gravity; an impulse replaces (not adds to) the
//! current velocity with a fixed upward burst.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::tuning::Tuning;

/// Horizontal reference speed used to derive the tilt angle
const TILT_REFERENCE: f32 = 5.0;
/// Damping applied to the raw tilt so the body never turns fully vertical
const TILT_DAMPING: f32 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glider {
    /// Top-left of the bounding box. `x` never changes during a round.
    pub pos: Vec2,
    /// Vertical velocity in pixels/tick (positive = downward)
    pub vel: f32,
    /// Cosmetic body rotation in radians, derived from velocity
    pub tilt: f32,
    start: Vec2,
    size: f32,
    gravity: f32,
    impulse: f32,
}

impl Glider {
    pub fn new(tuning: &Tuning) -> Self {
        let start = Vec2::new(tuning.glider_start_x, tuning.glider_start_y);
        Self {
            pos: start,
            vel: 0.0,
            tilt: 0.0,
            start,
            size: tuning.glider_size,
            gravity: tuning.gravity,
            impulse: tuning.glide_impulse,
        }
    }

    /// Back to the start point, at rest
    pub fn reset(&mut self) {
        self.pos = self.start;
        self.vel = 0.0;
        self.tilt = 0.0;
    }

    /// Advance one tick: accumulate gravity, then move
    pub fn tick(&mut self) {
        self.vel += self.gravity;
        self.pos.y += self.vel;
        self.tilt = self.vel.atan2(TILT_REFERENCE) * TILT_DAMPING;
    }

    /// Set velocity to the fixed upward burst
    pub fn apply_impulse(&mut self) {
        self.vel = self.impulse;
    }

    /// Collision box: full size wide, half size tall
    pub fn bounding_box(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size / 2.0)
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Vertical centre of the bounding box
    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size / 4.0
    }
}
