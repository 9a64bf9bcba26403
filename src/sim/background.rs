//! Parallax cloud layer
//!
//! Purely cosmetic. Clouds use their own RNG stream so the cloud layer can
//! never perturb tree generation.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::tuning::Tuning;

/// Salt mixed into the run seed for the cloud RNG stream
const CLOUD_STREAM_SALT: u64 = 0xC10D_5EED;

const CLOUD_MIN_WIDTH: u32 = 60;
const CLOUD_WIDTH_VARIANCE: u32 = 40;
const CLOUD_MIN_Y: u32 = 50;
const CLOUD_Y_VARIANCE: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

#[derive(Debug, Clone)]
pub struct Background {
    clouds: Vec<Cloud>,
    rng: Pcg32,
    speed: f32,
    screen_width: f32,
}

impl Background {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let mut background = Self {
            clouds: Vec::with_capacity(tuning.cloud_count),
            rng: Pcg32::seed_from_u64(seed ^ CLOUD_STREAM_SALT),
            speed: tuning.cloud_speed,
            screen_width: tuning.screen_width,
        };
        for _ in 0..tuning.cloud_count {
            let x = background.rng.random_range(0..tuning.screen_width.max(1.0) as u32);
            background.add_cloud(x as f32);
        }
        background
    }

    fn add_cloud(&mut self, x: f32) {
        let y = CLOUD_MIN_Y + self.rng.random_range(0..CLOUD_Y_VARIANCE);
        let width = CLOUD_MIN_WIDTH + self.rng.random_range(0..CLOUD_WIDTH_VARIANCE);
        self.clouds.push(Cloud {
            x,
            y: y as f32,
            width: width as f32,
        });
    }

    /// Drift left; clouds that leave are replaced at the right edge
    pub fn tick(&mut self) {
        for cloud in &mut self.clouds {
            cloud.x -= self.speed;
        }
        let before = self.clouds.len();
        self.clouds.retain(|c| c.x + c.width >= 0.0);
        for _ in self.clouds.len()..before {
            self.add_cloud(self.screen_width);
        }
    }

    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_count_is_stable() {
        let tuning = Tuning::default();
        let mut background = Background::new(42, &tuning);
        assert_eq!(background.clouds().len(), tuning.cloud_count);
        for _ in 0..3000 {
            background.tick();
            assert_eq!(background.clouds().len(), tuning.cloud_count);
        }
    }

    #[test]
    fn test_clouds_respawn_at_right_edge() {
        let tuning = Tuning {
            cloud_count: 1,
            ..Default::default()
        };
        let mut background = Background::new(5, &tuning);
        let start = background.clouds()[0];
        let ticks = (start.x + start.width) as usize + 1;
        for _ in 0..ticks {
            background.tick();
        }
        let cloud = background.clouds()[0];
        assert!(cloud.x >= tuning.screen_width - tuning.cloud_speed);
        assert!(cloud.width >= 60.0 && cloud.width < 100.0);
        assert!(cloud.y >= 50.0 && cloud.y < 250.0);
    }
}
