//! Data-driven game balance
//!
//! Every constant that stays fixed for a session lives in [`Tuning`]. The
//! defaults reproduce the classic feel; a partial JSON document can override
//! any subset of them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Upper bound for per-field object counts
pub const MAX_OBJECTS: usize = 64;

/// Reasons a tuning document is rejected
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// JSON could not be parsed
    Parse(String),
    /// A size, speed or spacing that must be positive was not
    NonPositive { field: &'static str, value: f32 },
    /// The impulse must point upward (negative)
    ImpulseNotUpward { value: f32 },
    /// At least one tree must be active
    NoTrees,
    /// The ground band must leave room to fly
    GroundOutOfRange { ground_margin: f32, screen_height: f32 },
    /// More trees or clouds than the field can hold
    TooMany { field: &'static str, value: usize },
    /// The shortest top section plus the gap must fit on screen
    TreeTooTall { min_height: u32, tree_gap: f32, screen_height: f32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid tuning json: {msg}"),
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive (got {value})")
            }
            Self::ImpulseNotUpward { value } => {
                write!(f, "glide_impulse must be negative (got {value})")
            }
            Self::NoTrees => write!(f, "tree_count must be at least 1"),
            Self::GroundOutOfRange {
                ground_margin,
                screen_height,
            } => write!(
                f,
                "ground_margin {ground_margin} must be in [0, {screen_height})"
            ),
            Self::TooMany { field, value } => {
                write!(f, "{field} must be at most {MAX_OBJECTS} (got {value})")
            }
            Self::TreeTooTall {
                min_height,
                tree_gap,
                screen_height,
            } => write!(
                f,
                "tree_min_height {min_height} plus tree_gap {tree_gap} must stay below {screen_height}"
            ),
        }
    }
}

impl std::error::Error for TuningError {}

/// Session-fixed game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub screen_width: f32,
    pub screen_height: f32,
    pub ground_margin: f32,

    pub glider_start_x: f32,
    pub glider_start_y: f32,
    pub glider_size: f32,
    pub gravity: f32,
    pub glide_impulse: f32,

    pub tree_count: usize,
    pub tree_spacing: f32,
    pub tree_speed: f32,
    pub tree_width: f32,
    pub tree_gap: f32,
    pub tree_min_height: u32,
    pub tree_bottom_clearance: u32,

    pub cloud_count: usize,
    pub cloud_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ground_margin: GROUND_MARGIN,

            glider_start_x: GLIDER_START_X,
            glider_start_y: GLIDER_START_Y,
            glider_size: GLIDER_SIZE,
            gravity: GRAVITY,
            glide_impulse: GLIDE_IMPULSE,

            tree_count: TREE_COUNT,
            tree_spacing: TREE_SPACING,
            tree_speed: TREE_SPEED,
            tree_width: TREE_WIDTH,
            tree_gap: TREE_GAP,
            tree_min_height: TREE_MIN_HEIGHT,
            tree_bottom_clearance: TREE_BOTTOM_CLEARANCE,

            cloud_count: CLOUD_COUNT,
            cloud_speed: CLOUD_SPEED,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("glider_size", self.glider_size),
            ("gravity", self.gravity),
            ("tree_spacing", self.tree_spacing),
            ("tree_speed", self.tree_speed),
            ("tree_width", self.tree_width),
            ("tree_gap", self.tree_gap),
            ("cloud_speed", self.cloud_speed),
        ];
        for (field, value) in positive {
            if value <= 0.0 || !value.is_finite() {
                return Err(TuningError::NonPositive { field, value });
            }
        }
        if self.glide_impulse >= 0.0 {
            return Err(TuningError::ImpulseNotUpward {
                value: self.glide_impulse,
            });
        }
        if self.tree_count == 0 {
            return Err(TuningError::NoTrees);
        }
        for (field, value) in [
            ("tree_count", self.tree_count),
            ("cloud_count", self.cloud_count),
        ] {
            if value > MAX_OBJECTS {
                return Err(TuningError::TooMany { field, value });
            }
        }
        if self.tree_min_height as f32 + self.tree_gap >= self.screen_height {
            return Err(TuningError::TreeTooTall {
                min_height: self.tree_min_height,
                tree_gap: self.tree_gap,
                screen_height: self.screen_height,
            });
        }
        if !(0.0..self.screen_height).contains(&self.ground_margin) {
            return Err(TuningError::GroundOutOfRange {
                ground_margin: self.ground_margin,
                screen_height: self.screen_height,
            });
        }
        Ok(())
    }

    /// Half-open range the top section height is drawn from.
    ///
    /// The upper bound is `screen_height - gap - bottom_clearance`, but the
    /// range is always at least one pixel wide.
    pub fn tree_height_range(&self) -> (u32, u32) {
        let ceiling = self.screen_height - self.tree_gap - self.tree_bottom_clearance as f32;
        let ceiling = ceiling.max(0.0) as u32;
        let span = ceiling.saturating_sub(self.tree_min_height).max(1);
        let max = self.tree_min_height.saturating_add(span);
        (max - span, max)
    }

    /// Lowest y the glider may reach before touching the ground band
    pub fn ground_y(&self) -> f32 {
        self.screen_height - self.ground_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.tree_height_range(), (50, 250));
        assert_eq!(tuning.ground_y(), 500.0);
    }

    #[test]
    fn test_partial_json_overrides() {
        let tuning = Tuning::from_json(r#"{ "tree_gap": 150.0, "tree_count": 4 }"#).unwrap();
        assert_eq!(tuning.tree_gap, 150.0);
        assert_eq!(tuning.tree_count, 4);
        // Untouched fields keep their defaults
        assert_eq!(tuning.gravity, GRAVITY);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "tree_speed": 0.0 }"#),
            Err(TuningError::NonPositive { field: "tree_speed", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "glide_impulse": 3.0 }"#),
            Err(TuningError::ImpulseNotUpward { .. })
        ));
        assert_eq!(
            Tuning::from_json(r#"{ "tree_count": 0 }"#),
            Err(TuningError::NoTrees)
        );
        assert!(matches!(
            Tuning::from_json(r#"{ "ground_margin": 600.0 }"#),
            Err(TuningError::GroundOutOfRange { .. })
        ));
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_fields() {
        assert_eq!(
            Tuning::from_json(r#"{ "tree_count": 18446744073709551615 }"#),
            Err(TuningError::TooMany {
                field: "tree_count",
                value: usize::MAX
            })
        );
        assert_eq!(
            Tuning::from_json(r#"{ "cloud_count": 65 }"#),
            Err(TuningError::TooMany {
                field: "cloud_count",
                value: 65
            })
        );
        assert!(Tuning::from_json(r#"{ "tree_count": 64, "cloud_count": 64 }"#).is_ok());
    }

    #[test]
    fn test_rejects_tree_taller_than_screen() {
        assert!(matches!(
            Tuning::from_json(r#"{ "tree_min_height": 4294967295 }"#),
            Err(TuningError::TreeTooTall { .. })
        ));
        // 400 + 200 reaches the floor
        assert!(matches!(
            Tuning::from_json(r#"{ "tree_min_height": 400 }"#),
            Err(TuningError::TreeTooTall { .. })
        ));
    }

    #[test]
    fn test_height_range_saturates() {
        let tuning = Tuning {
            tree_min_height: u32::MAX,
            ..Default::default()
        };
        let (min, max) = tuning.tree_height_range();
        assert_eq!(max, u32::MAX);
        assert!(min < max);
    }

    #[test]
    fn test_height_range_never_empty() {
        // Gap so large the natural range collapses
        let tuning = Tuning {
            tree_gap: 500.0,
            ..Default::default()
        };
        let (min, max) = tuning.tree_height_range();
        assert_eq!(max - min, 1);
        assert!(tuning.validate().is_ok());
    }
}
