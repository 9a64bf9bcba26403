//! Demo/attract-mode pilot
//!
//! Steers toward the centre of the next gap by flapping whenever the glider
//! sinks too far below it. Used by the headless runner and the idle screen.

use super::state::{GamePhase, GameState};
use super::tick::GameInput;

/// How far below the gap centre the glider may sink before flapping
const SINK_SLACK: f32 = 20.0;

/// Decide the input for the coming tick, if any
pub fn autopilot_input(state: &GameState) -> Option<GameInput> {
    match state.phase {
        GamePhase::Idle => Some(GameInput::Impulse),
        GamePhase::Ended => None,
        GamePhase::Playing => {
            let glider = &state.glider;
            // Aim for mid-screen (above the ground band) when no tree is ahead
            let target = state
                .trees
                .next_ahead_of(glider.pos.x)
                .map(|tree| tree.gap_center())
                .unwrap_or(state.tuning.ground_y() / 2.0);

            let sinking = glider.vel >= 0.0;
            if sinking && glider.center_y() > target + SINK_SLACK {
                Some(GameInput::Impulse)
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::{handle_input, tick};

    #[test]
    fn test_autopilot_starts_round() {
        let state = GameState::new(1);
        assert_eq!(autopilot_input(&state), Some(GameInput::Impulse));
    }

    #[test]
    fn test_autopilot_flaps_only_when_sinking_below_gap() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        handle_input(&mut state, GameInput::Impulse, &mut events);
        {
            let trees = state.trees.trees_mut();
            trees[0].x = 300.0;
            trees[0].height = 100.0; // gap centre at 200
        }

        // Rising: never flap
        state.glider.pos.y = 400.0;
        state.glider.vel = -3.0;
        assert_eq!(autopilot_input(&state), None);

        // Sinking well below the gap: flap
        state.glider.vel = 1.0;
        assert_eq!(autopilot_input(&state), Some(GameInput::Impulse));

        // Sinking but already near the gap centre: glide
        state.glider.pos.y = 195.0;
        assert_eq!(autopilot_input(&state), None);
    }

    #[test]
    fn test_autopilot_passes_first_tree() {
        let mut state = GameState::new(2024);
        let mut events = Vec::new();
        for _ in 0..1000 {
            if let Some(input) = autopilot_input(&state) {
                handle_input(&mut state, input, &mut events);
            }
            tick(&mut state, &mut events);
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        assert!(state.score >= 1, "autopilot crashed: {:?}", events.last());
    }
}
