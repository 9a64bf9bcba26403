//! Fixed timestep simulation tick
//!
//! Core game loop that advances the round state machine deterministically.
//! Inputs are applied between ticks, never during one.

use super::state::{CrashCause, GameEvent, GamePhase, GameState};

/// Logical player inputs (key codes and buttons are mapped by the host)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// Flap: start the round if idle, otherwise reset velocity upward
    Impulse,
    /// Abandon the current round and return to the pre-play state
    Cancel,
}

/// Apply one input event to the state machine
pub fn handle_input(state: &mut GameState, input: GameInput, events: &mut Vec<GameEvent>) {
    match (state.phase, input) {
        (GamePhase::Idle, GameInput::Impulse) => {
            state.phase = GamePhase::Playing;
            state.glider.apply_impulse();
            events.push(GameEvent::RoundStarted);
            log::info!("Round started");
        }
        (GamePhase::Playing, GameInput::Impulse) => {
            state.glider.apply_impulse();
        }
        (GamePhase::Playing, GameInput::Cancel) => {
            let score = state.score;
            state.reset_round();
            events.push(GameEvent::Cancelled { score });
            log::info!("Round cancelled at score {}", score);
        }
        (GamePhase::Idle, GameInput::Cancel) => {
            state.reset_round();
        }
        // The session resolves Ended before accepting more input
        (GamePhase::Ended, _) => {}
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.time_ticks += 1;

    // Clouds drift in every phase
    state.background.tick();

    if state.phase != GamePhase::Playing {
        return;
    }
    state.round_ticks += 1;

    state.glider.tick();

    // Recycle trees that left the screen; one point per tree removed
    let passed = state.trees.tick(&mut state.rng);
    for _ in 0..passed {
        state.score += 1;
        events.push(GameEvent::TreePassed { score: state.score });
        log::debug!("Tree passed, score {}", state.score);
    }

    let bounds = state.glider.bounding_box();
    if state.trees.any_collision(&bounds) {
        end_round(state, CrashCause::Tree, events);
        return;
    }

    if let Some(cause) = state.glider_out_of_bounds() {
        end_round(state, cause, events);
    }
}

fn end_round(state: &mut GameState, cause: CrashCause, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::Ended;
    events.push(GameEvent::Crashed {
        cause,
        score: state.score,
    });
    log::info!(
        "Round ended ({:?}) with score {} after {} ticks",
        cause,
        state.score,
        state.round_ticks
    );
}

/// Complete an ended round: reset to Idle and hand back the final score.
///
/// Returns `None` when the round has not ended.
pub fn finish_round(state: &mut GameState) -> Option<u32> {
    if state.phase != GamePhase::Ended {
        return None;
    }
    let score = state.score;
    state.reset_round();
    Some(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn clear_trees(state: &mut GameState) {
        // Park every tree far to the right so nothing can be hit
        for (i, tree) in state.trees.trees_mut().iter_mut().enumerate() {
            tree.x = 100_000.0 + i as f32 * TREE_SPACING;
        }
    }

    #[test]
    fn test_idle_to_playing() {
        let mut state = GameState::new(12345);
        let mut events = Vec::new();

        // Ticking while idle does not move the glider
        tick(&mut state, &mut events);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.glider.pos.y, GLIDER_START_Y);
        assert_eq!(state.round_ticks, 0);

        handle_input(&mut state, GameInput::Impulse, &mut events);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.glider.vel, GLIDE_IMPULSE);
        assert_eq!(events, vec![GameEvent::RoundStarted]);
    }

    #[test]
    fn test_velocity_per_tick() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        clear_trees(&mut state);
        handle_input(&mut state, GameInput::Impulse, &mut events);

        let mut expected = GLIDE_IMPULSE;
        for _ in 0..5 {
            tick(&mut state, &mut events);
            expected += GRAVITY;
            assert!((state.glider.vel - expected).abs() < 1e-5);
        }

        handle_input(&mut state, GameInput::Impulse, &mut events);
        assert_eq!(state.glider.vel, GLIDE_IMPULSE);
    }

    #[test]
    fn test_ground_crash_ends_round() {
        let mut state = GameState::new(2);
        let mut events = Vec::new();
        clear_trees(&mut state);
        handle_input(&mut state, GameInput::Impulse, &mut events);

        let mut ticks = 0;
        while state.phase == GamePhase::Playing {
            tick(&mut state, &mut events);
            ticks += 1;
            assert!(ticks < 1000, "glider never reached the ground");
        }

        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(
            events.last(),
            Some(&GameEvent::Crashed {
                cause: CrashCause::Ground,
                score: 0
            })
        );
        assert!(state.glider.pos.y >= state.tuning.ground_y());

        assert_eq!(finish_round(&mut state), Some(0));
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.glider.pos, state.glider.start());
        assert_eq!(state.glider.vel, 0.0);
        assert_eq!(finish_round(&mut state), None);
    }

    #[test]
    fn test_ceiling_crash() {
        let mut state = GameState::new(3);
        let mut events = Vec::new();
        clear_trees(&mut state);
        handle_input(&mut state, GameInput::Impulse, &mut events);

        // Keep flapping until the glider leaves through the top
        for _ in 0..1000 {
            if state.phase != GamePhase::Playing {
                break;
            }
            handle_input(&mut state, GameInput::Impulse, &mut events);
            tick(&mut state, &mut events);
        }
        assert_eq!(state.phase, GamePhase::Ended);
        assert!(matches!(
            events.last(),
            Some(GameEvent::Crashed {
                cause: CrashCause::Ceiling,
                ..
            })
        ));
    }

    #[test]
    fn test_tree_crash() {
        let mut state = GameState::new(4);
        let mut events = Vec::new();
        handle_input(&mut state, GameInput::Impulse, &mut events);

        // A tree whose top trunk reaches past the glider
        {
            let trees = state.trees.trees_mut();
            trees[0].x = 120.0;
            trees[0].height = 450.0;
        }
        tick(&mut state, &mut events);
        assert_eq!(state.phase, GamePhase::Ended);
        assert!(matches!(
            events.last(),
            Some(GameEvent::Crashed {
                cause: CrashCause::Tree,
                score: 0
            })
        ));
    }

    #[test]
    fn test_passing_tree_scores() {
        let mut state = GameState::new(5);
        let mut events = Vec::new();
        clear_trees(&mut state);
        handle_input(&mut state, GameInput::Impulse, &mut events);
        state.trees.trees_mut()[0].x = -80.0;

        tick(&mut state, &mut events);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 1);
        assert!(events.contains(&GameEvent::TreePassed { score: 1 }));
        assert_eq!(state.trees.len(), TREE_COUNT);
    }

    #[test]
    fn test_cancel_resets_without_ending() {
        let mut state = GameState::new(6);
        let mut events = Vec::new();
        clear_trees(&mut state);
        handle_input(&mut state, GameInput::Impulse, &mut events);
        state.score = 4;
        for _ in 0..3 {
            tick(&mut state, &mut events);
        }

        events.clear();
        handle_input(&mut state, GameInput::Cancel, &mut events);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.glider.pos, state.glider.start());
        assert_eq!(events, vec![GameEvent::Cancelled { score: 4 }]);
        assert_eq!(state.trees.iter().next().map(|t| t.x), Some(SCREEN_WIDTH));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        let mut events1 = Vec::new();
        let mut events2 = Vec::new();

        for i in 0..400 {
            if i % 18 == 0 {
                handle_input(&mut state1, GameInput::Impulse, &mut events1);
                handle_input(&mut state2, GameInput::Impulse, &mut events2);
            }
            tick(&mut state1, &mut events1);
            tick(&mut state2, &mut events2);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.glider, state2.glider);
        assert_eq!(events1, events2);
        let xs1: Vec<f32> = state1.trees.iter().map(|t| t.height).collect();
        let xs2: Vec<f32> = state2.trees.iter().map(|t| t.height).collect();
        assert_eq!(xs1, xs2);
    }
}
