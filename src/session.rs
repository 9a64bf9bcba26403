//! Round controller
//!
//! Owns the simulation and the two collaborators it reports to: the
//! high-score store (once per ended round) and the audio feedback sink
//! (once per tree passed). Inputs are queued by the host and applied at the
//! start of the next tick, so they never interleave with a tick's own
//! state changes.

use std::collections::VecDeque;

use serde::Serialize;

use crate::audio::ScoreFeedback;
use crate::highscores::HighScoreStore;
use crate::sim::{Cloud, GameEvent, GameInput, GamePhase, GameState, finish_round, handle_input, tick};

/// Read-only view of one tree for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TreeView {
    pub x: f32,
    pub height: f32,
    pub width: f32,
    pub gap: f32,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub phase: GamePhase,
    pub glider_x: f32,
    pub glider_y: f32,
    pub glider_tilt: f32,
    pub glider_size: f32,
    pub trees: Vec<TreeView>,
    pub clouds: Vec<Cloud>,
    pub score: u32,
    pub high_score: u32,
    /// Score of the most recently finished round, if any
    pub last_score: Option<u32>,
    pub screen_width: f32,
    pub screen_height: f32,
    pub ground_y: f32,
}

pub struct Session<H, A> {
    state: GameState,
    high_scores: H,
    audio: A,
    pending: VecDeque<GameInput>,
    events: Vec<GameEvent>,
    last_score: Option<u32>,
    /// Off while the autopilot flies, so demo rounds never count
    record_scores: bool,
}

impl<H: HighScoreStore, A: ScoreFeedback> Session<H, A> {
    pub fn new(state: GameState, high_scores: H, audio: A) -> Self {
        Self {
            state,
            high_scores,
            audio,
            pending: VecDeque::new(),
            events: Vec::new(),
            last_score: None,
            record_scores: true,
        }
    }

    /// Queue an input for the next tick
    pub fn queue_input(&mut self, input: GameInput) {
        self.pending.push_back(input);
    }

    /// Apply queued inputs, advance one tick, then settle the round.
    ///
    /// Returns the events produced, oldest first.
    pub fn tick(&mut self) -> &[GameEvent] {
        self.events.clear();

        while let Some(input) = self.pending.pop_front() {
            handle_input(&mut self.state, input, &mut self.events);
        }

        tick(&mut self.state, &mut self.events);

        for event in &self.events {
            if let GameEvent::TreePassed { .. } = event {
                self.audio.play_score_chime();
            }
        }

        // Ended is transient: record and return to Idle within the same tick
        if let Some(score) = finish_round(&mut self.state) {
            if self.record_scores && self.high_scores.record_if_higher(score) {
                log::info!("New high score: {}", score);
            }
            self.last_score = Some(score);
        }

        &self.events
    }

    /// Whether finished rounds are offered to the high-score store
    pub fn set_record_scores(&mut self, record: bool) {
        self.record_scores = record;
    }

    pub fn records_scores(&self) -> bool {
        self.record_scores
    }

    pub fn snapshot(&self) -> Frame {
        let state = &self.state;
        Frame {
            phase: state.phase,
            glider_x: state.glider.pos.x,
            glider_y: state.glider.pos.y,
            glider_tilt: state.glider.tilt,
            glider_size: state.glider.size(),
            trees: state
                .trees
                .iter()
                .map(|t| TreeView {
                    x: t.x,
                    height: t.height,
                    width: t.width,
                    gap: t.gap,
                })
                .collect(),
            clouds: state.background.clouds().to_vec(),
            score: state.score,
            high_score: self.high_scores.get(),
            last_score: self.last_score,
            screen_width: state.tuning.screen_width,
            screen_height: state.tuning.screen_height,
            ground_y: state.tuning.ground_y(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable simulation access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn high_scores(&self) -> &H {
        &self.high_scores
    }

    pub fn high_scores_mut(&mut self) -> &mut H {
        &mut self.high_scores
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn last_score(&self) -> Option<u32> {
        self.last_score
    }
}
