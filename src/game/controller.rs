//! Level lifecycle
//!
//! The controller owns the [`GameState`] and drives its collaborators:
//! start → show sequence → await input → success (next level) or game over.
//! Time only moves when the host calls [`GameController::advance`] or
//! [`GameController::tick`].

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::io::{AudioOutput, Renderer};
use super::playback::{Cue, Timing, playback_cues};
use super::sequence::generate;
use super::state::{GamePhase, GameState, LevelOutcome};
use super::verifier::ClickOutcome;
use crate::difficulty::stage_label;
use crate::highscores::{ScoreRepository, ScoreStore};

pub const START_LABEL: &str = "Start";
pub const RESTART_LABEL: &str = "Restart";
pub const MSG_MEMORIZE: &str = "Memorize the sequence...";
pub const MSG_YOUR_TURN: &str = "Your turn!";
pub const MSG_SUCCESS: &str = "Success! Continue to the next level.";

/// Commands gathered from the UI between frames
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start / restart pressed
    pub start: bool,
    /// Next level pressed
    pub next_level: bool,
    /// Tiles clicked, in order
    pub clicks: Vec<usize>,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        !self.start && !self.next_level && self.clicks.is_empty()
    }

    pub fn clear(&mut self) {
        self.start = false;
        self.next_level = false;
        self.clicks.clear();
    }
}

/// Runs the game over injected renderer, audio and score storage
pub struct GameController<R, A, S> {
    state: GameState,
    renderer: R,
    audio: A,
    scores: ScoreStore<S>,
    rng: Pcg32,
    timing: Timing,
}

impl<R, A, S> GameController<R, A, S>
where
    R: Renderer,
    A: AudioOutput,
    S: ScoreRepository,
{
    /// Load the score history and show the idle screen
    pub fn new(renderer: R, audio: A, repo: S, seed: u64, timing: Timing) -> Self {
        let mut controller = Self {
            state: GameState::new(),
            renderer,
            audio,
            scores: ScoreStore::load(repo),
            rng: Pcg32::seed_from_u64(seed),
            timing,
        };

        controller.renderer.set_start_label(START_LABEL);
        controller.renderer.set_start_enabled(true);
        controller.renderer.set_next_level_visible(false);
        controller.show_level();
        controller.show_scores();

        log::info!("Game initialized with seed: {}", seed);
        controller
    }

    /// Start (or restart) a run at level 1.
    ///
    /// Only accepted before the first run and after a game over; the start
    /// control is disabled in every other phase.
    pub fn start(&mut self) {
        if !self.state.phase.can_start() {
            log::debug!("Ignoring start during {:?}", self.state.phase);
            return;
        }

        self.state.level = 1;
        // Forget the active grid so the first level always builds a fresh one
        self.state.grid_size = 0;
        self.renderer.set_start_label(RESTART_LABEL);
        self.renderer.set_next_level_visible(false);
        self.show_level();

        log::info!("New game");
        self.start_level();
    }

    /// Advance to the next level after a success
    pub fn next_level(&mut self) {
        if self.state.phase != GamePhase::LevelSuccess {
            log::debug!("Ignoring next level during {:?}", self.state.phase);
            return;
        }

        self.state.level = self.state.level.saturating_add(1);
        self.show_level();
        self.start_level();
    }

    fn start_level(&mut self) {
        let difficulty = self.state.difficulty();

        if difficulty.grid_size != self.state.grid_size {
            self.renderer.build_grid(difficulty.grid_size);
            self.state.grid_size = difficulty.grid_size;
            log::info!(
                "Built {}x{} grid",
                difficulty.grid_size,
                difficulty.grid_size
            );
        }

        self.renderer.show_message(MSG_MEMORIZE);
        self.renderer.set_start_enabled(false);
        self.renderer.set_next_level_visible(false);
        self.state.scheduler.cancel_all();

        let sequence = match generate(
            &mut self.rng,
            difficulty.sequence_length,
            difficulty.tile_count(),
        ) {
            Ok(sequence) => sequence,
            Err(e) => {
                log::error!("Cannot start level {}: {}", self.state.level, e);
                return;
            }
        };

        self.state.verifier.load(sequence.clone());
        self.state.sequence = sequence;
        self.state.phase = GamePhase::ShowingSequence;

        let cues = playback_cues(&self.state.sequence, difficulty.speed_ms, &self.timing);
        let ends_at = self.state.scheduler.run_in_order(cues);
        log::debug!(
            "Level {}: {} tiles at {}ms, input at t={}ms",
            self.state.level,
            self.state.sequence.len(),
            difficulty.speed_ms,
            ends_at
        );
    }

    /// Handle a tile click.
    ///
    /// Accepted clicks play the tile's tone and light it for the feedback
    /// duration. A deciding click ends the level once its feedback is over.
    pub fn click(&mut self, tile: usize) -> ClickOutcome {
        if self.state.phase != GamePhase::AwaitingInput {
            return ClickOutcome::Ignored;
        }
        if tile >= self.state.tile_count() {
            log::warn!("Click on unknown tile {}", tile);
            return ClickOutcome::Ignored;
        }

        let outcome = self.state.verifier.click(tile);
        if outcome == ClickOutcome::Ignored {
            return outcome;
        }

        self.audio.play_tone(tile);
        self.renderer.set_highlight(tile, true);

        let feedback = self.timing.click_feedback_ms;
        self.state.scheduler.schedule_after(feedback, Cue::Hide(tile));
        match outcome {
            ClickOutcome::Failed => self
                .state
                .scheduler
                .schedule_after(feedback, Cue::Resolve(LevelOutcome::Failure)),
            ClickOutcome::LevelComplete => self
                .state
                .scheduler
                .schedule_after(feedback, Cue::Resolve(LevelOutcome::Success)),
            _ => {}
        }

        outcome
    }

    /// Move time forward and apply every cue that came due
    pub fn advance(&mut self, dt_ms: u32) {
        for cue in self.state.scheduler.advance(dt_ms) {
            self.apply(cue);
        }
    }

    /// Apply queued UI commands, then advance time
    pub fn tick(&mut self, input: &TickInput, dt_ms: u32) {
        if input.start {
            self.start();
        }
        if input.next_level {
            self.next_level();
        }
        for &tile in &input.clicks {
            self.click(tile);
        }
        self.advance(dt_ms);
    }

    /// Advance until nothing is pending
    pub fn run_pending(&mut self) {
        while let Some(dt) = self.state.scheduler.next_due_in() {
            self.advance(u32::try_from(dt).unwrap_or(u32::MAX));
        }
    }

    /// Time until the next scheduled cue (ms)
    pub fn next_due_in(&self) -> Option<u64> {
        self.state.scheduler.next_due_in()
    }

    fn apply(&mut self, cue: Cue) {
        match cue {
            Cue::Show(tile) => {
                self.audio.play_tone(tile);
                self.renderer.set_highlight(tile, true);
            }
            Cue::Hide(tile) => self.renderer.set_highlight(tile, false),
            Cue::InputReady => {
                self.state.verifier.arm();
                self.state.phase = GamePhase::AwaitingInput;
                self.renderer.show_message(MSG_YOUR_TURN);
            }
            Cue::Resolve(outcome) => {
                if self.state.phase == GamePhase::AwaitingInput {
                    self.end_level(outcome);
                }
            }
        }
    }

    fn end_level(&mut self, outcome: LevelOutcome) {
        match outcome {
            LevelOutcome::Success => {
                self.state.phase = GamePhase::LevelSuccess;
                self.renderer.show_message(MSG_SUCCESS);
                self.renderer.set_next_level_visible(true);
            }
            LevelOutcome::Failure => {
                self.state.phase = GamePhase::GameOver;
                let level = self.state.level;
                if let Some(rank) = self.scores.record(level) {
                    log::info!("Level {} placed #{} on the leaderboard", level, rank);
                }
                self.show_scores();
                self.renderer
                    .show_message(&format!("Failed! Game over at {}.", stage_label(level)));
                self.renderer.set_start_enabled(true);
            }
        }
    }

    fn show_level(&mut self) {
        let d = self.state.difficulty();
        self.renderer.show_level(d.stage, d.level_in_stage);
    }

    fn show_scores(&mut self) {
        let labels = self.scores.top_labels();
        self.renderer.show_scores(&labels);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn scores(&self) -> &ScoreStore<S> {
        &self.scores
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }
}
