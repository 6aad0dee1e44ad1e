//! Game state and phases
//!
//! Everything that changes during a run lives in [`GameState`], owned by the
//! controller. Nothing here touches the DOM or audio.

use super::playback::{Cue, Scheduler};
use super::sequence::Sequence;
use super::verifier::InputVerifier;
use crate::difficulty::Difficulty;

/// Current phase of the level lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Waiting for the first start
    #[default]
    NotStarted,
    /// Sequence is being played back; clicks ignored
    ShowingSequence,
    /// Player is reproducing the sequence
    AwaitingInput,
    /// Sequence matched; waiting for the next-level action
    LevelSuccess,
    /// Run ended on a mismatch; waiting for restart
    GameOver,
}

impl GamePhase {
    /// Whether the start/restart action is accepted
    pub fn can_start(&self) -> bool {
        matches!(self, GamePhase::NotStarted | GamePhase::GameOver)
    }
}

/// How an attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    Success,
    Failure,
}

/// Complete run state
#[derive(Debug, Clone)]
pub struct GameState {
    /// 1-based level
    pub level: u32,
    pub phase: GamePhase,
    /// Side length of the grid currently built (0 = none)
    pub grid_size: u32,
    /// Target for the current attempt
    pub sequence: Sequence,
    pub verifier: InputVerifier,
    /// Pending playback and click-feedback cues
    pub scheduler: Scheduler<Cue>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            level: 1,
            phase: GamePhase::NotStarted,
            grid_size: 0,
            sequence: Vec::new(),
            verifier: InputVerifier::new(),
            scheduler: Scheduler::new(),
        }
    }

    /// Difficulty for the current level
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::for_level(self.level)
    }

    /// Number of tiles on the active grid
    pub fn tile_count(&self) -> usize {
        self.grid_size as usize * self.grid_size as usize
    }
}
