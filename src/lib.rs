//! Silla Vibe - A tile memory-sequence game
//!
//! Core modules:
//! - `game`: Level lifecycle, playback scheduling and input verification
//! - `difficulty`: Level to grid size / sequence length / speed tuning
//! - `highscores`: Score history and leaderboard
//! - `audio`: Tile tone palette and Web Audio playback
//! - `platform`: Browser storage
//! - `settings`: Persisted preferences

pub mod audio;
pub mod difficulty;
pub mod error;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod settings;

pub use difficulty::{Difficulty, stage_label};
pub use error::{GameError, Result};
pub use game::{GameController, GamePhase, TickInput};
pub use highscores::{ScoreRepository, ScoreStore};
pub use settings::Settings;
