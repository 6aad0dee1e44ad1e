//! Game core
//!
//! All gameplay logic lives here. Nothing in this module touches the DOM,
//! audio or storage directly:
//! - Time advances only through the [`Scheduler`]
//! - Randomness comes from a seeded PCG stream
//! - Side effects go through the [`Renderer`] / [`AudioOutput`] traits

pub mod controller;
pub mod headless;
pub mod io;
pub mod playback;
pub mod sequence;
pub mod state;
pub mod verifier;

pub use controller::{GameController, TickInput};
pub use headless::{MemoryRepository, RecordingAudio, RecordingRenderer};
pub use io::{AudioOutput, Renderer};
pub use playback::{Cue, Scheduler, Timing, playback_cues, playback_duration_ms};
pub use sequence::{Sequence, generate};
pub use state::{GamePhase, GameState, LevelOutcome};
pub use verifier::{ClickOutcome, InputVerifier, VerifierState};
