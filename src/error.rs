//! Error types
//!
//! Nothing here is fatal to a running game: callers log these and fall back
//! to an empty or default value.

use thiserror::Error;

/// Errors raised at the edges of the game core
#[derive(Debug, Error)]
pub enum GameError {
    /// Sequence requested over a grid with no tiles
    #[error("cannot generate a sequence over an empty grid")]
    EmptyGrid,
    /// No storage backend (no window, private mode, native build)
    #[error("storage is unavailable")]
    StorageUnavailable,
    /// Storage backend rejected a read or write
    #[error("storage access failed: {0}")]
    Storage(String),
    /// Persisted data could not be (de)serialized
    #[error("malformed persisted data: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
