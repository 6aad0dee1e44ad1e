//! LocalStorage access
//!
//! Reads distinguish "nothing stored" (`Ok(None)`) from unreadable data so
//! callers can log the difference before falling back to defaults.

use serde::Serialize;
use serde::de::DeserializeOwned;
use web_sys::Storage;

use crate::error::{GameError, Result};
use crate::highscores::{self, ScoreRepository};

fn local_storage() -> Result<Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .ok_or(GameError::StorageUnavailable)
}

/// Raw stored text for `key`
pub fn read_raw(key: &str) -> Result<Option<String>> {
    local_storage()?
        .get_item(key)
        .map_err(|e| GameError::Storage(format!("{:?}", e)))
}

pub fn write_raw(key: &str, value: &str) -> Result<()> {
    local_storage()?
        .set_item(key, value)
        .map_err(|e| GameError::Storage(format!("{:?}", e)))
}

pub fn read_json<T: DeserializeOwned>(key: &str) -> Result<Option<T>> {
    match read_raw(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

pub fn write_json<T: Serialize>(key: &str, value: &T) -> Result<()> {
    write_raw(key, &serde_json::to_string(value)?)
}

/// Score history under [`highscores::STORAGE_KEY`]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageScores;

impl ScoreRepository for LocalStorageScores {
    fn load(&self) -> Result<Vec<u32>> {
        match read_raw(highscores::STORAGE_KEY)? {
            Some(json) => highscores::decode_scores(&json),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, scores: &[u32]) -> Result<()> {
        write_raw(highscores::STORAGE_KEY, &highscores::encode_scores(scores)?)
    }
}
