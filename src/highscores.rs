//! Score history and leaderboard
//!
//! Every failed run records the level it ended on. The full history is
//! persisted; the leaderboard shows the top 10 levels, best first.

use crate::difficulty::stage_label;
use crate::error::Result;

/// Maximum number of entries shown on the leaderboard
pub const MAX_HIGH_SCORES: usize = 10;

/// LocalStorage key for the score history
pub const STORAGE_KEY: &str = "sillaVibeScores";

/// Backing store for the score history
pub trait ScoreRepository {
    /// Read the full history. `Ok(vec![])` when nothing was stored yet.
    fn load(&self) -> Result<Vec<u32>>;
    /// Overwrite the full history
    fn save(&mut self, scores: &[u32]) -> Result<()>;
}

/// Parse a persisted history (a JSON array of levels)
pub fn decode_scores(json: &str) -> Result<Vec<u32>> {
    Ok(serde_json::from_str(json)?)
}

pub fn encode_scores(scores: &[u32]) -> Result<String> {
    Ok(serde_json::to_string(scores)?)
}

/// Score history over a repository
#[derive(Debug)]
pub struct ScoreStore<R> {
    repo: R,
    scores: Vec<u32>,
}

impl<R: ScoreRepository> ScoreStore<R> {
    /// Load the history. Missing or unreadable data starts an empty history.
    pub fn load(repo: R) -> Self {
        let scores = match repo.load() {
            Ok(scores) => {
                log::info!("Loaded {} scores", scores.len());
                scores
            }
            Err(e) => {
                log::warn!("Could not load scores, starting fresh: {}", e);
                Vec::new()
            }
        };
        Self { repo, scores }
    }

    /// Append a level and persist the whole history.
    /// Returns the leaderboard rank (1-indexed) if the level made the top 10.
    pub fn record(&mut self, level: u32) -> Option<usize> {
        self.scores.push(level);
        match self.repo.save(&self.scores) {
            Ok(()) => log::info!("Score saved ({} entries)", self.scores.len()),
            Err(e) => log::warn!("Could not save scores: {}", e),
        }
        self.rank_of(level)
    }

    /// Leaderboard position a level holds (1-indexed), if it is in the top 10
    pub fn rank_of(&self, level: u32) -> Option<usize> {
        self.top_scores()
            .iter()
            .position(|&s| s == level)
            .map(|i| i + 1)
    }

    /// Top levels, best first
    pub fn top_scores(&self) -> Vec<u32> {
        let mut sorted = self.scores.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.truncate(MAX_HIGH_SCORES);
        sorted
    }

    /// Leaderboard entries as display strings
    pub fn top_labels(&self) -> Vec<String> {
        self.top_scores().into_iter().map(stage_label).collect()
    }

    /// Best level ever reached
    pub fn best(&self) -> Option<u32> {
        self.scores.iter().copied().max()
    }

    /// Full history in recording order
    pub fn history(&self) -> &[u32] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
