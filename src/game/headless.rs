//! In-memory collaborators
//!
//! Used by the native demo and by tests to drive the controller without a
//! browser. The renderer keeps the latest visible state and a log of grid
//! rebuilds; messages are also forwarded to `log`.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use super::io::{AudioOutput, Renderer};
use crate::error::Result;
use crate::highscores::{ScoreRepository, decode_scores, encode_scores};

/// Renderer that records what a player would see
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    /// Grid sizes in build order
    pub grids_built: Vec<u32>,
    /// Currently highlighted tiles
    pub highlighted: BTreeSet<usize>,
    /// Every highlight change, in order
    pub highlight_log: Vec<(usize, bool)>,
    /// (stage, level in stage)
    pub level: (u32, u32),
    pub message: String,
    pub start_enabled: bool,
    pub start_label: String,
    pub next_level_visible: bool,
    pub scores: Vec<String>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self {
            start_enabled: true,
            start_label: "Start".to_string(),
            ..Default::default()
        }
    }
}

impl Renderer for RecordingRenderer {
    fn build_grid(&mut self, grid_size: u32) {
        self.grids_built.push(grid_size);
        self.highlighted.clear();
    }

    fn set_highlight(&mut self, tile: usize, on: bool) {
        if on {
            self.highlighted.insert(tile);
        } else {
            self.highlighted.remove(&tile);
        }
        self.highlight_log.push((tile, on));
    }

    fn show_level(&mut self, stage: u32, level_in_stage: u32) {
        self.level = (stage, level_in_stage);
    }

    fn show_message(&mut self, message: &str) {
        log::info!("{}", message);
        self.message = message.to_string();
    }

    fn set_start_enabled(&mut self, enabled: bool) {
        self.start_enabled = enabled;
    }

    fn set_start_label(&mut self, label: &str) {
        self.start_label = label.to_string();
    }

    fn set_next_level_visible(&mut self, visible: bool) {
        self.next_level_visible = visible;
    }

    fn show_scores(&mut self, labels: &[String]) {
        self.scores = labels.to_vec();
    }
}

/// Audio output that only remembers which tones were requested
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub tones: Vec<usize>,
}

impl AudioOutput for RecordingAudio {
    fn play_tone(&mut self, tile: usize) {
        self.tones.push(tile);
    }
}

/// Score repository holding the serialized history in memory.
///
/// Clones share the same slot, so a test can keep a handle while the store
/// owns another and "reload" by building a new store from it.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with raw persisted text, as if written by an earlier session
    pub fn with_raw(raw: &str) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(raw.to_string()))),
        }
    }

    /// Current persisted text
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl ScoreRepository for MemoryRepository {
    fn load(&self) -> Result<Vec<u32>> {
        match self.slot.borrow().as_deref() {
            Some(json) => decode_scores(json),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, scores: &[u32]) -> Result<()> {
        let json = encode_scores(scores)?;
        *self.slot.borrow_mut() = Some(json);
        Ok(())
    }
}
