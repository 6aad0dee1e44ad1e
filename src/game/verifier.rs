//! Player input verification
//!
//! Compares clicks against the expected sequence one at a time. The verifier
//! only accepts clicks while armed, so clicks during playback or after the
//! attempt is decided are dropped.

use super::sequence::Sequence;

/// Verifier state for one attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerifierState {
    /// Sequence loaded (or nothing loaded), not accepting clicks
    #[default]
    Idle,
    /// Accepting clicks
    AwaitingClick,
    /// A click did not match; terminal for this attempt
    Failed,
    /// Every tile matched; terminal for this attempt
    LevelComplete,
}

/// Result of a single click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Not accepting clicks; nothing recorded
    Ignored,
    /// Matched, more tiles to go
    Correct,
    /// Did not match the expected tile
    Failed,
    /// Matched the final tile
    LevelComplete,
}

/// Tracks the player's clicks against the expected sequence
#[derive(Debug, Clone, Default)]
pub struct InputVerifier {
    expected: Sequence,
    input: Vec<usize>,
    state: VerifierState,
}

impl InputVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new attempt at `sequence`; clicks are ignored until [`arm`](Self::arm)
    pub fn load(&mut self, sequence: Sequence) {
        self.expected = sequence;
        self.input.clear();
        self.state = VerifierState::Idle;
    }

    /// Begin accepting clicks
    pub fn arm(&mut self) {
        if self.state == VerifierState::Idle {
            self.state = VerifierState::AwaitingClick;
        }
    }

    /// Record a click and compare it with the expected tile at the same position
    pub fn click(&mut self, tile: usize) -> ClickOutcome {
        if self.state != VerifierState::AwaitingClick {
            return ClickOutcome::Ignored;
        }

        let position = self.input.len();
        self.input.push(tile);

        if self.expected.get(position) != Some(&tile) {
            self.state = VerifierState::Failed;
            ClickOutcome::Failed
        } else if self.input.len() == self.expected.len() {
            self.state = VerifierState::LevelComplete;
            ClickOutcome::LevelComplete
        } else {
            ClickOutcome::Correct
        }
    }

    pub fn state(&self) -> VerifierState {
        self.state
    }

    /// Clicks recorded so far this attempt
    pub fn input(&self) -> &[usize] {
        &self.input
    }

    pub fn expected(&self) -> &[usize] {
        &self.expected
    }

    /// Tiles still to be clicked
    pub fn remaining(&self) -> usize {
        self.expected.len() - self.input.len()
    }
}
