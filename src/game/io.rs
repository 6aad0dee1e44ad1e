//! Collaborator interfaces for the controller
//!
//! The browser implements these over the DOM and Web Audio; tests and the
//! native demo use the recorders in [`super::headless`].

/// Visual output: grid, highlights and the text controls around it
pub trait Renderer {
    /// Replace the grid with `grid_size * grid_size` fresh tiles
    fn build_grid(&mut self, grid_size: u32);
    /// Add or remove the highlight on a tile
    fn set_highlight(&mut self, tile: usize, on: bool);
    /// Stage / level-in-stage readout
    fn show_level(&mut self, stage: u32, level_in_stage: u32);
    /// Status line
    fn show_message(&mut self, message: &str);
    fn set_start_enabled(&mut self, enabled: bool);
    fn set_start_label(&mut self, label: &str);
    fn set_next_level_visible(&mut self, visible: bool);
    /// Ranked score list, best first
    fn show_scores(&mut self, labels: &[String]);
}

/// Tone output. Implementations stay silent when no backend is available.
pub trait AudioOutput {
    fn play_tone(&mut self, tile: usize);
}
