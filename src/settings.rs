//! Game settings and preferences
//!
//! Persisted separately from the score history in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::game::Timing;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Silence all tones
    pub muted: bool,

    // === Timing ===
    /// Pause before a sequence starts playing (ms)
    pub lead_in_ms: u32,
    /// How long a clicked tile stays lit (ms)
    pub click_feedback_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        let timing = Timing::default();
        Self {
            master_volume: 0.8,
            muted: false,
            lead_in_ms: timing.lead_in_ms,
            click_feedback_ms: timing.click_feedback_ms,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "silla_vibe_settings";

    /// Volume after mute, clamped to 0.0 - 1.0
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0)
        }
    }

    /// Flip mute; returns the new state
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Label for the mute control
    pub fn mute_label(&self) -> &'static str {
        if self.muted { "Unmute" } else { "Mute" }
    }

    /// Playback/feedback delays for the controller
    pub fn timing(&self) -> Timing {
        Timing {
            lead_in_ms: self.lead_in_ms,
            click_feedback_ms: self.click_feedback_ms,
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        match crate::platform::storage::read_json(Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        match crate::platform::storage::write_json(Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {}", e),
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
