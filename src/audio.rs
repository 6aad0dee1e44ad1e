//! Tile tones
//!
//! Each tile gets a pitch from a fixed pentatonic-ish palette, played as a
//! short sine blip with a percussive envelope. Procedurally generated through
//! the Web Audio API; no sound files.

/// Tone pitches (Hz): C4 D4 F4 G4 A4 C5 D5 F5 G5 A5
pub const TONE_PALETTE: [f32; 10] = [
    261.63, 293.66, 349.23, 392.00, 440.00, 523.25, 587.33, 698.46, 783.99, 880.00,
];

/// Peak gain at note start (before volume scaling)
pub const TONE_PEAK_GAIN: f32 = 0.5;
/// Gain the exponential decay ends on (must be > 0 for an exponential ramp)
pub const TONE_FLOOR_GAIN: f32 = 0.001;
/// Note length (s)
pub const TONE_DURATION: f64 = 0.5;

/// Pitch for a tile; wraps around the palette on large grids
pub fn tone_frequency(tile: usize) -> f32 {
    TONE_PALETTE[tile % TONE_PALETTE.len()]
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{TONE_DURATION, TONE_FLOOR_GAIN, TONE_PEAK_GAIN, tone_frequency};
    use crate::game::AudioOutput;
    use crate::settings::Settings;

    /// Web Audio tone player
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context; the game then runs silent
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        /// Create an oscillator routed through a gain node
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }
    }

    impl AudioOutput for AudioManager {
        fn play_tone(&mut self, tile: usize) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let freq = tone_frequency(tile);
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(freq, t).ok();
            gain.gain()
                .set_value_at_time(TONE_PEAK_GAIN * self.volume, t)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(TONE_FLOOR_GAIN, t + TONE_DURATION)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + TONE_DURATION).ok();
        }
    }
}
