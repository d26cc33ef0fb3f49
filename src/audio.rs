//! Celebration chime using the Web Audio API
//!
//! Procedurally generated, no audio files needed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Rising major arpeggio: C5, E5, G5, C6 (Hz)
const ARPEGGIO: [f32; 4] = [523.25, 659.25, 783.99, 1046.5];
/// Gap between note onsets (seconds)
const NOTE_STEP: f64 = 0.09;
/// Note length (seconds)
const NOTE_LENGTH: f64 = 0.35;

/// Short tone played when the prompt is accepted
pub struct Chime {
    ctx: AudioContext,
    volume: f32,
}

impl Chime {
    /// None when no audio context can be created (insecure context, no audio)
    pub fn new(volume: f32) -> Option<Self> {
        if volume <= 0.0 {
            return None;
        }
        match AudioContext::new() {
            Ok(ctx) => Some(Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
            }),
            Err(_) => {
                log::warn!("Failed to create AudioContext - chime disabled");
                None
            }
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let ctx = &self.ctx;
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    pub fn play(&self) {
        // Browsers keep the context suspended until a user gesture
        if self.ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = self.ctx.resume();
        }

        let t0 = self.ctx.current_time();
        for (i, freq) in ARPEGGIO.iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(*freq, OscillatorType::Triangle) else {
                return;
            };
            let t = t0 + i as f64 * NOTE_STEP;

            gain.gain().set_value_at_time(0.0001, t0).ok();
            gain.gain().set_value_at_time(self.volume * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + NOTE_LENGTH)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + NOTE_LENGTH + 0.05).ok();
        }
    }
}
