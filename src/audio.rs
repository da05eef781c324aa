//! Audio cues
//!
//! The core only names cues; a sink turns them into sound. Sinks are
//! fire-and-forget: nothing they do can fail the caller.

use crate::settings::Settings;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Player flapped
    Wing,
    /// Obstacle passed
    Point,
    /// Collision
    Hit,
    /// Game over sting, played shortly after `Hit`
    Die,
}

/// Something that can play cues
pub trait AudioSink {
    /// Play a cue now. Failures are swallowed by the implementation.
    fn play(&mut self, cue: SoundCue);

    /// Play a cue after `delay_ms`. Sinks without scheduling play it now.
    fn play_after(&mut self, cue: SoundCue, delay_ms: u32) {
        let _ = delay_ms;
        self.play(cue);
    }

    /// Pick up volume/mute changes
    fn apply_settings(&mut self, _settings: &Settings) {}
}

/// Silent sink for headless builds and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: SoundCue) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

/// Procedurally generated cues on the Web Audio API - no asset files needed
#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundCue};
    use crate::settings::Settings;

    pub struct WebAudio {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // May fail outside a secure context; the game runs silent then
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, volume: 0.95 }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        fn schedule(&self, cue: SoundCue, delay_secs: f64) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let t = ctx.current_time() + delay_secs;
            match cue {
                SoundCue::Wing => play_wing(ctx, vol, t),
                SoundCue::Point => play_point(ctx, vol, t),
                SoundCue::Hit => play_hit(ctx, vol, t),
                SoundCue::Die => play_die(ctx, vol, t),
            }
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, cue: SoundCue) {
            self.schedule(cue, 0.0);
        }

        fn play_after(&mut self, cue: SoundCue, delay_ms: u32) {
            self.schedule(cue, delay_ms as f64 / 1000.0);
        }

        fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }
    }

    /// Create an oscillator routed through a gain node
    fn create_osc(
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

    /// Wing - quick rising chirp
    fn play_wing(ctx: &AudioContext, vol: f32, t: f64) {
        let Some((osc, gain)) = create_osc(ctx, 300.0, OscillatorType::Sine) else {
            return;
        };
        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.08)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(620.0, t + 0.08)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Point - two-note ding
    fn play_point(ctx: &AudioContext, vol: f32, t: f64) {
        for (i, freq) in [880.0, 1320.0].into_iter().enumerate() {
            let Some((osc, gain)) = create_osc(ctx, freq, OscillatorType::Square) else {
                return;
            };
            let start = t + i as f64 * 0.07;
            gain.gain().set_value_at_time(vol * 0.2, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.12)
                .ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.14).ok();
        }
    }

    /// Hit - low thump
    fn play_hit(ctx: &AudioContext, vol: f32, t: f64) {
        let Some((osc, gain)) = create_osc(ctx, 140.0, OscillatorType::Square) else {
            return;
        };
        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(140.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(40.0, t + 0.12)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Die - long falling tone
    fn play_die(ctx: &AudioContext, vol: f32, t: f64) {
        let Some((osc, gain)) = create_osc(ctx, 420.0, OscillatorType::Sawtooth) else {
            return;
        };
        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.45)
            .ok();
        osc.frequency().set_value_at_time(420.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(70.0, t + 0.45)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + 0.5).ok();
    }
}
