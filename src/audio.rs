//! Score feedback audio
//!
//! Procedurally generated chime - no external files needed! Playback is
//! fire-and-forget: when no audio device is available the game simply
//! continues in silence.

/// Audio collaborator the round controller calls once per tree passed
pub trait ScoreFeedback {
    fn play_score_chime(&mut self);
}

impl<A: ScoreFeedback + ?Sized> ScoreFeedback for Box<A> {
    fn play_score_chime(&mut self) {
        (**self).play_score_chime();
    }
}

/// Chime pitch (A5)
pub const CHIME_FREQUENCY: f32 = 880.0;
/// Chime length in seconds
pub const CHIME_DURATION: f32 = 0.15;
/// Peak sample amplitude (a soft chime, well below full scale)
pub const CHIME_AMPLITUDE: f32 = 3000.0;
/// Default PCM sample rate
pub const SAMPLE_RATE: u32 = 44_100;

/// Render the score chime as mono 16-bit PCM: a sine with a linear fade-out
pub fn chime_samples(sample_rate: u32) -> Vec<i16> {
    let len = (sample_rate as f32 * CHIME_DURATION) as usize;
    let period = sample_rate as f32 / CHIME_FREQUENCY;
    (0..len)
        .map(|i| {
            let angle = i as f32 / period * std::f32::consts::TAU;
            let fade = 1.0 - i as f32 / len as f32;
            (angle.sin() * CHIME_AMPLITUDE * fade) as i16
        })
        .collect()
}

/// Chime peak as a gain factor in `[0, 1]`
pub fn chime_peak_gain() -> f32 {
    CHIME_AMPLITUDE / i16::MAX as f32
}

/// No-op feedback for headless runs and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl ScoreFeedback for Silent {
    fn play_score_chime(&mut self) {}
}

/// Gates another feedback sink behind the sound-enabled setting
#[derive(Debug, Clone)]
pub struct Muteable<A> {
    inner: A,
    enabled: bool,
}

impl<A: ScoreFeedback> Muteable<A> {
    pub fn new(inner: A, enabled: bool) -> Self {
        Self { inner, enabled }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }
}

impl<A: ScoreFeedback> ScoreFeedback for Muteable<A> {
    fn play_score_chime(&mut self) {
        if self.enabled {
            self.inner.play_score_chime();
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{CHIME_DURATION, CHIME_FREQUENCY, ScoreFeedback, chime_peak_gain};

    /// Web Audio playback
    pub struct AudioManager {
        ctx: Option<AudioContext>,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Create an oscillator with gain envelope
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

    impl ScoreFeedback for AudioManager {
        /// Soft sine chime with a linear fade
        fn play_score_chime(&mut self) {
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let Some((osc, gain)) = self.create_osc(ctx, CHIME_FREQUENCY, OscillatorType::Sine)
            else {
                return;
            };
            let t = ctx.current_time();
            let duration = CHIME_DURATION as f64;
            let peak = chime_peak_gain();

            gain.gain().set_value_at_time(peak, t).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(0.0, t + duration)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + duration).ok();
        }
    }
}

#[cfg(all(not(target_arch = "wasm32"), feature = "native-audio"))]
pub use native::RodioChime;

#[cfg(all(not(target_arch = "wasm32"), feature = "native-audio"))]
mod native {
    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::{SAMPLE_RATE, ScoreFeedback, chime_samples};

    /// Plays the chime on the default output device
    pub struct RodioChime {
        // Dropping the stream stops all playback
        _stream: OutputStream,
        handle: OutputStreamHandle,
        samples: Vec<i16>,
    }

    impl RodioChime {
        /// `None` when no output device can be opened
        pub fn try_new() -> Option<Self> {
            match OutputStream::try_default() {
                Ok((stream, handle)) => Some(Self {
                    _stream: stream,
                    handle,
                    samples: chime_samples(SAMPLE_RATE),
                }),
                Err(e) => {
                    log::warn!("No audio output device ({}) - audio disabled", e);
                    None
                }
            }
        }
    }

    impl ScoreFeedback for RodioChime {
        fn play_score_chime(&mut self) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, self.samples.clone()));
                sink.detach();
            }
        }
    }
}
