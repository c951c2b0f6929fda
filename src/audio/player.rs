//! Speech playback
//!
//! Decodes synthesized speech payloads and starts them on a lazily acquired
//! output context. Playback is best effort: failures are logged and never
//! reach the caller's turn.

use crate::audio::pcm::{self, AudioPayload, PCM_SAMPLE_RATE};
use crate::messages::AudioData;
use crate::{Result, RokoError};
use tracing::{debug, info, warn};

/// Host audio output context
pub trait AudioBackend: Send {
    /// Whether the host has suspended output (device loss, focus policy)
    fn is_suspended(&self) -> bool;

    /// Resume a suspended context
    fn resume(&mut self) -> Result<()>;

    /// Start a buffer immediately. Returns without waiting for it to finish.
    fn start(&mut self, buffer: AudioData) -> Result<()>;

    /// Number of buffers still sounding
    fn active_sources(&self) -> usize;
}

/// Opens the output context on first use
pub type OutputFactory = Box<dyn Fn() -> Result<Box<dyn AudioBackend>> + Send>;

/// Playback state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Decoding,
    Playing,
}

pub struct SpeechPlayer {
    factory: OutputFactory,
    context: Option<Box<dyn AudioBackend>>,
    state: PlaybackState,
    started: u64,
}

impl SpeechPlayer {
    pub fn new(factory: OutputFactory) -> Self {
        Self {
            factory,
            context: None,
            state: PlaybackState::Idle,
            started: 0,
        }
    }

    /// Player backed by the default output device
    #[cfg(feature = "audio-io")]
    pub fn with_default_output() -> Self {
        Self::new(Box::new(|| -> Result<Box<dyn AudioBackend>> {
            let output = crate::audio::output::CpalOutput::open(PCM_SAMPLE_RATE)?;
            Ok(Box::new(output) as Box<dyn AudioBackend>)
        }))
    }

    #[cfg(not(feature = "audio-io"))]
    pub fn with_default_output() -> Self {
        Self::disabled()
    }

    /// Player that never produces sound
    pub fn disabled() -> Self {
        Self::new(Box::new(|| -> Result<Box<dyn AudioBackend>> {
            Err(RokoError::AudioDeviceError("Audio output is disabled".into()))
        }))
    }

    /// Decode and start a payload. Returns whether a buffer was started.
    pub fn play(&mut self, payload: &AudioPayload) -> bool {
        match self.try_play(payload) {
            Ok(duration_secs) => {
                self.started += 1;
                info!("Started speech playback ({:.2}s)", duration_secs);
                true
            }
            Err(e) => {
                warn!("Audio playback failed: {}", e);
                self.state = PlaybackState::Idle;
                false
            }
        }
    }

    fn try_play(&mut self, payload: &AudioPayload) -> Result<f32> {
        let context = self.context()?;
        if context.is_suspended() {
            debug!("Resuming suspended audio context");
            context.resume()?;
        }

        self.state = PlaybackState::Decoding;
        let buffer = pcm::decode_payload(payload)?;
        let duration_secs = buffer.duration_seconds();
        debug!(
            "Decoded {} samples at {} Hz",
            buffer.samples.len(),
            buffer.sample_rate
        );

        self.context()?.start(buffer)?;
        self.state = PlaybackState::Playing;
        Ok(duration_secs)
    }

    fn context(&mut self) -> Result<&mut Box<dyn AudioBackend>> {
        if self.context.is_none() {
            let context = (self.factory)()?;
            info!("Audio output context acquired");
            self.context = Some(context);
        }

        self.context
            .as_mut()
            .ok_or_else(|| RokoError::AudioDeviceError("Audio context unavailable".into()))
    }

    /// Current playback state
    pub fn state(&self) -> PlaybackState {
        match (self.state, &self.context) {
            (PlaybackState::Playing, Some(ctx)) if ctx.active_sources() == 0 => PlaybackState::Idle,
            (state, _) => state,
        }
    }

    /// Whether the output context has been acquired
    pub fn has_context(&self) -> bool {
        self.context.is_some()
    }

    /// Number of buffers started since creation
    pub fn started_count(&self) -> u64 {
        self.started
    }
}
