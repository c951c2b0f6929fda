pub mod link;
pub mod mixer;
pub mod pcm;
pub mod player;
pub mod resampler;
#[cfg(feature = "audio-io")]
pub mod input;
#[cfg(feature = "audio-io")]
pub mod output;

#[cfg(feature = "audio-io")]
pub use input::MicrophoneLink;
#[cfg(feature = "audio-io")]
pub use output::CpalOutput;
pub use link::{default_input_factory, unavailable_input_factory, InputFactory, InputLink};
pub use pcm::{decode_payload, AudioPayload, PCM_CHANNELS, PCM_SAMPLE_RATE};
pub use player::{AudioBackend, OutputFactory, PlaybackState, SpeechPlayer};
pub use resampler::{resample_audio, AudioResampler};
