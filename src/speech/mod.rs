//! Speech synthesis through the remote TTS model

pub mod tts;

pub use tts::{sanitize_for_speech, SpeechSynthesizer, Voice};
