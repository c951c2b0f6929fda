//! Remote text-to-speech
//!
//! One stateless `generateContent` call per utterance against the TTS model.
//! The response carries base64 PCM16 audio which is handed back untouched as
//! an [`AudioPayload`].

use crate::audio::AudioPayload;
use crate::llm::client::GenerativeBackend;
use crate::llm::proto::{Content, GenerateContentRequest, GenerationConfig, SpeechConfig};
use crate::{Result, RokoError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Characters removed before text is sent for synthesis
const MARKUP_CHARS: &[char] = &['*', '#', '_', '~', '`', '[', ']', '(', ')'];

/// Prebuilt voice profiles offered by the TTS model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Voice {
    #[default]
    Zephyr,
    Puck,
    Charon,
    Kore,
    Fenrir,
}

impl Voice {
    /// Name the TTS endpoint expects
    pub fn name(&self) -> &'static str {
        match self {
            Voice::Zephyr => "Zephyr",
            Voice::Puck => "Puck",
            Voice::Charon => "Charon",
            Voice::Kore => "Kore",
            Voice::Fenrir => "Fenrir",
        }
    }

    /// Label shown in the voice picker
    pub fn label(&self) -> &'static str {
        match self {
            Voice::Zephyr => "Zephyr (Standard)",
            Voice::Puck => "Puck (Brisk)",
            Voice::Charon => "Charon (Deep)",
            Voice::Kore => "Kore (Smooth)",
            Voice::Fenrir => "Fenrir (Vocal)",
        }
    }

    pub fn all() -> [Voice; 5] {
        [
            Voice::Zephyr,
            Voice::Puck,
            Voice::Charon,
            Voice::Kore,
            Voice::Fenrir,
        ]
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Voice {
    type Err = RokoError;

    fn from_str(s: &str) -> Result<Self> {
        Voice::all()
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RokoError::ConfigError(format!("Unknown voice profile '{}'", s)))
    }
}

/// Remove markdown markup the voice would otherwise read aloud
pub fn sanitize_for_speech(text: &str) -> String {
    text.chars()
        .filter(|c| !MARKUP_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

pub struct SpeechSynthesizer {
    backend: Arc<dyn GenerativeBackend>,
    model: String,
}

impl SpeechSynthesizer {
    pub fn new(backend: Arc<dyn GenerativeBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    /// Synthesize `text` with `voice`.
    ///
    /// Returns `None` when there is nothing to say, when the response has no
    /// audio, or on any failure. Failures are logged, never propagated.
    pub async fn synthesize(&self, text: &str, voice: Voice) -> Option<AudioPayload> {
        let clean = sanitize_for_speech(text);
        if clean.is_empty() {
            debug!("Nothing to synthesize after sanitizing");
            return None;
        }

        match self.request_audio(&clean, voice).await {
            Ok(Some(payload)) => {
                info!("Synthesized {} chars with voice {}", clean.chars().count(), voice);
                Some(payload)
            }
            Ok(None) => {
                warn!("TTS response carried no audio");
                None
            }
            Err(e) => {
                warn!("Speech synthesis failed: {}", e);
                None
            }
        }
    }

    async fn request_audio(&self, text: &str, voice: Voice) -> Result<Option<AudioPayload>> {
        let request = speech_request(text, voice);
        let response = self
            .backend
            .generate_content(&self.model, &request)
            .await
            .map_err(|e| RokoError::SynthesisError(e.to_string()))?;

        Ok(response
            .inline_data()
            .filter(|data| !data.data.is_empty())
            .map(|data| {
                debug!("Received {} bytes of {} audio", data.data.len(), data.mime_type);
                AudioPayload::new(data.data.clone())
            }))
    }
}

fn speech_request(text: &str, voice: Voice) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::text(text)],
        system_instruction: None,
        tools: Vec::new(),
        generation_config: Some(GenerationConfig {
            response_modalities: Some(vec!["AUDIO".to_string()]),
            speech_config: Some(SpeechConfig::prebuilt(voice.name())),
            ..Default::default()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::fake::{audio_reply, json_reply, ScriptedBackend};
    use serde_json::json;

    fn synthesizer(backend: &Arc<ScriptedBackend>) -> SpeechSynthesizer {
        SpeechSynthesizer::new(
            Arc::clone(backend) as Arc<dyn GenerativeBackend>,
            "tts-model",
        )
    }

    #[test]
    fn test_sanitize_strips_markup() {
        assert_eq!(
            sanitize_for_speech("**Namaste** _Sir_, [link](x) `code` ~#"),
            "Namaste Sir, linkx code"
        );
        assert_eq!(sanitize_for_speech("  ***  "), "");
    }

    #[test]
    fn test_voice_labels_and_parsing() {
        assert_eq!(Voice::default(), Voice::Zephyr);
        assert_eq!(Voice::Charon.label(), "Charon (Deep)");
        assert_eq!("fenrir".parse::<Voice>().unwrap(), Voice::Fenrir);
        assert!("Alloy".parse::<Voice>().is_err());
        assert_eq!(Voice::all().len(), 5);
    }

    #[test]
    fn test_speech_request_shape() {
        let value = serde_json::to_value(speech_request("Namaste", Voice::Kore)).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{"parts": [{"text": "Namaste"}]}],
                "generationConfig": {
                    "responseModalities": ["AUDIO"],
                    "speechConfig": {"voiceConfig": {"prebuiltVoiceConfig": {"voiceName": "Kore"}}}
                }
            })
        );
    }

    #[tokio::test]
    async fn test_synthesize_returns_inline_audio() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.push(Ok(audio_reply("AABAAA==")));

        let payload = synthesizer(&backend).synthesize("*Namaste*", Voice::Puck).await;
        assert_eq!(payload.unwrap().as_str(), "AABAAA==");

        let requests = backend.requests();
        assert_eq!(requests[0].0, "tts-model");
        assert_eq!(requests[0].1.contents[0].joined_text().as_deref(), Some("Namaste"));
    }

    #[tokio::test]
    async fn test_missing_audio_is_none() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.push(Ok(json_reply("a", "b")));

        assert!(synthesizer(&backend).synthesize("hello", Voice::Zephyr).await.is_none());
    }

    #[tokio::test]
    async fn test_failure_is_swallowed() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.push(Err(RokoError::UplinkError("503".into())));

        assert!(synthesizer(&backend).synthesize("hello", Voice::Zephyr).await.is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_is_synthesis_error() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.push(Err(RokoError::UplinkError("connection reset".into())));

        let result = synthesizer(&backend).request_audio("hello", Voice::Zephyr).await;
        match result {
            Err(RokoError::SynthesisError(message)) => assert!(message.contains("connection reset")),
            other => panic!("expected synthesis error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_text_skips_request() {
        let backend = Arc::new(ScriptedBackend::new());

        assert!(synthesizer(&backend).synthesize("__", Voice::Zephyr).await.is_none());
        assert_eq!(backend.request_count(), 0);
    }
}
