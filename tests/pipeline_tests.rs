//! End-to-end command pipeline tests against a scripted model backend
//! and a recording audio output.

use async_trait::async_trait;
use parking_lot::Mutex;
use roko::audio::{AudioBackend, AudioPayload, SpeechPlayer};
use roko::integration::{CommandOutcome, CommandPipeline};
use roko::llm::proto::{GenerateContentRequest, GenerateContentResponse};
use roko::llm::{ConversationClient, GenerativeBackend, SimulatedSmsGateway};
use roko::messages::{AudioData, LogKind, TranscriptLog};
use roko::speech::{SpeechSynthesizer, Voice};
use roko::{Result, RokoError, UPLINK_ERROR_MESSAGE};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Arc;

const CHAT_MODEL: &str = "chat-model";
const TTS_MODEL: &str = "tts-model";

/// Replays canned responses in order and records every request
#[derive(Default)]
struct ScriptedModel {
    replies: Mutex<VecDeque<Result<GenerateContentResponse>>>,
    requests: Mutex<Vec<(String, GenerateContentRequest)>>,
}

impl ScriptedModel {
    fn reply(&self, body: serde_json::Value) -> &Self {
        let response = serde_json::from_value(body).unwrap();
        self.replies.lock().push_back(Ok(response));
        self
    }

    fn chat(&self, text: &str, speech: &str) -> &Self {
        let payload = json!({ "text": text, "speech": speech }).to_string();
        self.reply(json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": payload }] } }]
        }))
    }

    fn audio(&self, base64: &str) -> &Self {
        self.reply(json!({
            "candidates": [{ "content": { "role": "model", "parts": [{
                "inlineData": { "mimeType": "audio/L16;codec=pcm;rate=24000", "data": base64 }
            }] } }]
        }))
    }

    fn fail(&self, message: &str) -> &Self {
        self.replies
            .lock()
            .push_back(Err(RokoError::UplinkError(message.to_string())));
        self
    }

    fn requests_to(&self, model: &str) -> Vec<GenerateContentRequest> {
        self.requests
            .lock()
            .iter()
            .filter(|(m, _)| m == model)
            .map(|(_, r)| r.clone())
            .collect()
    }

    fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl GenerativeBackend for ScriptedModel {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.requests.lock().push((model.to_string(), request.clone()));
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(RokoError::UplinkError("no scripted reply".into())))
    }
}

/// Output context that keeps every started buffer sounding
#[derive(Clone, Default)]
struct RecordingOutput {
    started: Arc<Mutex<Vec<AudioData>>>,
}

impl AudioBackend for RecordingOutput {
    fn is_suspended(&self) -> bool {
        false
    }

    fn resume(&mut self) -> Result<()> {
        Ok(())
    }

    fn start(&mut self, buffer: AudioData) -> Result<()> {
        self.started.lock().push(buffer);
        Ok(())
    }

    fn active_sources(&self) -> usize {
        self.started.lock().len()
    }
}

struct Fixture {
    model: Arc<ScriptedModel>,
    output: RecordingOutput,
    sms: SimulatedSmsGateway,
    transcript: TranscriptLog,
    pipeline: CommandPipeline,
}

fn fixture() -> Fixture {
    let model = Arc::new(ScriptedModel::default());
    let backend: Arc<dyn GenerativeBackend> = model.clone();
    let output = RecordingOutput::default();
    let sms = SimulatedSmsGateway::new();
    let transcript = TranscriptLog::new();

    let factory_output = output.clone();
    let player = SpeechPlayer::new(Box::new(move || -> Result<Box<dyn AudioBackend>> {
        Ok(Box::new(factory_output.clone()) as Box<dyn AudioBackend>)
    }));

    let pipeline = CommandPipeline::new(
        ConversationClient::new(Arc::clone(&backend), Arc::new(sms.clone()), CHAT_MODEL),
        SpeechSynthesizer::new(backend, TTS_MODEL),
        Arc::new(Mutex::new(player)),
        transcript.clone(),
    );

    Fixture {
        model,
        output,
        sms,
        transcript,
        pipeline,
    }
}

fn kinds(transcript: &TranscriptLog) -> Vec<LogKind> {
    transcript.get_all().iter().map(|e| e.kind).collect()
}

#[tokio::test]
async fn test_command_is_answered_and_spoken() {
    let f = fixture();
    // Samples [0, 16384, -32768, 32767]
    f.model
        .chat("Good evening, Sir.", "Shubh sandhya, Sir.")
        .audio("AAAAQACA/38=");

    let outcome = f.pipeline.run_command("  greet me  ", Voice::Charon).await;
    assert_eq!(outcome, CommandOutcome::Answered { spoken: true });

    let entries = f.transcript.get_all();
    assert_eq!(kinds(&f.transcript), vec![LogKind::User, LogKind::Ai]);
    assert_eq!(entries[0].message, "greet me");
    assert_eq!(entries[1].message, "Good evening, Sir.");

    // The speech field, not the display text, goes to synthesis
    let tts = f.model.requests_to(TTS_MODEL);
    assert_eq!(tts.len(), 1);
    let body = serde_json::to_value(&tts[0]).unwrap();
    assert_eq!(body["contents"][0]["parts"][0]["text"], "Shubh sandhya, Sir.");
    assert_eq!(
        body["generationConfig"]["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]["voiceName"],
        "Charon"
    );

    let started = f.output.started.lock();
    assert_eq!(started.len(), 1);
    assert_eq!(started[0].sample_rate, 24_000);
    assert_eq!(started[0].channels, 1);
    assert_eq!(started[0].samples[..3], [0.0, 0.5, -1.0]);
    assert!((started[0].samples[3] - 0.999_969_5).abs() < 1e-6);
}

#[tokio::test]
async fn test_missing_audio_completes_without_playback() {
    let f = fixture();
    f.model
        .chat("Done, Sir.", "Ho gaya, Sir.")
        .reply(json!({ "candidates": [{ "content": { "parts": [] } }] }));

    let outcome = f.pipeline.run_command("do it", Voice::Zephyr).await;

    assert_eq!(outcome, CommandOutcome::Answered { spoken: false });
    assert_eq!(kinds(&f.transcript), vec![LogKind::User, LogKind::Ai]);
    assert!(f.output.started.lock().is_empty());
    assert!(!f.pipeline.player().lock().has_context());
}

#[tokio::test]
async fn test_tts_failure_is_soft() {
    let f = fixture();
    f.model.chat("Done, Sir.", "Ho gaya, Sir.").fail("503 Service Unavailable");

    let outcome = f.pipeline.run_command("do it", Voice::Zephyr).await;

    assert_eq!(outcome, CommandOutcome::Answered { spoken: false });
    assert!(f.output.started.lock().is_empty());
}

#[tokio::test]
async fn test_uplink_failure_logs_generic_message() {
    let f = fixture();
    f.model.fail("connection reset");

    let outcome = f.pipeline.run_command("hello", Voice::Zephyr).await;

    assert_eq!(outcome, CommandOutcome::Failed);
    let last = f.transcript.last().unwrap();
    assert_eq!(last.kind, LogKind::Error);
    assert_eq!(last.message, UPLINK_ERROR_MESSAGE);
    assert_eq!(f.model.requests_to(TTS_MODEL).len(), 0);
}

#[tokio::test]
async fn test_malformed_reply_never_reaches_console() {
    let f = fixture();
    f.model.reply(json!({
        "candidates": [{ "content": { "parts": [{ "text": "{\"text\": \"half a reply\"}" }] } }]
    }));

    let outcome = f.pipeline.run_command("hello", Voice::Zephyr).await;

    assert_eq!(outcome, CommandOutcome::Failed);
    assert_eq!(kinds(&f.transcript), vec![LogKind::User, LogKind::Error]);
    assert!(f
        .transcript
        .get_all()
        .iter()
        .all(|e| !e.message.contains("half a reply")));
}

#[tokio::test]
async fn test_session_restarts_after_failure() {
    let f = fixture();
    f.model
        .chat("one", "ek")
        .reply(json!({ "candidates": [] }))
        .fail("chat down")
        .chat("fresh", "naya")
        .fail("tts down");

    f.pipeline.run_command("first", Voice::Zephyr).await;
    f.pipeline.run_command("second", Voice::Zephyr).await;
    let outcome = f.pipeline.run_command("third", Voice::Zephyr).await;
    assert_eq!(outcome, CommandOutcome::Answered { spoken: false });

    let chats = f.model.requests_to(CHAT_MODEL);
    assert_eq!(chats.len(), 3);
    // second carried the first exchange, third starts over
    assert_eq!(chats[1].contents.len(), 3);
    assert_eq!(chats[2].contents.len(), 1);
}

#[tokio::test]
async fn test_blank_command_is_ignored() {
    let f = fixture();

    let outcome = f.pipeline.run_command(" \t ", Voice::Zephyr).await;

    assert_eq!(outcome, CommandOutcome::Ignored);
    assert_eq!(f.model.request_count(), 0);
    assert!(f.transcript.is_empty());
}

#[tokio::test]
async fn test_sms_command_round_trip() {
    let f = fixture();
    f.model
        .reply(json!({
            "candidates": [{ "content": { "role": "model", "parts": [{
                "functionCall": { "name": "sendSMS", "args": { "recipient": "Mom", "message": "hi" } }
            }] } }]
        }))
        .chat("Your message to Mom has been dispatched, Sir.", "Mom ko sandesh bhej diya.")
        .audio("AAA=");

    let outcome = f
        .pipeline
        .run_command("Send SMS to Mom: hi", Voice::Kore)
        .await;
    assert_eq!(outcome, CommandOutcome::Answered { spoken: true });

    let sent = f.sms.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "Mom");

    let chats = f.model.requests_to(CHAT_MODEL);
    let notice = serde_json::to_value(chats[1].contents.last().unwrap()).unwrap();
    assert_eq!(
        notice["parts"][0]["text"],
        "SYSTEM_INFO: SMS successfully sent to Mom. Notify Sir professionally."
    );

    let ai = f.transcript.last().unwrap();
    assert_eq!(ai.message, "Your message to Mom has been dispatched, Sir.");
}

#[test]
fn test_same_payload_plays_twice_concurrently() {
    let output = RecordingOutput::default();
    let factory_output = output.clone();
    let mut player = SpeechPlayer::new(Box::new(move || -> Result<Box<dyn AudioBackend>> {
        Ok(Box::new(factory_output.clone()) as Box<dyn AudioBackend>)
    }));

    let payload = AudioPayload::from_samples(&[100, -100, 200, -200]);
    assert!(player.play(&payload));
    assert!(player.play(&payload));

    let started = output.started.lock();
    assert_eq!(started.len(), 2);
    assert_eq!(started[0].samples, started[1].samples);
    assert_eq!(player.started_count(), 2);
}
