//! One user command, end to end: conversation turn, synthesis, playback

use crate::audio::SpeechPlayer;
use crate::integration::config::RokoConfig;
use crate::llm::{ConversationClient, GeminiClient, GenerativeBackend, SimulatedSmsGateway};
use crate::messages::{LogKind, TranscriptLog};
use crate::speech::{SpeechSynthesizer, Voice};
use crate::{Result, RokoError, UPLINK_ERROR_MESSAGE};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};

/// How a command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Nothing to send
    Ignored,

    /// The turn failed and the uplink error was logged
    Failed,

    /// The reply was logged; `spoken` reports whether playback started
    Answered { spoken: bool },
}

pub struct CommandPipeline {
    conversation: ConversationClient,
    synthesizer: SpeechSynthesizer,
    player: Arc<Mutex<SpeechPlayer>>,
    transcript: TranscriptLog,
}

impl CommandPipeline {
    pub fn new(
        conversation: ConversationClient,
        synthesizer: SpeechSynthesizer,
        player: Arc<Mutex<SpeechPlayer>>,
        transcript: TranscriptLog,
    ) -> Self {
        Self {
            conversation,
            synthesizer,
            player,
            transcript,
        }
    }

    /// Wire the pipeline against the live API and the default output device
    pub fn from_config(config: &RokoConfig, transcript: TranscriptLog) -> Result<Self> {
        let backend: Arc<dyn GenerativeBackend> = Arc::new(GeminiClient::new(config.gemini.clone())?);

        let conversation = ConversationClient::new(
            Arc::clone(&backend),
            Arc::new(SimulatedSmsGateway::new()),
            config.gemini.chat_model.clone(),
        );
        let synthesizer = SpeechSynthesizer::new(backend, config.gemini.tts_model.clone());

        let player = if config.enable_audio_output {
            SpeechPlayer::with_default_output()
        } else {
            info!("Audio output disabled, replies will be text only");
            SpeechPlayer::disabled()
        };

        Ok(Self::new(
            conversation,
            synthesizer,
            Arc::new(Mutex::new(player)),
            transcript,
        ))
    }

    pub fn transcript(&self) -> &TranscriptLog {
        &self.transcript
    }

    pub fn player(&self) -> Arc<Mutex<SpeechPlayer>> {
        Arc::clone(&self.player)
    }

    /// Run one command to completion
    pub async fn run_command(&self, text: &str, voice: Voice) -> CommandOutcome {
        let command = text.trim();
        if command.is_empty() {
            return CommandOutcome::Ignored;
        }

        self.transcript.push(LogKind::User, command);

        let reply = match self.conversation.send_turn(command).await {
            Ok(reply) => reply,
            Err(RokoError::Busy) => {
                self.transcript.push(LogKind::Error, RokoError::Busy.user_message());
                return CommandOutcome::Failed;
            }
            Err(_) => {
                self.transcript.push(LogKind::Error, UPLINK_ERROR_MESSAGE);
                return CommandOutcome::Failed;
            }
        };

        self.transcript.push(LogKind::Ai, reply.text.as_str());

        let Some(payload) = self.synthesizer.synthesize(&reply.speech, voice).await else {
            debug!("No speech for this reply");
            return CommandOutcome::Answered { spoken: false };
        };

        let spoken = self.player.lock().play(&payload);
        CommandOutcome::Answered { spoken }
    }

    /// Discard the conversation session
    pub fn reset_session(&self) -> bool {
        self.conversation.reset()
    }
}
