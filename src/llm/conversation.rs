//! The conversation client
//!
//! Owns the single chat session, enforces the `{text, speech}` reply
//! contract and resolves `sendSMS` tool calls through the configured gateway.

use crate::llm::client::GenerativeBackend;
use crate::llm::prompts::{self, ChatSettings, SEND_SMS_TOOL};
use crate::llm::reply::StructuredReply;
use crate::llm::session::ChatSession;
use crate::llm::tools::{SmsGateway, SmsRequest};
use crate::{Result, RokoError};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct ConversationClient {
    backend: Arc<dyn GenerativeBackend>,
    gateway: Arc<dyn SmsGateway>,
    model: String,
    settings: ChatSettings,
    session: Mutex<Option<ChatSession>>,
}

impl ConversationClient {
    pub fn new(
        backend: Arc<dyn GenerativeBackend>,
        gateway: Arc<dyn SmsGateway>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            gateway,
            model: model.into(),
            settings: prompts::chat_settings(),
            session: Mutex::new(None),
        }
    }

    /// Send one user prompt and return the validated reply.
    ///
    /// Fails with [`RokoError::Busy`] while another turn is in flight. Any
    /// other failure discards the session so the next turn starts fresh.
    pub async fn send_turn(&self, prompt: &str) -> Result<StructuredReply> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(RokoError::EmptyPrompt);
        }

        let mut guard = self.session.try_lock().map_err(|_| RokoError::Busy)?;
        let session = guard.get_or_insert_with(|| {
            info!("Creating conversation session");
            ChatSession::new(self.model.clone(), self.settings.clone())
        });

        match self.exchange(session, prompt).await {
            Ok(reply) => Ok(reply),
            Err(e) => {
                warn!("Conversation turn failed, discarding session: {}", e);
                *guard = None;
                Err(e)
            }
        }
    }

    async fn exchange(&self, session: &mut ChatSession, prompt: &str) -> Result<StructuredReply> {
        let response = session.send_message(self.backend.as_ref(), prompt).await?;

        let sms_call = response
            .function_calls()
            .into_iter()
            .find(|call| call.name == SEND_SMS_TOOL);

        let authoritative = match sms_call {
            Some(call) => {
                let request = SmsRequest::from_call(&call)?;
                debug!("Model requested sendSMS to {}", request.recipient);
                self.gateway.send(&request).await?;

                let notice = prompts::sms_confirmation_notice(&request.recipient);
                session.send_message(self.backend.as_ref(), &notice).await?
            }
            None => response,
        };

        let raw = authoritative
            .text()
            .ok_or_else(|| RokoError::MalformedReply("Model turn carried no text".into()))?;
        StructuredReply::parse(&raw)
    }

    /// Drop the current session. Returns false while a turn is in flight.
    pub fn reset(&self) -> bool {
        match self.session.try_lock() {
            Ok(mut guard) => {
                if guard.take().is_some() {
                    info!("Conversation session reset");
                }
                true
            }
            Err(_) => false,
        }
    }

    /// Id of the live session, if any
    pub fn session_id(&self) -> Option<Uuid> {
        self.session
            .try_lock()
            .ok()
            .and_then(|guard| guard.as_ref().map(ChatSession::id))
    }

    /// Number of contents recorded in the live session
    pub fn history_len(&self) -> usize {
        self.session
            .try_lock()
            .ok()
            .and_then(|guard| guard.as_ref().map(|s| s.history().len()))
            .unwrap_or(0)
    }
}
