//! Client-side state of one multi-turn conversation

use crate::llm::client::GenerativeBackend;
use crate::llm::prompts::ChatSettings;
use crate::llm::proto::{Content, GenerateContentRequest, GenerateContentResponse, ROLE_MODEL};
use crate::{Result, RokoError};
use tracing::debug;
use uuid::Uuid;

/// One conversation with the remote model.
///
/// History only grows on successful exchanges. A session that saw a failure
/// is discarded by its owner rather than repaired.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: Uuid,
    model: String,
    settings: ChatSettings,
    history: Vec<Content>,
}

impl ChatSession {
    pub fn new(model: impl Into<String>, settings: ChatSettings) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            model: model.into(),
            settings,
            history: Vec::new(),
        };
        debug!("Opened chat session {} on {}", session.id, session.model);
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn history(&self) -> &[Content] {
        &self.history
    }

    /// Request for the next turn, history plus `message`
    pub fn build_request(&self, message: &str) -> GenerateContentRequest {
        let mut contents = self.history.clone();
        contents.push(Content::user_text(message));

        GenerateContentRequest {
            contents,
            system_instruction: Some(self.settings.system_instruction.clone()),
            tools: self.settings.tools.clone(),
            generation_config: Some(self.settings.generation_config.clone()),
        }
    }

    /// Send one user message and record the model's answer
    pub async fn send_message(
        &mut self,
        backend: &dyn GenerativeBackend,
        message: &str,
    ) -> Result<GenerateContentResponse> {
        let request = self.build_request(message);
        let response = backend.generate_content(&self.model, &request).await?;

        let mut reply = response
            .first_content()
            .cloned()
            .ok_or_else(|| RokoError::MalformedReply("Response carried no candidates".into()))?;
        reply.role = Some(ROLE_MODEL.to_string());

        self.history = request.contents;
        self.history.push(reply);
        Ok(response)
    }
}
