//! Scripted backend for unit tests

use crate::llm::client::GenerativeBackend;
use crate::llm::proto::{GenerateContentRequest, GenerateContentResponse, InlineData, Part};
use crate::{Result, RokoError};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use std::collections::VecDeque;

#[derive(Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<GenerateContentResponse>>>,
    requests: Mutex<Vec<(String, GenerateContentRequest)>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, reply: Result<GenerateContentResponse>) -> &Self {
        self.replies.lock().push_back(reply);
        self
    }

    pub fn push_json(&self, text: &str, speech: &str) -> &Self {
        self.push(Ok(json_reply(text, speech)))
    }

    pub fn requests(&self) -> Vec<(String, GenerateContentRequest)> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl GenerativeBackend for ScriptedBackend {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.requests
            .lock()
            .push((model.to_string(), request.clone()));
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(RokoError::UplinkError("script exhausted".into())))
    }
}

pub fn json_reply(text: &str, speech: &str) -> GenerateContentResponse {
    let body = json!({ "text": text, "speech": speech }).to_string();
    GenerateContentResponse::from_parts(vec![Part::text(body)])
}

pub fn sms_call(recipient: &str, message: &str) -> GenerateContentResponse {
    GenerateContentResponse::from_parts(vec![Part {
        function_call: Some(crate::llm::proto::FunctionCall {
            name: "sendSMS".into(),
            args: json!({ "recipient": recipient, "message": message }),
        }),
        ..Default::default()
    }])
}

pub fn audio_reply(base64: &str) -> GenerateContentResponse {
    GenerateContentResponse::from_parts(vec![Part {
        inline_data: Some(InlineData {
            mime_type: "audio/L16;codec=pcm;rate=24000".into(),
            data: base64.into(),
        }),
        ..Default::default()
    }])
}
