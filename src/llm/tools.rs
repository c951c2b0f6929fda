//! The `sendSMS` tool boundary
//!
//! The assistant has no messaging capability of its own. Tool calls from the
//! model are decoded into [`SmsRequest`]s and handed to an [`SmsGateway`];
//! the shipped gateway only records the request.

use crate::llm::proto::FunctionCall;
use crate::{Result, RokoError};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Arguments of a `sendSMS` call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SmsRequest {
    pub recipient: String,
    pub message: String,
}

impl SmsRequest {
    pub fn from_call(call: &FunctionCall) -> Result<Self> {
        let request: SmsRequest = serde_json::from_value(call.args.clone()).map_err(|e| {
            RokoError::MalformedReply(format!("Invalid {} arguments: {}", call.name, e))
        })?;

        if request.recipient.trim().is_empty() {
            return Err(RokoError::MalformedReply(
                "sendSMS call has no recipient".into(),
            ));
        }
        Ok(request)
    }
}

#[async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send(&self, request: &SmsRequest) -> Result<()>;
}

/// Gateway that reports every message as delivered without sending it
#[derive(Debug, Clone, Default)]
pub struct SimulatedSmsGateway {
    sent: Arc<Mutex<Vec<SmsRequest>>>,
}

impl SimulatedSmsGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests acknowledged so far
    pub fn sent(&self) -> Vec<SmsRequest> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl SmsGateway for SimulatedSmsGateway {
    async fn send(&self, request: &SmsRequest) -> Result<()> {
        info!(
            "Simulated SMS to {} ({} chars), no message leaves this machine",
            request.recipient,
            request.message.chars().count()
        );
        self.sent.lock().push(request.clone());
        Ok(())
    }
}
