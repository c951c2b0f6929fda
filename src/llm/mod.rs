//! Remote language model access
//!
//! Wire types and HTTP transport for the `generateContent` endpoint, plus the
//! conversation layer that keeps one chat session alive and validates replies.

pub mod client;
pub mod config;
pub mod conversation;
pub mod prompts;
pub mod proto;
pub mod reply;
pub mod session;
pub mod tools;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{GeminiClient, GenerativeBackend};
pub use config::GeminiConfig;
pub use conversation::ConversationClient;
pub use reply::StructuredReply;
pub use session::ChatSession;
pub use tools::{SimulatedSmsGateway, SmsGateway, SmsRequest};
