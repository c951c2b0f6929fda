use crate::{Result, RokoError};
use serde::{Deserialize, Serialize};

/// A validated conversation turn: display text plus a same-meaning line
/// intended only for speech synthesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredReply {
    pub text: String,
    pub speech: String,
}

#[derive(Deserialize)]
struct RawReply {
    text: Option<String>,
    speech: Option<String>,
}

impl StructuredReply {
    /// Decode and validate the raw JSON text of a model turn
    pub fn parse(raw: &str) -> Result<Self> {
        let raw: RawReply = serde_json::from_str(raw.trim())
            .map_err(|e| RokoError::MalformedReply(format!("Reply is not a JSON object: {}", e)))?;

        let text = required_field(raw.text, "text")?;
        let speech = required_field(raw.speech, "speech")?;
        Ok(Self { text, speech })
    }
}

fn required_field(value: Option<String>, name: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(RokoError::MalformedReply(format!("Field '{}' is empty", name))),
        None => Err(RokoError::MalformedReply(format!("Field '{}' is missing", name))),
    }
}
