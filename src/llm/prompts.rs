//! Persona, reply schema and tool declarations for the ROKO session

use crate::llm::proto::{Content, FunctionDeclaration, GenerationConfig, Tool};
use serde_json::{json, Value};

/// Name of the only declared tool
pub const SEND_SMS_TOOL: &str = "sendSMS";

/// Persona and output protocol for the conversation model
pub const SYSTEM_INSTRUCTION: &str = r#"You are ROKO, a highly advanced personal AI assistant created by Rohit Koli.
Address the user as 'Sir' with extreme respect and professionalism.

CORE OUTPUT PROTOCOL:
You must always return a JSON object with two fields:
1. "text": A sophisticated, professional English response for display on the HUD console. Use clean formatting.
2. "speech": A natural, conversational Hindi translation of the response for the voice synthesis module.

PERSONA:
- High-tech JARVIS-style butler.
- Intelligent, efficient, and loyal.
- Text must be formal and technical where appropriate.
- Speech must be warm and clear Hindi.

If Sir asks to "Send SMS", use the 'sendSMS' tool. Confirm the action in the JSON response once completed."#;

/// Everything a chat session is created with
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub system_instruction: Content,
    pub tools: Vec<Tool>,
    pub generation_config: GenerationConfig,
}

impl Default for ChatSettings {
    fn default() -> Self {
        chat_settings()
    }
}

/// JSON schema every reply must satisfy
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "text": {
                "type": "STRING",
                "description": "Sophisticated English text for display"
            },
            "speech": {
                "type": "STRING",
                "description": "Hindi translation for voice output"
            }
        },
        "required": ["text", "speech"]
    })
}

pub fn send_sms_declaration() -> FunctionDeclaration {
    FunctionDeclaration {
        name: SEND_SMS_TOOL.to_string(),
        description: "Sends a text message to a specific contact.".to_string(),
        parameters: json!({
            "type": "OBJECT",
            "properties": {
                "recipient": {
                    "type": "STRING",
                    "description": "Name or phone number of the recipient."
                },
                "message": {
                    "type": "STRING",
                    "description": "The content of the SMS."
                }
            },
            "required": ["recipient", "message"]
        }),
    }
}

pub fn chat_settings() -> ChatSettings {
    ChatSettings {
        system_instruction: Content::text(SYSTEM_INSTRUCTION),
        tools: vec![Tool {
            function_declarations: vec![send_sms_declaration()],
        }],
        generation_config: GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(response_schema()),
            ..Default::default()
        },
    }
}

/// Notice sent back to the model after a confirmed SMS
pub fn sms_confirmation_notice(recipient: &str) -> String {
    format!(
        "SYSTEM_INFO: SMS successfully sent to {}. Notify Sir professionally.",
        recipient
    )
}
