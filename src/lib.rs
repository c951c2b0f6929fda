pub mod audio;
pub mod integration;
pub mod llm;
pub mod messages;
pub mod speech;
pub mod ui;

use thiserror::Error;

/// The single failure message shown to the user when a turn fails.
pub const UPLINK_ERROR_MESSAGE: &str =
    "Uplink error. Sir, I am attempting to stabilize the connection.";

#[derive(Error, Debug, Clone)]
pub enum RokoError {
    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    #[error("Audio decode error: {0}")]
    AudioDecodeError(String),

    #[error("Uplink error: {0}")]
    UplinkError(String),

    #[error("Malformed reply: {0}")]
    MalformedReply(String),

    #[error("Speech synthesis error: {0}")]
    SynthesisError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("A command is already in flight")]
    Busy,

    #[error("Prompt is empty")]
    EmptyPrompt,
}

impl From<std::io::Error> for RokoError {
    fn from(e: std::io::Error) -> Self {
        RokoError::IOError(e.to_string())
    }
}

impl From<reqwest::Error> for RokoError {
    fn from(e: reqwest::Error) -> Self {
        RokoError::UplinkError(e.to_string())
    }
}

impl RokoError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Hardware/device errors may require user intervention
            RokoError::AudioDeviceError(_) => false,
            RokoError::AudioDecodeError(_) => true,
            // A fresh session is opened on the next turn
            RokoError::UplinkError(_) => true,
            RokoError::MalformedReply(_) => true,
            RokoError::SynthesisError(_) => true,
            RokoError::ConfigError(_) => false,
            RokoError::ChannelError(_) => false,
            RokoError::IOError(_) => false,
            RokoError::Busy => true,
            RokoError::EmptyPrompt => true,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            RokoError::AudioDeviceError(_) => {
                "Audio device error. Please check your speakers.".to_string()
            }
            RokoError::AudioDecodeError(_) => "Voice playback failed.".to_string(),
            RokoError::UplinkError(_) | RokoError::MalformedReply(_) => {
                UPLINK_ERROR_MESSAGE.to_string()
            }
            RokoError::SynthesisError(_) => {
                "Voice synthesis failed. Response will be shown as text.".to_string()
            }
            RokoError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            RokoError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
            RokoError::IOError(_) => "File system error occurred.".to_string(),
            RokoError::Busy => "Sir, I am still processing the previous command.".to_string(),
            RokoError::EmptyPrompt => "Awaiting a command, Sir.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RokoError>;
