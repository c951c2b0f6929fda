//! Application state management
//!
//! Everything the widgets read and mutate lives here. Commands run on the
//! orchestrator; the state only submits them and follows the event stream.

use crate::audio::{unavailable_input_factory, InputFactory, InputLink};
use crate::integration::{OrchestratorEvent, OrchestratorHandle};
use crate::messages::{LogKind, TranscriptLog};
use crate::speech::Voice;
use crate::{RokoError, UPLINK_ERROR_MESSAGE};
use tracing::{debug, info, warn};

pub const SMS_PROTOCOL_NOTICE: &str =
    "Initializing SMS Protocol. Sir, please specify the recipient and the content.";
pub const SMS_TEMPLATE: &str = "Send SMS to [Name]: [Message]";

/// Status of the microphone interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Error,
}

impl ConnectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Disconnected => "DISCONNECTED",
            ConnectionStatus::Connecting => "CONNECTING",
            ConnectionStatus::Connected => "CONNECTED",
            ConnectionStatus::Error => "ERROR",
        }
    }
}

/// Central application state
pub struct AppState {
    /// Console transcript, shared with the command pipeline
    pub transcript: TranscriptLog,

    /// Current text input
    pub input_text: String,

    pub selected_voice: Voice,

    pub status: ConnectionStatus,

    /// Set while a command is in flight
    pub is_thinking: bool,

    handle: Option<OrchestratorHandle>,
    input_factory: InputFactory,
    input_link: Option<Box<dyn InputLink>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// State with no orchestrator and no microphone
    pub fn new() -> Self {
        Self {
            transcript: TranscriptLog::new(),
            input_text: String::new(),
            selected_voice: Voice::default(),
            status: ConnectionStatus::Disconnected,
            is_thinking: false,
            handle: None,
            input_factory: unavailable_input_factory(),
            input_link: None,
        }
    }

    /// Route commands to `handle`; `transcript` must be the pipeline's log
    pub fn with_orchestrator(mut self, handle: OrchestratorHandle, transcript: TranscriptLog) -> Self {
        self.handle = Some(handle);
        self.transcript = transcript;
        self
    }

    pub fn with_input_factory(mut self, factory: InputFactory) -> Self {
        self.input_factory = factory;
        self
    }

    pub fn with_voice(mut self, voice: Voice) -> Self {
        self.selected_voice = voice;
        self
    }

    pub fn is_connected(&self) -> bool {
        self.handle.is_some()
    }

    /// Submit the input line. Returns whether a command was queued.
    pub fn submit_command(&mut self) -> bool {
        let text = self.input_text.trim().to_string();
        if text.is_empty() || self.is_thinking {
            return false;
        }

        let Some(handle) = &self.handle else {
            warn!("Command submitted with no uplink");
            self.transcript.push(LogKind::User, text);
            self.transcript.push(LogKind::Error, UPLINK_ERROR_MESSAGE);
            self.input_text.clear();
            return false;
        };

        match handle.submit(&text, self.selected_voice) {
            Ok(()) => {
                self.input_text.clear();
                self.is_thinking = true;
                true
            }
            Err(RokoError::Busy) => {
                debug!("Command still in flight, keeping input");
                self.is_thinking = true;
                false
            }
            Err(e) => {
                warn!("Failed to submit command: {}", e);
                self.transcript.push(LogKind::Error, e.user_message());
                false
            }
        }
    }

    /// Prefill the SMS command template
    pub fn trigger_sms(&mut self) {
        self.transcript.push(LogKind::Ai, SMS_PROTOCOL_NOTICE);
        self.input_text = SMS_TEMPLATE.to_string();
    }

    pub fn is_interface_active(&self) -> bool {
        self.input_link.is_some()
    }

    /// Open or release the microphone interface
    pub fn toggle_interface(&mut self) {
        if self.input_link.take().is_some() {
            info!("Interface detached");
            self.status = ConnectionStatus::Disconnected;
            return;
        }

        self.status = ConnectionStatus::Connecting;
        match (self.input_factory)() {
            Ok(link) => {
                info!("Interface attached to {}", link.device_name());
                self.input_link = Some(link);
                self.status = ConnectionStatus::Connected;
            }
            Err(e) => {
                warn!("Interface initialization failed: {}", e);
                self.status = ConnectionStatus::Error;
            }
        }
    }

    /// Clear the console and start a fresh conversation
    pub fn clear(&mut self) {
        self.transcript.clear();
        if let Some(handle) = &self.handle {
            if let Err(e) = handle.reset_session() {
                warn!("Failed to request session reset: {}", e);
            }
        }
    }

    /// Process incoming events from the orchestrator
    pub fn poll_events(&mut self) {
        let events: Vec<OrchestratorEvent> = match &self.handle {
            Some(handle) => std::iter::from_fn(|| handle.try_recv_event()).collect(),
            None => return,
        };

        for event in events {
            match event {
                OrchestratorEvent::CommandStarted => self.is_thinking = true,
                OrchestratorEvent::CommandFinished(outcome) => {
                    debug!("Command outcome: {:?}", outcome);
                    self.is_thinking = false;
                }
                OrchestratorEvent::SessionReset(reset) => {
                    if !reset {
                        warn!("Session reset refused while a command was in flight");
                    }
                }
                OrchestratorEvent::Shutdown => {
                    info!("Orchestrator has shut down");
                    self.handle = None;
                    self.is_thinking = false;
                }
            }
        }
    }

    /// Stop the orchestrator
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.shutdown() {
                warn!("Failed to stop orchestrator: {}", e);
            }
        }
        self.input_link = None;
    }
}
