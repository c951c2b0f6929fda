//! Integration layer
//!
//! Wires conversation, synthesis and playback into a command pipeline and
//! runs it off the UI thread.

pub mod config;
pub mod orchestrator;
pub mod pipeline;

pub use config::RokoConfig;
pub use orchestrator::{Orchestrator, OrchestratorCommand, OrchestratorEvent, OrchestratorHandle};
pub use pipeline::{CommandOutcome, CommandPipeline};
