//! Orchestrator for the command pipeline
//!
//! A worker thread owns a single-threaded tokio runtime and runs one command
//! at a time. The UI talks to it through [`OrchestratorHandle`].

use crate::integration::pipeline::{CommandOutcome, CommandPipeline};
use crate::speech::Voice;
use crate::{Result, RokoError};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio::sync::Notify;
use tracing::{debug, error, info, warn};

/// Commands that can be sent to the orchestrator
#[derive(Debug, Clone)]
pub enum OrchestratorCommand {
    /// Run one user command
    Submit { text: String, voice: Voice },

    /// Discard the conversation session
    ResetSession,

    /// Shutdown the orchestrator
    Shutdown,
}

/// Events emitted by the orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorEvent {
    /// A submitted command is being processed
    CommandStarted,

    /// The command finished
    CommandFinished(CommandOutcome),

    /// Result of a session reset request
    SessionReset(bool),

    /// Orchestrator has shut down
    Shutdown,
}

/// Handle for controlling the orchestrator from the UI
#[derive(Clone)]
pub struct OrchestratorHandle {
    command_tx: Sender<OrchestratorCommand>,
    event_rx: Receiver<OrchestratorEvent>,

    /// Set from submit until the command's outcome is published
    busy: Arc<AtomicBool>,

    /// Interrupts a command that is still waiting on the uplink
    stop: Arc<Notify>,
}

impl OrchestratorHandle {
    /// Queue a command for execution.
    ///
    /// Rejects empty prompts and refuses while another command is in flight.
    pub fn submit(&self, text: &str, voice: Voice) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RokoError::EmptyPrompt);
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(RokoError::Busy);
        }

        let command = OrchestratorCommand::Submit {
            text: text.to_string(),
            voice,
        };
        self.send_command(command).inspect_err(|_| {
            self.busy.store(false, Ordering::SeqCst);
        })
    }

    pub fn reset_session(&self) -> Result<()> {
        self.send_command(OrchestratorCommand::ResetSession)
    }

    /// Stop the worker, abandoning any command still in flight
    pub fn shutdown(&self) -> Result<()> {
        self.stop.notify_one();
        self.send_command(OrchestratorCommand::Shutdown)
    }

    fn send_command(&self, cmd: OrchestratorCommand) -> Result<()> {
        self.command_tx
            .send(cmd)
            .map_err(|e| RokoError::ChannelError(format!("Failed to send command: {}", e)))
    }

    /// Try to receive an event from the orchestrator
    pub fn try_recv_event(&self) -> Option<OrchestratorEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Block until an event arrives or `timeout` elapses
    pub fn wait_event(&self, timeout: Duration) -> Option<OrchestratorEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Whether a command is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }
}

/// Owns the pipeline and executes commands on a worker thread
pub struct Orchestrator {
    pipeline: CommandPipeline,
    command_rx: Receiver<OrchestratorCommand>,
    event_tx: Sender<OrchestratorEvent>,
    busy: Arc<AtomicBool>,
    stop: Arc<Notify>,
}

impl Orchestrator {
    pub fn new(pipeline: CommandPipeline) -> (Self, OrchestratorHandle) {
        let (command_tx, command_rx) = bounded(100);
        let (event_tx, event_rx) = bounded(100);
        let busy = Arc::new(AtomicBool::new(false));
        let stop = Arc::new(Notify::new());

        let handle = OrchestratorHandle {
            command_tx,
            event_rx,
            busy: Arc::clone(&busy),
            stop: Arc::clone(&stop),
        };

        let orchestrator = Self {
            pipeline,
            command_rx,
            event_tx,
            busy,
            stop,
        };

        (orchestrator, handle)
    }

    /// Start the worker thread
    ///
    /// This consumes the orchestrator and returns the worker's join handle.
    pub fn start(self) -> Result<JoinHandle<()>> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| RokoError::IOError(format!("Failed to build runtime: {}", e)))?;

        thread::Builder::new()
            .name("roko-orchestrator".into())
            .spawn(move || {
                info!("Orchestrator started");
                runtime.block_on(self.run());
                info!("Orchestrator stopped");
            })
            .map_err(RokoError::from)
    }

    async fn run(self) {
        loop {
            let command = match self.command_rx.recv_timeout(Duration::from_millis(50)) {
                Ok(command) => command,
                Err(RecvTimeoutError::Timeout) => {
                    // Let timers and I/O registered on the runtime make progress
                    tokio::task::yield_now().await;
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("Command channel disconnected");
                    break;
                }
            };

            match command {
                OrchestratorCommand::Submit { text, voice } => {
                    self.emit(OrchestratorEvent::CommandStarted);
                    let outcome = tokio::select! {
                        outcome = self.pipeline.run_command(&text, voice) => outcome,
                        _ = self.stop.notified() => {
                            warn!("Shutdown requested while a command was in flight");
                            self.emit(OrchestratorEvent::Shutdown);
                            break;
                        }
                    };
                    debug!("Command finished: {:?}", outcome);

                    self.busy.store(false, Ordering::SeqCst);
                    self.emit(OrchestratorEvent::CommandFinished(outcome));
                }
                OrchestratorCommand::ResetSession => {
                    let reset = self.pipeline.reset_session();
                    self.emit(OrchestratorEvent::SessionReset(reset));
                }
                OrchestratorCommand::Shutdown => {
                    info!("Orchestrator shutdown requested");
                    self.emit(OrchestratorEvent::Shutdown);
                    break;
                }
            }
        }
    }

    fn emit(&self, event: OrchestratorEvent) {
        if let Err(e) = self.event_tx.send(event) {
            error!("Failed to publish orchestrator event: {}", e);
        }
    }
}
