//! UI automation tests using egui_kittest and AccessKit
//!
//! The real console, input bar, control panel and status bar are rendered
//! against an `AppState`, and the accessibility tree is queried for the
//! expected elements.

use async_trait::async_trait;
use egui_kittest::kittest::Queryable;
use egui_kittest::Harness;
use parking_lot::Mutex;
use roko::audio::SpeechPlayer;
use roko::integration::{CommandPipeline, Orchestrator};
use roko::llm::proto::{GenerateContentRequest, GenerateContentResponse, Part};
use roko::llm::{ConversationClient, GenerativeBackend, SimulatedSmsGateway};
use roko::messages::{LogKind, TranscriptLog};
use roko::speech::{SpeechSynthesizer, Voice};
use roko::ui::components::{Console, ControlPanel, InputBar, StatusBar};
use roko::ui::{AppState, ConnectionStatus, Theme, SMS_PROTOCOL_NOTICE, SMS_TEMPLATE};
use roko::{Result, RokoError, UPLINK_ERROR_MESSAGE};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

struct TestApp {
    state: AppState,
    theme: Theme,
}

impl TestApp {
    fn new() -> Self {
        Self::with_state(AppState::new())
    }

    fn with_state(state: AppState) -> Self {
        Self {
            state,
            theme: Theme::hud(),
        }
    }

    fn with_entry(self, kind: LogKind, text: &str) -> Self {
        self.state.transcript.push(kind, text);
        self
    }
}

fn render(ctx: &egui::Context, app: &mut TestApp) {
    app.state.poll_events();

    egui::CentralPanel::default().show(ctx, |ui| {
        StatusBar::new(&app.state, &app.theme).show(ui);
        ControlPanel::new(&mut app.state, &app.theme).show_protocols(ui);

        ui.allocate_ui(egui::Vec2::new(ui.available_width(), 300.0), |ui| {
            Console::new(&app.state, &app.theme).show(ui);
        });

        InputBar::new(&mut app.state, &app.theme).show(ui);
        ControlPanel::new(&mut app.state, &app.theme).show_interface_toggle(ui);
    });
}

fn harness(app: TestApp) -> Harness<'static, TestApp> {
    Harness::builder()
        .with_size(egui::Vec2::new(480.0, 640.0))
        .build_state(render, app)
}

/// Answers one chat turn, then fails every later request
struct CannedModel {
    replies: Mutex<VecDeque<GenerateContentResponse>>,
}

impl CannedModel {
    fn answering(text: &str, speech: &str) -> Arc<Self> {
        let body = serde_json::json!({ "text": text, "speech": speech }).to_string();
        Arc::new(Self {
            replies: Mutex::new(VecDeque::from(vec![GenerateContentResponse::from_parts(
                vec![Part::text(body)],
            )])),
        })
    }
}

#[async_trait]
impl GenerativeBackend for CannedModel {
    async fn generate_content(
        &self,
        _model: &str,
        _request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.replies
            .lock()
            .pop_front()
            .ok_or_else(|| RokoError::UplinkError("no audio in tests".into()))
    }
}

fn connected_app(model: Arc<CannedModel>) -> TestApp {
    let backend: Arc<dyn GenerativeBackend> = model;
    let transcript = TranscriptLog::new();
    let pipeline = CommandPipeline::new(
        ConversationClient::new(
            Arc::clone(&backend),
            Arc::new(SimulatedSmsGateway::new()),
            "chat",
        ),
        SpeechSynthesizer::new(backend, "tts"),
        Arc::new(Mutex::new(SpeechPlayer::disabled())),
        transcript.clone(),
    );
    let (orchestrator, handle) = Orchestrator::new(pipeline);
    orchestrator.start().unwrap();

    TestApp::with_state(AppState::new().with_orchestrator(handle, transcript))
}

#[test]
fn test_console_shows_idle_placeholder() {
    let mut harness = harness(TestApp::new());
    harness.run();

    let _idle = harness.get_by_label("System Idle");
    let _stable = harness.get_by_label("Uplink: Neural Link Stable");
}

#[test]
fn test_console_tags_entries() {
    let app = TestApp::new()
        .with_entry(LogKind::User, "status report")
        .with_entry(LogKind::Ai, "All systems nominal, Sir.")
        .with_entry(LogKind::Error, UPLINK_ERROR_MESSAGE);
    let mut harness = harness(app);
    harness.run();

    let _user = harness.get_by_label("SIR: status report");
    let _ai = harness.get_by_label("ROKO: All systems nominal, Sir.");
    let _error = harness.get_by_label(&format!("SYSTEM: {}", UPLINK_ERROR_MESSAGE));
    assert!(harness.query_by_label("System Idle").is_none());
}

#[test]
fn test_type_text_into_input() {
    let mut harness = harness(TestApp::new());
    harness.run();

    harness.get_by_label("Command input").focus();
    harness.run();
    harness.get_by_label("Command input").type_text("Open the pod bay doors");
    harness.run();

    assert_eq!(harness.state().state.input_text, "Open the pod bay doors");
}

#[test]
fn test_sms_button_prefills_template() {
    let mut harness = harness(TestApp::new());
    harness.run();

    harness.get_by_label("Send SMS").click();
    harness.run();

    assert_eq!(harness.state().state.input_text, SMS_TEMPLATE);
    let _notice = harness.get_by_label(&format!("ROKO: {}", SMS_PROTOCOL_NOTICE));
}

#[test]
fn test_execute_without_uplink_logs_error() {
    let mut harness = harness(TestApp::new());
    harness.run();

    harness.get_by_label("Command input").focus();
    harness.run();
    harness.get_by_label("Command input").type_text("hello");
    harness.run();
    harness.get_by_label("Execute command").click();
    harness.run();

    assert!(harness.state().state.input_text.is_empty());
    let _user = harness.get_by_label("SIR: hello");
    let _error = harness.get_by_label(&format!("SYSTEM: {}", UPLINK_ERROR_MESSAGE));
}

#[test]
fn test_blank_input_is_not_submitted() {
    let mut harness = harness(TestApp::new());
    harness.run();

    harness.get_by_label("Execute command").click();
    harness.run();

    assert!(harness.state().state.transcript.is_empty());
}

#[test]
fn test_thinking_indicator() {
    let mut app = TestApp::new();
    app.state.is_thinking = true;
    let mut harness = harness(app);
    harness.run();

    let _syncing = harness.get_by_label("Uplink: Syncing...");
}

#[test]
fn test_interface_toggle_reports_error_without_device() {
    let mut harness = harness(TestApp::new());
    harness.run();

    harness.get_by_label("INITIALIZE_INTERFACE").click();
    harness.run();

    assert_eq!(harness.state().state.status, ConnectionStatus::Error);
    let _toggle = harness.get_by_label("INITIALIZE_INTERFACE");
}

#[test]
fn test_voice_selection_defaults_to_zephyr() {
    let mut harness = harness(TestApp::new());
    harness.run();

    assert_eq!(harness.state().state.selected_voice, Voice::Zephyr);
    assert_eq!(harness.state().state.selected_voice.label(), "Zephyr (Standard)");
}

#[test]
fn test_command_round_trip_through_orchestrator() {
    let app = connected_app(CannedModel::answering(
        "Diagnostics complete, Sir.",
        "Jaanch poori hui, Sir.",
    ));
    let mut harness = harness(app);
    harness.run();

    harness.get_by_label("Command input").focus();
    harness.run();
    harness.get_by_label("Command input").type_text("run diagnostics");
    harness.run();
    harness.get_by_label("Execute command").click();
    harness.run();

    for _ in 0..200 {
        if !harness.state().state.is_thinking {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
        harness.run();
    }
    assert!(!harness.state().state.is_thinking);

    let _user = harness.get_by_label("SIR: run diagnostics");
    let _ai = harness.get_by_label("ROKO: Diagnostics complete, Sir.");

    harness.state_mut().state.shutdown();
}
