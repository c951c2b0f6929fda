//! Main application struct and eframe integration

use crate::audio::default_input_factory;
use crate::integration::{CommandPipeline, Orchestrator, OrchestratorHandle, RokoConfig};
use crate::messages::{LogKind, TranscriptLog};
use crate::ui::components::{Console, ControlPanel, InputBar, StatusBar};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use crate::Result;
use egui::{self, CentralPanel, SidePanel, TopBottomPanel};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{error, info};

pub struct RokoApp {
    state: AppState,
    theme: Theme,
    worker: Option<JoinHandle<()>>,
}

impl RokoApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: RokoConfig) -> Self {
        let theme = Theme::hud();
        theme.apply(&cc.egui_ctx);

        let transcript = TranscriptLog::new();
        let mut state = AppState::new()
            .with_voice(config.voice)
            .with_input_factory(default_input_factory());

        let worker = match start_orchestrator(&config, transcript.clone()) {
            Ok((handle, worker)) => {
                state = state.with_orchestrator(handle, transcript);
                Some(worker)
            }
            Err(e) => {
                error!("Failed to start command pipeline: {}", e);
                state.transcript.push(LogKind::Error, e.user_message());
                None
            }
        };

        Self {
            state,
            theme,
            worker,
        }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                StatusBar::new(&self.state, &self.theme).show(ui);
            });
    }

    fn show_command_center(&mut self, ctx: &egui::Context) {
        SidePanel::right("command_center")
            .resizable(false)
            .exact_width(440.0)
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(self.theme.spacing_lg),
            )
            .show(ctx, |ui| {
                ControlPanel::new(&mut self.state, &self.theme).show_protocols(ui);
                ui.add_space(self.theme.spacing);

                TopBottomPanel::bottom("interface_toggle")
                    .show_separator_line(false)
                    .frame(egui::Frame::none().inner_margin(egui::Margin::symmetric(0.0, 8.0)))
                    .show_inside(ui, |ui| {
                        ControlPanel::new(&mut self.state, &self.theme).show_interface_toggle(ui);
                    });

                TopBottomPanel::bottom("command_input")
                    .show_separator_line(false)
                    .frame(egui::Frame::none().inner_margin(egui::Margin::symmetric(0.0, 8.0)))
                    .show_inside(ui, |ui| {
                        InputBar::new(&mut self.state, &self.theme).show(ui);
                    });

                CentralPanel::default()
                    .frame(
                        egui::Frame::none()
                            .fill(self.theme.bg_primary)
                            .stroke(self.theme.panel_stroke())
                            .rounding(self.theme.card_rounding)
                            .inner_margin(self.theme.spacing),
                    )
                    .show_inside(ui, |ui| {
                        Console::new(&self.state, &self.theme).show(ui);
                    });
            });
    }

    fn show_hud(&mut self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.bg_primary))
            .show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    let radius = ui.available_size().min_elem() * 0.3;
                    let center = ui.max_rect().center();
                    let stroke = egui::Stroke::new(1.5, self.theme.accent.gamma_multiply(0.4));
                    ui.painter().circle_stroke(center, radius, stroke);
                    ui.painter()
                        .circle_stroke(center, radius * 0.8, self.theme.panel_stroke());
                    ui.label(
                        egui::RichText::new(self.state.status.label())
                            .size(14.0)
                            .color(self.theme.accent),
                    );
                });
            });
    }
}

fn start_orchestrator(
    config: &RokoConfig,
    transcript: TranscriptLog,
) -> Result<(OrchestratorHandle, JoinHandle<()>)> {
    let pipeline = CommandPipeline::from_config(config, transcript)?;
    let (orchestrator, handle) = Orchestrator::new(pipeline);
    let worker = orchestrator.start()?;
    info!("Command pipeline ready");
    Ok((handle, worker))
}

impl eframe::App for RokoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_events();

        self.show_header(ctx);
        self.show_command_center(ctx);
        self.show_hud(ctx);

        // Keeps the clock ticking and picks up orchestrator events
        ctx.request_repaint_after(Duration::from_millis(250));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("ROKO shutting down");
        self.state.shutdown();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("Orchestrator thread panicked");
            }
        }
    }
}
