//! Status bar component
//!
//! Title, live clock, interface status and the uplink activity indicator.

use crate::ui::state::{AppState, ConnectionStatus};
use crate::ui::theme::Theme;
use chrono::Local;
use egui::{self, Color32, RichText, Vec2};

pub const THINKING_LABEL: &str = "Syncing...";
pub const STABLE_LABEL: &str = "Neural Link Stable";

pub struct StatusBar<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let now = Local::now();

        ui.horizontal(|ui| {
            ui.label(
                RichText::new("ROKO")
                    .size(20.0)
                    .strong()
                    .color(self.theme.text_primary),
            );

            ui.add_space(self.theme.spacing);

            ui.vertical(|ui| {
                ui.label(
                    RichText::new(now.format("%H:%M:%S").to_string())
                        .size(16.0)
                        .strong()
                        .color(self.theme.text_primary),
                );
                ui.label(
                    RichText::new(now.format("%a %d %b").to_string().to_uppercase())
                        .size(9.0)
                        .color(self.theme.text_muted),
                );
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                self.show_connection(ui);
                ui.add_space(self.theme.spacing);
                self.show_activity(ui);
            });
        });
    }

    fn show_connection(&self, ui: &mut egui::Ui) {
        let color = match self.state.status {
            ConnectionStatus::Disconnected => self.theme.text_muted,
            ConnectionStatus::Connecting => self.theme.warning,
            ConnectionStatus::Connected => self.theme.success,
            ConnectionStatus::Error => self.theme.error,
        };

        ui.label(
            RichText::new(self.state.status.label())
                .size(10.0)
                .color(color),
        );
        dot(ui, color);
    }

    fn show_activity(&self, ui: &mut egui::Ui) {
        let (label, color) = if self.state.is_thinking {
            let time = ui.ctx().input(|i| i.time);
            let pulse = ((time * 4.0).sin() * 0.5 + 0.5) as f32;
            (THINKING_LABEL, self.theme.warning.gamma_multiply(0.5 + 0.5 * pulse))
        } else {
            (STABLE_LABEL, self.theme.accent)
        };

        let response = ui.label(RichText::new(label).size(10.0).color(self.theme.accent));
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Label, true, format!("Uplink: {}", label))
        });
        dot(ui, color);
    }
}

fn dot(ui: &mut egui::Ui, color: Color32) {
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(8.0), egui::Sense::hover());
    ui.painter().circle_filled(rect.center(), 3.5, color);
}
