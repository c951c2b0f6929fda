//! Console component
//!
//! Scrolling transcript with timestamps and sender tags.

use crate::messages::{LogEntry, LogKind};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, Align, Layout, RichText};

pub const IDLE_PLACEHOLDER: &str = "System Idle";

pub struct Console<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> Console<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let entries = self.state.transcript.get_all();

        egui::ScrollArea::vertical()
            .id_salt("console")
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if entries.is_empty() {
                    self.show_idle(ui);
                    return;
                }

                for entry in &entries {
                    self.show_entry(ui, entry);
                    ui.add_space(self.theme.spacing_sm);
                }
            });
    }

    fn show_idle(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.label(
                RichText::new(IDLE_PLACEHOLDER)
                    .size(11.0)
                    .color(self.theme.text_muted),
            );
        });
    }

    fn show_entry(&self, ui: &mut egui::Ui, entry: &LogEntry) {
        let from_roko = entry.kind == LogKind::Ai;
        let layout = if from_roko {
            Layout::top_down(Align::LEFT)
        } else {
            Layout::top_down(Align::RIGHT)
        };

        let (text_color, fill) = match entry.kind {
            LogKind::Ai => (self.theme.text_primary, self.theme.accent.gamma_multiply(0.05)),
            LogKind::User => (self.theme.text_secondary, self.theme.bg_tertiary),
            LogKind::Error | LogKind::System | LogKind::Command => {
                (self.theme.error, self.theme.error.gamma_multiply(0.08))
            }
        };

        ui.with_layout(layout, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("[{}]", entry.time_label()))
                        .size(9.0)
                        .color(self.theme.text_muted),
                );
                ui.label(
                    RichText::new(entry.kind.tag())
                        .size(9.0)
                        .strong()
                        .color(if from_roko {
                            self.theme.accent
                        } else {
                            self.theme.text_secondary
                        }),
                );
            });

            egui::Frame::none()
                .fill(fill)
                .rounding(self.theme.card_rounding)
                .inner_margin(self.theme.spacing_sm + 4.0)
                .show(ui, |ui| {
                    ui.set_max_width(ui.available_width() * 0.9);
                    let response = ui.label(RichText::new(&entry.message).color(text_color));
                    let accessible = format!("{}: {}", entry.kind.tag(), entry.message);
                    response.widget_info(|| {
                        egui::WidgetInfo::labeled(egui::WidgetType::Label, true, &accessible)
                    });
                });
        });
    }
}
