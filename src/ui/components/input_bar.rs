//! Input bar component
//!
//! Single-line command input with an execute button.

use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, Key, RichText, Vec2};

pub const COMMAND_HINT: &str = "Direct command...";

pub struct InputBar<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> InputBar<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .stroke(self.theme.panel_stroke())
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing_sm + 4.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    self.show_text_input(ui);
                    self.show_execute_button(ui);
                });
            });
    }

    fn show_text_input(&mut self, ui: &mut egui::Ui) {
        let thinking = self.state.is_thinking;
        let available_width = ui.available_width() - 52.0;

        let text_edit = egui::TextEdit::singleline(&mut self.state.input_text)
            .hint_text(COMMAND_HINT)
            .desired_width(available_width)
            .font(egui::TextStyle::Body)
            .text_color(self.theme.text_secondary)
            .frame(false)
            .id(egui::Id::new("command_input"));

        let response = ui.add_enabled(!thinking, text_edit);
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::TextEdit, !thinking, "Command input")
        });

        if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
            self.state.submit_command();
            response.request_focus();
        }
    }

    fn show_execute_button(&mut self, ui: &mut egui::Ui) {
        let can_send = !self.state.is_thinking && !self.state.input_text.trim().is_empty();

        let button = egui::Button::new(RichText::new("»").size(18.0).color(self.theme.accent))
            .min_size(Vec2::splat(40.0))
            .rounding(self.theme.button_rounding)
            .fill(self.theme.bg_primary);

        let response = ui.add_enabled(!self.state.is_thinking, button);
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Button, can_send, "Execute command")
        });

        if response.clicked() {
            self.state.submit_command();
        }

        response.on_hover_text("Execute (Enter)");
    }
}
