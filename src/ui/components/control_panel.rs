//! Voice profile picker, protocol shortcuts and the interface toggle

use crate::speech::Voice;
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, RichText, Vec2};

pub const ATTACH_LABEL: &str = "INITIALIZE_INTERFACE";
pub const DETACH_LABEL: &str = "DETACH_INTERFACE";

pub struct ControlPanel<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> ControlPanel<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    /// Voice picker and the SMS/clear shortcuts
    pub fn show_protocols(&mut self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new("VOICE PROFILE")
                .size(10.0)
                .color(self.theme.accent.gamma_multiply(0.6)),
        );

        ui.horizontal(|ui| {
            egui::ComboBox::from_id_salt("voice_profile")
                .selected_text(self.state.selected_voice.label())
                .width(180.0)
                .show_ui(ui, |ui| {
                    for voice in Voice::all() {
                        ui.selectable_value(&mut self.state.selected_voice, voice, voice.label());
                    }
                });

            let sms = ui.add(self.hud_button("SEND SMS"));
            sms.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::Button, true, "Send SMS")
            });
            if sms.clicked() {
                self.state.trigger_sms();
            }

            let clear = ui.add(self.hud_button("CLEAR"));
            clear.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::Button, true, "Clear console")
            });
            if clear.clicked() {
                self.state.clear();
            }
        });
    }

    /// Full-width interface toggle
    pub fn show_interface_toggle(&mut self, ui: &mut egui::Ui) {
        let active = self.state.is_interface_active();
        let (label, color) = if active {
            (DETACH_LABEL, self.theme.error)
        } else {
            (ATTACH_LABEL, self.theme.accent)
        };

        let button = egui::Button::new(RichText::new(label).size(10.0).color(color))
            .min_size(Vec2::new(ui.available_width(), 40.0))
            .rounding(self.theme.card_rounding)
            .fill(color.gamma_multiply(0.05))
            .stroke(egui::Stroke::new(1.0, color.gamma_multiply(0.3)));

        let response = ui.add(button);
        response.widget_info(|| egui::WidgetInfo::labeled(egui::WidgetType::Button, true, label));
        if response.clicked() {
            self.state.toggle_interface();
        }
    }

    fn hud_button(&self, text: &str) -> egui::Button<'static> {
        egui::Button::new(RichText::new(text.to_string()).size(10.0).color(self.theme.text_primary))
            .rounding(self.theme.button_rounding)
            .stroke(self.theme.panel_stroke())
    }
}
