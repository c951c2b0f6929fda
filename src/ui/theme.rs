//! HUD colors and styling

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Vec2, Visuals};

#[derive(Clone, Debug)]
pub struct Theme {
    /// Cyan accent used for borders, tags and the active link
    pub accent: Color32,
    pub accent_dim: Color32,
    pub warning: Color32,
    pub error: Color32,
    pub success: Color32,

    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,

    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    pub button_rounding: Rounding,
    pub card_rounding: Rounding,

    pub spacing: f32,
    pub spacing_lg: f32,
    pub spacing_sm: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::hud()
    }
}

impl Theme {
    pub fn hud() -> Self {
        Self {
            accent: Color32::from_rgb(0, 242, 255),
            accent_dim: Color32::from_rgb(8, 51, 68),
            warning: Color32::from_rgb(250, 204, 21),
            error: Color32::from_rgb(248, 113, 113),
            success: Color32::from_rgb(34, 211, 238),

            bg_primary: Color32::from_rgb(0, 0, 0),
            bg_secondary: Color32::from_rgb(6, 14, 18),
            bg_tertiary: Color32::from_rgb(12, 28, 34),

            text_primary: Color32::from_rgb(255, 255, 255),
            text_secondary: Color32::from_rgb(207, 250, 254),
            text_muted: Color32::from_rgb(22, 78, 99),

            button_rounding: Rounding::same(8.0),
            card_rounding: Rounding::same(16.0),

            spacing: 16.0,
            spacing_lg: 24.0,
            spacing_sm: 8.0,
        }
    }

    /// Apply this theme to egui
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();

        visuals.panel_fill = self.bg_primary;
        visuals.window_fill = self.bg_secondary;
        visuals.extreme_bg_color = self.bg_secondary;

        visuals.widgets.noninteractive.bg_fill = self.bg_secondary;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_secondary);
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.accent_dim);

        visuals.widgets.inactive.bg_fill = self.bg_tertiary;
        visuals.widgets.inactive.weak_bg_fill = self.bg_tertiary;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.accent);

        visuals.widgets.hovered.bg_fill = self.accent.gamma_multiply(0.15);
        visuals.widgets.hovered.weak_bg_fill = self.accent.gamma_multiply(0.15);
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, self.accent);
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.active.bg_fill = self.accent.gamma_multiply(0.3);
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.selection.bg_fill = self.accent.gamma_multiply(0.3);
        visuals.selection.stroke = Stroke::new(1.0, self.accent);

        visuals.window_rounding = self.card_rounding;
        visuals.window_stroke = Stroke::new(1.0, self.accent_dim);

        ctx.set_visuals(visuals);

        let mut style = (*ctx.style()).clone();
        style.spacing.item_spacing = Vec2::splat(self.spacing_sm);
        style.spacing.window_margin = egui::Margin::same(self.spacing);
        style.spacing.button_padding = Vec2::new(self.spacing, self.spacing_sm);

        // The HUD is monospace throughout
        style.text_styles.insert(
            egui::TextStyle::Heading,
            FontId::new(22.0, FontFamily::Monospace),
        );
        style.text_styles.insert(
            egui::TextStyle::Body,
            FontId::new(13.0, FontFamily::Monospace),
        );
        style.text_styles.insert(
            egui::TextStyle::Monospace,
            FontId::new(13.0, FontFamily::Monospace),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            FontId::new(12.0, FontFamily::Monospace),
        );
        style.text_styles.insert(
            egui::TextStyle::Small,
            FontId::new(10.0, FontFamily::Monospace),
        );

        ctx.set_style(style);
    }

    /// Border for framed HUD panels
    pub fn panel_stroke(&self) -> Stroke {
        Stroke::new(1.0, self.accent.gamma_multiply(0.2))
    }
}
