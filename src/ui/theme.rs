//! Theme and styling for the Calmcore UI
//!
//! Soft pastel colors on a warm light background, plus the petal palette
//! used by the breathing flower.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Vec2, Visuals};

/// Application theme configuration
#[derive(Clone, Debug)]
pub struct Theme {
    /// Primary accent color (sage)
    pub primary: Color32,
    /// Secondary accent color
    pub secondary: Color32,
    /// Warning color for safety notes
    pub warning: Color32,
    pub warning_bg: Color32,

    /// Background colors
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_card: Color32,

    /// Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    /// Petal fill colors, clockwise from the top
    pub petals: [Color32; 6],
    pub flower_center: Color32,

    /// Step indicator dots
    pub step_active: Color32,
    pub step_inactive: Color32,

    /// Border radius for buttons
    pub button_rounding: Rounding,
    /// Border radius for cards/panels
    pub card_rounding: Rounding,

    /// Standard spacing
    pub spacing: f32,
    /// Large spacing
    pub spacing_lg: f32,
    /// Small spacing
    pub spacing_sm: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::calm()
    }
}

impl Theme {
    /// The default light pastel theme
    pub fn calm() -> Self {
        Self {
            primary: Color32::from_rgb(0x6B, 0x8F, 0x7F),   // Sage
            secondary: Color32::from_rgb(0xB0, 0xC4, 0xB1), // Pale sage
            warning: Color32::from_rgb(0x9A, 0x5B, 0x13),
            warning_bg: Color32::from_rgb(0xFD, 0xF1, 0xDC),

            bg_primary: Color32::from_rgb(0xFA, 0xF7, 0xF2),   // Warm white
            bg_secondary: Color32::from_rgb(0xF1, 0xEC, 0xE4),
            bg_card: Color32::WHITE,

            text_primary: Color32::from_rgb(0x3A, 0x3A, 0x3A),
            text_secondary: Color32::from_rgb(0x5E, 0x5E, 0x5E),
            text_muted: Color32::from_rgb(0x8E, 0x8E, 0x8E),

            petals: [
                Color32::from_rgb(0xD4, 0xE2, 0xF0), // Soft blue
                Color32::from_rgb(0xF0, 0xE6, 0xD4), // Cream
                Color32::from_rgb(0xE6, 0xD4, 0xF0), // Soft purple
                Color32::from_rgb(0xD4, 0xF0, 0xE6), // Soft green
                Color32::from_rgb(0xE2, 0xF0, 0xD4), // Lime
                Color32::from_rgb(0xF0, 0xD4, 0xD4), // Soft pink
            ],
            flower_center: Color32::WHITE,

            step_active: Color32::from_rgb(0x6B, 0x8F, 0x7F),
            step_inactive: Color32::from_rgb(0xD9, 0xD4, 0xCC),

            button_rounding: Rounding::same(20.0),
            card_rounding: Rounding::same(16.0),

            spacing: 16.0,
            spacing_lg: 28.0,
            spacing_sm: 8.0,
        }
    }

    /// Apply this theme to egui
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::light();

        // Panel backgrounds
        visuals.panel_fill = self.bg_primary;
        visuals.window_fill = self.bg_card;
        visuals.extreme_bg_color = self.bg_card;

        // Widget colors
        visuals.widgets.noninteractive.bg_fill = self.bg_secondary;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_secondary);

        visuals.widgets.inactive.bg_fill = self.bg_secondary;
        visuals.widgets.inactive.weak_bg_fill = self.bg_secondary;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_primary);
        visuals.widgets.inactive.rounding = self.button_rounding;

        visuals.widgets.hovered.bg_fill = self.secondary;
        visuals.widgets.hovered.weak_bg_fill = self.secondary;
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.text_primary);
        visuals.widgets.hovered.rounding = self.button_rounding;

        visuals.widgets.active.bg_fill = self.primary;
        visuals.widgets.active.weak_bg_fill = self.primary;
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);
        visuals.widgets.active.rounding = self.button_rounding;

        // Text selection
        visuals.selection.bg_fill = self.secondary.gamma_multiply(0.5);
        visuals.selection.stroke = Stroke::new(1.0, self.primary);

        visuals.window_rounding = self.card_rounding;
        visuals.window_stroke = Stroke::new(1.0, self.bg_secondary);

        ctx.set_visuals(visuals);

        let mut style = (*ctx.style()).clone();
        style.spacing.item_spacing = Vec2::splat(self.spacing_sm);
        style.spacing.window_margin = egui::Margin::same(self.spacing);
        style.spacing.button_padding = Vec2::new(self.spacing, self.spacing_sm);

        style.text_styles.insert(
            egui::TextStyle::Heading,
            FontId::new(26.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Body,
            FontId::new(15.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            FontId::new(15.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Small,
            FontId::new(12.0, FontFamily::Proportional),
        );

        ctx.set_style(style);
    }

    /// Stroke for outlined secondary buttons
    pub fn secondary_button_stroke(&self) -> Stroke {
        Stroke::new(1.0, self.text_muted)
    }
}
