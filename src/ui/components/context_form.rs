//! Context form component
//!
//! Predefined tags, free-text input and the Back / Personalize Session
//! navigation.

use crate::catalog::CONTEXT_TAGS;
use crate::ui::components::StepIndicator;
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, RichText, Vec2};

/// Context input form
pub struct ContextForm<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> ContextForm<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            StepIndicator::new(self.theme, 3, 3).show(ui);
            ui.add_space(self.theme.spacing);
            ui.label(
                RichText::new("TELL US MORE")
                    .heading()
                    .color(self.theme.text_primary),
            );
            ui.label(
                RichText::new("Anything specific happening? (Optional)")
                    .color(self.theme.text_muted),
            );
        });
        ui.add_space(self.theme.spacing);

        self.show_tags(ui);
        ui.add_space(self.theme.spacing);
        self.show_text_input(ui);
        ui.add_space(self.theme.spacing_lg);
        self.show_navigation(ui);
    }

    fn show_tags(&mut self, ui: &mut egui::Ui) {
        let mut picked = None;

        ui.horizontal_wrapped(|ui| {
            for tag in CONTEXT_TAGS {
                let is_selected = self.state.context_draft.contains(tag);
                let text = RichText::new(tag).color(if is_selected {
                    egui::Color32::WHITE
                } else {
                    self.theme.text_secondary
                });
                let button = egui::Button::new(text)
                    .rounding(self.theme.button_rounding)
                    .selected(is_selected);

                if ui.add(button).clicked() {
                    picked = Some(tag);
                }
            }
        });

        if let Some(tag) = picked {
            self.state.pick_context_tag(tag);
        }
    }

    fn show_text_input(&mut self, ui: &mut egui::Ui) {
        let text_edit = egui::TextEdit::multiline(&mut self.state.context_draft)
            .hint_text("Or type here... (e.g., 'I have a headache', 'Just woke up')")
            .desired_rows(4)
            .desired_width(f32::INFINITY)
            .id(egui::Id::new("context_input"));

        let response = ui.add(text_edit);
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::TextEdit, true, "Context input")
        });
    }

    fn show_navigation(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let back = egui::Button::new(RichText::new("Back").color(self.theme.text_secondary))
                .stroke(self.theme.secondary_button_stroke())
                .fill(egui::Color32::TRANSPARENT)
                .rounding(self.theme.button_rounding)
                .min_size(Vec2::new(100.0, 40.0));
            if ui.add(back).clicked() {
                self.state.back();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let next = egui::Button::new(
                    RichText::new("Personalize Session").color(egui::Color32::WHITE),
                )
                .fill(self.theme.primary)
                .rounding(self.theme.button_rounding)
                .min_size(Vec2::new(180.0, 40.0));
                if ui.add(next).clicked() {
                    self.state.submit_context();
                }
            });
        });
    }
}
