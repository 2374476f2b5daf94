//! Breathing view component
//!
//! The selected session with the animated flower and the current phase
//! instruction.

use crate::scheduler::BreathPhase;
use crate::session::SessionDescriptor;
use crate::ui::components::{Flower, WarningBox};
use crate::ui::theme::Theme;
use egui::{self, RichText};

/// Guided breathing for one session
pub struct BreathingView<'a> {
    theme: &'a Theme,
    session: &'a SessionDescriptor,
    phase: BreathPhase,
    instruction: &'a str,
    progress: f32,
}

impl<'a> BreathingView<'a> {
    pub fn new(
        theme: &'a Theme,
        session: &'a SessionDescriptor,
        phase: BreathPhase,
        instruction: &'a str,
        progress: f32,
    ) -> Self {
        Self {
            theme,
            session,
            phase,
            instruction,
            progress,
        }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_card)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing_lg)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new(&self.session.title)
                            .size(22.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );
                    if !self.session.description.is_empty() {
                        ui.label(
                            RichText::new(&self.session.description)
                                .color(self.theme.text_secondary),
                        );
                    }

                    if let Some(warning) = &self.session.warning {
                        ui.add_space(self.theme.spacing_sm);
                        WarningBox::new(self.theme, warning).show(ui);
                    }

                    ui.add_space(self.theme.spacing);
                    let size = ui.available_width().min(260.0);
                    Flower::new(self.theme, self.phase, self.progress)
                        .size(size)
                        .show(ui);
                    ui.add_space(self.theme.spacing);

                    ui.label(
                        RichText::new(self.instruction)
                            .size(20.0)
                            .color(self.theme.primary),
                    );

                    ui.add_space(self.theme.spacing);
                    if !self.session.instruction.is_empty() {
                        ui.label(
                            RichText::new(&self.session.instruction)
                                .italics()
                                .color(self.theme.text_secondary),
                        );
                    }
                    if let Some(advice) = &self.session.sequence_advice {
                        ui.label(RichText::new(advice).small().color(self.theme.text_muted));
                    }
                });
            });
    }
}
