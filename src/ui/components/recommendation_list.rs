//! Recommendation list component
//!
//! One card per session; choosing a card opens the breathing view.

use crate::session::{Difficulty, SessionDescriptor};
use crate::ui::components::Flower;
use crate::ui::theme::Theme;
use egui::{self, Color32, RichText, Vec2};

/// Loading indicator shown while recommendations are fetched
pub struct LoadingView<'a> {
    theme: &'a Theme,
}

impl<'a> LoadingView<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(self.theme.spacing_lg);
            Flower::loading(self.theme).show(ui);
            ui.add_space(self.theme.spacing);
            ui.label(
                RichText::new("Crafting your session...")
                    .italics()
                    .color(self.theme.text_muted),
            );
        });
    }
}

/// List of recommended sessions
pub struct RecommendationList<'a> {
    theme: &'a Theme,
    sessions: &'a [SessionDescriptor],
}

impl<'a> RecommendationList<'a> {
    pub fn new(theme: &'a Theme, sessions: &'a [SessionDescriptor]) -> Self {
        Self { theme, sessions }
    }

    /// Show the cards; returns the index of the chosen session
    pub fn show(self, ui: &mut egui::Ui) -> Option<usize> {
        let mut chosen = None;

        for (index, session) in self.sessions.iter().enumerate() {
            if self.show_card(ui, session) {
                chosen = Some(index);
            }
            ui.add_space(self.theme.spacing);
        }

        chosen
    }

    /// Returns true when the card's start button was clicked
    fn show_card(&self, ui: &mut egui::Ui, session: &SessionDescriptor) -> bool {
        let mut clicked = false;

        egui::Frame::none()
            .fill(self.theme.bg_card)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .stroke(egui::Stroke::new(1.0, self.theme.bg_secondary))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());

                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(&session.title)
                            .size(18.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(session.difficulty.to_string())
                                .small()
                                .color(difficulty_color(self.theme, session.difficulty)),
                        );
                    });
                });

                if !session.description.is_empty() {
                    ui.label(RichText::new(&session.description).color(self.theme.text_secondary));
                }

                ui.label(
                    RichText::new(format!(
                        "Inhale {}s · Hold {}s · Exhale {}s · {:.1} breaths/min",
                        session.timings.inhale,
                        session.timings.hold,
                        session.timings.exhale,
                        session.timings.breaths_per_minute()
                    ))
                    .small()
                    .color(self.theme.text_muted),
                );

                if let Some(warning) = &session.warning {
                    WarningBox::new(self.theme, warning).show(ui);
                }

                if let Some(advice) = &session.sequence_advice {
                    ui.label(RichText::new(advice).small().italics().color(self.theme.primary));
                }

                ui.add_space(self.theme.spacing_sm);
                let start = egui::Button::new(RichText::new("Begin").color(Color32::WHITE))
                    .fill(self.theme.primary)
                    .rounding(self.theme.button_rounding)
                    .min_size(Vec2::new(96.0, 32.0));
                let response = ui.add(start);
                let label = format!("Begin {}", session.title);
                response.widget_info(|| {
                    egui::WidgetInfo::labeled(egui::WidgetType::Button, true, &label)
                });
                clicked = response.clicked();
            });

        clicked
    }
}

fn difficulty_color(theme: &Theme, difficulty: Difficulty) -> Color32 {
    match difficulty {
        Difficulty::Easy => theme.secondary,
        Difficulty::Medium => theme.primary,
        Difficulty::Advanced => theme.warning,
    }
}

/// Highlighted safety note
pub struct WarningBox<'a> {
    theme: &'a Theme,
    text: &'a str,
}

impl<'a> WarningBox<'a> {
    pub fn new(theme: &'a Theme, text: &'a str) -> Self {
        Self { theme, text }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.warning_bg)
            .rounding(self.theme.button_rounding)
            .inner_margin(self.theme.spacing_sm)
            .show(ui, |ui| {
                ui.label(RichText::new(format!("⚠ {}", self.text)).color(self.theme.warning));
            });
    }
}
