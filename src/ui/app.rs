//! Main application struct and eframe integration
//!
//! This module contains the main CalmcoreApp that implements eframe::App.

use crate::flow::Screen;
use crate::integration::Orchestrator;
use crate::ui::components::{
    BreathingView, ContextForm, IntensityTowers, LoadingView, MoodGrid, RecommendationList,
};
use crate::ui::state::{AppState, RecommendationStage};
use crate::ui::theme::Theme;
use egui::{CentralPanel, RichText, Vec2};
use std::time::Duration;
use tracing::info;

/// Frame interval for the idle animations on the selection screens
const IDLE_FRAME: Duration = Duration::from_millis(33);

/// Main Calmcore application
pub struct CalmcoreApp {
    /// Application state
    state: AppState,
    /// Visual theme
    theme: Theme,
}

impl CalmcoreApp {
    /// Create the application around a started orchestrator
    pub fn new(cc: &eframe::CreationContext<'_>, orchestrator: Orchestrator) -> Self {
        let theme = Theme::calm();
        theme.apply(&cc.egui_ctx);

        orchestrator.set_repaint_context(cc.egui_ctx.clone());

        Self::with_state(AppState::new(orchestrator), theme)
    }

    /// Create the application from existing state
    pub fn with_state(state: AppState, theme: Theme) -> Self {
        Self { state, theme }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Poll backend events
    pub fn poll(&mut self) {
        self.state.poll_events();
    }

    /// Render the current screen
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        self.show_header(ui);
        ui.add_space(self.theme.spacing);

        match self.state.screen() {
            Screen::Mood => MoodGrid::new(&mut self.state, &self.theme).show(ui),
            Screen::Intensity => IntensityTowers::new(&mut self.state, &self.theme).show(ui),
            Screen::Context => ContextForm::new(&mut self.state, &self.theme).show(ui),
            Screen::Recommendation => self.show_recommendations(ui),
        }

        if let Some(error) = &self.state.last_error {
            ui.add_space(self.theme.spacing_sm);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(error).small().color(self.theme.warning));
            });
        }
    }

    /// Show the brand header
    fn show_header(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("calmcore")
                    .size(18.0)
                    .strong()
                    .color(self.theme.primary),
            );
        });
    }

    /// Show the recommendation screen for the current stage
    fn show_recommendations(&mut self, ui: &mut egui::Ui) {
        let loading = matches!(self.state.stage, RecommendationStage::Loading { .. });

        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("RECOMMENDATIONS")
                    .heading()
                    .color(self.theme.text_primary),
            );
            ui.label(
                RichText::new(if loading {
                    "Connecting to nature..."
                } else {
                    "Based on your mood"
                })
                .color(self.theme.text_muted),
            );
        });
        ui.add_space(self.theme.spacing);

        match self.state.stage.clone() {
            RecommendationStage::Idle => {}
            RecommendationStage::Loading { .. } => LoadingView::new(&self.theme).show(ui),
            RecommendationStage::Choosing { sessions } => {
                if let Some(index) = RecommendationList::new(&self.theme, &sessions).show(ui) {
                    self.state.choose_session(index);
                }
            }
            RecommendationStage::Breathing {
                phase, instruction, ..
            } => {
                let progress = self.state.phase_progress();
                if let Some(session) = self.state.selected_session().cloned() {
                    BreathingView::new(&self.theme, &session, phase, &instruction, progress).show(ui);
                }

                ui.add_space(self.theme.spacing);
                ui.vertical_centered(|ui| {
                    if ui.button("Back to list").clicked() {
                        self.state.back_to_list();
                    }
                });
            }
        }

        ui.add_space(self.theme.spacing_lg);
        ui.vertical_centered(|ui| {
            let reset = egui::Button::new(RichText::new("Start Over").color(self.theme.text_secondary))
                .stroke(self.theme.secondary_button_stroke())
                .fill(egui::Color32::TRANSPARENT)
                .rounding(self.theme.button_rounding)
                .min_size(Vec2::new(140.0, 36.0));
            if ui.add(reset).clicked() {
                self.state.reset();
            }
        });
    }
}

impl eframe::App for CalmcoreApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll backend events
        self.poll();

        CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing_lg),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| self.ui(ui));
            });

        // Request repaint for animations
        if self.state.is_animating() {
            ctx.request_repaint();
        } else if matches!(self.state.screen(), Screen::Mood | Screen::Intensity) {
            ctx.request_repaint_after(IDLE_FRAME);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.stop_breathing();
        info!("Calmcore shutting down");
    }
}
