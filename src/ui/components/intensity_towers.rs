//! Intensity towers and the wizard step indicator

use crate::catalog::{IntensityOption, INTENSITIES};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{Align2, FontId, Pos2, Rect, RichText, Sense, Stroke, Vec2};
use std::f32::consts::TAU;

const TOWER_WIDTH: f32 = 48.0;
/// Tallest tower plus room for sway, hover lift and the label
const TOWER_AREA_HEIGHT: f32 = 260.0;
/// Seconds per sway cycle
const SWAY_PERIOD: f32 = 4.0;

/// Dots showing progress through the selection steps
pub struct StepIndicator<'a> {
    theme: &'a Theme,
    current: usize,
    total: usize,
}

impl<'a> StepIndicator<'a> {
    /// `current` is one-based; dots up to and including it are highlighted
    pub fn new(theme: &'a Theme, current: usize, total: usize) -> Self {
        Self {
            theme,
            current,
            total,
        }
    }

    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let radius = 5.0;
        let gap = 12.0;
        let width = self.total as f32 * radius * 2.0 + self.total.saturating_sub(1) as f32 * gap;
        let (rect, response) = ui.allocate_exact_size(Vec2::new(width, radius * 2.0), Sense::hover());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            for i in 0..self.total {
                let center = Pos2::new(
                    rect.left() + radius + i as f32 * (radius * 2.0 + gap),
                    rect.center().y,
                );
                let color = if i < self.current {
                    self.theme.step_active
                } else {
                    self.theme.step_inactive
                };
                painter.circle_filled(center, radius, color);
            }
        }

        let label = format!("Step {} of {}", self.current, self.total);
        response.widget_info(|| egui::WidgetInfo::labeled(egui::WidgetType::Label, true, &label));
        response
    }
}

/// Intensity selection towers
pub struct IntensityTowers<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> IntensityTowers<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            StepIndicator::new(self.theme, 2, 3).show(ui);
            ui.add_space(self.theme.spacing);
            ui.label(
                RichText::new("How intense is it feeling right now?")
                    .heading()
                    .color(self.theme.text_primary),
            );
            ui.label(
                RichText::new("This helps us tune your breathing pattern.")
                    .color(self.theme.text_muted),
            );
        });
        ui.add_space(self.theme.spacing_lg);

        let selected = self.state.flow.selection().intensity.map(|i| i.id);
        let time = ui.ctx().input(|i| i.time) as f32;
        let mut chosen = None;

        ui.vertical_centered(|ui| {
            ui.horizontal(|ui| {
                let total = INTENSITIES.len() as f32 * (TOWER_WIDTH + self.theme.spacing_lg);
                ui.add_space(((ui.available_width() - total) / 2.0).max(0.0));

                for option in INTENSITIES.iter() {
                    let is_selected = selected == Some(option.id);
                    if self.show_tower(ui, option, is_selected, time).clicked() {
                        chosen = Some(option.id);
                    }
                    ui.add_space(self.theme.spacing_lg);
                }
            });
        });

        if let Some(id) = chosen {
            self.state.select_intensity(id);
        }
    }

    fn show_tower(
        &self,
        ui: &mut egui::Ui,
        option: &IntensityOption,
        is_selected: bool,
        time: f32,
    ) -> egui::Response {
        let (rect, response) =
            ui.allocate_exact_size(Vec2::new(TOWER_WIDTH, TOWER_AREA_HEIGHT), Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let hovered = response.hovered();

            // Slow vertical breathing, staggered per tower
            let sway = 1.0 + 0.025 * (1.0 - ((time - option.delay) / SWAY_PERIOD * TAU).cos());
            let (scale, lift) = if hovered { (1.15, 5.0) } else { (1.0, 0.0) };

            let height = option.height * sway * scale;
            let width = TOWER_WIDTH * 0.8 * scale;
            let bottom = rect.bottom() - 28.0 - lift;
            let tower = Rect::from_min_max(
                Pos2::new(rect.center().x - width / 2.0, bottom - height),
                Pos2::new(rect.center().x + width / 2.0, bottom),
            );

            if hovered {
                painter.rect_filled(tower.expand(6.0), 14.0, option.color.gamma_multiply(0.25));
            }
            painter.rect_filled(tower, 10.0, option.color);
            if is_selected {
                painter.rect_stroke(tower.expand(2.0), 12.0, Stroke::new(2.0, self.theme.primary));
            }

            let text_color = if is_selected {
                self.theme.text_primary
            } else {
                self.theme.text_secondary
            };
            painter.text(
                Pos2::new(rect.center().x, rect.bottom() - 10.0),
                Align2::CENTER_CENTER,
                option.label,
                FontId::proportional(12.0),
                text_color,
            );
        }

        let label = option.label;
        response.widget_info(|| {
            egui::WidgetInfo::selected(egui::WidgetType::SelectableLabel, true, is_selected, label)
        });
        response
    }
}
