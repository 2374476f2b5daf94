//! Mood grid component
//!
//! Twelve colored shapes in a 3×4 grid. Clicking one selects the mood and
//! advances the wizard.

use crate::catalog::{MoodOption, MoodShape, MOODS};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, RichText, Sense, Shape, Stroke, Vec2};
use std::f32::consts::{PI, TAU};

const CELL_SIZE: Vec2 = Vec2::new(96.0, 112.0);
const SHAPE_SIZE: f32 = 56.0;
/// Height of the idle bob, in points
const BOB_HEIGHT: f32 = 8.0;

/// Mood selection grid
pub struct MoodGrid<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> MoodGrid<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("WHAT'S YOUR MOOD?")
                    .heading()
                    .color(self.theme.text_primary),
            );
        });
        ui.add_space(self.theme.spacing_lg);

        let time = ui.ctx().input(|i| i.time) as f32;
        let mut chosen = None;

        ui.vertical_centered(|ui| {
            egui::Grid::new("mood_grid")
                .num_columns(3)
                .spacing(Vec2::splat(self.theme.spacing_sm))
                .show(ui, |ui| {
                    for (index, mood) in MOODS.iter().enumerate() {
                        if self.show_mood(ui, index, mood, time).clicked() {
                            chosen = Some(*mood);
                        }
                        if index % 3 == 2 {
                            ui.end_row();
                        }
                    }
                });
        });

        if let Some(mood) = chosen {
            self.state.select_mood(mood);
        }
    }

    fn show_mood(&self, ui: &mut egui::Ui, index: usize, mood: &MoodOption, time: f32) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(CELL_SIZE, Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();

            // Each mood bobs with its own period and phase offset
            let period = 3.0 + (index % 3) as f32;
            let bob = ((time - index as f32 * 0.1) / period * TAU).sin().abs() * BOB_HEIGHT;

            let scale = if response.hovered() { 1.1 } else { 1.0 };
            let center = Pos2::new(rect.center().x, rect.top() + SHAPE_SIZE / 2.0 + 8.0 - bob);

            if response.hovered() {
                painter.circle_filled(center, SHAPE_SIZE * 0.7, mood.color.gamma_multiply(0.15));
            }
            paint_shape(painter, mood.shape, center, SHAPE_SIZE * scale, mood.color);

            painter.text(
                Pos2::new(rect.center().x, rect.bottom() - 12.0),
                Align2::CENTER_CENTER,
                mood.label,
                FontId::proportional(13.0),
                self.theme.text_secondary,
            );
        }

        let label = mood.label;
        response.widget_info(|| egui::WidgetInfo::labeled(egui::WidgetType::Button, true, label));
        response
    }
}

/// Fill a closed star-shaped outline as a triangle fan around `center`
fn fill_fan(painter: &Painter, center: Pos2, outline: &[Pos2], color: Color32) {
    for (i, a) in outline.iter().enumerate() {
        let b = outline[(i + 1) % outline.len()];
        painter.add(Shape::convex_polygon(vec![center, *a, b], color, Stroke::NONE));
    }
}

/// Like [`fill_fan`] but leaves the gap between the last and first point open
fn fill_open_fan(painter: &Painter, center: Pos2, arc: &[Pos2], color: Color32) {
    for pair in arc.windows(2) {
        painter.add(Shape::convex_polygon(vec![center, pair[0], pair[1]], color, Stroke::NONE));
    }
}

/// Points at `radius(angle)` around `center`, starting at the top
fn radial_outline(center: Pos2, segments: usize, radius: impl Fn(f32) -> f32) -> Vec<Pos2> {
    (0..segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * TAU - PI / 2.0;
            center + Vec2::angled(angle) * radius(angle)
        })
        .collect()
}

fn paint_shape(painter: &Painter, shape: MoodShape, center: Pos2, size: f32, color: Color32) {
    let r = size / 2.0;
    match shape {
        MoodShape::Circle => {
            painter.circle_filled(center, r, color);
        }
        MoodShape::Flower => {
            for i in 0..5 {
                let offset = Vec2::angled(i as f32 / 5.0 * TAU - PI / 2.0) * r * 0.5;
                painter.circle_filled(center + offset, r * 0.5, color);
            }
            painter.circle_filled(center, r * 0.35, color.gamma_multiply(0.8));
        }
        MoodShape::Cloud => {
            painter.circle_filled(center + Vec2::new(-r * 0.45, r * 0.15), r * 0.5, color);
            painter.circle_filled(center + Vec2::new(r * 0.45, r * 0.15), r * 0.5, color);
            painter.circle_filled(center + Vec2::new(0.0, -r * 0.2), r * 0.6, color);
        }
        MoodShape::Star => {
            let outline = radial_outline(center, 10, |a| {
                let spike = ((a + PI / 2.0) / (TAU / 10.0)).round() as i32;
                if spike % 2 == 0 {
                    r
                } else {
                    r * 0.45
                }
            });
            fill_fan(painter, center, &outline, color);
        }
        MoodShape::Blob => {
            let outline = radial_outline(center, 48, |a| r * (0.85 + 0.12 * (3.0 * a).sin()));
            fill_fan(painter, center, &outline, color);
        }
        MoodShape::Hexagon => {
            let outline = radial_outline(center, 6, |_| r);
            painter.add(Shape::convex_polygon(outline, color, Stroke::NONE));
        }
        MoodShape::CircleCut => {
            // Upper two thirds of a circle
            let outline: Vec<Pos2> = (0..=32)
                .map(|i| {
                    let angle = PI * 0.8 + i as f32 / 32.0 * PI * 1.4;
                    center + Vec2::angled(angle) * r
                })
                .collect();
            painter.add(Shape::convex_polygon(outline, color, Stroke::NONE));
        }
        MoodShape::Triangle => {
            let outline = radial_outline(center, 3, |_| r);
            painter.add(Shape::convex_polygon(outline, color, Stroke::NONE));
        }
        MoodShape::SquareRounded => {
            painter.rect_filled(Rect::from_center_size(center, Vec2::splat(size * 0.85)), r * 0.35, color);
        }
        MoodShape::CircleOff => {
            painter.circle_stroke(center, r * 0.8, Stroke::new(r * 0.3, color));
        }
        MoodShape::WavySquare => {
            let outline = radial_outline(center, 64, |a| {
                let corner = (a.cos().abs().max(a.sin().abs())).recip();
                r * 0.8 * corner.min(1.3) * (1.0 + 0.05 * (8.0 * a).sin())
            });
            fill_fan(painter, center, &outline, color);
        }
        MoodShape::Slice => {
            // Three quarters of a circle, open to the upper right
            let arc: Vec<Pos2> = (0..=36)
                .map(|i| {
                    let angle = i as f32 / 36.0 * PI * 1.5;
                    center + Vec2::angled(angle) * r
                })
                .collect();
            fill_open_fan(painter, center, &arc, color);
        }
    }
}
