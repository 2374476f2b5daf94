//! Breathing flower
//!
//! Six petals that close while inhaling, stay closed while holding and
//! bloom while exhaling. The pose math is kept separate from painting so it
//! can be checked without a UI.

use crate::scheduler::BreathPhase;
use crate::ui::theme::Theme;
use egui::{Color32, Pos2, Rect, Sense, Shape, Stroke, Vec2};
use std::f32::consts::TAU;

/// Petal length at full bloom, in points
const PETAL_LENGTH: f32 = 80.0;
/// Petal width at full bloom, in points
const PETAL_WIDTH: f32 = 40.0;
const CENTER_RADIUS: f32 = 14.0;
/// Outline points per petal
const PETAL_SEGMENTS: usize = 32;

/// Transform of a single petal relative to its resting direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetalPose {
    pub scale_x: f32,
    pub scale_y: f32,
    /// Extra rotation in degrees
    pub rotation: f32,
    /// Offset along the petal axis; negative moves outward
    pub translate_y: f32,
    pub opacity: f32,
}

impl PetalPose {
    /// Fully bloomed
    pub const OPEN: PetalPose = PetalPose {
        scale_x: 1.0,
        scale_y: 1.0,
        rotation: 0.0,
        translate_y: -30.0,
        opacity: 1.0,
    };

    /// Folded into a bud
    pub const CLOSED: PetalPose = PetalPose {
        scale_x: 0.4,
        scale_y: 0.6,
        rotation: 90.0,
        translate_y: 0.0,
        opacity: 0.9,
    };

    fn lerp(from: PetalPose, to: PetalPose, t: f32) -> PetalPose {
        let mix = |a: f32, b: f32| a * (1.0 - t) + b * t;
        PetalPose {
            scale_x: mix(from.scale_x, to.scale_x),
            scale_y: mix(from.scale_y, to.scale_y),
            rotation: mix(from.rotation, to.rotation),
            translate_y: mix(from.translate_y, to.translate_y),
            opacity: mix(from.opacity, to.opacity),
        }
    }
}

/// Cubic ease-in-out on `0.0..=1.0`
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Petal pose `progress` of the way through `phase`
pub fn petal_pose(phase: BreathPhase, progress: f32) -> PetalPose {
    let t = ease_in_out(progress);
    match phase {
        BreathPhase::Inhale => PetalPose::lerp(PetalPose::OPEN, PetalPose::CLOSED, t),
        BreathPhase::Hold => PetalPose::CLOSED,
        BreathPhase::Exhale => PetalPose::lerp(PetalPose::CLOSED, PetalPose::OPEN, t),
    }
}

/// Outline of petal `index` around `center`
fn petal_outline(center: Pos2, index: usize, pose: PetalPose) -> Vec<Pos2> {
    let half_width = PETAL_WIDTH * pose.scale_x / 2.0;
    let half_length = PETAL_LENGTH * pose.scale_y / 2.0;
    // Petals grow upward from the center before rotation
    let mid_y = -half_length + pose.translate_y;

    let angle = (index as f32 * 60.0 + pose.rotation).to_radians();
    let (sin, cos) = angle.sin_cos();

    (0..PETAL_SEGMENTS)
        .map(|i| {
            let t = i as f32 / PETAL_SEGMENTS as f32 * TAU;
            let x = half_width * t.cos();
            let y = mid_y + half_length * t.sin();
            center + Vec2::new(x * cos - y * sin, x * sin + y * cos)
        })
        .collect()
}

/// Flower widget driven by the current breathing phase
pub struct Flower<'a> {
    theme: &'a Theme,
    pose: PetalPose,
    size: f32,
    /// Pulse the center instead of holding it still
    pulsing: bool,
    label: String,
}

impl<'a> Flower<'a> {
    pub fn new(theme: &'a Theme, phase: BreathPhase, progress: f32) -> Self {
        Self {
            theme,
            pose: petal_pose(phase, progress),
            size: 260.0,
            pulsing: false,
            label: format!("Breathing flower: {}", phase),
        }
    }

    /// A closed bud with a pulsing center, shown while loading
    pub fn loading(theme: &'a Theme) -> Self {
        Self {
            theme,
            pose: PetalPose::CLOSED,
            size: 160.0,
            pulsing: true,
            label: "Loading flower".to_string(),
        }
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(self.size), Sense::hover());

        if ui.is_rect_visible(rect) {
            self.paint(ui, rect);
        }

        let label = self.label;
        response.widget_info(|| egui::WidgetInfo::labeled(egui::WidgetType::Label, true, &label));
        response
    }

    fn paint(&self, ui: &egui::Ui, rect: Rect) {
        let painter = ui.painter();
        let center = rect.center();
        let scale = self.size / 260.0;

        for (index, color) in self.theme.petals.iter().enumerate() {
            let points = petal_outline(Pos2::ZERO, index, self.pose)
                .into_iter()
                .map(|p| center + p.to_vec2() * scale)
                .collect();
            painter.add(Shape::convex_polygon(
                points,
                color.gamma_multiply(self.pose.opacity),
                Stroke::new(1.0, Color32::from_white_alpha(60)),
            ));
        }

        let pulse = if self.pulsing {
            let t = ui.ctx().input(|i| i.time) as f32;
            1.0 + 0.1 * (1.0 - (t * std::f32::consts::PI).cos())
        } else {
            1.0
        };
        painter.circle_filled(center, CENTER_RADIUS * scale * pulse, self.theme.flower_center);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_in_out_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
        assert_eq!(ease_in_out(-1.0), 0.0);
        assert_eq!(ease_in_out(2.0), 1.0);
    }

    #[test]
    fn test_inhale_closes_and_exhale_blooms() {
        assert_eq!(petal_pose(BreathPhase::Inhale, 0.0), PetalPose::OPEN);
        assert_eq!(petal_pose(BreathPhase::Inhale, 1.0), PetalPose::CLOSED);
        assert_eq!(petal_pose(BreathPhase::Exhale, 0.0), PetalPose::CLOSED);
        assert_eq!(petal_pose(BreathPhase::Exhale, 1.0), PetalPose::OPEN);
    }

    #[test]
    fn test_hold_stays_closed() {
        for progress in [0.0, 0.3, 1.0] {
            assert_eq!(petal_pose(BreathPhase::Hold, progress), PetalPose::CLOSED);
        }
    }

    #[test]
    fn test_mid_inhale_is_between_poses() {
        let pose = petal_pose(BreathPhase::Inhale, 0.5);
        assert!(pose.scale_x < 1.0 && pose.scale_x > 0.4);
        assert!((pose.rotation - 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_petals_spread_evenly() {
        let tips: Vec<Pos2> = (0..6)
            .map(|i| {
                let outline = petal_outline(Pos2::ZERO, i, PetalPose::OPEN);
                // Quarter turn into the outline is the outermost point
                outline[PETAL_SEGMENTS * 3 / 4]
            })
            .collect();
        let radius = tips[0].to_vec2().length();
        for tip in &tips {
            assert!((tip.to_vec2().length() - radius).abs() < 1e-3);
        }
        assert!((tips[0].x).abs() < 1e-3 && tips[0].y < 0.0);
    }
}
