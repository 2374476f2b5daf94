//! UI components module
//!
//! This module provides the screens and widgets of the Calmcore wizard.

pub mod breathing_view;
pub mod context_form;
pub mod flower;
pub mod intensity_towers;
pub mod mood_grid;
pub mod recommendation_list;

pub use breathing_view::BreathingView;
pub use context_form::ContextForm;
pub use flower::{ease_in_out, petal_pose, Flower, PetalPose};
pub use intensity_towers::{IntensityTowers, StepIndicator};
pub use mood_grid::MoodGrid;
pub use recommendation_list::{LoadingView, RecommendationList, WarningBox};
