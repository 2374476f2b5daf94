//! UI components and application module
//!
//! This module provides the egui/eframe-based user interface for Calmcore.

mod app;
pub mod components;
mod state;
mod theme;

pub use app::CalmcoreApp;
pub use state::{AppState, RecommendationStage};
pub use theme::Theme;

use crate::integration::{AppConfig, Orchestrator};
use tracing::info;

/// Open the main window and run until it is closed
pub fn run(config: AppConfig) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::new(config.clone())?;
    if !orchestrator.is_configured() {
        info!("Running without a recommendation provider");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title("Calmcore"),
        ..Default::default()
    };

    eframe::run_native(
        "Calmcore",
        options,
        Box::new(move |cc| Ok(Box::new(CalmcoreApp::new(cc, orchestrator)))),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {}", e))
}
