//! Integration layer between the UI and the backend
//!
//! - **config**: application-wide settings
//! - **orchestrator**: async runtime, recommendation fetches and breathing
//!   cycles, reported to the UI over an event channel

pub mod config;
pub mod orchestrator;

pub use config::AppConfig;
pub use orchestrator::{Orchestrator, OrchestratorEvent};
