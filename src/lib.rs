pub mod catalog;
pub mod flow;
pub mod integration;
pub mod provider;
pub mod scheduler;
pub mod session;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum CalmcoreError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Provider request error: {0}")]
    ProviderRequestError(String),

    #[error("Provider response error: {0}")]
    ProviderResponseError(String),

    #[error("Provider timed out after {elapsed_ms}ms")]
    ProviderTimeout { elapsed_ms: u64 },

    #[error("Invalid timings: {0}")]
    InvalidTimings(String),

    #[error("Unknown intensity id: {0}")]
    UnknownIntensity(u8),

    #[error("Invalid navigation: {0}")]
    InvalidNavigation(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),
}

impl From<std::io::Error> for CalmcoreError {
    fn from(e: std::io::Error) -> Self {
        CalmcoreError::RuntimeError(e.to_string())
    }
}

impl From<reqwest::Error> for CalmcoreError {
    fn from(e: reqwest::Error) -> Self {
        CalmcoreError::ProviderRequestError(e.to_string())
    }
}

impl From<serde_json::Error> for CalmcoreError {
    fn from(e: serde_json::Error) -> Self {
        CalmcoreError::ProviderResponseError(e.to_string())
    }
}

impl CalmcoreError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Missing credentials stay missing until restart
            CalmcoreError::ConfigError(_) => false,
            // Network hiccups and bad model output are transient
            CalmcoreError::ProviderRequestError(_) => true,
            CalmcoreError::ProviderResponseError(_) => true,
            CalmcoreError::ProviderTimeout { .. } => true,
            // Rejected before anything starts, caller picks other timings
            CalmcoreError::InvalidTimings(_) => true,
            CalmcoreError::UnknownIntensity(_) => true,
            CalmcoreError::InvalidNavigation(_) => true,
            CalmcoreError::RuntimeError(_) => false,
            CalmcoreError::ChannelError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            CalmcoreError::ConfigError(_) => {
                "Personalized sessions are unavailable. Using a standard session.".to_string()
            }
            CalmcoreError::ProviderRequestError(_)
            | CalmcoreError::ProviderResponseError(_)
            | CalmcoreError::ProviderTimeout { .. } => {
                "Could not reach the coach. Showing classic sessions instead.".to_string()
            }
            CalmcoreError::InvalidTimings(_) => {
                "This session has no breathing rhythm. Please pick another.".to_string()
            }
            CalmcoreError::UnknownIntensity(_) => "Please pick an intensity level.".to_string(),
            CalmcoreError::InvalidNavigation(_) => "That step is not available yet.".to_string(),
            CalmcoreError::RuntimeError(_) | CalmcoreError::ChannelError(_) => {
                "Something went wrong. Please restart the application.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CalmcoreError>;
