//! Configuration for the integration layer
//!
//! Collects provider and window settings in one place.

use crate::provider::ProviderConfig;
use tracing::debug;

/// Configuration for the complete application
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Recommendation provider settings
    pub provider: ProviderConfig,

    /// Initial window size in points
    pub window_size: [f32; 2],

    /// Smallest window size in points
    pub min_window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            window_size: [480.0, 760.0],
            min_window_size: [360.0, 560.0],
        }
    }
}

impl AppConfig {
    /// Load settings from the environment, reading `.env` first when present
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => debug!("Ignoring unreadable .env file: {}", e),
        }

        Self {
            provider: ProviderConfig::from_env(),
            ..Self::default()
        }
    }

    /// Set the provider configuration
    pub fn with_provider(mut self, provider: ProviderConfig) -> Self {
        self.provider = provider;
        self
    }

    /// Set the initial window size
    pub fn with_window_size(mut self, width: f32, height: f32) -> Self {
        self.window_size = [width, height];
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(!config.provider.has_credential());
        assert!(config.window_size[0] >= config.min_window_size[0]);
        assert!(config.window_size[1] >= config.min_window_size[1]);
    }

    #[test]
    fn test_config_builder() {
        let config = AppConfig::default()
            .with_provider(ProviderConfig::new("key"))
            .with_window_size(600.0, 800.0);

        assert!(config.provider.has_credential());
        assert_eq!(config.window_size, [600.0, 800.0]);
    }
}
