//! Recommendation provider configuration

use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

/// Environment variable holding the provider credential
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Older name for the credential, still honoured
pub const LEGACY_API_KEY_VAR: &str = "VITE_GEMINI_API_KEY";
pub const MODEL_VAR: &str = "CALMCORE_MODEL";
pub const BASE_URL_VAR: &str = "CALMCORE_API_BASE";
pub const TIMEOUT_VAR: &str = "CALMCORE_TIMEOUT_SECS";

/// Configuration for the generative recommendation provider
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    /// API credential; `None` disables the provider
    api_key: Option<Secret<String>>,

    /// Model name, e.g. "gemini-2.0-flash"
    pub model: String,

    /// API root without a trailing slash
    pub base_url: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Upper bound for one recommendation request
    pub request_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            temperature: 0.9,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ProviderConfig {
    /// Create a configuration with the given credential
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::default().with_api_key(api_key)
    }

    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_blank(API_KEY_VAR).or_else(|| non_blank(LEGACY_API_KEY_VAR)) {
            config = config.with_api_key(key);
        }
        if let Some(model) = non_blank(MODEL_VAR) {
            config.model = model.trim().to_string();
        }
        if let Some(base_url) = non_blank(BASE_URL_VAR) {
            config = config.with_base_url(base_url.trim());
        }
        if let Some(secs) = lookup(TIMEOUT_VAR).and_then(|s| s.trim().parse::<u64>().ok()) {
            if secs > 0 {
                config.request_timeout = Duration::from_secs(secs);
            }
        }

        config
    }

    /// Set the credential; blank values leave the provider disabled
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = if api_key.trim().is_empty() {
            None
        } else {
            Some(Secret::new(api_key.trim().to_string()))
        };
        self
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub(crate) fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret().as_str())
    }
}
