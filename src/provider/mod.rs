//! Breathing session recommendations
//!
//! This module turns the user's selection into a list of
//! [`SessionDescriptor`]s.
//!
//! # Architecture
//!
//! - **config**: credential, model and timeout settings
//! - **gemini**: the generative REST provider
//! - **mock**: canned provider for tests
//! - **parse**: cutting the JSON payload out of model output
//! - **prompts**: the coaching prompt
//!
//! Providers are fallible. [`Recommender`] sits in front of them and never
//! fails: a missing credential yields a single default session, and any
//! provider error or timeout yields the three classic fallback sessions.

pub mod config;
pub mod gemini;
pub mod mock;
pub mod parse;
pub mod prompts;

pub use config::ProviderConfig;
pub use gemini::GeminiProvider;
pub use mock::MockProvider;
pub use parse::{extract_json_payload, parse_sessions};
pub use prompts::build_prompt;

use crate::catalog::{IntensityOption, MoodOption};
use crate::flow::SelectionState;
use crate::session::{fallback_sessions, missing_credential_sessions, SessionDescriptor};
use crate::{CalmcoreError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Everything the provider gets to see about the user
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub mood: Option<MoodOption>,
    pub intensity: Option<IntensityOption>,
    pub context: String,
}

impl RecommendationRequest {
    pub fn new(
        mood: Option<MoodOption>,
        intensity: Option<IntensityOption>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            mood,
            intensity,
            context: context.into(),
        }
    }

    pub fn mood_label(&self) -> &str {
        self.mood.as_ref().map_or("Neutral", |m| m.label)
    }

    pub fn intensity_label(&self) -> &str {
        self.intensity.as_ref().map_or("Medium", |i| i.label)
    }

    pub fn context_label(&self) -> &str {
        let context = self.context.trim();
        if context.is_empty() {
            "None (General Wellness)"
        } else {
            context
        }
    }
}

impl From<&SelectionState> for RecommendationRequest {
    fn from(selection: &SelectionState) -> Self {
        Self::new(
            selection.mood,
            selection.intensity,
            selection.context_text.clone(),
        )
    }
}

/// A source of breathing session recommendations
#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Produce recommendations for `request`
    async fn recommend(&self, request: &RecommendationRequest) -> Result<Vec<SessionDescriptor>>;

    /// Short provider name for logs
    fn name(&self) -> &'static str;
}

/// Infallible front for a recommendation provider
#[derive(Clone)]
pub struct Recommender {
    provider: Option<Arc<dyn RecommendationProvider>>,
    timeout: Duration,
}

impl Recommender {
    /// Wrap a provider
    pub fn new(provider: Arc<dyn RecommendationProvider>) -> Self {
        Self {
            provider: Some(provider),
            timeout: ProviderConfig::default().request_timeout,
        }
    }

    /// A recommender without a provider; always serves the default session
    pub fn unconfigured() -> Self {
        Self {
            provider: None,
            timeout: ProviderConfig::default().request_timeout,
        }
    }

    /// Build the Gemini-backed recommender, or an unconfigured one when the
    /// credential is missing
    pub fn from_config(config: ProviderConfig) -> Self {
        let timeout = config.request_timeout;
        match GeminiProvider::from_config(config) {
            Ok(provider) => {
                info!("Recommendation provider ready: {}", provider.name());
                Self::new(Arc::new(provider)).with_timeout(timeout)
            }
            Err(e) => {
                warn!("Recommendations disabled, default session will be used: {}", e);
                Self::unconfigured().with_timeout(timeout)
            }
        }
    }

    /// Set the upper bound for one provider call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Fetch recommendations, substituting the documented defaults on any failure.
    ///
    /// Every returned descriptor has timings the scheduler accepts.
    pub async fn recommend(&self, request: &RecommendationRequest) -> Vec<SessionDescriptor> {
        let Some(provider) = &self.provider else {
            warn!("No recommendation provider configured, serving default session");
            return missing_credential_sessions();
        };

        debug!(
            "Requesting recommendations from {} (mood: {}, intensity: {}, context: {:?})",
            provider.name(),
            request.mood_label(),
            request.intensity_label(),
            request.context
        );

        let outcome = match tokio::time::timeout(self.timeout, provider.recommend(request)).await {
            Ok(result) => result,
            Err(_) => Err(CalmcoreError::ProviderTimeout {
                elapsed_ms: self.timeout.as_millis() as u64,
            }),
        };

        match outcome {
            Ok(sessions) if !sessions.is_empty() => {
                info!("Received {} sessions from {}", sessions.len(), provider.name());
                sessions
                    .into_iter()
                    .enumerate()
                    .map(|(i, s)| s.sanitized(i))
                    .collect()
            }
            Ok(_) => {
                error!("{} returned no sessions, serving fallback", provider.name());
                fallback_sessions()
            }
            Err(e) if e.is_recoverable() => {
                warn!("Recommendation request to {} failed: {}", provider.name(), e);
                fallback_sessions()
            }
            Err(e) => {
                error!("Recommendation request to {} failed: {}", provider.name(), e);
                fallback_sessions()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{find_intensity, find_mood};
    use crate::session::TimingsTriple;

    #[test]
    fn test_request_labels() {
        let request = RecommendationRequest::new(
            find_mood("angry").copied(),
            find_intensity(1).copied(),
            "  Need Focus ",
        );
        assert_eq!(request.mood_label(), "Angry");
        assert_eq!(request.intensity_label(), "Gentle");
        assert_eq!(request.context_label(), "Need Focus");
    }

    #[test]
    fn test_requests_compare_by_selection() {
        let a = RecommendationRequest::new(find_mood("hurt").copied(), find_intensity(4).copied(), "");
        let b = RecommendationRequest::new(find_mood("hurt").copied(), find_intensity(4).copied(), "");
        let c = RecommendationRequest::new(find_mood("hurt").copied(), find_intensity(3).copied(), "");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_request_from_selection() {
        let selection = SelectionState {
            mood: find_mood("bored").copied(),
            intensity: None,
            context_text: "Post Workout".to_string(),
        };
        let request = RecommendationRequest::from(&selection);
        assert_eq!(request.mood_label(), "Bored");
        assert_eq!(request.intensity_label(), "Medium");
        assert_eq!(request.context, "Post Workout");
    }

    #[tokio::test]
    async fn test_unconfigured_serves_default() {
        let sessions = Recommender::unconfigured()
            .recommend(&RecommendationRequest::new(None, None, ""))
            .await;
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].timings, TimingsTriple::new(4.0, 4.0, 4.0));
    }

    #[tokio::test]
    async fn test_from_config_without_key_is_unconfigured() {
        let recommender = Recommender::from_config(ProviderConfig::default());
        assert!(!recommender.is_configured());
    }
}
