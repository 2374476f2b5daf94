//! Mock recommendation provider for testing.
//!
//! Returns canned sessions or a canned failure without any network access.

use crate::provider::{RecommendationProvider, RecommendationRequest};
use crate::session::SessionDescriptor;
use crate::{CalmcoreError, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::time::Duration;

/// Mock provider for tests and offline runs.
///
/// Supports:
/// - Canned sessions returned for every request
/// - Simulated errors
/// - Artificial latency
/// - Recording of received requests
#[derive(Debug, Default)]
pub struct MockProvider {
    sessions: Mutex<Vec<SessionDescriptor>>,
    error: Mutex<Option<CalmcoreError>>,
    delay: Option<Duration>,
    requests: Mutex<Vec<RecommendationRequest>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that answers with `sessions`
    pub fn with_sessions(sessions: Vec<SessionDescriptor>) -> Self {
        Self {
            sessions: Mutex::new(sessions),
            ..Self::default()
        }
    }

    /// Create a mock that fails every request with `error`
    pub fn failing(error: CalmcoreError) -> Self {
        Self {
            error: Mutex::new(Some(error)),
            ..Self::default()
        }
    }

    /// Wait `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_sessions(&self, sessions: Vec<SessionDescriptor>) {
        *self.sessions.lock() = sessions;
    }

    /// Fail subsequent requests with `error`, or stop failing with `None`
    pub fn set_error(&self, error: Option<CalmcoreError>) {
        *self.error.lock() = error;
    }

    /// Number of requests received so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<RecommendationRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl RecommendationProvider for MockProvider {
    async fn recommend(&self, request: &RecommendationRequest) -> Result<Vec<SessionDescriptor>> {
        self.requests.lock().push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.error.lock().clone() {
            return Err(error);
        }

        Ok(self.sessions.lock().clone())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
