//! Extraction of session descriptors from model output
//!
//! Models wrap JSON in code fences or chatty sentences often enough that the
//! payload has to be cut out of the text before parsing.

use crate::session::SessionDescriptor;
use crate::{CalmcoreError, Result};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Many(Vec<SessionDescriptor>),
    Wrapped {
        #[serde(alias = "options", alias = "sessions")]
        recommendations: Vec<SessionDescriptor>,
    },
    One(SessionDescriptor),
}

/// Locate the outermost JSON array or object in `text`
pub fn extract_json_payload(text: &str) -> Option<&str> {
    let start = text.find(|c: char| c == '[' || c == '{')?;
    let close = if text[start..].starts_with('[') { ']' } else { '}' };
    let end = text.rfind(close)?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parse model output into descriptors.
///
/// Accepts a bare array, an object wrapping one, or a single descriptor
/// (returned as a one-element list).
pub fn parse_sessions(text: &str) -> Result<Vec<SessionDescriptor>> {
    let payload = extract_json_payload(text).ok_or_else(|| {
        CalmcoreError::ProviderResponseError("no JSON found in model output".to_string())
    })?;

    let sessions = match serde_json::from_str::<Payload>(payload)? {
        Payload::Many(sessions) => sessions,
        Payload::Wrapped { recommendations } => recommendations,
        Payload::One(session) => vec![session],
    };

    if sessions.is_empty() {
        return Err(CalmcoreError::ProviderResponseError(
            "model returned an empty session list".to_string(),
        ));
    }

    Ok(sessions)
}
