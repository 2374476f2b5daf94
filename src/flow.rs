//! Wizard flow: mood → intensity → context → recommendation
//!
//! [`SelectionFlow`] is the only writer of [`SelectionState`]. Every
//! operation is a synchronous transition; operations that do not apply to
//! the current screen are rejected and leave the state untouched.

use crate::catalog::{find_intensity, IntensityOption, MoodOption};
use crate::provider::RecommendationRequest;
use crate::{CalmcoreError, Result};
use std::fmt;
use tracing::debug;

/// Wizard screens in order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Mood,
    Intensity,
    Context,
    Recommendation,
}

impl Screen {
    /// One-based position in the wizard
    pub fn step_number(&self) -> usize {
        match self {
            Screen::Mood => 1,
            Screen::Intensity => 2,
            Screen::Context => 3,
            Screen::Recommendation => 4,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Mood => write!(f, "mood"),
            Screen::Intensity => write!(f, "intensity"),
            Screen::Context => write!(f, "context"),
            Screen::Recommendation => write!(f, "recommendation"),
        }
    }
}

/// Choices accumulated across the wizard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub mood: Option<MoodOption>,
    pub intensity: Option<IntensityOption>,
    pub context_text: String,
}

impl SelectionState {
    pub fn is_empty(&self) -> bool {
        self.mood.is_none() && self.intensity.is_none() && self.context_text.is_empty()
    }
}

/// Screen sequencing and selection ownership
#[derive(Debug, Default)]
pub struct SelectionFlow {
    screen: Screen,
    selection: SelectionState,
}

impl SelectionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    fn expect_screen(&self, expected: Screen, action: &str) -> Result<()> {
        if self.screen != expected {
            return Err(CalmcoreError::InvalidNavigation(format!(
                "{} is only possible on the {} screen (current: {})",
                action, expected, self.screen
            )));
        }
        Ok(())
    }

    fn go(&mut self, screen: Screen) {
        debug!("Screen {} -> {}", self.screen, screen);
        self.screen = screen;
    }

    /// Record the mood and move on to intensity
    pub fn select_mood(&mut self, mood: MoodOption) -> Result<()> {
        self.expect_screen(Screen::Mood, "selecting a mood")?;
        self.selection.mood = Some(mood);
        self.go(Screen::Intensity);
        Ok(())
    }

    /// Resolve `intensity_id` against the intensity table and move on to context
    pub fn select_intensity(&mut self, intensity_id: u8) -> Result<()> {
        self.expect_screen(Screen::Intensity, "selecting an intensity")?;
        let intensity =
            find_intensity(intensity_id).ok_or(CalmcoreError::UnknownIntensity(intensity_id))?;
        self.selection.intensity = Some(*intensity);
        self.go(Screen::Context);
        Ok(())
    }

    /// Record the (possibly empty) context and enter the recommendation screen.
    ///
    /// Returns the request the recommendation screen should fetch.
    pub fn submit_context(&mut self, text: impl Into<String>) -> Result<RecommendationRequest> {
        self.expect_screen(Screen::Context, "submitting context")?;
        self.selection.context_text = text.into();
        self.go(Screen::Recommendation);
        Ok(RecommendationRequest::from(&self.selection))
    }

    /// Return from context to intensity, keeping the chosen intensity
    pub fn back(&mut self) -> Result<()> {
        self.expect_screen(Screen::Context, "going back")?;
        self.go(Screen::Intensity);
        Ok(())
    }

    /// Clear every selection and return to the mood screen
    pub fn reset(&mut self) {
        self.selection = SelectionState::default();
        self.go(Screen::Mood);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MOODS;

    #[test]
    fn test_happy_path() {
        let mut flow = SelectionFlow::new();
        assert_eq!(flow.screen(), Screen::Mood);

        flow.select_mood(MOODS[7]).unwrap();
        assert_eq!(flow.screen(), Screen::Intensity);

        flow.select_intensity(2).unwrap();
        assert_eq!(flow.screen(), Screen::Context);
        assert_eq!(flow.selection().intensity.map(|i| i.label), Some("Steady"));

        let request = flow.submit_context("").unwrap();
        assert_eq!(flow.screen(), Screen::Recommendation);
        assert_eq!(request.mood_label(), "Stressed");
        assert_eq!(request.context_label(), "None (General Wellness)");
    }

    #[test]
    fn test_unknown_intensity_keeps_state() {
        let mut flow = SelectionFlow::new();
        flow.select_mood(MOODS[0]).unwrap();

        let err = flow.select_intensity(9).unwrap_err();
        assert!(matches!(err, CalmcoreError::UnknownIntensity(9)));
        assert_eq!(flow.screen(), Screen::Intensity);
        assert!(flow.selection().intensity.is_none());
    }

    #[test]
    fn test_back_keeps_intensity() {
        let mut flow = SelectionFlow::new();
        flow.select_mood(MOODS[1]).unwrap();
        flow.select_intensity(4).unwrap();
        flow.back().unwrap();

        assert_eq!(flow.screen(), Screen::Intensity);
        assert_eq!(flow.selection().intensity.map(|i| i.id), Some(4));
    }

    #[test]
    fn test_out_of_order_actions_rejected() {
        let mut flow = SelectionFlow::new();
        assert!(flow.select_intensity(1).is_err());
        assert!(flow.submit_context("x").is_err());
        assert!(flow.back().is_err());
        assert_eq!(flow.screen(), Screen::Mood);
        assert!(flow.selection().is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut flow = SelectionFlow::new();
        flow.select_mood(MOODS[2]).unwrap();
        flow.select_intensity(3).unwrap();
        flow.submit_context("Can't Sleep").unwrap();

        flow.reset();
        assert_eq!(flow.screen(), Screen::Mood);
        assert!(flow.selection().is_empty());
    }
}
