//! Prompt text for breathing recommendations

use crate::provider::RecommendationRequest;

/// Number of options requested from the model
pub const OPTION_COUNT: usize = 3;

/// Coaching rules applied to every request
pub const COACHING_RULES: &str = r#"PERSONALIZATION:
- Option 1, quick fix: short and effective, usable immediately.
- Option 2, balanced: a standard technique for this mood.
- Option 3, deep dive: longer and more immersive.

When the situation is empty, derive pace and style from mood and intensity:
- High intensity: slower, grounding breaths.
- Low intensity: gentle, rhythmic breaths.
- Anxious moods: longer exhales.
- Low energy moods: energizing inhales.

SAFETY (applies to all options):
- Asthma, tight breathing, COPD or panic: no breath holds (hold = 0), slow nasal inhales, long exhales.
- Anxiety or panic: the exhale must be longer than the inhale (for example 4-0-6 or 4-0-8)."#;

/// Shape of the expected answer
pub const OUTPUT_FORMAT: &str = r#"Return ONLY a JSON array of objects, no markdown:
[
  {
    "id": "option_1",
    "title": "Name of technique",
    "description": "Why this one, in one sentence",
    "difficulty": "Easy" | "Medium" | "Advanced",
    "timings": { "inhale": 4, "hold": 4, "exhale": 4 },
    "instruction": "Short guidance phrase",
    "warning": "Optional safety note",
    "sequence_advice": "For example '10 reps'"
  }
]
Timings are in seconds."#;

/// Build the full prompt for `request`
pub fn build_prompt(request: &RecommendationRequest) -> String {
    format!(
        "Act as an expert breathwork coach. Create {count} distinct personalized breathing exercises for this person:\n\
         - Mood: \"{mood}\"\n\
         - Intensity: \"{intensity}\"\n\
         - Situation: \"{context}\"\n\n\
         {rules}\n\n\
         {format}",
        count = OPTION_COUNT,
        mood = request.mood_label(),
        intensity = request.intensity_label(),
        context = request.context_label(),
        rules = COACHING_RULES,
        format = OUTPUT_FORMAT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{find_intensity, find_mood};

    #[test]
    fn test_prompt_includes_selection() {
        let request = RecommendationRequest::new(
            find_mood("stressed").copied(),
            find_intensity(3).copied(),
            "Panic Attack",
        );
        let prompt = build_prompt(&request);

        assert!(prompt.contains("Mood: \"Stressed\""));
        assert!(prompt.contains("Intensity: \"Intense\""));
        assert!(prompt.contains("Situation: \"Panic Attack\""));
        assert!(prompt.contains("hold = 0"));
    }

    #[test]
    fn test_prompt_defaults_for_empty_selection() {
        let prompt = build_prompt(&RecommendationRequest::new(None, None, "  "));

        assert!(prompt.contains("Mood: \"Neutral\""));
        assert!(prompt.contains("Intensity: \"Medium\""));
        assert!(prompt.contains("None (General Wellness)"));
    }
}
