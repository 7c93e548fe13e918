//! Detection of user feedback about a previous response.

use super::{EmotionVector, Priority};

/// Phrases that signal dissatisfaction with, or a correction of, an earlier answer.
/// Matched as substrings of the lower-cased message.
pub const FEEDBACK_MARKERS: &[&str] = &[
    "didn't like",
    "did not like",
    "don't like",
    "not what i asked",
    "not what i wanted",
    "not helpful",
    "wasn't helpful",
    "that's wrong",
    "that is wrong",
    "too long",
    "too short",
    "too vague",
    "too complicated",
    "give me",
    "i want",
    "i need",
    "try again",
    "be more specific",
    "shorter",
    "simpler",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackDetector {
    pub arousal_boost: f64,
    pub confidence_floor: f64,
}

impl Default for FeedbackDetector {
    fn default() -> Self {
        Self {
            arousal_boost: 0.2,
            confidence_floor: 0.7,
        }
    }
}

impl FeedbackDetector {
    pub fn new(arousal_boost: f64, confidence_floor: f64) -> Self {
        Self {
            arousal_boost,
            confidence_floor,
        }
    }

    pub fn contains_feedback(text: &str) -> bool {
        let lowered = text.to_lowercase();
        FEEDBACK_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker))
    }

    /// Escalates `vector` when `text` contains a feedback marker.
    ///
    /// Arousal goes up by the boost (capped at 1.0) and confidence is raised to the
    /// floor. Neither is ever lowered. A vector already flagged is returned as is.
    pub fn apply(&self, text: &str, mut vector: EmotionVector) -> EmotionVector {
        if vector.feedback_detected || !Self::contains_feedback(text) {
            return vector;
        }

        vector.feedback_detected = true;
        vector.priority = Some(Priority::SolveProblem);
        vector.arousal = vector.arousal.max((vector.arousal + self.arousal_boost).min(1.0));
        vector.confidence = vector.confidence.max(self.confidence_floor);
        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::mapper::map_scores;
    use emotion_ai::{Label, Scores};

    fn vector(arousal: f64, confidence: f64) -> EmotionVector {
        EmotionVector {
            arousal,
            confidence,
            ..map_scores(Label::Neutral, Scores::NEUTRAL_FALLBACK)
        }
    }

    #[test]
    fn markers_match_case_insensitively() {
        assert!(FeedbackDetector::contains_feedback("I DIDN'T LIKE that answer"));
        assert!(FeedbackDetector::contains_feedback("Give me the short version"));
        assert!(!FeedbackDetector::contains_feedback("Thanks, that was great"));
    }

    #[test]
    fn feedback_escalates_arousal_and_confidence() {
        let result = FeedbackDetector::default().apply("That was too long", vector(0.3, 0.5));

        assert!(result.feedback_detected);
        assert_eq!(result.priority, Some(Priority::SolveProblem));
        assert!((result.arousal - 0.5).abs() < 1e-9);
        assert_eq!(result.confidence, 0.7);
    }

    #[test]
    fn arousal_is_capped_and_confidence_never_lowered() {
        let result = FeedbackDetector::default().apply("i want more", vector(0.95, 0.9));

        assert_eq!(result.arousal, 1.0);
        assert_eq!(result.confidence, 0.9);
    }

    #[test]
    fn messages_without_markers_are_untouched() {
        let input = vector(0.3, 0.5);
        let result = FeedbackDetector::default().apply("What a lovely day", input.clone());

        assert_eq!(result, input);
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let detector = FeedbackDetector::default();
        let once = detector.apply("not helpful at all", vector(0.3, 0.2));
        let twice = detector.apply("not helpful at all", once.clone());

        assert_eq!(once, twice);
    }

    #[test]
    fn never_decreases_arousal_or_confidence() {
        let detector = FeedbackDetector::new(0.2, 0.7);
        for ai in 0..=10 {
            for ci in 0..=10 {
                let input = vector(ai as f64 / 10.0, ci as f64 / 10.0);
                let result = detector.apply("too short", input.clone());
                assert!(result.arousal >= input.arousal);
                assert!(result.confidence >= input.confidence);
            }
        }
    }
}
