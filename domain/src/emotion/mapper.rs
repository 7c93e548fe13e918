//! Sentiment classification to emotion vector mapping.

use super::{round2, EmotionVector};
use emotion_ai::{Classification, Label, Scores};

/// Static per-sentiment parameters: display label, base valence and arousal, and
/// the response used when no generated text is available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmotionProfile {
    pub label: &'static str,
    pub base_valence: f64,
    pub base_arousal: f64,
    pub response_template: &'static str,
}

const POSITIVE: EmotionProfile = EmotionProfile {
    label: "Joy / Optimism",
    base_valence: 0.8,
    base_arousal: 0.6,
    response_template: "That's wonderful! What made you feel so positive about this?",
};

const NEGATIVE: EmotionProfile = EmotionProfile {
    label: "Sadness / Anger / Fear",
    base_valence: -0.8,
    base_arousal: 0.7,
    response_template:
        "I'm sorry to hear that. Would you like to talk about what's troubling you?",
};

const NEUTRAL: EmotionProfile = EmotionProfile {
    label: "Calm / Indifference",
    base_valence: 0.0,
    base_arousal: 0.2,
    response_template:
        "It sounds like you're in a balanced state. How are you feeling overall?",
};

const MIXED: EmotionProfile = EmotionProfile {
    label: "Conflicted / Uncertain",
    base_valence: 0.2,
    base_arousal: 0.5,
    response_template: "You seem to have mixed feelings about this. Can you tell me more about what's on your mind?",
};

impl EmotionProfile {
    pub fn for_label(label: Label) -> &'static EmotionProfile {
        match label {
            Label::Positive => &POSITIVE,
            Label::Negative => &NEGATIVE,
            Label::Neutral => &NEUTRAL,
            Label::Mixed => &MIXED,
        }
    }
}

/// Maps a classification to an emotion vector.
///
/// `confidence` is the highest class probability; valence and arousal are the
/// profile's base values scaled by it and rounded to two decimals.
pub fn map(classification: &Classification) -> EmotionVector {
    map_scores(classification.label, classification.scores)
}

pub fn map_scores(label: Label, scores: Scores) -> EmotionVector {
    let profile = EmotionProfile::for_label(label);
    let confidence = scores.max();

    EmotionVector {
        label: profile.label.to_string(),
        valence: round2(profile.base_valence * confidence),
        arousal: round2(profile.base_arousal * confidence),
        confidence,
        sentiment_label: label,
        sentiment_scores: scores,
        feedback_detected: false,
        priority: None,
    }
}

/// Vector used when the sentiment collaborator failed.
pub fn neutral_fallback() -> EmotionVector {
    map(&Classification::neutral_fallback())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(positive: f64, negative: f64, neutral: f64, mixed: f64) -> Scores {
        Scores {
            positive,
            negative,
            neutral,
            mixed,
        }
    }

    #[test]
    fn positive_message_maps_to_joy() {
        let vector = map_scores(Label::Positive, scores(0.9, 0.02, 0.05, 0.03));

        assert_eq!(vector.label, "Joy / Optimism");
        assert_eq!(vector.confidence, 0.9);
        assert_eq!(vector.valence, 0.72);
        assert_eq!(vector.arousal, 0.54);
        assert!(!vector.feedback_detected);
    }

    #[test]
    fn negative_message_scales_the_negative_profile() {
        let vector = map_scores(Label::Negative, scores(0.05, 0.85, 0.05, 0.05));

        assert_eq!(vector.confidence, 0.85);
        assert_eq!(vector.valence, -0.68);
        // 0.7 * 0.85 is stored just below 0.595
        assert_eq!(vector.arousal, 0.59);
    }

    #[test]
    fn confidence_is_the_highest_score_even_when_the_label_disagrees() {
        let vector = map_scores(Label::Mixed, scores(0.6, 0.1, 0.1, 0.2));

        assert_eq!(vector.confidence, 0.6);
        assert_eq!(vector.valence, round2(0.2 * 0.6));
    }

    #[test]
    fn valence_is_base_valence_times_confidence_for_every_label() {
        let distribution = scores(0.1, 0.2, 0.3, 0.4);
        for label in Label::ALL {
            let vector = map_scores(label, distribution);
            let profile = EmotionProfile::for_label(label);
            assert!((vector.valence - profile.base_valence * 0.4).abs() <= 0.005);
            assert!((vector.arousal - profile.base_arousal * 0.4).abs() <= 0.005);
            assert_eq!(vector.confidence, 0.4);
        }
    }

    #[test]
    fn neutral_fallback_uses_the_fallback_distribution() {
        let vector = neutral_fallback();

        assert_eq!(vector.sentiment_label, Label::Neutral);
        assert_eq!(vector.sentiment_scores, Scores::NEUTRAL_FALLBACK);
        assert_eq!(vector.confidence, 0.5);
        assert_eq!(vector.valence, 0.0);
        assert_eq!(vector.arousal, 0.1);
    }
}
