//! Response strategy classification.
//!
//! The (valence, arousal) plane is split into bands that depend on how sure the
//! classifier was. Rules are evaluated in order and the first match wins, so a
//! high confidence point that falls between the wide high-confidence quadrants
//! drops through to the narrower moderate bands.
//!
//! Boundary convention: high-confidence quadrants are closed on both axes
//! (`>= 0.6`, `<= -0.6`, `>= 0.6`, `<= 0.4`); moderate and low bands are closed
//! on valence and half-open on arousal at 0.5 (`>= 0.5` energetic, `< 0.5` calm).
//! Confidence tiers are `> 0.7`, `> 0.4` and `<= 0.4`.

use super::EmotionVector;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strategy {
    HighlyExcitedDetailedExploration,
    HighlyStressedUrgentSupport,
    HighlyDepressedGentleSupport,
    HighlyContentDeepConversation,
    ExcitedDetailedSearch,
    StressedUrgentClear,
    BoredSimpleClear,
    CalmEngagingConversation,
    UncertainButEnergeticExploration,
    UncertainCalmGuidance,
    MixedEmotionsAdaptiveSupport,
    AdaptiveContextual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    High,
    Moderate,
    Low,
}

impl ConfidenceTier {
    pub fn of(confidence: f64) -> Self {
        if confidence > 0.7 {
            ConfidenceTier::High
        } else if confidence > 0.4 {
            ConfidenceTier::Moderate
        } else {
            ConfidenceTier::Low
        }
    }

    /// Tiers a confidence value may be classified under, most specific first.
    /// High confidence points that miss every high band are still eligible for
    /// the moderate bands.
    fn eligible(confidence: f64) -> &'static [ConfidenceTier] {
        match Self::of(confidence) {
            ConfidenceTier::High => &[ConfidenceTier::High, ConfidenceTier::Moderate],
            ConfidenceTier::Moderate => &[ConfidenceTier::Moderate],
            ConfidenceTier::Low => &[ConfidenceTier::Low],
        }
    }
}

/// One band of the classifier: a tier plus a predicate over (valence, arousal).
pub struct Rule {
    pub tier: ConfidenceTier,
    pub strategy: Strategy,
    pub matches: fn(f64, f64) -> bool,
}

pub static RULES: [Rule; 11] = [
    Rule {
        tier: ConfidenceTier::High,
        strategy: Strategy::HighlyExcitedDetailedExploration,
        matches: |v, a| v >= 0.6 && a >= 0.6,
    },
    Rule {
        tier: ConfidenceTier::High,
        strategy: Strategy::HighlyStressedUrgentSupport,
        matches: |v, a| v <= -0.6 && a >= 0.6,
    },
    Rule {
        tier: ConfidenceTier::High,
        strategy: Strategy::HighlyDepressedGentleSupport,
        matches: |v, a| v <= -0.6 && a <= 0.4,
    },
    Rule {
        tier: ConfidenceTier::High,
        strategy: Strategy::HighlyContentDeepConversation,
        matches: |v, a| v >= 0.6 && a <= 0.4,
    },
    Rule {
        tier: ConfidenceTier::Moderate,
        strategy: Strategy::ExcitedDetailedSearch,
        matches: |v, a| v >= 0.3 && a >= 0.5,
    },
    Rule {
        tier: ConfidenceTier::Moderate,
        strategy: Strategy::StressedUrgentClear,
        matches: |v, a| v <= -0.3 && a >= 0.5,
    },
    Rule {
        tier: ConfidenceTier::Moderate,
        strategy: Strategy::BoredSimpleClear,
        matches: |v, a| v <= -0.3 && a < 0.5,
    },
    Rule {
        tier: ConfidenceTier::Moderate,
        strategy: Strategy::CalmEngagingConversation,
        matches: |v, a| v >= 0.3 && a < 0.5,
    },
    Rule {
        tier: ConfidenceTier::Low,
        strategy: Strategy::UncertainButEnergeticExploration,
        matches: |v, a| (-0.2..=0.2).contains(&v) && a >= 0.5,
    },
    Rule {
        tier: ConfidenceTier::Low,
        strategy: Strategy::UncertainCalmGuidance,
        matches: |v, a| (-0.2..=0.2).contains(&v) && a < 0.5,
    },
    Rule {
        tier: ConfidenceTier::Low,
        strategy: Strategy::MixedEmotionsAdaptiveSupport,
        matches: |_, _| true,
    },
];

/// Picks the response strategy for an emotional state. Total: points no band
/// claims get [`Strategy::AdaptiveContextual`].
pub fn classify(valence: f64, arousal: f64, confidence: f64) -> Strategy {
    ConfidenceTier::eligible(confidence)
        .iter()
        .flat_map(|tier| RULES.iter().filter(move |rule| rule.tier == *tier))
        .find(|rule| (rule.matches)(valence, arousal))
        .map(|rule| rule.strategy)
        .unwrap_or(Strategy::AdaptiveContextual)
}

pub fn classify_vector(vector: &EmotionVector) -> Strategy {
    classify(vector.valence, vector.arousal, vector.confidence)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResponseLength {
    Brief,
    Moderate,
    Detailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuestionPosture {
    /// Do not ask questions; answer or act.
    Avoid,
    /// At most one question, only if it unblocks the user.
    Minimal,
    /// Ask one open question to keep the conversation going.
    Open,
    /// Ask exploratory follow-up questions.
    Exploratory,
}

/// Behavioral contract handed to the text generator for a strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyProfile {
    pub tone: &'static str,
    pub length: ResponseLength,
    pub questions: QuestionPosture,
    pub max_tokens: u32,
    pub instructions: &'static str,
}

impl Strategy {
    pub const ALL: [Strategy; 12] = [
        Strategy::HighlyExcitedDetailedExploration,
        Strategy::HighlyStressedUrgentSupport,
        Strategy::HighlyDepressedGentleSupport,
        Strategy::HighlyContentDeepConversation,
        Strategy::ExcitedDetailedSearch,
        Strategy::StressedUrgentClear,
        Strategy::BoredSimpleClear,
        Strategy::CalmEngagingConversation,
        Strategy::UncertainButEnergeticExploration,
        Strategy::UncertainCalmGuidance,
        Strategy::MixedEmotionsAdaptiveSupport,
        Strategy::AdaptiveContextual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::HighlyExcitedDetailedExploration => "HIGHLY_EXCITED_DETAILED_EXPLORATION",
            Strategy::HighlyStressedUrgentSupport => "HIGHLY_STRESSED_URGENT_SUPPORT",
            Strategy::HighlyDepressedGentleSupport => "HIGHLY_DEPRESSED_GENTLE_SUPPORT",
            Strategy::HighlyContentDeepConversation => "HIGHLY_CONTENT_DEEP_CONVERSATION",
            Strategy::ExcitedDetailedSearch => "EXCITED_DETAILED_SEARCH",
            Strategy::StressedUrgentClear => "STRESSED_URGENT_CLEAR",
            Strategy::BoredSimpleClear => "BORED_SIMPLE_CLEAR",
            Strategy::CalmEngagingConversation => "CALM_ENGAGING_CONVERSATION",
            Strategy::UncertainButEnergeticExploration => "UNCERTAIN_BUT_ENERGETIC_EXPLORATION",
            Strategy::UncertainCalmGuidance => "UNCERTAIN_CALM_GUIDANCE",
            Strategy::MixedEmotionsAdaptiveSupport => "MIXED_EMOTIONS_ADAPTIVE_SUPPORT",
            Strategy::AdaptiveContextual => "ADAPTIVE_CONTEXTUAL",
        }
    }

    pub fn profile(&self) -> StrategyProfile {
        use QuestionPosture::*;
        use ResponseLength::*;

        match self {
            Strategy::HighlyExcitedDetailedExploration => StrategyProfile {
                tone: "enthusiastic and energetic",
                length: Detailed,
                questions: Exploratory,
                max_tokens: 300,
                instructions: "Match the user's excitement. Give rich detail, build on their ideas and suggest directions worth exploring next.",
            },
            Strategy::HighlyStressedUrgentSupport => StrategyProfile {
                tone: "calm, steady and reassuring",
                length: Brief,
                questions: Avoid,
                max_tokens: 150,
                instructions: "The user is under heavy pressure. Lead with the single most useful concrete step, keep sentences short and do not add anything that is not immediately actionable.",
            },
            Strategy::HighlyDepressedGentleSupport => StrategyProfile {
                tone: "warm, gentle and patient",
                length: Moderate,
                questions: Minimal,
                max_tokens: 200,
                instructions: "Acknowledge how the user feels before anything else. Offer support without pressure and suggest small, manageable steps.",
            },
            Strategy::HighlyContentDeepConversation => StrategyProfile {
                tone: "relaxed, thoughtful and warm",
                length: Detailed,
                questions: Open,
                max_tokens: 280,
                instructions: "The user is content and unhurried. Engage deeply with the topic, share considered perspectives and invite reflection.",
            },
            Strategy::ExcitedDetailedSearch => StrategyProfile {
                tone: "upbeat and informative",
                length: Detailed,
                questions: Minimal,
                max_tokens: 250,
                instructions: "Provide thorough, well organized information that feeds the user's interest, including options and specifics.",
            },
            Strategy::StressedUrgentClear => StrategyProfile {
                tone: "clear, direct and supportive",
                length: Brief,
                questions: Avoid,
                max_tokens: 150,
                instructions: "Be concise and structured. Give clear steps in order of priority and avoid speculation or long explanations.",
            },
            Strategy::BoredSimpleClear => StrategyProfile {
                tone: "friendly and straightforward",
                length: Brief,
                questions: Minimal,
                max_tokens: 150,
                instructions: "Keep it short and simple. Get to the point quickly and make the answer easy to act on.",
            },
            Strategy::CalmEngagingConversation => StrategyProfile {
                tone: "friendly and conversational",
                length: Moderate,
                questions: Open,
                max_tokens: 220,
                instructions: "Keep a natural conversational flow, respond to what the user said and add something interesting to continue the exchange.",
            },
            Strategy::UncertainButEnergeticExploration => StrategyProfile {
                tone: "curious and encouraging",
                length: Moderate,
                questions: Exploratory,
                max_tokens: 220,
                instructions: "The user's feelings are unclear but their energy is high. Offer a few possible directions and help them discover what they want.",
            },
            Strategy::UncertainCalmGuidance => StrategyProfile {
                tone: "patient and gentle",
                length: Moderate,
                questions: Open,
                max_tokens: 200,
                instructions: "Guide the user calmly. Clarify what they might need and offer simple, low-effort next steps.",
            },
            Strategy::MixedEmotionsAdaptiveSupport => StrategyProfile {
                tone: "empathetic and balanced",
                length: Moderate,
                questions: Open,
                max_tokens: 200,
                instructions: "Acknowledge that the user may feel several things at once. Address both the practical and the emotional side without assuming which dominates.",
            },
            Strategy::AdaptiveContextual => StrategyProfile {
                tone: "attentive and balanced",
                length: Moderate,
                questions: Minimal,
                max_tokens: 200,
                instructions: "Respond to the substance of the message, adapting detail and tone to the context the user provides.",
            },
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ResponseLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseLength::Brief => write!(f, "brief (2-3 sentences)"),
            ResponseLength::Moderate => write!(f, "moderate (one short paragraph)"),
            ResponseLength::Detailed => write!(f, "detailed (two or three paragraphs)"),
        }
    }
}

impl fmt::Display for QuestionPosture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionPosture::Avoid => write!(f, "do not ask questions"),
            QuestionPosture::Minimal => {
                write!(f, "ask at most one question, only if it is necessary")
            }
            QuestionPosture::Open => write!(f, "end with one open question"),
            QuestionPosture::Exploratory => write!(f, "ask follow-up questions that open new directions"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_confidence_quadrants() {
        assert_eq!(classify(0.8, 0.7, 0.9), Strategy::HighlyExcitedDetailedExploration);
        assert_eq!(classify(-0.8, 0.7, 0.9), Strategy::HighlyStressedUrgentSupport);
        assert_eq!(classify(-0.8, 0.2, 0.9), Strategy::HighlyDepressedGentleSupport);
        assert_eq!(classify(0.8, 0.2, 0.9), Strategy::HighlyContentDeepConversation);
    }

    #[test]
    fn moderate_confidence_quadrants() {
        assert_eq!(classify(0.4, 0.6, 0.6), Strategy::ExcitedDetailedSearch);
        assert_eq!(classify(-0.4, 0.6, 0.6), Strategy::StressedUrgentClear);
        assert_eq!(classify(-0.4, 0.2, 0.6), Strategy::BoredSimpleClear);
        assert_eq!(classify(0.4, 0.2, 0.6), Strategy::CalmEngagingConversation);
    }

    #[test]
    fn low_confidence_bands() {
        assert_eq!(classify(0.1, 0.6, 0.3), Strategy::UncertainButEnergeticExploration);
        assert_eq!(classify(-0.1, 0.1, 0.3), Strategy::UncertainCalmGuidance);
        assert_eq!(classify(0.5, 0.1, 0.3), Strategy::MixedEmotionsAdaptiveSupport);
    }

    #[test]
    fn strongly_negative_message_between_high_bands_falls_to_moderate() {
        // Negative sentiment at 0.85 confidence: valence -0.68, arousal 0.59.
        assert_eq!(classify(-0.68, 0.59, 0.85), Strategy::StressedUrgentClear);
        assert_eq!(classify(-0.68, 0.595, 0.85), Strategy::StressedUrgentClear);
    }

    #[test]
    fn near_neutral_moderate_confidence_is_adaptive_contextual() {
        assert_eq!(classify(0.0, 0.1, 0.5), Strategy::AdaptiveContextual);
        assert_eq!(classify(0.29, 0.9, 0.95), Strategy::AdaptiveContextual);
    }

    #[test]
    fn band_edges_follow_the_documented_convention() {
        assert_eq!(classify(0.6, 0.6, 0.71), Strategy::HighlyExcitedDetailedExploration);
        assert_eq!(classify(0.6, 0.4, 0.71), Strategy::HighlyContentDeepConversation);
        // Confidence 0.7 is not high confidence.
        assert_eq!(classify(0.6, 0.6, 0.7), Strategy::ExcitedDetailedSearch);
        assert_eq!(classify(0.3, 0.5, 0.5), Strategy::ExcitedDetailedSearch);
        assert_eq!(classify(0.3, 0.49, 0.5), Strategy::CalmEngagingConversation);
        // Confidence 0.4 is low confidence.
        assert_eq!(classify(0.2, 0.5, 0.4), Strategy::UncertainButEnergeticExploration);
        assert_eq!(classify(-0.2, 0.49, 0.4), Strategy::UncertainCalmGuidance);
    }

    #[test]
    fn classifier_is_total_over_the_valid_domain() {
        for vi in -20..=20 {
            for ai in 0..=20 {
                for ci in 0..=20 {
                    let strategy = classify(vi as f64 / 20.0, ai as f64 / 20.0, ci as f64 / 20.0);
                    assert!(Strategy::ALL.contains(&strategy));
                }
            }
        }
    }

    #[test]
    fn low_confidence_never_yields_adaptive_contextual() {
        for vi in -10..=10 {
            for ai in 0..=10 {
                assert_ne!(
                    classify(vi as f64 / 10.0, ai as f64 / 10.0, 0.2),
                    Strategy::AdaptiveContextual
                );
            }
        }
    }

    #[test]
    fn every_profile_keeps_generation_within_budget() {
        for strategy in Strategy::ALL {
            let profile = strategy.profile();
            assert!((150..=300).contains(&profile.max_tokens), "{strategy}");
            assert!(!profile.instructions.is_empty());
        }
    }

    #[test]
    fn strategy_names_are_screaming_snake_case() {
        assert_eq!(
            Strategy::StressedUrgentClear.to_string(),
            "STRESSED_URGENT_CLEAR"
        );
        assert_eq!(
            serde_json::to_value(Strategy::HighlyContentDeepConversation).unwrap(),
            serde_json::json!("HIGHLY_CONTENT_DEEP_CONVERSATION")
        );
    }
}
