//! The emotion engine: turns a sentiment classification into a continuous emotion
//! vector and derives everything downstream of it (intensity, response strategy,
//! generation temperature, feedback escalation and conversation trend).
//!
//! Every function here is pure. Nothing in this module touches the network or
//! the database.

use emotion_ai::{Label, Scores};
use serde::Serialize;

pub mod feedback;
pub mod intensity;
pub mod mapper;
pub mod strategy;
pub mod temperature;
pub mod trend;

pub use feedback::FeedbackDetector;
pub use intensity::Intensity;
pub use mapper::EmotionProfile;
pub use strategy::{Strategy, StrategyProfile};
pub use trend::{ConversationExchange, EmotionalPattern, EmotionalTrendSummary, Trend};

/// What the next response should prioritize over the strategy's default posture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// The user is unhappy with a previous answer; fix that first.
    SolveProblem,
}

/// Continuous estimate of the user's emotional state for one message.
///
/// `valence` lies in `[-1, 1]`, `arousal` and `confidence` in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionVector {
    /// Display name, e.g. "Joy / Optimism".
    pub label: String,
    pub valence: f64,
    pub arousal: f64,
    pub confidence: f64,
    pub sentiment_label: Label,
    pub sentiment_scores: Scores,
    pub feedback_detected: bool,
    pub priority: Option<Priority>,
}

/// Rounds to two decimal places, correctly rounded on the stored binary value:
/// `0.7 * 0.85` is stored just below 0.595 and rounds to 0.59.
pub(crate) fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_rounds_the_stored_value() {
        assert_eq!(round2(0.7 * 0.85), 0.59);
        assert_eq!(round2(0.8 * 0.9), 0.72);
        assert_eq!(round2(-0.684), -0.68);
        assert_eq!(round2(0.127), 0.13);
    }
}
