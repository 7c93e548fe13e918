//! Conversation trend analysis over a window of earlier exchanges.

use super::round2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum number of annotated exchanges needed before a direction is reported.
pub const MIN_TREND_POINTS: usize = 4;

/// Mean valence change between the two halves that counts as a direction.
const TREND_THRESHOLD: f64 = 0.2;

/// One earlier turn of the conversation, supplied by the caller. Emotion
/// annotations are optional; exchanges without all three are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationExchange {
    #[serde(alias = "userText")]
    pub user_text: String,
    #[serde(default, alias = "assistantText")]
    pub assistant_text: String,
    #[serde(default, alias = "emotionLabel")]
    pub emotion_label: Option<String>,
    #[serde(default)]
    pub valence: Option<f64>,
    #[serde(default)]
    pub arousal: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmotionSample {
    pub valence: f64,
    pub arousal: f64,
    pub confidence: f64,
}

impl ConversationExchange {
    pub fn sample(&self) -> Option<EmotionSample> {
        Some(EmotionSample {
            valence: self.valence?,
            arousal: self.arousal?,
            confidence: self.confidence?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmotionalPattern {
    #[serde(rename = "Positive and Energetic")]
    PositiveEnergetic,
    #[serde(rename = "Positive and Calm")]
    PositiveCalm,
    #[serde(rename = "Negative and Agitated")]
    NegativeAgitated,
    #[serde(rename = "Negative and Subdued")]
    NegativeSubdued,
    #[serde(rename = "Mixed Emotional States")]
    Mixed,
}

impl EmotionalPattern {
    pub fn from_means(valence: f64, arousal: f64) -> Self {
        match (valence, arousal > 0.5) {
            (v, true) if v > 0.3 => EmotionalPattern::PositiveEnergetic,
            (v, false) if v > 0.3 => EmotionalPattern::PositiveCalm,
            (v, true) if v < -0.3 => EmotionalPattern::NegativeAgitated,
            (v, false) if v < -0.3 => EmotionalPattern::NegativeSubdued,
            _ => EmotionalPattern::Mixed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionalPattern::PositiveEnergetic => "Positive and Energetic",
            EmotionalPattern::PositiveCalm => "Positive and Calm",
            EmotionalPattern::NegativeAgitated => "Negative and Agitated",
            EmotionalPattern::NegativeSubdued => "Negative and Subdued",
            EmotionalPattern::Mixed => "Mixed Emotional States",
        }
    }
}

impl fmt::Display for EmotionalPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    #[serde(rename = "Improving Emotional State")]
    Improving,
    #[serde(rename = "Declining Emotional State")]
    Declining,
    #[serde(rename = "Stable Emotional State")]
    Stable,
    #[serde(rename = "Insufficient Data")]
    InsufficientData,
}

impl Trend {
    /// Compares the mean valence of the first half of `valences` with the second.
    /// With an odd count the middle point belongs to the second half.
    pub fn from_valences(valences: &[f64]) -> Self {
        if valences.len() < MIN_TREND_POINTS {
            return Trend::InsufficientData;
        }

        let (first, second) = valences.split_at(valences.len() / 2);
        let delta = mean(second) - mean(first);

        if delta > TREND_THRESHOLD {
            Trend::Improving
        } else if delta < -TREND_THRESHOLD {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }

    /// Moves `valence` one `step` in the direction of the trend, clamped to
    /// `[-1, 1]` and rounded to two decimals.
    pub fn nudge(&self, valence: f64, step: f64) -> f64 {
        let shifted = match self {
            Trend::Improving => valence + step,
            Trend::Declining => valence - step,
            Trend::Stable | Trend::InsufficientData => return valence,
        };
        round2(shifted.clamp(-1.0, 1.0))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "Improving Emotional State",
            Trend::Declining => "Declining Emotional State",
            Trend::Stable => "Stable Emotional State",
            Trend::InsufficientData => "Insufficient Data",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate view of recent emotional state. Averages are rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionalTrendSummary {
    pub pattern: EmotionalPattern,
    pub trend: Trend,
    pub avg_valence: f64,
    pub avg_arousal: f64,
    pub avg_confidence: f64,
    pub exchange_count: usize,
}

impl EmotionalTrendSummary {
    /// Summarizes samples given oldest first. `None` when there are none.
    pub fn from_samples(samples: &[EmotionSample]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let valences: Vec<f64> = samples.iter().map(|s| s.valence).collect();
        let avg_valence = mean(&valences);
        let avg_arousal = samples.iter().map(|s| s.arousal).sum::<f64>() / samples.len() as f64;
        let avg_confidence =
            samples.iter().map(|s| s.confidence).sum::<f64>() / samples.len() as f64;

        Some(Self {
            pattern: EmotionalPattern::from_means(avg_valence, avg_arousal),
            trend: Trend::from_valences(&valences),
            avg_valence: round2(avg_valence),
            avg_arousal: round2(avg_arousal),
            avg_confidence: round2(avg_confidence),
            exchange_count: samples.len(),
        })
    }
}

/// Summarizes the last `window` exchanges of `history` (oldest first).
///
/// The window is taken first; unannotated exchanges inside it are then dropped.
pub fn analyze(history: &[ConversationExchange], window: usize) -> Option<EmotionalTrendSummary> {
    let start = history.len().saturating_sub(window);
    let samples: Vec<EmotionSample> = history[start..]
        .iter()
        .filter_map(ConversationExchange::sample)
        .collect();

    EmotionalTrendSummary::from_samples(&samples)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
