use super::EmotionVector;
use serde::Serialize;
use std::fmt;

/// Qualitative strength of an emotional state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Intensity {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl Intensity {
    /// Weighted score: 0.4 confidence, 0.3 |valence|, 0.3 arousal.
    pub fn score(vector: &EmotionVector) -> f64 {
        0.4 * vector.confidence + 0.3 * vector.valence.abs() + 0.3 * vector.arousal
    }

    pub fn from_score(score: f64) -> Self {
        if score > 0.7 {
            Intensity::VeryHigh
        } else if score > 0.5 {
            Intensity::High
        } else if score > 0.3 {
            Intensity::Moderate
        } else {
            Intensity::Low
        }
    }

    pub fn of(vector: &EmotionVector) -> Self {
        Self::from_score(Self::score(vector))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "Low",
            Intensity::Moderate => "Moderate",
            Intensity::High => "High",
            Intensity::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
