//! Types for sentiment classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categorical sentiment returned by a classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

impl Label {
    pub const ALL: [Label; 4] = [
        Label::Positive,
        Label::Negative,
        Label::Neutral,
        Label::Mixed,
    ];

    /// Parses a provider label, treating anything unrecognized as `Neutral`.
    pub fn from_provider_label(label: &str) -> Self {
        label.parse().unwrap_or(Label::Neutral)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct LabelParseError(pub String);

impl fmt::Display for LabelParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized sentiment label: {}", self.0)
    }
}

impl std::error::Error for LabelParseError {}

impl FromStr for Label {
    type Err = LabelParseError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label.trim().to_uppercase().as_str() {
            "POSITIVE" => Ok(Label::Positive),
            "NEGATIVE" => Ok(Label::Negative),
            "NEUTRAL" => Ok(Label::Neutral),
            "MIXED" => Ok(Label::Mixed),
            _ => Err(LabelParseError(label.to_string())),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Positive => write!(f, "POSITIVE"),
            Label::Negative => write!(f, "NEGATIVE"),
            Label::Neutral => write!(f, "NEUTRAL"),
            Label::Mixed => write!(f, "MIXED"),
        }
    }
}

/// Per-class probabilities. Serialized with the class names as keys
/// (`{"Positive": .., "Negative": .., "Neutral": .., "Mixed": ..}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Scores {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub mixed: f64,
}

impl Scores {
    /// Largest distance from 1.0 accepted for the sum of the four probabilities.
    pub const SUM_TOLERANCE: f64 = 0.05;

    /// Distribution substituted when the classifier could not be reached.
    pub const NEUTRAL_FALLBACK: Scores = Scores {
        positive: 0.25,
        negative: 0.25,
        neutral: 0.5,
        mixed: 0.0,
    };

    pub fn get(&self, label: Label) -> f64 {
        match label {
            Label::Positive => self.positive,
            Label::Negative => self.negative,
            Label::Neutral => self.neutral,
            Label::Mixed => self.mixed,
        }
    }

    /// Highest single class probability.
    pub fn max(&self) -> f64 {
        Label::ALL
            .iter()
            .map(|label| self.get(*label))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn sum(&self) -> f64 {
        self.positive + self.negative + self.neutral + self.mixed
    }

    /// True when every class probability is a finite value in [0, 1] and together
    /// they sum to 1 within [`Scores::SUM_TOLERANCE`].
    pub fn is_distribution(&self) -> bool {
        Label::ALL.iter().all(|label| {
            let score = self.get(*label);
            score.is_finite() && (0.0..=1.0).contains(&score)
        }) && (self.sum() - 1.0).abs() <= Self::SUM_TOLERANCE
    }
}

/// Result of classifying one piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: Label,
    pub scores: Scores,
}

impl Classification {
    /// The classification used in place of a failed classifier call.
    pub fn neutral_fallback() -> Self {
        Self {
            label: Label::Neutral,
            scores: Scores::NEUTRAL_FALLBACK,
        }
    }
}
