//! Sequences the emotion engine for one message:
//! validate, clean, enrich with conversation context, classify sentiment, map to
//! an emotion vector, check for feedback, apply the conversation trend, pick a
//! strategy and generation parameters, generate a reply and assemble the record.
//!
//! The orchestrator never touches storage. Collaborator failures degrade to
//! fallback values and are only logged.

use crate::emotion::{
    feedback::FeedbackDetector,
    mapper::{self, EmotionProfile},
    strategy, temperature, trend, ConversationExchange, EmotionVector, EmotionalTrendSummary,
    Intensity, Priority, Strategy,
};
use crate::error::{Error, InputErrorKind};
use crate::{prompt, text};
use chrono::{DateTime, Utc};
use emotion_ai::types::generation::Config as GenerationConfig;
use emotion_ai::{generation, sentiment, Classification, Label, Scores};
use entity::Id;
use log::*;
use serde::Serialize;
use service::config::Config;

/// Language assumed when detection fails or is inconclusive.
pub const DEFAULT_LANGUAGE_CODE: &str = "en";

/// Token budget for the optional rephrasing call.
const REPHRASE_MAX_TOKENS: u32 = 100;

/// Numeric knobs of the engine, normally read from [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineTuning {
    pub trend_valence_nudge: f64,
    pub feedback_arousal_boost: f64,
    pub feedback_confidence_floor: f64,
    pub history_window: usize,
    pub prompt_history_window: usize,
    pub max_input_chars: usize,
    pub enable_rephrasing: bool,
}

impl Default for EngineTuning {
    fn default() -> Self {
        Self {
            trend_valence_nudge: 0.1,
            feedback_arousal_boost: 0.2,
            feedback_confidence_floor: 0.7,
            history_window: 10,
            prompt_history_window: 5,
            max_input_chars: 5000,
            enable_rephrasing: false,
        }
    }
}

impl From<&Config> for EngineTuning {
    fn from(config: &Config) -> Self {
        Self {
            trend_valence_nudge: config.trend_valence_nudge,
            feedback_arousal_boost: config.feedback_arousal_boost,
            feedback_confidence_floor: config.feedback_confidence_floor,
            history_window: config.history_window,
            prompt_history_window: config.prompt_history_window,
            max_input_chars: config.max_input_chars,
            enable_rephrasing: config.enable_rephrasing,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub text: String,
    /// Generated when absent.
    pub session_id: Option<String>,
    /// Free text describing what the message is about.
    pub context: Option<String>,
    /// Earlier exchanges, oldest first.
    pub conversation_history: Vec<ConversationExchange>,
}

/// The outcome of analyzing one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRecord {
    /// Storage identifier, absent until (and unless) the record is persisted.
    pub id: Option<Id>,
    pub session_id: String,
    pub input_text: String,
    pub rephrased_text: Option<String>,
    pub original_text: String,
    pub language_code: Option<String>,
    pub sentiment: Label,
    pub sentiment_scores: Scores,
    pub emotion: String,
    pub valence: f64,
    pub arousal: f64,
    pub confidence: f64,
    pub intensity: Intensity,
    pub strategy: Strategy,
    pub temperature: f64,
    pub max_tokens: u32,
    pub feedback_detected: bool,
    pub priority: Option<Priority>,
    pub adaptive_response: String,
    pub emotional_trend: Option<EmotionalTrendSummary>,
    pub timestamp: DateTime<Utc>,
}

pub struct ResponseOrchestrator<'a> {
    sentiment: &'a dyn sentiment::Provider,
    generation: &'a dyn generation::Provider,
    tuning: EngineTuning,
}

impl<'a> ResponseOrchestrator<'a> {
    pub fn new(
        sentiment: &'a dyn sentiment::Provider,
        generation: &'a dyn generation::Provider,
        tuning: EngineTuning,
    ) -> Self {
        Self {
            sentiment,
            generation,
            tuning,
        }
    }

    /// Analyzes one message. Fails only on invalid input; every collaborator
    /// failure degrades to a fallback value.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisRecord, Error> {
        text::validate(&request.text, self.tuning.max_input_chars)?;

        let cleaned = text::clean(&request.text);
        if cleaned.trim().is_empty() {
            return Err(Error::input(InputErrorKind::EmptyText));
        }

        let session_id = request
            .session_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Id::new_v4().to_string());
        let history = request.conversation_history.as_slice();

        let trend_summary = trend::analyze(history, self.tuning.history_window);
        let enriched = if history.is_empty() {
            cleaned.clone()
        } else {
            prompt::enrich(
                &cleaned,
                trend_summary.as_ref(),
                history,
                self.tuning.history_window,
            )
        };

        let language_code = self.detect_language(&cleaned).await;
        let classification = self
            .classify(
                &enriched,
                language_code.as_deref().unwrap_or(DEFAULT_LANGUAGE_CODE),
            )
            .await;

        let mut vector = mapper::map(&classification);
        debug!(
            "Mapped {} to {} (valence {}, arousal {}, confidence {})",
            classification.label, vector.label, vector.valence, vector.arousal, vector.confidence
        );

        vector = FeedbackDetector::new(
            self.tuning.feedback_arousal_boost,
            self.tuning.feedback_confidence_floor,
        )
        .apply(&request.text, vector);

        if let Some(summary) = &trend_summary {
            vector.valence = summary
                .trend
                .nudge(vector.valence, self.tuning.trend_valence_nudge);
        }

        let strategy = strategy::classify_vector(&vector);
        let intensity = Intensity::of(&vector);
        let temperature = temperature::modulate(&vector);
        let max_tokens = strategy.profile().max_tokens;

        let prompt_summary = trend::analyze(history, self.tuning.prompt_history_window);
        let generation_config = GenerationConfig {
            system_instructions: prompt::system_instructions(&prompt::InstructionContext {
                strategy,
                vector: &vector,
                intensity,
                trend: prompt_summary.as_ref(),
                history,
                history_window: self.tuning.prompt_history_window,
            }),
            user_prompt: prompt::user_prompt(&cleaned, request.context.as_deref()),
            temperature,
            max_tokens,
        };

        let adaptive_response = self
            .generate(generation_config, &vector, request.context.as_deref())
            .await;

        let rephrased_text = if self.tuning.enable_rephrasing {
            self.rephrase(&cleaned).await
        } else {
            None
        };

        info!(
            "Analyzed message for session {session_id}: {} -> {} ({strategy}, intensity {intensity}, temperature {temperature:.2})",
            classification.label, vector.label
        );

        Ok(AnalysisRecord {
            id: None,
            session_id,
            input_text: cleaned,
            rephrased_text,
            original_text: request.text.clone(),
            language_code,
            sentiment: classification.label,
            sentiment_scores: classification.scores,
            emotion: vector.label,
            valence: vector.valence,
            arousal: vector.arousal,
            confidence: vector.confidence,
            intensity,
            strategy,
            temperature,
            max_tokens,
            feedback_detected: vector.feedback_detected,
            priority: vector.priority,
            adaptive_response,
            emotional_trend: trend_summary,
            timestamp: Utc::now(),
        })
    }

    async fn detect_language(&self, text: &str) -> Option<String> {
        match self.sentiment.detect_language(text).await {
            Ok(code) => code,
            Err(err) => {
                warn!("Language detection failed, assuming {DEFAULT_LANGUAGE_CODE}: {err}");
                None
            }
        }
    }

    async fn classify(&self, text: &str, language_code: &str) -> Classification {
        match self.sentiment.classify_sentiment(text, language_code).await {
            Ok(classification) if classification.scores.is_distribution() => classification,
            Ok(classification) => {
                warn!(
                    "Sentiment scores are not a probability distribution, using neutral fallback: {:?}",
                    classification.scores
                );
                Classification::neutral_fallback()
            }
            Err(err) => {
                warn!("Sentiment classification failed, using neutral fallback: {err}");
                Classification::neutral_fallback()
            }
        }
    }

    async fn generate(
        &self,
        config: GenerationConfig,
        vector: &EmotionVector,
        context: Option<&str>,
    ) -> String {
        match self.generation.generate(config).await {
            Ok(response) if !response.trim().is_empty() => response.trim().to_string(),
            Ok(_) => {
                warn!("Text generation returned an empty response, using template");
                self.template_response(vector, context)
            }
            Err(err) => {
                warn!("Text generation failed, using template: {err}");
                self.template_response(vector, context)
            }
        }
    }

    fn template_response(&self, vector: &EmotionVector, context: Option<&str>) -> String {
        let profile = EmotionProfile::for_label(vector.sentiment_label);
        prompt::fallback_response(profile.response_template, vector.valence, context)
    }

    async fn rephrase(&self, text: &str) -> Option<String> {
        let config = GenerationConfig {
            system_instructions: prompt::REPHRASE_INSTRUCTIONS.to_string(),
            user_prompt: text.to_string(),
            temperature: temperature::MIN_TEMPERATURE,
            max_tokens: REPHRASE_MAX_TOKENS,
        };
        match self.generation.generate(config).await {
            Ok(rephrased) if !rephrased.trim().is_empty() => Some(rephrased.trim().to_string()),
            Ok(_) => None,
            Err(err) => {
                warn!("Rephrasing failed: {err}");
                None
            }
        }
    }
}
