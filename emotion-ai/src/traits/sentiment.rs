//! Sentiment classification provider trait.

use crate::types::sentiment::Classification;
use crate::Error;
use async_trait::async_trait;

/// Abstraction for services that classify the sentiment of free text.
///
/// Implementations return one categorical label plus a probability for each of the
/// four sentiment classes. Supports Amazon Comprehend style APIs, hosted classifiers
/// and local models. Callers treat every error as recoverable.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Classify the sentiment of `text` written in `language_code`.
    ///
    /// Scores should sum to approximately 1.0. The label is normally the class with the
    /// highest score, but callers must not rely on that.
    async fn classify_sentiment(
        &self,
        text: &str,
        language_code: &str,
    ) -> std::result::Result<Classification, Error>;

    /// Detect the dominant language of `text`.
    ///
    /// Returns `Ok(None)` when the provider answered but could not decide.
    async fn detect_language(&self, text: &str) -> std::result::Result<Option<String>, Error>;

    /// Return unique identifier for this provider (e.g., "comprehend", "disabled").
    ///
    /// Used for logging and selecting providers at runtime.
    /// Must be lowercase, alphanumeric with underscores only.
    fn provider_id(&self) -> &str;
}
