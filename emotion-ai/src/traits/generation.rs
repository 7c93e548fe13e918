//! Text generation provider trait.

use crate::types::generation::Config;
use crate::Error;
use async_trait::async_trait;

/// Abstraction for LLM-backed text generation.
///
/// Implementations receive system instructions, a user prompt and sampling
/// parameters and return the generated text. Supports OpenAI compatible chat
/// completion APIs and anything else that can honour a temperature and token budget.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate a completion for `config`.
    ///
    /// Must return within the provider's own timeout; streaming results are collected
    /// before returning. An empty completion is reported as an error.
    async fn generate(&self, config: Config) -> std::result::Result<String, Error>;

    /// Return unique identifier for this provider (e.g., "openai", "disabled").
    fn provider_id(&self) -> &str;
}
