//! Types for text generation.

use serde::{Deserialize, Serialize};

/// Parameters for a single generation request.
///
/// `system_instructions` carry the behavioral contract (tone, length, question posture);
/// `user_prompt` carries the user's text, optionally prefixed with conversation context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub system_instructions: String,
    pub user_prompt: String,
    /// Sampling randomness, 0.0 (deterministic) and up.
    pub temperature: f64,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}
