//! Emotion AI abstraction layer for sentiment classification and text generation providers.
//!
//! This crate provides trait-based abstractions for the two external capabilities the
//! emotion engine consumes:
//! - Sentiment classification and dominant-language detection
//! - Text generation parameterized by instructions, temperature and a token budget
//!
//! The design is provider-agnostic, enabling applications to swap between
//! different service providers (Amazon Comprehend style classifiers, OpenAI compatible
//! chat completion APIs, local models) without changing application code.

pub mod disabled;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::Error;
pub use traits::{generation, sentiment};
pub use types::sentiment::{Classification, Label, Scores};
