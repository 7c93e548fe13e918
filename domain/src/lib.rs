//! Use cases of the emotion platform: the adaptive response engine, persistence of
//! its analyses and the gateways to the external AI collaborators.

// Re-exports from `entity` crate via `entity_api`
pub use entity_api::{emotion_analyses, sentiment, user_sessions, Id};

pub mod emotion;
pub mod emotion_analysis;
pub mod error;
pub mod orchestrator;
pub mod prompt;
pub mod text;
pub mod user_session;

pub mod gateway;
