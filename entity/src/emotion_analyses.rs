//! SeaORM Entity for the emotion_analyses table.
//! One row per analyzed user message, never updated after insert.

use crate::sentiment::Sentiment;
use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::emotion_analyses::Model)]
#[sea_orm(schema_name = "emotion_platform", table_name = "emotion_analyses")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Id,

    /// Conversation the analysis belongs to
    pub session_id: String,

    /// Cleaned user text
    #[sea_orm(column_type = "Text")]
    pub input_text: String,

    /// Clarified restatement of the user text, when rephrasing is enabled
    #[sea_orm(column_type = "Text", nullable)]
    pub rephrased_text: Option<String>,

    /// Text exactly as submitted
    #[sea_orm(column_type = "Text")]
    pub original_text: String,

    pub language_code: Option<String>,

    pub sentiment: Sentiment,

    /// Per-class probabilities as returned by the classifier
    #[sea_orm(column_type = "JsonBinary")]
    #[schema(value_type = Object)]
    pub sentiment_scores: Json,

    /// Display label, e.g. "Joy / Optimism"
    pub emotion: String,

    pub valence: f64,

    pub arousal: f64,

    pub confidence: f64,

    /// Intensity tier, e.g. "Very High"
    pub intensity: String,

    /// Response strategy name, e.g. "STRESSED_URGENT_CLEAR"
    pub strategy: String,

    pub temperature: f64,

    pub feedback_detected: bool,

    #[sea_orm(column_type = "Text")]
    pub adaptive_response: String,

    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
