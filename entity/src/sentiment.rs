use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sentiment class reported by the classification service for one analysis.
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, EnumIter, Deserialize, Serialize, DeriveActiveEnum, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "sentiment")]
pub enum Sentiment {
    #[sea_orm(string_value = "positive")]
    Positive,
    #[sea_orm(string_value = "negative")]
    Negative,
    #[sea_orm(string_value = "neutral")]
    Neutral,
    #[sea_orm(string_value = "mixed")]
    Mixed,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(fmt, "positive"),
            Sentiment::Negative => write!(fmt, "negative"),
            Sentiment::Neutral => write!(fmt, "neutral"),
            Sentiment::Mixed => write!(fmt, "mixed"),
        }
    }
}
