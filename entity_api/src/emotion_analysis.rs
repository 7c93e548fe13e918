//! CRUD operations for the emotion_analyses table.

use super::error::Error;
use crate::clamp_limit;
use entity::emotion_analyses::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, ConnectionTrait, DatabaseConnection, QueryOrder,
    QuerySelect,
};

/// Inserts a new analysis row. The id is always freshly generated.
pub async fn create(db: &impl ConnectionTrait, analysis: Model) -> Result<Model, Error> {
    debug!(
        "Creating emotion analysis for session: {}, strategy: {}",
        analysis.session_id, analysis.strategy
    );

    let active_model = ActiveModel {
        id: Set(Id::new_v4()),
        session_id: Set(analysis.session_id),
        input_text: Set(analysis.input_text),
        rephrased_text: Set(analysis.rephrased_text),
        original_text: Set(analysis.original_text),
        language_code: Set(analysis.language_code),
        sentiment: Set(analysis.sentiment),
        sentiment_scores: Set(analysis.sentiment_scores),
        emotion: Set(analysis.emotion),
        valence: Set(analysis.valence),
        arousal: Set(analysis.arousal),
        confidence: Set(analysis.confidence),
        intensity: Set(analysis.intensity),
        strategy: Set(analysis.strategy),
        temperature: Set(analysis.temperature),
        feedback_detected: Set(analysis.feedback_detected),
        adaptive_response: Set(analysis.adaptive_response),
        timestamp: Set(analysis.timestamp),
    };

    Ok(active_model.insert(db).await?)
}

/// Analyses for a session, newest first.
pub async fn find_by_session_id(
    db: &DatabaseConnection,
    session_id: &str,
    limit: u64,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::SessionId.eq(session_id))
        .order_by_desc(Column::Timestamp)
        .limit(clamp_limit(limit))
        .all(db)
        .await?)
}

/// The most recent `limit` analyses for a session, returned oldest first so they
/// can be read as a conversation timeline.
pub async fn find_timeline_by_session_id(
    db: &DatabaseConnection,
    session_id: &str,
    limit: u64,
) -> Result<Vec<Model>, Error> {
    let mut analyses = find_by_session_id(db, session_id, limit).await?;
    analyses.reverse();
    Ok(analyses)
}

/// Deletes every analysis recorded for a session, returning how many were removed.
pub async fn delete_by_session_id(
    db: &impl ConnectionTrait,
    session_id: &str,
) -> Result<u64, Error> {
    let result = Entity::delete_many()
        .filter(Column::SessionId.eq(session_id))
        .exec(db)
        .await?;

    debug!(
        "Deleted {} emotion analyses for session: {session_id}",
        result.rows_affected
    );

    Ok(result.rows_affected)
}
