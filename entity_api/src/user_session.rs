//! CRUD operations for the user_sessions table.

use super::error::Error;
use crate::clamp_limit;
use entity::user_sessions::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::sea_query::{Alias, Expr, Func, OnConflict};
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, ConnectionTrait, DatabaseConnection, QueryOrder,
    QuerySelect,
};

/// Records one more analysis against a session, creating the session on first use.
///
/// Runs as a single `INSERT .. ON CONFLICT (session_id) DO UPDATE`, so concurrent
/// requests for the same session neither lose increments nor collide on the
/// unique key. An existing session gets its counter incremented and its activity
/// timestamp bumped; `emotional_trend` replaces the stored trend only when present.
pub async fn record_activity(
    db: &impl ConnectionTrait,
    session_id: &str,
    emotional_trend: Option<String>,
) -> Result<Model, Error> {
    debug!("Recording activity for session: {session_id}");

    let now = chrono::Utc::now();
    let active_model = ActiveModel {
        id: Set(Id::new_v4()),
        session_id: Set(session_id.to_owned()),
        created_at: Set(now.into()),
        last_activity_at: Set(now.into()),
        total_analyses: Set(1),
        emotional_trend: Set(emotional_trend),
    };

    let excluded = Alias::new("excluded");
    let on_conflict = OnConflict::column(Column::SessionId)
        .value(
            Column::TotalAnalyses,
            Expr::col((Entity, Column::TotalAnalyses)).add(1),
        )
        .value(
            Column::EmotionalTrend,
            Func::coalesce([
                Expr::col((excluded.clone(), Column::EmotionalTrend)).into(),
                Expr::col((Entity, Column::EmotionalTrend)).into(),
            ]),
        )
        .update_column(Column::LastActivityAt)
        .to_owned();

    Ok(Entity::insert(active_model)
        .on_conflict(on_conflict)
        .exec_with_returning(db)
        .await?)
}

/// Sessions ordered by most recent activity first.
pub async fn find_all(db: &DatabaseConnection, limit: u64) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .order_by_desc(Column::LastActivityAt)
        .limit(clamp_limit(limit))
        .all(db)
        .await?)
}

/// Removes the session row. Deleting a session that does not exist is not an error.
pub async fn delete_by_session_id(
    db: &impl ConnectionTrait,
    session_id: &str,
) -> Result<u64, Error> {
    let result = Entity::delete_many()
        .filter(Column::SessionId.eq(session_id))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
