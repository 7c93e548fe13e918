use crate::error::Error;
use entity::user_sessions::Model;
use entity_api::{emotion_analysis, user_session};
use log::*;
use sea_orm::DatabaseConnection;

pub async fn find_all(db: &DatabaseConnection, limit: u64) -> Result<Vec<Model>, Error> {
    Ok(user_session::find_all(db, limit).await?)
}

/// Deletes a session together with all of its analyses. Returns the number of
/// analyses removed.
pub async fn delete(db: &DatabaseConnection, session_id: &str) -> Result<u64, Error> {
    let analyses_deleted = emotion_analysis::delete_by_session_id(db, session_id).await?;
    user_session::delete_by_session_id(db, session_id).await?;

    info!("Deleted session {session_id} and {analyses_deleted} analyses");
    Ok(analyses_deleted)
}
