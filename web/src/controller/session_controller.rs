use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::params::session::IndexParams;
use crate::response::session::DeletedSession;
use crate::{AppState, Error};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::user_session as UserSessionApi;
use service::config::ApiVersion;

use log::*;

/// GET sessions ordered by their most recent activity
#[utoipa::path(
    get,
    path = "/sessions",
    params(ApiVersion, IndexParams),
    responses(
        (status = 200, description = "Successfully retrieved sessions", body = [domain::user_sessions::Model]),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn index(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET all Sessions with {params:?}");

    let sessions = UserSessionApi::find_all(app_state.db_conn_ref(), params.limit()).await?;

    debug!("Found {} Sessions", sessions.len());

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), sessions)))
}

/// DELETE a session and every analysis recorded for it
#[utoipa::path(
    delete,
    path = "/sessions/{session_id}",
    params(
        ApiVersion,
        ("session_id" = String, Path, description = "Session to delete")
    ),
    responses(
        (status = 200, description = "Successfully deleted the session", body = DeletedSession),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn delete(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Session {session_id}");

    let analyses_deleted = UserSessionApi::delete(app_state.db_conn_ref(), &session_id).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        DeletedSession {
            session_id,
            analyses_deleted,
        },
    )))
}
