use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::params::analysis::{AnalyzeParams, HistoryParams};
use crate::response::analysis::{AnalyzeResponse, HistoryResponse, TrendsResponse};
use crate::{AppState, Error};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::emotion_analysis as EmotionAnalysisApi;
use domain::orchestrator::{AnalysisRequest, EngineTuning, ResponseOrchestrator};
use service::config::ApiVersion;

use log::*;

/// POST analyze a message and generate an emotion-adapted response
#[utoipa::path(
    post,
    path = "/analyze",
    params(ApiVersion),
    request_body = AnalyzeParams,
    responses(
        (status = 200, description = "Successfully analyzed the message", body = AnalyzeResponse),
        (status = 400, description = "Empty or overlong text"),
        (status = 422, description = "Unprocessable Entity"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn analyze(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Json(params): Json<AnalyzeParams>,
) -> Result<impl IntoResponse, Error> {
    debug!(
        "POST Analyze {} characters for session {:?}",
        params.text.chars().count(),
        params.session_id
    );

    let orchestrator = ResponseOrchestrator::new(
        app_state.sentiment_provider(),
        app_state.generation_provider(),
        EngineTuning::from(&app_state.config),
    );
    let request = AnalysisRequest::from(params);

    let analysis =
        EmotionAnalysisApi::analyze(app_state.db_conn_ref(), &orchestrator, &request).await?;

    debug!("Analysis {:?} for session {}", analysis.id, analysis.session_id);

    Ok(Json(AnalyzeResponse::from(analysis)))
}

/// GET stored analyses of a session, newest first
#[utoipa::path(
    get,
    path = "/history/{session_id}",
    params(
        ApiVersion,
        ("session_id" = String, Path, description = "Session to read the history of"),
        HistoryParams
    ),
    responses(
        (status = 200, description = "Successfully retrieved the session history", body = HistoryResponse),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn history(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(session_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET History for session {session_id} with {params:?}");

    let analyses =
        EmotionAnalysisApi::find_by_session_id(app_state.db_conn_ref(), &session_id, params.limit())
            .await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        HistoryResponse {
            session_id,
            count: analyses.len(),
            analyses,
        },
    )))
}

/// GET the emotional trend over all stored analyses of a session
#[utoipa::path(
    get,
    path = "/trends/{session_id}",
    params(
        ApiVersion,
        ("session_id" = String, Path, description = "Session to analyze")
    ),
    responses(
        (status = 200, description = "Successfully computed the session trend", body = TrendsResponse),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn trends(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Trends for session {session_id}");

    let session_trends =
        EmotionAnalysisApi::session_trends(app_state.db_conn_ref(), &session_id).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        TrendsResponse::from(session_trends),
    )))
}
