use crate::{
    controller::{analysis_controller, health_check_controller, root_controller, session_controller},
    params, response, AppState,
};
use axum::{
    routing::{delete, get, post},
    Router,
};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Emotion Platform API"
        ),
        paths(
            root_controller::index,
            health_check_controller::health_check,
            analysis_controller::analyze,
            analysis_controller::history,
            analysis_controller::trends,
            session_controller::index,
            session_controller::delete,
        ),
        components(
            schemas(
                domain::emotion_analyses::Model,
                domain::user_sessions::Model,
                domain::sentiment::Sentiment,
                params::analysis::AnalyzeParams,
                response::analysis::AnalyzeResponse,
                response::analysis::HistoryResponse,
                response::analysis::TrendsResponse,
                response::session::DeletedSession,
                root_controller::ApiInfo,
            )
        ),
        tags(
            (name = "emotion_platform", description = "Emotion-Aware Adaptive Response API")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(root_routes())
        .merge(health_routes())
        .merge(analysis_routes(app_state.clone()))
        .merge(session_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi2.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn root_routes() -> Router {
    Router::new().route("/", get(root_controller::index))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn analysis_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analysis_controller::analyze))
        .route("/history/{session_id}", get(analysis_controller::history))
        .route("/trends/{session_id}", get(analysis_controller::trends))
        .with_state(app_state)
}

fn session_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/sessions", get(session_controller::index))
        .route("/sessions/{session_id}", delete(session_controller::delete))
        .with_state(app_state)
}
