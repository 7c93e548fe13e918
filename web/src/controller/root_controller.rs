use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use service::config::ApiVersion;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<&'static str>,
}

/// GET API name, version and the available endpoints
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "API information", body = ApiInfo)
    )
)]
pub async fn index() -> impl IntoResponse {
    Json(ApiInfo {
        name: "Emotion-Aware Adaptive Response API",
        version: ApiVersion::default_version(),
        endpoints: vec![
            "POST /analyze",
            "GET /history/{session_id}",
            "GET /trends/{session_id}",
            "GET /sessions",
            "DELETE /sessions/{session_id}",
            "GET /health",
            "GET /rapidoc",
        ],
    })
}
