use domain::emotion_analyses::Model as AnalysisModel;
use domain::emotion_analysis::SessionTrends;
use domain::orchestrator::AnalysisRecord;
use serde::Serialize;
use utoipa::ToSchema;

/// Body returned by `POST /analyze`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    pub success: bool,
    /// Emotion vector, strategy, generation parameters and the adaptive response.
    #[schema(value_type = Object)]
    pub analysis: AnalysisRecord,
    pub session_id: String,
}

impl From<AnalysisRecord> for AnalyzeResponse {
    fn from(analysis: AnalysisRecord) -> Self {
        Self {
            success: true,
            session_id: analysis.session_id.clone(),
            analysis,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryResponse {
    pub session_id: String,
    pub count: usize,
    pub analyses: Vec<AnalysisModel>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrendsResponse {
    pub session_id: String,
    /// Absent when the session has no stored analyses.
    #[schema(value_type = Option<Object>)]
    pub trends: Option<domain::emotion::EmotionalTrendSummary>,
    pub total_analyses: usize,
}

impl From<SessionTrends> for TrendsResponse {
    fn from(session_trends: SessionTrends) -> Self {
        Self {
            session_id: session_trends.session_id,
            trends: session_trends.trends,
            total_analyses: session_trends.total_analyses,
        }
    }
}
