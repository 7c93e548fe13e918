use domain::emotion::ConversationExchange;
use domain::orchestrator::AnalysisRequest;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Body of `POST /analyze`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeParams {
    /// Message to analyze, 1 to 5000 characters.
    pub text: String,
    /// Conversation the message belongs to. Generated when absent.
    #[serde(default, alias = "sessionId")]
    pub session_id: Option<String>,
    /// Free text describing what the message is about.
    #[serde(default)]
    pub context: Option<String>,
    /// Earlier exchanges of the conversation, oldest first.
    #[serde(default, alias = "conversationHistory")]
    #[schema(value_type = Vec<Object>)]
    pub conversation_history: Vec<ConversationExchange>,
}

impl From<AnalyzeParams> for AnalysisRequest {
    fn from(params: AnalyzeParams) -> Self {
        Self {
            text: params.text,
            session_id: params.session_id,
            context: params.context,
            conversation_history: params.conversation_history,
        }
    }
}

pub(crate) const DEFAULT_HISTORY_LIMIT: u64 = 50;

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct HistoryParams {
    /// Maximum number of analyses to return, newest first.
    pub(crate) limit: Option<u64>,
}

impl HistoryParams {
    pub(crate) fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_HISTORY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_fields_are_accepted() {
        let params: AnalyzeParams = serde_json::from_value(serde_json::json!({
            "text": "Still stuck on this bug",
            "sessionId": "abc",
            "conversationHistory": [
                {"user_text": "hi", "valence": -0.2, "arousal": 0.6, "confidence": 0.8},
                {"userText": "still broken", "assistantText": "try again", "emotionLabel": "Anger / Frustration"}
            ]
        }))
        .unwrap();

        let request = AnalysisRequest::from(params);
        assert_eq!(request.session_id.as_deref(), Some("abc"));
        assert_eq!(request.conversation_history.len(), 2);
        assert_eq!(request.conversation_history[0].valence, Some(-0.2));
        assert_eq!(request.conversation_history[1].user_text, "still broken");
        assert_eq!(
            request.conversation_history[1].emotion_label.as_deref(),
            Some("Anger / Frustration")
        );
        assert!(request.context.is_none());
    }

    #[test]
    fn history_limit_defaults_to_fifty() {
        assert_eq!(HistoryParams { limit: None }.limit(), 50);
        assert_eq!(HistoryParams { limit: Some(5) }.limit(), 5);
    }
}
