//! Analysis use cases that combine the engine with persistence.

use crate::emotion::trend::{EmotionSample, EmotionalTrendSummary};
use crate::error::{DomainErrorKind, EntityErrorKind, Error, InternalErrorKind};
use crate::orchestrator::{AnalysisRecord, AnalysisRequest, ResponseOrchestrator};
use entity::emotion_analyses::Model;
use entity::sentiment::Sentiment;
use entity_api::{emotion_analysis, user_session};
use emotion_ai::Label;
use log::*;
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Serialize;

/// Upper bound on analyses considered when computing a session's trend.
pub const SESSION_TREND_LIMIT: u64 = 1000;

/// Trend view of everything recorded for a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionTrends {
    pub session_id: String,
    pub trends: Option<EmotionalTrendSummary>,
    pub total_analyses: usize,
}

pub fn sentiment_from_label(label: Label) -> Sentiment {
    match label {
        Label::Positive => Sentiment::Positive,
        Label::Negative => Sentiment::Negative,
        Label::Neutral => Sentiment::Neutral,
        Label::Mixed => Sentiment::Mixed,
    }
}

impl TryFrom<&AnalysisRecord> for Model {
    type Error = Error;

    fn try_from(record: &AnalysisRecord) -> Result<Self, Self::Error> {
        let sentiment_scores = serde_json::to_value(record.sentiment_scores).map_err(|err| Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                "Failed to serialize sentiment scores".to_string(),
            )),
        })?;

        Ok(Model {
            id: record.id.unwrap_or_default(),
            session_id: record.session_id.clone(),
            input_text: record.input_text.clone(),
            rephrased_text: record.rephrased_text.clone(),
            original_text: record.original_text.clone(),
            language_code: record.language_code.clone(),
            sentiment: sentiment_from_label(record.sentiment),
            sentiment_scores,
            emotion: record.emotion.clone(),
            valence: record.valence,
            arousal: record.arousal,
            confidence: record.confidence,
            intensity: record.intensity.to_string(),
            strategy: record.strategy.to_string(),
            temperature: record.temperature,
            feedback_detected: record.feedback_detected,
            adaptive_response: record.adaptive_response.clone(),
            timestamp: record.timestamp.into(),
        })
    }
}

/// Runs the engine on `request` and records the result.
///
/// Storage failures are logged and leave `id` empty; the analysis is still returned.
pub async fn analyze(
    db: &DatabaseConnection,
    orchestrator: &ResponseOrchestrator<'_>,
    request: &AnalysisRequest,
) -> Result<AnalysisRecord, Error> {
    let mut record = orchestrator.analyze(request).await?;

    match persist(db, &record).await {
        Ok(id) => record.id = Some(id),
        Err(err) => warn!(
            "Failed to persist analysis for session {}: {err}",
            record.session_id
        ),
    }

    Ok(record)
}

/// Stores the analysis and bumps its session in one transaction.
async fn persist(db: &DatabaseConnection, record: &AnalysisRecord) -> Result<entity::Id, Error> {
    let model = Model::try_from(record)?;
    let emotional_trend = record
        .emotional_trend
        .as_ref()
        .map(|summary| summary.trend.to_string());

    let txn = db.begin().await.map_err(|e| Error {
        source: Some(Box::new(e)),
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
            EntityErrorKind::DbTransaction,
        )),
    })?;

    let stored = emotion_analysis::create(&txn, model).await?;
    user_session::record_activity(&txn, &record.session_id, emotional_trend).await?;

    txn.commit().await.map_err(|e| Error {
        source: Some(Box::new(e)),
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
            EntityErrorKind::DbTransaction,
        )),
    })?;

    debug!(
        "Persisted analysis {} for session {}",
        stored.id, record.session_id
    );
    Ok(stored.id)
}

/// Stored analyses for a session, newest first.
pub async fn find_by_session_id(
    db: &DatabaseConnection,
    session_id: &str,
    limit: u64,
) -> Result<Vec<Model>, Error> {
    Ok(emotion_analysis::find_by_session_id(db, session_id, limit).await?)
}

/// Trend analysis over a session's stored analyses, oldest to newest.
pub async fn session_trends(
    db: &DatabaseConnection,
    session_id: &str,
) -> Result<SessionTrends, Error> {
    let analyses =
        emotion_analysis::find_timeline_by_session_id(db, session_id, SESSION_TREND_LIMIT).await?;

    let samples: Vec<EmotionSample> = analyses
        .iter()
        .map(|analysis| EmotionSample {
            valence: analysis.valence,
            arousal: analysis.arousal,
            confidence: analysis.confidence,
        })
        .collect();

    Ok(SessionTrends {
        session_id: session_id.to_string(),
        trends: EmotionalTrendSummary::from_samples(&samples),
        total_analyses: analyses.len(),
    })
}


#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod mock_tests {
    use super::*;
    use crate::emotion::Trend;
    use crate::orchestrator::EngineTuning;
    use chrono::Utc;
    use emotion_ai::disabled::Disabled;
    use entity::user_sessions;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn stored(valence: f64, minutes_ago: i64) -> Model {
        Model {
            id: entity::Id::new_v4(),
            session_id: "session-1".to_string(),
            input_text: "text".to_string(),
            rephrased_text: None,
            original_text: "text".to_string(),
            language_code: None,
            sentiment: Sentiment::Neutral,
            sentiment_scores: serde_json::json!({}),
            emotion: "Calm / Indifference".to_string(),
            valence,
            arousal: 0.3,
            confidence: 0.6,
            intensity: "Moderate".to_string(),
            strategy: "ADAPTIVE_CONTEXTUAL".to_string(),
            temperature: 0.5,
            feedback_detected: false,
            adaptive_response: "ok".to_string(),
            timestamp: (Utc::now() - chrono::Duration::minutes(minutes_ago)).into(),
        }
    }

    #[tokio::test]
    async fn analyze_returns_the_record_when_storage_fails() -> Result<(), Error> {
        // No query results queued: the insert fails.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let orchestrator = ResponseOrchestrator::new(&Disabled, &Disabled, EngineTuning::default());

        let record = analyze(
            &db,
            &orchestrator,
            &AnalysisRequest {
                text: "Nothing special today".to_string(),
                ..Default::default()
            },
        )
        .await?;

        assert!(record.id.is_none());
        assert_eq!(record.sentiment, Label::Neutral);

        Ok(())
    }

    #[tokio::test]
    async fn analyze_sets_the_id_of_the_stored_row() -> Result<(), Error> {
        let row = stored(0.0, 0);
        let now = Utc::now();
        let session = user_sessions::Model {
            id: entity::Id::new_v4(),
            session_id: "session-1".to_string(),
            created_at: now.into(),
            last_activity_at: now.into(),
            total_analyses: 1,
            emotional_trend: None,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![row.clone()]])
            .append_query_results(vec![vec![session]])
            .into_connection();
        let orchestrator = ResponseOrchestrator::new(&Disabled, &Disabled, EngineTuning::default());

        let record = analyze(
            &db,
            &orchestrator,
            &AnalysisRequest {
                text: "Nothing special today".to_string(),
                session_id: Some("session-1".to_string()),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(record.id, Some(row.id));

        Ok(())
    }

    #[tokio::test]
    async fn analyze_rolls_back_when_the_session_update_fails() -> Result<(), Error> {
        // Only the analysis insert succeeds; the session upsert has nothing to return.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![stored(0.0, 0)]])
            .into_connection();
        let orchestrator = ResponseOrchestrator::new(&Disabled, &Disabled, EngineTuning::default());

        let record = analyze(
            &db,
            &orchestrator,
            &AnalysisRequest {
                text: "Nothing special today".to_string(),
                session_id: Some("session-1".to_string()),
                ..Default::default()
            },
        )
        .await?;

        assert!(record.id.is_none());
        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("BEGIN"));
        assert!(log.contains("ROLLBACK"));
        assert!(!log.contains("COMMIT"));

        Ok(())
    }

    #[tokio::test]
    async fn session_trends_reads_the_timeline_oldest_first() -> Result<(), Error> {
        // Newest first, as the database returns them.
        let rows = vec![
            stored(0.5, 1),
            stored(0.3, 2),
            stored(-0.3, 3),
            stored(-0.5, 4),
        ];
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![rows])
            .into_connection();

        let trends = session_trends(&db, "session-1").await?;

        assert_eq!(trends.total_analyses, 4);
        assert_eq!(trends.trends.unwrap().trend, Trend::Improving);

        Ok(())
    }

    #[tokio::test]
    async fn session_trends_is_empty_for_unknown_sessions() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new()])
            .into_connection();

        let trends = session_trends(&db, "missing").await?;

        assert_eq!(trends.total_analyses, 0);
        assert!(trends.trends.is_none());

        Ok(())
    }
}
