use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TYPE emotion_platform.sentiment AS ENUM (
                    'positive',
                    'negative',
                    'neutral',
                    'mixed'
                )",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared("ALTER TYPE emotion_platform.sentiment OWNER TO emotion")
            .await?;

        let create_analyses_sql = r#"
            CREATE TABLE IF NOT EXISTS emotion_platform.emotion_analyses (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                session_id VARCHAR(255) NOT NULL,
                input_text TEXT NOT NULL,
                rephrased_text TEXT,
                original_text TEXT NOT NULL,
                language_code VARCHAR(16),
                sentiment emotion_platform.sentiment NOT NULL,
                sentiment_scores JSONB NOT NULL,
                emotion VARCHAR(100) NOT NULL,
                valence DOUBLE PRECISION NOT NULL,
                arousal DOUBLE PRECISION NOT NULL,
                confidence DOUBLE PRECISION NOT NULL,
                intensity VARCHAR(50) NOT NULL,
                strategy VARCHAR(100) NOT NULL,
                temperature DOUBLE PRECISION NOT NULL,
                feedback_detected BOOLEAN NOT NULL DEFAULT FALSE,
                adaptive_response TEXT NOT NULL,
                timestamp TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
        "#;

        manager
            .get_connection()
            .execute_unprepared(create_analyses_sql)
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_emotion_analyses_session_id
                    ON emotion_platform.emotion_analyses (session_id)",
            )
            .await?;

        // History and trend queries read a session's analyses ordered by time
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_emotion_analyses_session_id_timestamp
                    ON emotion_platform.emotion_analyses (session_id, timestamp DESC)",
            )
            .await?;

        let create_sessions_sql = r#"
            CREATE TABLE IF NOT EXISTS emotion_platform.user_sessions (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                session_id VARCHAR(255) NOT NULL UNIQUE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                last_activity_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                total_analyses INTEGER NOT NULL DEFAULT 0,
                emotional_trend VARCHAR(100)
            )
        "#;

        manager
            .get_connection()
            .execute_unprepared(create_sessions_sql)
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_user_sessions_last_activity_at
                    ON emotion_platform.user_sessions (last_activity_at DESC)",
            )
            .await?;

        for table in ["emotion_analyses", "user_sessions"] {
            manager
                .get_connection()
                .execute_unprepared(&format!(
                    "ALTER TABLE emotion_platform.{table} OWNER TO emotion"
                ))
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS emotion_platform.user_sessions")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS emotion_platform.emotion_analyses")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP TYPE IF EXISTS emotion_platform.sentiment")
            .await?;

        Ok(())
    }
}
