use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("CREATE SCHEMA IF NOT EXISTS emotion_platform;")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("SET search_path TO emotion_platform, public;")
            .await?;

        // The application connects as the `emotion` role
        manager
            .get_connection()
            .execute_unprepared(r#"
                DO $$ BEGIN
                    GRANT ALL ON SCHEMA emotion_platform TO emotion;

                    ALTER DEFAULT PRIVILEGES IN SCHEMA emotion_platform GRANT ALL ON TABLES TO emotion;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA emotion_platform GRANT ALL ON SEQUENCES TO emotion;
                END $$;
            "#)
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(r#"
                DO $$ BEGIN
                    ALTER DEFAULT PRIVILEGES IN SCHEMA emotion_platform REVOKE ALL ON SEQUENCES FROM emotion;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA emotion_platform REVOKE ALL ON TABLES FROM emotion;
                    REVOKE ALL ON SCHEMA emotion_platform FROM emotion;
                END $$;
            "#)
            .await?;

        // CASCADE removes every table and type in the schema
        manager
            .get_connection()
            .execute_unprepared("DROP SCHEMA IF EXISTS emotion_platform CASCADE;")
            .await?;

        Ok(())
    }
}
