use config::Config;
use emotion_ai::disabled::Disabled;
use emotion_ai::{generation, sentiment};
use log::info;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::sync::Arc;
use tokio::time::Duration;

pub mod config;
pub mod logging;

/// PostgreSQL schema holding every table owned by this service.
pub const DATABASE_SCHEMA: &str = "emotion_platform";

pub async fn init_database(config: &Config) -> Result<DatabaseConnection, DbErr> {
    info!(
        "Database pool config: max_connections={}, min_connections={}, \
         connect_timeout={}s, acquire_timeout={}s, idle_timeout={}s, max_lifetime={}s",
        config.db_max_connections,
        config.db_min_connections,
        config.db_connect_timeout_secs,
        config.db_acquire_timeout_secs,
        config.db_idle_timeout_secs,
        config.db_max_lifetime_secs,
    );

    let mut opt = ConnectOptions::new::<&str>(config.database_url());
    opt.max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .connect_timeout(Duration::from_secs(config.db_connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime_secs))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Info)
        .set_schema_search_path(DATABASE_SCHEMA);

    let db = Database::connect(opt).await?;

    Ok(db)
}

// Service-level state: the database pool, the configuration and the two
// external AI collaborators. Cloned into every axum handler.
#[derive(Clone)]
pub struct AppState {
    pub database_connection: Arc<DatabaseConnection>,
    pub config: Config,
    sentiment_provider: Arc<dyn sentiment::Provider>,
    generation_provider: Arc<dyn generation::Provider>,
}

impl AppState {
    /// Both AI collaborators start out disabled; callers swap real gateways in
    /// with [`AppState::with_sentiment_provider`] and
    /// [`AppState::with_generation_provider`].
    pub fn new(app_config: Config, db: &Arc<DatabaseConnection>) -> Self {
        Self {
            database_connection: Arc::clone(db),
            config: app_config,
            sentiment_provider: Arc::new(Disabled),
            generation_provider: Arc::new(Disabled),
        }
    }

    pub fn with_sentiment_provider(mut self, provider: Arc<dyn sentiment::Provider>) -> Self {
        self.sentiment_provider = provider;
        self
    }

    pub fn with_generation_provider(mut self, provider: Arc<dyn generation::Provider>) -> Self {
        self.generation_provider = provider;
        self
    }

    pub fn db_conn_ref(&self) -> &DatabaseConnection {
        self.database_connection.as_ref()
    }

    pub fn set_db_conn(&mut self, db: DatabaseConnection) {
        self.database_connection = Arc::new(db);
    }

    pub fn sentiment_provider(&self) -> &dyn sentiment::Provider {
        self.sentiment_provider.as_ref()
    }

    pub fn generation_provider(&self) -> &dyn generation::Provider {
        self.generation_provider.as_ref()
    }
}
