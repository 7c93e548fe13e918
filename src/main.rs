//! Emotion platform server: wires configuration, logging, storage and the AI
//! collaborator gateways into the web layer.

use log::*;
use service::{config::Config, logging::Logger, AppState};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::new();

    Logger::init_logger(&config);

    info!("Starting up the emotion platform in {} mode...", config.runtime_env());

    let sentiment_provider = match domain::gateway::sentiment_provider(&config) {
        Ok(provider) => provider,
        Err(e) => {
            error!("Failed to build the sentiment gateway: {e}");
            return ExitCode::FAILURE;
        }
    };

    let generation_provider = match domain::gateway::generation_provider(&config) {
        Ok(provider) => provider,
        Err(e) => {
            error!("Failed to build the generation gateway: {e}");
            return ExitCode::FAILURE;
        }
    };

    let db = match service::init_database(&config).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to connect to the database: {e}");
            return ExitCode::FAILURE;
        }
    };

    let app_state = AppState::new(config, &db)
        .with_sentiment_provider(sentiment_provider)
        .with_generation_provider(generation_provider);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server stopped with an error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
