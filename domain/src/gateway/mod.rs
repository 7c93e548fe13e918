//! Gateways to the external AI collaborators.

use crate::error::Error;
use emotion_ai::disabled::Disabled;
use emotion_ai::{generation, sentiment};
use log::*;
use service::config::Config;
use std::sync::Arc;

pub mod http;
pub mod openai;
pub mod sentiment_service;

use http::HttpClientConfig;
use openai::OpenAiClient;
use sentiment_service::SentimentServiceClient;

/// Builds the sentiment classifier described by `config`, or [`Disabled`] when no
/// service URL is configured.
pub fn sentiment_provider(config: &Config) -> Result<Arc<dyn sentiment::Provider>, Error> {
    match config.sentiment_service_url() {
        Some(url) => {
            info!("Using sentiment service at {url}");
            let api_key = config.sentiment_service_api_key();
            let client =
                SentimentServiceClient::new(&url, api_key.as_deref(), HttpClientConfig::from(config))?;
            Ok(Arc::new(client))
        }
        None => {
            warn!("No sentiment service configured; every analysis will use the neutral fallback");
            Ok(Arc::new(Disabled))
        }
    }
}

/// Builds the text generator described by `config`, or [`Disabled`] when no API key
/// is configured.
pub fn generation_provider(config: &Config) -> Result<Arc<dyn generation::Provider>, Error> {
    match config.generation_api_key() {
        Some(api_key) => {
            info!(
                "Using generation model {} at {}",
                config.generation_model(),
                config.generation_base_url()
            );
            let client = OpenAiClient::new(
                config.generation_base_url(),
                &api_key,
                config.generation_model(),
                HttpClientConfig::from(config),
            )?;
            Ok(Arc::new(client))
        }
        None => {
            warn!("No generation API key configured; responses will come from templates");
            Ok(Arc::new(Disabled))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config() -> Config {
        Config::parse_from(["emotion_platform_rs"])
    }

    #[test]
    fn unconfigured_providers_are_disabled() {
        let config = config();

        assert_eq!(sentiment_provider(&config).unwrap().provider_id(), "disabled");
        assert_eq!(generation_provider(&config).unwrap().provider_id(), "disabled");
    }

    #[test]
    fn configured_providers_use_the_http_gateways() {
        let config = config()
            .set_sentiment_service_url("http://localhost:9000".to_string())
            .set_generation_api_key("sk-test".to_string());

        assert_eq!(
            sentiment_provider(&config).unwrap().provider_id(),
            "sentiment_service"
        );
        assert_eq!(generation_provider(&config).unwrap().provider_id(), "openai");
    }
}
