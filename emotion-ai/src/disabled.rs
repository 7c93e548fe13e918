//! Provider used when no external service has been configured.

use crate::traits::{generation, sentiment};
use crate::types::generation::Config;
use crate::types::sentiment::Classification;
use crate::Error;
use async_trait::async_trait;

/// Stand-in for an unconfigured collaborator. Every call fails with
/// `Error::Configuration`, which callers absorb through their fallback paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disabled;

const PROVIDER_ID: &str = "disabled";

#[async_trait]
impl sentiment::Provider for Disabled {
    async fn classify_sentiment(
        &self,
        _text: &str,
        _language_code: &str,
    ) -> Result<Classification, Error> {
        Err(Error::Configuration(
            "no sentiment provider configured".to_string(),
        ))
    }

    async fn detect_language(&self, _text: &str) -> Result<Option<String>, Error> {
        Err(Error::Configuration(
            "no sentiment provider configured".to_string(),
        ))
    }

    fn provider_id(&self) -> &str {
        PROVIDER_ID
    }
}

#[async_trait]
impl generation::Provider for Disabled {
    async fn generate(&self, _config: Config) -> Result<String, Error> {
        Err(Error::Configuration(
            "no generation provider configured".to_string(),
        ))
    }

    fn provider_id(&self) -> &str {
        PROVIDER_ID
    }
}
