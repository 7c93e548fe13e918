//! OpenAI compatible chat completions client.

use super::http::{check_status, send_error, HttpClientBuilder, HttpClientConfig};
use async_trait::async_trait;
use emotion_ai::generation;
use emotion_ai::types::generation::Config as GenerationConfig;
use log::*;
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenAiClient {
    client: ClientWithMiddleware,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        http_config: HttpClientConfig,
    ) -> Result<Self, emotion_ai::Error> {
        let client = HttpClientBuilder::new(http_config)
            .with_secret_header("authorization", &format!("Bearer {api_key}"))?
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl generation::Provider for OpenAiClient {
    async fn generate(&self, config: GenerationConfig) -> Result<String, emotion_ai::Error> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(
            "Requesting completion from {} (temperature {:.2}, max_tokens {})",
            self.model, config.temperature, config.max_tokens
        );

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &config.system_instructions,
                },
                ChatMessage {
                    role: "user",
                    content: &config.user_prompt,
                },
            ],
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(send_error)?;

        let body: ChatCompletionResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| emotion_ai::Error::Deserialization(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| emotion_ai::Error::Deserialization("empty completion".to_string()))
    }

    fn provider_id(&self) -> &str {
        "openai"
    }
}
