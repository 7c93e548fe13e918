//! Client for a JSON sentiment classification service speaking the Amazon
//! Comprehend request and response shapes.

use super::http::{check_status, send_error, HttpClientBuilder, HttpClientConfig};
use async_trait::async_trait;
use emotion_ai::{sentiment, Classification, Label, Scores};
use log::*;
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct DetectSentimentRequest<'a> {
    text: &'a str,
    language_code: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DetectSentimentResponse {
    sentiment: String,
    sentiment_score: Scores,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct DetectDominantLanguageRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DetectDominantLanguageResponse {
    #[serde(default)]
    languages: Vec<DominantLanguage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DominantLanguage {
    language_code: String,
    #[allow(dead_code)]
    #[serde(default)]
    score: Option<f64>,
}

pub struct SentimentServiceClient {
    client: ClientWithMiddleware,
    base_url: String,
}

impl SentimentServiceClient {
    pub fn new(
        base_url: &str,
        api_key: Option<&str>,
        http_config: HttpClientConfig,
    ) -> Result<Self, emotion_ai::Error> {
        let mut builder = HttpClientBuilder::new(http_config);
        if let Some(api_key) = api_key {
            builder = builder.with_secret_header(API_KEY_HEADER, api_key)?;
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl sentiment::Provider for SentimentServiceClient {
    async fn classify_sentiment(
        &self,
        text: &str,
        language_code: &str,
    ) -> Result<Classification, emotion_ai::Error> {
        let url = format!("{}/detect-sentiment", self.base_url);
        debug!("Classifying sentiment of {} characters", text.chars().count());

        let response = self
            .client
            .post(&url)
            .json(&DetectSentimentRequest {
                text,
                language_code,
            })
            .send()
            .await
            .map_err(send_error)?;

        let body: DetectSentimentResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| emotion_ai::Error::Deserialization(e.to_string()))?;

        Ok(Classification {
            label: Label::from_provider_label(&body.sentiment),
            scores: body.sentiment_score,
        })
    }

    async fn detect_language(&self, text: &str) -> Result<Option<String>, emotion_ai::Error> {
        let url = format!("{}/detect-dominant-language", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&DetectDominantLanguageRequest { text })
            .send()
            .await
            .map_err(send_error)?;

        let body: DetectDominantLanguageResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| emotion_ai::Error::Deserialization(e.to_string()))?;

        Ok(body
            .languages
            .into_iter()
            .next()
            .map(|language| language.language_code))
    }

    fn provider_id(&self) -> &str {
        "sentiment_service"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emotion_ai::sentiment::Provider;
    use mockito::Matcher;

    fn client(server: &mockito::ServerGuard) -> SentimentServiceClient {
        SentimentServiceClient::new(
            &server.url(),
            Some("secret"),
            HttpClientConfig {
                max_retries: 0,
                ..HttpClientConfig::default()
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn classify_sentiment_parses_comprehend_shaped_responses() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/detect-sentiment")
            .match_header("x-api-key", "secret")
            .match_body(Matcher::Json(serde_json::json!({
                "Text": "I love this",
                "LanguageCode": "en"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"Sentiment":"POSITIVE","SentimentScore":{"Positive":0.9,"Negative":0.02,"Neutral":0.05,"Mixed":0.03}}"#,
            )
            .create_async()
            .await;

        let classification = client(&server)
            .classify_sentiment("I love this", "en")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(classification.label, Label::Positive);
        assert_eq!(classification.scores.positive, 0.9);
        assert_eq!(classification.scores.mixed, 0.03);
    }

    #[tokio::test]
    async fn unknown_sentiment_labels_become_neutral() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/detect-sentiment")
            .with_status(200)
            .with_body(
                r#"{"Sentiment":"SARCASTIC","SentimentScore":{"Positive":0.3,"Negative":0.3,"Neutral":0.3,"Mixed":0.1}}"#,
            )
            .create_async()
            .await;

        let classification = client(&server)
            .classify_sentiment("sure, great", "en")
            .await
            .unwrap();

        assert_eq!(classification.label, Label::Neutral);
    }

    #[tokio::test]
    async fn classify_sentiment_reports_provider_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/detect-sentiment")
            .with_status(400)
            .with_body("TextSizeLimitExceededException")
            .create_async()
            .await;

        let result = client(&server).classify_sentiment("text", "en").await;

        assert!(matches!(result, Err(emotion_ai::Error::Provider(_))));
    }

    #[tokio::test]
    async fn malformed_bodies_are_deserialization_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/detect-sentiment")
            .with_status(200)
            .with_body(r#"{"unexpected":true}"#)
            .create_async()
            .await;

        let result = client(&server).classify_sentiment("text", "en").await;

        assert!(matches!(result, Err(emotion_ai::Error::Deserialization(_))));
    }

    #[tokio::test]
    async fn detect_language_takes_the_first_language() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/detect-dominant-language")
            .match_body(Matcher::Json(serde_json::json!({ "Text": "hola amigos" })))
            .with_status(200)
            .with_body(
                r#"{"Languages":[{"LanguageCode":"es","Score":0.98},{"LanguageCode":"pt","Score":0.01}]}"#,
            )
            .create_async()
            .await;

        let language = client(&server).detect_language("hola amigos").await.unwrap();

        assert_eq!(language.as_deref(), Some("es"));
    }

    #[tokio::test]
    async fn detect_language_without_candidates_is_none() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/detect-dominant-language")
            .with_status(200)
            .with_body(r#"{"Languages":[]}"#)
            .create_async()
            .await;

        let language = client(&server).detect_language("?!").await.unwrap();

        assert!(language.is_none());
    }
}
