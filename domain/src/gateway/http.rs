//! Shared HTTP plumbing for the AI collaborator gateways: a retrying client
//! builder and translation of transport and status failures into
//! [`emotion_ai::Error`].

use std::time::{Duration, SystemTime};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};
use reqwest::{Response, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryDecision, RetryPolicy, RetryTransientMiddleware};

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    /// Retries after the first attempt for transient failures.
    pub max_retries: u32,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 2,
            user_agent: format!("emotion-platform/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl From<&service::config::Config> for HttpClientConfig {
    fn from(config: &service::config::Config) -> Self {
        Self {
            timeout: Duration::from_secs(config.external_timeout_secs),
            max_retries: config.external_max_retries,
            ..Self::default()
        }
    }
}

/// Builds a `reqwest` client wrapped in transient-retry middleware.
pub struct HttpClientBuilder {
    config: HttpClientConfig,
    headers: HeaderMap,
}

impl HttpClientBuilder {
    pub fn new(config: HttpClientConfig) -> Self {
        Self {
            config,
            headers: HeaderMap::new(),
        }
    }

    /// Adds a header sent with every request, marked sensitive so it never shows
    /// up in debug output.
    pub fn with_secret_header(
        mut self,
        name: &'static str,
        value: &str,
    ) -> Result<Self, emotion_ai::Error> {
        let mut header_value = HeaderValue::from_str(value).map_err(|_| {
            emotion_ai::Error::Configuration(format!("Invalid value for header {name}"))
        })?;
        header_value.set_sensitive(true);
        self.headers
            .insert(HeaderName::from_static(name), header_value);
        Ok(self)
    }

    pub fn build(self) -> Result<ClientWithMiddleware, emotion_ai::Error> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(self.config.timeout)
            .user_agent(self.config.user_agent)
            .default_headers(self.headers)
            .build()
            .map_err(|e| emotion_ai::Error::Configuration(e.to_string()))?;

        let retry_policy = BackoffPolicy::new(self.config.max_retries);
        Ok(ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build())
    }
}

/// Exponential backoff, doubling from one second and capped at ten.
pub struct BackoffPolicy {
    max_retries: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl BackoffPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }

    fn delay(&self, n_past_retries: u32) -> Duration {
        let delay = self.base_delay.as_secs_f64() * 2_f64.powi(n_past_retries as i32);
        Duration::from_secs_f64(delay.min(self.max_delay.as_secs_f64()))
    }
}

impl RetryPolicy for BackoffPolicy {
    fn should_retry(&self, _request_start_time: SystemTime, n_past_retries: u32) -> RetryDecision {
        if n_past_retries >= self.max_retries {
            RetryDecision::DoNotRetry
        } else {
            RetryDecision::Retry {
                execute_after: SystemTime::now() + self.delay(n_past_retries),
            }
        }
    }
}

/// Maps a failure to get any response at all.
pub fn send_error(err: reqwest_middleware::Error) -> emotion_ai::Error {
    match err {
        reqwest_middleware::Error::Reqwest(e) if e.is_timeout() => {
            emotion_ai::Error::Timeout(e.to_string())
        }
        reqwest_middleware::Error::Reqwest(e) => emotion_ai::Error::Network(e.to_string()),
        reqwest_middleware::Error::Middleware(e) => emotion_ai::Error::Network(e.to_string()),
    }
}

/// Passes successful responses through and turns the rest into errors.
pub async fn check_status(response: Response) -> Result<Response, emotion_ai::Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(emotion_ai::Error::Authentication(
            format!("request rejected with {status}"),
        )),
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after_seconds = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse().ok())
                .unwrap_or(0);
            Err(emotion_ai::Error::RateLimited {
                retry_after_seconds,
            })
        }
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(emotion_ai::Error::Provider(format!("{status}: {body}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_up_to_the_cap() {
        let policy = BackoffPolicy::new(5);

        assert_eq!(policy.delay(0).as_secs(), 1);
        assert_eq!(policy.delay(1).as_secs(), 2);
        assert_eq!(policy.delay(2).as_secs(), 4);
        assert_eq!(policy.delay(8), policy.max_delay);
    }

    #[test]
    fn policy_stops_after_max_retries() {
        let policy = BackoffPolicy::new(2);
        let start = SystemTime::now();

        assert!(matches!(
            policy.should_retry(start, 1),
            RetryDecision::Retry { .. }
        ));
        assert!(matches!(
            policy.should_retry(start, 2),
            RetryDecision::DoNotRetry
        ));
    }

    #[test]
    fn invalid_header_values_are_configuration_errors() {
        let result = HttpClientBuilder::new(HttpClientConfig::default())
            .with_secret_header("x-api-key", "bad\nvalue");

        assert!(matches!(
            result.err(),
            Some(emotion_ai::Error::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn builds_a_client() {
        let client = HttpClientBuilder::new(HttpClientConfig::default())
            .with_secret_header("x-api-key", "secret")
            .and_then(HttpClientBuilder::build);

        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn status_codes_map_to_provider_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/unauthorized")
            .with_status(401)
            .create_async()
            .await;
        let _mock = server
            .mock("GET", "/limited")
            .with_status(429)
            .with_header("retry-after", "7")
            .create_async()
            .await;
        let _mock = server
            .mock("GET", "/bad")
            .with_status(400)
            .with_body("missing Text")
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let get = |path: &str| client.get(format!("{}{path}", server.url())).send();

        let unauthorized = check_status(get("/unauthorized").await.unwrap()).await;
        assert!(matches!(
            unauthorized,
            Err(emotion_ai::Error::Authentication(_))
        ));

        let limited = check_status(get("/limited").await.unwrap()).await;
        assert!(matches!(
            limited,
            Err(emotion_ai::Error::RateLimited {
                retry_after_seconds: 7
            })
        ));

        match check_status(get("/bad").await.unwrap()).await {
            Err(emotion_ai::Error::Provider(message)) => {
                assert!(message.contains("400"));
                assert!(message.contains("missing Text"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
