//! Ollama completion client for query rewrite suggestions.
//!
//! The client talks to a locally hosted model over the Ollama HTTP API
//! (`POST {base_url}/api/generate`, non-streaming) and retries transient
//! failures with exponential backoff.
//!
//! # Retry Behavior
//!
//! Retried:
//! - Connection failures and timeouts
//! - Rate limiting (429)
//! - Server errors (5xx)
//!
//! Delays start at `initial_delay_ms`, grow by `backoff_factor` and are capped
//! at `max_delay_ms`. With the defaults that is at most 3 attempts, waiting
//! 500 ms then 1000 ms.
//!
//! # Example
//!
//! ```
//! use sql_advisor::{
//!     config::{LlmConfig, RetryConfig},
//!     llm::LlmClient
//! };
//!
//! let client = LlmClient::new(&LlmConfig::default(), RetryConfig::default());
//! assert_eq!(client.model(), "qwen2.5:7b-instruct");
//! ```

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::{
    config::{LlmConfig, RetryConfig},
    error::{AppError, AppResult, http_error, llm_api_error},
    query::SqlDialect
};

/// Prefix of the suggestion text when no completion could be obtained
pub const UNAVAILABLE_PREFIX: &str = "LLM unavailable";

/// Sampling options for a single completion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens:  u32
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            max_tokens:  512
        }
    }
}

/// HTTP client for the Ollama API with retry support.
pub struct LlmClient {
    base_url:     String,
    model:        String,
    options:      CompletionOptions,
    client:       reqwest::Client,
    retry_config: RetryConfig
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model:   &'a str,
    prompt:  &'a str,
    stream:  bool,
    options: GenerateOptions
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String
}

impl LlmClient {
    /// Create a client from configuration
    pub fn new(config: &LlmConfig, retry_config: RetryConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            base_url: config.ollama_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            options: CompletionOptions {
                temperature: config.temperature,
                max_tokens:  config.max_tokens
            },
            client,
            retry_config
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model to rewrite a normalized query.
    ///
    /// Never fails: when every attempt fails the returned text is
    /// `"LLM unavailable: <error>"`.
    pub async fn suggest(&self, dialect: SqlDialect, normalized: &str) -> String {
        let prompt = rewrite_prompt(dialect, normalized);
        match self.complete(&prompt, &self.options).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "LLM suggestion unavailable");
                format!("{}: {}", UNAVAILABLE_PREFIX, e)
            }
        }
    }

    /// Run one completion with automatic retry; returns the trimmed text
    pub async fn complete(&self, prompt: &str, options: &CompletionOptions) -> AppResult<String> {
        let mut last_error = None;
        let mut delay = self.retry_config.initial_delay_ms;
        for attempt in 0..=self.retry_config.max_retries {
            if attempt > 0 {
                warn!(
                    attempt = attempt + 1,
                    max_attempts = self.retry_config.max_retries + 1,
                    delay_ms = delay,
                    "retrying LLM request"
                );
                sleep(Duration::from_millis(delay)).await;
                delay = ((delay as f64 * self.retry_config.backoff_factor) as u64)
                    .min(self.retry_config.max_delay_ms);
            }
            match self.generate(prompt, options).await {
                Ok(result) => return Ok(result),
                Err(failure) if failure.transient => last_error = Some(failure.error),
                Err(failure) => return Err(failure.error)
            }
        }
        Err(last_error.unwrap_or_else(|| llm_api_error("All retry attempts failed")))
    }

    async fn generate(&self, prompt: &str, options: &CompletionOptions) -> Result<String, Failure> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: options.temperature,
                num_predict: options.max_tokens
            }
        };
        let url = format!("{}/api/generate", self.base_url);
        debug!(%url, model = %self.model, "sending completion request");
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(Failure::request)?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Failure::status(status, &text));
        }
        let result: GenerateResponse = response.json().await.map_err(Failure::request)?;
        Ok(result.response.trim().to_string())
    }
}

/// Error of one attempt, classified where it is produced
struct Failure {
    error:     AppError,
    transient: bool
}

impl Failure {
    fn request(err: reqwest::Error) -> Self {
        let transient =
            err.is_timeout() || err.is_connect() || err.status().is_some_and(is_transient_status);
        Self {
            error: http_error(err),
            transient
        }
    }

    fn status(status: StatusCode, body: &str) -> Self {
        Self {
            error:     llm_api_error(format!("Ollama API error {}: {}", status, body)),
            transient: is_transient_status(status)
        }
    }
}

/// Rate limiting and server errors
fn is_transient_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Prompt asking for a semantically equivalent rewrite
pub fn rewrite_prompt(dialect: SqlDialect, normalized: &str) -> String {
    format!(
        "Rewrite the SQL query keeping it semantically equivalent and explain the potential \
         gains.\nDialect: {}\nSQL:\n{}\n",
        dialect, normalized
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_dialect_and_sql() {
        let prompt = rewrite_prompt(SqlDialect::MySql, "SELECT 1");
        assert!(prompt.contains("Dialect: mysql"));
        assert!(prompt.ends_with("SQL:\nSELECT 1\n"));
    }

    #[test]
    fn test_transient_statuses() {
        assert!(is_transient_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_transient_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_transient_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!is_transient_status(StatusCode::NOT_FOUND));
        assert!(!is_transient_status(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_status_failure_ignores_message_text() {
        let failure = Failure::status(
            StatusCode::NOT_FOUND,
            "model missing at http://10.0.0.5:5000, connection reset, timeout 500"
        );
        assert!(!failure.transient);

        let failure = Failure::status(StatusCode::BAD_GATEWAY, "");
        assert!(failure.transient);
    }

    #[tokio::test]
    async fn test_refused_connection_is_transient() {
        let client = reqwest::Client::new();
        let err = client
            .get("http://127.0.0.1:9/api/generate")
            .send()
            .await
            .unwrap_err();
        assert!(Failure::request(err).transient);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = LlmConfig {
            ollama_url: "http://127.0.0.1:11434/".into(),
            ..LlmConfig::default()
        };
        let client = LlmClient::new(&config, RetryConfig::default());
        assert_eq!(client.base_url, "http://127.0.0.1:11434");
    }
}
