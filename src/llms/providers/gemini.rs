//! Google Gemini completion provider.
//!
//! Talks to the Gemini API `generateContent` endpoint over reqwest. The
//! gateway sends one user turn containing the fully rendered prompt, so
//! the request body is a single `contents` entry with one text part.
//!
//! # Authentication
//!
//! The API key is sent in the `x-goog-api-key` header rather than as the
//! `key` query parameter, so transport errors (which carry the request
//! URL) can never leak it into logs.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ApiKey;
use crate::llms::base_llm::BaseLLM;
use crate::llms::error::LLMError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default Gemini model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default Gemini API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Maximum number of response-body bytes kept in error messages.
const ERROR_BODY_LIMIT: usize = 500;

// ---------------------------------------------------------------------------
// GeminiCompletion provider
// ---------------------------------------------------------------------------

/// Google Gemini completion implementation.
///
/// # Example
///
/// ```ignore
/// let provider = GeminiCompletion::new(
///     "gemini-1.5-flash",
///     ApiKey::new("..."),
///     DEFAULT_BASE_URL,
///     Duration::from_secs(8),
/// )?;
/// let text = provider.call("Say hi").await?;
/// ```
#[derive(Debug, Clone)]
pub struct GeminiCompletion {
    /// Model name (e.g. "gemini-1.5-flash").
    model: String,
    /// API credential.
    api_key: ApiKey,
    /// API root, without a trailing slash.
    base_url: String,
    /// Shared HTTP client.
    client: reqwest::Client,
}

impl GeminiCompletion {
    /// Create a new Gemini completion provider.
    ///
    /// # Arguments
    ///
    /// * `model` - Gemini model name.
    /// * `api_key` - API credential.
    /// * `base_url` - API root (see [`DEFAULT_BASE_URL`]).
    /// * `timeout` - Whole-request timeout applied by the HTTP client.
    pub fn new(
        model: impl Into<String>,
        api_key: ApiKey,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LLMError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .build()?;

        Ok(Self {
            model: model.into(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Get the API endpoint URL.
    fn api_endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Build the request body for a single-prompt completion.
    pub fn build_request_body(prompt: &str) -> Value {
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }]
        })
    }

    /// Parse a Gemini API response into the generated text.
    ///
    /// Text parts of the first candidate are concatenated.
    pub fn parse_response(response: &Value) -> Result<String, LLMError> {
        if let Some(error) = response.get("error") {
            let msg = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown Gemini API error");
            return Err(LLMError::Api(msg.to_string()));
        }

        let parts = response
            .get("candidates")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .and_then(|c| c.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.as_array())
            .ok_or(LLMError::EmptyResponse)?;

        let text: String = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
            .collect();

        if text.trim().is_empty() {
            return Err(LLMError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl BaseLLM for GeminiCompletion {
    fn model(&self) -> &str {
        &self.model
    }

    fn provider(&self) -> &str {
        "gemini"
    }

    async fn call(&self, prompt: &str) -> Result<String, LLMError> {
        tracing::debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            "GeminiCompletion.call"
        );

        if self.api_key.expose().is_empty() {
            return Err(LLMError::MissingApiKey);
        }

        let response = self
            .client
            .post(self.api_endpoint())
            .header("content-type", "application/json")
            .header("x-goog-api-key", self.api_key.expose())
            .json(&Self::build_request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            let mut body = response_text;
            if body.len() > ERROR_BODY_LIMIT {
                let mut end = ERROR_BODY_LIMIT;
                while !body.is_char_boundary(end) {
                    end -= 1;
                }
                body.truncate(end);
            }
            return Err(LLMError::Status { status, body });
        }

        let response_json: Value = serde_json::from_str(&response_text)?;

        if let Some(usage) = response_json.get("usageMetadata") {
            tracing::debug!(
                prompt_tokens = usage
                    .get("promptTokenCount")
                    .and_then(|v| v.as_i64())
                    .unwrap_or(0),
                completion_tokens = usage
                    .get("candidatesTokenCount")
                    .and_then(|v| v.as_i64())
                    .unwrap_or(0),
                "Gemini usage"
            );
        }

        Self::parse_response(&response_json)
    }
}
