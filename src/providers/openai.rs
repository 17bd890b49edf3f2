use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::app_config::TranslationConfig;
use crate::errors::ProviderError;
use crate::providers::{ChatMessage, Completion, CompletionRequest, Provider};

/// OpenAI client for the chat-completions API
pub struct OpenAI {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API base URL (public API, Azure proxy or local compatible server)
    endpoint: String,
    /// Model used for every request
    model: String,
}

impl fmt::Debug for OpenAI {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAI")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// OpenAI chat-completion request
#[derive(Debug, Serialize)]
pub struct OpenAIRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<ChatMessage>,

    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl OpenAIRequest {
    /// Build a wire request from a provider-neutral one
    pub fn from_completion(model: impl Into<String>, request: CompletionRequest) -> Self {
        Self {
            model: model.into(),
            messages: request.messages,
            temperature: request.temperature,
        }
    }
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct TokenUsage {
    /// Number of prompt tokens
    pub prompt_tokens: u64,
    /// Number of completion tokens
    pub completion_tokens: u64,
}

/// Message inside a completion alternative
#[derive(Debug, Deserialize)]
pub struct OpenAIResponseMessage {
    /// Author role, normally "assistant"
    #[serde(default)]
    pub role: Option<String>,
    /// Generated text; null when the answer was filtered or refused
    #[serde(default)]
    pub content: Option<String>,
    /// Refusal explanation, when the model declined
    #[serde(default)]
    pub refusal: Option<String>,
}

/// One completion alternative
#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    /// The generated message
    pub message: OpenAIResponseMessage,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// OpenAI chat-completion response
#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    /// Generated alternatives
    pub choices: Vec<OpenAIChoice>,
    /// Token usage information
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl OpenAI {
    /// Create a new OpenAI client; requests wait as long as the service takes
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self::build(api_key, endpoint, model, None)
    }

    /// Create a new OpenAI client with a request timeout
    pub fn with_timeout(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self::build(api_key, endpoint, model, Some(timeout))
    }

    /// Create a client from the translation configuration
    pub fn from_config(config: &TranslationConfig) -> Self {
        Self::build(
            &config.api_key,
            &config.endpoint,
            &config.model,
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    fn build(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Self {
            client: builder.build().unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    /// URL of the chat-completions endpoint
    pub fn completions_url(&self) -> String {
        if self.endpoint.is_empty() {
            "https://api.openai.com/v1/chat/completions".to_string()
        } else {
            format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
        }
    }

    /// Extract text from an OpenAI response: the first choice, verbatim
    pub fn extract_text_from_response(response: &OpenAIResponse) -> Result<String, ProviderError> {
        let choice = response
            .choices
            .first()
            .ok_or_else(|| ProviderError::ParseError("Response contained no choices".to_string()))?;

        if let Some(content) = &choice.message.content {
            return Ok(content.clone());
        }

        let reason = match (&choice.message.refusal, &choice.finish_reason) {
            (Some(refusal), _) => format!("refused: {}", refusal),
            (None, Some(finish_reason)) => format!("finish reason: {}", finish_reason),
            (None, None) => "no reason given".to_string(),
        };
        Err(ProviderError::ParseError(format!("Response message had no content ({})", reason)))
    }

    /// Map an unsuccessful HTTP answer to a provider error
    pub fn error_for_status(status: StatusCode, body: &str) -> ProviderError {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| body.to_string());

        match status {
            StatusCode::SERVICE_UNAVAILABLE => ProviderError::ServiceUnavailable(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::AuthenticationError(message),
            StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded(message),
            _ => ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl Provider for OpenAI {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ProviderError> {
        let api_url = self.completions_url();
        let request = OpenAIRequest::from_completion(&self.model, request);

        let response = self
            .client
            .post(&api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("OpenAI API error ({}): {}", status, error_text);
            return Err(Self::error_for_status(status, &error_text));
        }

        let openai_response = response
            .json::<OpenAIResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        if let Some(usage) = &openai_response.usage {
            debug!(
                "OpenAI usage: {} prompt tokens, {} completion tokens",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(Completion {
            text: Self::extract_text_from_response(&openai_response)?,
            prompt_tokens: openai_response.usage.as_ref().map(|u| u.prompt_tokens),
            completion_tokens: openai_response.usage.as_ref().map(|u| u.completion_tokens),
        })
    }

    fn name(&self) -> &str {
        "OpenAI"
    }
}
