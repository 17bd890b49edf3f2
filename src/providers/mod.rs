/*!
 * Provider implementations for the translation service.
 *
 * This module contains client implementations for completion providers:
 * - OpenAI: OpenAI chat-completions API (and compatible servers)
 * - Mock: scripted provider used by the test suite
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Chat message object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Provider-neutral completion request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionRequest {
    /// Messages of the conversation, in order
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message to the request
    pub fn add_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Content of the last user message, if any
    pub fn user_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_str())
    }
}

/// Text produced by a provider
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// The generated text
    pub text: String,
    /// Prompt tokens reported by the service
    pub prompt_tokens: Option<u64>,
    /// Completion tokens reported by the service
    pub completion_tokens: Option<u64>,
}

/// Common trait for all completion providers
///
/// This trait defines the interface the translation service relies on,
/// allowing real clients and test doubles to be used interchangeably.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Completion, ProviderError>` - The generated text or an error
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ProviderError>;

    /// Short provider name for log output
    fn name(&self) -> &str;
}

pub mod mock;
pub mod openai;
