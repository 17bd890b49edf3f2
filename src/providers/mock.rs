/*!
 * Mock provider implementations for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds with tagged text
 * - `MockProvider::unavailable()` - Always answers "service unavailable"
 * - `MockProvider::unauthorized()` - Always fails with an authentication error
 * - `MockProvider::scripted(..)` - Plays a fixed sequence, then keeps working
 *
 * Every request is recorded so tests can inspect what was sent.
 */

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::{Completion, CompletionRequest, Provider};

/// Behavior of a single mock call
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Succeeds with the generated (or custom) response
    Working,
    /// Succeeds with a fixed text
    Reply(String),
    /// Fails with `ProviderError::ServiceUnavailable`
    Unavailable,
    /// Fails with `ProviderError::AuthenticationError`
    Unauthorized,
    /// Fails with `ProviderError::ApiError`
    ApiError { status_code: u16 },
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior once the script is exhausted
    fallback: MockBehavior,
    /// Behaviors consumed one per request
    script: Arc<Mutex<VecDeque<MockBehavior>>>,
    /// Request counter
    request_count: Arc<AtomicUsize>,
    /// Every request received, in order
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&CompletionRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            fallback: behavior,
            script: Arc::new(Mutex::new(VecDeque::new())),
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock provider whose service is always unavailable
    pub fn unavailable() -> Self {
        Self::new(MockBehavior::Unavailable)
    }

    /// Create a mock provider that always rejects the API key
    pub fn unauthorized() -> Self {
        Self::new(MockBehavior::Unauthorized)
    }

    /// Play `script` in order, then behave as `working()`
    pub fn scripted(script: Vec<MockBehavior>) -> Self {
        let provider = Self::working();
        if let Ok(mut queue) = provider.script.lock() {
            queue.extend(script);
        }
        provider
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&CompletionRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Copy of every request received so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Default response: the user message tagged as translated
    pub fn generate_response(request: &CompletionRequest) -> String {
        format!("[TRANSLATED] {}", request.user_text().unwrap_or_default())
    }

    fn next_behavior(&self) -> MockBehavior {
        self.script
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            fallback: self.fallback.clone(),
            script: Arc::clone(&self.script),
            request_count: Arc::clone(&self.request_count),
            requests: Arc::clone(&self.requests),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let text = match self.next_behavior() {
            MockBehavior::Working => match self.custom_response {
                Some(generator) => generator(&request),
                None => Self::generate_response(&request),
            },
            MockBehavior::Reply(text) => text,
            MockBehavior::Unavailable => {
                return Err(ProviderError::ServiceUnavailable(
                    "Simulated service unavailable".to_string(),
                ));
            }
            MockBehavior::Unauthorized => {
                return Err(ProviderError::AuthenticationError(
                    "Simulated invalid API key".to_string(),
                ));
            }
            MockBehavior::ApiError { status_code } => {
                return Err(ProviderError::ApiError {
                    status_code,
                    message: "Simulated API error".to_string(),
                });
            }
        };

        Ok(Completion {
            prompt_tokens: Some(request.messages.iter().map(|m| m.content.len() as u64).sum()),
            completion_tokens: Some(text.len() as u64),
            text,
        })
    }

    fn name(&self) -> &str {
        "Mock"
    }
}
