/*!
 * Error types for the wp-translate application.
 *
 * This module contains custom error types for the content API, the
 * translation provider and the translation loop, using the thiserror crate
 * for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The service reported that it is temporarily unavailable (HTTP 503)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Whether this failure is eligible for a retry.
    ///
    /// Only a "service unavailable" answer is transient; everything else
    /// (authentication, rate limiting, malformed requests, network and parse
    /// failures) propagates on the first occurrence.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ServiceUnavailable(_))
    }
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The provider stayed unavailable for every allowed attempt
    #[error("Translation service still unavailable after {attempts} attempts: {source}")]
    Transient {
        /// Number of attempts made
        attempts: u32,
        /// Last error reported by the provider
        #[source]
        source: ProviderError,
    },

    /// Non-retryable provider failure
    #[error("Provider error: {0}")]
    Fatal(#[from] ProviderError),
}

impl TranslationError {
    /// The underlying provider error
    pub fn provider_error(&self) -> &ProviderError {
        match self {
            Self::Transient { source, .. } => source,
            Self::Fatal(source) => source,
        }
    }
}

/// Errors that can occur when talking to the content API
#[derive(Error, Debug)]
pub enum ContentError {
    /// The post could not be retrieved (non-200 answer)
    #[error("Error retrieving post. Status code: {status_code}")]
    Retrieval {
        /// HTTP status code
        status_code: u16,
    },

    /// The draft could not be created (non-201 answer)
    #[error("Error creating post. Status code: {status_code}")]
    Publish {
        /// HTTP status code
        status_code: u16,
        /// Raw response body, reported to the operator
        body: String,
    },

    /// The request never produced an HTTP answer
    #[error("Content API request failed: {0}")]
    Request(String),

    /// The answer could not be decoded
    #[error("Failed to parse content API response: {0}")]
    Parse(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration loading
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the content API
    #[error("Content API error: {0}")]
    Content(#[from] ContentError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),
}
