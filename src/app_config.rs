use anyhow::{anyhow, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::errors::AppError;

/// Application configuration module
/// This module handles the application configuration: the content API
/// credentials, the translation service settings and the block markers,
/// all read once at startup from the process environment.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Content API (WordPress REST) settings
    pub content_api: ContentApiConfig,

    /// Translation service settings
    pub translation: TranslationConfig,

    /// Structural markers that select translatable blocks
    #[serde(default)]
    pub markers: MarkerConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Environment variable names
pub mod env_keys {
    pub const API_URL: &str = "WP_API_URL";
    pub const USERNAME: &str = "WP_USERNAME";
    pub const PASSWORD: &str = "WP_PASSWORD";
    pub const OPENAI_TOKEN: &str = "OPENAI_TOKEN";
    pub const OPENAI_API_BASE: &str = "OPENAI_API_BASE";
    pub const OPENAI_MODEL: &str = "OPENAI_MODEL";
    pub const RETRY_COUNT: &str = "TRANSLATE_RETRY_COUNT";
    pub const RETRY_DELAY_SECS: &str = "TRANSLATE_RETRY_DELAY_SECS";
    pub const HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
}

/// Content API configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ContentApiConfig {
    /// Base URL of the REST API, e.g. `https://example.com/wp-json/wp/v2`
    #[serde(default)]
    pub base_url: String,

    /// Account used for basic authentication
    #[serde(default)]
    pub username: String,

    /// Password or application password
    #[serde(default)]
    pub password: String,

    /// Request timeout in seconds; no timeout when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ContentApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            username: String::new(),
            password: String::new(),
            timeout_secs: None,
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// API key for the completion service
    #[serde(default)]
    pub api_key: String,

    /// Service endpoint URL (OpenAI-compatible)
    #[serde(default = "default_openai_endpoint")]
    pub endpoint: String,

    /// Model name (e.g., "gpt-3.5-turbo", "gpt-4")
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// System prompt sent with every request
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// User prompt template
    /// Placeholders: {target_language}, {text}
    #[serde(default = "default_user_prompt")]
    pub user_prompt: String,

    /// Sampling temperature; the service default is used when unset
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Total number of attempts when the service is unavailable
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Fixed delay between attempts, in seconds
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,

    /// Request timeout in seconds; no timeout when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_openai_endpoint(),
            model: default_openai_model(),
            system_prompt: default_system_prompt(),
            user_prompt: default_user_prompt(),
            temperature: None,
            retry_count: default_retry_count(),
            retry_delay_secs: default_retry_delay_secs(),
            timeout_secs: None,
        }
    }
}

/// Markers identifying editor blocks worth translating
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MarkerConfig {
    /// Token opening a block marker
    #[serde(default = "default_marker_open")]
    pub open: String,

    /// Token closing a block marker
    #[serde(default = "default_marker_close")]
    pub close: String,

    /// Block names whose content is sent for translation
    #[serde(default = "default_translatable_blocks")]
    pub translatable_blocks: Vec<String>,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            open: default_marker_open(),
            close: default_marker_close(),
            translatable_blocks: default_translatable_blocks(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the `log` facade
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(anyhow!("Invalid log level: {}", s)),
        }
    }
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    10
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_system_prompt() -> String {
    "You are a helpful assistant that translates English HTML content to another language while retaining the structure.".to_string()
}

fn default_user_prompt() -> String {
    "Translate the following English HTML content to {target_language}:\n\n{text}\n\nTranslated Content:".to_string()
}

fn default_marker_open() -> String {
    "<!-- wp:".to_string()
}

fn default_marker_close() -> String {
    " -->".to_string()
}

fn default_translatable_blocks() -> Vec<String> {
    vec!["paragraph".to_string(), "heading".to_string()]
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first when present.
    /// Credentials are not checked here: a missing value surfaces as the
    /// failure of the first request that needs it.
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit env file, then the environment
    pub fn from_env_file(path: &Path) -> Result<Self, AppError> {
        dotenvy::from_path(path).map_err(|e| {
            AppError::Config(format!("Failed to load env file {}: {}", path.display(), e))
        })?;
        Self::from_vars(std::env::vars())
    }

    /// Build configuration from key/value pairs
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let text = |key: &str| vars.get(key).cloned().unwrap_or_default();

        let mut config = Config::default();

        config.content_api.base_url = text(env_keys::API_URL);
        config.content_api.username = text(env_keys::USERNAME);
        config.content_api.password = text(env_keys::PASSWORD);
        config.translation.api_key = text(env_keys::OPENAI_TOKEN);

        if let Some(endpoint) = non_empty(&vars, env_keys::OPENAI_API_BASE) {
            config.translation.endpoint = endpoint.to_string();
        }

        if let Some(model) = non_empty(&vars, env_keys::OPENAI_MODEL) {
            config.translation.model = model.to_string();
        }

        if let Some(count) = parse_number::<u32>(&vars, env_keys::RETRY_COUNT)? {
            config.translation.retry_count = count;
        }

        if let Some(delay) = parse_number::<u64>(&vars, env_keys::RETRY_DELAY_SECS)? {
            config.translation.retry_delay_secs = delay;
        }

        if let Some(timeout) = parse_number::<u64>(&vars, env_keys::HTTP_TIMEOUT_SECS)? {
            config.content_api.timeout_secs = Some(timeout);
            config.translation.timeout_secs = Some(timeout);
        }

        if let Some(level) = non_empty(&vars, env_keys::LOG_LEVEL) {
            config.log_level = level
                .parse()
                .map_err(|e: anyhow::Error| AppError::Config(e.to_string()))?;
        }

        Ok(config)
    }
}

fn non_empty<'a>(vars: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    vars.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn parse_number<T: std::str::FromStr>(
    vars: &HashMap<String, String>,
    key: &str,
) -> Result<Option<T>, AppError> {
    match non_empty(vars, key) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::Config(format!("{} must be a number, got '{}'", key, raw))),
        None => Ok(None),
    }
}
