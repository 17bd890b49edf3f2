/*!
 * Core translation service implementation.
 *
 * This module contains the TranslationService struct, which sends text to a
 * completion provider with bounded retry and walks a post body block by
 * block, translating only the blocks the classifier selects.
 */

use log::{debug, info, warn};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::blocks::{join_blocks, BlockClassifier};
use crate::errors::TranslationError;
use crate::providers::Provider;
use crate::translation::formatting::to_title_case;
use crate::translation::prompts::TranslationPrompt;
use crate::translation::retry::{RetryPolicy, Sleeper, TokioSleeper};
use crate::validation::MarkerValidator;

/// Token usage statistics for tracking API consumption
#[derive(Debug, Clone)]
pub struct TokenUsageStats {
    /// Number of prompt tokens
    pub prompt_tokens: u64,

    /// Number of completion tokens
    pub completion_tokens: u64,

    /// Total number of tokens
    pub total_tokens: u64,

    /// Number of successful requests
    pub requests: u64,

    /// Start time of token tracking
    pub start_time: Instant,

    /// Total time spent on API requests
    pub api_duration: Duration,

    /// Provider name
    pub provider: String,

    /// Model name
    pub model: String,
}

impl Default for TokenUsageStats {
    fn default() -> Self {
        Self::with_provider_info(String::new(), String::new())
    }
}

impl TokenUsageStats {
    /// Create new token usage stats with provider info
    pub fn with_provider_info(provider: String, model: String) -> Self {
        Self {
            prompt_tokens: 0,
            completion_tokens: 0,
            total_tokens: 0,
            requests: 0,
            start_time: Instant::now(),
            api_duration: Duration::from_secs(0),
            provider,
            model,
        }
    }

    /// Account for one successful request
    pub fn record(&mut self, prompt_tokens: Option<u64>, completion_tokens: Option<u64>, duration: Duration) {
        let prompt = prompt_tokens.unwrap_or(0);
        let completion = completion_tokens.unwrap_or(0);

        self.prompt_tokens += prompt;
        self.completion_tokens += completion;
        self.total_tokens += prompt + completion;
        self.requests += 1;
        self.api_duration += duration;
    }

    /// Generate a summary of token usage
    pub fn summary(&self) -> String {
        format!(
            "Token Usage Summary:\n\
             Provider: {}\n\
             Model: {}\n\
             Requests: {}\n\
             Prompt tokens: {}\n\
             Completion tokens: {}\n\
             Total tokens: {}\n\
             API request time: {:.2} seconds",
            self.provider,
            self.model,
            self.requests,
            self.prompt_tokens,
            self.completion_tokens,
            self.total_tokens,
            self.api_duration.as_secs_f64()
        )
    }
}

/// Translated post body with block counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedContent {
    /// Rejoined body
    pub content: String,
    /// Number of blocks in the body
    pub blocks_total: usize,
    /// Number of blocks sent to the service
    pub blocks_translated: usize,
}

/// Translation service: prompts, retry and the per-block loop
#[derive(Debug)]
pub struct TranslationService<P: Provider, S: Sleeper = TokioSleeper> {
    provider: P,
    sleeper: S,
    prompt: TranslationPrompt,
    retry: RetryPolicy,
    classifier: BlockClassifier,
    usage: Mutex<TokenUsageStats>,
}

impl<P: Provider> TranslationService<P, TokioSleeper> {
    /// Create a service that waits on the tokio timer between attempts
    pub fn new(provider: P, config: &Config) -> Self {
        Self::with_sleeper(provider, TokioSleeper, config)
    }
}

impl<P: Provider, S: Sleeper> TranslationService<P, S> {
    /// Create a service with a custom sleeper
    pub fn with_sleeper(provider: P, sleeper: S, config: &Config) -> Self {
        let usage = TokenUsageStats::with_provider_info(
            provider.name().to_string(),
            config.translation.model.clone(),
        );

        Self {
            provider,
            sleeper,
            prompt: TranslationPrompt::from_config(&config.translation),
            retry: RetryPolicy::from_config(&config.translation),
            classifier: BlockClassifier::new(&config.markers),
            usage: Mutex::new(usage),
        }
    }

    /// The underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Snapshot of the token usage so far
    pub fn usage(&self) -> TokenUsageStats {
        self.usage
            .lock()
            .map(|usage| usage.clone())
            .unwrap_or_default()
    }

    /// Translate one piece of text; the service answer is returned verbatim
    pub async fn translate_text(&self, text: &str, target_language: &str) -> Result<String, TranslationError> {
        let request = self.prompt.build(text, target_language);
        let provider = &self.provider;

        let started = Instant::now();
        let completion = self
            .retry
            .run(&self.sleeper, move |_| {
                let request = request.clone();
                async move { provider.complete(request).await }
            })
            .await?;

        if let Ok(mut usage) = self.usage.lock() {
            usage.record(completion.prompt_tokens, completion.completion_tokens, started.elapsed());
        }

        Ok(completion.text)
    }

    /// Translate a title and normalise its casing
    pub async fn translate_title(&self, title: &str, target_language: &str) -> Result<String, TranslationError> {
        let translated = self.translate_text(title, target_language).await?;
        Ok(to_title_case(&translated))
    }

    /// Translate the selected blocks of a post body, in order
    ///
    /// Passthrough blocks are copied unchanged. The first failure aborts the
    /// whole body.
    pub async fn translate_content(
        &self,
        content: &str,
        target_language: &str,
    ) -> Result<TranslatedContent, TranslationError> {
        let blocks = self.classifier.split(content);
        let blocks_total = blocks.len();
        let mut blocks_translated = 0;
        let mut output = Vec::with_capacity(blocks_total);

        for (index, block) in blocks.into_iter().enumerate() {
            if !block.is_translatable() {
                info!("Appended block:\n{}", block.text);
                output.push(block.text);
                continue;
            }

            info!("Translating block:\n{}", block.text);
            let translated = self.translate_text(&block.text, target_language).await?;
            info!("Translated block:\n{}", translated);

            let check = MarkerValidator::validate(&block.text, &translated);
            if let Some(message) = check.error_message() {
                warn!("Block {}: structural markers changed during translation. {}", index + 1, message);
            }

            output.push(translated);
            blocks_translated += 1;
            debug!("Block {}/{} translated", index + 1, blocks_total);
        }

        Ok(TranslatedContent {
            content: join_blocks(&output),
            blocks_total,
            blocks_translated,
        })
    }
}
