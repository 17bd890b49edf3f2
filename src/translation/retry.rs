/*!
 * Bounded retry for transient provider failures.
 *
 * Only "service unavailable" answers are retried, with a fixed delay
 * between attempts. The delay goes through a `Sleeper` so tests can count
 * waits without real time passing.
 */

use async_trait::async_trait;
use log::{debug, warn};
use std::fmt::Debug;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::app_config::TranslationConfig;
use crate::errors::{ProviderError, TranslationError};

/// Something that can wait
#[async_trait]
pub trait Sleeper: Send + Sync + Debug {
    /// Suspend for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately and remembers every requested delay
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far, in order
    pub fn delays(&self) -> Vec<Duration> {
        self.delays
            .lock()
            .map(|delays| delays.clone())
            .unwrap_or_default()
    }

    /// Number of delays requested so far
    pub fn count(&self) -> usize {
        self.delays().len()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        if let Ok(mut delays) = self.delays.lock() {
            delays.push(duration);
        }
    }
}

/// Retry bound and fixed delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the first one included
    pub max_attempts: u32,
    /// Wait between two attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &TranslationConfig) -> Self {
        Self::new(config.retry_count, Duration::from_secs(config.retry_delay_secs))
    }

    /// Run `operation` until it succeeds, fails for good, or the bound is hit.
    ///
    /// The closure receives the 1-based attempt number.
    pub async fn run<T, F, Fut>(&self, sleeper: &dyn Sleeper, mut operation: F) -> Result<T, TranslationError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            debug!("Translation attempt {}/{}", attempt, max_attempts);

            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) if error.is_transient() => {
                    if attempt >= max_attempts {
                        return Err(TranslationError::Transient {
                            attempts: attempt,
                            source: error,
                        });
                    }

                    warn!(
                        "Error: Service unavailable. Retrying in {} seconds... (attempt {}/{})",
                        self.delay.as_secs(),
                        attempt,
                        max_attempts
                    );
                    sleeper.sleep(self.delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(TranslationError::Fatal(error)),
            }
        }
    }
}
