//! Caller-side Retry
//!
//! Wraps any provider and retries failures classified as `Transient` with
//! exponential backoff plus random jitter. Auth, quota and model failures
//! are returned immediately: repeating them only burns quota.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::{CompletionProvider, SharedProvider};
use crate::constants::llm;
use crate::types::Result;

/// Backoff settings for [`RetryingProvider`]
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u8,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_factor: f32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: llm::DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_millis(llm::BASE_DELAY_MS),
            max_delay: Duration::from_secs(llm::MAX_DELAY_SECS),
            backoff_factor: llm::BACKOFF_FACTOR,
        }
    }
}

/// Provider decorator that retries transient failures
pub struct RetryingProvider {
    inner: SharedProvider,
    policy: RetryPolicy,
}

impl RetryingProvider {
    pub fn new(inner: SharedProvider, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl CompletionProvider for RetryingProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let mut current_delay = self.policy.base_delay;
        let mut attempt: u8 = 0;

        loop {
            match self.inner.complete(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt < self.policy.max_retries => {
                    attempt += 1;
                    let delay = current_delay + random_jitter(current_delay);
                    warn!(
                        attempt,
                        max_retries = self.policy.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Transient completion failure, retrying: {}",
                        e
                    );
                    sleep(delay).await;
                    current_delay = calculate_backoff(
                        current_delay,
                        self.policy.backoff_factor,
                        self.policy.max_delay,
                    );
                }
                Err(e) => {
                    debug!(attempts = attempt + 1, "Giving up on completion");
                    return Err(e);
                }
            }
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn model(&self) -> &str {
        self.inner.model()
    }
}

/// Up to a quarter of the base delay
fn random_jitter(base_delay: Duration) -> Duration {
    let max_jitter_ms = (base_delay.as_millis() as u64) / 4;
    if max_jitter_ms == 0 {
        return Duration::ZERO;
    }
    let jitter_ms = rand::rng().random_range(0..max_jitter_ms);
    Duration::from_millis(jitter_ms)
}

/// Calculate exponential backoff with cap
fn calculate_backoff(current: Duration, factor: f32, max: Duration) -> Duration {
    let next = Duration::from_secs_f32(current.as_secs_f32() * factor);
    std::cmp::min(next, max)
}
