//! Completion Provider Abstraction
//!
//! Defines the `CompletionProvider` trait: one prompt in, generated text out.
//! Every failure is a classified [`CompletionError`] carrying the raw detail.
//!
//! ## Modules
//!
//! - `openai`: OpenAI-compatible Chat Completions client (Groq by default)
//! - `retry`: caller-side retry of transient failures with backoff

#[cfg(test)]
pub(crate) mod mock;
mod openai;
mod retry;

pub use openai::OpenAiCompatibleProvider;
pub use retry::{RetryPolicy, RetryingProvider};

// Re-export error types from centralized location
pub use crate::types::{CompletionError, ErrorCategory, ErrorClassifier};

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::LlmConfig;
use crate::types::Result;

/// Shared provider handle passed to every component that prompts
pub type SharedProvider = Arc<dyn CompletionProvider>;

// =============================================================================
// Completion Provider Trait
// =============================================================================

/// A hosted text-generation model
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Submit one prompt and return the generated text.
    ///
    /// Fails with `ProjdocError::Completion`, classified into an
    /// [`ErrorCategory`], with the original error detail preserved.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model identifier currently in use
    fn model(&self) -> &str;
}

/// Create the configured provider, wrapped for retries when enabled
pub fn create_provider(config: &LlmConfig) -> Result<SharedProvider> {
    let provider = OpenAiCompatibleProvider::new(config)?;

    if config.max_retries == 0 {
        return Ok(Arc::new(provider));
    }

    let policy = RetryPolicy {
        max_retries: config.max_retries,
        ..RetryPolicy::default()
    };
    Ok(Arc::new(RetryingProvider::new(Arc::new(provider), policy)))
}
