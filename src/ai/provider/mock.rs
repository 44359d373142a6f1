//! Scripted provider for tests.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::CompletionProvider;
use crate::types::{CompletionError, ErrorCategory, Result};

/// Test double with scripted replies, failure injection and call recording
pub struct MockProvider {
    default_response: String,
    /// (prompt substring, reply)
    replies: Vec<(String, String)>,
    /// (prompt substring, category)
    failures: Vec<(String, ErrorCategory)>,
    fail_first: usize,
    fail_first_category: ErrorCategory,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            default_response: "mock response".to_string(),
            replies: Vec::new(),
            failures: Vec::new(),
            fail_first: 0,
            fail_first_category: ErrorCategory::Transient,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Reply used when no rule matches
    pub fn with_response(mut self, text: &str) -> Self {
        self.default_response = text.to_string();
        self
    }

    /// Reply with `text` when the prompt contains `needle`
    pub fn reply_when(mut self, needle: &str, text: &str) -> Self {
        self.replies.push((needle.to_string(), text.to_string()));
        self
    }

    /// Fail with `category` when the prompt contains `needle`
    pub fn fail_when(mut self, needle: &str, category: ErrorCategory) -> Self {
        self.failures.push((needle.to_string(), category));
        self
    }

    /// Fail every call
    pub fn always_failing(self, category: ErrorCategory) -> Self {
        self.fail_when("", category)
    }

    /// Fail the first `n` calls, then behave normally
    pub fn failing_first(mut self, n: usize, category: ErrorCategory) -> Self {
        self.fail_first = n;
        self.fail_first_category = category;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Number of received prompts containing `needle`
    pub fn calls_containing(&self, needle: &str) -> usize {
        self.prompts().iter().filter(|p| p.contains(needle)).count()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        if call < self.fail_first {
            return Err(CompletionError::with_provider(
                self.fail_first_category,
                format!("scripted failure on call {}", call + 1),
                "mock",
            )
            .into());
        }

        if let Some((needle, category)) = self
            .failures
            .iter()
            .find(|(n, _)| prompt.contains(n.as_str()))
        {
            return Err(CompletionError::with_provider(
                *category,
                format!("scripted failure for prompt containing '{}'", needle),
                "mock",
            )
            .into());
        }

        let reply = self
            .replies
            .iter()
            .find(|(n, _)| prompt.contains(n.as_str()))
            .map(|(_, r)| r.clone())
            .unwrap_or_else(|| self.default_response.clone());

        Ok(reply)
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}
