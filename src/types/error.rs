//! Unified Error Type System
//!
//! Centralized error types for the whole crate, plus the classifier that
//! turns unstructured completion-endpoint failures into an [`ErrorCategory`].
//!
//! ## Completion Error Categories
//!
//! - **Auth**: missing, invalid or revoked credentials (fail fast)
//! - **QuotaOrRateLimit**: billing quota exhausted or request rate exceeded
//! - **ModelUnavailable**: configured model is unknown or decommissioned
//! - **Transient**: everything else (network, 5xx, malformed bodies)
//!
//! Classification is best-effort: the backend does not always return a
//! structured error body, so [`ErrorClassifier`] tries a structured parse
//! first, then substring heuristics, then falls back to `Transient`.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Completion failure categories used for reporting and retry decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Credential rejected - fail fast, don't retry
    Auth,
    /// Quota exhausted or rate limited - don't hammer the endpoint
    QuotaOrRateLimit,
    /// Configured model not available - fix configuration
    ModelUnavailable,
    /// Network or server-side issue - may resolve on retry
    Transient,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auth => write!(f, "AUTH"),
            Self::QuotaOrRateLimit => write!(f, "QUOTA_OR_RATE_LIMIT"),
            Self::ModelUnavailable => write!(f, "MODEL_UNAVAILABLE"),
            Self::Transient => write!(f, "TRANSIENT"),
        }
    }
}

impl ErrorCategory {
    /// Only transient failures are worth retrying on the same endpoint
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient)
    }

    /// Short user-facing remedy for this category
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Auth => "Check that the API key is correct and set in the environment or config file.",
            Self::QuotaOrRateLimit => {
                "The provider quota or rate limit was reached. Check billing, wait for the quota to reset, or upgrade the plan."
            }
            Self::ModelUnavailable => {
                "The configured model is not available. Set llm.model to a model your account can access."
            }
            Self::Transient => "The request failed; it may succeed if retried later.",
        }
    }
}

// =============================================================================
// Completion Error
// =============================================================================

/// Classified completion failure; `message` always keeps the raw detail
#[derive(Debug, Clone)]
pub struct CompletionError {
    /// Error category for routing decisions
    pub category: ErrorCategory,
    /// Original error detail from the transport or the response body
    pub message: String,
    /// Provider that produced the error
    pub provider: Option<String>,
}

impl std::fmt::Display for CompletionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{}:{}] {}", provider, self.category, self.message)
        } else {
            write!(f, "[{}] {}", self.category, self.message)
        }
    }
}

impl std::error::Error for CompletionError {}

impl CompletionError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            provider: None,
        }
    }

    pub fn with_provider(
        category: ErrorCategory,
        message: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            provider: Some(provider.into()),
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.category.is_retryable()
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Maps raw completion failures onto [`ErrorCategory`]
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify a raw error message.
    ///
    /// Tiers: structured JSON body (`error.code` / `error.type` /
    /// `error.status`), then substring heuristics, then `Transient`.
    pub fn classify(message: &str, provider: &str) -> CompletionError {
        let category = Self::classify_structured(message)
            .or_else(|| Self::classify_heuristic(message))
            .unwrap_or(ErrorCategory::Transient);

        CompletionError::with_provider(category, message, provider)
    }

    /// Classify a non-success HTTP response.
    ///
    /// Unambiguous status codes win; anything else is classified from the body.
    pub fn classify_http_status(status: u16, body: &str, provider: &str) -> CompletionError {
        let message = format!("HTTP {}: {}", status, body);
        let category = match status {
            401 | 403 => ErrorCategory::Auth,
            429 => ErrorCategory::QuotaOrRateLimit,
            404 => ErrorCategory::ModelUnavailable,
            _ => return Self::classify(&message, provider),
        };
        CompletionError::with_provider(category, message, provider)
    }

    fn classify_structured(message: &str) -> Option<ErrorCategory> {
        let start = message.find('{')?;
        let end = message.rfind('}')?;
        if end <= start {
            return None;
        }

        let value: serde_json::Value = serde_json::from_str(&message[start..=end]).ok()?;
        let error = value.get("error")?;

        ["code", "type", "status"]
            .iter()
            .filter_map(|field| error.get(*field).and_then(|v| v.as_str()))
            .find_map(Self::category_for_code)
    }

    fn category_for_code(code: &str) -> Option<ErrorCategory> {
        match code.to_lowercase().as_str() {
            "invalid_api_key" | "authentication_error" | "permission_denied"
            | "unauthenticated" | "permission_error" => Some(ErrorCategory::Auth),
            "insufficient_quota" | "rate_limit_exceeded" | "rate_limit_error"
            | "resource_exhausted" | "tokens_exceeded" => Some(ErrorCategory::QuotaOrRateLimit),
            "model_not_found" | "model_decommissioned" | "not_found_error" | "not_found" => {
                Some(ErrorCategory::ModelUnavailable)
            }
            _ => None,
        }
    }

    fn classify_heuristic(message: &str) -> Option<ErrorCategory> {
        let lower = message.to_lowercase();

        if lower.contains("quota")
            || lower.contains("rate limit")
            || lower.contains("rate_limit")
            || lower.contains("too many requests")
            || has_status_token(&lower, "429")
        {
            return Some(ErrorCategory::QuotaOrRateLimit);
        }

        if lower.contains("model_not_found")
            || lower.contains("model not found")
            || lower.contains("decommissioned")
            || lower.contains("does not exist")
            || lower.contains("unknown model")
        {
            return Some(ErrorCategory::ModelUnavailable);
        }

        if lower.contains("invalid_api_key")
            || lower.contains("api key")
            || lower.contains("api_key")
            || lower.contains("unauthorized")
            || lower.contains("authentication")
            || lower.contains("forbidden")
            || has_status_token(&lower, "401")
            || has_status_token(&lower, "403")
        {
            return Some(ErrorCategory::Auth);
        }

        None
    }
}

/// True when `code` appears as a standalone token.
///
/// Digits inside ids, ports or addresses (`req_4291`, `:4011`,
/// `10.0.4.29`) do not count.
fn has_status_token(text: &str, code: &str) -> bool {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .any(|token| token == code)
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ProjdocError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid input path {}: {reason}", path.display())]
    InvalidInputPath { path: PathBuf, reason: String },

    #[error("Completion failed: {0}")]
    Completion(CompletionError),

    #[error("Failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<CompletionError> for ProjdocError {
    fn from(err: CompletionError) -> Self {
        ProjdocError::Completion(err)
    }
}

pub type Result<T> = std::result::Result<T, ProjdocError>;

impl ProjdocError {
    pub fn invalid_input(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidInputPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Completion category, if this is a completion failure
    pub fn completion_category(&self) -> Option<ErrorCategory> {
        match self {
            Self::Completion(e) => Some(e.category),
            _ => None,
        }
    }

    /// Check if this error is worth retrying
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Completion(e) => e.is_retryable(),
            _ => false,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
