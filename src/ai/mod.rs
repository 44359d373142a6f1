//! AI Integration Layer
//!
//! Completion providers and the prompt templates fed to them.

pub mod prompt;
pub mod provider;

pub use prompt::{PromptBuilder, PromptSection, PromptTemplates};
pub use provider::{
    CompletionProvider, OpenAiCompatibleProvider, RetryPolicy, RetryingProvider, SharedProvider,
    create_provider,
};
