//! Narrative Descriptions
//!
//! Free-text descriptions of the whole project, one module or one directory.
//! Each call is one completion; failures are returned for the caller to
//! recover from.

use std::path::{Path, PathBuf};

use crate::ai::{PromptTemplates, SharedProvider};
use crate::analyzer::AnalysisResult;
use crate::types::{Result, truncate_chars};

pub struct Describer {
    provider: SharedProvider,
    max_prompt_chars: usize,
}

impl Describer {
    pub fn new(provider: SharedProvider, max_prompt_chars: usize) -> Self {
        Self {
            provider,
            max_prompt_chars,
        }
    }

    /// Structured narrative built from all five analysis fields
    pub async fn describe_project(&self, analysis: &AnalysisResult) -> Result<String> {
        let prompt = PromptTemplates::project_description(
            &analysis.project_name,
            &analysis.project_purpose,
            &analysis.technologies,
            &analysis.project_analysis,
            &analysis.additional_notes,
        );
        self.provider.complete(&prompt).await
    }

    /// Purpose, components, patterns and dependencies of one source file
    pub async fn describe_module(&self, path: &Path, content: &str) -> Result<String> {
        let prompt = PromptTemplates::module(
            &file_name(path),
            &path
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .unwrap_or_default(),
            truncate_chars(content, self.max_prompt_chars),
        );
        self.provider.complete(&prompt).await
    }

    /// Role and organization of one directory, from its immediate source children
    pub async fn describe_directory(&self, path: &Path, children: &[PathBuf]) -> Result<String> {
        let names: Vec<String> = children.iter().map(|c| file_name(c)).collect();
        let prompt = PromptTemplates::directory(&file_name(path), &names);
        self.provider.complete(&prompt).await
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
