//! Project Analyzer
//!
//! Produces the four-part [`AnalysisResult`]: purpose, technologies,
//! structure insight and additional notes. Each step with nothing to look at
//! returns a fixed fallback without calling the model. A completion failure
//! in any step is returned to the caller unchanged.

use serde::Serialize;
use tracing::{debug, info};

use crate::ai::{PromptTemplates, SharedProvider};
use crate::config::AnalysisConfig;
use crate::constants::analysis;
use crate::scanner::{FileScanner, ProjectScan};
use crate::types::{FileCategory, Result, truncate_chars};

/// Structured summary feeding the describer and the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub project_name: String,
    pub project_purpose: String,
    pub technologies: String,
    /// Model's reading of the directory tree
    pub project_analysis: String,
    pub additional_notes: String,
    /// Rendered directory tree shown in the report
    pub project_structure: String,
}

pub struct ProjectAnalyzer {
    provider: SharedProvider,
    config: AnalysisConfig,
}

impl ProjectAnalyzer {
    pub fn new(provider: SharedProvider, config: &AnalysisConfig) -> Self {
        Self {
            provider,
            config: config.clone(),
        }
    }

    /// Run all four steps in order; the first completion failure aborts
    pub async fn analyze(
        &self,
        scanner: &FileScanner,
        scan: &ProjectScan,
    ) -> Result<AnalysisResult> {
        info!("Analyzing project purpose");
        let project_purpose = self.analyze_purpose(scanner, scan).await?;

        info!("Analyzing technologies");
        let technologies = self.analyze_technologies(scanner, scan).await?;

        info!("Analyzing project structure");
        let project_structure = scan.render_structure();
        let project_analysis = self.analyze_structure(&project_structure).await?;

        info!("Generating additional notes");
        let additional_notes = self.additional_notes(scan).await?;

        Ok(AnalysisResult {
            project_name: scan.project_name.clone(),
            project_purpose,
            technologies,
            project_analysis,
            additional_notes,
            project_structure,
        })
    }

    async fn analyze_purpose(&self, scanner: &FileScanner, scan: &ProjectScan) -> Result<String> {
        let docs = scan.files.documentation();
        if docs.is_empty() {
            debug!("No documentation files, skipping purpose prompt");
            return Ok(analysis::NO_DOCUMENTATION.to_string());
        }

        let content = docs
            .iter()
            .map(|path| scanner.read_content(path))
            .collect::<Vec<_>>()
            .join("\n\n");
        let excerpt = truncate_chars(&content, self.config.max_prompt_chars);

        self.provider
            .complete(&PromptTemplates::project_purpose(excerpt))
            .await
    }

    async fn analyze_technologies(
        &self,
        scanner: &FileScanner,
        scan: &ProjectScan,
    ) -> Result<String> {
        let sources = scan.files.source();
        if sources.is_empty() {
            debug!("No source files, skipping technology prompt");
            return Ok(analysis::NO_SOURCE_FILES.to_string());
        }

        let sample = &sources[..sources.len().min(self.config.tech_sample_files)];
        let Some(first) = sample.first() else {
            debug!("Technology sample is empty, skipping technology prompt");
            return Ok(analysis::NO_SOURCE_FILES.to_string());
        };

        let mut content = String::new();
        for path in sample {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            content.push_str(&format!("\n\nFile: {}\n", name));
            content.push_str(&scanner.read_content(path));
        }
        let excerpt = truncate_chars(&content, self.config.max_prompt_chars);

        let language = first
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        self.provider
            .complete(&PromptTemplates::technologies(&language, excerpt))
            .await
    }

    async fn analyze_structure(&self, tree: &str) -> Result<String> {
        if tree.trim().is_empty() {
            debug!("No subdirectories, skipping structure prompt");
            return Ok(analysis::NO_SUBDIRECTORIES.to_string());
        }

        self.provider
            .complete(&PromptTemplates::structure(tree))
            .await
    }

    async fn additional_notes(&self, scan: &ProjectScan) -> Result<String> {
        let counts: Vec<(&str, usize)> = FileCategory::ALL
            .iter()
            .map(|c| (category_label(*c), scan.files.count(*c)))
            .collect();

        self.provider
            .complete(&PromptTemplates::additional_notes(&counts))
            .await
    }
}

fn category_label(category: FileCategory) -> &'static str {
    match category {
        FileCategory::Source => "File sumber",
        FileCategory::Documentation => "File dokumentasi",
        FileCategory::Config => "File konfigurasi",
        FileCategory::Other => "File lainnya",
    }
}
