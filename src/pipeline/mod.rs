//! Documentation Pipeline
//!
//! ```text
//! scan → analyze → describe project → write report
//!                                   → describe + write each module
//!                                   → describe + write each directory
//! ```
//!
//! Scan and analysis failures abort the run before anything is written.
//! A failed project description is replaced by a fixed placeholder. Module
//! and directory failures are recorded per item and never stop the loop.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::ai::SharedProvider;
use crate::analyzer::ProjectAnalyzer;
use crate::config::Config;
use crate::constants::analysis;
use crate::describer::Describer;
use crate::scanner::{FileScanner, ProjectScan};
use crate::types::Result;
use crate::writer::OutputWriter;

// =============================================================================
// Run Summary
// =============================================================================

/// Result of one module or directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Description file written at this path
    Written(PathBuf),
    /// Nothing written; reason carries the error detail
    Failed(String),
}

impl ItemOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written(_))
    }
}

#[derive(Debug, Clone)]
pub struct ItemReport {
    pub path: PathBuf,
    pub outcome: ItemOutcome,
}

/// Everything a caller needs to report on a finished run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub project_name: String,
    pub output_dir: PathBuf,
    pub report_path: PathBuf,
    /// Project description failed and the placeholder was written instead
    pub description_fallback: bool,
    pub modules: Vec<ItemReport>,
    pub directories: Vec<ItemReport>,
}

impl RunSummary {
    pub fn written(items: &[ItemReport]) -> usize {
        items.iter().filter(|i| i.outcome.is_written()).count()
    }

    pub fn failed(items: &[ItemReport]) -> usize {
        items.len() - Self::written(items)
    }

    /// True when every item was written and the description is genuine
    pub fn is_complete(&self) -> bool {
        !self.description_fallback
            && Self::failed(&self.modules) == 0
            && Self::failed(&self.directories) == 0
    }
}

// =============================================================================
// Pipeline
// =============================================================================

pub struct DocumentationPipeline {
    config: Config,
    provider: SharedProvider,
}

impl DocumentationPipeline {
    pub fn new(config: &Config, provider: SharedProvider) -> Self {
        Self {
            config: config.clone(),
            provider,
        }
    }

    /// Run the whole sequence for `folder`.
    ///
    /// `output` overrides the timestamped bundle directory.
    pub async fn run(&self, folder: &Path, output: Option<&Path>) -> Result<RunSummary> {
        let scanner = FileScanner::new(folder, &self.config.scan);
        let scan = scanner.scan()?;
        info!(
            "Found {} source files, {} documentation files in {}",
            scan.files.source().len(),
            scan.files.documentation().len(),
            scan.project_name
        );

        let analyzer = ProjectAnalyzer::new(self.provider.clone(), &self.config.analysis);
        let analysis = analyzer.analyze(&scanner, &scan).await?;

        let describer = Describer::new(
            self.provider.clone(),
            self.config.analysis.max_prompt_chars,
        );

        info!("Generating project description");
        let described = describer.describe_project(&analysis).await;
        let (description, description_fallback) = match described {
            Ok(text) => (text, false),
            Err(e) => {
                warn!("Project description failed, using placeholder: {}", e);
                (analysis::DESCRIPTION_UNAVAILABLE.to_string(), true)
            }
        };

        let writer = OutputWriter::new(
            &self.config.output,
            output,
            &scan.root,
            self.provider.model(),
        )?;
        let report_path = writer.write_analysis(&analysis, &description)?;
        info!("Report written to {}", report_path.display());

        info!("Generating module descriptions");
        let mut modules = Vec::with_capacity(scan.files.source().len());
        for path in scan.files.source() {
            let outcome = self.document_module(&scanner, &describer, &writer, path).await;
            modules.push(ItemReport {
                path: path.clone(),
                outcome,
            });
        }

        info!("Generating directory descriptions");
        let directories = self.document_directories(&scan, &describer, &writer).await;

        Ok(RunSummary {
            project_name: scan.project_name.clone(),
            output_dir: writer.output_dir().to_path_buf(),
            report_path,
            description_fallback,
            modules,
            directories,
        })
    }

    #[instrument(skip(self, scanner, describer, writer), fields(module = %path.display()))]
    async fn document_module(
        &self,
        scanner: &FileScanner,
        describer: &Describer,
        writer: &OutputWriter,
        path: &Path,
    ) -> ItemOutcome {
        let content = scanner.read_content(path);

        let result = match describer.describe_module(path, &content).await {
            Ok(text) => writer.write_module_description(path, &text),
            Err(e) => Err(e),
        };

        match result {
            Ok(written) => ItemOutcome::Written(written),
            Err(e) => {
                warn!("Failed to document module {}: {}", path.display(), e);
                ItemOutcome::Failed(e.to_string())
            }
        }
    }

    async fn document_directories(
        &self,
        scan: &ProjectScan,
        describer: &Describer,
        writer: &OutputWriter,
    ) -> Vec<ItemReport> {
        let mut reports = Vec::new();

        for dir in scan.subdirectories() {
            let children = scan.files.source_children_of(dir);
            if children.is_empty() {
                continue;
            }

            let outcome = self.document_directory(describer, writer, dir, &children).await;
            reports.push(ItemReport {
                path: dir.to_path_buf(),
                outcome,
            });
        }

        reports
    }

    #[instrument(skip(self, describer, writer, children), fields(directory = %dir.display()))]
    async fn document_directory(
        &self,
        describer: &Describer,
        writer: &OutputWriter,
        dir: &Path,
        children: &[PathBuf],
    ) -> ItemOutcome {
        let result = match describer.describe_directory(dir, children).await {
            Ok(text) => writer.write_directory_description(dir, &text),
            Err(e) => Err(e),
        };

        match result {
            Ok(written) => ItemOutcome::Written(written),
            Err(e) => {
                warn!("Failed to document directory {}: {}", dir.display(), e);
                ItemOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::mock::MockProvider;
    use crate::config::NamingMode;
    use crate::types::{ErrorCategory, ProjdocError};
    use proptest::prelude::*;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn config_with(base: &Path, naming: NamingMode) -> Config {
        let mut config = Config::default();
        config.output.base_dir = base.to_path_buf();
        config.output.naming = naming;
        config
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn files_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .map(|entries| {
                entries
                    .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_purpose_from_documentation() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("proj");
        write(&project, "README.md", "A tool that converts X to Y");
        write(&project, "convert.py", "def convert(x): ...");

        let mock = Arc::new(
            MockProvider::new()
                .reply_when("A tool that converts X to Y", "Alat konversi X ke Y.")
                .with_response("teks"),
        );
        let pipeline = DocumentationPipeline::new(
            &config_with(&temp.path().join("out"), NamingMode::Relative),
            mock.clone(),
        );

        let summary = pipeline.run(&project, None).await.unwrap();

        let report = fs::read_to_string(&summary.report_path).unwrap();
        assert!(report.contains("🎯 Tujuan: Alat konversi X ke Y."));
        assert_eq!(mock.calls_containing("File: convert.py"), 1);
        assert_eq!(summary.project_name, "proj");
        assert_eq!(summary.modules.len(), 1);
        assert!(summary.is_complete());
        assert_eq!(
            files_in(&summary.output_dir.join("modul")),
            ["convert_deskripsi.txt"]
        );
        // Root is never described as a directory
        assert!(summary.directories.is_empty());
    }

    #[tokio::test]
    async fn test_no_source_files() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("docs-only");
        write(&project, "README.md", "Docs");
        write(&project, "guide/intro.rst", "Intro");

        let mock = Arc::new(MockProvider::new());
        let pipeline = DocumentationPipeline::new(
            &config_with(&temp.path().join("out"), NamingMode::Relative),
            mock.clone(),
        );

        let summary = pipeline.run(&project, None).await.unwrap();

        let report = fs::read_to_string(&summary.report_path).unwrap();
        assert!(report.contains(analysis::NO_SOURCE_FILES));
        assert_eq!(mock.calls_containing("technology stack"), 0);
        assert!(summary.modules.is_empty());
        // guide/ has no source children
        assert!(summary.directories.is_empty());
    }

    #[tokio::test]
    async fn test_same_leaf_directories_collide_in_legacy_mode() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("proj");
        write(&project, "a/utils/one.py", "x = 1");
        write(&project, "b/utils/two.py", "y = 2");

        let mock = Arc::new(
            MockProvider::new()
                .reply_when("one.py", "UTILS-A")
                .reply_when("two.py", "UTILS-B"),
        );
        let pipeline = DocumentationPipeline::new(
            &config_with(&temp.path().join("out"), NamingMode::Legacy),
            mock,
        );

        let summary = pipeline.run(&project, None).await.unwrap();

        assert_eq!(summary.directories.len(), 2);
        assert!(summary.directories.iter().all(|d| d.outcome.is_written()));
        let dir_files = files_in(&summary.output_dir.join("direktori"));
        assert_eq!(dir_files, ["utils_deskripsi.txt"]);
        // b/utils sorts after a/utils, so its description wins
        let text =
            fs::read_to_string(summary.output_dir.join("direktori/utils_deskripsi.txt")).unwrap();
        assert!(text.contains("UTILS-B"));
        assert!(!text.contains("UTILS-A"));
    }

    #[tokio::test]
    async fn test_same_leaf_directories_kept_apart_in_relative_mode() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("proj");
        write(&project, "a/utils/one.py", "x = 1");
        write(&project, "b/utils/two.py", "y = 2");

        let mock = Arc::new(MockProvider::new());
        let pipeline = DocumentationPipeline::new(
            &config_with(&temp.path().join("out"), NamingMode::Relative),
            mock,
        );

        let summary = pipeline.run(&project, None).await.unwrap();

        assert_eq!(
            files_in(&summary.output_dir.join("direktori")),
            ["a__utils_deskripsi.txt", "b__utils_deskripsi.txt"]
        );
        assert_eq!(
            files_in(&summary.output_dir.join("modul")),
            ["a__utils__one_deskripsi.txt", "b__utils__two_deskripsi.txt"]
        );
    }

    #[tokio::test]
    async fn test_quota_failure_halts_without_output() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("proj");
        write(&project, "README.md", "Docs");
        write(&project, "main.py", "print(1)");
        let out = temp.path().join("out");

        let mock = Arc::new(MockProvider::new().always_failing(ErrorCategory::QuotaOrRateLimit));
        let pipeline = DocumentationPipeline::new(&config_with(&out, NamingMode::Relative), mock);

        let err = pipeline.run(&project, None).await.unwrap_err();

        assert_eq!(err.completion_category(), Some(ErrorCategory::QuotaOrRateLimit));
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn test_invalid_folder_rejected() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        let mock = Arc::new(MockProvider::new());
        let pipeline =
            DocumentationPipeline::new(&config_with(&out, NamingMode::Relative), mock.clone());

        let err = pipeline
            .run(&temp.path().join("missing"), None)
            .await
            .unwrap_err();

        assert!(matches!(err, ProjdocError::InvalidInputPath { .. }));
        assert_eq!(mock.call_count(), 0);
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn test_description_failure_uses_placeholder() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("proj");
        write(&project, "main.py", "print(1)");

        let mock = Arc::new(MockProvider::new().fail_when("Nama Proyek", ErrorCategory::Transient));
        let pipeline = DocumentationPipeline::new(
            &config_with(&temp.path().join("out"), NamingMode::Relative),
            mock,
        );

        let summary = pipeline.run(&project, None).await.unwrap();

        assert!(summary.description_fallback);
        assert!(!summary.is_complete());
        let report = fs::read_to_string(&summary.report_path).unwrap();
        assert!(report.contains(analysis::DESCRIPTION_UNAVAILABLE));
        assert_eq!(RunSummary::written(&summary.modules), 1);
    }

    #[tokio::test]
    async fn test_directory_failure_is_recorded() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("proj");
        write(&project, "pkg/core.py", "x = 1");
        write(&project, "lib/extra.py", "y = 2");

        let mock = Arc::new(
            MockProvider::new().fail_when("**Direktori**: lib", ErrorCategory::Transient),
        );
        let pipeline = DocumentationPipeline::new(
            &config_with(&temp.path().join("out"), NamingMode::Relative),
            mock,
        );

        let summary = pipeline.run(&project, None).await.unwrap();

        assert_eq!(RunSummary::written(&summary.directories), 1);
        assert_eq!(RunSummary::failed(&summary.directories), 1);
        let failed = summary
            .directories
            .iter()
            .find(|d| !d.outcome.is_written())
            .unwrap();
        assert!(failed.path.ends_with("lib"));
        assert_eq!(
            files_in(&summary.output_dir.join("direktori")),
            ["pkg_deskripsi.txt"]
        );
    }

    #[tokio::test]
    async fn test_explicit_output_dir() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("proj");
        write(&project, "main.py", "print(1)");
        let explicit = temp.path().join("bundle");

        let pipeline = DocumentationPipeline::new(
            &config_with(&temp.path().join("out"), NamingMode::Relative),
            Arc::new(MockProvider::new()),
        );
        let summary = pipeline.run(&project, Some(&explicit)).await.unwrap();

        assert_eq!(summary.output_dir, explicit);
        assert!(explicit.join("analisis_proyek.txt").is_file());
        assert!(!temp.path().join("out").exists());
    }

    #[tokio::test]
    async fn test_module_write_failure_does_not_stop_run() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("proj");
        write(&project, "main.py", "print(1)");
        write(&project, "pkg/core.py", "x = 1");
        write(&project, "pkg/util.py", "y = 2");

        // A plain file where the module folder should go
        let bundle = temp.path().join("bundle");
        fs::create_dir_all(&bundle).unwrap();
        fs::write(bundle.join("modul"), "occupied").unwrap();

        let pipeline = DocumentationPipeline::new(
            &config_with(&temp.path().join("out"), NamingMode::Relative),
            Arc::new(MockProvider::new()),
        );
        let summary = pipeline.run(&project, Some(&bundle)).await.unwrap();

        assert_eq!(summary.modules.len(), 3);
        for item in &summary.modules {
            assert!(
                matches!(item.outcome, ItemOutcome::Failed(_)),
                "module unexpectedly written: {}",
                item.path.display()
            );
        }
        assert_eq!(summary.directories.len(), 1);
        assert!(summary.directories[0].outcome.is_written());
        assert!(bundle.join("direktori/pkg_deskripsi.txt").is_file());
        assert!(summary.report_path.is_file());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_module_failure_spares_other_files(n in 1usize..6, failing in 0usize..6) {
            let failing = failing % n;
            let temp = TempDir::new().unwrap();
            let project = temp.path().join("proj");
            for i in 0..n {
                write(&project, &format!("mod_{}.py", i), &format!("MARKER_{}", i));
            }

            let needle = format!("**Modul**: mod_{}.py", failing);
            let mock = Arc::new(MockProvider::new().fail_when(&needle, ErrorCategory::Transient));
            let pipeline = DocumentationPipeline::new(
                &config_with(&temp.path().join("out"), NamingMode::Relative),
                mock,
            );

            let runtime = tokio::runtime::Runtime::new().unwrap();
            let summary = runtime.block_on(pipeline.run(&project, None)).unwrap();

            prop_assert_eq!(RunSummary::written(&summary.modules), n - 1);
            prop_assert_eq!(RunSummary::failed(&summary.modules), 1);

            let written = files_in(&summary.output_dir.join("modul"));
            prop_assert_eq!(written.len(), n - 1);
            let missing = format!("mod_{}_deskripsi.txt", failing);
            prop_assert!(!written.contains(&missing));
        }
    }
}
