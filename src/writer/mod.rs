//! Output Bundle Writer
//!
//! One timestamped directory per run:
//!
//! ```text
//! output/analisis-YYYYMMDD-HHMMSS/
//! ├── analisis_proyek.txt
//! ├── modul/<name>_deskripsi.txt
//! └── direktori/<name>_deskripsi.txt
//! ```
//!
//! Every write opens, writes and closes its file before returning.

use chrono::{Local, NaiveDateTime};
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::analyzer::AnalysisResult;
use crate::config::{NamingMode, OutputConfig};
use crate::constants::output;
use crate::types::{ProjdocError, Result};

pub struct OutputWriter {
    output_dir: PathBuf,
    report_path: PathBuf,
    project_root: PathBuf,
    model: String,
    naming: NamingMode,
}

impl OutputWriter {
    /// Create the bundle directory (and parents) eagerly.
    ///
    /// `explicit` is used as the bundle directory when given; otherwise a
    /// timestamped directory under `config.base_dir` is derived. An existing
    /// directory is reused.
    pub fn new(
        config: &OutputConfig,
        explicit: Option<&Path>,
        project_root: &Path,
        model: &str,
    ) -> Result<Self> {
        let output_dir = match explicit {
            Some(path) => path.to_path_buf(),
            None => config.base_dir.join(format!(
                "{}{}",
                output::BUNDLE_PREFIX,
                Local::now().format(output::BUNDLE_TIMESTAMP_FORMAT)
            )),
        };

        fs::create_dir_all(&output_dir).map_err(|e| ProjdocError::file_write(&output_dir, e))?;
        debug!("Output bundle: {}", output_dir.display());

        Ok(Self {
            report_path: output_dir.join(output::REPORT_FILE),
            output_dir,
            project_root: project_root.to_path_buf(),
            model: model.to_string(),
            naming: config.naming,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn report_path(&self) -> &Path {
        &self.report_path
    }

    /// Write the aggregate report, replacing any previous content
    pub fn write_analysis(&self, analysis: &AnalysisResult, description: &str) -> Result<PathBuf> {
        let metadata = ReportMetadata {
            generated_at: Local::now().naive_local(),
            model: self.model.clone(),
        };

        let body = format!(
            "\n📁 Proyek: {}\n🎯 Tujuan: {}\n\n📂 Struktur:\n{}\n\n🔍 Analisis:\n{}\n\n🛠️ Teknologi:\n{}\n\n📝 Catatan Tambahan:\n{}\n\n📖 Deskripsi Proyek:\n{}\n",
            analysis.project_name,
            analysis.project_purpose,
            analysis.project_structure,
            analysis.project_analysis,
            analysis.technologies,
            analysis.additional_notes,
            description,
        );

        let content = format!("{}{}", metadata.render(), body);
        write_file(&self.report_path, &content)?;
        Ok(self.report_path.clone())
    }

    /// Write one module description under `modul/`
    pub fn write_module_description(&self, path: &Path, description: &str) -> Result<PathBuf> {
        let name = match self.naming {
            NamingMode::Legacy => path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default(),
            NamingMode::Relative => self.relative_name(&path.with_extension("")),
        };

        self.write_item(output::MODULE_DIR, "Modul", path, &name, description)
    }

    /// Write one directory description under `direktori/`.
    ///
    /// In legacy naming two directories with the same leaf name share one
    /// file and the later write wins.
    pub fn write_directory_description(&self, path: &Path, description: &str) -> Result<PathBuf> {
        let name = match self.naming {
            NamingMode::Legacy => leaf_name(path),
            NamingMode::Relative => self.relative_name(path),
        };

        self.write_item(output::DIRECTORY_DIR, "Direktori", path, &name, description)
    }

    fn write_item(
        &self,
        subdir: &str,
        label: &str,
        path: &Path,
        name: &str,
        description: &str,
    ) -> Result<PathBuf> {
        let dir = self.output_dir.join(subdir);
        fs::create_dir_all(&dir).map_err(|e| ProjdocError::file_write(&dir, e))?;

        let content = format!(
            "\n{}: {}\nPath: {}\n\nDeskripsi:\n{}\n\n{} {}\n",
            label,
            leaf_name(path),
            path.display(),
            description,
            output::GENERATED_AT_LABEL,
            Local::now().format(output::GENERATED_AT_FORMAT),
        );

        let target = dir.join(format!("{}{}", name, output::DESCRIPTION_SUFFIX));
        write_file(&target, &content)?;
        Ok(target)
    }

    /// Root-relative path joined with `__`; falls back to the leaf name
    fn relative_name(&self, path: &Path) -> String {
        let parts: Vec<String> = path
            .strip_prefix(&self.project_root)
            .map(|rel| {
                rel.components()
                    .filter_map(|c| match c {
                        Component::Normal(s) => Some(s.to_string_lossy().to_string()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        if parts.is_empty() {
            leaf_name(path)
        } else {
            parts.join("__")
        }
    }
}

fn leaf_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| ProjdocError::file_write(path, e))
}

// =============================================================================
// Report Metadata
// =============================================================================

/// Metadata block heading every aggregate report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMetadata {
    pub generated_at: NaiveDateTime,
    pub model: String,
}

impl ReportMetadata {
    pub fn render(&self) -> String {
        format!(
            "\n{} {}\n{} {}\n",
            output::GENERATED_AT_LABEL,
            self.generated_at.format(output::GENERATED_AT_FORMAT),
            output::MODEL_LABEL,
            self.model
        )
    }

    /// Read the metadata block back from a report's text
    pub fn parse(text: &str) -> Option<Self> {
        let mut generated_at = None;
        let mut model = None;

        for line in text.lines().map(str::trim) {
            if generated_at.is_none()
                && let Some(value) = line.strip_prefix(output::GENERATED_AT_LABEL)
            {
                generated_at =
                    NaiveDateTime::parse_from_str(value.trim(), output::GENERATED_AT_FORMAT).ok();
            } else if model.is_none()
                && let Some(value) = line.strip_prefix(output::MODEL_LABEL)
            {
                model = Some(value.trim().to_string());
            }

            if generated_at.is_some() && model.is_some() {
                break;
            }
        }

        Some(Self {
            generated_at: generated_at?,
            model: model?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn analysis() -> AnalysisResult {
        AnalysisResult {
            project_name: "demo".to_string(),
            project_purpose: "Tujuan demo".to_string(),
            technologies: "Python".to_string(),
            project_analysis: "Modular".to_string(),
            additional_notes: "Tambah tes".to_string(),
            project_structure: "- pkg/\n  - a.py".to_string(),
        }
    }

    fn config(base: &Path, naming: NamingMode) -> OutputConfig {
        OutputConfig {
            base_dir: base.to_path_buf(),
            naming,
        }
    }

    #[test]
    fn test_new_creates_timestamped_bundle() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("output");

        let writer = OutputWriter::new(
            &config(&base, NamingMode::Relative),
            None,
            Path::new("/p"),
            "m",
        )
        .unwrap();

        assert!(writer.output_dir().is_dir());
        assert_eq!(writer.output_dir().parent(), Some(base.as_path()));
        let name = writer.output_dir().file_name().unwrap().to_string_lossy().to_string();
        let stamp = name.strip_prefix("analisis-").unwrap();
        assert!(NaiveDateTime::parse_from_str(stamp, "%Y%m%d-%H%M%S").is_ok());
        assert_eq!(writer.report_path(), writer.output_dir().join("analisis_proyek.txt"));
    }

    #[test]
    fn test_new_uses_explicit_path_and_tolerates_existing() {
        let temp = TempDir::new().unwrap();
        let explicit = temp.path().join("custom/bundle");
        fs::create_dir_all(&explicit).unwrap();

        let writer = OutputWriter::new(
            &config(temp.path(), NamingMode::Relative),
            Some(&explicit),
            Path::new("/p"),
            "m",
        )
        .unwrap();

        assert_eq!(writer.output_dir(), explicit);
        // Subfolders are created lazily
        assert!(!explicit.join("modul").exists());
    }

    #[test]
    fn test_write_analysis_round_trips_metadata() {
        let temp = TempDir::new().unwrap();
        let writer = OutputWriter::new(
            &config(temp.path(), NamingMode::Relative),
            Some(temp.path()),
            Path::new("/p"),
            "deepseek-r1-distill-llama-70b",
        )
        .unwrap();

        let path = writer.write_analysis(&analysis(), "Narasi proyek").unwrap();
        let text = fs::read_to_string(&path).unwrap();

        let metadata = ReportMetadata::parse(&text).unwrap();
        assert_eq!(metadata.model, "deepseek-r1-distill-llama-70b");
        let age = Local::now().naive_local() - metadata.generated_at;
        assert!(age.num_seconds().abs() < 60);

        for needle in [
            "📁 Proyek: demo",
            "🎯 Tujuan: Tujuan demo",
            "📂 Struktur:\n- pkg/\n  - a.py",
            "🔍 Analisis:\nModular",
            "🛠️ Teknologi:\nPython",
            "📝 Catatan Tambahan:\nTambah tes",
            "Deskripsi Proyek:\nNarasi proyek",
        ] {
            assert!(text.contains(needle), "missing {:?}", needle);
        }
        // Metadata precedes the body
        assert!(text.find("Model Analisis:").unwrap() < text.find("Proyek: demo").unwrap());
    }

    #[test]
    fn test_write_analysis_overwrites() {
        let temp = TempDir::new().unwrap();
        let writer = OutputWriter::new(
            &config(temp.path(), NamingMode::Relative),
            Some(temp.path()),
            Path::new("/p"),
            "m",
        )
        .unwrap();

        writer.write_analysis(&analysis(), "first").unwrap();
        let path = writer.write_analysis(&analysis(), "second").unwrap();

        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains("second"));
        assert!(!text.contains("first"));
    }

    #[test]
    fn test_metadata_parse_rejects_missing_fields() {
        assert!(ReportMetadata::parse("Model Analisis: x").is_none());
        assert!(ReportMetadata::parse("Dibuat pada: not-a-date\nModel Analisis: x").is_none());
    }

    #[test]
    fn test_module_description_naming() {
        let temp = TempDir::new().unwrap();
        let root = Path::new("/proj");

        let relative = OutputWriter::new(
            &config(temp.path(), NamingMode::Relative),
            Some(&temp.path().join("rel")),
            root,
            "m",
        )
        .unwrap();
        let path = relative
            .write_module_description(Path::new("/proj/pkg/core.py"), "Inti")
            .unwrap();
        assert_eq!(path.file_name().unwrap(), "pkg__core_deskripsi.txt");
        assert_eq!(path.parent().unwrap().file_name().unwrap(), "modul");

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("Modul: core.py"));
        assert!(text.contains("Path: /proj/pkg/core.py"));
        assert!(text.contains("Deskripsi:\nInti"));
        assert!(text.contains("Dibuat pada: "));

        let legacy = OutputWriter::new(
            &config(temp.path(), NamingMode::Legacy),
            Some(&temp.path().join("legacy")),
            root,
            "m",
        )
        .unwrap();
        let path = legacy
            .write_module_description(Path::new("/proj/pkg/core.py"), "Inti")
            .unwrap();
        assert_eq!(path.file_name().unwrap(), "core_deskripsi.txt");
    }

    #[test]
    fn test_directory_collision_in_legacy_mode() {
        let temp = TempDir::new().unwrap();
        let writer = OutputWriter::new(
            &config(temp.path(), NamingMode::Legacy),
            Some(temp.path()),
            Path::new("/proj"),
            "m",
        )
        .unwrap();

        let first = writer
            .write_directory_description(Path::new("/proj/a/utils"), "pertama")
            .unwrap();
        let second = writer
            .write_directory_description(Path::new("/proj/b/utils"), "kedua")
            .unwrap();

        assert_eq!(first, second);
        let text = fs::read_to_string(second).unwrap();
        assert!(text.contains("kedua"));
        assert!(!text.contains("pertama"));
    }

    #[test]
    fn test_directory_names_unique_in_relative_mode() {
        let temp = TempDir::new().unwrap();
        let writer = OutputWriter::new(
            &config(temp.path(), NamingMode::Relative),
            Some(temp.path()),
            Path::new("/proj"),
            "m",
        )
        .unwrap();

        let first = writer
            .write_directory_description(Path::new("/proj/a/utils"), "pertama")
            .unwrap();
        let second = writer
            .write_directory_description(Path::new("/proj/b/utils"), "kedua")
            .unwrap();

        assert_eq!(first.file_name().unwrap(), "a__utils_deskripsi.txt");
        assert_eq!(second.file_name().unwrap(), "b__utils_deskripsi.txt");
        assert!(fs::read_to_string(first).unwrap().contains("Direktori: utils"));
    }

    #[test]
    fn test_relative_name_outside_root_falls_back_to_leaf() {
        let temp = TempDir::new().unwrap();
        let writer = OutputWriter::new(
            &config(temp.path(), NamingMode::Relative),
            Some(temp.path()),
            Path::new("/proj"),
            "m",
        )
        .unwrap();

        assert_eq!(writer.relative_name(Path::new("/elsewhere/lib")), "lib");
    }
}
