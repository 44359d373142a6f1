//! Configuration Types
//!
//! All configuration structures with defaults matching the classic tool.
//! A `Config` is built once at startup and passed by reference into each
//! component; nothing reads configuration from ambient state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::constants::{analysis, llm, output, scan};
use crate::types::{FileCategory, ProjdocError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Completion endpoint settings
    pub llm: LlmConfig,

    /// File scanning and classification
    pub scan: ScanConfig,

    /// Prompt sizing
    pub analysis: AnalysisConfig,

    /// Output bundle settings
    pub output: OutputConfig,
}

impl Config {
    /// Validate configuration values.
    /// Returns `ProjdocError::Config` on the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.llm.timeout_secs == 0 {
            return Err(ProjdocError::Config(
                "llm.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ProjdocError::Config(format!(
                "llm.temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        match url::Url::parse(&self.llm.api_base) {
            Ok(u) if matches!(u.scheme(), "http" | "https") => {}
            Ok(u) => {
                return Err(ProjdocError::Config(format!(
                    "llm.api_base must use http or https, got '{}'",
                    u.scheme()
                )));
            }
            Err(e) => {
                return Err(ProjdocError::Config(format!(
                    "llm.api_base '{}' is not a valid URL: {}",
                    self.llm.api_base, e
                )));
            }
        }

        if self.analysis.max_prompt_chars == 0 {
            return Err(ProjdocError::Config(
                "analysis.max_prompt_chars must be greater than 0".to_string(),
            ));
        }

        if self.analysis.tech_sample_files == 0 {
            return Err(ProjdocError::Config(
                "analysis.tech_sample_files must be greater than 0".to_string(),
            ));
        }

        self.scan.validate()
    }

    /// API key, or a config error telling the user how to set one
    pub fn require_api_key(&self) -> Result<&str> {
        self.llm
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                ProjdocError::Config(
                    "No API key configured. Set GROQ_API_KEY or OPENAI_API_KEY (e.g. in .env), \
                     PROJDOC_LLM__API_KEY, or llm.api_key in .projdoc.toml"
                        .to_string(),
                )
            })
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API key; never serialized back out
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint
    pub api_base: String,

    /// Model identifier
    pub model: String,

    /// Transport timeout per request in seconds
    pub timeout_secs: u64,

    pub temperature: f32,

    /// Maximum tokens to generate per completion
    pub max_tokens: usize,

    /// Retries for transient failures (0 disables retrying)
    pub max_retries: u8,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: llm::DEFAULT_API_BASE.to_string(),
            model: llm::DEFAULT_MODEL.to_string(),
            timeout_secs: llm::DEFAULT_TIMEOUT_SECS,
            temperature: llm::DEFAULT_TEMPERATURE,
            max_tokens: llm::DEFAULT_MAX_TOKENS,
            max_retries: llm::DEFAULT_MAX_RETRIES,
        }
    }
}

// =============================================================================
// Scan Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub source_extensions: Vec<String>,
    pub documentation_extensions: Vec<String>,
    pub config_extensions: Vec<String>,

    /// Directory names pruned before descent
    pub ignored_directories: Vec<String>,

    /// File names skipped entirely
    pub ignored_files: Vec<String>,

    /// Read ceiling in bytes; larger files become a placeholder
    pub max_file_size: u64,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            source_extensions: owned(scan::SOURCE_EXTENSIONS),
            documentation_extensions: owned(scan::DOCUMENTATION_EXTENSIONS),
            config_extensions: owned(scan::CONFIG_EXTENSIONS),
            ignored_directories: owned(scan::IGNORED_DIRECTORIES),
            ignored_files: owned(scan::IGNORED_FILES),
            max_file_size: scan::MAX_FILE_SIZE,
        }
    }
}

impl ScanConfig {
    /// Classify a path by its lower-cased extension.
    ///
    /// Total: anything unmatched (including no extension) is `Other`.
    pub fn classify(&self, path: &Path) -> FileCategory {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return FileCategory::Other;
        };
        let dotted = format!(".{}", ext.to_lowercase());

        let matches = |set: &[String]| set.iter().any(|e| e.to_lowercase() == dotted);

        if matches(&self.source_extensions) {
            FileCategory::Source
        } else if matches(&self.documentation_extensions) {
            FileCategory::Documentation
        } else if matches(&self.config_extensions) {
            FileCategory::Config
        } else {
            FileCategory::Other
        }
    }

    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_directories.iter().any(|d| d == name)
    }

    pub fn is_ignored_file(&self, name: &str) -> bool {
        self.ignored_files.iter().any(|f| f == name)
    }

    /// Extension sets must be dot-prefixed and pairwise disjoint
    fn validate(&self) -> Result<()> {
        let sets = [
            ("scan.source_extensions", &self.source_extensions),
            ("scan.documentation_extensions", &self.documentation_extensions),
            ("scan.config_extensions", &self.config_extensions),
        ];

        let mut seen: BTreeSet<String> = BTreeSet::new();
        for (name, set) in sets {
            for ext in set {
                if !ext.starts_with('.') || ext.len() < 2 {
                    return Err(ProjdocError::Config(format!(
                        "{}: extension '{}' must look like '.ext'",
                        name, ext
                    )));
                }
                if !seen.insert(ext.to_lowercase()) {
                    return Err(ProjdocError::Config(format!(
                        "{}: extension '{}' appears in more than one category",
                        name, ext
                    )));
                }
            }
        }

        Ok(())
    }
}

// =============================================================================
// Analysis Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Character budget for content embedded in prompts
    pub max_prompt_chars: usize,

    /// Source files sampled by the technology step
    pub tech_sample_files: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_prompt_chars: analysis::MAX_PROMPT_CHARS,
            tech_sample_files: analysis::TECH_SAMPLE_FILES,
        }
    }
}

// =============================================================================
// Output Configuration
// =============================================================================

/// How per-item description files are named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NamingMode {
    /// Path relative to the scanned root, separators replaced by `__`
    #[default]
    Relative,
    /// File stem / directory leaf name only; equal names overwrite each other
    Legacy,
}

impl std::fmt::Display for NamingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NamingMode::Relative => write!(f, "relative"),
            NamingMode::Legacy => write!(f, "legacy"),
        }
    }
}

impl std::str::FromStr for NamingMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "relative" => Ok(NamingMode::Relative),
            "legacy" => Ok(NamingMode::Legacy),
            _ => Err(format!(
                "Unknown naming mode: {}. Valid values: relative, legacy",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Folder under which timestamped bundles are created
    pub base_dir: PathBuf,

    pub naming: NamingMode,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(output::BASE_DIR),
            naming: NamingMode::default(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
