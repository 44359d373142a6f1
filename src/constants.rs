//! Global Constants
//!
//! Centralized defaults for scanning, prompting and output layout.
//! Everything here can be overridden through [`crate::config::Config`].

/// Scanner defaults
pub mod scan {
    /// Extensions classified as source code
    pub const SOURCE_EXTENSIONS: &[&str] = &[".py"];

    /// Extensions classified as documentation
    pub const DOCUMENTATION_EXTENSIONS: &[&str] = &[".md", ".txt", ".rst"];

    /// Extensions classified as configuration
    pub const CONFIG_EXTENSIONS: &[&str] = &[".toml", ".yaml", ".yml", ".json"];

    /// Directory names never descended into
    pub const IGNORED_DIRECTORIES: &[&str] = &[
        "__pycache__",
        ".git",
        ".venv",
        "venv",
        "env",
        "node_modules",
        ".idea",
        ".vscode",
    ];

    /// File names never recorded
    pub const IGNORED_FILES: &[&str] = &[".gitignore", ".env", ".DS_Store"];

    /// Files larger than this are replaced by a placeholder when read (1MB)
    pub const MAX_FILE_SIZE: u64 = 1024 * 1024;
}

/// Analysis defaults
pub mod analysis {
    /// Character budget for file content embedded in a prompt
    pub const MAX_PROMPT_CHARS: usize = 2000;

    /// Number of source files sampled for technology detection
    pub const TECH_SAMPLE_FILES: usize = 5;

    pub const NO_DOCUMENTATION: &str = "No documentation found to determine project purpose.";
    pub const NO_SOURCE_FILES: &str = "No source files found to analyze technologies.";
    pub const NO_SUBDIRECTORIES: &str = "No subdirectories found to analyze project structure.";

    /// Substituted when the narrative project description fails
    pub const DESCRIPTION_UNAVAILABLE: &str =
        "Deskripsi proyek tidak dapat dibuat karena terjadi kesalahan pada layanan model.";
}

/// Completion endpoint defaults
pub mod llm {
    pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
    pub const DEFAULT_MODEL: &str = "deepseek-r1-distill-llama-70b";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
    pub const DEFAULT_TEMPERATURE: f32 = 0.2;
    pub const DEFAULT_MAX_TOKENS: usize = 2048;
    pub const DEFAULT_MAX_RETRIES: u8 = 2;

    /// Base delay for exponential backoff (milliseconds)
    pub const BASE_DELAY_MS: u64 = 500;

    /// Maximum delay between retries (seconds)
    pub const MAX_DELAY_SECS: u64 = 10;

    /// Backoff multiplier
    pub const BACKOFF_FACTOR: f32 = 2.0;

    pub const SYSTEM_PROMPT: &str = "You are a senior software architect who writes clear, professional technical documentation.";
}

/// Output bundle layout
pub mod output {
    /// Base folder for timestamped bundles
    pub const BASE_DIR: &str = "output";

    /// Bundle directory prefix, followed by `YYYYMMDD-HHMMSS`
    pub const BUNDLE_PREFIX: &str = "analisis-";

    pub const BUNDLE_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

    /// Aggregate report file name
    pub const REPORT_FILE: &str = "analisis_proyek.txt";

    /// Module description subfolder
    pub const MODULE_DIR: &str = "modul";

    /// Directory description subfolder
    pub const DIRECTORY_DIR: &str = "direktori";

    /// Suffix appended to every description file stem
    pub const DESCRIPTION_SUFFIX: &str = "_deskripsi.txt";

    /// Timestamp format used inside generated files
    pub const GENERATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub const GENERATED_AT_LABEL: &str = "Dibuat pada:";
    pub const MODEL_LABEL: &str = "Model Analisis:";
}
