//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/projdoc/config.toml)
//! 3. Project config (.projdoc.toml, or the file given with `--config`)
//! 4. Environment variables (PROJDOC_* prefix, `__` between levels)
//!
//! A `.env` file in the working directory is loaded first, and the
//! conventional `GROQ_API_KEY` / `OPENAI_API_KEY` variables fill the API
//! key when no other source set it.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{ProjdocError, Result};

/// Legacy variables consulted for the API key, in order
const LEGACY_KEY_VARS: &[&str] = &["GROQ_API_KEY", "OPENAI_API_KEY"];

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain:
    /// .env → defaults → global → project (or explicit) → env vars → legacy key vars
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
        }

        if let Some(path) = explicit
            && !path.is_file()
        {
            return Err(ProjdocError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        let project_path = explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::project_config_path);
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // PROJDOC_LLM__MODEL -> llm.model
        figment = figment.merge(Env::prefixed("PROJDOC_").split("__"));

        let mut config = Self::extract(figment)?;

        Self::apply_legacy_env(&mut config, |key| env::var(key).ok());

        config.validate()?;

        Ok(config)
    }

    fn extract(figment: Figment) -> Result<Config> {
        figment
            .extract()
            .map_err(|e| ProjdocError::Config(format!("Configuration error: {}", e)))
    }

    /// Defaults plus one file, without the global file or the environment
    #[cfg(test)]
    fn load_from_file(path: &Path) -> Result<Config> {
        let config = Self::extract(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::file(path)),
        )?;

        config.validate()?;
        Ok(config)
    }

    /// Fill unset values from the conventional variables the classic tool read.
    ///
    /// Never overrides a value that a config file or PROJDOC_* variable set.
    pub(crate) fn apply_legacy_env(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if config.llm.api_key.is_none() {
            config.llm.api_key = LEGACY_KEY_VARS.iter().find_map(|k| non_empty(*k));
        }

        let defaults = Config::default();
        if config.llm.model == defaults.llm.model
            && let Some(model) = non_empty("GROQ_MODEL")
        {
            config.llm.model = model;
        }
        if config.llm.api_base == defaults.llm.api_base
            && let Some(base) = non_empty("GROQ_API_BASE")
        {
            config.llm.api_base = base;
        }
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/projdoc/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("projdoc"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(".projdoc.toml")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());

        let dotenv = PathBuf::from(".env");
        let exists = if dotenv.exists() { "✓" } else { "✗" };
        println!("  Env:     {} {}", exists, dotenv.display());
    }

    /// Show current effective configuration (the API key is never printed)
    pub fn show_config(explicit: Option<&Path>, as_json: bool) -> Result<()> {
        let config = Self::load(explicit)?;

        if as_json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config).map_err(|e| ProjdocError::Config(e.to_string()))?
            );
        }

        let key_state = match config.llm.api_key.as_deref() {
            Some(key) => format!("set ({})", crate::types::redact(key)),
            None => "not set".to_string(),
        };
        println!("# llm.api_key: {}", key_state);

        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write a commented default config file.
    ///
    /// Targets the global file when `global` is set, the project file otherwise.
    /// An existing file is kept unless `force` is set.
    pub fn init(global: bool, force: bool) -> Result<PathBuf> {
        let path = if global {
            let dir = Self::global_dir().ok_or_else(|| {
                ProjdocError::Config("Cannot determine global config directory".to_string())
            })?;
            fs::create_dir_all(&dir)?;
            dir.join("config.toml")
        } else {
            Self::project_config_path()
        };

        if path.exists() && !force {
            info!("Config exists: {}", path.display());
            return Ok(path);
        }

        fs::write(&path, Self::default_config_toml())
            .map_err(|e| ProjdocError::file_write(&path, e))?;
        info!("Created config: {}", path.display());
        Ok(path)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Default config file content (TOML)
    fn default_config_toml() -> String {
        r#"# projdoc configuration
# Project settings in .projdoc.toml override ~/.config/projdoc/config.toml.
# The API key is best kept in .env as GROQ_API_KEY.

[llm]
api_base = "https://api.groq.com/openai/v1"
model = "deepseek-r1-distill-llama-70b"
timeout_secs = 120
temperature = 0.2
max_tokens = 2048
max_retries = 2

[scan]
source_extensions = [".py"]
documentation_extensions = [".md", ".txt", ".rst"]
config_extensions = [".toml", ".yaml", ".yml", ".json"]
ignored_directories = ["__pycache__", ".git", ".venv", "venv", "env", "node_modules", ".idea", ".vscode"]
ignored_files = [".gitignore", ".env", ".DS_Store"]
max_file_size = 1048576

[analysis]
max_prompt_chars = 2000
tech_sample_files = 5

[output]
base_dir = "output"
# "relative" keeps nested modules apart; "legacy" names files by stem only
naming = "relative"
"#
        .to_string()
    }
}
