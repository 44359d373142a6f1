//! Configuration Management
//!
//! Hierarchical resolution, lowest priority first:
//! 1. Built-in defaults
//! 2. Global config (~/.config/projdoc/config.toml)
//! 3. Project config (.projdoc.toml or `--config <file>`)
//! 4. Environment variables (PROJDOC_*, then GROQ_API_KEY / OPENAI_API_KEY)
//! 5. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
