//! Config Command
//!
//! Usage:
//!   projdoc config show [--json]
//!   projdoc config path
//!   projdoc config init [--global] [--force]

use std::path::Path;

use crate::config::ConfigLoader;
use crate::types::Result;

/// Show the merged effective configuration
pub fn show(explicit: Option<&Path>, json: bool) -> Result<()> {
    ConfigLoader::show_config(explicit, json)
}

/// Show configuration file paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

/// Write a default config file
pub fn init(global: bool, force: bool) -> Result<()> {
    let existed = if global {
        ConfigLoader::global_config_path().is_some_and(|p| p.exists())
    } else {
        ConfigLoader::project_config_path().exists()
    };

    let path = ConfigLoader::init(global, force)?;
    if existed && !force {
        println!("Config already exists: {}", path.display());
        println!("Use --force to overwrite.");
    } else {
        println!("✓ Initialized configuration");
        println!("  Config: {}", path.display());
    }
    Ok(())
}
