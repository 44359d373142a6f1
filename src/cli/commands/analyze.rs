//! Analyze Command
//!
//! Scans a project folder and writes the documentation bundle.
//!
//! Usage:
//!   projdoc analyze --folder <path> [--output <dir>] [--naming relative|legacy]

use std::path::PathBuf;

use tokio::runtime::Runtime;
use tracing::debug;

use crate::ai::create_provider;
use crate::cli::Output;
use crate::config::{ConfigLoader, NamingMode};
use crate::pipeline::DocumentationPipeline;
use crate::types::{Result, redact};

pub struct AnalyzeOptions {
    pub folder: PathBuf,
    pub output: Option<PathBuf>,
    pub naming: Option<NamingMode>,
    pub config: Option<PathBuf>,
    pub quiet: bool,
}

pub fn run(options: AnalyzeOptions) -> Result<()> {
    let out = Output::quiet(options.quiet);

    let mut config = ConfigLoader::load(options.config.as_deref())?;
    if let Some(naming) = options.naming {
        config.output.naming = naming;
    }

    // Refuse to start without credentials, before touching the folder or network
    let api_key = config.require_api_key()?;

    out.header("projdoc");
    out.info(&format!("API base: {}", config.llm.api_base));
    out.info(&format!("Model:    {}", config.llm.model));
    out.info(&format!("API key:  {}", redact(api_key)));
    out.info(&format!("Folder:   {}", options.folder.display()));
    debug!("Naming mode: {}", config.output.naming);

    let provider = create_provider(&config.llm)?;
    let pipeline = DocumentationPipeline::new(&config, provider);

    let rt = Runtime::new()?;
    let summary = rt.block_on(pipeline.run(&options.folder, options.output.as_deref()))?;

    out.summary(&summary);
    if summary.is_complete() {
        out.success(&format!("Dokumentasi {} selesai", summary.project_name));
    } else {
        out.warning(&format!(
            "Dokumentasi {} selesai dengan kegagalan sebagian",
            summary.project_name
        ));
    }

    Ok(())
}
