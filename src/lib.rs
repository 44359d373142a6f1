//! projdoc - LLM-Generated Project Documentation
//!
//! Scans a Python project folder and writes a documentation bundle in
//! Indonesian: one aggregate report plus one description file per source
//! module and per directory containing source files.
//!
//! ## Quick Start
//!
//! ```ignore
//! use projdoc::{ConfigLoader, DocumentationPipeline, create_provider};
//!
//! let config = ConfigLoader::load(None)?;
//! let provider = create_provider(&config.llm)?;
//! let summary = DocumentationPipeline::new(&config, provider)
//!     .run(Path::new("my-project"), None)
//!     .await?;
//! ```
//!
//! ## Modules
//!
//! - [`scanner`]: Folder walk and file classification
//! - [`ai`]: Completion provider, retry wrapper and prompt templates
//! - [`analyzer`]: Purpose, technologies, structure and notes
//! - [`describer`]: Project, module and directory narratives
//! - [`writer`]: Output bundle layout
//! - [`pipeline`]: End-to-end orchestration

pub mod ai;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod describer;
pub mod pipeline;
pub mod scanner;
pub mod types;
pub mod writer;

// =============================================================================
// Core Re-exports
// =============================================================================

pub use config::{Config, ConfigLoader, NamingMode};
pub use types::{CompletionError, ErrorCategory, ProjdocError, Result};

pub use ai::{CompletionProvider, SharedProvider, create_provider};
pub use analyzer::{AnalysisResult, ProjectAnalyzer};
pub use describer::Describer;
pub use pipeline::{DocumentationPipeline, ItemOutcome, RunSummary};
pub use scanner::{FileScanner, ProjectScan};
pub use writer::OutputWriter;
