use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use projdoc::ProjdocError;
use projdoc::cli::Output;
use projdoc::cli::commands::analyze::AnalyzeOptions;
use projdoc::config::NamingMode;

/// Parse output naming mode from string
fn parse_naming(s: &str) -> Result<NamingMode, String> {
    s.parse()
}

#[derive(Parser)]
#[command(name = "projdoc")]
#[command(
    version,
    about = "LLM-generated documentation bundles for Python projects"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, global = true, help = "Config file (default: .projdoc.toml)")]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a project folder and write the documentation bundle
    Analyze {
        #[arg(long, short, help = "Project folder to analyze")]
        folder: PathBuf,
        #[arg(long, short, help = "Bundle directory (default: output/analisis-<timestamp>)")]
        output: Option<PathBuf>,
        #[arg(
            long,
            value_parser = parse_naming,
            help = "Description file naming: relative, legacy"
        )]
        naming: Option<NamingMode>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(long, help = "Print as JSON instead of TOML")]
        json: bool,
    },
    /// Show configuration file paths
    Path,
    /// Write a default configuration file
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mprojdoc encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let out = Output::new();
            out.error(&format!("Error: {}", e));
            if let Some(category) = e
                .downcast_ref::<ProjdocError>()
                .and_then(ProjdocError::completion_category)
            {
                out.error(&format!("Hint: {}", category.hint()));
            }
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Analyze {
            folder,
            output,
            naming,
        } => {
            projdoc::cli::commands::analyze::run(AnalyzeOptions {
                folder,
                output,
                naming,
                config: cli.config,
                quiet: cli.quiet,
            })?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => {
                projdoc::cli::commands::config::show(cli.config.as_deref(), json)?;
            }
            ConfigAction::Path => {
                projdoc::cli::commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                projdoc::cli::commands::config::init(global, force)?;
            }
        },
    }

    Ok(())
}
