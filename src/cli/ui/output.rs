use console::style;

use crate::pipeline::{ItemOutcome, ItemReport, RunSummary};

pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    /// Suppress everything except errors
    pub fn quiet(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✓").green(), message);
        }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("⚠").yellow(), message);
        }
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").blue(), message);
        }
    }

    pub fn header(&self, message: &str) {
        if !self.quiet {
            println!("\n{}", style(message).bold().underlined());
        }
    }

    pub fn section(&self, message: &str) {
        if !self.quiet {
            println!("\n{}", style(message).bold());
            println!("{}", "─".repeat(40));
        }
    }

    /// Final report of an analyze run
    pub fn summary(&self, summary: &RunSummary) {
        self.section("Ringkasan");
        self.success(&format!("Laporan: {}", summary.report_path.display()));
        if summary.description_fallback {
            self.warning("Deskripsi proyek tidak tersedia, placeholder ditulis");
        }

        self.items("Modul", &summary.modules);
        self.items("Direktori", &summary.directories);

        self.info(&format!("Output: {}", summary.output_dir.display()));
    }

    fn items(&self, label: &str, items: &[ItemReport]) {
        let written = RunSummary::written(items);
        let failed = RunSummary::failed(items);

        if failed == 0 {
            self.success(&format!("{}: {} ditulis", label, written));
            return;
        }

        self.warning(&format!("{}: {} ditulis, {} gagal", label, written, failed));
        for item in items {
            if let ItemOutcome::Failed(reason) = &item.outcome {
                self.warning(&format!("  {}: {}", item.path.display(), reason));
            }
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
