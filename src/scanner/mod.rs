//! Project Scanner
//!
//! Walks a project root, classifies files by extension and renders the
//! retained directory tree as indented text for prompting and the report.

pub mod file_scanner;

pub use file_scanner::FileScanner;

use std::path::{Path, PathBuf};

use crate::types::{DirectorySet, FileSet};

/// Result of one scan, read-only after construction
#[derive(Debug, Clone)]
pub struct ProjectScan {
    pub root: PathBuf,
    pub project_name: String,
    pub files: FileSet,
    pub directories: DirectorySet,
}

impl ProjectScan {
    pub fn new(root: PathBuf, files: FileSet, directories: DirectorySet) -> Self {
        let project_name = project_name_of(&root);
        Self {
            root,
            project_name,
            files,
            directories,
        }
    }

    /// Directories other than the root, in path order
    pub fn subdirectories(&self) -> impl Iterator<Item = &Path> {
        self.directories.iter().filter(move |d| *d != self.root)
    }

    /// Path relative to the scanned root, or the path itself when outside it
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    /// Render the retained tree.
    ///
    /// One `- name/` line per non-root directory, indented two spaces per
    /// level, followed by `- file` lines for its immediate children in
    /// category order.
    pub fn render_structure(&self) -> String {
        let mut lines = Vec::new();

        for dir in self.subdirectories() {
            let rel = self.relative(dir);
            let depth = rel.components().count();
            let indent = "  ".repeat(depth.saturating_sub(1));
            let name = rel
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| rel.display().to_string());

            lines.push(format!("{}- {}/", indent, name));

            for (_, file) in self.files.iter() {
                if file.parent() == Some(dir)
                    && let Some(file_name) = file.file_name()
                {
                    lines.push(format!("{}  - {}", indent, file_name.to_string_lossy()));
                }
            }
        }

        lines.join("\n")
    }
}

/// Final path component of the root; `.` and `..` resolve through the filesystem
fn project_name_of(root: &Path) -> String {
    let from_path = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .filter(|n| !n.is_empty());

    from_path
        .or_else(|| {
            root.canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        })
        .unwrap_or_else(|| root.display().to_string())
}
