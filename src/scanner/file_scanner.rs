use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::ProjectScan;
use crate::config::ScanConfig;
use crate::types::{DirectorySet, FileSet, ProjdocError, Result, log_filter_warn};

/// Walks a project root and classifies every retained file
pub struct FileScanner {
    root: PathBuf,
    config: ScanConfig,
}

impl FileScanner {
    pub fn new<P: AsRef<Path>>(root: P, config: &ScanConfig) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config: config.clone(),
        }
    }

    /// Walk the tree top-down.
    ///
    /// Within each directory, files come before subdirectories, both sorted
    /// by name, so a directory's own files are recorded before anything
    /// below it. Ignored directory names are pruned before descent, so
    /// nothing below them is ever visited. Standard ignore filters (hidden
    /// files, .gitignore) are disabled: only the configured name sets apply.
    pub fn scan(&self) -> Result<ProjectScan> {
        if !self.root.exists() {
            return Err(ProjdocError::invalid_input(
                &self.root,
                "path does not exist",
            ));
        }
        if !self.root.is_dir() {
            return Err(ProjdocError::invalid_input(&self.root, "not a directory"));
        }

        let ignored_dirs = self.config.ignored_directories.clone();
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false) // Security: prevent symlink traversal attacks
            .sort_by_file_path(|a, b| {
                (is_dir(a), a.file_name()).cmp(&(is_dir(b), b.file_name()))
            })
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                if !is_dir || entry.depth() == 0 {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                !ignored_dirs.iter().any(|d| *d == name)
            })
            .build();

        let mut files = FileSet::new();
        let mut directories = DirectorySet::new();

        for entry in walker.filter_map(|e| log_filter_warn(e, "Skipping unreadable entry")) {
            let path = entry.path();

            if entry.file_type().is_some_and(|t| t.is_dir()) {
                directories.insert(path.to_path_buf());
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if self.config.is_ignored_file(&name) {
                continue;
            }

            let category = self.config.classify(path);
            files.push(category, path.to_path_buf());
        }

        debug!(
            "Scanned {}: {} files in {} directories",
            self.root.display(),
            files.total(),
            directories.len()
        );

        Ok(ProjectScan::new(self.root.clone(), files, directories))
    }

    /// Read a file for prompting.
    ///
    /// Never fails: oversized files and read errors come back as
    /// placeholder text that callers treat like any other content.
    pub fn read_content(&self, path: &Path) -> String {
        match fs::metadata(path) {
            Ok(meta) if meta.len() > self.config.max_file_size => {
                return format!("[File too large to analyze: {} bytes]", meta.len());
            }
            Ok(_) => {}
            Err(e) => return format!("[Error reading file: {}]", e),
        }

        match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("Failed to read {}: {}", path.display(), e);
                format!("[Error reading file: {}]", e)
            }
        }
    }
}

/// Directory check that does not follow symlinks
fn is_dir(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.is_dir())
}
