pub mod error;
pub mod utils;

pub use error::{CompletionError, ErrorCategory, ErrorClassifier, ProjdocError, Result};
pub use utils::{log_filter_warn, redact, truncate_chars};

// =============================================================================
// Scan Domain Types
// =============================================================================

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Category assigned to every scanned file, decided by extension alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Source,
    Documentation,
    Config,
    Other,
}

impl FileCategory {
    /// All categories in report order
    pub const ALL: [FileCategory; 4] = [
        FileCategory::Source,
        FileCategory::Documentation,
        FileCategory::Config,
        FileCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Source => "source",
            FileCategory::Documentation => "documentation",
            FileCategory::Config => "config",
            FileCategory::Other => "other",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classified files of one scan, each category kept in scan order.
///
/// Populated by the scanner and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    source: Vec<PathBuf>,
    documentation: Vec<PathBuf>,
    config: Vec<PathBuf>,
    other: Vec<PathBuf>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, category: FileCategory, path: PathBuf) {
        self.bucket_mut(category).push(path);
    }

    pub fn get(&self, category: FileCategory) -> &[PathBuf] {
        match category {
            FileCategory::Source => &self.source,
            FileCategory::Documentation => &self.documentation,
            FileCategory::Config => &self.config,
            FileCategory::Other => &self.other,
        }
    }

    pub fn source(&self) -> &[PathBuf] {
        &self.source
    }

    pub fn documentation(&self) -> &[PathBuf] {
        &self.documentation
    }

    pub fn count(&self, category: FileCategory) -> usize {
        self.get(category).len()
    }

    pub fn total(&self) -> usize {
        FileCategory::ALL.iter().map(|c| self.count(*c)).sum()
    }

    /// Iterate all files, category by category
    pub fn iter(&self) -> impl Iterator<Item = (FileCategory, &Path)> {
        FileCategory::ALL
            .into_iter()
            .flat_map(move |c| self.get(c).iter().map(move |p| (c, p.as_path())))
    }

    /// Source files whose immediate parent is `dir`
    pub fn source_children_of(&self, dir: &Path) -> Vec<PathBuf> {
        self.source
            .iter()
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect()
    }

    fn bucket_mut(&mut self, category: FileCategory) -> &mut Vec<PathBuf> {
        match category {
            FileCategory::Source => &mut self.source,
            FileCategory::Documentation => &mut self.documentation,
            FileCategory::Config => &mut self.config,
            FileCategory::Other => &mut self.other,
        }
    }
}

/// Directories visited during a scan, ignored subtrees excluded.
///
/// Kept sorted so structure rendering and directory iteration are stable.
#[derive(Debug, Clone, Default)]
pub struct DirectorySet(BTreeSet<PathBuf>);

impl DirectorySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, dir: PathBuf) -> bool {
        self.0.insert(dir)
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.0.contains(dir)
    }

    /// Iterate directories in path order
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.0.iter().map(PathBuf::as_path)
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_category_names() {
        let names: Vec<_> = FileCategory::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(names, ["source", "documentation", "config", "other"]);
    }

    #[test]
    fn test_file_set_counts_and_order() {
        let mut files = FileSet::new();
        files.push(FileCategory::Source, PathBuf::from("/p/b.py"));
        files.push(FileCategory::Source, PathBuf::from("/p/a.py"));
        files.push(FileCategory::Documentation, PathBuf::from("/p/README.md"));

        assert_eq!(files.count(FileCategory::Source), 2);
        assert_eq!(files.count(FileCategory::Config), 0);
        assert_eq!(files.total(), 3);
        // Scan order is kept, not sorted
        assert_eq!(files.source()[0], PathBuf::from("/p/b.py"));

        let all: Vec<_> = files.iter().map(|(c, _)| c).collect();
        assert_eq!(
            all,
            [
                FileCategory::Source,
                FileCategory::Source,
                FileCategory::Documentation
            ]
        );
    }

    #[test]
    fn test_source_children_of() {
        let mut files = FileSet::new();
        files.push(FileCategory::Source, PathBuf::from("/p/pkg/a.py"));
        files.push(FileCategory::Source, PathBuf::from("/p/pkg/sub/b.py"));
        files.push(FileCategory::Documentation, PathBuf::from("/p/pkg/notes.md"));

        let children = files.source_children_of(Path::new("/p/pkg"));
        assert_eq!(children, vec![PathBuf::from("/p/pkg/a.py")]);
    }

    #[test]
    fn test_directory_set_sorted() {
        let mut dirs = DirectorySet::new();
        dirs.insert(PathBuf::from("/p/z"));
        dirs.insert(PathBuf::from("/p"));
        dirs.insert(PathBuf::from("/p/a"));
        assert!(!dirs.insert(PathBuf::from("/p/a")));

        let order: Vec<_> = dirs.iter().collect();
        assert_eq!(order, [Path::new("/p"), Path::new("/p/a"), Path::new("/p/z")]);
        assert_eq!(dirs.len(), 3);
    }
}
