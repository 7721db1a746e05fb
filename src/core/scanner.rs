use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::Language;
use crate::error::ScanError;

/// Directory names pruned from every walk. Matching is by exact path
/// segment, never substring, so a directory named `liblib` is not caught by
/// the `lib` entry.
pub const DEFAULT_EXCLUDES: [&str; 16] = [
    "bin",
    "obj",
    "node_modules",
    "venv",
    ".git",
    "__pycache__",
    "packages",
    ".vs",
    "build",
    "dist",
    "Debug",
    "Release",
    "lib",
    "cmake-build-debug",
    "cmake-build-release",
    "target",
];

#[derive(Debug, Clone)]
pub struct ExclusionSet {
    names: BTreeSet<String>,
}

impl ExclusionSet {
    /// The default set plus any user-supplied directory names.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: BTreeSet<String> =
            DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect();
        names.extend(extra.into_iter().map(Into::into));
        Self { names }
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn excludes_path(&self, path: &Path) -> bool {
        path.components()
            .filter_map(|c| c.as_os_str().to_str())
            .any(|segment| self.names.contains(segment))
    }

    /// Segment match against a `/`-separated identifier (resolved targets
    /// and external refs alike).
    pub fn excludes_id(&self, id: &str) -> bool {
        id.split('/').any(|segment| self.names.contains(segment))
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::with_extra(std::iter::empty::<String>())
    }
}

/// One file enumerated by the walk. Created once per scan and never mutated;
/// content is read transiently by the worker and discarded.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub relative: String,
    pub language: Language,
}

pub struct FileScanner;

impl FileScanner {
    pub fn new() -> Self {
        Self
    }

    /// Enumerate classifiable files under `root`, pruning excluded
    /// directories before descending into them.
    pub fn scan_directory(
        &self,
        root: &Path,
        exclusions: &ExclusionSet,
    ) -> Result<Vec<SourceFile>, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::InvalidRoot {
                path: root.to_path_buf(),
            });
        }

        let files = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                !(entry.file_type().is_dir()
                    && entry.depth() > 0
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| exclusions.matches_name(name)))
            })
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let path = entry.path();
                let language = Language::from_path(path)?;
                let relative = super::resolver::relative_id(path, root)?;
                Some(SourceFile {
                    path: path.to_path_buf(),
                    relative,
                    language,
                })
            })
            .collect();

        Ok(files)
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}
