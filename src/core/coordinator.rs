use indicatif::ProgressBar;
use parking_lot::Mutex;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

use super::extractor::DependencyExtractor;
use super::graph::DependencyGraph;
use super::resolver::{AliasTable, PathResolver};
use super::scanner::{ExclusionSet, FileScanner, SourceFile};
use crate::error::ScanError;

/// Files are dispatched to the worker pool in batches of this size.
pub const CHUNK_SIZE: usize = 100;

/// Monotone counters accumulated under the merge lock.
///
/// At completion `files_processed + skipped` equals the number of enumerated
/// files (failed files count as skipped and as errors), and
/// `dependencies_found` equals the summed size of all edge sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files_processed: u64,
    pub dependencies_found: u64,
    pub errors: u64,
    pub warnings: u64,
    pub skipped: u64,
}

#[derive(Debug)]
pub struct ScanOutcome {
    pub graph: DependencyGraph,
    pub stats: ScanStats,
}

/// Pure per-file result produced by a worker before the merge step.
struct FileReport {
    relative: String,
    deps: BTreeSet<String>,
}

/// Terminal state of one file. Exactly one of these is merged per
/// dispatched file; a failure never aborts the batch.
enum FileOutcome {
    Merged(FileReport),
    Skipped,
    Failed(ScanError),
}

/// Walks the tree, fans files out over the rayon pool, and folds the pure
/// per-file results into one graph and one stats block. The alias table and
/// exclusion set are read-only for the whole scan; the only shared mutable
/// state is behind a single merge lock held per-file, never during
/// extraction or resolution.
pub struct ScanCoordinator {
    exclusions: ExclusionSet,
    chunk_size: usize,
    show_progress: bool,
}

impl ScanCoordinator {
    pub fn new<I, S>(extra_excludes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exclusions: ExclusionSet::with_extra(extra_excludes),
            chunk_size: CHUNK_SIZE,
            show_progress: false,
        }
    }

    /// Coordinator with the default exclusion set only.
    pub fn with_defaults() -> Self {
        Self::new(std::iter::empty::<String>())
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    pub fn scan(&self, root: &Path, aliases: &AliasTable) -> Result<ScanOutcome, ScanError> {
        self.scan_with_cancel(root, aliases, &AtomicBool::new(false))
    }

    /// Scan with an external stop flag. Once the flag is set, files not yet
    /// started are counted as skipped; in-flight merges complete, so the
    /// partial graph and stats stay consistent.
    pub fn scan_with_cancel(
        &self,
        root: &Path,
        aliases: &AliasTable,
        cancel: &AtomicBool,
    ) -> Result<ScanOutcome, ScanError> {
        let files = FileScanner::new().scan_directory(root, &self.exclusions)?;
        if files.is_empty() {
            return Err(ScanError::EmptyScan {
                root: root.to_path_buf(),
            });
        }

        info!(files = files.len(), root = %root.display(), "starting scan");

        let bar = if self.show_progress {
            ProgressBar::new(files.len() as u64)
        } else {
            ProgressBar::hidden()
        };

        let extractor = DependencyExtractor::new();
        let shared: Mutex<(BTreeMap<String, BTreeSet<String>>, ScanStats)> =
            Mutex::new((BTreeMap::new(), ScanStats::default()));

        files.par_chunks(self.chunk_size).for_each(|batch| {
            for file in batch {
                let outcome = if cancel.load(Ordering::Relaxed) {
                    FileOutcome::Skipped
                } else {
                    self.process_file(file, root, aliases, &extractor)
                };

                if let FileOutcome::Failed(err) = &outcome {
                    warn!(file = %file.path.display(), error = %err, "file failed");
                }

                // Single critical section per file: either the complete
                // result is merged or nothing is.
                let mut guard = shared.lock();
                let (edges, stats) = &mut *guard;
                match outcome {
                    FileOutcome::Merged(report) => {
                        stats.files_processed += 1;
                        stats.dependencies_found += report.deps.len() as u64;
                        if !report.deps.is_empty() {
                            edges.insert(report.relative, report.deps);
                        }
                    }
                    FileOutcome::Skipped => stats.skipped += 1,
                    FileOutcome::Failed(_) => {
                        stats.errors += 1;
                        stats.skipped += 1;
                    }
                }
                drop(guard);

                bar.inc(1);
            }
        });

        bar.finish_and_clear();

        let (edges, stats) = shared.into_inner();
        info!(
            processed = stats.files_processed,
            dependencies = stats.dependencies_found,
            errors = stats.errors,
            skipped = stats.skipped,
            "scan complete"
        );

        Ok(ScanOutcome {
            graph: DependencyGraph::from_edges(edges),
            stats,
        })
    }

    /// Pure computation for one file: read, extract, resolve. No shared
    /// state is touched here.
    fn process_file(
        &self,
        file: &SourceFile,
        root: &Path,
        aliases: &AliasTable,
        extractor: &DependencyExtractor,
    ) -> FileOutcome {
        let content = match read_source(&file.path) {
            Ok(content) => content,
            Err(err) => return FileOutcome::Failed(err),
        };

        let tokens = extractor.extract(file.language, &content);
        debug!(file = %file.relative, tokens = tokens.len(), "extracted tokens");

        let current_dir = file.path.parent().unwrap_or(root);
        let resolver = PathResolver::new(root, aliases, &self.exclusions);

        let deps: BTreeSet<String> = tokens
            .iter()
            .filter_map(|token| resolver.resolve(token, current_dir, file.language))
            .map(|dep| dep.id().to_string())
            .collect();

        FileOutcome::Merged(FileReport {
            relative: file.relative.clone(),
            deps,
        })
    }
}

/// Read file content as UTF-8, falling back to Latin-1 for files the primary
/// decoding rejects. Latin-1 maps every byte to the code point of the same
/// value, so only an unreadable file produces an error.
fn read_source(path: &Path) -> Result<String, ScanError> {
    let bytes = fs::read(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match String::from_utf8(bytes) {
        Ok(content) => Ok(content),
        Err(err) => Ok(err.into_bytes().iter().map(|&b| b as char).collect()),
    }
}
