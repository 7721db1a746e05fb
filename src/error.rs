use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the scan pipeline.
///
/// Per-file errors (`Io`) are recovered by the coordinator and only counted;
/// `InvalidRoot` and `EmptyScan` are fatal to the run.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("project root {path} does not exist or is not a directory")]
    InvalidRoot { path: PathBuf },

    #[error("no scannable source files found under {root}")]
    EmptyScan { root: PathBuf },

    #[error("failed to load {path}: {message}")]
    Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, ScanError>;
