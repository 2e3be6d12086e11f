//! Defines the custom error type for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for the `core` module.
///
/// Messages never repeat their source; print with `{:#}` (anyhow) or walk
/// `source()` to get the underlying cause.
///
/// All variants end the scan. A missing ignore file is recovered inside
/// `core::ignore` and never surfaces here.
#[derive(Debug, Error)]
pub enum CoreError {
    /// File enumeration under the scan root failed.
    #[error("Failed to enumerate files under {root}")]
    Selection {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The scan root does not exist or is not a directory.
    #[error("Scan root is not a readable directory: {0}")]
    NotADirectory(PathBuf),

    /// More candidate files matched than a single scan accepts.
    #[error("Too many files found: {0}")]
    TooManyFiles(usize),

    /// Represents an I/O error while reading a candidate file.
    #[error("Failed to read {1}")]
    Io(#[source] std::io::Error, PathBuf),

    /// Represents an error during the parsing or building of a glob pattern.
    #[error("Invalid glob pattern")]
    GlobPattern(#[from] globset::Error),

    /// Writing the report failed (closed pipe, full disk).
    #[error("Failed to write report output")]
    Output(#[source] std::io::Error),

    /// Represents an error that occurred when a Tokio task was joined.
    #[error("File selection task failed")]
    Join(#[from] tokio::task::JoinError),
}

impl CoreError {
    /// True for the failures that happen before any file is scanned.
    pub fn is_selection_failure(&self) -> bool {
        matches!(
            self,
            CoreError::Selection { .. }
                | CoreError::NotADirectory(_)
                | CoreError::TooManyFiles(_)
                | CoreError::GlobPattern(_)
        )
    }
}
