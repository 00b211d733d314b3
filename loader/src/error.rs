//! Error types for classpath resolution and archive expansion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while assembling a loading context.
///
/// All of these are fatal: the invocation aborts before any command
/// executes.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// A classpath entry names a path that is not on disk.
    #[error("{} does not exist", .0.display())]
    PathDoesNotExist(PathBuf),

    /// An archive container could not be opened or walked.
    #[error("could not read archive '{}': {source}", .path.display())]
    Archive {
        path: PathBuf,
        source: zip::result::ZipError,
    },

    /// Extraction or temporary-storage I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results with [`LoaderError`].
pub type Result<T> = std::result::Result<T, LoaderError>;
