//! Error types for composite assembly.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::course::IndexError;
use crate::manifest::ManifestError;

/// Result type for composite operations.
pub type CompositeResult<T> = Result<T, CompositeError>;

/// Errors that abort composite assembly.
///
/// Assembly is not transactional: whatever was copied or indexed before the
/// error stays on disk. Re-running the assembly is the recovery path.
#[derive(Debug, Error)]
pub enum CompositeError {
    /// Failed to create a directory.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDirectoryFailed { path: PathBuf, source: io::Error },

    /// Failed to copy a sub-course or asset.
    #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    /// Failed to remove a previous copy.
    #[error("failed to remove {}: {source}", path.display())]
    RemoveFailed { path: PathBuf, source: io::Error },

    /// A runtime asset is missing from the asset directory.
    #[error("cannot find {item} in {}", source_dir.display())]
    MissingAsset { item: String, source_dir: PathBuf },

    /// Reading or writing the composite index failed.
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Writing the composite manifest failed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}
