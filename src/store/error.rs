use std::path::PathBuf;

use thiserror::Error;

use crate::document::DocumentError;

/// Errors raised while building a [`ResourceStore`](super::ResourceStore).
///
/// All of them are startup failures; lookups never fail.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The resources path does not exist or is not a directory
    #[error("Resources directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    /// The translation file pattern is not a valid glob
    #[error("Invalid translation file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    /// Directory traversal failed
    #[error("Failed to scan resources directory: {0}")]
    Walk(#[from] ignore::Error),
    /// A translation file could not be read
    #[error("Failed to read translation file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A translation file is not a usable document
    #[error("Invalid translation file {}: {source}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },
}
