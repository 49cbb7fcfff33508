//! Image loading error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while discovering or encoding page images.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The topic directory could not be listed.
    #[error("failed to read directory {}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An image file could not be read.
    #[error("failed to read image {}", path.display())]
    ReadImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An image could not be decoded or re-encoded.
    #[error("failed to convert {}: {message}", path.display())]
    Convert { path: PathBuf, message: String },

    /// A HEIC/HEIF page was found but HEIF decoding was not compiled in.
    #[error(
        "cannot decode {}: HEIC/HEIF support requires building with the `heif` feature",
        path.display()
    )]
    HeifUnsupported { path: PathBuf },
}
