//! Codec error types.

use std::path::PathBuf;

/// Errors that abort a read or a write. Malformed individual lines are not
/// errors; the reader skips them.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The source file does not exist.
    #[error("file does not exist: {}", .0.display())]
    NotFound(PathBuf),

    /// Failed to read the source file.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input has no content.
    #[error("file is empty")]
    Empty,

    /// The first line is blank.
    #[error("no version found in file")]
    MissingVersion,

    /// The first line is not an integer.
    #[error("invalid version header: {0:?}")]
    InvalidVersion(String),

    /// The version is negative or newer than this build understands.
    #[error("file version {found} is out of range (supported 0..={supported})")]
    VersionOutOfRange {
        /// Version declared by the file.
        found: i64,
        /// Newest version this build reads.
        supported: u32,
    },

    /// The destination path is empty.
    #[error("destination path is empty")]
    EmptyPath,

    /// The destination file does not exist; the writer never creates files.
    #[error("destination does not exist: {}", .0.display())]
    DestinationMissing(PathBuf),

    /// The container holds no chunks.
    #[error("container has no chunks")]
    NoChunks,

    /// A chunk header or payload could not be encoded as JSON.
    #[error("failed to encode {what}: {source}")]
    Encode {
        /// What was being encoded.
        what: &'static str,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write the destination file.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// File being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
