use std::io;
use std::path::PathBuf;

use zip::result::ZipError;

/// Failures while flattening, deduplicating or writing an archive.
#[derive(Debug, thiserror::Error)]
pub enum RepackError {
    #[error("failed to open input zip '{path}': {source}")]
    Open {
        path:   PathBuf,
        #[source]
        source: ZipError,
    },

    #[error(
        "files with name \"{name}\" have identical sizes but differing content (paths: {first} and {second})"
    )]
    Conflict {
        name:   String,
        first:  String,
        second: String,
    },

    #[error("failed to read entry '{path}': {source}")]
    Read {
        path:   String,
        #[source]
        source: io::Error,
    },

    #[error("failed to create output file '{path}': {source}")]
    Create {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write and hash file in output zip with name \"{name}\": {source}")]
    Entry {
        name:   String,
        #[source]
        source: io::Error,
    },

    #[error("failed to finalize output zip '{path}': {source}")]
    Finish {
        path:   PathBuf,
        #[source]
        source: ZipError,
    },

    #[error("failed to stage output zip: {0}")]
    Staging(#[from] rezip_fs::Error),
}

/// Failures that prevent validation from producing a report.
///
/// A hash mismatch is not one of them; it is recorded in the report.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("failed to open output zip '{path}': {source}")]
    Open {
        path:   PathBuf,
        #[source]
        source: ZipError,
    },

    #[error("missing file in output zip: {name}")]
    MissingEntry { name: String },

    #[error("failed to compute hash for output file '{name}': {source}")]
    Hash {
        name:   String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write validation report '{path}': {source}")]
    ReportWrite {
        path:   PathBuf,
        #[source]
        source: rezip_fs::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Io(#[from] rezip_fs::Error),

    #[error("failed to decode registry '{path}': {source}")]
    Decode {
        path:   PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T, E = RepackError> = std::result::Result<T, E>;
