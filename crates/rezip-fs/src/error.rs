use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create staging file in '{dir}': {source}")]
    Stage {
        dir:    PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to move staged file into '{path}': {source}")]
    Commit {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read '{path}': {source}")]
    Read {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// The underlying I/O error.
    pub fn io(&self) -> &io::Error {
        match self {
            Self::Stage { source, .. }
            | Self::Write { source, .. }
            | Self::Commit { source, .. }
            | Self::Read { source, .. } => source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
