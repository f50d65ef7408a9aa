use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the context toolkit.
///
/// Most external failures (missing goals, absent git, unreadable
/// directories) are converted to text inside the component that hit them
/// and never reach this type.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No command provided")]
    EmptyCommand,

    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("No observation file matching '{query}' found")]
    NotFound { query: String, available: Vec<String> },
}

impl ContextError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ContextError>;
