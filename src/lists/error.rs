use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a domain list from disk.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("cannot read domain list {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ListError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
