use std::path::PathBuf;

use thiserror::Error;

/// Failures of the task store. Every variant carries the path it happened on, so the message
/// printed on exit points straight at the offending file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("can't access {path:?}: {source}")]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path:?} is not a list of task records: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{name:?} can't be used as a name: {reason}")]
    InvalidName { name: String, reason: &'static str },
}

impl StorageError {
    pub(crate) fn file_system(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| StorageError::FileSystem { path, source }
    }
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;
