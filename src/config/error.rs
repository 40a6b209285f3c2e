use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Failures reading or writing the schedule configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot access schedule config at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("schedule config at {} is malformed: {message}", .path.display())]
    Format { path: PathBuf, message: String },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| ConfigError::Io { path, source }
    }

    pub(crate) fn format(path: impl Into<PathBuf>) -> impl FnOnce(serde_json::Error) -> Self {
        let path = path.into();
        move |err| ConfigError::Format {
            path,
            message: err.to_string(),
        }
    }

    /// Path of the file or directory the failure relates to.
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Io { path, .. } | ConfigError::Format { path, .. } => path.as_path(),
        }
    }
}
