use std::path::PathBuf;

use thiserror::Error;

use crate::selection::Requirement;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{}", .0.message())]
    MissingSelection(Requirement),

    #[error("Could not determine the local application data directory")]
    NoAppDataDir,

    #[error("Failed to create backup directory {}: {source}", .path.display())]
    CreateBackupDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove existing backup {}: {source}", .path.display())]
    RemoveBackup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {} to {}: {source}", .from.display(), .to.display())]
    Backup {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {}: {source}", .path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
