use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result};

pub const SETTINGS_FILE_NAME: &str = "fomse.toml";

/// Read-only defaults loaded from `fomse.toml`. Every key is optional.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub saves_dir: Option<PathBuf>,
    pub vault_exe: Option<PathBuf>,
    pub open_after_unpack: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            saves_dir: None,
            vault_exe: None,
            open_after_unpack: true,
        }
    }
}

impl Settings {
    /// `<config dir>/fomse/fomse.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fomse").join(SETTINGS_FILE_NAME))
    }

    /// Loads from the default location, or returns defaults when there is
    /// no config directory or no file.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };

        toml::from_str(&content).map_err(|source| Error::Settings {
            path: path.to_path_buf(),
            source,
        })
    }
}
