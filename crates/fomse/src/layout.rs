use std::path::{Path, PathBuf};

use crate::{settings::Settings, Error, Result};

pub const GAME_DIR_NAME: &str = "FieldsofMistria";
pub const SAVES_DIR_NAME: &str = "saves";
pub const BACKUPS_DIR_NAME: &str = "backups";
pub const SAVE_EXTENSION: &str = "sav";

/// Conventional per-user directories of the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub root: PathBuf,
    pub saves_dir: PathBuf,
}

impl Layout {
    /// Layout rooted at `<root>`, with saves in `<root>/saves`.
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let saves_dir = root.join(SAVES_DIR_NAME);
        Self { root, saves_dir }
    }

    /// Uses the local app-data directory (`%LOCALAPPDATA%` on Windows), with
    /// the saves directory overridable from the settings file.
    pub fn detect(settings: &Settings) -> Result<Self> {
        let local = dirs::data_local_dir().ok_or(Error::NoAppDataDir)?;
        Ok(Self::detect_in(&local, settings))
    }

    /// Same as [`Layout::detect`] with an explicit local app-data directory.
    pub fn detect_in(local: &Path, settings: &Settings) -> Self {
        let mut layout = Self::from_root(local.join(GAME_DIR_NAME));
        if let Some(saves_dir) = &settings.saves_dir {
            layout.saves_dir = saves_dir.clone();
        }
        layout
    }

    pub fn backups_dir(&self) -> PathBuf {
        self.saves_dir.join(BACKUPS_DIR_NAME)
    }

    /// A bare file name such as `farm1.sav` refers to a file in the saves
    /// directory; anything with a directory component is used as given.
    pub fn resolve_save(&self, save: &Path) -> PathBuf {
        let bare = save
            .parent()
            .map_or(true, |parent| parent.as_os_str().is_empty());
        if bare {
            self.saves_dir.join(save)
        } else {
            save.to_path_buf()
        }
    }
}
