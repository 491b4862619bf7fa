use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A path that must be chosen before an operation can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    SaveFile,
    Directory,
    Executable,
    /// The working directory, when asked for by a cleanup.
    CleanupDirectory,
}

impl Requirement {
    pub fn title(self) -> &'static str {
        match self {
            Requirement::SaveFile => "No File Selected",
            Requirement::Directory | Requirement::CleanupDirectory => "No Directory Selected",
            Requirement::Executable => "No Executable Selected",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Requirement::SaveFile => "Please select a save file to unpack.",
            Requirement::Directory => "Please select a directory to unpack to.",
            Requirement::Executable => {
                "Please select the VaultC executable to unpack the save file."
            }
            Requirement::CleanupDirectory => "Please select a directory to clean up.",
        }
    }
}

/// The user's current choices. Nothing here outlives the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub save_file: Option<PathBuf>,
    pub work_dir: Option<PathBuf>,
    pub executable: Option<PathBuf>,
}

/// A selection with every path present, produced by [`Selection::require_all`].
#[derive(Clone, Copy, Debug)]
pub struct Resolved<'a> {
    pub save_file: &'a Path,
    pub work_dir: &'a Path,
    pub executable: &'a Path,
}

fn non_empty(path: &Option<PathBuf>) -> Option<&Path> {
    path.as_deref()
        .filter(|path| !path.as_os_str().is_empty())
}

impl Selection {
    pub fn save_file(&self) -> Option<&Path> {
        non_empty(&self.save_file)
    }

    pub fn work_dir(&self) -> Option<&Path> {
        non_empty(&self.work_dir)
    }

    pub fn executable(&self) -> Option<&Path> {
        non_empty(&self.executable)
    }

    /// Checks save file, directory and executable in that order and reports
    /// the first one missing.
    pub fn require_all(&self) -> Result<Resolved<'_>> {
        let save_file = self
            .save_file()
            .ok_or(Error::MissingSelection(Requirement::SaveFile))?;
        let work_dir = self
            .work_dir()
            .ok_or(Error::MissingSelection(Requirement::Directory))?;
        let executable = self
            .executable()
            .ok_or(Error::MissingSelection(Requirement::Executable))?;

        Ok(Resolved {
            save_file,
            work_dir,
            executable,
        })
    }

    /// Only the working directory; used by cleanup.
    pub fn require_work_dir(&self) -> Result<&Path> {
        self.work_dir()
            .ok_or(Error::MissingSelection(Requirement::CleanupDirectory))
    }
}

/// Base name used for the short labels; falls back to the whole path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
