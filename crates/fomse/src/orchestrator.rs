use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::layout::Layout;
use crate::runner::{Invocation, ToolOutcome, ToolRunner};
use crate::selection::Selection;
use crate::{Error, Result};

/// Asked when a save is about to replace an earlier backup of the same name.
pub trait Prompt {
    /// Returns `true` to overwrite `backup`, `false` to abort the unpack.
    fn confirm_overwrite(&mut self, backup: &Path) -> bool;
}

impl<F> Prompt for F
where
    F: FnMut(&Path) -> bool,
{
    fn confirm_overwrite(&mut self, backup: &Path) -> bool {
        self(backup)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackupAction {
    /// The backup directory did not exist yet; it was created and the save
    /// copied without checking for an earlier backup.
    FirstBackup,
    Copied,
    Overwritten,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Backup {
    pub path: PathBuf,
    pub action: BackupAction,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnpackOutcome {
    Unpacked {
        backup: Backup,
        target_dir: PathBuf,
        tool: ToolOutcome,
    },
    /// The user kept the existing backup; nothing was copied or run.
    Declined { backup: PathBuf },
}

/// A file cleanup could not delete. When the listing itself broke part way,
/// `path` is the directory.
#[derive(Debug)]
pub struct CleanupFailure {
    pub path: PathBuf,
    pub source: io::Error,
}

#[derive(Debug, Default)]
pub struct Cleanup {
    pub dir: PathBuf,
    pub removed: Vec<PathBuf>,
    pub failed: Vec<CleanupFailure>,
}

impl Cleanup {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug)]
pub struct PackOutcome {
    pub save_file: PathBuf,
    pub tool: ToolOutcome,
    /// `Err` only when the directory could not be listed at all.
    pub cleanup: Result<Cleanup>,
}

/// Deletes the files directly inside the selected working directory.
/// Subdirectories and the directory itself stay. Files that cannot be
/// deleted are collected in [`Cleanup::failed`] and the rest still go.
pub fn clean_up(selection: &Selection) -> Result<Cleanup> {
    let dir = selection.require_work_dir()?;
    clean_dir(dir)
}

fn clean_dir(dir: &Path) -> Result<Cleanup> {
    let entries = fs::read_dir(dir).map_err(|source| Error::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut cleanup = Cleanup {
        dir: dir.to_path_buf(),
        ..Cleanup::default()
    };
    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => {
                let is_dir = entry.file_type().map(|kind| kind.is_dir()).unwrap_or(false);
                if !is_dir {
                    files.push(entry.path());
                }
            }
            Err(source) => cleanup.failed.push(CleanupFailure {
                path: dir.to_path_buf(),
                source,
            }),
        }
    }

    files.sort();
    remove_files(files, &mut cleanup);

    if cleanup.is_complete() {
        info!(dir = %dir.display(), count = cleanup.removed.len(), "cleaned up working directory");
    } else {
        warn!(
            dir = %dir.display(),
            removed = cleanup.removed.len(),
            failed = cleanup.failed.len(),
            "working directory only partly cleaned up"
        );
    }
    Ok(cleanup)
}

fn remove_files(files: Vec<PathBuf>, cleanup: &mut Cleanup) {
    for path in files {
        match fs::remove_file(&path) {
            Ok(()) => cleanup.removed.push(path),
            Err(source) => {
                debug!(path = %path.display(), "failed to delete: {source}");
                cleanup.failed.push(CleanupFailure { path, source });
            }
        }
    }
}

/// Backs up, unpacks, packs and cleans up saves through an external tool.
pub struct Orchestrator<R> {
    layout: Layout,
    runner: R,
    open_after_unpack: bool,
}

impl<R: ToolRunner> Orchestrator<R> {
    pub fn new(layout: Layout, runner: R) -> Self {
        Self {
            layout,
            runner,
            open_after_unpack: true,
        }
    }

    pub fn with_open_after_unpack(mut self, open: bool) -> Self {
        self.open_after_unpack = open;
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn unpack(&mut self, selection: &Selection, prompt: &mut dyn Prompt) -> Result<UnpackOutcome> {
        let resolved = selection.require_all()?;
        let save_file = self.layout.resolve_save(resolved.save_file);
        debug!(saves_dir = %self.layout.saves_dir.display(), "unpacking from saves directory");

        let Some(backup) = self.backup(&save_file, prompt)? else {
            let backup = self.backup_path(&save_file)?;
            info!(backup = %backup.display(), "kept existing backup, unpack aborted");
            return Ok(UnpackOutcome::Declined { backup });
        };

        let invocation = Invocation::unpack(resolved.executable, &save_file, resolved.work_dir);
        let tool = self.run_tool(&invocation);

        if self.open_after_unpack {
            self.runner.reveal(resolved.work_dir);
        }

        Ok(UnpackOutcome::Unpacked {
            backup,
            target_dir: resolved.work_dir.to_path_buf(),
            tool,
        })
    }

    /// Runs the tool and then always cleans the working directory, whatever
    /// the tool reported. A failed cleanup is returned alongside the tool
    /// outcome, never instead of it.
    pub fn pack(&mut self, selection: &Selection) -> Result<PackOutcome> {
        let resolved = selection.require_all()?;
        let save_file = self.layout.resolve_save(resolved.save_file);
        debug!(saves_dir = %self.layout.saves_dir.display(), "packing into saves directory");

        let invocation = Invocation::pack(resolved.executable, resolved.work_dir, &save_file);
        let tool = self.run_tool(&invocation);
        let cleanup = clean_dir(resolved.work_dir);
        if let Err(err) = &cleanup {
            warn!("{err}");
        }

        Ok(PackOutcome {
            save_file,
            tool,
            cleanup,
        })
    }

    /// Copies `save_file` into the backup directory. Returns `None` when an
    /// earlier backup exists and the prompt declines to overwrite it.
    ///
    /// The prompt is only consulted when the backup directory already existed.
    pub fn backup(&self, save_file: &Path, prompt: &mut dyn Prompt) -> Result<Option<Backup>> {
        let backups_dir = self.layout.backups_dir();
        let dest = self.backup_path(save_file)?;

        let action = if !backups_dir.exists() {
            fs::create_dir_all(&backups_dir).map_err(|source| Error::CreateBackupDir {
                path: backups_dir.clone(),
                source,
            })?;
            BackupAction::FirstBackup
        } else if dest.exists() {
            if !prompt.confirm_overwrite(&dest) {
                return Ok(None);
            }
            fs::remove_file(&dest).map_err(|source| Error::RemoveBackup {
                path: dest.clone(),
                source,
            })?;
            BackupAction::Overwritten
        } else {
            BackupAction::Copied
        };

        fs::copy(save_file, &dest).map_err(|source| Error::Backup {
            from: save_file.to_path_buf(),
            to: dest.clone(),
            source,
        })?;
        info!(backup = %dest.display(), ?action, "backed up save");

        Ok(Some(Backup { path: dest, action }))
    }

    /// `<backups>/<save file name>`.
    pub fn backup_path(&self, save_file: &Path) -> Result<PathBuf> {
        let name = save_file.file_name().ok_or_else(|| Error::Backup {
            from: save_file.to_path_buf(),
            to: self.layout.backups_dir(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "save path has no file name"),
        })?;
        Ok(self.layout.backups_dir().join(name))
    }

    fn run_tool(&mut self, invocation: &Invocation) -> ToolOutcome {
        info!(command = %invocation, "running VaultC");
        let outcome = ToolOutcome::from(self.runner.run(invocation));
        if outcome.succeeded() {
            debug!(%outcome, "VaultC finished");
        } else {
            warn!(command = %invocation, %outcome, "VaultC did not finish cleanly");
        }
        outcome
    }
}
