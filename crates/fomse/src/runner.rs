use std::ffi::OsStr;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolCommand {
    Unpack,
    Pack,
}

impl ToolCommand {
    pub fn as_str(self) -> &'static str {
        match self {
            ToolCommand::Unpack => "unpack",
            ToolCommand::Pack => "pack",
        }
    }
}

/// One call of the external VaultC tool.
///
/// Unpack reads `source` (the save) into `destination` (a directory); pack
/// reads `source` (the directory) into `destination` (the save).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub command: ToolCommand,
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl Invocation {
    pub fn unpack(program: &Path, save_file: &Path, target_dir: &Path) -> Self {
        Self {
            program: program.to_path_buf(),
            command: ToolCommand::Unpack,
            source: save_file.to_path_buf(),
            destination: target_dir.to_path_buf(),
        }
    }

    pub fn pack(program: &Path, source_dir: &Path, save_file: &Path) -> Self {
        Self {
            program: program.to_path_buf(),
            command: ToolCommand::Pack,
            source: source_dir.to_path_buf(),
            destination: save_file.to_path_buf(),
        }
    }

    pub fn args(&self) -> [&OsStr; 3] {
        [
            OsStr::new(self.command.as_str()),
            self.source.as_os_str(),
            self.destination.as_os_str(),
        ]
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let program = self.program.display();
        let source = self.source.display();
        let destination = self.destination.display();
        match self.command {
            ToolCommand::Unpack => write!(f, "{program} unpack {source} {destination}"),
            ToolCommand::Pack => write!(f, "{program} pack \"{source}\" \"{destination}\""),
        }
    }
}

/// How the external tool finished. Never treated as fatal by the orchestrator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToolOutcome {
    /// `None` when the process was ended by a signal.
    Exited(Option<i32>),
    FailedToStart(String),
}

impl ToolOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, ToolOutcome::Exited(Some(0)))
    }
}

impl From<io::Result<Option<i32>>> for ToolOutcome {
    fn from(result: io::Result<Option<i32>>) -> Self {
        match result {
            Ok(code) => ToolOutcome::Exited(code),
            Err(err) => ToolOutcome::FailedToStart(err.to_string()),
        }
    }
}

impl fmt::Display for ToolOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolOutcome::Exited(Some(code)) => write!(f, "exited with code {code}"),
            ToolOutcome::Exited(None) => write!(f, "was terminated"),
            ToolOutcome::FailedToStart(err) => write!(f, "failed to start: {err}"),
        }
    }
}

/// Process boundary of the orchestrator.
pub trait ToolRunner {
    /// Runs the tool to completion and returns its exit code.
    fn run(&mut self, invocation: &Invocation) -> io::Result<Option<i32>>;

    /// Shows `dir` in the platform file browser.
    fn reveal(&mut self, dir: &Path);
}

/// Runs the real executable, blocking until it exits.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> io::Result<Option<i32>> {
        let status = Command::new(&invocation.program)
            .args(invocation.args())
            .status()?;
        Ok(status.code())
    }

    fn reveal(&mut self, dir: &Path) {
        if let Err(err) = reveal_dir_in_file_browser(dir) {
            warn!(dir = %dir.display(), "failed to open file browser: {err}");
        }
    }
}

#[cfg(target_os = "windows")]
pub fn reveal_dir_in_file_browser(dir: &Path) -> io::Result<()> {
    // explorer.exe exits with 1 even on success, so the status is ignored.
    Command::new("explorer").arg(dir).status().map(|_| ())
}

#[cfg(target_os = "macos")]
pub fn reveal_dir_in_file_browser(dir: &Path) -> io::Result<()> {
    Command::new("open").arg(dir).status().map(|_| ())
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub fn reveal_dir_in_file_browser(dir: &Path) -> io::Result<()> {
    Command::new("xdg-open").arg(dir).status().map(|_| ())
}
