#![allow(dead_code)]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fomse::{Invocation, Layout, Selection, ToolRunner};
use tempfile::TempDir;

/// Records every call instead of starting a process.
pub struct FakeVault {
    pub runs: Vec<Invocation>,
    pub revealed: Vec<PathBuf>,
    pub result: fn() -> io::Result<Option<i32>>,
}

impl Default for FakeVault {
    fn default() -> Self {
        Self {
            runs: Vec::new(),
            revealed: Vec::new(),
            result: || Ok(Some(0)),
        }
    }
}

impl FakeVault {
    pub fn failing_with(result: fn() -> io::Result<Option<i32>>) -> Self {
        Self {
            result,
            ..Self::default()
        }
    }
}

impl ToolRunner for FakeVault {
    fn run(&mut self, invocation: &Invocation) -> io::Result<Option<i32>> {
        self.runs.push(invocation.clone());
        (self.result)()
    }

    fn reveal(&mut self, dir: &Path) {
        self.revealed.push(dir.to_path_buf());
    }
}

/// A throwaway `FieldsofMistria` tree with one save and an unpack directory.
pub struct Workspace {
    pub temp: TempDir,
    pub layout: Layout,
    pub save: PathBuf,
    pub unpack_dir: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("temp dir");
        let layout = Layout::from_root(temp.path().join("FieldsofMistria"));
        fs::create_dir_all(&layout.saves_dir).expect("saves dir");
        let save = layout.saves_dir.join("farm1.sav");
        fs::write(&save, b"current save").expect("write save");
        let unpack_dir = temp.path().join("Unpack").join("farm1");
        fs::create_dir_all(&unpack_dir).expect("unpack dir");

        Self {
            temp,
            layout,
            save,
            unpack_dir,
        }
    }

    pub fn selection(&self) -> Selection {
        Selection {
            save_file: Some(PathBuf::from("farm1.sav")),
            work_dir: Some(self.unpack_dir.clone()),
            executable: Some(PathBuf::from("VaultC.exe")),
        }
    }

    pub fn backup(&self) -> PathBuf {
        self.layout.backups_dir().join("farm1.sav")
    }

    pub fn seed_backup(&self, contents: &[u8]) {
        fs::create_dir_all(self.layout.backups_dir()).expect("backups dir");
        fs::write(self.backup(), contents).expect("write backup");
    }
}

pub fn snapshot(dir: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    let mut entries = Vec::new();
    collect(dir, &mut entries);
    entries.sort();
    entries
}

fn collect(dir: &Path, entries: &mut Vec<(PathBuf, Vec<u8>)>) {
    for entry in fs::read_dir(dir).expect("read dir").flatten() {
        let path = entry.path();
        if path.is_dir() {
            entries.push((path.clone(), Vec::new()));
            collect(&path, entries);
        } else {
            let data = fs::read(&path).expect("read file");
            entries.push((path, data));
        }
    }
}
