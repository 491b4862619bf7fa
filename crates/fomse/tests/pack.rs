mod common;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use common::{snapshot, FakeVault, Workspace};
use fomse::{clean_up, Error, Invocation, Orchestrator, Requirement, Selection, ToolOutcome};

fn fill_unpack_dir(dir: &Path) {
    fs::write(dir.join("header.json"), b"{}").expect("write header");
    fs::write(dir.join("world.json"), b"{}").expect("write world");
    fs::create_dir(dir.join("nested")).expect("nested dir");
    fs::write(dir.join("nested").join("keep.json"), b"{}").expect("write nested");
}

#[test]
fn pack_runs_vault_then_empties_the_directory() {
    let ws = Workspace::new();
    fill_unpack_dir(&ws.unpack_dir);

    let mut orchestrator = Orchestrator::new(ws.layout.clone(), FakeVault::default());
    let outcome = orchestrator.pack(&ws.selection()).expect("pack");

    assert_eq!(
        orchestrator.runner().runs,
        vec![Invocation::pack(
            Path::new("VaultC.exe"),
            &ws.unpack_dir,
            &ws.save
        )]
    );
    assert_eq!(outcome.save_file, ws.save);
    assert_eq!(outcome.tool, ToolOutcome::Exited(Some(0)));

    let cleanup = outcome.cleanup.expect("cleanup");
    assert!(cleanup.is_complete());
    assert_eq!(
        cleanup.removed,
        vec![
            ws.unpack_dir.join("header.json"),
            ws.unpack_dir.join("world.json")
        ]
    );
    assert!(ws.unpack_dir.is_dir());
    assert!(ws.unpack_dir.join("nested").join("keep.json").is_file());
    assert!(orchestrator.runner().revealed.is_empty());
}

#[test]
fn pack_cleans_up_even_when_vault_fails() {
    for result in [
        (|| Ok(Some(1))) as fn() -> io::Result<Option<i32>>,
        || Err(io::Error::new(io::ErrorKind::NotFound, "VaultC.exe not found")),
    ] {
        let ws = Workspace::new();
        fill_unpack_dir(&ws.unpack_dir);

        let mut orchestrator = Orchestrator::new(ws.layout.clone(), FakeVault::failing_with(result));
        let outcome = orchestrator.pack(&ws.selection()).expect("pack");

        assert!(!outcome.tool.succeeded());
        assert_eq!(outcome.cleanup.expect("cleanup").removed.len(), 2);
        assert!(!ws.unpack_dir.join("header.json").exists());
    }
}

#[test]
fn pack_keeps_tool_outcome_when_directory_is_gone() {
    let ws = Workspace::new();
    fs::remove_dir_all(&ws.unpack_dir).expect("remove unpack dir");

    let mut orchestrator = Orchestrator::new(ws.layout.clone(), FakeVault::default());
    let outcome = orchestrator.pack(&ws.selection()).expect("pack");

    assert_eq!(orchestrator.runner().runs.len(), 1);
    assert_eq!(outcome.tool, ToolOutcome::Exited(Some(0)));
    match outcome.cleanup {
        Err(Error::ReadDir { path, .. }) => assert_eq!(path, ws.unpack_dir),
        other => panic!("unexpected cleanup: {other:?}"),
    }
}

#[test]
fn pack_with_missing_selection_does_not_clean_up() {
    let ws = Workspace::new();
    fill_unpack_dir(&ws.unpack_dir);
    let before = snapshot(ws.temp.path());
    let full = ws.selection();

    let cases = [
        (
            Selection {
                save_file: Some(PathBuf::new()),
                ..full.clone()
            },
            Requirement::SaveFile,
        ),
        (
            Selection {
                work_dir: None,
                ..full.clone()
            },
            Requirement::Directory,
        ),
        (
            Selection {
                executable: None,
                ..full.clone()
            },
            Requirement::Executable,
        ),
    ];

    for (selection, expected) in cases {
        let mut orchestrator = Orchestrator::new(ws.layout.clone(), FakeVault::default());
        match orchestrator.pack(&selection) {
            Err(Error::MissingSelection(requirement)) => assert_eq!(requirement, expected),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(orchestrator.runner().runs.is_empty());
    }

    assert_eq!(snapshot(ws.temp.path()), before);
}

#[test]
fn clean_up_only_needs_the_directory() {
    let ws = Workspace::new();
    fill_unpack_dir(&ws.unpack_dir);

    let selection = Selection {
        work_dir: Some(ws.unpack_dir.clone()),
        ..Selection::default()
    };
    let cleanup = clean_up(&selection).expect("clean up");

    assert_eq!(cleanup.dir, ws.unpack_dir);
    assert_eq!(cleanup.removed.len(), 2);
    assert!(cleanup.failed.is_empty());
    assert!(ws.save.is_file());
}

#[test]
fn clean_up_of_missing_directory_reports_path() {
    let ws = Workspace::new();
    let gone = ws.temp.path().join("does-not-exist");
    let selection = Selection {
        work_dir: Some(gone.clone()),
        ..Selection::default()
    };

    match clean_up(&selection) {
        Err(Error::ReadDir { path, .. }) => assert_eq!(path, gone),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn absolute_save_paths_are_used_as_given() {
    let ws = Workspace::new();
    let elsewhere: PathBuf = ws.temp.path().join("farm9.sav");
    let selection = Selection {
        save_file: Some(elsewhere.clone()),
        ..ws.selection()
    };

    let mut orchestrator = Orchestrator::new(ws.layout.clone(), FakeVault::default());
    let outcome = orchestrator.pack(&selection).expect("pack");

    assert_eq!(outcome.save_file, elsewhere);
    assert_eq!(orchestrator.runner().runs[0].destination, elsewhere);
}
