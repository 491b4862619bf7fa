use std::path::PathBuf;

use eframe::egui;
use fomse::{
    display_name, Cleanup, Error, Layout, Orchestrator, PackOutcome, Prompt, Requirement,
    Selection, Settings, ToolRunner, UnpackOutcome,
};
use tracing::{info, warn};

pub mod ui;

pub use ui::{dialogs, file_picker, operations};

/// Blocking dialogs the operations need besides the overwrite prompt.
pub trait Dialogs: Prompt {
    fn missing_selection(&mut self, requirement: Requirement);

    /// Returns `true` when the user wants to close the window.
    fn confirm_exit(&mut self) -> bool;
}

pub struct FomseApp {
    pub(crate) selection: Selection,
    pub(crate) layout: Option<Layout>,
    pub(crate) settings: Settings,
    pub(crate) status: String,
    pub(crate) error_message: Option<String>,
    pub(crate) show_info: bool,
    pub(crate) show_about: bool,
}

impl Default for FomseApp {
    fn default() -> Self {
        Self {
            selection: Selection::default(),
            layout: None,
            settings: Settings::default(),
            status: String::new(),
            error_message: None,
            show_info: false,
            show_about: false,
        }
    }
}

impl FomseApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        ui::theme::install(&cc.egui_ctx, &ui::theme::Palette::default());

        let mut startup_error = None;
        let settings = Settings::load().unwrap_or_else(|err| {
            warn!("{err}");
            startup_error = Some(err.to_string());
            Settings::default()
        });
        let layout = match Layout::detect(&settings) {
            Ok(layout) => Some(layout),
            Err(err) => {
                warn!("{err}");
                startup_error = Some(err.to_string());
                None
            }
        };

        let mut app = Self::with_environment(settings, layout);
        if let Some(message) = startup_error {
            app.set_error_message(message);
        }
        app
    }

    /// Builds the app without touching the window system. A configured
    /// executable that exists is preselected.
    pub fn with_environment(settings: Settings, layout: Option<Layout>) -> Self {
        let executable = settings
            .vault_exe
            .clone()
            .filter(|path| path.is_file());

        Self {
            selection: Selection {
                executable,
                ..Selection::default()
            },
            layout,
            settings,
            ..Self::default()
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub(crate) fn set_error_message(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
        self.status.clear();
    }

    pub(crate) fn clear_error_message(&mut self) {
        self.error_message = None;
    }

    pub(crate) fn set_save_file(&mut self, path: PathBuf) {
        info!(save = %path.display(), "selected save file");
        self.selection.save_file = Some(path);
        self.clear_error_message();
    }

    pub(crate) fn set_work_dir(&mut self, path: PathBuf) {
        info!(dir = %path.display(), "selected working directory");
        self.selection.work_dir = Some(path);
        self.clear_error_message();
    }

    pub(crate) fn set_executable(&mut self, path: PathBuf) {
        info!(exe = %path.display(), "selected VaultC executable");
        self.selection.executable = Some(path);
        self.clear_error_message();
    }

    fn orchestrator<R: ToolRunner>(&mut self, runner: R) -> Option<Orchestrator<R>> {
        match &self.layout {
            Some(layout) => Some(
                Orchestrator::new(layout.clone(), runner)
                    .with_open_after_unpack(self.settings.open_after_unpack),
            ),
            None => {
                self.set_error_message(Error::NoAppDataDir.to_string());
                None
            }
        }
    }

    fn report_error<D: Dialogs>(&mut self, err: Error, dialogs: &mut D) {
        match err {
            Error::MissingSelection(requirement) => {
                dialogs.missing_selection(requirement);
                self.set_error_message(requirement.message());
            }
            err => {
                warn!("{err}");
                self.set_error_message(err.to_string());
            }
        }
    }

    pub(crate) fn run_unpack<R: ToolRunner, D: Dialogs>(&mut self, runner: R, dialogs: &mut D) {
        let Some(mut orchestrator) = self.orchestrator(runner) else {
            return;
        };

        match orchestrator.unpack(&self.selection, &mut *dialogs) {
            Ok(UnpackOutcome::Unpacked {
                backup,
                target_dir,
                tool,
            }) => {
                let save = display_name(&backup.path);
                if tool.succeeded() {
                    self.clear_error_message();
                    self.status = format!(
                        "Unpacked {save} into {} (backup saved)",
                        display_name(&target_dir)
                    );
                } else {
                    self.set_error_message(format!("VaultC {tool} while unpacking {save}"));
                }
            }
            Ok(UnpackOutcome::Declined { .. }) => {
                self.clear_error_message();
                self.status = "Unpack cancelled, existing backup kept".to_string();
            }
            Err(err) => self.report_error(err, dialogs),
        }
    }

    pub(crate) fn run_pack<R: ToolRunner, D: Dialogs>(&mut self, runner: R, dialogs: &mut D) {
        let Some(mut orchestrator) = self.orchestrator(runner) else {
            return;
        };

        match orchestrator.pack(&self.selection) {
            Ok(PackOutcome {
                save_file,
                tool,
                cleanup,
            }) => {
                let save = display_name(&save_file);
                let tool_error = (!tool.succeeded())
                    .then(|| format!("VaultC {tool} while packing {save}"));
                match cleanup {
                    Ok(cleanup) => {
                        let summary = format!(
                            "Packed {} into {save}, removed {} file(s)",
                            display_name(&cleanup.dir),
                            cleanup.removed.len()
                        );
                        let errors: Vec<String> =
                            tool_error.into_iter().chain(cleanup_errors(&cleanup)).collect();
                        self.finish(summary, errors);
                    }
                    Err(err) => {
                        warn!("{err}");
                        let errors: Vec<String> = tool_error
                            .into_iter()
                            .chain(Some(format!("Cleanup skipped: {err}")))
                            .collect();
                        self.finish(format!("Packed into {save}"), errors);
                    }
                }
            }
            Err(err) => self.report_error(err, dialogs),
        }
    }

    pub(crate) fn run_clean_up<D: Dialogs>(&mut self, dialogs: &mut D) {
        match fomse::clean_up(&self.selection) {
            Ok(cleanup) => {
                let summary = format!(
                    "Removed {} file(s) from {}",
                    cleanup.removed.len(),
                    display_name(&cleanup.dir)
                );
                self.finish(summary, cleanup_errors(&cleanup).collect());
            }
            Err(err) => self.report_error(err, dialogs),
        }
    }

    /// Closes the window once the user confirms. Returns whether it asked to close.
    pub(crate) fn request_exit<D: Dialogs>(&self, ctx: &egui::Context, dialogs: &mut D) -> bool {
        if !dialogs.confirm_exit() {
            return false;
        }
        info!("exit confirmed");
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        true
    }

    /// Shows `summary` as status, or joins it with `errors` into the error line.
    fn finish(&mut self, summary: String, errors: Vec<String>) {
        if errors.is_empty() {
            self.clear_error_message();
            self.status = summary;
        } else {
            self.set_error_message(format!("{summary}. {}", errors.join("; ")));
        }
    }
}

fn cleanup_errors(cleanup: &Cleanup) -> impl Iterator<Item = String> + '_ {
    cleanup.failed.iter().map(|failure| {
        format!(
            "could not remove {}: {}",
            display_name(&failure.path),
            failure.source
        )
    })
}

impl eframe::App for FomseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui::operations::file_menu(self, ui);
                ui::dialogs::help_menu(self, ui);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui::file_picker::selection_section(self, ui);
            ui.add_space(8.0);
            ui::operations::operations_section(self, ui);
        });

        ui::dialogs::info_window(self, ctx);
        ui::dialogs::about_window(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io;
    use std::path::Path;
    use fomse::Invocation;
    use tempfile::{tempdir, TempDir};

    #[derive(Default)]
    struct FakeRunner {
        runs: Vec<Invocation>,
    }

    impl ToolRunner for &mut FakeRunner {
        fn run(&mut self, invocation: &Invocation) -> io::Result<Option<i32>> {
            self.runs.push(invocation.clone());
            Ok(Some(0))
        }

        fn reveal(&mut self, _dir: &Path) {}
    }

    #[derive(Default)]
    struct FakeDialogs {
        overwrite_answer: bool,
        asked_overwrite: usize,
        missing: Vec<Requirement>,
        exit_answer: bool,
        asked_exit: usize,
    }

    impl Prompt for FakeDialogs {
        fn confirm_overwrite(&mut self, _backup: &Path) -> bool {
            self.asked_overwrite += 1;
            self.overwrite_answer
        }
    }

    impl Dialogs for FakeDialogs {
        fn missing_selection(&mut self, requirement: Requirement) {
            self.missing.push(requirement);
        }

        fn confirm_exit(&mut self) -> bool {
            self.asked_exit += 1;
            self.exit_answer
        }
    }

    fn app_with_save() -> (TempDir, FomseApp) {
        let temp = tempdir().expect("temp dir");
        let layout = Layout::from_root(temp.path().join("FieldsofMistria"));
        fs::create_dir_all(&layout.saves_dir).expect("saves dir");
        let save = layout.saves_dir.join("farm1.sav");
        fs::write(&save, b"save").expect("write save");
        let unpack_dir = temp.path().join("farm1");
        fs::create_dir_all(&unpack_dir).expect("unpack dir");

        let mut app = FomseApp::with_environment(Settings::default(), Some(layout));
        app.set_save_file(save);
        app.set_work_dir(unpack_dir);
        app.set_executable(PathBuf::from("VaultC.exe"));
        (temp, app)
    }

    #[test]
    fn missing_executable_shows_dialog_and_runs_nothing() {
        let (_temp, mut app) = app_with_save();
        app.selection.executable = None;
        let mut runner = FakeRunner::default();
        let mut dialogs = FakeDialogs::default();

        app.run_unpack(&mut runner, &mut dialogs);

        assert!(runner.runs.is_empty());
        assert_eq!(dialogs.missing, vec![Requirement::Executable]);
        assert_eq!(
            app.error_message.as_deref(),
            Some("Please select the VaultC executable to unpack the save file.")
        );
    }

    #[test]
    fn unpack_then_decline_second_time() {
        let (_temp, mut app) = app_with_save();
        let mut runner = FakeRunner::default();
        let mut dialogs = FakeDialogs::default();

        app.run_unpack(&mut runner, &mut dialogs);
        assert_eq!(runner.runs.len(), 1);
        assert_eq!(dialogs.asked_overwrite, 0);
        assert!(app.status.starts_with("Unpacked farm1.sav"));

        app.run_unpack(&mut runner, &mut dialogs);
        assert_eq!(runner.runs.len(), 1);
        assert_eq!(dialogs.asked_overwrite, 1);
        assert_eq!(app.status, "Unpack cancelled, existing backup kept");
    }

    #[test]
    fn pack_reports_removed_files() {
        let (temp, mut app) = app_with_save();
        fs::write(temp.path().join("farm1").join("world.json"), b"{}").expect("write");
        let mut runner = FakeRunner::default();
        let mut dialogs = FakeDialogs::default();

        app.run_pack(&mut runner, &mut dialogs);

        assert_eq!(runner.runs.len(), 1);
        assert_eq!(app.status, "Packed farm1 into farm1.sav, removed 1 file(s)");
        assert!(app.error_message.is_none());
    }

    #[test]
    fn clean_up_without_directory_uses_its_own_message() {
        let mut app = FomseApp::with_environment(
            Settings::default(),
            Some(Layout::from_root("FieldsofMistria")),
        );
        let mut dialogs = FakeDialogs::default();

        app.run_clean_up(&mut dialogs);

        assert_eq!(dialogs.missing, vec![Requirement::CleanupDirectory]);
        assert_eq!(
            app.error_message.as_deref(),
            Some("Please select a directory to clean up.")
        );
    }

    #[test]
    fn pack_reports_missing_directory_after_running_vault() {
        let (temp, mut app) = app_with_save();
        fs::remove_dir_all(temp.path().join("farm1")).expect("remove unpack dir");
        let mut runner = FakeRunner::default();
        let mut dialogs = FakeDialogs::default();

        app.run_pack(&mut runner, &mut dialogs);

        assert_eq!(runner.runs.len(), 1);
        let message = app.error_message.as_deref().expect("error message");
        assert!(message
            .starts_with("Packed into farm1.sav. Cleanup skipped: Failed to read directory"));
        assert!(dialogs.missing.is_empty());
    }

    #[test]
    fn clean_up_reports_removed_files() {
        let (temp, mut app) = app_with_save();
        let dir = temp.path().join("farm1");
        fs::write(dir.join("header.json"), b"{}").expect("write");
        fs::write(dir.join("world.json"), b"{}").expect("write");
        let mut dialogs = FakeDialogs::default();

        app.run_clean_up(&mut dialogs);

        assert_eq!(app.status, "Removed 2 file(s) from farm1");
        assert!(app.error_message.is_none());
        assert!(app.selection().save_file.as_deref().is_some_and(Path::is_file));
    }

    #[test]
    fn missing_layout_is_reported() {
        let mut app = FomseApp::with_environment(Settings::default(), None);
        let mut runner = FakeRunner::default();
        let mut dialogs = FakeDialogs::default();

        app.run_pack(&mut runner, &mut dialogs);

        assert!(runner.runs.is_empty());
        assert_eq!(
            app.error_message.as_deref(),
            Some("Could not determine the local application data directory")
        );
    }

    #[test]
    fn exit_only_closes_after_confirmation() {
        let ctx = egui::Context::default();
        let app = FomseApp::default();

        let mut dialogs = FakeDialogs::default();
        assert!(!app.request_exit(&ctx, &mut dialogs));
        assert_eq!(dialogs.asked_exit, 1);

        dialogs.exit_answer = true;
        assert!(app.request_exit(&ctx, &mut dialogs));
        assert_eq!(dialogs.asked_exit, 2);
    }

    #[test]
    fn configured_executable_is_preselected_only_if_present() {
        let temp = tempdir().expect("temp dir");
        let exe = temp.path().join("VaultC.exe");
        fs::write(&exe, b"").expect("write exe");

        let settings = Settings {
            vault_exe: Some(exe.clone()),
            ..Settings::default()
        };
        let app = FomseApp::with_environment(settings, None);
        assert_eq!(app.selection().executable, Some(exe));

        let settings = Settings {
            vault_exe: Some(temp.path().join("missing.exe")),
            ..Settings::default()
        };
        let app = FomseApp::with_environment(settings, None);
        assert_eq!(app.selection().executable, None);
    }
}
