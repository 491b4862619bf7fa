use std::path::Path;

use eframe::egui;
use fomse::{display_name, layout::SAVE_EXTENSION};

use crate::{ui::theme, FomseApp};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PickerKind {
    SaveFile,
    WorkDir,
    Executable,
}

impl PickerKind {
    fn label(self) -> &'static str {
        match self {
            PickerKind::SaveFile => "Save file",
            PickerKind::WorkDir => "Directory",
            PickerKind::Executable => "VaultC",
        }
    }

    fn dialog_title(self) -> &'static str {
        match self {
            PickerKind::SaveFile => "Select Save File",
            PickerKind::WorkDir => "Select Directory to Unpack to",
            PickerKind::Executable => "Select Executable File",
        }
    }

    fn hover_text(self) -> &'static str {
        match self {
            PickerKind::SaveFile => "Pick the .sav file to unpack or to pack into.",
            PickerKind::WorkDir => "Pick the directory the save is unpacked to and packed from.",
            PickerKind::Executable => "Pick the VaultC executable that does the conversion.",
        }
    }
}

impl FomseApp {
    pub(crate) fn browse(&mut self, kind: PickerKind) {
        let mut dialog = rfd::FileDialog::new().set_title(kind.dialog_title());

        if let Some(layout) = &self.layout {
            let start = match kind {
                PickerKind::SaveFile => &layout.saves_dir,
                PickerKind::WorkDir | PickerKind::Executable => &layout.root,
            };
            if start.is_dir() {
                dialog = dialog.set_directory(start);
            }
        }

        match kind {
            PickerKind::SaveFile => {
                if let Some(path) = dialog
                    .add_filter("Save Files", &[SAVE_EXTENSION])
                    .pick_file()
                {
                    self.set_save_file(path);
                }
            }
            PickerKind::WorkDir => {
                if let Some(path) = dialog.pick_folder() {
                    self.set_work_dir(path);
                }
            }
            PickerKind::Executable => {
                if let Some(path) = dialog
                    .add_filter("Executable Files", &["exe"])
                    .pick_file()
                {
                    self.set_executable(path);
                }
            }
        }
    }

    fn selected_path(&self, kind: PickerKind) -> Option<&Path> {
        match kind {
            PickerKind::SaveFile => self.selection.save_file(),
            PickerKind::WorkDir => self.selection.work_dir(),
            PickerKind::Executable => self.selection.executable(),
        }
    }
}

pub(crate) fn selection_section(app: &mut FomseApp, ui: &mut egui::Ui) {
    ui.group(|ui| {
        ui.heading(theme::heading_text(ui, "Selection"));
        ui.small("Choose the save, the working directory and the VaultC executable.");
        egui::Grid::new("selection_grid")
            .num_columns(3)
            .spacing(egui::vec2(12.0, 6.0))
            .show(ui, |ui| {
                for kind in [
                    PickerKind::SaveFile,
                    PickerKind::WorkDir,
                    PickerKind::Executable,
                ] {
                    picker_row(app, ui, kind);
                    ui.end_row();
                }
            });
    });
}

fn picker_row(app: &mut FomseApp, ui: &mut egui::Ui, kind: PickerKind) {
    ui.label(kind.label());

    match app.selected_path(kind) {
        Some(path) => {
            ui.monospace(display_name(path))
                .on_hover_text(format!("Full path: {}", path.display()));
        }
        None => {
            ui.weak("Nothing selected");
        }
    }

    if ui
        .button("Browse…")
        .on_hover_text(kind.hover_text())
        .clicked()
    {
        app.browse(kind);
    }
}
