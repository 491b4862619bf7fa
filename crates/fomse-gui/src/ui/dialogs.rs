use std::path::Path;

use eframe::egui;
use fomse::{display_name, Prompt, Requirement};
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use crate::{Dialogs, FomseApp};

/// Native message boxes. They block the UI thread until answered.
pub struct NativeDialogs;

impl Prompt for NativeDialogs {
    fn confirm_overwrite(&mut self, backup: &Path) -> bool {
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title("File Already Exists. Overwrite?")
            .set_description(&format!(
                "The file {} already exists in the backup directory. Do you want to overwrite it?",
                display_name(backup)
            ))
            .set_buttons(MessageButtons::YesNo)
            .show();
        matches!(answer, MessageDialogResult::Yes)
    }
}

impl Dialogs for NativeDialogs {
    fn missing_selection(&mut self, requirement: Requirement) {
        MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(requirement.title())
            .set_description(requirement.message())
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn confirm_exit(&mut self) -> bool {
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title("Confirm Exit")
            .set_description("Are you sure you want to exit?")
            .set_buttons(MessageButtons::YesNo)
            .show();
        matches!(answer, MessageDialogResult::Yes)
    }
}

pub(crate) fn help_menu(app: &mut FomseApp, ui: &mut egui::Ui) {
    ui.menu_button("Help", |ui| {
        if ui.button("Info").clicked() {
            app.show_info = true;
            ui.close_menu();
        }
        if ui.button("About").clicked() {
            app.show_about = true;
            ui.close_menu();
        }
    });
}

pub(crate) fn info_window(app: &mut FomseApp, ctx: &egui::Context) {
    egui::Window::new("Info")
        .open(&mut app.show_info)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label("1. Select a save file from the saves folder.");
            ui.label("2. Select an empty directory to unpack to.");
            ui.label("3. Select the VaultC executable.");
            ui.label("4. Unpack, edit the files, then Pack.");
            ui.add_space(8.0);
            ui.small(
                "Each unpack copies the save into saves/backups first. \
                 Packing deletes the files left in the directory.",
            );
        });
}

pub(crate) fn about_window(app: &mut FomseApp, ctx: &egui::Context) {
    egui::Window::new("About")
        .open(&mut app.show_about)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.set_max_width(320.0);
            ui.vertical_centered(|ui| {
                ui.heading("Fields of Mistria Save Editor");
                ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                ui.add_space(6.0);
                ui.label("Unpacking and packing is done by VaultC.");
                ui.small(format!("Licensed under {}", env!("CARGO_PKG_LICENSE")));
            });
        });
}
