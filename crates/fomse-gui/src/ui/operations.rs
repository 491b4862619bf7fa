use eframe::egui;
use fomse::SystemRunner;

use crate::{dialogs::NativeDialogs, ui::theme, FomseApp};

impl FomseApp {
    pub(crate) fn handle_unpack_request(&mut self) {
        self.run_unpack(SystemRunner, &mut NativeDialogs);
    }

    pub(crate) fn handle_pack_request(&mut self) {
        self.run_pack(SystemRunner, &mut NativeDialogs);
    }

    pub(crate) fn handle_clean_up_request(&mut self) {
        self.run_clean_up(&mut NativeDialogs);
    }
}

pub(crate) fn file_menu(app: &mut FomseApp, ui: &mut egui::Ui) {
    ui.menu_button("File", |ui| {
        if ui.button("Unpack").clicked() {
            ui.close_menu();
            app.handle_unpack_request();
        }

        if ui.button("Pack").clicked() {
            ui.close_menu();
            app.handle_pack_request();
        }

        if ui
            .button("Clean up directory")
            .on_hover_text("Delete the files inside the selected directory.")
            .clicked()
        {
            ui.close_menu();
            app.handle_clean_up_request();
        }

        ui.separator();

        if ui.button("Exit").clicked() {
            ui.close_menu();
            app.request_exit(ui.ctx(), &mut NativeDialogs);
        }
    });
}

pub(crate) fn operations_section(app: &mut FomseApp, ui: &mut egui::Ui) {
    ui.group(|ui| {
        ui.heading(theme::heading_text(ui, "Save"));
        ui.small("Unpack backs up the save first. Pack empties the directory afterwards.");
        ui.horizontal(|ui| {
            if ui
                .button("Unpack")
                .on_hover_text("Back up the save, then unpack it into the directory.")
                .clicked()
            {
                app.handle_unpack_request();
            }

            if ui
                .button("Pack")
                .on_hover_text("Pack the directory into the save, then clean up the directory.")
                .clicked()
            {
                app.handle_pack_request();
            }
        });

        if let Some(error) = &app.error_message {
            ui.colored_label(egui::Color32::RED, error);
        }
        if !app.status.is_empty() {
            ui.label(&app.status);
        }
    });
}
