#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::{egui, NativeOptions, Renderer};
use fomse_gui::FomseApp;
use tracing::{error, info};

const APP_TITLE: &str = "Fields of Mistria Save Editor";

/// Wgpu first; Glow covers machines without a usable wgpu adapter.
const RENDERERS: [Renderer; 2] = [Renderer::Wgpu, Renderer::Glow];

fn main() -> eframe::Result<()> {
    fomse::init_logging();

    let mut first_error = None;
    for renderer in RENDERERS {
        info!(?renderer, "starting editor window");
        match eframe::run_native(
            APP_TITLE,
            native_options(renderer),
            Box::new(|cc| Ok(Box::new(FomseApp::new(cc)))),
        ) {
            Ok(()) => return Ok(()),
            Err(err) => {
                error!(?renderer, "renderer failed to start: {err}");
                show_renderer_error(renderer, &err);
                first_error.get_or_insert(err);
            }
        }
    }

    first_error.map_or(Ok(()), Err)
}

fn native_options(renderer: Renderer) -> NativeOptions {
    NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([560.0, 340.0])
            .with_min_inner_size([480.0, 300.0]),
        renderer,
        centered: true,
        ..Default::default()
    }
}

#[cfg(target_os = "windows")]
fn show_renderer_error(renderer: Renderer, err: &eframe::Error) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title(APP_TITLE)
        .set_description(&format!("The {renderer:?} renderer could not start:\n{err}"))
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

#[cfg(not(target_os = "windows"))]
fn show_renderer_error(_renderer: Renderer, _err: &eframe::Error) {}
