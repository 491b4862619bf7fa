use eframe::egui::{self, Color32, Margin, RichText, Style, Vec2};

#[derive(Clone)]
pub struct Palette {
    pub background: Color32,
    pub panel: Color32,
    pub accent: Color32,
    pub soft_accent: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(28, 34, 30),
            panel: Color32::from_rgb(44, 56, 48),
            accent: Color32::from_rgb(236, 178, 96),
            soft_accent: Color32::from_rgb(148, 196, 150),
            text_primary: Color32::from_rgb(236, 232, 218),
            text_muted: Color32::from_rgb(170, 176, 164),
        }
    }
}

pub fn install(ctx: &egui::Context, palette: &Palette) {
    apply_visuals(ctx, palette);
    ctx.style_mut(apply_spacing);
}

pub fn heading_text(ui: &egui::Ui, text: &str) -> RichText {
    let size = ui
        .style()
        .text_styles
        .get(&egui::TextStyle::Heading)
        .map_or(18.0, |font| font.size);
    RichText::new(text)
        .size(size)
        .color(Palette::default().accent)
}

fn apply_visuals(ctx: &egui::Context, palette: &Palette) {
    let mut visuals = egui::Visuals::dark();
    visuals.override_text_color = Some(palette.text_primary);
    visuals.widgets.noninteractive.bg_fill = palette.panel;
    visuals.widgets.noninteractive.fg_stroke.color = palette.text_muted;
    visuals.widgets.inactive.bg_fill = palette.panel;
    visuals.widgets.inactive.fg_stroke.color = palette.text_primary;
    visuals.widgets.hovered.bg_fill = palette.soft_accent.gamma_multiply(0.25);
    visuals.widgets.active.bg_fill = palette.soft_accent.gamma_multiply(0.4);
    visuals.widgets.open.bg_fill = palette.panel;
    visuals.selection.bg_fill = palette.accent.gamma_multiply(0.5);
    visuals.extreme_bg_color = palette.background;
    visuals.faint_bg_color = palette.background;
    visuals.panel_fill = palette.background;
    visuals.window_fill = palette.panel;

    ctx.set_visuals(visuals);
}

fn apply_spacing(style: &mut Style) {
    style.spacing.item_spacing = Vec2::new(10.0, 8.0);
    style.spacing.button_padding = Vec2::new(12.0, 6.0);
    style.spacing.window_margin = Margin::same(12);
    style.spacing.menu_margin = Margin::same(8);
    style.spacing.indent = 18.0;
}
