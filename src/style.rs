use egui::{Color32, Context, FontId, Stroke, Style, TextStyle, Visuals};

/// Slate palette shared by the panels
pub const SLATE_50: Color32 = Color32::from_rgb(248, 250, 252);
pub const SLATE_200: Color32 = Color32::from_rgb(226, 232, 240);
pub const SLATE_300: Color32 = Color32::from_rgb(203, 213, 225);
pub const SLATE_400: Color32 = Color32::from_rgb(148, 163, 184);
pub const SLATE_600: Color32 = Color32::from_rgb(71, 85, 105);
pub const SLATE_800: Color32 = Color32::from_rgb(30, 41, 59);
pub const INDIGO_600: Color32 = Color32::from_rgb(79, 70, 229);

pub fn configure_style(ctx: &Context, font_size: f32) {
    let mut style = Style::default();

    style.spacing.item_spacing = egui::vec2(10.0, 8.0);
    style.spacing.window_margin = egui::Margin::same(15);
    style
        .text_styles
        .insert(TextStyle::Monospace, FontId::monospace(font_size));

    ctx.set_style(style);

    let mut visuals = Visuals::light();
    visuals.window_shadow = egui::epaint::Shadow::NONE;
    visuals.popup_shadow = egui::epaint::Shadow::NONE;
    visuals.panel_fill = SLATE_50;

    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, SLATE_200);
    visuals.widgets.hovered.bg_fill = Color32::from_gray(240);
    visuals.widgets.active.bg_fill = Color32::from_gray(230);

    visuals.selection.bg_fill = Color32::from_rgb(200, 220, 255);
    visuals.selection.stroke = Stroke::new(1.0, Color32::from_rgb(100, 100, 100));

    ctx.set_visuals(visuals);
}
