//! Light theme matching the landing page the field is embedded in

use egui::Color32;

/// Page palette
pub mod colors {
    use super::Color32;

    // === Backgrounds ===
    pub const BG_PAGE: Color32 = Color32::from_rgb(248, 250, 252);     // #F8FAFC
    pub const BG_ELEVATED: Color32 = Color32::from_rgb(241, 245, 249); // #F1F5F9
    pub const BG_HOVER: Color32 = Color32::from_rgb(226, 232, 240);    // #E2E8F0

    // === Text ===
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(15, 23, 42);    // #0F172A
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(71, 85, 105); // #475569
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(148, 163, 184);   // #94A3B8

    pub const BORDER: Color32 = Color32::from_rgb(226, 232, 240);

    /// Brand blue, also the default point colour
    pub const ACCENT: Color32 = Color32::from_rgb(37, 99, 235); // #2563EB
}

/// Straight RGBA in 0..1 to an egui colour
pub fn point_color(rgba: [f32; 4]) -> Color32 {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(
        channel(rgba[0]),
        channel(rgba[1]),
        channel(rgba[2]),
        channel(rgba[3]),
    )
}

/// Light egui Visuals in the page palette
pub fn landing_visuals() -> egui::Visuals {
    use colors::*;

    let mut visuals = egui::Visuals::light();

    visuals.panel_fill = BG_PAGE;
    visuals.window_fill = BG_PAGE;
    visuals.extreme_bg_color = BG_PAGE;
    visuals.faint_bg_color = BG_ELEVATED;

    visuals.override_text_color = Some(TEXT_PRIMARY);

    visuals.widgets.noninteractive.bg_fill = BG_PAGE;
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, BORDER);

    visuals.widgets.inactive.bg_fill = BG_ELEVATED;
    visuals.widgets.inactive.weak_bg_fill = BG_ELEVATED;
    visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);

    visuals.widgets.hovered.bg_fill = BG_HOVER;
    visuals.widgets.hovered.weak_bg_fill = BG_HOVER;
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, ACCENT);

    visuals.selection.bg_fill = ACCENT;
    visuals.selection.stroke = egui::Stroke::new(1.0, BG_PAGE);
    visuals.hyperlink_color = ACCENT;

    // Flat, like the page
    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}
