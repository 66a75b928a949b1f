use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

use crate::egui_app::state::StatusTone;

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent_amber: Color32,
    pub accent_chili: Color32,
}

pub fn palette(dark: bool) -> Palette {
    if dark {
        Palette {
            bg_primary: Color32::from_rgb(14, 10, 8),
            bg_secondary: Color32::from_rgb(28, 22, 18),
            bg_tertiary: Color32::from_rgb(46, 36, 28),
            panel_outline: Color32::from_rgb(64, 48, 36),
            text_primary: Color32::from_rgb(240, 228, 210),
            text_muted: Color32::from_rgb(170, 150, 130),
            accent_amber: Color32::from_rgb(252, 196, 84),
            accent_chili: Color32::from_rgb(232, 88, 56),
        }
    } else {
        Palette {
            bg_primary: Color32::from_rgb(255, 250, 240),
            bg_secondary: Color32::from_rgb(250, 238, 214),
            bg_tertiary: Color32::from_rgb(240, 222, 190),
            panel_outline: Color32::from_rgb(214, 186, 140),
            text_primary: Color32::from_rgb(48, 32, 20),
            text_muted: Color32::from_rgb(120, 96, 72),
            accent_amber: Color32::from_rgb(196, 120, 16),
            accent_chili: Color32::from_rgb(200, 60, 32),
        }
    }
}

pub fn visuals(dark: bool) -> Visuals {
    let palette = palette(dark);
    let mut visuals = if dark { Visuals::dark() } else { Visuals::light() };
    visuals.window_fill = palette.bg_primary;
    visuals.panel_fill = palette.bg_secondary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.faint_bg_color = palette.bg_secondary;
    visuals.selection.bg_fill = palette.accent_chili;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent_amber);
    visuals.widgets.noninteractive.bg_fill = palette.bg_secondary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    for widget in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
        &mut visuals.widgets.open,
    ] {
        set_rounded(widget, palette);
    }
    visuals.popup_shadow = Shadow::NONE;
    visuals
}

fn set_rounded(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::same(8);
    vis.bg_fill = palette.bg_tertiary;
    vis.weak_bg_fill = palette.bg_tertiary;
    vis.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

pub fn status_badge(tone: StatusTone) -> (&'static str, Color32) {
    match tone {
        StatusTone::Idle => ("Idle", Color32::from_rgb(42, 42, 42)),
        StatusTone::Info => ("Info", Color32::from_rgb(64, 140, 112)),
        StatusTone::Warning => ("Warning", Color32::from_rgb(192, 138, 43)),
    }
}
