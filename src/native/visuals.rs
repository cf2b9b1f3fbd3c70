use crate::core::{Palette, Rgb, ThemeName};
use eframe::egui::{self, Color32, Context};

pub fn color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

fn scale(color: Color32, factor: f32) -> Color32 {
    let [r, g, b, a] = color.to_array();
    Color32::from_rgba_unmultiplied(
        ((r as f32) * factor).clamp(0.0, 255.0) as u8,
        ((g as f32) * factor).clamp(0.0, 255.0) as u8,
        ((b as f32) * factor).clamp(0.0, 255.0) as u8,
        a,
    )
}

/// Restyles every widget from the palette. Cart rows and buttons pick the
/// new colors up on the next frame, whenever they were first created.
pub fn configure_visuals(ctx: &Context, theme: ThemeName, p: &Palette) {
    let fg = color32(p.foreground);
    let panel = color32(p.panel);
    let accent = color32(p.accent);
    let mut visuals = match theme {
        ThemeName::Light => egui::Visuals::light(),
        ThemeName::Dark => egui::Visuals::dark(),
    };
    visuals.override_text_color = Some(fg);
    visuals.window_fill = panel;
    visuals.panel_fill = color32(p.background);
    visuals.widgets.noninteractive.bg_fill = panel;
    visuals.widgets.noninteractive.fg_stroke.color = fg;
    visuals.widgets.inactive.bg_fill = panel;
    visuals.widgets.inactive.weak_bg_fill = panel;
    visuals.widgets.inactive.fg_stroke.color = fg;
    visuals.widgets.hovered.bg_fill = accent;
    visuals.widgets.hovered.weak_bg_fill = accent;
    visuals.widgets.hovered.fg_stroke.color = panel;
    visuals.widgets.active.bg_fill = scale(accent, 0.85);
    visuals.widgets.active.weak_bg_fill = scale(accent, 0.85);
    visuals.widgets.active.fg_stroke.color = panel;
    visuals.selection.bg_fill = accent;
    visuals.selection.stroke.color = panel;
    visuals.extreme_bg_color = color32(p.cart_area);
    visuals.faint_bg_color = scale(color32(p.cart_area), 0.96);
    ctx.set_visuals(visuals);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_keeps_alpha_and_clamps() {
        let c = scale(Color32::from_rgb(200, 100, 10), 2.0);
        assert_eq!(c.to_array(), [255, 200, 20, 255]);
    }

    #[test]
    fn color32_copies_channels() {
        assert_eq!(color32(Rgb(1, 2, 3)), Color32::from_rgb(1, 2, 3));
    }
}
