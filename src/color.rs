use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::scene::draw::FillTone;

// ---------------------------------------------------------------------------
// Fixed chart colours
// ---------------------------------------------------------------------------

fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Fill colour of a stacked layer. Fossil is a muted neutral, zero-carbon green.
pub fn tone_color(tone: FillTone) -> Color32 {
    match tone {
        FillTone::Fossil => from_hsl(30.0, 0.08, 0.55),
        FillTone::ZeroCarbon => from_hsl(140.0, 0.55, 0.45),
    }
}

/// Stroke colour for line scenes.
pub fn line_color() -> Color32 {
    from_hsl(207.0, 0.54, 0.47)
}

/// Colour for callout text and leader lines.
pub fn callout_color() -> Color32 {
    from_hsl(15.0, 0.75, 0.45)
}

/// Same colour with a new alpha, for translucent fills.
pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// `#rrggbb`, for SVG output.
pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}
