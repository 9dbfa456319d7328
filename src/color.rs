use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::view::gauge::QualityBand;

// ---------------------------------------------------------------------------
// Hue helpers
// ---------------------------------------------------------------------------

const POSITIVE_HUE: f32 = 212.0;
const NEGATIVE_HUE: f32 = 4.0;

/// Background for cells with a zero (or absent) value.
pub const NEUTRAL: Color32 = Color32::from_rgb(42, 42, 48);

fn hsl_rgb(hue: f32, saturation: f32, lightness: f32) -> (u8, u8, u8) {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    (
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Blue for positive, red for negative; opacity grows linearly with `|value|`.
pub fn correlation_color(value: f64) -> Color32 {
    let magnitude = value.abs().min(1.0);
    if magnitude == 0.0 || value.is_nan() {
        return NEUTRAL;
    }
    let hue = if value > 0.0 { POSITIVE_HUE } else { NEGATIVE_HUE };
    let (r, g, b) = hsl_rgb(hue, 0.75, 0.55);
    Color32::from_rgba_unmultiplied(r, g, b, (magnitude * 255.0).round() as u8)
}

/// Label colour readable on top of [`correlation_color`].
pub fn correlation_text_color(value: f64) -> Color32 {
    if value.abs() > 0.6 {
        Color32::WHITE
    } else {
        Color32::LIGHT_GRAY
    }
}

// ---------------------------------------------------------------------------
// Quality bands
// ---------------------------------------------------------------------------

pub fn band_color(band: QualityBand) -> Color32 {
    let hue = match band {
        QualityBand::Low => 0.0,
        QualityBand::Medium => 38.0,
        QualityBand::High => 140.0,
    };
    let (r, g, b) = hsl_rgb(hue, 0.7, 0.5);
    Color32::from_rgb(r, g, b)
}
