use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

use bike_brush::data::model::Season;

// ---------------------------------------------------------------------------
// Season colours (categorical)
// ---------------------------------------------------------------------------

/// Fixed colour per season, as drawn in the daily scatter and its legend.
pub fn season_color(season: Option<Season>) -> Color32 {
    match season {
        Some(Season::Winter) => Color32::from_rgb(0x1f, 0x77, 0xb4),
        Some(Season::Spring) => Color32::from_rgb(0x2c, 0xa0, 0x2c),
        Some(Season::Summer) => Color32::from_rgb(0xff, 0x7f, 0x0e),
        Some(Season::Autumn) => Color32::from_rgb(0xd6, 0x27, 0x28),
        None => Color32::GRAY,
    }
}

/// Legend entries (label → colour) for the UI.
pub fn season_legend() -> Vec<(&'static str, Color32)> {
    Season::ALL
        .iter()
        .map(|&s| (s.label(), season_color(Some(s))))
        .collect()
}

// ---------------------------------------------------------------------------
// Sequential blue scale
// ---------------------------------------------------------------------------

/// Map `t` in `[0, 1]` from near-white to dark blue. Out-of-range and NaN
/// inputs are clamped.
pub fn sequential_blue(t: f64) -> Color32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) } as f32;
    let light: LinSrgb = Srgb::new(0.969, 0.984, 1.0).into_linear();
    let dark: LinSrgb = Srgb::new(0.031, 0.188, 0.420).into_linear();
    let rgb: Srgb<u8> = Srgb::from_linear(light.mix(dark, t));
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

/// Colour for a correlation coefficient: +1 is lightest, -1 darkest.
pub fn correlation_color(coefficient: Option<f64>) -> Color32 {
    match coefficient {
        Some(r) => sequential_blue((1.0 - r) / 2.0),
        None => Color32::from_gray(230),
    }
}

/// Text colour readable on top of [`correlation_color`].
pub fn correlation_ink(coefficient: Option<f64>) -> Color32 {
    match coefficient {
        Some(r) if r < -0.3 => Color32::WHITE,
        _ => Color32::BLACK,
    }
}
