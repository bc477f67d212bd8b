use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Nationality → Color32
// ---------------------------------------------------------------------------

/// Stable colour per nationality, shared by the bar and scatter charts so a
/// country keeps its colour across tabs and filter changes.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the dataset-wide nationality list.
    pub fn new(nationalities: &[String]) -> Self {
        let mapping = nationalities
            .iter()
            .cloned()
            .zip(generate_palette(nationalities.len()))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, nationality: &str) -> Color32 {
        self.mapping
            .get(nationality)
            .copied()
            .unwrap_or(self.default_color)
    }
}
