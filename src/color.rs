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
// Color mapping: sample name → Color32
// ---------------------------------------------------------------------------

/// Maps each sample name of the loaded dataset to a distinct colour, so a
/// sample keeps its hue across both charts and any selection change.
#[derive(Debug, Clone, Default)]
pub struct SampleColors {
    mapping: BTreeMap<String, Color32>,
}

impl SampleColors {
    /// Build the colour map from the distinct sample names.
    pub fn new<'a>(samples: impl IntoIterator<Item = &'a str>) -> Self {
        let names: Vec<&str> = samples.into_iter().collect();
        let palette = generate_palette(names.len());
        let mapping = names
            .into_iter()
            .map(str::to_string)
            .zip(palette)
            .collect();
        SampleColors { mapping }
    }

    /// Look up the colour for a sample.
    pub fn color_for(&self, sample: &str) -> Color32 {
        self.mapping.get(sample).copied().unwrap_or(Color32::GRAY)
    }
}
