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
// Color mapping: topic name → Color32
// ---------------------------------------------------------------------------

/// Gives every topic in the dataset its own bar colour.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    /// Build a colour map from the distinct topics, in the order the
    /// selection control shows them.
    pub fn new<'a>(topics: impl IntoIterator<Item = &'a str>) -> Self {
        let topics: Vec<&str> = topics.into_iter().collect();
        let palette = generate_palette(topics.len());
        let mapping = topics
            .into_iter()
            .map(str::to_string)
            .zip(palette)
            .collect();

        ColorMap { mapping }
    }

    /// Look up the colour for a topic.
    pub fn color_for(&self, topic: &str) -> Color32 {
        self.mapping.get(topic).copied().unwrap_or(Color32::GRAY)
    }
}
