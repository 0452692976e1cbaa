use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Hue step between consecutive colours; neighbours land far apart on the wheel.
const GOLDEN_ANGLE: f32 = 137.507_77;

/// Colour of the `index`-th chart series or bar.
pub fn series_color(index: usize) -> Color32 {
    let hue = (index as f32 * GOLDEN_ANGLE) % 360.0;
    // Alternate the lightness so adjacent labels also differ in value.
    let lightness = if index % 2 == 0 { 0.52 } else { 0.62 };
    let rgb: Srgb = Hsl::new(hue, 0.6, lightness).into_color();
    let (r, g, b) = rgb.into_format::<u8>().into_components();
    Color32::from_rgb(r, g, b)
}

// ---------------------------------------------------------------------------
// Color mapping: series / category label → Color32
// ---------------------------------------------------------------------------

/// Maps the labels of one chart (series names or bar categories) to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Assign colours to labels in the given order.
    pub fn new<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut mapping = BTreeMap::new();
        for label in labels {
            let next = mapping.len();
            mapping.entry(label.to_string()).or_insert_with(|| series_color(next));
        }

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_colors_are_distinct() {
        let colors: Vec<Color32> = (0..12).map(series_color).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_repeated_label_keeps_first_color() {
        let map = ColorMap::new(["US", "DE", "US", "FR"]);
        assert_eq!(map.color_for("US"), series_color(0));
        assert_eq!(map.color_for("DE"), series_color(1));
        assert_eq!(map.color_for("FR"), series_color(2));
    }

    #[test]
    fn test_unknown_label_gets_default() {
        let map = ColorMap::new(["US", "DE"]);
        assert_ne!(map.color_for("US"), map.color_for("DE"));
        assert_eq!(map.color_for("FR"), Color32::GRAY);
    }
}
