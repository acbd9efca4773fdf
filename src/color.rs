use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Rgb – renderer-agnostic color
// ---------------------------------------------------------------------------

/// A plain sRGB triple. Chart specs carry these so no UI-framework color
/// type leaks out of the core; the egui layer converts at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

/// Fixed slice color for failed launches in the single-site pie.
pub const FAILED_RED: Rgb = Rgb::new(255, 0, 0);
/// Fixed slice color for successful launches (royal blue).
pub const SUCCESS_BLUE: Rgb = Rgb::new(65, 105, 225);
/// Fallback for categories the map has never seen.
pub const FALLBACK_GRAY: Rgb = Rgb::new(128, 128, 128);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colors using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Rgb::new(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Category color mapping: booster category → Rgb
// ---------------------------------------------------------------------------

/// Maps each booster version category to a stable color.
///
/// Built once per dataset from the full category list (not the filtered
/// subset), so a category keeps its color while the user drags the filters.
#[derive(Debug, Clone, Default)]
pub struct CategoryColors {
    mapping: Vec<(String, Rgb)>,
}

impl CategoryColors {
    /// Assign evenly spaced hues to the categories in the given order.
    pub fn new(categories: &[String]) -> Self {
        let palette = generate_palette(categories.len());
        CategoryColors {
            mapping: categories
                .iter()
                .cloned()
                .zip(palette)
                .collect(),
        }
    }

    /// Look up the color for a category; gray for unknown ones.
    pub fn color_for(&self, category: &str) -> Rgb {
        self.mapping
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, color)| *color)
            .unwrap_or(FALLBACK_GRAY)
    }

    /// Legend entries in the order the categories were assigned.
    pub fn entries(&self) -> &[(String, Rgb)] {
        &self.mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_produces_n_distinct_colors() {
        let palette = generate_palette(5);
        assert_eq!(palette.len(), 5);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn category_colors_are_stable_and_fall_back_to_gray() {
        let categories = vec!["v1.0".to_string(), "FT".to_string(), "B5".to_string()];
        let colors = CategoryColors::new(&categories);

        assert_eq!(colors.color_for("FT"), colors.color_for("FT"));
        assert_ne!(colors.color_for("FT"), colors.color_for("B5"));
        assert_eq!(colors.color_for("unheard of"), FALLBACK_GRAY);
        assert_eq!(colors.entries().len(), 3);
        assert_eq!(colors.entries()[0].0, "v1.0");
    }
}
