use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Scatter points: green at 0.6 opacity.
pub const SCATTER: Color32 = Color32::from_rgba_premultiplied(0, 77, 0, 153);

// ---------------------------------------------------------------------------
// Series palette
// ---------------------------------------------------------------------------

/// `n` visually distinct colours, one per chart series, using evenly spaced
/// hues starting from blue.
pub fn series_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = 210.0 + (i as f32 / n as f32) * 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.65, 0.55).into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let colours = series_palette(4);
        assert_eq!(colours.len(), 4);
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(series_palette(0).is_empty());
    }
}
