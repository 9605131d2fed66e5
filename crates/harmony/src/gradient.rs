use harmony_wheel::{ColorSet, Hsv};
use palette::{FromColor, Srgb};
use serde::Serialize;

/// Colours in the shape a gradient-mesh backdrop consumes: the primary becomes the base
/// colour, every harmony colour drives one wave layer. Channels are normalized to `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientUniforms {
    pub base: [f64; 3],
    pub waves: Vec<[f64; 3]>,
}

impl GradientUniforms {
    pub fn from_colors(colors: &ColorSet) -> Option<Self> {
        let (base, waves) = colors.split_first()?;
        Some(Self {
            base: normalized_rgb(base),
            waves: waves.iter().map(normalized_rgb).collect(),
        })
    }
}

fn normalized_rgb(color: &Hsv) -> [f64; 3] {
    let hsv = palette::Hsv::new(color.hue, color.saturation, color.value);
    let rgb: Srgb<f64> = Srgb::from_color(hsv);
    let (r, g, b) = rgb.into_components();
    [r, g, b]
}
