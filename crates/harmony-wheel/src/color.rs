use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Hue in degrees `[0, 360)`, saturation and value in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub hue: f64,
    pub saturation: f64,
    #[serde(default = "full_value")]
    pub value: f64,
}

fn full_value() -> f64 {
    1.0
}

impl Hsv {
    pub fn new(hue: f64, saturation: f64, value: f64) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Channels in `[0, 255]` as reals.
    pub fn to_rgb(&self) -> [f64; 3] {
        hsv_to_rgb(self.hue, self.saturation, self.value)
    }

    pub fn to_srgb(&self) -> Srgb<u8> {
        let [r, g, b] = self.to_rgb().map(|c| c.round().clamp(0.0, 255.0) as u8);
        Srgb::new(r, g, b)
    }

    pub fn hex(&self) -> String {
        format!("#{:x}", self.to_srgb())
    }
}

impl Default for Hsv {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

impl fmt::Display for Hsv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.hue, self.saturation, self.value)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseHsvError {
    #[error("Expected 'hue,saturation[,value]', got '{0}'")]
    Shape(String),
    #[error("Invalid number '{0}'")]
    Number(String),
}

impl FromStr for Hsv {
    type Err = ParseHsvError;

    /// Accepts `hue,saturation` or `hue,saturation,value`; value defaults to 1.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| {
                let p = p.trim();
                p.parse::<f64>()
                    .map_err(|_| ParseHsvError::Number(p.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        match parts.as_slice() {
            [h, s] => Ok(Self::new(*h, *s, 1.0)),
            [h, s, v] => Ok(Self::new(*h, *s, *v)),
            _ => Err(ParseHsvError::Shape(s.to_string())),
        }
    }
}

/// HSV to RGB via chroma and sextant decomposition. Returns channels in `[0, 255]`.
///
/// `hue` must already be wrapped into `[0, 360)`. Sextant bounds are inclusive on both ends;
/// neighbouring branches agree at the shared boundary. A hue outside every sextant gets no
/// chroma contribution.
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> [f64; 3] {
    let chroma = value * saturation;
    let h1 = hue / 60.0;
    let x = chroma * (1.0 - ((h1 % 2.0) - 1.0).abs());

    let (r1, g1, b1) = match h1 {
        h if (0.0..=1.0).contains(&h) => (chroma, x, 0.0),
        h if (1.0..=2.0).contains(&h) => (x, chroma, 0.0),
        h if (2.0..=3.0).contains(&h) => (0.0, chroma, x),
        h if (3.0..=4.0).contains(&h) => (0.0, x, chroma),
        h if (4.0..=5.0).contains(&h) => (x, 0.0, chroma),
        h if (5.0..=6.0).contains(&h) => (chroma, 0.0, x),
        _ => (0.0, 0.0, 0.0),
    };

    let m = value - chroma;
    [255.0 * (r1 + m), 255.0 * (g1 + m), 255.0 * (b1 + m)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::FromColor;

    #[test]
    fn test_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), [255.0, 0.0, 0.0]);
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), [0.0, 255.0, 0.0]);
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), [0.0, 0.0, 255.0]);
        assert_eq!(hsv_to_rgb(180.0, 1.0, 1.0), [0.0, 255.0, 255.0]);
        assert_eq!(hsv_to_rgb(42.0, 0.0, 1.0), [255.0, 255.0, 255.0]);
        assert_eq!(hsv_to_rgb(42.0, 1.0, 0.0), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_channels_in_range() {
        for h in 0..360 {
            for s in 0..=10 {
                let rgb = hsv_to_rgb(h as f64 + 0.5, s as f64 / 10.0, 1.0);
                for c in rgb {
                    assert!((0.0..=255.0 + 1e-9).contains(&c), "channel {c} out of range");
                }
            }
        }
    }

    #[test]
    fn test_matches_palette() {
        for h in (0..360).step_by(7) {
            for s in [0.0, 0.25, 0.8, 1.0] {
                let ours = Hsv::new(h as f64, s, 1.0).to_rgb();
                let theirs: Srgb<f64> = Srgb::from_color(palette::Hsv::new(h as f64, s, 1.0));
                let (r, g, b) = theirs.into_components();
                for (a, b) in ours.iter().zip([r, g, b]) {
                    assert!((a - b * 255.0).abs() < 1e-6, "hue {h} sat {s}: {a} vs {}", b * 255.0);
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_hue_has_no_chroma() {
        assert_eq!(hsv_to_rgb(400.0, 1.0, 1.0), [0.0, 0.0, 0.0]);
        assert_eq!(hsv_to_rgb(400.0, 0.5, 1.0), [127.5, 127.5, 127.5]);
    }

    #[test]
    fn test_hex() {
        assert_eq!(Hsv::new(0.0, 1.0, 1.0).hex(), "#ff0000");
        assert_eq!(Hsv::new(180.0, 0.8, 1.0).hex(), "#33ffff");
    }

    #[test]
    fn test_parse() {
        assert_eq!("10, 0.5".parse::<Hsv>(), Ok(Hsv::new(10.0, 0.5, 1.0)));
        assert_eq!("10,0.5,0.25".parse::<Hsv>(), Ok(Hsv::new(10.0, 0.5, 0.25)));
        assert!(matches!("10".parse::<Hsv>(), Err(ParseHsvError::Shape(_))));
        assert!(matches!("a,b".parse::<Hsv>(), Err(ParseHsvError::Number(_))));
    }

    #[test]
    fn test_deserialize_defaults_value() {
        let hsv: Hsv = serde_json::from_str(r#"{"hue": 0, "saturation": 0.8}"#).unwrap();
        assert_eq!(hsv, Hsv::new(0.0, 0.8, 1.0));
    }
}
