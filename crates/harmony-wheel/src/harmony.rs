use crate::coords::wrap_hue;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Classical colour relationships, each a fixed list of hue offsets in degrees.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Harmony {
    Triad,
    #[strum(to_string = "tetradic", serialize = "tetrad")]
    Tetradic,
    #[strum(to_string = "complementary", serialize = "complement")]
    Complementary,
    #[default]
    Analogous,
    Square,
}

impl Harmony {
    pub fn offsets(&self) -> &'static [f64] {
        match self {
            Self::Triad => &[120.0, 240.0],
            Self::Tetradic => &[60.0, 180.0, 240.0],
            Self::Complementary => &[180.0],
            Self::Analogous => &[-30.0, 30.0],
            Self::Square => &[90.0, 180.0, 270.0],
        }
    }

    /// Number of derived colours, excluding the primary.
    pub fn len(&self) -> usize {
        self.offsets().len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets().is_empty()
    }

    /// Derived hues for `base`, in table order, each wrapped into `[0, 360)`.
    pub fn hues(self, base: f64) -> impl Iterator<Item = f64> {
        self.offsets()
            .iter()
            .map(move |offset| wrap_hue(base + offset))
    }
}
