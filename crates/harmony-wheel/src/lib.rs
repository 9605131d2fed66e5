//! Colour-harmony wheel engine.
//!
//! Maps a point on a hue/saturation disc to a primary HSV colour plus the colours related to it
//! by a fixed harmony, and renders the disc itself as an RGBA bitmap.

pub mod color;
pub mod coords;
pub mod events;
pub mod frame;
pub mod harmony;
pub mod raster;
pub mod wheel;

pub use color::{Hsv, hsv_to_rgb};
pub use coords::{Point, PolarPoint};
pub use events::{ParseEventError, WheelEvent, parse_point};
pub use frame::{DiscFrame, FrameError};
pub use harmony::Harmony;
pub use raster::{DiscImage, RasterCache, rasterize};
pub use wheel::{ColorSet, DragState, Handle, Wheel, WheelConfig};
