use crate::color::Hsv;
use crate::coords::Point;
use crate::events::WheelEvent;
use crate::frame::{DiscFrame, FrameError};
use crate::harmony::Harmony;
use crate::raster::{DiscImage, RasterCache};
use derive_more::{AsRef, Deref, From, Into};
use serde::{Deserialize, Serialize};

pub const DEFAULT_RADIUS: f64 = 150.0;

fn default_radius() -> f64 {
    DEFAULT_RADIUS
}

/// How a wheel is set up. With `controlled` the owner drives the colour through
/// [`Wheel::sync_color`]; otherwise `color` is only the starting point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelConfig {
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default)]
    pub harmony: Harmony,
    #[serde(default)]
    pub controlled: bool,
    #[serde(default)]
    pub color: Option<Hsv>,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            harmony: Harmony::default(),
            controlled: false,
            color: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// The position is authoritative for hue and saturation. `value` is carried as given,
/// since nothing on the disc encodes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelSelection {
    pub position: Point,
    pub value: f64,
}

/// A marker on the wheel: where to draw it and the colour it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Handle {
    pub position: Point,
    pub color: Hsv,
}

/// The primary colour followed by one colour per harmony offset, in table order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deref, From, Into, AsRef)]
#[serde(transparent)]
pub struct ColorSet(Vec<Hsv>);

impl ColorSet {
    pub fn primary(&self) -> Option<&Hsv> {
        self.0.first()
    }

    pub fn derived(&self) -> &[Hsv] {
        self.0.get(1..).unwrap_or_default()
    }
}

pub type Listener = Box<dyn FnMut(&ColorSet)>;

/// Pointer transition: where the selection lands for a pointer at `pointer` (pixel space).
pub fn clamp_to_disc(frame: &DiscFrame, pointer: Point) -> Point {
    frame.clamp(pointer)
}

pub struct Wheel {
    frame: DiscFrame,
    harmony: Harmony,
    controlled: bool,
    selection: WheelSelection,
    drag: DragState,
    raster: RasterCache,
    listener: Option<Listener>,
}

impl Wheel {
    pub fn new(config: &WheelConfig) -> Result<Self, FrameError> {
        let frame = DiscFrame::new(config.radius)?;
        let selection = match config.color {
            Some(color) => WheelSelection {
                position: frame.position_for(color.hue, color.saturation),
                value: color.value,
            },
            None => WheelSelection {
                position: frame.center(),
                value: 1.0,
            },
        };

        Ok(Self {
            frame,
            harmony: config.harmony,
            controlled: config.controlled,
            selection,
            drag: DragState::Idle,
            raster: RasterCache::new(),
            listener: None,
        })
    }

    /// Registers the change listener and immediately hands it the current colours.
    pub fn on_change(&mut self, listener: impl FnMut(&ColorSet) + 'static) -> ColorSet {
        self.listener = Some(Box::new(listener));
        self.recompute_color_set()
    }

    pub fn frame(&self) -> &DiscFrame {
        &self.frame
    }

    pub fn harmony(&self) -> Harmony {
        self.harmony
    }

    pub fn is_controlled(&self) -> bool {
        self.controlled
    }

    /// Switches between following [`Wheel::sync_color`] and ignoring it.
    pub fn set_controlled(&mut self, controlled: bool) {
        self.controlled = controlled;
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn selection(&self) -> WheelSelection {
        self.selection
    }

    pub fn begin_drag(&mut self) {
        self.drag = DragState::Dragging;
    }

    pub fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Moves the selection while a drag is in progress. Pointer moves while idle are ignored.
    pub fn drag_to(&mut self, pointer: Point) -> Option<ColorSet> {
        match self.drag {
            DragState::Dragging => Some(self.set_position_from_pointer(pointer)),
            DragState::Idle => {
                log::debug!("Ignoring pointer move to {pointer:?} while idle");
                None
            }
        }
    }

    /// `pointer` is in pixel space, `0..2·radius` on both axes.
    pub fn set_position_from_pointer(&mut self, pointer: Point) -> ColorSet {
        self.selection.position = clamp_to_disc(&self.frame, pointer);
        self.recompute_color_set()
    }

    /// Places the selection at `color`. Always wins over a drag in progress.
    pub fn set_color(&mut self, color: Hsv) -> ColorSet {
        self.drag = DragState::Idle;
        self.selection = WheelSelection {
            position: self.frame.position_for(color.hue, color.saturation),
            value: color.value,
        };
        self.recompute_color_set()
    }

    /// Owner-supplied colour. Only a controlled wheel follows it.
    pub fn sync_color(&mut self, color: Hsv) -> Option<ColorSet> {
        if !self.controlled {
            log::debug!("Uncontrolled wheel ignores external color {color}");
            return None;
        }
        Some(self.set_color(color))
    }

    pub fn set_harmony(&mut self, harmony: Harmony) -> ColorSet {
        self.harmony = harmony;
        self.recompute_color_set()
    }

    /// Switches to a new frame size, keeping the current colour.
    pub fn resize(&mut self, radius: f64) -> Result<ColorSet, FrameError> {
        let color = self.primary();
        self.frame = DiscFrame::new(radius)?;
        self.raster.invalidate();
        self.selection.position = self.frame.position_for(color.hue, color.saturation);
        Ok(self.recompute_color_set())
    }

    pub fn primary(&self) -> Hsv {
        self.frame
            .hsv_at(self.selection.position, self.selection.value)
    }

    /// Primary handle first, then one per harmony offset, all at the primary's radius.
    pub fn handles(&self) -> Vec<Handle> {
        let primary = self.primary();
        let derived = self.harmony.hues(primary.hue).map(|hue| Handle {
            position: self.frame.position_for(hue, primary.saturation),
            color: Hsv::new(hue, primary.saturation, primary.value),
        });

        std::iter::once(Handle {
            position: self.selection.position,
            color: primary,
        })
        .chain(derived)
        .collect()
    }

    pub fn color_set(&self) -> ColorSet {
        ColorSet(self.handles().into_iter().map(|h| h.color).collect())
    }

    /// Derives the full colour set from the current position and hands it to the listener.
    pub fn recompute_color_set(&mut self) -> ColorSet {
        let colors = self.color_set();
        if let Some(listener) = self.listener.as_mut() {
            listener(&colors);
        }
        colors
    }

    /// The rasterized disc for the current frame, rendered on first use and after a resize.
    pub fn background(&mut self) -> &DiscImage {
        self.raster.get(&self.frame)
    }

    /// Applies one input event. Returns the emitted colours when the event changed them.
    pub fn handle(&mut self, event: WheelEvent) -> Result<Option<ColorSet>, FrameError> {
        Ok(match event {
            WheelEvent::PointerDown => {
                self.begin_drag();
                None
            }
            WheelEvent::PointerMove(point) => self.drag_to(point),
            WheelEvent::PointerUp => {
                self.end_drag();
                None
            }
            WheelEvent::SetColor(color) => Some(self.set_color(color)),
            WheelEvent::SyncColor(color) => self.sync_color(color),
            WheelEvent::SetHarmony(harmony) => Some(self.set_harmony(harmony)),
            WheelEvent::Resize(radius) => Some(self.resize(radius)?),
        })
    }
}
